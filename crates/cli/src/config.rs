use clap::{Args as ClapArgs, Parser, Subcommand};
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/bakenote.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Log level for the `bakenote` and `engine` targets.
    pub level: String,
    /// Stake per point (yen) used when a draft does not carry one.
    pub default_amount: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            default_amount: 100,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "bakenote")]
#[command(about = "Count, materialize and unpack horse racing tickets")]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    config: Option<String>,
    /// Override log level (e.g. debug).
    #[arg(long, global = true)]
    level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the point count (and cost, when a stake is known) of a draft.
    Points(DraftArgs),
    /// Print the ticket records a draft turns into.
    Materialize(DraftArgs),
    /// Print the editable selection of a stored ticket.
    Unflatten(InputArgs),
}

#[derive(Debug, ClapArgs)]
pub struct DraftArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Stake per point in yen, overrides the draft.
    #[arg(long)]
    pub amount: Option<u64>,
}

#[derive(Debug, ClapArgs)]
pub struct InputArgs {
    /// JSON file to read, `-` for stdin.
    #[arg(default_value = "-")]
    pub path: String,
}

pub fn load() -> Result<(AppConfig, Command)> {
    resolve(Args::parse())
}

/// Layers defaults, the TOML file, `BAKENOTE_*` variables and flags, in
/// increasing precedence.
fn resolve(args: Args) -> Result<(AppConfig, Command)> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("BAKENOTE"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(level) = args.level {
        settings.level = level;
    }

    Ok((settings, args.command))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    struct TempConfig(PathBuf);

    impl TempConfig {
        fn new(name: &str, contents: &str) -> Self {
            let path = std::env::temp_dir().join(format!(
                "bakenote_{}_{name}.toml",
                std::process::id()
            ));
            std::fs::write(&path, contents).unwrap();
            Self(path)
        }

        fn path(&self) -> &str {
            self.0.to_str().unwrap()
        }
    }

    impl Drop for TempConfig {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.0);
        }
    }

    fn resolve_from(argv: &[&str]) -> (AppConfig, Command) {
        let args = Args::try_parse_from(argv).unwrap();
        resolve(args).unwrap()
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let (settings, command) = resolve_from(&[
            "bakenote",
            "--config",
            "does/not/exist.toml",
            "points",
        ]);
        assert_eq!(settings.level, "info");
        assert_eq!(settings.default_amount, 100);
        let Command::Points(args) = command else {
            panic!("expected the points command");
        };
        assert_eq!(args.input.path, "-");
        assert_eq!(args.amount, None);
    }

    #[test]
    fn file_overrides_defaults() {
        let file = TempConfig::new("file", "level = \"warn\"\ndefault_amount = 500\n");
        let (settings, _) = resolve_from(&["bakenote", "--config", file.path(), "points"]);
        assert_eq!(settings.level, "warn");
        assert_eq!(settings.default_amount, 500);
    }

    #[test]
    fn flag_overrides_file() {
        let file = TempConfig::new("flag", "level = \"warn\"\ndefault_amount = 300\n");
        let (settings, command) = resolve_from(&[
            "bakenote",
            "--config",
            file.path(),
            "materialize",
            "draft.json",
            "--amount",
            "200",
            "--level",
            "debug",
        ]);
        assert_eq!(settings.level, "debug");
        assert_eq!(settings.default_amount, 300);
        let Command::Materialize(args) = command else {
            panic!("expected the materialize command");
        };
        assert_eq!(args.input.path, "draft.json");
        assert_eq!(args.amount, Some(200));
    }
}
