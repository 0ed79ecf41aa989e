mod config;
mod draft;
mod error;

use std::io::{Read, Write};

use api_types::{race::RaceKey, ticket::TicketDraft};
use engine::{Quote, Ticket, Yen, unflatten};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    config::{Command, DraftArgs},
    draft::Form,
    error::Result,
};

/// Output of `materialize`: what the persistence layer stores.
#[derive(Debug, Serialize)]
struct Materialized<'a> {
    replaces: Option<Uuid>,
    race: Option<&'a RaceKey>,
    summary: Quote,
    tickets: &'a [Ticket],
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    Ok(std::fs::read_to_string(path)?)
}

fn write_json<T: Serialize>(value: &T) -> Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

fn read_draft(args: &DraftArgs) -> Result<(TicketDraft, Form)> {
    let draft: TicketDraft = serde_json::from_str(&read_input(&args.input.path)?)?;
    let form = Form::from_draft(&draft)?;
    tracing::debug!(spec = %form.spec, "parsed draft");
    Ok((draft, form))
}

fn main() -> Result<()> {
    let (settings, command) = config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "bakenote={level},engine={level}",
            level = settings.level
        ))
        .with_writer(std::io::stderr)
        .init();

    match command {
        Command::Points(args) => {
            let (_, form) = read_draft(&args)?;
            write_json(&form.preview(args.amount.map(Yen::new))?)
        }
        Command::Materialize(args) => {
            let (draft, form) = read_draft(&args)?;
            let amount = form.stake(
                args.amount.map(Yen::new),
                Yen::new(settings.default_amount),
            );
            let (tickets, summary) = form.tickets(amount)?;
            if let Some(race) = &draft.race {
                tracing::info!(%race, tickets = tickets.len(), "materialized tickets");
            }

            write_json(&Materialized {
                replaces: draft.replaces,
                race: draft.race.as_ref(),
                summary,
                tickets: &tickets,
            })
        }
        Command::Unflatten(args) => {
            let ticket: Ticket = serde_json::from_str(&read_input(&args.path)?)?;
            ticket.spec()?;
            write_json(&unflatten(&ticket))
        }
    }
}
