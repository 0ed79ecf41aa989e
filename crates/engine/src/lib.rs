//! Bet ticket engine.
//!
//! Pure functions that turn a horse-racing ticket form into the records to
//! persist:
//!
//! 1. [`normalize`] canonicalizes the raw [`Selection`];
//! 2. [`count_points`] counts the individual wagers it stands for;
//! 3. [`materialize`] builds the [`Ticket`] records, and [`unflatten`] turns
//!    a stored ticket back into an editable selection.
//!
//! ```rust
//! use engine::{BetMethod, BetSpec, BetType, Runner, Selection, Yen, materialize};
//!
//! let runners = |ns: &[u8]| ns.iter().map(|n| Runner::new(*n).unwrap()).collect::<Vec<_>>();
//! let spec = BetSpec::new(BetType::Trifecta, BetMethod::Box).unwrap();
//! let tickets = materialize(&Selection::rows(vec![runners(&[1, 2, 3, 4])]), spec, Yen::new(100))
//!     .unwrap();
//! assert_eq!(tickets[0].total_points, 24);
//! assert_eq!(tickets[0].total_cost, Yen::new(2_400));
//! ```

pub use bet::{BetMethod, BetSpec, BetType};
pub use error::EngineError;
pub use money::Yen;
pub use points::{combinations, count_points, permutations};
pub use runner::Runner;
pub use selection::{NormalizedSelection, RawSelection, Selection, normalize};
pub use ticket::{Quote, Ticket, materialize, quote, summarize, unflatten};

mod bet;
mod error;
mod money;
mod points;
mod runner;
mod selection;
mod ticket;

pub type ResultEngine<T> = Result<T, EngineError>;
