//! Conversion of wire drafts into engine values.

use api_types::ticket::{PointsPreview, TicketDraft};
use engine::{
    BetMethod, BetSpec, BetType, Quote, RawSelection, Selection, Ticket, Yen, count_points,
    materialize, normalize, quote, summarize,
};

use crate::error::{AppError, Result};

/// A draft that passed boundary validation.
#[derive(Debug)]
pub struct Form {
    pub spec: BetSpec,
    pub selection: Selection,
    pub amount: Option<Yen>,
}

fn entries(raw: Option<&Vec<Option<String>>>) -> Vec<Option<&str>> {
    raw.map(|list| list.iter().map(Option::as_deref).collect())
        .unwrap_or_default()
}

impl Form {
    /// Validates a draft.
    ///
    /// A draft without a method is read as NORMAL, which is what OCR returns
    /// for single-runner tickets.
    pub fn from_draft(draft: &TicketDraft) -> Result<Self> {
        let bet_type = draft
            .bet_type
            .as_deref()
            .ok_or_else(|| AppError::Draft("missing bet type".to_string()))?;
        let bet_type = BetType::try_from(bet_type)?;
        let method = match draft.method.as_deref() {
            Some(raw) => BetMethod::try_from(raw)?,
            None => BetMethod::Normal,
        };
        let spec = BetSpec::new(bet_type, method)?;

        if let Some(race) = &draft.race {
            race.validate()?;
        }

        let raw = RawSelection {
            selections: draft
                .selections
                .iter()
                .flatten()
                .map(|row| entries(Some(row)))
                .collect(),
            axis: entries(draft.axis.as_ref()),
            partners: entries(draft.partners.as_ref()),
            positions: draft.positions.clone().unwrap_or_default(),
            multi: draft.multi.unwrap_or(false),
        };

        Ok(Self {
            spec,
            selection: Selection::parse(raw)?,
            amount: draft.amount_per_point.map(Yen::new),
        })
    }

    /// Stake per point: the flag, then the draft, then the configured default.
    pub fn stake(&self, flag: Option<Yen>, default: Yen) -> Yen {
        flag.or(self.amount).unwrap_or(default)
    }

    /// Builds the tickets to store, refusing a form that counts zero points.
    pub fn tickets(&self, amount: Yen) -> Result<(Vec<Ticket>, Quote)> {
        let tickets = materialize(&self.selection, self.spec, amount)?;
        let summary = summarize(&tickets)?;
        if summary.points == 0 {
            return Err(AppError::Incomplete(format!(
                "{} counts zero points",
                self.spec
            )));
        }
        Ok((tickets, summary))
    }

    pub fn preview(&self, amount: Option<Yen>) -> Result<PointsPreview> {
        let (total_points, total_cost) = match amount.or(self.amount) {
            Some(stake) => {
                let quoted = quote(&self.selection, self.spec, stake)?;
                (quoted.points, Some(quoted.cost.get()))
            }
            None => (
                count_points(self.spec, &normalize(&self.selection, self.spec.bet_type())),
                None,
            ),
        };
        Ok(PointsPreview {
            total_points,
            total_cost,
            complete: total_points > 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use api_types::race::{RaceKey, Venue};
    use chrono::NaiveDate;
    use engine::EngineError;

    use super::*;

    fn draft(bet_type: &str, method: Option<&str>) -> TicketDraft {
        TicketDraft {
            bet_type: Some(bet_type.to_string()),
            method: method.map(str::to_string),
            ..TicketDraft::default()
        }
    }

    fn list(values: &[&str]) -> Option<Vec<Option<String>>> {
        Some(values.iter().map(|v| Some(v.to_string())).collect())
    }

    #[test]
    fn missing_method_defaults_to_normal() {
        let mut d = draft("単勝", None);
        d.selections = Some(vec![list(&["1", "2"]).unwrap()]);
        let form = Form::from_draft(&d).unwrap();
        assert_eq!(form.spec.method(), BetMethod::Normal);
        assert_eq!(form.preview(None).unwrap().total_points, 2);
    }

    #[test]
    fn missing_bet_type_is_a_draft_error() {
        let err = Form::from_draft(&TicketDraft::default()).unwrap_err();
        assert!(matches!(err, AppError::Draft(_)));
    }

    #[test]
    fn unsupported_pair_is_rejected() {
        let err = Form::from_draft(&draft("WIN", Some("BOX"))).unwrap_err();
        assert!(matches!(
            err,
            AppError::Engine(EngineError::UnsupportedMethod(_))
        ));
    }

    #[test]
    fn invalid_race_is_rejected() {
        let mut d = draft("QUINELLA", Some("BOX"));
        d.race = Some(RaceKey {
            date: NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            venue: Venue::Kyoto,
            race_number: 14,
        });
        assert!(matches!(Form::from_draft(&d), Err(AppError::Race(_))));
    }

    #[test]
    fn nagashi_preview_with_stake() {
        let mut d = draft("3連単", Some("ながし"));
        d.axis = list(&["1"]);
        d.partners = Some(vec![
            Some("2".to_string()),
            None,
            Some("3".to_string()),
            Some("4".to_string()),
            Some("5".to_string()),
        ]);
        d.multi = Some(true);
        d.amount_per_point = Some(100);

        let preview = Form::from_draft(&d).unwrap().preview(None).unwrap();
        assert_eq!(
            preview,
            PointsPreview {
                total_points: 36,
                total_cost: Some(3_600),
                complete: true,
            }
        );
    }

    #[test]
    fn incomplete_preview_is_flagged() {
        let mut d = draft("EXACTA", Some("NORMAL"));
        d.selections = Some(vec![list(&["3"]).unwrap(), list(&["3"]).unwrap()]);
        let preview = Form::from_draft(&d).unwrap().preview(None).unwrap();
        assert_eq!(preview.total_points, 0);
        assert_eq!(preview.total_cost, None);
        assert!(!preview.complete);
    }

    #[test]
    fn zero_point_form_is_not_materialized() {
        let mut d = draft("QUINELLA", Some("NORMAL"));
        d.selections = Some(vec![list(&["7"]).unwrap(), list(&["7"]).unwrap()]);
        let err = Form::from_draft(&d)
            .unwrap()
            .tickets(Yen::new(100))
            .unwrap_err();
        assert!(matches!(err, AppError::Incomplete(_)));

        let empty_win = Form::from_draft(&draft("WIN", None)).unwrap();
        assert!(matches!(
            empty_win.tickets(Yen::new(100)),
            Err(AppError::Incomplete(_))
        ));
    }

    #[test]
    fn complete_form_materializes_with_summary() {
        let mut d = draft("PLACE", None);
        d.selections = Some(vec![list(&["3", "9"]).unwrap()]);
        let (tickets, summary) = Form::from_draft(&d)
            .unwrap()
            .tickets(Yen::new(200))
            .unwrap();
        assert_eq!(tickets.len(), 2);
        assert_eq!(
            summary,
            Quote {
                points: 2,
                cost: Yen::new(400)
            }
        );
    }

    #[test]
    fn stake_precedence() {
        let mut d = draft("WIN", None);
        let default = Yen::new(100);
        assert_eq!(Form::from_draft(&d).unwrap().stake(None, default), default);

        d.amount_per_point = Some(300);
        let form = Form::from_draft(&d).unwrap();
        assert_eq!(form.stake(None, default), Yen::new(300));
        assert_eq!(form.stake(Some(Yen::new(500)), default), Yen::new(500));
    }

    #[test]
    fn flag_amount_overrides_draft() {
        let mut d = draft("TRIO", Some("BOX"));
        d.selections = Some(vec![list(&["1", "2", "3", "4"]).unwrap()]);
        d.amount_per_point = Some(100);
        let preview = Form::from_draft(&d)
            .unwrap()
            .preview(Some(Yen::new(500)))
            .unwrap();
        assert_eq!(preview.total_cost, Some(2_000));
    }
}
