//! Flat rows for tabular export, one per responsible party.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::conclusion::{self, ConclusionModel};
use crate::engine::{EvaluationResult, Situation};
use crate::regime::Regime;
use crate::resolver::Evaluation;

/// One exportable row. Dates stay typed; formatting belongs to the writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    /// `None` for the case-level row when no party was listed.
    pub party: Option<String>,
    pub regime: Regime,
    pub situation: Situation,
    pub effective_start: Option<NaiveDate>,
    pub recounted_start: Option<NaiveDate>,
    pub final_deadline: Option<NaiveDate>,
    pub base_term: Option<String>,
    pub milestones: Vec<NaiveDate>,
    pub intercurrent_gap_days: Option<i64>,
    pub conclusion: Option<ConclusionModel>,
}

impl ExportRow {
    fn from_result(party: Option<String>, result: &EvaluationResult) -> Self {
        Self {
            party,
            regime: result.regime,
            situation: result.situation,
            effective_start: result.effective_start,
            recounted_start: result.recounted_start,
            final_deadline: result.final_deadline,
            base_term: result.base_term_label(),
            milestones: result.considered_milestones.clone(),
            intercurrent_gap_days: result.intercurrent_gap_days,
            conclusion: conclusion::select(result),
        }
    }
}

/// Rows in party order, or a single case row when there are no parties.
pub fn export_rows(evaluation: &Evaluation) -> Vec<ExportRow> {
    if evaluation.per_party.is_empty() {
        return vec![ExportRow::from_result(None, &evaluation.case)];
    }
    evaluation
        .per_party
        .iter()
        .map(|p| ExportRow::from_result(Some(p.party.clone()), &p.result))
        .collect()
}
