//! Per-party resolution and the single evaluation entry point.
//!
//! General milestones reach every responsible party. Subjective milestones
//! (qualified summons) reach only their own party, so each party gets an
//! independent recount.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::case::{CaseInput, Party};
use crate::engine::{EvaluationResult, compute_deadline};
use crate::regime::{Regime, classify};

/// Result for one responsible party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyResult {
    pub party: String,
    #[serde(flatten)]
    pub result: EvaluationResult,
}

/// Everything one evaluation pass produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub suggested_regime: Regime,
    pub applied_regime: Regime,
    /// Evaluation date used for every comparison in this pass.
    pub today: NaiveDate,
    /// Case-level result, general milestones only.
    pub case: EvaluationResult,
    /// One entry per party, in input order.
    pub per_party: Vec<PartyResult>,
}

impl Evaluation {
    /// The caller forced a regime other than the suggested one.
    pub fn overridden(&self) -> bool {
        self.suggested_regime != self.applied_regime
    }
}

/// Evaluate every party under `regime`, preserving input order.
pub fn resolve_all(
    regime: Regime,
    case: &CaseInput,
    general: &[NaiveDate],
    parties: &[Party],
    today: NaiveDate,
) -> Vec<PartyResult> {
    parties
        .iter()
        .map(|party| {
            let result = compute_deadline(regime, case, general, &party.milestones, today);
            info!(
                party = %party.name,
                situation = result.situation.as_str(),
                deadline = ?result.final_deadline,
                "party evaluated"
            );
            PartyResult {
                party: party.name.clone(),
                result,
            }
        })
        .collect()
}

/// Classify, then evaluate the case and each party.
///
/// `regime_override` replaces the suggestion outright; the suggestion is
/// still reported.
pub fn evaluate(
    case: &CaseInput,
    regime_override: Option<Regime>,
    general: &[NaiveDate],
    parties: &[Party],
    today: NaiveDate,
) -> Evaluation {
    let suggested = classify(case, general);
    let applied = regime_override.unwrap_or(suggested);
    if applied != suggested {
        info!(
            suggested = suggested.as_str(),
            applied = applied.as_str(),
            "regime overridden"
        );
    }

    Evaluation {
        suggested_regime: suggested,
        applied_regime: applied,
        today,
        case: compute_deadline(applied, case, general, &[], today),
        per_party: resolve_all(applied, case, general, parties, today),
    }
}
