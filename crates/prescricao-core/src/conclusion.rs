//! Conclusion models A–E for the written opinion.

use serde::{Deserialize, Serialize};

use crate::calendar::{CUTOFF, add_years};
use crate::engine::{EvaluationResult, Situation};
use crate::regime::Regime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConclusionModel {
    /// Not barred; the proceeding continues to the merits.
    A,
    /// Barred under the prior regime before the cutoff.
    B,
    /// Transition term ran out on its own date without interruptions.
    C,
    /// New-regime five years ran out without interruptions.
    D,
    /// Intercurrent lapse.
    E,
}

impl ConclusionModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
        }
    }
}

/// Pick the model that literally fits the result, if any.
///
/// Barred results with interruptions, and out-of-scope cases, have no model.
pub fn select(result: &EvaluationResult) -> Option<ConclusionModel> {
    match result.situation {
        Situation::NotBarred => Some(ConclusionModel::A),
        Situation::PriorRegimeBarred => Some(ConclusionModel::B),
        Situation::IntercurrentBarred => Some(ConclusionModel::E),
        Situation::Barred if result.interruptions_applied => None,
        Situation::Barred => match result.regime {
            Regime::Transition if result.final_deadline == Some(add_years(CUTOFF, 2)) => {
                Some(ConclusionModel::C)
            }
            Regime::NewRegime => Some(ConclusionModel::D),
            _ => None,
        },
        Situation::OutOfScope => None,
    }
}
