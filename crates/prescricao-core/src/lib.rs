//! Limitation-period (prescrição) engine for administrative-court proceedings
//! under LC-RJ 220/2024.
//!
//! Pure and synchronous: every evaluation is a function of the case facts,
//! the milestone lists and a fixed `today`.

pub mod calendar;
pub mod case;
pub mod conclusion;
pub mod engine;
pub mod export;
pub mod milestones;
pub mod regime;
pub mod resolver;

pub use calendar::{CUTOFF, PRE_REGIME_THRESHOLD, add_years};
pub use case::{CaseInput, Conduct, IntercurrentCheck, MaterialBasis, Nature, Party};
pub use conclusion::ConclusionModel;
pub use engine::{BaseTerm, EvaluationResult, Situation, StartBasis, compute_deadline};
pub use export::{ExportRow, export_rows};
pub use milestones::{Reduction, reduce};
pub use regime::{Regime, classify, pre_law_consumed};
pub use resolver::{Evaluation, PartyResult, evaluate, resolve_all};
