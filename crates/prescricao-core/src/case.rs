//! Case facts and responsible parties.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Nature of the claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nature {
    Punitive,
    /// Damages to the treasury, handled by analogy with the punitive rule.
    Indemnificatory,
}

impl Nature {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Punitive => "punitive",
            Self::Indemnificatory => "indemnificatory",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Conduct {
    Instantaneous,
    Continuing,
}

impl Conduct {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Instantaneous => "instantaneous",
            Self::Continuing => "continuing",
        }
    }
}

/// Which event the material term date refers to.
///
/// `Act` and `Cessation` belong to punitive claims; the other three to
/// indemnificatory ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialBasis {
    Act,
    Cessation,
    DamageEvent,
    LastPayment,
    DamageCessation,
}

impl MaterialBasis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Act => "act",
            Self::Cessation => "cessation",
            Self::DamageEvent => "damage_event",
            Self::LastPayment => "last_payment",
            Self::DamageCessation => "damage_cessation",
        }
    }

    /// Whether this basis can anchor a claim of the given nature.
    pub fn fits(&self, nature: Nature) -> bool {
        match self {
            Self::Act | Self::Cessation => nature == Nature::Punitive,
            Self::DamageEvent | Self::LastPayment | Self::DamageCessation => {
                nature == Nature::Indemnificatory
            }
        }
    }
}

/// Procedural stall to test for intercurrent lapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntercurrentCheck {
    pub last_active_act: NaiveDate,
    /// Act that resumed the proceeding. `None` measures up to today.
    pub subsequent_act: Option<NaiveDate>,
}

impl IntercurrentCheck {
    /// Stall length in days, closing an open stall at `today`.
    pub fn gap_days(&self, today: NaiveDate) -> i64 {
        let end = self.subsequent_act.unwrap_or(today);
        (end - self.last_active_act).num_days()
    }
}

/// The immutable facts of one proceeding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseInput {
    pub nature: Nature,
    pub conduct: Conduct,
    /// Registration of the proceeding at the tribunal.
    pub filing_date: NaiveDate,
    /// When the tribunal learned of the fact. Falls back to `filing_date`.
    pub awareness_date: Option<NaiveDate>,
    pub material_basis: MaterialBasis,
    pub material_term_date: NaiveDate,
    /// A prior administrative decision became final before the cutoff.
    pub finalized_before_cutoff: bool,
    /// Criminal limitation period in years, when the fact is also a crime.
    pub criminal_term_years: Option<u8>,
    pub intercurrent: Option<IntercurrentCheck>,
}

impl CaseInput {
    /// Minimal punitive case: instantaneous act, filed and known on `material_term_date`.
    pub fn punitive(material_term_date: NaiveDate) -> Self {
        Self {
            nature: Nature::Punitive,
            conduct: Conduct::Instantaneous,
            filing_date: material_term_date,
            awareness_date: None,
            material_basis: MaterialBasis::Act,
            material_term_date,
            finalized_before_cutoff: false,
            criminal_term_years: None,
            intercurrent: None,
        }
    }

    pub fn awareness(&self) -> NaiveDate {
        self.awareness_date.unwrap_or(self.filing_date)
    }
}

/// A responsible party and the milestones effective only against them.
///
/// A qualified summons is stored at the date of the decision that ordered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    #[serde(default)]
    pub milestones: Vec<NaiveDate>,
}

impl Party {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            milestones: Vec::new(),
        }
    }

    pub fn with_milestones(mut self, milestones: Vec<NaiveDate>) -> Self {
        self.milestones = milestones;
        self
    }
}
