//! Input boundary: case files, milestone text and party lists.
//!
//! Malformed milestone entries are dropped with a warning and reported back;
//! they never reach the engine. Structural problems are hard errors.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use prescricao_core::{CaseInput, Conduct, IntercurrentCheck, MaterialBasis, Nature, Party};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

pub const MAX_CRIMINAL_TERM_YEARS: i64 = 40;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("case file not found: {0}")]
    CaseNotFound(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid case file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("criminal term must be between 1 and 40 years, got {0}")]
    CriminalTermOutOfRange(i64),

    #[error("material basis '{basis}' does not apply to a {nature} claim")]
    BasisMismatch {
        nature: &'static str,
        basis: &'static str,
    },

    #[error("responsible party listed twice: {0}")]
    DuplicateParty(String),
}

/// Milestones as typed by the user: a list of entries, or one comma-separated string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MilestoneText {
    List(Vec<String>),
    Text(String),
}

impl Default for MilestoneText {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl MilestoneText {
    fn entries(&self) -> Vec<&str> {
        let parts: Vec<&str> = match self {
            Self::List(items) => items.iter().map(String::as_str).collect(),
            Self::Text(text) => vec![text.as_str()],
        };
        parts.into_iter().flat_map(|p| p.split(',')).collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PartyEntry {
    pub name: String,
    #[serde(default)]
    pub milestones: MilestoneText,
}

/// Responsible parties: records with milestones, or names one per line.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PartyList {
    Records(Vec<PartyEntry>),
    Names(String),
}

impl Default for PartyList {
    fn default() -> Self {
        Self::Records(Vec::new())
    }
}

/// On-disk case description (JSON).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseFile {
    pub nature: Nature,
    pub conduct: Conduct,
    pub filing_date: NaiveDate,
    #[serde(default)]
    pub awareness_date: Option<NaiveDate>,
    pub material_basis: MaterialBasis,
    pub material_term_date: NaiveDate,
    #[serde(default)]
    pub finalized_before_cutoff: bool,
    #[serde(default)]
    pub criminal_term_years: Option<i64>,
    #[serde(default)]
    pub intercurrent: Option<IntercurrentCheck>,
    #[serde(default)]
    pub milestones: MilestoneText,
    #[serde(default)]
    pub parties: PartyList,
}

/// A milestone entry that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedEntry {
    /// `None` for general milestones, otherwise the party name.
    pub party: Option<String>,
    pub entry: String,
}

/// Validated engine inputs.
#[derive(Debug, Clone)]
pub struct CaseBundle {
    pub case: CaseInput,
    pub general: Vec<NaiveDate>,
    pub parties: Vec<Party>,
    pub rejected: Vec<RejectedEntry>,
}

/// Parse `YYYY-MM-DD` entries, collecting the ones that do not parse.
pub fn parse_milestones(
    entries: &[&str],
    party: Option<&str>,
    rejected: &mut Vec<RejectedEntry>,
) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    for raw in entries {
        let entry = raw.trim();
        if entry.is_empty() {
            continue;
        }
        match NaiveDate::parse_from_str(entry, "%Y-%m-%d") {
            Ok(date) => dates.push(date),
            Err(_) => {
                warn!(
                    entry,
                    party = party.unwrap_or("-"),
                    "invalid milestone date ignored (use YYYY-MM-DD)"
                );
                rejected.push(RejectedEntry {
                    party: party.map(str::to_string),
                    entry: entry.to_string(),
                });
            }
        }
    }
    dates
}

/// Party names, one per line; blank lines are skipped.
pub fn parse_party_names(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

fn check_criminal_term(years: Option<i64>) -> Result<Option<u8>, InputError> {
    let Some(years) = years else {
        return Ok(None);
    };
    if !(1..=MAX_CRIMINAL_TERM_YEARS).contains(&years) {
        return Err(InputError::CriminalTermOutOfRange(years));
    }
    u8::try_from(years)
        .map(Some)
        .map_err(|_| InputError::CriminalTermOutOfRange(years))
}

impl CaseFile {
    /// Validate and split into engine inputs.
    ///
    /// `extra_milestones` is appended to the general milestones (e.g. from a flag).
    pub fn into_bundle(self, extra_milestones: Option<&str>) -> Result<CaseBundle, InputError> {
        if !self.material_basis.fits(self.nature) {
            return Err(InputError::BasisMismatch {
                nature: self.nature.as_str(),
                basis: self.material_basis.as_str(),
            });
        }
        let criminal_term_years = check_criminal_term(self.criminal_term_years)?;

        let mut rejected = Vec::new();
        let mut general_entries = self.milestones.entries();
        if let Some(extra) = extra_milestones {
            general_entries.extend(extra.split(','));
        }
        let general = parse_milestones(&general_entries, None, &mut rejected);

        let entries: Vec<PartyEntry> = match self.parties {
            PartyList::Records(records) => records,
            PartyList::Names(text) => parse_party_names(&text)
                .into_iter()
                .map(|name| PartyEntry {
                    name,
                    milestones: MilestoneText::default(),
                })
                .collect(),
        };

        let mut seen = HashSet::new();
        let mut parties = Vec::with_capacity(entries.len());
        for entry in entries {
            let name = entry.name.trim().to_string();
            if name.is_empty() {
                continue;
            }
            if !seen.insert(name.clone()) {
                return Err(InputError::DuplicateParty(name));
            }
            let dates = parse_milestones(&entry.milestones.entries(), Some(&name), &mut rejected);
            parties.push(Party::new(name).with_milestones(dates));
        }

        let case = CaseInput {
            nature: self.nature,
            conduct: self.conduct,
            filing_date: self.filing_date,
            awareness_date: self.awareness_date,
            material_basis: self.material_basis,
            material_term_date: self.material_term_date,
            finalized_before_cutoff: self.finalized_before_cutoff,
            criminal_term_years,
            intercurrent: self.intercurrent,
        };

        Ok(CaseBundle {
            case,
            general,
            parties,
            rejected,
        })
    }
}

/// Read and validate a JSON case file.
pub fn load_case(path: &Path, extra_milestones: Option<&str>) -> Result<CaseBundle, InputError> {
    if !path.exists() {
        return Err(InputError::CaseNotFound(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path)?;
    let file: CaseFile = serde_json::from_str(&text)?;
    file.into_bundle(extra_milestones)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn case_json(extra: &str) -> String {
        format!(
            r#"{{
                "nature": "punitive",
                "conduct": "instantaneous",
                "filing_date": "2024-08-01",
                "material_basis": "act",
                "material_term_date": "2017-02-20"{extra}
            }}"#
        )
    }

    fn bundle(extra: &str) -> Result<CaseBundle, InputError> {
        let file: CaseFile = serde_json::from_str(&case_json(extra)).unwrap();
        file.into_bundle(None)
    }

    #[test]
    fn malformed_milestones_are_dropped_and_reported() {
        let mut rejected = Vec::new();
        let dates = parse_milestones(
            &["2024-09-01", " 2025-03-15 ", "15/03/2025", "", "2025-02-30"],
            None,
            &mut rejected,
        );
        assert_eq!(dates, vec![d(2024, 9, 1), d(2025, 3, 15)]);
        let bad: Vec<&str> = rejected.iter().map(|r| r.entry.as_str()).collect();
        assert_eq!(bad, vec!["15/03/2025", "2025-02-30"]);
    }

    #[test]
    fn comma_separated_text_is_split() {
        let b = bundle(r#", "milestones": "2024-09-01, 2025-03-15,oops""#).unwrap();
        assert_eq!(b.general, vec![d(2024, 9, 1), d(2025, 3, 15)]);
        assert_eq!(b.rejected.len(), 1);
        assert_eq!(b.rejected[0].party, None);
    }

    #[test]
    fn minimal_case_defaults() {
        let b = bundle("").unwrap();
        assert!(b.general.is_empty());
        assert!(b.parties.is_empty());
        assert!(!b.case.finalized_before_cutoff);
        assert_eq!(b.case.awareness(), d(2024, 8, 1));
    }

    #[test]
    fn party_records_keep_their_own_milestones() {
        let b = bundle(
            r#", "parties": [
                {"name": "Ana", "milestones": ["2026-06-20", "bad"]},
                {"name": "Bruno"}
            ]"#,
        )
        .unwrap();
        assert_eq!(b.parties.len(), 2);
        assert_eq!(b.parties[0].milestones, vec![d(2026, 6, 20)]);
        assert!(b.parties[1].milestones.is_empty());
        assert_eq!(b.rejected[0].party.as_deref(), Some("Ana"));
    }

    #[test]
    fn party_names_one_per_line() {
        let b = bundle(r#", "parties": "Ana\n\n  Bruno  \nCarla""#).unwrap();
        let names: Vec<&str> = b.parties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Bruno", "Carla"]);
    }

    #[test]
    fn duplicate_party_is_rejected() {
        let err = bundle(r#", "parties": "Ana\nAna""#).unwrap_err();
        assert!(matches!(err, InputError::DuplicateParty(name) if name == "Ana"));
    }

    #[test]
    fn criminal_term_range() {
        assert!(bundle(r#", "criminal_term_years": 8"#).is_ok());
        assert!(bundle(r#", "criminal_term_years": 40"#).is_ok());
        let err = bundle(r#", "criminal_term_years": 41"#).unwrap_err();
        assert!(matches!(err, InputError::CriminalTermOutOfRange(41)));
        assert!(matches!(
            bundle(r#", "criminal_term_years": 0"#).unwrap_err(),
            InputError::CriminalTermOutOfRange(0)
        ));
    }

    #[test]
    fn criminal_term_beyond_byte_range_is_a_range_error() {
        let err = bundle(r#", "criminal_term_years": 300"#).unwrap_err();
        assert!(matches!(err, InputError::CriminalTermOutOfRange(300)));
        let err = bundle(r#", "criminal_term_years": -1"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "criminal term must be between 1 and 40 years, got -1"
        );
        let b = bundle(r#", "criminal_term_years": 12"#).unwrap();
        assert_eq!(b.case.criminal_term_years, Some(12));
    }

    #[test]
    fn basis_must_fit_nature() {
        let json = case_json("").replace("\"act\"", "\"last_payment\"");
        let file: CaseFile = serde_json::from_str(&json).unwrap();
        let err = file.into_bundle(None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "material basis 'last_payment' does not apply to a punitive claim"
        );
    }

    #[test]
    fn extra_milestones_join_general() {
        let file: CaseFile = serde_json::from_str(&case_json("")).unwrap();
        let b = file.into_bundle(Some("2025-09-10, nope")).unwrap();
        assert_eq!(b.general, vec![d(2025, 9, 10)]);
        assert_eq!(b.rejected.len(), 1);
    }

    #[test]
    fn intercurrent_end_is_optional() {
        let b = bundle(r#", "intercurrent": {"last_active_act": "2021-08-01"}"#).unwrap();
        let check = b.case.intercurrent.unwrap();
        assert_eq!(check.subsequent_act, None);
    }

    #[test]
    fn missing_file() {
        let err = load_case(Path::new("/nonexistent/case.json"), None).unwrap_err();
        assert!(matches!(err, InputError::CaseNotFound(_)));
    }

    #[test]
    fn demo_case_file_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../demos/transition_two_parties.json");
        let b = load_case(&path, None).unwrap();
        assert_eq!(b.general, vec![d(2024, 9, 1)]);
        assert_eq!(
            b.rejected,
            vec![RejectedEntry {
                party: None,
                entry: "2025/03/15".to_string(),
            }]
        );
        let names: Vec<&str> = b.parties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ana Souza", "Bruno Lima"]);
        assert_eq!(b.parties[0].milestones, vec![d(2026, 6, 20)]);
        assert!(b.parties[1].milestones.is_empty());
    }
}
