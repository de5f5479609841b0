//! Calendar constants of LC-RJ 220/2024 and whole-year date arithmetic.

use chrono::{Months, NaiveDate};

/// Start of the new statute and fixed start of the two-year transition term.
pub const CUTOFF: NaiveDate = ymd(2024, 7, 18);

/// Facts before this date are analysed under the prior regime first.
pub const PRE_REGIME_THRESHOLD: NaiveDate = ymd(2021, 7, 18);

/// Minimum procedural stall, in days, that bars the claim on its own (3 × 365).
pub const INTERCURRENT_DAYS: i64 = 3 * 365;

const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid calendar constant"),
    }
}

/// Add `years` calendar years, preserving month and day.
///
/// Feb 29 lands on Feb 28 when the target year is not a leap year. Results
/// outside chrono's representable range saturate at `NaiveDate::MIN`/`MAX`.
pub fn add_years(date: NaiveDate, years: i32) -> NaiveDate {
    let months = Months::new(years.unsigned_abs().saturating_mul(12));
    if years >= 0 {
        date.checked_add_months(months).unwrap_or(NaiveDate::MAX)
    } else {
        date.checked_sub_months(months).unwrap_or(NaiveDate::MIN)
    }
}

/// Format as DD/MM/YYYY, the display convention of the tribunal.
pub fn format_br(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
