//! Benefits-ledger text mining.
//!
//! The ledger is a semi-structured worksheet: each granted benefit carries
//! its dates, shift markers and quantities inside a free-text detail field.
//! Every recognized benefit type has its own extraction rule, kept as a
//! separate function so each rule stays unit-testable in isolation. Rows
//! that fail to match simply contribute nothing.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::LedgerRow;

use super::normalize_email;

/// Accumulated bonus hours per normalized email.
pub type BenefitHoursByEmail = HashMap<String, i64>;

/// Benefit types that contribute hours; anything else is ignored, even when
/// its free text happens to contain matching date patterns.
const RECOGNIZED_BENEFITS: &[&str] = &[
    "más tiempo",
    "mas tiempo",
    "día de la familia",
    "licencia por luto",
    "grados",
];

/// Reserved header/metadata rows at the top of the ledger template.
const LEDGER_HEADER_ROWS: usize = 6;

/// Hours granted per "más tiempo" shift when the benefit name does not say.
const DEFAULT_EXTRA_TIME_HOURS: i64 = 2;

static DATE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{2}-\d{2}-\d{4}").expect("valid regex"));
static LABELED_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Fecha.*?: (\d{2}-\d{2}-\d{4})").expect("valid regex"));
static START_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Fecha inicio: (\d{2}-\d{2}-\d{4})").expect("valid regex"));
static END_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Fecha fin: (\d{2}-\d{2}-\d{4})").expect("valid regex"));
static SHIFT_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)Jornada:").expect("valid regex"));
static HOURS_PER_SHIFT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*hora").expect("valid regex"));

/// Extracts per-person bonus hours from the ledger rows.
///
/// The first [`LEDGER_HEADER_ROWS`] rows are skipped unconditionally. A row
/// contributes only when its benefit type matches one of the five recognized
/// keywords (case-insensitive substring), it carries an email, and — when
/// `email_filter` is given — the normalized email is a member. Hours resolve
/// per benefit type; rows resolving to zero hours are a no-op on the total.
pub fn parse_benefits(
    rows: &[LedgerRow],
    email_filter: Option<&HashSet<String>>,
) -> BenefitHoursByEmail {
    let mut totals = BenefitHoursByEmail::new();

    for row in rows.iter().skip(LEDGER_HEADER_ROWS) {
        let Some(benefit_type) = row.benefit_type.as_deref() else {
            continue;
        };
        let lowered = benefit_type.to_lowercase();
        if !RECOGNIZED_BENEFITS.iter().any(|b| lowered.contains(b)) {
            continue;
        }

        let Some(email) = row.email.as_deref() else {
            continue;
        };
        let email = normalize_email(email);
        if let Some(filter) = email_filter {
            if !filter.contains(&email) {
                continue;
            }
        }

        let detail = row.detail.as_deref().unwrap_or("");

        let (start, end, mut hours) =
            if lowered.contains("más tiempo") || lowered.contains("mas tiempo") {
                let (date, hours) = extra_time_hours(benefit_type, detail);
                (date, date, hours)
            } else if lowered.contains("día de la familia") {
                let (date, hours) = family_day_hours(detail);
                (date, date, hours)
            } else if lowered.contains("grados") {
                let (date, hours) = graduation_hours(detail);
                (date, date, hours)
            } else {
                let (start, end) = bereavement_span(detail);
                (start, end, 0)
            };

        // Bereavement hours always derive from the resolved date span; the
        // other types already carry their hours.
        if let (Some(start), Some(end)) = (start, end) {
            if lowered.contains("licencia por luto") {
                hours = day_span(start, end) * 8;
            }
        }

        *totals.entry(email).or_insert(0) += hours;
    }

    totals
}

/// "Más tiempo": one grant per "Jornada:" marker, each worth the hour count
/// declared in the benefit name (default 2). The grant date follows a
/// `Fecha` label in the detail text.
fn extra_time_hours(benefit_type: &str, detail: &str) -> (Option<NaiveDate>, i64) {
    let date = LABELED_DATE
        .captures(detail)
        .and_then(|captures| parse_ledger_date(&captures[1]));
    let per_shift = HOURS_PER_SHIFT
        .captures(benefit_type)
        .and_then(|captures| captures[1].parse::<i64>().ok())
        .unwrap_or(DEFAULT_EXTRA_TIME_HOURS);

    (date, shift_count(detail) * per_shift)
}

/// "Día de la familia": a single fixed eight-hour day.
fn family_day_hours(detail: &str) -> (Option<NaiveDate>, i64) {
    (first_date_token(detail), 8)
}

/// "Grados": four hours per "Jornada:" marker; the first date token in the
/// detail is the grant date.
fn graduation_hours(detail: &str) -> (Option<NaiveDate>, i64) {
    (first_date_token(detail), shift_count(detail) * 4)
}

/// "Licencia por luto": explicit start and end labels, possibly days apart.
fn bereavement_span(detail: &str) -> (Option<NaiveDate>, Option<NaiveDate>) {
    let start = START_DATE
        .captures(detail)
        .and_then(|captures| parse_ledger_date(&captures[1]));
    let end = END_DATE
        .captures(detail)
        .and_then(|captures| parse_ledger_date(&captures[1]));
    (start, end)
}

/// Number of "Jornada:" markers in the detail text, floored at one.
fn shift_count(detail: &str) -> i64 {
    SHIFT_MARKER.find_iter(detail).count().max(1) as i64
}

/// First `DD-MM-YYYY` token anywhere in the detail text.
fn first_date_token(detail: &str) -> Option<NaiveDate> {
    DATE_TOKEN
        .find(detail)
        .and_then(|token| parse_ledger_date(token.as_str()))
}

/// Parses a ledger `DD-MM-YYYY` date token.
fn parse_ledger_date(token: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(token, "%d-%m-%Y").ok()
}

/// Inclusive day span of a date pair, floored at one day.
fn day_span(start: NaiveDate, end: NaiveDate) -> i64 {
    let diff = (end - start).num_days();
    if diff >= 0 { diff + 1 } else { 1 }
}
