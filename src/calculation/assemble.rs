//! Report assembly.
//!
//! Pure merge of the per-person outcomes, ledger bonus hours and batch
//! scalars into one ordered structure. Nothing here depends on the clock;
//! identical inputs assemble into identical reports.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::aggregate::PersonTotals;
use super::benefits::BenefitHoursByEmail;
use super::normalize_email;

/// Inclusive date range covered by a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the range.
    pub start: NaiveDate,
    /// Last day of the range.
    pub end: NaiveDate,
}

/// Outcome of processing one mailbox: totals, or the failure message.
///
/// The two variants are mutually exclusive; a failed mailbox carries no
/// numeric data at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PersonOutcome {
    /// The mailbox aggregated successfully.
    Totals(PersonTotals),
    /// Processing failed; the row shows only the message.
    Failed {
        /// Why this mailbox could not be processed.
        error: String,
    },
}

/// One report row, in requested-email order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// The email exactly as requested.
    pub email: String,
    /// Totals or failure for this mailbox.
    pub outcome: PersonOutcome,
    /// Ledger bonus hours; `None` when the ledger has no entry for the
    /// email, which renders differently from an explicit zero.
    pub benefit_hours: Option<i64>,
}

/// The assembled report, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// The date range the report covers.
    pub range: DateRange,
    /// One row per requested email, in request order.
    pub rows: Vec<ReportRow>,
    /// Business days in the range.
    pub business_days: u32,
    /// How many mailboxes aggregated without error.
    pub processed_count: u32,
}

/// Merges per-person results into an ordered [`Report`].
///
/// Rows follow `requested_emails` order regardless of processing order.
/// Emails with no recorded outcome become error rows. Benefit hours are
/// looked up by normalized email and only attached to successful rows;
/// an email absent from the ledger keeps `None`.
pub fn assemble(
    outcomes: &HashMap<String, PersonOutcome>,
    benefit_hours: &BenefitHoursByEmail,
    requested_emails: &[String],
    range: DateRange,
    business_days: u32,
    processed_count: u32,
) -> Report {
    let mut rows = Vec::with_capacity(requested_emails.len());

    for email in requested_emails {
        let key = normalize_email(email);
        let outcome = outcomes
            .get(&key)
            .cloned()
            .unwrap_or_else(|| PersonOutcome::Failed {
                error: "no result recorded for this mailbox".to_string(),
            });
        let benefit = match &outcome {
            PersonOutcome::Totals(_) => benefit_hours.get(&key).copied(),
            PersonOutcome::Failed { .. } => None,
        };

        rows.push(ReportRow {
            email: email.clone(),
            outcome,
            benefit_hours: benefit,
        });
    }

    Report {
        range,
        rows,
        business_days,
        processed_count,
    }
}
