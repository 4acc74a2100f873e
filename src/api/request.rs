//! Request types for the reporting API.
//!
//! This module defines the JSON request structure for the `/api/procesar`
//! endpoint and its validation.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::{DateRange, normalize_email};
use crate::error::{EngineError, EngineResult};

/// Request body for the `/api/procesar` endpoint.
///
/// Field names follow the wire contract used by the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessRequest {
    /// Mailboxes to aggregate, in report order.
    #[serde(rename = "correos")]
    pub emails: Vec<String>,
    /// Name of the group the report is for.
    #[serde(rename = "nombreGrupo")]
    pub group_name: String,
    /// First day of the range, `YYYY-MM-DD` or RFC 3339.
    #[serde(rename = "fechaInicio")]
    pub start_date: String,
    /// Last day of the range, `YYYY-MM-DD` or RFC 3339.
    #[serde(rename = "fechaFin")]
    pub end_date: String,
    /// Group roster; every member needs a name and an email.
    #[serde(rename = "personas")]
    pub people: Vec<Person>,
}

/// One group member in a processing request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    /// Member's display name.
    #[serde(rename = "nombre")]
    pub name: String,
    /// Member's email.
    #[serde(rename = "correo")]
    pub email: String,
}

impl ProcessRequest {
    /// Validates required fields and parses the date range.
    ///
    /// Validation failures abort the whole batch before any processing.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] when a required field is empty,
    /// the roster is empty or incomplete, or a date does not parse.
    pub fn validate(&self) -> EngineResult<DateRange> {
        if self.group_name.is_empty()
            || self.start_date.is_empty()
            || self.end_date.is_empty()
            || self.people.is_empty()
        {
            return Err(validation(
                "Faltan parámetros necesarios o las personas están vacías",
            ));
        }

        for person in &self.people {
            if person.name.is_empty() || person.email.is_empty() {
                return Err(validation("Cada persona debe tener un nombre y correo"));
            }
        }

        let start = parse_request_date(&self.start_date)?;
        let end = parse_request_date(&self.end_date)?;

        Ok(DateRange { start, end })
    }

    /// Normalized email set used to filter the benefits ledger.
    pub fn email_filter(&self) -> HashSet<String> {
        self.emails.iter().map(|email| normalize_email(email)).collect()
    }
}

fn validation(message: &str) -> EngineError {
    EngineError::Validation {
        message: message.to_string(),
    }
}

/// Accepts plain dates and full ISO-8601 timestamps.
///
/// Timestamps normalize to their UTC calendar date, since the whole range
/// is interpreted as midnight-UTC-to-midnight-UTC downstream.
fn parse_request_date(value: &str) -> EngineResult<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }

    chrono::DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&chrono::Utc).date_naive())
        .map_err(|_| EngineError::Validation {
            message: format!("Las fechas proporcionadas no son válidas: {value}"),
        })
}
