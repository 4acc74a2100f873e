//! Core data models for the reporting engine.
//!
//! This module contains the raw input entities: calendar events as returned
//! by the Microsoft Graph calendar view, and rows read from the benefits
//! ledger workbook. The computed entities (category totals, assembled
//! report) live next to the calculations that produce them.

mod event;
mod ledger;

pub use event::{CalendarEvent, EventDateTime};
pub use ledger::LedgerRow;
