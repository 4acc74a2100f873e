//! Slacktime reporting engine.
//!
//! This crate aggregates Microsoft 365 calendar time per person into a fixed
//! set of meeting categories, cross-references a benefits ledger workbook for
//! bonus hours, counts business days on the Colombian holiday calendar, and
//! renders the combined result as a spreadsheet report behind a small HTTP
//! API.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod graph;
pub mod holidays;
pub mod ledger;
pub mod models;
pub mod render;
