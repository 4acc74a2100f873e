//! Process configuration, loaded from the environment.

use std::env;
use std::path::PathBuf;

use chrono_tz::Tz;
use dotenvy::dotenv;

use crate::error::{EngineError, EngineResult};

/// Default reporting timezone for events without a usable zone of their own.
pub const DEFAULT_TIMEZONE: &str = "America/Bogota";

/// Main configuration for the reporting service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the HTTP server listens on.
    pub port: u16,
    /// Entra tenant of the app-only Graph credential.
    pub tenant_id: String,
    /// Application (client) id of the Graph credential.
    pub client_id: String,
    /// Client secret of the Graph credential.
    pub client_secret: String,
    /// Directory holding the benefits ledger workbook.
    pub templates_dir: PathBuf,
    /// Directory where generated reports land; served under `/output`.
    pub output_dir: PathBuf,
    /// Default timezone for event durations and the Graph `Prefer` header.
    pub timezone: Tz,
    /// Frontend origin allowed by CORS.
    pub frontend_origin: String,
}

impl Config {
    /// Loads configuration from the environment (and `.env` if present).
    ///
    /// `TENANT_ID`, `CLIENT_ID` and `CLIENT_SECRET` are required; everything
    /// else has a default.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] when a required variable is missing
    /// or a defaulted variable carries an unusable value.
    pub fn load() -> EngineResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let tenant_id = required("TENANT_ID")?;
        let client_id = required("CLIENT_ID")?;
        let client_secret = required("CLIENT_SECRET")?;

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3001".to_string())
            .parse::<u16>()
            .map_err(|_| EngineError::Config {
                message: "PORT must be a number".to_string(),
            })?;

        let timezone = env::var("TIMEZONE")
            .unwrap_or_else(|_| DEFAULT_TIMEZONE.to_string())
            .parse::<Tz>()
            .map_err(|_| EngineError::Config {
                message: "TIMEZONE is not a known IANA zone".to_string(),
            })?;

        let templates_dir =
            PathBuf::from(env::var("TEMPLATES_DIR").unwrap_or_else(|_| "plantillas".to_string()));
        let output_dir =
            PathBuf::from(env::var("OUTPUT_DIR").unwrap_or_else(|_| "output".to_string()));
        let frontend_origin =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:4200".to_string());

        Ok(Config {
            port,
            tenant_id,
            client_id,
            client_secret,
            templates_dir,
            output_dir,
            timezone,
            frontend_origin,
        })
    }
}

fn required(name: &str) -> EngineResult<String> {
    env::var(name).map_err(|_| EngineError::Config {
        message: format!("missing environment variable {name}"),
    })
}
