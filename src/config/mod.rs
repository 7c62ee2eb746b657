pub mod cli;
pub mod lambda;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_required_field, Validate,
};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use crate::utils::logger::mask_phone;
#[cfg(feature = "cli")]
use serde_json::{Map, Value};
#[cfg(feature = "cli")]
use std::fmt;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "region-intake")]
#[command(about = "Resolve ZIP codes to regions and record hotline requests")]
pub struct CliConfig {
    #[arg(long, default_value = "./data")]
    pub data_path: String,

    #[arg(long, env = "JWT_KEY", hide_env_values = true)]
    pub jwt_key: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Clone, Subcommand)]
pub enum Command {
    /// Look up the region identifier for a ZIP code
    ResolveZip {
        #[arg(long)]
        zip: Option<String>,
    },
    /// Validate and record a service request
    SubmitRequest {
        #[arg(long)]
        token: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        zip: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        request: Option<String>,
    },
    /// Sign a token with the configured key
    IssueToken {
        #[arg(long, default_value = "hotline")]
        subject: String,
        #[arg(long, default_value = "3600")]
        ttl_seconds: i64,
    },
}

#[cfg(feature = "cli")]
impl Command {
    fn needs_key(&self) -> bool {
        !matches!(self, Command::ResolveZip { .. })
    }

    /// JSON body equivalent of the `submit-request` flags.
    pub fn request_body(&self) -> Option<Value> {
        let Command::SubmitRequest {
            token,
            phone,
            zip,
            request,
        } = self
        else {
            return None;
        };

        let mut body = Map::new();
        if let Some(token) = token {
            body.insert("token".to_string(), Value::String(token.clone()));
        }
        if let Some(phone) = phone {
            body.insert("phone".to_string(), Value::String(phone.clone()));
        }
        if let Some(zip) = zip {
            body.insert("zip".to_string(), Value::String(zip.clone()));
        }
        if let Some(request) = request {
            let value = request
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or_else(|_| Value::String(request.clone()));
            body.insert("request".to_string(), value);
        }
        Some(Value::Object(body))
    }
}

/// Token is never printed and the phone is masked, so the config can be logged.
#[cfg(feature = "cli")]
impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::ResolveZip { zip } => f.debug_struct("ResolveZip").field("zip", zip).finish(),
            Command::SubmitRequest {
                token,
                phone,
                zip,
                request,
            } => f
                .debug_struct("SubmitRequest")
                .field("token", &token.as_ref().map(|_| "<redacted>"))
                .field("phone", &phone.as_deref().map(mask_phone))
                .field("zip", zip)
                .field("request", request)
                .finish(),
            Command::IssueToken {
                subject,
                ttl_seconds,
            } => f
                .debug_struct("IssueToken")
                .field("subject", subject)
                .field("ttl_seconds", ttl_seconds)
                .finish(),
        }
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("data_path", &self.data_path)?;

        if self.command.needs_key() {
            let key = validate_required_field("jwt_key", &self.jwt_key)?;
            validate_non_empty_string("jwt_key", key)?;
        }

        tracing::debug!("✅ CLI configuration validation passed");
        Ok(())
    }
}
