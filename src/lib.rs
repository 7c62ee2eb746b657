pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use config::cli::LocalStore;
pub use config::lambda::{IntakeFunction, LambdaConfig};

#[cfg(feature = "lambda")]
pub use config::lambda::DynamoStore;

pub use crate::core::{
    auth::TokenVerifier, intake::RequestIntake, resolver::ZipResolver, response::ApiResponse,
};
pub use utils::error::{IntakeError, Result};
