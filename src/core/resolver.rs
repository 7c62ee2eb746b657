use crate::core::response::ApiResponse;
use crate::core::validation::{is_given, validate_postal_code, MSG_NO_ZIP};
use crate::domain::model::PostalCode;
use crate::domain::ports::RegionStore;
use crate::utils::error::{IntakeError, Result};
use serde_json::Value;

pub const MSG_PROVINCE_NOT_FOUND: &str = "provinceID was not found";

/// Single point lookup. A missing mapping becomes `NotFoundError`.
pub async fn resolve_region<S: RegionStore>(store: &S, zip: &PostalCode) -> Result<String> {
    match store.find_region(zip).await? {
        Some(region) => Ok(region),
        None => Err(IntakeError::not_found(MSG_PROVINCE_NOT_FOUND)),
    }
}

/// The query-string value wins over the body field, unless it is empty.
pub fn pick_zip(query_zip: Option<&str>, body: Option<&Value>) -> Option<Value> {
    match query_zip {
        Some(zip) if !zip.is_empty() => Some(Value::String(zip.to_string())),
        _ => body.and_then(|b| b.get("zip")).cloned(),
    }
}

pub struct ZipResolver<'a, S: RegionStore> {
    store: &'a S,
}

impl<'a, S: RegionStore> ZipResolver<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn handle(&self, zip: Option<&Value>) -> ApiResponse {
        tracing::info!("Translating ZIP to provinceID");

        match self.run(zip).await {
            Ok(province_id) => {
                tracing::info!("Resolved provinceID {}", province_id);
                ApiResponse::province(province_id)
            }
            Err(e) => {
                log_failure(&e);
                e.into()
            }
        }
    }

    async fn run(&self, zip: Option<&Value>) -> Result<String> {
        let zip = zip
            .filter(|value| is_given(Some(*value)))
            .ok_or_else(|| IntakeError::validation(MSG_NO_ZIP))?;
        let zip = validate_postal_code(zip)?;

        tracing::debug!("Looking up region for {}", zip);
        resolve_region(self.store, &zip).await
    }
}

pub(crate) fn log_failure(err: &IntakeError) {
    match err.status_code() {
        500 => tracing::error!(
            "❌ {} (Category: {:?}) - {}",
            err,
            err.category(),
            err.recovery_suggestion()
        ),
        status => tracing::warn!("Rejected with {}: {}", status, err),
    }
}
