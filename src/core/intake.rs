//! Request intake: validate, classify, authenticate, resolve, persist.
//!
//! Every validation and auth step runs before the store is touched. When no
//! region mapping exists the handler answers 404 and nothing is written.

use crate::core::auth::TokenVerifier;
use crate::core::phone::ensure_allowed;
use crate::core::resolver::{log_failure, resolve_region};
use crate::core::response::ApiResponse;
use crate::core::validation::{
    require_body, require_field, validate_phone, validate_postal_code, validate_request_type,
    MSG_MISSING_ZIP_OR_REQUEST, MSG_NO_TOKEN,
};
use crate::domain::model::ServiceRequest;
use crate::domain::ports::{RegionStore, RequestStore};
use crate::utils::error::Result;
use crate::utils::logger::mask_phone;
use serde_json::Value;

pub const MSG_CALL_ADDED: &str = "Successfully added call.";

pub struct RequestIntake<'a, S: RegionStore + RequestStore> {
    store: &'a S,
    verifier: &'a TokenVerifier,
}

impl<'a, S: RegionStore + RequestStore> RequestIntake<'a, S> {
    pub fn new(store: &'a S, verifier: &'a TokenVerifier) -> Self {
        Self { store, verifier }
    }

    pub async fn handle(&self, body: Option<&Value>) -> ApiResponse {
        tracing::info!("Processing service request");

        match self.run(body).await {
            Ok(record) => {
                tracing::info!(
                    "✅ Stored request {} (zip {}, province {}, code {})",
                    record.id,
                    record.zip,
                    record.province_id,
                    record.request.code()
                );
                ApiResponse::message(MSG_CALL_ADDED)
            }
            Err(e) => {
                log_failure(&e);
                e.into()
            }
        }
    }

    async fn run(&self, body: Option<&Value>) -> Result<ServiceRequest> {
        // 欄位存在性
        let body = require_body(body)?;
        let token = require_field(body, "token", MSG_NO_TOKEN)?;
        let phone = validate_phone(body.get("phone"))?;
        let zip = require_field(body, "zip", MSG_MISSING_ZIP_OR_REQUEST)?;
        let request = require_field(body, "request", MSG_MISSING_ZIP_OR_REQUEST)?;

        // 格式
        let zip = validate_postal_code(zip)?;
        let request = validate_request_type(request)?;

        // 電話分類
        tracing::debug!("Classifying phone {}", mask_phone(phone.as_str()));
        ensure_allowed(&phone)?;

        // 非字串的 token 直接視為驗證失敗
        self.verifier.verify(token.as_str().unwrap_or_default())?;

        let province_id = resolve_region(self.store, &zip).await?;

        let record = ServiceRequest::new(phone, zip, province_id, request);
        self.store.insert_request(&record).await?;
        Ok(record)
    }
}
