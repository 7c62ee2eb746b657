use crate::utils::error::{IntakeError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_table_name, validate_url, Validate};
use std::str::FromStr;

#[cfg(feature = "lambda")]
use crate::core::{PostalCode, RegionStore, RequestStore, ServiceRequest};
#[cfg(feature = "lambda")]
use aws_config::BehaviorVersion;
#[cfg(feature = "lambda")]
use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
#[cfg(feature = "lambda")]
use aws_sdk_dynamodb::types::AttributeValue;
#[cfg(feature = "lambda")]
use aws_sdk_dynamodb::Client as DynamoClient;

/// Which endpoint this deployment of the function serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeFunction {
    ResolveZip,
    SubmitRequest,
}

impl FromStr for IntakeFunction {
    type Err = IntakeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "resolve-zip" => Ok(Self::ResolveZip),
            "submit-request" => Ok(Self::SubmitRequest),
            other => Err(IntakeError::InvalidConfigValueError {
                field: "INTAKE_FUNCTION".to_string(),
                value: other.to_string(),
                reason: "Expected 'resolve-zip' or 'submit-request'".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub jwt_key: String,
    pub region_table: String,
    pub request_table: String,
    pub dynamodb_endpoint: Option<String>,
    pub function: IntakeFunction,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            jwt_key: lookup("JWT_KEY").ok_or_else(|| IntakeError::ConfigError {
                message: "JWT_KEY environment variable is required".to_string(),
            })?,
            region_table: lookup("REGION_TABLE").unwrap_or_else(|| "regions".to_string()),
            request_table: lookup("REQUEST_TABLE").unwrap_or_else(|| "requests".to_string()),
            dynamodb_endpoint: lookup("DYNAMODB_ENDPOINT").filter(|s| !s.is_empty()),
            function: lookup("INTAKE_FUNCTION")
                .as_deref()
                .unwrap_or("resolve-zip")
                .parse()?,
        })
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("jwt_key", &self.jwt_key)?;
        validate_table_name("region_table", &self.region_table)?;
        validate_table_name("request_table", &self.request_table)?;

        if let Some(endpoint) = &self.dynamodb_endpoint {
            validate_url("dynamodb_endpoint", endpoint)?;
        }

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}

#[cfg(feature = "lambda")]
const ZIP_KEY: &str = "zipCode";
#[cfg(feature = "lambda")]
const REGION_ATTR: &str = "region";

/// DynamoDB-backed store. Built once per process and shared by reference.
#[cfg(feature = "lambda")]
#[derive(Debug, Clone)]
pub struct DynamoStore {
    client: DynamoClient,
    region_table: String,
    request_table: String,
}

#[cfg(feature = "lambda")]
impl DynamoStore {
    pub fn new(client: DynamoClient, region_table: String, request_table: String) -> Self {
        Self {
            client,
            region_table,
            request_table,
        }
    }

    pub async fn connect(config: &LambdaConfig) -> Self {
        let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        let mut builder = aws_sdk_dynamodb::config::Builder::from(&sdk_config);
        if let Some(endpoint) = &config.dynamodb_endpoint {
            tracing::info!("Using DynamoDB endpoint override {}", endpoint);
            builder = builder.endpoint_url(endpoint);
        }

        Self::new(
            DynamoClient::from_conf(builder.build()),
            config.region_table.clone(),
            config.request_table.clone(),
        )
    }
}

#[cfg(feature = "lambda")]
fn store_error<E, R>(operation: &str, err: SdkError<E, R>) -> IntakeError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let message = format!("{} failed: {}", operation, DisplayErrorContext(&err));
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
            IntakeError::ConnectionError { message }
        }
        _ => IntakeError::QueryError { message },
    }
}

#[cfg(feature = "lambda")]
impl RegionStore for DynamoStore {
    async fn find_region(&self, zip: &PostalCode) -> Result<Option<String>> {
        let output = self
            .client
            .get_item()
            .table_name(&self.region_table)
            .key(ZIP_KEY, AttributeValue::S(zip.as_str().to_string()))
            .send()
            .await
            .map_err(|e| store_error("GetItem", e))?;

        let Some(item) = output.item() else {
            return Ok(None);
        };

        match item.get(REGION_ATTR) {
            None => Ok(None),
            Some(value) => value
                .as_s()
                .map(|s| Some(s.clone()))
                .map_err(|_| IntakeError::QueryError {
                    message: format!("Attribute '{}' for {} is not a string", REGION_ATTR, zip),
                }),
        }
    }
}

#[cfg(feature = "lambda")]
impl RequestStore for DynamoStore {
    async fn insert_request(&self, request: &ServiceRequest) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.request_table)
            .item("id", AttributeValue::S(request.id.to_string()))
            .item(
                "timestamp",
                AttributeValue::N(request.timestamp.timestamp_millis().to_string()),
            )
            .item("phone", AttributeValue::S(request.phone.as_str().to_string()))
            .item("zip", AttributeValue::S(request.zip.as_str().to_string()))
            .item("provinceId", AttributeValue::S(request.province_id.clone()))
            .item("request", AttributeValue::N(request.request.code().to_string()))
            .item(
                "schemaVersion",
                AttributeValue::N(request.schema_version.to_string()),
            )
            // 每次呼叫只寫入一次，不覆蓋既有紀錄
            .condition_expression("attribute_not_exists(id)")
            .send()
            .await
            .map_err(|e| store_error("PutItem", e))?;

        Ok(())
    }
}
