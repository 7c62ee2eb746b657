use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub const SCHEMA_VERSION: u32 = 1;

/// Five ASCII digits, leading zeros kept. Only built by `core::validation`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostalCode(String);

impl PostalCode {
    pub(crate) fn new_unchecked(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Phone number exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub(crate) fn new_unchecked(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Request category code in `-1..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestType(i8);

impl RequestType {
    pub const MIN: i64 = -1;
    pub const MAX: i64 = 9;

    pub fn new(code: i64) -> Option<Self> {
        if (Self::MIN..=Self::MAX).contains(&code) {
            i8::try_from(code).ok().map(Self)
        } else {
            None
        }
    }

    pub fn code(self) -> i8 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionMapping {
    pub zip_code: String,
    pub region: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub id: Uuid,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub phone: PhoneNumber,
    pub zip: PostalCode,
    pub province_id: String,
    pub request: RequestType,
    pub schema_version: u32,
}

impl ServiceRequest {
    pub fn new(
        phone: PhoneNumber,
        zip: PostalCode,
        province_id: String,
        request: RequestType,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            phone,
            zip,
            province_id,
            request,
            schema_version: SCHEMA_VERSION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_type_bounds() {
        assert!(RequestType::new(-1).is_some());
        assert!(RequestType::new(0).is_some());
        assert!(RequestType::new(9).is_some());
        assert!(RequestType::new(-2).is_none());
        assert!(RequestType::new(10).is_none());
        assert!(RequestType::new(i64::MAX).is_none());
    }

    #[test]
    fn test_service_request_wire_shape() {
        let record = ServiceRequest::new(
            PhoneNumber::new_unchecked("030123456".to_string()),
            PostalCode::new_unchecked("10115".to_string()),
            "BE".to_string(),
            RequestType::new(5).unwrap(),
        );
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["phone"], "030123456");
        assert_eq!(json["zip"], "10115");
        assert_eq!(json["provinceId"], "BE");
        assert_eq!(json["request"], 5);
        assert_eq!(json["schemaVersion"], SCHEMA_VERSION);
        assert!(json["timestamp"].is_i64());
    }

    #[test]
    fn test_two_requests_get_distinct_ids() {
        let make = || {
            ServiceRequest::new(
                PhoneNumber::new_unchecked("030123456".to_string()),
                PostalCode::new_unchecked("10115".to_string()),
                "BE".to_string(),
                RequestType::new(1).unwrap(),
            )
        };
        assert_ne!(make().id, make().id);
    }
}
