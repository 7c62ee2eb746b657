use crate::utils::error::IntakeError;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Content {
    Error {
        #[serde(rename = "errorMessage")]
        error_message: String,
    },
    Province {
        #[serde(rename = "provinceId")]
        province_id: String,
    },
    Message {
        message: String,
    },
}

/// `{ "success": 0 | 1, "content": { .. } }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseBody {
    pub success: u8,
    pub content: Content,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl ApiResponse {
    pub fn province(province_id: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: ResponseBody {
                success: 1,
                content: Content::Province {
                    province_id: province_id.into(),
                },
            },
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: ResponseBody {
                success: 1,
                content: Content::Message {
                    message: message.into(),
                },
            },
        }
    }

    pub fn error(status: u16, error_message: impl Into<String>) -> Self {
        Self {
            status,
            body: ResponseBody {
                success: 0,
                content: Content::Error {
                    error_message: error_message.into(),
                },
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.body.success == 1
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.body).unwrap_or_else(|_| {
            r#"{"success":0,"content":{"errorMessage":"Something went wrong"}}"#.to_string()
        })
    }
}

impl From<IntakeError> for ApiResponse {
    fn from(err: IntakeError) -> Self {
        Self::error(err.status_code(), err.client_message())
    }
}
