use serde_json::json;
use thiserror::Error;

/// VIN 解碼失敗的原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeFailureReason {
    /// 缺少識別欄位 (Make / MakeId / Model / ModelId / ModelYear)
    MissingIdentity {
        error_code: Option<String>,
        error_text: Option<String>,
    },
    /// 識別欄位齊全，但狀態碼不是 "0" 且沒有建議 VIN
    Rejected { error_code: Option<String> },
    /// 識別欄位無法解析為整數
    InvalidIdentity { field: String, value: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} ({vin})")]
pub struct DecodeFailure {
    pub message: String,
    pub vin: String,
    pub reason: DecodeFailureReason,
}

impl DecodeFailure {
    pub const MESSAGE: &'static str = "Failed to decode VIN";

    pub fn new(vin: impl Into<String>, reason: DecodeFailureReason) -> Self {
        Self {
            message: Self::MESSAGE.to_string(),
            vin: vin.into(),
            reason,
        }
    }

    /// 附帶的診斷資料
    pub fn data(&self) -> serde_json::Value {
        match &self.reason {
            DecodeFailureReason::MissingIdentity {
                error_code,
                error_text,
            } => {
                let mut data = json!({ "vin": self.vin, "errorText": error_text });
                if let Some(code) = error_code {
                    data["errorCode"] = json!(code);
                }
                data
            }
            DecodeFailureReason::Rejected { error_code } => {
                let mut data = json!({ "vin": self.vin });
                if let Some(code) = error_code {
                    data["errorCode"] = json!(code);
                }
                data
            }
            DecodeFailureReason::InvalidIdentity { field, value } => json!({
                "vin": self.vin,
                "field": field,
                "value": value,
            }),
        }
    }
}

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("{0}")]
    Decode(#[from] DecodeFailure),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Provider error (status {status:?}): {message}")]
    ProviderError {
        status: Option<u16>,
        message: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl LookupError {
    pub fn code(&self) -> &'static str {
        match self {
            LookupError::Decode(_) => "SEARCH_BY_VIN_ERROR",
            LookupError::ApiError(_) => "PROVIDER_TRANSPORT_ERROR",
            LookupError::ProviderError { .. } => "PROVIDER_ERROR",
            LookupError::IoError(_) => "IO_ERROR",
            LookupError::SerializationError(_) => "SERIALIZATION_ERROR",
            LookupError::ConfigError { .. }
            | LookupError::ConfigValidationError { .. }
            | LookupError::InvalidConfigValueError { .. }
            | LookupError::MissingConfigError { .. } => "CONFIG_ERROR",
        }
    }

    pub fn is_decode_failure(&self) -> bool {
        matches!(self, LookupError::Decode(_))
    }

    pub fn is_config_error(&self) -> bool {
        self.code() == "CONFIG_ERROR"
    }

    /// 錯誤的上下文資料
    pub fn data(&self) -> serde_json::Value {
        match self {
            LookupError::Decode(failure) => failure.data(),
            LookupError::ProviderError { status, .. } => json!({ "status": status }),
            _ => serde_json::Value::Null,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LookupError::Decode(failure) => match &failure.reason {
                DecodeFailureReason::MissingIdentity {
                    error_text: Some(text),
                    ..
                } => format!("VIN {} could not be decoded: {}", failure.vin, text),
                _ => format!("VIN {} could not be decoded", failure.vin),
            },
            LookupError::ApiError(_) | LookupError::ProviderError { .. } => {
                "The vehicle data provider could not be reached or returned an error".to_string()
            }
            LookupError::IoError(e) => format!("File access failed: {}", e),
            LookupError::SerializationError(e) => format!("Unexpected data format: {}", e),
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            LookupError::Decode(_) => "Check the VIN for typos and try again",
            LookupError::ApiError(_) => "Check network connectivity and the provider endpoint",
            LookupError::ProviderError { .. } => "Retry later or verify the provider endpoint",
            LookupError::IoError(_) => "Check that the file exists and is readable",
            LookupError::SerializationError(_) => "Verify the catalog or response is valid JSON",
            _ => "Review the configuration file and command-line flags",
        }
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;
