use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 解碼服務回傳的欄位名稱
pub mod keys {
    pub const MAKE: &str = "Make";
    pub const MAKE_ID: &str = "MakeId";
    pub const MODEL: &str = "Model";
    pub const MODEL_ID: &str = "ModelId";
    pub const MODEL_YEAR: &str = "ModelYear";
    pub const ERROR_CODE: &str = "ErrorCode";
    pub const ERROR_TEXT: &str = "ErrorText";
    pub const ERROR_CODE_ID: &str = "ErrorCodeId";
    pub const SUGGESTED_VIN: &str = "SuggestedVIN";
    pub const ADDITIONAL_ERROR_TEXT: &str = "AdditionalErrorText";
    pub const POSSIBLE_VALUES: &str = "PossibleValues";
}

/// VIN 解碼後的原始欄位，所有值皆為文字
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleElements {
    elements: BTreeMap<String, String>,
}

impl VehicleElements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.elements.insert(key.into(), value.into());
    }

    /// 只有非空字串才算存在
    pub fn get(&self, key: &str) -> Option<&str> {
        self.elements
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// 原始值，包含空字串
    pub fn get_raw(&self, key: &str) -> Option<&str> {
        self.elements.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.elements.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VehicleElements {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            elements: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// 屬性值：數字或文字
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Number(serde_json::Number),
    Text(String),
}

impl AttributeValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(text) => Some(text),
            AttributeValue::Number(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Number(number) => number.as_f64(),
            AttributeValue::Text(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttributeValue::Number(number) => number.as_i64(),
            AttributeValue::Text(_) => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Number(value.into())
    }
}

/// 空值屬性的處理方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum EmptyValuePolicy {
    /// 空字串轉為數字 0
    #[default]
    Zero,
    /// 略過該欄位
    Omit,
    /// 保留空字串
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchByVinResult {
    pub vin: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_vin: Option<String>,
    pub make_id: i64,
    pub make: String,
    pub model_id: i64,
    pub model: String,
    pub year: i32,
    pub attributes: BTreeMap<String, AttributeValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupDto {
    pub id: i64,
    pub name: String,
}

/// 參考資料中的廠牌
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Make {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub years: Vec<i32>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// 參考資料中的車型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub id: i64,
    pub name: String,
    pub make_id: i64,
    #[serde(default)]
    pub years: Vec<i32>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
