//! VIN 解碼結果的判定與轉換。
//!
//! 解碼成功的條件：五個識別欄位 (`Make`, `MakeId`, `Model`, `ModelId`,
//! `ModelYear`) 皆非空，且 `ErrorCode` 為 `"0"` 或服務提供了 `SuggestedVIN`。
//! 其餘欄位去除狀態欄位後轉為 camelCase 屬性表。

use crate::domain::model::{
    keys, AttributeValue, EmptyValuePolicy, SearchByVinResult, VehicleElements,
};
use crate::utils::case::{camel_case, capitalize};
use crate::utils::error::{DecodeFailure, DecodeFailureReason};
use std::collections::BTreeMap;

/// 不放入屬性表的欄位
pub const EXCLUDED_ELEMENTS: [&str; 11] = [
    keys::MAKE,
    keys::MAKE_ID,
    keys::MODEL,
    keys::MODEL_ID,
    keys::MODEL_YEAR,
    keys::ERROR_CODE,
    keys::SUGGESTED_VIN,
    keys::ERROR_TEXT,
    keys::ERROR_CODE_ID,
    keys::POSSIBLE_VALUES,
    keys::ADDITIONAL_ERROR_TEXT,
];

const SUCCESS_CODE: &str = "0";

#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    empty_values: EmptyValuePolicy,
}

impl Normalizer {
    pub fn new(empty_values: EmptyValuePolicy) -> Self {
        Self { empty_values }
    }

    pub fn empty_value_policy(&self) -> EmptyValuePolicy {
        self.empty_values
    }

    pub fn normalize(
        &self,
        vin: &str,
        elements: &VehicleElements,
    ) -> Result<SearchByVinResult, DecodeFailure> {
        let (Some(make), Some(make_id), Some(model), Some(model_id), Some(model_year)) = (
            elements.get(keys::MAKE),
            elements.get(keys::MAKE_ID),
            elements.get(keys::MODEL),
            elements.get(keys::MODEL_ID),
            elements.get(keys::MODEL_YEAR),
        ) else {
            return Err(DecodeFailure::new(
                vin,
                DecodeFailureReason::MissingIdentity {
                    error_code: elements.get_raw(keys::ERROR_CODE).map(str::to_string),
                    error_text: elements.get(keys::ERROR_TEXT).map(parse_error_text),
                },
            ));
        };

        let suggested_vin = elements.get(keys::SUGGESTED_VIN);
        if elements.get(keys::ERROR_CODE) != Some(SUCCESS_CODE) && suggested_vin.is_none() {
            return Err(DecodeFailure::new(
                vin,
                DecodeFailureReason::Rejected {
                    error_code: elements.get_raw(keys::ERROR_CODE).map(str::to_string),
                },
            ));
        }

        Ok(SearchByVinResult {
            vin: vin.to_string(),
            suggested_vin: suggested_vin.map(str::to_string),
            make_id: parse_identity(vin, keys::MAKE_ID, make_id)?,
            make: capitalize(make),
            model_id: parse_identity(vin, keys::MODEL_ID, model_id)?,
            model: model.to_string(),
            year: parse_identity(vin, keys::MODEL_YEAR, model_year)?,
            attributes: self.attributes(elements),
        })
    }

    fn attributes(&self, elements: &VehicleElements) -> BTreeMap<String, AttributeValue> {
        elements
            .iter()
            .filter(|(key, _)| !EXCLUDED_ELEMENTS.contains(key))
            .filter_map(|(key, value)| {
                coerce_value(value, self.empty_values).map(|value| (camel_case(key), value))
            })
            .collect()
    }
}

/// 以預設的空值處理方式進行判定
pub fn normalize(vin: &str, elements: &VehicleElements) -> Result<SearchByVinResult, DecodeFailure> {
    Normalizer::default().normalize(vin, elements)
}

/// 可解析為有限數字的值轉為數字，其他保留原文字
pub fn coerce_value(raw: &str, empty_values: EmptyValuePolicy) -> Option<AttributeValue> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return match empty_values {
            EmptyValuePolicy::Zero => Some(AttributeValue::Number(0.into())),
            EmptyValuePolicy::Omit => None,
            EmptyValuePolicy::Text => Some(AttributeValue::Text(raw.to_string())),
        };
    }

    Some(match parse_number(trimmed) {
        Some(number) => AttributeValue::Number(number),
        None => AttributeValue::Text(raw.to_string()),
    })
}

fn parse_number(text: &str) -> Option<serde_json::Number> {
    if let Ok(integer) = text.parse::<i64>() {
        return Some(integer.into());
    }

    // "inf" / "NaN" 也能被 f64 解析，需排除
    let value = text.parse::<f64>().ok().filter(|value| value.is_finite())?;

    // "5.0"、"1e3" 這類整數值仍輸出為整數
    if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
        return Some((value as i64).into());
    }
    serde_json::Number::from_f64(value)
}

/// 取第一與第二個連字號之間的片段：`"6 - Incomplete VIN"` → `"Incomplete VIN"`。
/// 沒有連字號時回傳整段文字
pub fn parse_error_text(text: &str) -> String {
    text.split('-').nth(1).unwrap_or(text).trim().to_string()
}

fn parse_identity<T: std::str::FromStr>(
    vin: &str,
    field: &str,
    value: &str,
) -> Result<T, DecodeFailure> {
    value.trim().parse::<T>().map_err(|_| {
        DecodeFailure::new(
            vin,
            DecodeFailureReason::InvalidIdentity {
                field: field.to_string(),
                value: value.to_string(),
            },
        )
    })
}
