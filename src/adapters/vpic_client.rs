use crate::core::{ConfigProvider, Model, ModelRepository, VehicleElements, VinRepository};
use crate::utils::error::{LookupError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://vpic.nhtsa.dot.gov/api/vehicles";

/// vPIC 對部分欄位使用 `ID` 結尾，統一為 `Id`
const ELEMENT_ALIASES: [(&str, &str); 2] = [("MakeID", "MakeId"), ("ModelID", "ModelId")];

#[derive(Debug, Deserialize)]
struct VpicResponse<T> {
    #[serde(rename = "Message", default)]
    message: String,
    #[serde(rename = "Results", default = "Vec::new")]
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct VpicModel {
    #[serde(rename = "Make_ID")]
    make_id: i64,
    #[serde(rename = "Make_Name", default)]
    make_name: Option<String>,
    #[serde(rename = "Model_ID")]
    model_id: i64,
    #[serde(rename = "Model_Name")]
    model_name: String,
}

/// NHTSA vPIC API 用戶端
#[derive(Debug, Clone)]
pub struct VpicClient {
    client: Client,
    endpoint: String,
    headers: HashMap<String, String>,
    timeout: Option<Duration>,
}

impl VpicClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            headers: HashMap::new(),
            timeout: None,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        let mut client = Self::new(config.api_endpoint())
            .with_timeout(Duration::from_secs(config.timeout_seconds()));
        client.headers = config.headers().clone();
        client
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        let invalid = |reason: &str| LookupError::ConfigError {
            message: format!("Invalid provider endpoint '{}': {}", self.endpoint, reason),
        };

        let mut url = Url::parse(&self.endpoint).map_err(|e| invalid(&e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("cannot be a base URL"))?
            .pop_if_empty()
            .extend(segments);
        url.query_pairs_mut().append_pair("format", "json");
        Ok(url)
    }

    async fn get_results<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<Vec<T>> {
        let url = self.url(segments)?;
        tracing::debug!("Making API request to: {}", url);

        let mut request = self.client.get(url);
        for (key, value) in &self.headers {
            request = request.header(key, value);
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::ProviderError {
                status: Some(status.as_u16()),
                message: if body.is_empty() {
                    status.to_string()
                } else {
                    body
                },
            });
        }

        let payload: VpicResponse<T> = response.json().await?;
        tracing::debug!(
            "Provider returned {} results ({})",
            payload.results.len(),
            payload.message
        );
        Ok(payload.results)
    }
}

impl Default for VpicClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

/// 把 vPIC 的單筆結果轉成文字欄位；null 視為不存在
fn to_vehicle_elements(raw: serde_json::Map<String, serde_json::Value>) -> VehicleElements {
    raw.into_iter()
        .filter_map(|(key, value)| {
            let text = match value {
                serde_json::Value::Null => return None,
                serde_json::Value::String(text) => text,
                other => other.to_string(),
            };
            let key = ELEMENT_ALIASES
                .iter()
                .find(|(alias, _)| *alias == key)
                .map(|(_, canonical)| canonical.to_string())
                .unwrap_or(key);
            Some((key, text))
        })
        .collect()
}

#[async_trait]
impl VinRepository for VpicClient {
    async fn vin_decode(&self, vin: &str) -> Result<VehicleElements> {
        let results = self
            .get_results::<serde_json::Map<String, serde_json::Value>>(&["DecodeVinValues", vin])
            .await?;

        let first = results
            .into_iter()
            .next()
            .ok_or_else(|| LookupError::ProviderError {
                status: None,
                message: format!("No decode results returned for VIN {}", vin),
            })?;

        Ok(to_vehicle_elements(first))
    }
}

#[async_trait]
impl ModelRepository for VpicClient {
    async fn get_models_by_make_year(&self, make_id: i64, year: i32) -> Result<Vec<Model>> {
        let make_id_segment = make_id.to_string();
        let year_segment = year.to_string();
        let results: Vec<VpicModel> = self
            .get_results(&[
                "GetModelsForMakeIdYear",
                "makeId",
                make_id_segment.as_str(),
                "modelyear",
                year_segment.as_str(),
            ])
            .await?;

        Ok(results
            .into_iter()
            .map(|raw| {
                let mut extra = serde_json::Map::new();
                if let Some(make_name) = raw.make_name {
                    extra.insert("makeName".to_string(), make_name.into());
                }
                Model {
                    id: raw.model_id,
                    name: raw.model_name,
                    make_id: raw.make_id,
                    years: vec![year],
                    extra,
                }
            })
            .collect())
    }
}
