use crate::domain::model::{EmptyValuePolicy, Make, Model, VehicleElements};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

#[async_trait]
pub trait VinRepository: Send + Sync {
    async fn vin_decode(&self, vin: &str) -> Result<VehicleElements>;
}

#[async_trait]
pub trait YearRepository: Send + Sync {
    async fn get_all_years(&self) -> Result<Vec<i32>>;
}

#[async_trait]
pub trait MakeRepository: Send + Sync {
    async fn get_makes_by_year(&self, year: i32) -> Result<Vec<Make>>;
}

#[async_trait]
pub trait ModelRepository: Send + Sync {
    async fn get_models_by_make_year(&self, make_id: i64, year: i32) -> Result<Vec<Model>>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn headers(&self) -> &HashMap<String, String>;
    fn catalog_path(&self) -> Option<&str>;
    fn empty_value_policy(&self) -> EmptyValuePolicy;
}
