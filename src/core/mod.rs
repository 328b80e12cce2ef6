pub mod lookup;
pub mod normalizer;
pub mod service;

pub use crate::domain::model::{
    AttributeValue, EmptyValuePolicy, LookupDto, Make, Model, SearchByVinResult, VehicleElements,
};
pub use crate::domain::ports::{
    ConfigProvider, MakeRepository, ModelRepository, Storage, VinRepository, YearRepository,
};
pub use crate::utils::error::Result;
