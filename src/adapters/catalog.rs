use crate::core::{Make, MakeRepository, Model, ModelRepository, Storage, YearRepository};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 參考資料檔 (JSON)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub years: Vec<i32>,
    #[serde(default)]
    pub makes: Vec<Make>,
    #[serde(default)]
    pub models: Vec<Model>,
}

/// 以 JSON 參考資料提供年份、廠牌與車型查詢
#[derive(Debug, Clone, Default)]
pub struct CatalogRepository {
    catalog: Arc<Catalog>,
}

impl CatalogRepository {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    pub fn from_json_slice(data: &[u8]) -> Result<Self> {
        let catalog: Catalog = serde_json::from_slice(data)?;
        Ok(Self::new(catalog))
    }

    pub async fn load<S: Storage>(storage: &S, path: &str) -> Result<Self> {
        let data = storage.read_file(path).await?;
        let repository = Self::from_json_slice(&data)?;
        tracing::info!(
            "📚 Loaded catalog {}: {} makes, {} models",
            path,
            repository.catalog.makes.len(),
            repository.catalog.models.len()
        );
        Ok(repository)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

#[async_trait]
impl YearRepository for CatalogRepository {
    async fn get_all_years(&self) -> Result<Vec<i32>> {
        // 未列出年份時，由廠牌涵蓋的年份推得
        let mut years: Vec<i32> = if self.catalog.years.is_empty() {
            self.catalog
                .makes
                .iter()
                .flat_map(|make| make.years.iter().copied())
                .collect()
        } else {
            self.catalog.years.clone()
        };

        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();
        Ok(years)
    }
}

#[async_trait]
impl MakeRepository for CatalogRepository {
    async fn get_makes_by_year(&self, year: i32) -> Result<Vec<Make>> {
        let mut makes: Vec<Make> = self
            .catalog
            .makes
            .iter()
            .filter(|make| make.years.contains(&year))
            .cloned()
            .collect();

        makes.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(makes)
    }
}

#[async_trait]
impl ModelRepository for CatalogRepository {
    async fn get_models_by_make_year(&self, make_id: i64, year: i32) -> Result<Vec<Model>> {
        let mut models: Vec<Model> = self
            .catalog
            .models
            .iter()
            .filter(|model| model.make_id == make_id && model.years.contains(&year))
            .cloned()
            .collect();

        models.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(models)
    }
}
