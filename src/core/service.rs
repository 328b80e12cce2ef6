use crate::core::lookup::to_lookup_dto;
use crate::core::normalizer::Normalizer;
use crate::core::{
    LookupDto, MakeRepository, ModelRepository, Result, SearchByVinResult, VinRepository,
    YearRepository,
};

/// 對外提供的四個查詢操作
pub struct VpicService<V, Y, M, D>
where
    V: VinRepository,
    Y: YearRepository,
    M: MakeRepository,
    D: ModelRepository,
{
    vin_repository: V,
    year_repository: Y,
    make_repository: M,
    model_repository: D,
    normalizer: Normalizer,
}

impl<V, Y, M, D> VpicService<V, Y, M, D>
where
    V: VinRepository,
    Y: YearRepository,
    M: MakeRepository,
    D: ModelRepository,
{
    pub fn new(vin_repository: V, year_repository: Y, make_repository: M, model_repository: D) -> Self {
        Self {
            vin_repository,
            year_repository,
            make_repository,
            model_repository,
            normalizer: Normalizer::default(),
        }
    }

    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub async fn search_by_vin(&self, vin: &str) -> Result<SearchByVinResult> {
        tracing::debug!("Decoding VIN {}", vin);
        let elements = self.vin_repository.vin_decode(vin).await?;
        tracing::debug!("Provider returned {} elements", elements.len());

        Ok(self.normalizer.normalize(vin, &elements)?)
    }

    pub async fn get_all_supported_years(&self) -> Result<Vec<i32>> {
        self.year_repository.get_all_years().await
    }

    pub async fn get_makes_by_year(&self, year: i32) -> Result<Vec<LookupDto>> {
        let makes = self.make_repository.get_makes_by_year(year).await?;

        Ok(makes.iter().map(to_lookup_dto).collect())
    }

    pub async fn get_models_by_make_id_and_year(
        &self,
        make_id: i64,
        year: i32,
    ) -> Result<Vec<LookupDto>> {
        let models = self
            .model_repository
            .get_models_by_make_year(make_id, year)
            .await?;

        Ok(models.iter().map(to_lookup_dto).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Make, Model, VehicleElements};
    use crate::utils::error::{DecodeFailureReason, LookupError};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct MockProvider {
        elements: VehicleElements,
        makes: Vec<Make>,
        models: Vec<Model>,
        fail: bool,
        calls: Arc<AtomicUsize>,
    }

    impl MockProvider {
        fn check(&self) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(LookupError::ProviderError {
                    status: Some(503),
                    message: "Service Unavailable".to_string(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl VinRepository for MockProvider {
        async fn vin_decode(&self, _vin: &str) -> Result<VehicleElements> {
            self.check()?;
            Ok(self.elements.clone())
        }
    }

    #[async_trait]
    impl YearRepository for MockProvider {
        async fn get_all_years(&self) -> Result<Vec<i32>> {
            self.check()?;
            Ok(vec![2021, 2020, 2019])
        }
    }

    #[async_trait]
    impl MakeRepository for MockProvider {
        async fn get_makes_by_year(&self, _year: i32) -> Result<Vec<Make>> {
            self.check()?;
            Ok(self.makes.clone())
        }
    }

    #[async_trait]
    impl ModelRepository for MockProvider {
        async fn get_models_by_make_year(&self, _make_id: i64, _year: i32) -> Result<Vec<Model>> {
            self.check()?;
            Ok(self.models.clone())
        }
    }

    fn service(
        provider: MockProvider,
    ) -> VpicService<MockProvider, MockProvider, MockProvider, MockProvider> {
        VpicService::new(provider.clone(), provider.clone(), provider.clone(), provider)
    }

    #[tokio::test]
    async fn test_search_by_vin_normalizes_provider_result() {
        let provider = MockProvider {
            elements: [
                ("Make", "FORD"),
                ("MakeId", "1"),
                ("Model", "F-150"),
                ("ModelId", "100"),
                ("ModelYear", "2020"),
                ("ErrorCode", "0"),
                ("Transmission", "Automatic"),
            ]
            .into_iter()
            .collect(),
            ..Default::default()
        };

        let result = service(provider.clone())
            .search_by_vin("1FTFW1E50LFA00001")
            .await
            .unwrap();

        assert_eq!(result.make, "Ford");
        assert_eq!(result.year, 2020);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_search_by_vin_propagates_decode_failure() {
        let provider = MockProvider {
            elements: [("ErrorCode", "6"), ("ErrorText", "6 - Incomplete VIN")]
                .into_iter()
                .collect(),
            ..Default::default()
        };

        let error = service(provider).search_by_vin("1FT").await.unwrap_err();

        match error {
            LookupError::Decode(failure) => {
                assert_eq!(failure.vin, "1FT");
                assert_eq!(
                    failure.reason,
                    DecodeFailureReason::MissingIdentity {
                        error_code: Some("6".to_string()),
                        error_text: Some("Incomplete VIN".to_string()),
                    }
                );
            }
            other => panic!("expected decode failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_collaborator_failure_propagates_unchanged() {
        let provider = MockProvider {
            fail: true,
            ..Default::default()
        };
        let service = service(provider.clone());

        assert!(matches!(
            service.search_by_vin("1FT").await,
            Err(LookupError::ProviderError { status: Some(503), .. })
        ));
        assert!(service.get_all_supported_years().await.is_err());
        assert!(service.get_makes_by_year(2020).await.is_err());
        assert!(service.get_models_by_make_id_and_year(1, 2020).await.is_err());
        // 不重試
        assert_eq!(provider.calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_years_pass_through() {
        let years = service(MockProvider::default())
            .get_all_supported_years()
            .await
            .unwrap();

        assert_eq!(years, vec![2021, 2020, 2019]);
    }

    #[tokio::test]
    async fn test_makes_are_projected() {
        let provider = MockProvider {
            makes: vec![
                serde_json::from_value(json!({ "id": 1, "name": "Ford", "extra": "x" })).unwrap(),
                serde_json::from_value(json!({ "id": 2, "name": "Honda" })).unwrap(),
            ],
            ..Default::default()
        };

        let makes = service(provider).get_makes_by_year(2020).await.unwrap();

        assert_eq!(
            serde_json::to_value(&makes).unwrap(),
            json!([{ "id": 1, "name": "Ford" }, { "id": 2, "name": "Honda" }])
        );
    }

    #[tokio::test]
    async fn test_models_are_projected() {
        let provider = MockProvider {
            models: vec![serde_json::from_value(
                json!({ "id": 100, "name": "F-150", "makeId": 1, "years": [2020] }),
            )
            .unwrap()],
            ..Default::default()
        };

        let models = service(provider)
            .get_models_by_make_id_and_year(1, 2020)
            .await
            .unwrap();

        assert_eq!(
            models,
            vec![LookupDto {
                id: 100,
                name: "F-150".to_string()
            }]
        );
    }
}
