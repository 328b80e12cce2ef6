use clap::Parser;
use vpic_lookup::core::{
    ConfigProvider, MakeRepository, ModelRepository, VinRepository, YearRepository,
};
use vpic_lookup::utils::{logger, validation::Validate};
use vpic_lookup::{
    CatalogRepository, CliConfig, Command, LocalStorage, LookupError, Normalizer, VpicClient,
    VpicService,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(&cli).await {
        tracing::error!("❌ Lookup failed: {} (code: {})", e, e.code());
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        if e.is_decode_failure() {
            eprintln!("{}", e.data());
        }
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = if e.is_decode_failure() {
            2
        } else if e.is_config_error() {
            1
        } else {
            3
        };
        std::process::exit(exit_code);
    }
}

async fn run(cli: &CliConfig) -> Result<(), LookupError> {
    let config = cli.resolve()?;
    config.validate()?;
    tracing::debug!("Using provider endpoint {}", config.api_endpoint());

    let client = VpicClient::from_config(&config);
    let normalizer = Normalizer::new(config.empty_value_policy());

    match config.catalog_path() {
        Some(path) => {
            let catalog = CatalogRepository::load(&LocalStorage::default(), path).await?;
            let service = VpicService::new(client, catalog.clone(), catalog.clone(), catalog)
                .with_normalizer(normalizer);
            execute(&service, &cli.command).await
        }
        None => {
            // 沒有參考資料檔時，車型改由 vPIC API 查詢
            if matches!(cli.command, Command::Years | Command::Makes { .. }) {
                return Err(LookupError::MissingConfigError {
                    field: "catalog.path".to_string(),
                });
            }
            let service = VpicService::new(
                client.clone(),
                CatalogRepository::default(),
                CatalogRepository::default(),
                client,
            )
            .with_normalizer(normalizer);
            execute(&service, &cli.command).await
        }
    }
}

async fn execute<V, Y, M, D>(
    service: &VpicService<V, Y, M, D>,
    command: &Command,
) -> Result<(), LookupError>
where
    V: VinRepository,
    Y: YearRepository,
    M: MakeRepository,
    D: ModelRepository,
{
    let output = match command {
        Command::Vin { vin } => {
            let result = service.search_by_vin(vin).await?;
            tracing::info!("✅ Decoded {} as {} {} {}", vin, result.year, result.make, result.model);
            serde_json::to_string_pretty(&result)?
        }
        Command::Years => serde_json::to_string_pretty(&service.get_all_supported_years().await?)?,
        Command::Makes { year } => {
            serde_json::to_string_pretty(&service.get_makes_by_year(*year).await?)?
        }
        Command::Models { make_id, year } => serde_json::to_string_pretty(
            &service
                .get_models_by_make_id_and_year(*make_id, *year)
                .await?,
        )?,
    };

    println!("{}", output);
    Ok(())
}
