use clap::Parser;
use shipper_client::config::cli::Command;
use shipper_client::utils::error::ErrorCategory;
use shipper_client::utils::logger;
use shipper_client::{CliConfig, ShipperClient, ShipperError, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 先讀設定檔，日誌設定可能來自檔案
    let file = match cli.load_file() {
        Ok(file) => file,
        Err(e) => {
            eprintln!("❌ {}", e);
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    let log_settings = cli.log_settings(file.as_ref());
    if log_settings.json {
        logger::init_json_logger(log_settings.verbose);
    } else {
        logger::init_cli_logger(log_settings.verbose);
    }

    tracing::info!("Starting shipper CLI");
    if log_settings.verbose {
        tracing::debug!("Command: {:?}", cli.command);
    }

    match run(&cli, file.as_ref()).await {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Request failed: {} (Category: {:?})", e, e.category());
            match e.policy_code() {
                Some(code) => eprintln!("❌ [{}] {}", code, e),
                None => eprintln!("❌ {}", e),
            }
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.category() {
                ErrorCategory::Configuration => 1,
                ErrorCategory::Policy | ErrorCategory::Input => 2,
                ErrorCategory::Transport => 3,
            };
            std::process::exit(exit_code);
        }
    }
}

async fn run(cli: &CliConfig, file: Option<&TomlConfig>) -> Result<serde_json::Value, ShipperError> {
    let config = cli.client_config_with(file)?;
    let client = ShipperClient::from_config(&config)?;
    tracing::info!("Using {} account", client.tier());

    let output = match &cli.command {
        Command::Cost {
            origin,
            destination,
            courier,
            dry_run,
            ..
        } => {
            let metrics = cli.command.package_metrics().unwrap_or_default();
            if *dry_run {
                let prepared = client.prepare_cost(origin, destination, metrics, courier)?;
                let params: serde_json::Map<String, serde_json::Value> = prepared
                    .params
                    .iter()
                    .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
                    .collect();
                serde_json::json!({
                    "path": prepared.path.as_str(),
                    "params": params,
                })
            } else {
                let quote = client.get_cost(origin, destination, metrics, courier).await?;
                tracing::info!(
                    "✅ {} quote for {:?}g",
                    quote.prepared.path.as_str(),
                    quote.resolved_weight()
                );
                quote.rates
            }
        }
        Command::Waybill { id, courier } => client.get_waybill(id, courier).await?.body,
        Command::Currency => client.get_currency().await?.body,
        Command::Couriers => serde_json::json!({
            "account_type": client.tier(),
            "couriers": client.supported_couriers(),
            "waybill_couriers": client.supported_waybill_couriers(),
        }),
        Command::Countries => serde_json::Value::Array(client.list_countries().await?),
        Command::Provinces => serde_json::Value::Array(client.list_provinces().await?),
        Command::Cities { province } => serde_json::Value::Array(client.list_cities(province).await?),
        Command::Suburbs { city } => serde_json::Value::Array(client.list_suburbs(city).await?),
        Command::Areas { suburb } => serde_json::Value::Array(client.list_areas(suburb).await?),
        Command::Merchants => serde_json::Value::Array(client.list_merchants().await?),
        Command::Rates { .. } => match cli.command.rates_query() {
            Some(query) => client.get_domestic_rates(&query).await?,
            None => serde_json::Value::Null,
        },
    };

    Ok(output)
}
