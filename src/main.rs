use clap::Parser;
use pathlet_insights::config::cli::Command;
use pathlet_insights::utils::error::ErrorCategory;
use pathlet_insights::utils::{logger, validation::Validate};
use pathlet_insights::{
    CliConfig, InsightKind, InsightResult, InsightsApi, InsightsClient, InsightsError, Result,
};
use serde_json::{json, Value};

async fn run(config: &CliConfig) -> Result<Value> {
    config.validate()?;

    let client_config = config.client_config()?;
    tracing::info!(
        "Using {} ({} endpoints)",
        client_config.base_url,
        client_config.convention
    );
    let client = InsightsClient::new(&client_config)?;

    let value = match (config.command, config.ascendant) {
        (Command::Health, _) => serde_json::to_value(client.health().await?)?,
        (Command::Insight(InsightKind::All), Some(sign)) => {
            let birth = config.birth_data()?;
            tracing::info!(
                "Selected ascendant {} (estimated birth window {})",
                sign,
                sign.birth_time_window()
            );
            client
                .calculate_all_with_ascendant(&birth, sign)
                .await?
                .into_raw()
        }
        (Command::Insight(kind), _) => {
            let birth = config.birth_data()?;
            let partner = config.partner();
            client
                .fetch(kind, &birth, partner.as_ref())
                .await
                .map(InsightResult::into_raw)?
        }
    };

    Ok(value)
}

fn exit_code(error: &InsightsError) -> i32 {
    match error.category() {
        ErrorCategory::Request | ErrorCategory::Configuration => 1,
        ErrorCategory::TransportOrBackend => 2,
        ErrorCategory::Schema => 3,
    }
}

/// 與結果相同的位置輸出錯誤
fn error_body(error: &InsightsError) -> Value {
    json!({ "error": error.to_string() })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(config.verbose, config.log_json);

    tracing::info!("Starting pathlet CLI: {}", config.command);
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    match run(&config).await {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Err(e) => {
            tracing::error!("❌ {} failed: {} (Category: {:?})", config.command, e, e.category());

            println!("{}", serde_json::to_string_pretty(&error_body(&e))?);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(exit_code(&e));
        }
    }

    Ok(())
}
