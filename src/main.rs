use std::env;
use std::sync::Arc;

use adforge::{logger, server, BedrockClient, Config, Orchestrator};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger::init_with_config(logger::LoggerConfig::development())?;

    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    log::info!("🔍 Checking AWS environment...");

    if let Ok(region) = env::var("AWS_REGION") {
        log::info!("AWS_REGION: {}", region);
    } else if let Ok(region) = env::var("AWS_DEFAULT_REGION") {
        log::info!("AWS_DEFAULT_REGION: {}", region);
    } else {
        log::warn!("No AWS region environment variable set, using us-east-1");
    }

    match (
        env::var("AWS_ACCESS_KEY_ID"),
        env::var("AWS_SECRET_ACCESS_KEY"),
    ) {
        (Ok(_), Ok(_)) => log::info!("✅ AWS credentials found in environment"),
        _ => log::warn!(
            "⚠️  No AWS credentials in environment variables, will try default credential chain"
        ),
    }

    let config = Config::from_env();
    let bedrock_config = config.bedrock.clone().unwrap_or_default();

    log::info!("🔄 Creating Bedrock client...");
    let client = match BedrockClient::new(bedrock_config).await {
        Ok(client) => {
            log::info!("✅ Bedrock client initialized successfully");
            client
        }
        Err(e) => {
            log::error!("❌ Failed to initialize Bedrock client: {}", e);
            return Err(e.into());
        }
    };

    let orchestrator = Orchestrator::new(Arc::new(client));

    logger::log_startup_info(
        "adforge",
        env!("CARGO_PKG_VERSION"),
        config.port.unwrap_or(server::DEFAULT_PORT),
    );

    server::run(config, orchestrator).await?;

    Ok(())
}
