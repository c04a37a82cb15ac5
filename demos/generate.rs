use adforge::{AdFormat, BedrockClient, BedrockConfig, GenerationRequest, Orchestrator};
use base64::Engine;
use std::env;
use std::fs;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded"),
        Err(_) => log::warn!("⚠️  No .env file found"),
    }
    adforge::logger::init()?;

    let access_key = env::var("AWS_ACCESS_KEY_ID")?;
    let secret_key = env::var("AWS_SECRET_ACCESS_KEY")?;
    let region = env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string());

    let config = BedrockConfig::new()
        .with_region(&region)
        .with_credentials(access_key, secret_key);

    let client = BedrockClient::new(config).await?;
    let orchestrator = Orchestrator::new(Arc::new(client));

    let request = GenerationRequest::new(
        "Half-price lattes all week. Warm up with us!",
        "Cozy neighborhood coffee brand, friendly and playful, warm earthy colors",
    )
    .with_format(AdFormat::Banner)
    .with_variations(2);

    let response = orchestrator.generate(request).await?;

    println!(
        "brand analysis: {}",
        serde_json::to_string_pretty(&response.brand_analysis)?
    );

    for variant in response.result.variants() {
        println!("--- variant {} ---", variant.variant_id);
        println!("{}", variant.text);

        if let Some(encoded) = variant.image.strip_prefix("data:image/png;base64,") {
            let bytes = base64::engine::general_purpose::STANDARD.decode(encoded)?;
            let filename = format!("generated_ad_{}.png", variant.variant_id);
            fs::write(&filename, bytes)?;
            println!("💾 Image saved to: {}", filename);
        }
    }

    Ok(())
}
