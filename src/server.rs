use actix_web::{web, App, HttpResponse, HttpServer};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::{
    config::Config,
    error::AdGenError,
    models::{AdFormat, GenerationRequest, DEFAULT_VARIATIONS},
    orchestrator::Orchestrator,
};

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    #[serde(rename = "referenceAd", default)]
    reference_ad: String,
    #[serde(rename = "brandStyle", default)]
    brand_style: String,
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    variations: Option<String>,
    #[serde(rename = "variationCount", default)]
    variation_count: Option<String>,
}

impl GenerateForm {
    fn into_request(self) -> GenerationRequest {
        let format = AdFormat::parse(self.format.as_deref().unwrap_or("social"));
        let mut request =
            GenerationRequest::new(self.reference_ad, self.brand_style).with_format(format);

        if self.variations.as_deref() == Some("true") {
            let count = self
                .variation_count
                .as_deref()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(DEFAULT_VARIATIONS);
            request = request.with_variations(count);
        }

        request
    }
}

#[derive(Debug, Deserialize)]
pub struct DraftForm {
    #[serde(rename = "referenceAd", default)]
    reference_ad: String,
    #[serde(rename = "brandStyle", default)]
    brand_style: String,
}

async fn generate(
    orchestrator: web::Data<Orchestrator>,
    form: web::Form<GenerateForm>,
) -> HttpResponse {
    let request_id = Uuid::new_v4();
    let request = form.into_inner().into_request();
    log::info!(
        "[req:{}] generate: format={} variations={} count={}",
        request_id,
        request.format,
        request.variation_mode,
        request.variation_count
    );

    match orchestrator.generate(request).await {
        Ok(response) => {
            log::info!("[req:{}] assembled {} variant(s)", request_id, response.result.variants().len());
            HttpResponse::Ok().json(json!({
                "success": true,
                "result": response.result,
                "brandAnalysis": response.brand_analysis,
                "format": response.format,
            }))
        }
        Err(error) => error_response(request_id, error),
    }
}

async fn draft(orchestrator: web::Data<Orchestrator>, form: web::Form<DraftForm>) -> HttpResponse {
    let request_id = Uuid::new_v4();
    let form = form.into_inner();
    log::info!("[req:{}] draft", request_id);

    match orchestrator.draft(&form.reference_ad, &form.brand_style).await {
        Ok((ad, image)) => HttpResponse::Ok().json(json!({
            "success": true,
            "ad": ad,
            "image": image,
        })),
        Err(error) => error_response(request_id, error),
    }
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

fn error_response(request_id: Uuid, error: AdGenError) -> HttpResponse {
    log::error!("[req:{}] generation failed: {}", request_id, error);

    let body = json!({
        "success": false,
        "error": error.to_string(),
    });

    if error.is_client_error() {
        HttpResponse::BadRequest().json(body)
    } else {
        HttpResponse::InternalServerError().json(body)
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/generate", web::post().to(generate))
            .route("/draft", web::post().to(draft)),
    )
    .route("/health", web::get().to(health));
}

pub async fn run(config: Config, orchestrator: Orchestrator) -> std::io::Result<()> {
    let port = config.port.unwrap_or(DEFAULT_PORT);
    let data = web::Data::new(orchestrator);

    log::info!("Listening on http://127.0.0.1:{}", port);

    HttpServer::new(move || App::new().app_data(data.clone()).configure(configure))
        .bind(("127.0.0.1", port))?
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bedrock::GenerationProvider;
    use crate::error::Result;
    use crate::models::{ImageGenerationRequest, ImageGenerationResponse, TextGenerationRequest};
    use actix_web::test;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct StubProvider;

    #[async_trait]
    impl GenerationProvider for StubProvider {
        async fn complete_chat(&self, request: TextGenerationRequest) -> Result<Vec<String>> {
            if request.candidate_count == Some(1) {
                Ok(vec![r#"{"voice": "playful"}"#.to_string()])
            } else {
                Ok(vec!["Fun Sale!".to_string(), "alt".to_string(), "alt2".to_string()])
            }
        }

        async fn generate_image(
            &self,
            _request: ImageGenerationRequest,
        ) -> Result<ImageGenerationResponse> {
            Ok(ImageGenerationResponse {
                image_data: "aW1n".to_string(),
                model: "stub".into(),
            })
        }
    }

    fn stub_orchestrator() -> web::Data<Orchestrator> {
        web::Data::new(Orchestrator::new(Arc::new(StubProvider)))
    }

    #[actix_web::test]
    async fn missing_fields_return_400() {
        let app =
            test::init_service(App::new().app_data(stub_orchestrator()).configure(configure))
                .await;

        let req = test::TestRequest::post()
            .uri("/api/generate")
            .set_form([("format", "social")])
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("required"));
    }

    #[actix_web::test]
    async fn generate_returns_variant_and_echoes_format() {
        let app =
            test::init_service(App::new().app_data(stub_orchestrator()).configure(configure))
                .await;

        let req = test::TestRequest::post()
            .uri("/api/generate")
            .set_form([
                ("referenceAd", "Buy now!"),
                ("brandStyle", "Playful and colorful"),
                ("format", "banner"),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["format"], "banner");
        assert_eq!(body["result"]["text"], "Fun Sale!");
        assert_eq!(body["result"]["variationId"], 1);
        assert_eq!(body["brandAnalysis"]["voice"], "playful");
    }

    #[actix_web::test]
    async fn generate_with_variations_returns_ordered_batch() {
        let app =
            test::init_service(App::new().app_data(stub_orchestrator()).configure(configure))
                .await;

        let req = test::TestRequest::post()
            .uri("/api/generate")
            .set_form([
                ("referenceAd", "Buy now!"),
                ("brandStyle", "Playful"),
                ("variations", "true"),
                ("variationCount", "2"),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        let variants = body["result"].as_array().unwrap();
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0]["variationId"], 1);
        assert_eq!(variants[1]["variationId"], 2);
    }

    #[actix_web::test]
    async fn draft_returns_ad_and_image() {
        let app =
            test::init_service(App::new().app_data(stub_orchestrator()).configure(configure))
                .await;

        let req = test::TestRequest::post()
            .uri("/api/draft")
            .set_form([("referenceAd", "Buy now!"), ("brandStyle", "Playful")])
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["ad"], "Fun Sale!");
        assert_eq!(body["image"], "data:image/png;base64,aW1n");
    }

    #[actix_web::test]
    async fn health_is_ok() {
        let app =
            test::init_service(App::new().app_data(stub_orchestrator()).configure(configure))
                .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
    }
}
