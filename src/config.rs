use std::env;

#[derive(Debug, Clone)]
pub struct BedrockConfig {
    pub region: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub text_model_id: Option<String>,
    pub image_model_id: Option<String>,
}

impl Default for BedrockConfig {
    fn default() -> Self {
        BedrockConfig {
            region: None,
            access_key: None,
            secret_key: None,
            text_model_id: None,
            image_model_id: None,
        }
    }
}

impl BedrockConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let region = env::var("AWS_REGION")
            .or_else(|_| env::var("AWS_DEFAULT_REGION"))
            .ok();
        let access_key = env::var("AWS_ACCESS_KEY_ID").ok();
        let secret_key = env::var("AWS_SECRET_ACCESS_KEY").ok();
        let text_model_id = env::var("ADFORGE_TEXT_MODEL").ok();
        let image_model_id = env::var("ADFORGE_IMAGE_MODEL").ok();

        BedrockConfig {
            region,
            access_key,
            secret_key,
            text_model_id,
            image_model_id,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_credentials(
        mut self,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.access_key = Some(access_key.into());
        self.secret_key = Some(secret_key.into());
        self
    }

    pub fn with_text_model(mut self, model_id: impl Into<String>) -> Self {
        self.text_model_id = Some(model_id.into());
        self
    }

    pub fn with_image_model(mut self, model_id: impl Into<String>) -> Self {
        self.image_model_id = Some(model_id.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: Option<u16>,
    pub bedrock: Option<BedrockConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: None,
            bedrock: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let port = env::var("PORT").ok().and_then(|port| port.parse().ok());

        Config {
            port,
            bedrock: Some(BedrockConfig::from_env()),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_bedrock(mut self, config: BedrockConfig) -> Self {
        self.bedrock = Some(config);
        self
    }
}
