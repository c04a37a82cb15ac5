//! AdForge turns a reference advertisement and a brand-style description
//! into fresh, brand-aligned ad copy and a matching visual, in one of three
//! target formats (social, banner, email), optionally as a batch of
//! variations. Generation runs against AWS Bedrock: text through chat
//! completion models, images through Titan Image Generator.
//!
//! The [`Orchestrator`] is the entry point: it validates a
//! [`GenerationRequest`], profiles the brand style, fans out the text and
//! image calls, and assembles an [`AdResponse`]. The optional `server`
//! feature exposes the same operation over HTTP.

pub mod bedrock;
pub mod config;
pub mod error;
pub mod generator;
pub mod logger;
pub mod models;
pub mod orchestrator;
#[cfg(feature = "server")]
pub mod server;

pub use bedrock::{BedrockClient, GenerationProvider, ImageClient, TextClient};
pub use config::{BedrockConfig, Config};
pub use error::{AdGenError, Result};
pub use generator::AdGenerator;
pub use models::*;
pub use orchestrator::Orchestrator;
