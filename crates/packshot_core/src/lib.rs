//! Core data types for the packshot generation pipeline.
//!
//! Two groups live here: the multimodal request/response types every
//! inference driver speaks, and the job model the pipeline passes between
//! stages.

mod asset;
mod audit;
mod batch;
mod input;
mod job;
mod media;
mod message;
mod output;
mod request;
mod role;
mod strategy;
mod task;

pub use asset::{AssetRole, SourceAsset};
pub use audit::AuditReport;
pub use batch::{BatchResult, RenderFailure, RenderedImage};
pub use input::Input;
pub use job::{
    BrandOverlay, GenerationMode, GenerationRequest, GenerationRequestBuilder, PackSize,
};
pub use media::MediaSource;
pub use message::{Message, MessageBuilder};
pub use output::Output;
pub use request::{
    GenerateRequest, GenerateRequestBuilder, GenerateResponse, GenerateResponseBuilder,
    Modality, ResponseFormat,
};
pub use role::Role;
pub use strategy::{ShotStrategy, placeholder_shot};
pub use task::{RenderContext, RenderTask};
