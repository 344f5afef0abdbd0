//! Argument definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use packshot_core::{
    AssetRole, BrandOverlay, GenerationMode, GenerationRequest, PackSize, SourceAsset,
};
use packshot_error::{BackendError, PackshotResult};
use std::path::{Path, PathBuf};

/// Generate marketing image packs from product photos.
#[derive(Parser, Debug)]
#[command(name = "packshot")]
#[command(about = "Generate marketing image packs from product photos", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one generation job and write the images to disk
    Generate(GenerateArgs),

    /// Print the resolved configuration
    ValidateConfig {
        /// Configuration file (defaults to ./packshot.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Visual focus of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Product-only shots
    Object,
    /// Product worn or held by a human model
    Model,
}

impl From<ModeArg> for GenerationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Object => GenerationMode::ObjectCentric,
            ModeArg::Model => GenerationMode::ModelCentric,
        }
    }
}

/// Arguments of `packshot generate`.
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Primary product image
    #[arg(long)]
    pub image: PathBuf,

    /// Additional views of the product
    #[arg(long)]
    pub secondary: Vec<PathBuf>,

    /// Human model reference image
    #[arg(long)]
    pub model_ref: Option<PathBuf>,

    /// Number of images: 5, 10 or 15
    #[arg(long)]
    pub pack_size: u32,

    /// Product category, e.g. "sneakers"
    #[arg(long)]
    pub category: String,

    /// Style or vibe, e.g. "minimal scandinavian"
    #[arg(long)]
    pub style: String,

    /// Object- or model-centric shots
    #[arg(long, value_enum, default_value = "object")]
    pub mode: ModeArg,

    /// Brand palette entry; repeat for several
    #[arg(long)]
    pub palette: Vec<String>,

    /// Brand tone of voice
    #[arg(long)]
    pub tone: Option<String>,

    /// Configuration file (defaults to ./packshot.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory the images are written to
    #[arg(long)]
    pub out: PathBuf,
}

impl GenerateArgs {
    /// Reads the asset files and builds a validated request.
    ///
    /// The pack size is checked before any file is touched.
    pub fn to_request(&self) -> PackshotResult<GenerationRequest> {
        let pack_size = PackSize::try_from(self.pack_size)?;

        let mut builder = GenerationRequest::builder();
        builder
            .mode(GenerationMode::from(self.mode))
            .primary(read_asset(&self.image, AssetRole::Primary)?)
            .secondary(
                self.secondary
                    .iter()
                    .map(|path| read_asset(path, AssetRole::Secondary))
                    .collect::<PackshotResult<Vec<_>>>()?,
            )
            .pack_size(pack_size)
            .category(self.category.as_str())
            .style(self.style.as_str());

        if let Some(path) = &self.model_ref {
            builder.model_reference(read_asset(path, AssetRole::ModelReference)?);
        }
        if !self.palette.is_empty() || self.tone.is_some() {
            builder.brand(BrandOverlay::new(self.palette.clone(), self.tone.clone()));
        }

        Ok(builder.build()?)
    }
}

/// Loads an image file, inferring the media type from its extension.
pub fn read_asset(path: &Path, role: AssetRole) -> PackshotResult<SourceAsset> {
    let bytes = std::fs::read(path).map_err(|e| {
        BackendError::new(format!("Failed to read {}: {}", path.display(), e))
    })?;
    Ok(SourceAsset::new(bytes, media_type_for(path), role))
}

/// Media type for a file extension. Unknown extensions are not images.
pub fn media_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("heic") => "image/heic",
        _ => "application/octet-stream",
    }
}
