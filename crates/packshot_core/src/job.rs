//! The externally supplied generation job.

use crate::{AssetRole, SourceAsset};
use packshot_error::{PipelineError, PipelineErrorKind};
use serde::{Deserialize, Serialize};

/// Which kind of visual the job produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GenerationMode {
    /// Product on its own: studio, flat-lay, lifestyle staging
    ObjectCentric,
    /// Product worn or held by a human model
    ModelCentric,
}

/// Number of images requested per job.
///
/// Only three sizes are sold, so anything else is rejected before work starts.
///
/// # Examples
///
/// ```
/// use packshot_core::PackSize;
///
/// assert_eq!(PackSize::try_from(10u32).unwrap(), PackSize::Medium);
/// assert!(PackSize::try_from(7u32).is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::EnumIter,
)]
#[serde(try_from = "u32", into = "u32")]
pub enum PackSize {
    /// Five images
    Small,
    /// Ten images
    Medium,
    /// Fifteen images
    Large,
}

impl PackSize {
    /// Number of images in the pack.
    pub fn count(self) -> usize {
        match self {
            PackSize::Small => 5,
            PackSize::Medium => 10,
            PackSize::Large => 15,
        }
    }
}

impl TryFrom<u32> for PackSize {
    type Error = PipelineError;

    #[track_caller]
    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            5 => Ok(PackSize::Small),
            10 => Ok(PackSize::Medium),
            15 => Ok(PackSize::Large),
            other => Err(PipelineError::new(PipelineErrorKind::UnsupportedPackSize(
                other,
            ))),
        }
    }
}

impl From<PackSize> for u32 {
    fn from(size: PackSize) -> Self {
        size.count() as u32
    }
}

impl std::fmt::Display for PackSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.count())
    }
}

/// Brand identity hints injected verbatim into render prompts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, derive_getters::Getters)]
pub struct BrandOverlay {
    /// Palette entries, e.g. `#0F4C81` or `sage green`
    palette: Vec<String>,
    /// Tone of voice / visual mood
    tone: Option<String>,
}

impl BrandOverlay {
    /// Creates an overlay from palette and tone.
    pub fn new(palette: Vec<String>, tone: Option<String>) -> Self {
        Self { palette, tone }
    }

    /// True when there is nothing to inject.
    pub fn is_empty(&self) -> bool {
        self.palette.is_empty() && self.tone.as_deref().is_none_or(str::is_empty)
    }
}

/// A validated, read-only generation job.
///
/// Build one with [`GenerationRequest::builder`]; `build()` rejects missing or
/// malformed assets. Deserialization runs the same checks.
///
/// # Examples
///
/// ```
/// use packshot_core::{AssetRole, GenerationMode, GenerationRequest, PackSize, SourceAsset};
///
/// let request = GenerationRequest::builder()
///     .mode(GenerationMode::ObjectCentric)
///     .primary(SourceAsset::new(vec![1], "image/png", AssetRole::Primary))
///     .pack_size(PackSize::Small)
///     .category("sneakers")
///     .style("streetwear")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.pack_size().count(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters, derive_builder::Builder)]
#[builder(build_fn(private, name = "fallible_build"))]
#[serde(try_from = "GenerationRequestData")]
pub struct GenerationRequest {
    /// Object- or model-centric output
    mode: GenerationMode,
    /// The subject of every render
    primary: SourceAsset,
    /// Extra views of the subject
    #[builder(default)]
    secondary: Vec<SourceAsset>,
    /// Human model reference for model-centric jobs
    #[builder(default, setter(strip_option))]
    model_reference: Option<SourceAsset>,
    /// Number of images to produce
    pack_size: PackSize,
    /// Product category label
    #[builder(setter(into))]
    category: String,
    /// Style / vibe label
    #[builder(setter(into))]
    style: String,
    /// Optional brand identity overlay
    #[builder(default, setter(strip_option))]
    brand: Option<BrandOverlay>,
}

/// Unchecked wire form of [`GenerationRequest`].
#[derive(Deserialize)]
struct GenerationRequestData {
    mode: GenerationMode,
    primary: SourceAsset,
    #[serde(default)]
    secondary: Vec<SourceAsset>,
    #[serde(default)]
    model_reference: Option<SourceAsset>,
    pack_size: PackSize,
    category: String,
    style: String,
    #[serde(default)]
    brand: Option<BrandOverlay>,
}

impl TryFrom<GenerationRequestData> for GenerationRequest {
    type Error = PipelineError;

    fn try_from(data: GenerationRequestData) -> Result<Self, Self::Error> {
        let request = Self {
            mode: data.mode,
            primary: data.primary,
            secondary: data.secondary,
            model_reference: data.model_reference,
            pack_size: data.pack_size,
            category: data.category,
            style: data.style,
            brand: data.brand,
        };
        request.validate()?;
        Ok(request)
    }
}

impl GenerationRequest {
    /// Returns a builder for constructing a GenerationRequest.
    pub fn builder() -> GenerationRequestBuilder {
        GenerationRequestBuilder::default()
    }

    /// Every asset in attachment order: primary, secondaries, model reference.
    pub fn assets(&self) -> impl Iterator<Item = &SourceAsset> {
        std::iter::once(&self.primary)
            .chain(self.secondary.iter())
            .chain(self.model_reference.iter())
    }

    fn validate(&self) -> Result<(), PipelineError> {
        self.primary.validate(AssetRole::Primary)?;
        for asset in &self.secondary {
            asset.validate(AssetRole::Secondary)?;
        }
        if let Some(reference) = &self.model_reference {
            reference.validate(AssetRole::ModelReference)?;
        }
        Ok(())
    }
}

impl GenerationRequestBuilder {
    /// Builds and validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineErrorKind::MissingPrimaryAsset`] when no primary asset
    /// was set, [`PipelineErrorKind::InvalidAsset`] for malformed assets, and
    /// [`PipelineErrorKind::Builder`] for any other missing field.
    pub fn build(&self) -> Result<GenerationRequest, PipelineError> {
        if self.primary.is_none() {
            return Err(PipelineError::new(PipelineErrorKind::MissingPrimaryAsset));
        }
        let request = self
            .fallible_build()
            .map_err(|e| PipelineError::new(PipelineErrorKind::Builder(e.to_string())))?;
        request.validate()?;
        tracing::debug!(
            mode = %request.mode,
            pack_size = %request.pack_size,
            secondary = request.secondary.len(),
            "Generation request accepted"
        );
        Ok(request)
    }
}
