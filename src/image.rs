//! Image descriptors.
//!
//! The pipeline decides *which* image a view shows and at what size; turning
//! that request into markup-ready data is delegated to an [`ImageBuilder`].

use serde::{Deserialize, Serialize};

/// What the pipeline asks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRequest {
    /// Image reference.
    pub src: String,
    /// Target width in pixels.
    pub width: u32,
    /// Target height in pixels.
    pub height: u32,
    /// Alternative text.
    pub alt: String,
    /// Style class for the rendered tag.
    pub class: Option<String>,
}

impl ImageRequest {
    /// Square image request.
    pub fn square(src: impl Into<String>, size: u32, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            width: size,
            height: size,
            alt: alt.into(),
            class: None,
        }
    }

    /// Attach a style class.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }
}

/// What the rendering layer gets. Not interpreted by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageDescriptor {
    /// Final image reference.
    pub src: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Alternative text.
    pub alt: String,
    /// Style class.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

/// Turns image requests into descriptors.
pub trait ImageBuilder: Send + Sync {
    /// Build a descriptor for the request.
    fn build(&self, request: ImageRequest) -> ImageDescriptor;
}

/// Passes every request through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticImageBuilder;

impl ImageBuilder for StaticImageBuilder {
    fn build(&self, request: ImageRequest) -> ImageDescriptor {
        ImageDescriptor {
            src: request.src,
            width: request.width,
            height: request.height,
            alt: request.alt,
            class: request.class,
        }
    }
}

/// Resolves relative image references against an asset base path.
///
/// Absolute URLs, root-relative paths and data URIs are left alone.
#[derive(Debug, Clone)]
pub struct PrefixedImageBuilder {
    base: String,
}

impl PrefixedImageBuilder {
    /// Create a builder for the given base (`/assets`, `https://cdn.example/img`).
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into().trim_end_matches('/').to_string() }
    }

    fn is_relative(src: &str) -> bool {
        !(src.starts_with('/') || src.starts_with("data:") || src.contains("://"))
    }
}

impl ImageBuilder for PrefixedImageBuilder {
    fn build(&self, request: ImageRequest) -> ImageDescriptor {
        let src = if Self::is_relative(&request.src) {
            format!("{}/{}", self.base, request.src.trim_start_matches("./"))
        } else {
            request.src
        };
        StaticImageBuilder.build(ImageRequest { src, ..request })
    }
}

impl std::fmt::Debug for dyn ImageBuilder + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ImageBuilder")
    }
}
