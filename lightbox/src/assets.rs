//! The abstract load capability.
//!
//! Fetching and decoding are external collaborators. The contract that
//! matters here: image loads never reject. A missing image leaves its
//! consumer pending indefinitely and the display degrades silently; only
//! the content manifest can fail to decode, and even that failure is
//! tolerated upstream.

use crate::errors::LightboxError;
use crate::model::Manifest;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

/// A fetched and decoded image resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// The path the asset was requested under.
    pub path: String,
    /// Intrinsic width in pixels.
    pub width: u32,
    /// Intrinsic height in pixels.
    pub height: u32,
}

impl Asset {
    /// Intrinsic aspect ratio (width over height).
    #[must_use]
    pub fn aspect(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// Resolves asset paths into decoded resources.
#[async_trait]
pub trait AssetLoader: Send + Sync {
    /// Resolves one image asset. Never rejects; for a missing image the
    /// future may pend indefinitely.
    async fn load_asset(&self, path: &str) -> Asset;

    /// Warms a batch of image assets, resolving once every fetch has
    /// settled (missing images count as settled).
    async fn load_assets(&self, paths: &[String]);

    /// Fetches and decodes the content manifest.
    async fn load_manifest(&self, url: &str) -> Result<Manifest, LightboxError>;

    /// Warms the given font families, resolving when they are usable.
    async fn load_fonts(&self, families: &[String]);
}

/// Fixture-backed [`AssetLoader`].
///
/// Known paths resolve with their registered dimensions after the
/// configured latency. Unknown paths pend forever unless a fallback
/// dimension is set, which is exactly the degraded-display behavior the
/// design tolerates.
#[derive(Debug, Default)]
pub struct StaticAssets {
    dimensions: Mutex<HashMap<String, (u32, u32)>>,
    fallback: Option<(u32, u32)>,
    manifest: Option<Manifest>,
    latency: Duration,
}

impl StaticAssets {
    /// Creates an empty fixture loader. Every image load pends forever.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers intrinsic dimensions for a path.
    #[must_use]
    pub fn with_image(self, path: impl Into<String>, width: u32, height: u32) -> Self {
        self.dimensions.lock().insert(path.into(), (width, height));
        self
    }

    /// Sets dimensions returned for any path without an explicit entry.
    #[must_use]
    pub fn with_fallback(mut self, width: u32, height: u32) -> Self {
        self.fallback = Some((width, height));
        self
    }

    /// Sets the manifest fixture returned by [`AssetLoader::load_manifest`].
    #[must_use]
    pub fn with_manifest(mut self, manifest: Manifest) -> Self {
        self.manifest = Some(manifest);
        self
    }

    /// Sets the simulated fetch latency.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn lookup(&self, path: &str) -> Option<(u32, u32)> {
        self.dimensions.lock().get(path).copied().or(self.fallback)
    }
}

#[async_trait]
impl AssetLoader for StaticAssets {
    async fn load_asset(&self, path: &str) -> Asset {
        let Some((width, height)) = self.lookup(path) else {
            tracing::debug!(path, "asset unavailable; leaving load pending");
            return std::future::pending().await;
        };

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        Asset {
            path: path.to_string(),
            width,
            height,
        }
    }

    async fn load_assets(&self, paths: &[String]) {
        // Batch warmup settles for unknown paths too; only individual
        // loads are allowed to pend.
        if !self.latency.is_zero() && !paths.is_empty() {
            tokio::time::sleep(self.latency).await;
        }
        tracing::debug!(count = paths.len(), "asset batch settled");
    }

    async fn load_manifest(&self, url: &str) -> Result<Manifest, LightboxError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.manifest
            .clone()
            .ok_or_else(|| LightboxError::Manifest(format!("no manifest fixture for {url}")))
    }

    async fn load_fonts(&self, families: &[String]) {
        if !self.latency.is_zero() && !families.is_empty() {
            tokio::time::sleep(self.latency).await;
        }
    }
}
