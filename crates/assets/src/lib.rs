//! Texture registry.
//!
//! Textures are addressed by [`AssetUri`] (`engine:terrain`, ...). Each
//! registered texture gets a GPU [`TextureHandle`]; textures whose pixel data
//! hash to the same digest share one handle, so aliases cost nothing.
//!
//! # Layout
//! The registry can be persisted to disk as a JSON manifest (metadata and
//! digests only, never pixel data).

use blockworld_common::{AssetUri, AssetUriError, RENDER_TARGET_HANDLE_BASE, TextureHandle};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::Path;

/// Pixel layout of a texture upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextureFormat {
    Rgba8,
    Rgb8,
    R8,
}

impl TextureFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgba8 => 4,
            Self::Rgb8 => 3,
            Self::R8 => 1,
        }
    }
}

/// Metadata for a registered texture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureInfo {
    pub handle: TextureHandle,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    /// Hex SHA-256 of the pixel data.
    pub digest: String,
}

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Uri(#[from] AssetUriError),
    #[error("texture {uri} expects {expected} bytes of pixel data, got {actual}")]
    SizeMismatch {
        uri: AssetUri,
        expected: usize,
        actual: usize,
    },
    #[error("texture not found: {0}")]
    NotFound(AssetUri),
    #[error("texture handles exhausted: limit is {limit}")]
    HandlesExhausted { limit: u32 },
}

/// Texture registry keyed by asset URI.
///
/// Handles stay below [`RENDER_TARGET_HANDLE_BASE`]; the names above it
/// belong to framebuffer attachments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextureStore {
    textures: BTreeMap<AssetUri, TextureInfo>,
    by_digest: BTreeMap<String, TextureHandle>,
    next_handle: u32,
    #[serde(default = "default_handle_limit")]
    handle_limit: u32,
}

fn default_handle_limit() -> u32 {
    RENDER_TARGET_HANDLE_BASE
}

impl Default for TextureStore {
    fn default() -> Self {
        Self::with_handle_limit(RENDER_TARGET_HANDLE_BASE)
    }
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose handles stay strictly below `limit`.
    pub fn with_handle_limit(limit: u32) -> Self {
        Self {
            textures: BTreeMap::new(),
            by_digest: BTreeMap::new(),
            next_handle: 0,
            handle_limit: limit,
        }
    }

    /// Register a texture and return its handle.
    ///
    /// Re-registering a URI replaces its entry. Pixel data identical to an
    /// already registered texture reuses that texture's handle.
    pub fn register(
        &mut self,
        uri: AssetUri,
        width: u32,
        height: u32,
        format: TextureFormat,
        pixels: &[u8],
    ) -> Result<TextureHandle, AssetError> {
        let expected = width as usize * height as usize * format.bytes_per_pixel();
        if pixels.len() != expected {
            return Err(AssetError::SizeMismatch {
                uri,
                expected,
                actual: pixels.len(),
            });
        }

        let digest = content_digest(width, height, format, pixels);
        let handle = match self.by_digest.get(&digest) {
            Some(handle) => *handle,
            None => {
                // Handle 0 is reserved: GL treats it as "no texture".
                if self.next_handle + 1 >= self.handle_limit {
                    return Err(AssetError::HandlesExhausted {
                        limit: self.handle_limit,
                    });
                }
                self.next_handle += 1;
                let handle = TextureHandle(self.next_handle);
                self.by_digest.insert(digest.clone(), handle);
                handle
            }
        };

        tracing::debug!(%uri, %handle, width, height, "registered texture");
        self.textures.insert(
            uri,
            TextureInfo {
                handle,
                width,
                height,
                format,
                digest,
            },
        );
        Ok(handle)
    }

    /// Register a 1x1 RGBA texture of a single colour.
    pub fn register_solid(
        &mut self,
        uri: &str,
        rgba: [u8; 4],
    ) -> Result<TextureHandle, AssetError> {
        self.register(uri.parse()?, 1, 1, TextureFormat::Rgba8, &rgba)
    }

    pub fn texture(&self, uri: &AssetUri) -> Option<TextureHandle> {
        self.textures.get(uri).map(|info| info.handle)
    }

    /// Look up a texture handle by URI string. Malformed URIs resolve to `None`.
    pub fn lookup(&self, uri: &str) -> Option<TextureHandle> {
        let uri: AssetUri = uri.parse().ok()?;
        self.texture(&uri)
    }

    pub fn info(&self, uri: &AssetUri) -> Option<&TextureInfo> {
        self.textures.get(uri)
    }

    /// Remove a texture. The handle stays reserved for any alias still using it.
    pub fn remove(&mut self, uri: &AssetUri) -> Result<TextureInfo, AssetError> {
        let info = self
            .textures
            .remove(uri)
            .ok_or_else(|| AssetError::NotFound(uri.clone()))?;
        if !self.textures.values().any(|t| t.digest == info.digest) {
            self.by_digest.remove(&info.digest);
        }
        Ok(info)
    }

    pub fn uris(&self) -> impl Iterator<Item = &AssetUri> {
        self.textures.keys()
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Save the registry manifest to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), AssetError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load a registry manifest from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let file = std::fs::File::open(path)?;
        let store: Self = serde_json::from_reader(file)?;
        Ok(store)
    }
}

fn content_digest(width: u32, height: u32, format: TextureFormat, pixels: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(width.to_le_bytes());
    hasher.update(height.to_le_bytes());
    hasher.update([format.bytes_per_pixel() as u8]);
    hasher.update(pixels);
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

pub fn crate_info() -> &'static str {
    "blockworld-assets v0.1.0"
}
