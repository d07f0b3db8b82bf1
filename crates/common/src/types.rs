use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// First texture name reserved for render-target attachments.
///
/// Asset textures are numbered below this, framebuffer attachments from it
/// upward, so the two allocators never hand out the same name.
pub const RENDER_TARGET_HANDLE_BASE: u32 = 0x1_0000;

/// Opaque GPU texture name, as handed out by the graphics API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TextureHandle(pub u32);

impl fmt::Display for TextureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tex#{}", self.0)
    }
}

/// Errors from parsing an [`AssetUri`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssetUriError {
    #[error("asset uri `{0}` is missing the `module:name` separator")]
    MissingSeparator(String),
    #[error("asset uri `{0}` has an empty module or name")]
    EmptyPart(String),
}

/// A `module:name` asset address such as `engine:terrain`.
///
/// Comparison is case-insensitive; both parts are stored lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetUri {
    module: String,
    name: String,
}

impl AssetUri {
    pub fn new(module: &str, name: &str) -> Result<Self, AssetUriError> {
        if module.is_empty() || name.is_empty() {
            return Err(AssetUriError::EmptyPart(format!("{module}:{name}")));
        }
        Ok(Self {
            module: module.to_ascii_lowercase(),
            name: name.to_ascii_lowercase(),
        })
    }

    /// Address in the built-in `engine` module, for names known at compile time.
    pub fn engine(name: &str) -> Self {
        debug_assert!(!name.is_empty());
        Self {
            module: "engine".to_string(),
            name: name.to_ascii_lowercase(),
        }
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for AssetUri {
    type Err = AssetUriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (module, name) = s
            .split_once(':')
            .ok_or_else(|| AssetUriError::MissingSeparator(s.to_string()))?;
        Self::new(module.trim(), name.trim())
    }
}

impl TryFrom<String> for AssetUri {
    type Error = AssetUriError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AssetUri> for String {
    fn from(uri: AssetUri) -> Self {
        uri.to_string()
    }
}

impl fmt::Display for AssetUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.module, self.name)
    }
}
