//! Shared types used across the blockworld crates.

pub mod types;

pub use types::{AssetUri, AssetUriError, RENDER_TARGET_HANDLE_BASE, TextureHandle};
