//! Settings Sources
//!
//! Reading raw bytes off disk and turning them into structured settings.

use anyhow::Context;
use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;

/// Reads the whole backing file, either blocking or on the async runtime
#[async_trait]
pub trait FileReader: Send + Sync {
    /// Read the file on the calling thread
    fn read_sync(&self, path: &Path) -> std::io::Result<Vec<u8>>;

    /// Read the file without blocking the runtime
    async fn read_async(&self, path: &Path) -> std::io::Result<Vec<u8>>;
}

/// Filesystem-backed reader
#[derive(Debug, Default, Clone, Copy)]
pub struct FsReader;

#[async_trait]
impl FileReader for FsReader {
    fn read_sync(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    async fn read_async(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }
}

/// Parses raw bytes into a structured value
pub trait SettingsParser: Send + Sync {
    fn parse(&self, bytes: &[u8]) -> anyhow::Result<Value>;
}

/// JSON parser
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonParser;

impl SettingsParser for JsonParser {
    fn parse(&self, bytes: &[u8]) -> anyhow::Result<Value> {
        serde_json::from_slice(bytes).context("Invalid JSON")
    }
}
