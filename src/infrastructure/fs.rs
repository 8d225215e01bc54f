use tracing::debug;
use crate::domain::TraceError;
use crate::ports::BundleSource;

/// Reads bundles from the local filesystem. The file handle is released as
/// soon as the whole file has been read.
pub struct FsBundleSource;

impl FsBundleSource {
    pub fn new() -> Self { Self }
}

impl Default for FsBundleSource {
    fn default() -> Self { Self::new() }
}

impl BundleSource for FsBundleSource {
    fn read(&self, location: &str) -> Result<Vec<u8>, TraceError> {
        let bytes = std::fs::read(location)
            .map_err(|e| TraceError::input(format!("cannot read {}: {}", location, e)))?;
        debug!(path = location, bytes = bytes.len(), "read bundle");
        Ok(bytes)
    }
}
