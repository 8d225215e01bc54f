use crate::domain::TraceError;

/// Supplies the raw bytes of a PEM bundle, read to completion.
pub trait BundleSource: Send + Sync {
    fn read(&self, location: &str) -> Result<Vec<u8>, TraceError>;
}
