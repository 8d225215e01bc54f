use crate::domain::{DecodedCertificate, TraceError};

/// Splits a bundle into its certificates, preserving file order.
///
/// `source` only labels diagnostics. Any block that fails to decode fails
/// the whole bundle.
pub trait CertificateDecoder: Send + Sync {
    fn decode(&self, source: &str, bundle: &[u8]) -> Result<Vec<DecodedCertificate>, TraceError>;
}
