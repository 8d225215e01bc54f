mod cert;
mod error;
mod key_id;
mod key_index;
mod report;

pub use cert::{BundleKind, CertificateRecord, DecodedCertificate, DisplayIndex};
pub use error::{ErrorClass, TraceError};
pub use key_id::KeyId;
pub use key_index::KeyIdentifierIndex;
pub use report::{ReportEntry, TraceReport};

#[cfg(test)]
pub(crate) use cert::tests::decoded;
