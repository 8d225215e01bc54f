use std::fmt;
use chrono::{DateTime, Utc};
use super::KeyId;

/// The fields of one decoded X.509 certificate that chain tracing needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCertificate {
    pub subject: String,
    pub issuer: String,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
    pub subject_key_id: Option<KeyId>,
    pub authority_key_id: Option<KeyId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BundleKind {
    Ca,
    Chain,
}

/// Report label of a certificate, numbered from 1 within its bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayIndex {
    pub kind: BundleKind,
    pub position: usize,
}

impl DisplayIndex {
    pub fn ca(position: usize) -> Self {
        Self { kind: BundleKind::Ca, position }
    }

    pub fn chain(position: usize) -> Self {
        Self { kind: BundleKind::Chain, position }
    }
}

impl fmt::Display for DisplayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            BundleKind::Ca => write!(f, "CA-{}", self.position),
            BundleKind::Chain => write!(f, "{}", self.position),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CertificateRecord {
    index: DisplayIndex,
    issuer_index: Option<DisplayIndex>,
    cert: DecodedCertificate,
}

impl CertificateRecord {
    pub fn new(index: DisplayIndex, cert: DecodedCertificate) -> Self {
        Self { index, issuer_index: None, cert }
    }

    pub fn display_index(&self) -> DisplayIndex { self.index }
    pub fn issuer_display_index(&self) -> Option<DisplayIndex> { self.issuer_index }
    pub fn subject_name(&self) -> &str { &self.cert.subject }
    pub fn issuer_name(&self) -> &str { &self.cert.issuer }
    pub fn not_before(&self) -> DateTime<Utc> { self.cert.not_before }
    pub fn not_after(&self) -> DateTime<Utc> { self.cert.not_after }
    pub fn subject_key_id(&self) -> Option<&KeyId> { self.cert.subject_key_id.as_ref() }
    pub fn authority_key_id(&self) -> Option<&KeyId> { self.cert.authority_key_id.as_ref() }

    /// Closed interval: both boundary instants count as valid.
    pub fn is_currently_valid(&self, now: DateTime<Utc>) -> bool {
        self.cert.not_before <= now && now <= self.cert.not_after
    }

    pub fn validity_label(&self, now: DateTime<Utc>) -> &'static str {
        if self.is_currently_valid(now) { "Valid:  " } else { "INVALID:" }
    }

    /// Records the resolved issuer. Only the first call has any effect.
    pub(crate) fn set_issuer_index(&mut self, issuer: DisplayIndex) -> bool {
        if self.issuer_index.is_some() {
            return false;
        }
        self.issuer_index = Some(issuer);
        true
    }
}
