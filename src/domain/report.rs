use super::{BundleKind, CertificateRecord};

/// One item of the report, in print order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEntry {
    Blank,
    Loaded { kind: BundleKind, count: usize, source: String },
    /// Position into [`TraceReport::records`].
    Certificate(usize),
}

/// Resolved records plus the order in which to print them.
#[derive(Debug, Clone, Default)]
pub struct TraceReport {
    pub records: Vec<CertificateRecord>,
    pub entries: Vec<ReportEntry>,
}

impl TraceReport {
    #[cfg(test)]
    pub(crate) fn record(&self, index: super::DisplayIndex) -> Option<&CertificateRecord> {
        self.records.iter().find(|r| r.display_index() == index)
    }

    pub fn resolved_count(&self) -> usize {
        self.records.iter().filter(|r| r.issuer_display_index().is_some()).count()
    }
}
