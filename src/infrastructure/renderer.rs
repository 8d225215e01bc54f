use chrono::{DateTime, Utc};
use crate::domain::{BundleKind, CertificateRecord, KeyId, ReportEntry, TraceReport};
use crate::ports::Renderer;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";

/// Column-aligned text report, one block per certificate.
pub struct TextRenderer;

impl TextRenderer {
    pub fn new() -> Self { Self }
}

impl Default for TextRenderer {
    fn default() -> Self { Self::new() }
}

impl Renderer for TextRenderer {
    fn render(&self, report: &TraceReport, now: DateTime<Utc>) -> String {
        let mut out = String::new();

        for entry in &report.entries {
            match entry {
                ReportEntry::Blank => out.push('\n'),
                ReportEntry::Loaded { kind: BundleKind::Ca, count, source } => {
                    out.push_str(&format!("CA - loaded {} certificates from {}\n", count, source));
                }
                ReportEntry::Loaded { kind: BundleKind::Chain, count, source } => {
                    out.push_str(&format!("loaded {} certificates from {}\n", count, source));
                }
                ReportEntry::Certificate(slot) => {
                    if let Some(record) = report.records.get(*slot) {
                        render_record(&mut out, record, now);
                    }
                }
            }
        }

        out
    }
}

fn render_record(out: &mut String, record: &CertificateRecord, now: DateTime<Utc>) {
    out.push_str("------\n");
    out.push_str(&format!("{:>5}: Subject:  {}\n", record.display_index().to_string(), record.subject_name()));
    out.push_str(&format!(
        "       {}  {} <-> {}\n",
        record.validity_label(now),
        record.not_before().format(TIMESTAMP_FORMAT),
        record.not_after().format(TIMESTAMP_FORMAT),
    ));
    out.push_str(&format!(
        "       Subject Key Identifier:        {}\n",
        record.subject_key_id().map(KeyId::to_hex).unwrap_or_default()
    ));
    out.push_str(&format!("       Issuer:   {}\n", record.issuer_name()));

    if let Some(aki) = record.authority_key_id() {
        let issuer = record.issuer_display_index().map(|i| format!("({})", i)).unwrap_or_default();
        out.push_str(&format!("{:>6} Authority Key Identifier:      {}\n", issuer, aki));
    }
    out.push('\n');
}
