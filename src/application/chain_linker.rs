use tracing::{debug, info};
use crate::domain::*;
use crate::ports::{BundleSource, CertificateDecoder};

/// Loads the CA and chain bundles, indexes every Subject Key Identifier and
/// then links each certificate to its issuer through its Authority Key
/// Identifier.
pub struct ChainLinker<S, D>
where
    S: BundleSource,
    D: CertificateDecoder,
{
    source: S,
    decoder: D,
}

impl<S, D> ChainLinker<S, D>
where
    S: BundleSource,
    D: CertificateDecoder,
{
    pub fn new(source: S, decoder: D) -> Self {
        Self { source, decoder }
    }

    /// Both bundles are read before either is decoded, so an unreadable
    /// file fails the run before any certificate is parsed.
    pub fn execute(&self, chain: &str, ca: Option<&str>) -> Result<TraceReport, TraceError> {
        let ca_bundle = ca.map(|path| self.source.read(path).map(|bytes| (path, bytes))).transpose()?;
        let chain_bundle = self.source.read(chain)?;

        let ca_certs = match ca_bundle {
            Some((path, bytes)) => Some((path, self.decoder.decode(path, &bytes)?)),
            None => None,
        };
        let chain_certs = self.decoder.decode(chain, &chain_bundle)?;

        Ok(link(ca_certs, (chain, chain_certs)))
    }
}

/// Builds the report from already decoded bundles. The CA bundle, when
/// present, is ingested first so its certificates win SKI collisions.
pub fn link(
    ca: Option<(&str, Vec<DecodedCertificate>)>,
    chain: (&str, Vec<DecodedCertificate>),
) -> TraceReport {
    let mut report = TraceReport::default();
    let mut index = KeyIdentifierIndex::new();

    report.entries.push(ReportEntry::Blank);
    if let Some((source, certs)) = ca {
        ingest(&mut report, &mut index, BundleKind::Ca, source, certs);
    }
    let (source, certs) = chain;
    ingest(&mut report, &mut index, BundleKind::Chain, source, certs);

    resolve(&mut report.records, &index);
    info!(
        records = report.records.len(),
        indexed = index.len(),
        resolved = report.resolved_count(),
        "linked certificates"
    );
    report
}

fn ingest(
    report: &mut TraceReport,
    index: &mut KeyIdentifierIndex,
    kind: BundleKind,
    source: &str,
    certs: Vec<DecodedCertificate>,
) {
    info!(source, count = certs.len(), ?kind, "loaded bundle");
    report.entries.push(ReportEntry::Loaded { kind, count: certs.len(), source: source.to_string() });

    for (i, cert) in certs.into_iter().enumerate() {
        let record = CertificateRecord::new(DisplayIndex { kind, position: i + 1 }, cert);
        let slot = report.records.len();

        match record.subject_key_id() {
            Some(ski) if index.insert_if_absent(ski, slot) => {
                debug!(record = %record.display_index(), %ski, "indexed subject key identifier");
            }
            Some(ski) => {
                debug!(record = %record.display_index(), %ski, "duplicate subject key identifier, keeping earlier entry");
            }
            None => debug!(record = %record.display_index(), "no subject key identifier"),
        }

        report.records.push(record);
        report.entries.push(ReportEntry::Certificate(slot));
    }
}

/// Single pass over all records in ingestion order.
fn resolve(records: &mut [CertificateRecord], index: &KeyIdentifierIndex) {
    for i in 0..records.len() {
        let target = match records[i].authority_key_id() {
            Some(aki) => index.lookup(aki).ok_or_else(|| aki.to_hex()),
            None => continue,
        };

        match target {
            Ok(slot) => {
                let issuer = records[slot].display_index();
                records[i].set_issuer_index(issuer);
                debug!(record = %records[i].display_index(), %issuer, "resolved issuer");
            }
            Err(aki) => {
                debug!(record = %records[i].display_index(), %aki, "issuer not found in either bundle");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::domain::decoded;
    use super::*;

    struct MemorySource(HashMap<String, Vec<u8>>);

    impl BundleSource for MemorySource {
        fn read(&self, location: &str) -> Result<Vec<u8>, TraceError> {
            self.0.get(location).cloned().ok_or_else(|| TraceError::input(format!("cannot read {}", location)))
        }
    }

    struct StubDecoder(HashMap<String, Result<Vec<DecodedCertificate>, String>>);

    impl CertificateDecoder for StubDecoder {
        fn decode(&self, source: &str, _bundle: &[u8]) -> Result<Vec<DecodedCertificate>, TraceError> {
            match self.0.get(source) {
                Some(Ok(certs)) => Ok(certs.clone()),
                Some(Err(msg)) => Err(TraceError::parse(msg.clone())),
                None => Ok(Vec::new()),
            }
        }
    }

    fn linker(bundles: Vec<(&str, Result<Vec<DecodedCertificate>, String>)>) -> ChainLinker<MemorySource, StubDecoder> {
        let source = bundles.iter().map(|(name, _)| (name.to_string(), Vec::new())).collect();
        let decoder = bundles.into_iter().map(|(name, certs)| (name.to_string(), certs)).collect();
        ChainLinker::new(MemorySource(source), StubDecoder(decoder))
    }

    fn issuer_of(report: &TraceReport, index: DisplayIndex) -> Option<String> {
        report.record(index).and_then(|r| r.issuer_display_index()).map(|i| i.to_string())
    }

    #[test]
    fn self_signed_ca_and_leaf_resolve_to_ca() {
        let x: &[u8] = &[0xaa, 0xbb];
        let linker = linker(vec![
            ("ca.pem", Ok(vec![decoded("root", Some(x), Some(x))])),
            ("chain.pem", Ok(vec![decoded("leaf", Some(&[0x01]), Some(x))])),
        ]);
        let report = linker.execute("chain.pem", Some("ca.pem")).unwrap();

        assert_eq!(issuer_of(&report, DisplayIndex::ca(1)).as_deref(), Some("CA-1"));
        assert_eq!(issuer_of(&report, DisplayIndex::chain(1)).as_deref(), Some("CA-1"));
    }

    #[test]
    fn print_order_interleaves_count_lines() {
        let linker = linker(vec![
            ("ca.pem", Ok(vec![decoded("root", None, None)])),
            ("chain.pem", Ok(vec![decoded("a", None, None), decoded("b", None, None)])),
        ]);
        let report = linker.execute("chain.pem", Some("ca.pem")).unwrap();

        assert_eq!(report.entries, vec![
            ReportEntry::Blank,
            ReportEntry::Loaded { kind: BundleKind::Ca, count: 1, source: "ca.pem".into() },
            ReportEntry::Certificate(0),
            ReportEntry::Loaded { kind: BundleKind::Chain, count: 2, source: "chain.pem".into() },
            ReportEntry::Certificate(1),
            ReportEntry::Certificate(2),
        ]);
    }

    #[test]
    fn numbering_is_per_bundle_and_one_based() {
        let linker = linker(vec![
            ("ca.pem", Ok(vec![decoded("r1", None, None), decoded("r2", None, None)])),
            ("chain.pem", Ok(vec![decoded("a", None, None), decoded("b", None, None), decoded("c", None, None)])),
        ]);
        let report = linker.execute("chain.pem", Some("ca.pem")).unwrap();
        let labels: Vec<String> = report.records.iter().map(|r| r.display_index().to_string()).collect();
        assert_eq!(labels, ["CA-1", "CA-2", "1", "2", "3"]);
    }

    #[test]
    fn empty_ca_bundle_still_reports_zero() {
        let y: &[u8] = &[0x59];
        let linker = linker(vec![
            ("empty.pem", Ok(Vec::new())),
            ("chain.pem", Ok(vec![decoded("first", Some(y), None), decoded("second", None, Some(y))])),
        ]);
        let report = linker.execute("chain.pem", Some("empty.pem")).unwrap();

        assert_eq!(report.entries[1], ReportEntry::Loaded { kind: BundleKind::Ca, count: 0, source: "empty.pem".into() });
        assert_eq!(report.entries[2], ReportEntry::Loaded { kind: BundleKind::Chain, count: 2, source: "chain.pem".into() });
        assert_eq!(issuer_of(&report, DisplayIndex::chain(2)).as_deref(), Some("1"));
        assert_eq!(issuer_of(&report, DisplayIndex::chain(1)), None);
    }

    #[test]
    fn forward_reference_resolves_after_ingestion() {
        let x: &[u8] = &[0x10];
        let report = link(None, ("chain.pem", vec![
            decoded("leaf", None, Some(x)),
            decoded("issuer", Some(x), None),
        ]));
        assert_eq!(issuer_of(&report, DisplayIndex::chain(1)).as_deref(), Some("2"));
    }

    #[test]
    fn ca_resolves_against_chain_certificate() {
        let x: &[u8] = &[0x20];
        let report = link(
            Some(("ca.pem", vec![decoded("cross-signed", Some(&[0x21]), Some(x))])),
            ("chain.pem", vec![decoded("signer", Some(x), None)]),
        );
        assert_eq!(issuer_of(&report, DisplayIndex::ca(1)).as_deref(), Some("1"));
    }

    #[test]
    fn duplicate_ski_keeps_first_target() {
        let x: &[u8] = &[0x30];
        let report = link(
            Some(("ca.pem", vec![decoded("original", Some(x), None)])),
            ("chain.pem", vec![
                decoded("reissued", Some(x), None),
                decoded("again", Some(x), None),
                decoded("leaf", None, Some(x)),
            ]),
        );
        assert_eq!(issuer_of(&report, DisplayIndex::chain(3)).as_deref(), Some("CA-1"));
        assert_eq!(report.records.len(), 4);
    }

    #[test]
    fn certificate_without_ski_is_never_an_issuer() {
        let report = link(None, ("chain.pem", vec![
            decoded("no-ski", None, Some(&[0x40])),
            decoded("child", None, Some(&[0x40])),
        ]));
        assert_eq!(report.resolved_count(), 0);
    }

    #[test]
    fn resolved_count_covers_every_linked_record() {
        let x: &[u8] = &[0x50];
        let report = link(
            Some(("ca.pem", vec![decoded("root", Some(x), Some(x))])),
            ("chain.pem", vec![
                decoded("leaf", Some(&[0x51]), Some(x)),
                decoded("orphan", None, Some(&[0x52])),
                decoded("bare", None, None),
            ]),
        );
        assert_eq!(report.resolved_count(), 2);
    }

    #[test]
    fn unresolved_aki_leaves_issuer_blank() {
        let report = link(None, ("chain.pem", vec![decoded("orphan", Some(&[1]), Some(&[2]))]));
        assert_eq!(issuer_of(&report, DisplayIndex::chain(1)), None);
    }

    #[test]
    fn no_ca_bundle_has_no_ca_count_line() {
        let linker = linker(vec![("chain.pem", Ok(vec![decoded("a", None, None)]))]);
        let report = linker.execute("chain.pem", None).unwrap();
        assert_eq!(report.entries.len(), 3);
        assert!(!report.entries.iter().any(|e| matches!(e, ReportEntry::Loaded { kind: BundleKind::Ca, .. })));
    }

    #[test]
    fn unreadable_ca_fails_before_decoding() {
        let linker = linker(vec![("chain.pem", Err("chain.pem: block 1 is not a certificate".into()))]);
        let err = linker.execute("chain.pem", Some("missing.pem")).unwrap_err();
        assert_eq!(err.class, ErrorClass::Input);
    }

    #[test]
    fn decode_failure_aborts_the_run() {
        let linker = linker(vec![
            ("ca.pem", Ok(vec![decoded("root", None, None)])),
            ("chain.pem", Err("chain.pem: block 2 is not a certificate".into())),
        ]);
        let err = linker.execute("chain.pem", Some("ca.pem")).unwrap_err();
        assert_eq!(err.class, ErrorClass::Parse);
    }
}
