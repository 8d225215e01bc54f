use std::fmt::Write;
use chrono::{DateTime, Utc};
use tracing::debug;
use x509_parser::objects::{oid2abbrev, oid_registry};
use x509_parser::pem::Pem;
use x509_parser::prelude::*;
use crate::domain::{DecodedCertificate, KeyId, TraceError};
use crate::ports::CertificateDecoder;

const CERTIFICATE_LABELS: [&str; 2] = ["CERTIFICATE", "TRUSTED CERTIFICATE"];

/// Decodes PEM bundles with x509-parser. Text outside BEGIN/END markers is
/// skipped; every block found must be a parseable certificate.
pub struct PemCertificateDecoder;

impl PemCertificateDecoder {
    pub fn new() -> Self { Self }
}

impl Default for PemCertificateDecoder {
    fn default() -> Self { Self::new() }
}

impl CertificateDecoder for PemCertificateDecoder {
    fn decode(&self, source: &str, bundle: &[u8]) -> Result<Vec<DecodedCertificate>, TraceError> {
        let mut certs = Vec::new();

        for (i, block) in Pem::iter_from_buffer(bundle).enumerate() {
            let block_no = i + 1;
            let pem = block.map_err(|e| TraceError::parse(format!("{}: PEM block {}: {}", source, block_no, e)))?;

            if !CERTIFICATE_LABELS.contains(&pem.label.as_str()) {
                return Err(TraceError::parse(format!(
                    "{}: PEM block {} is labelled '{}', expected a certificate", source, block_no, pem.label
                )));
            }

            let cert = parse_certificate(&pem.contents)
                .map_err(|e| TraceError::parse(format!("{}: PEM block {}: {}", source, block_no, e.message)))?;
            debug!(source, block = block_no, subject = %cert.subject, "decoded certificate");
            certs.push(cert);
        }

        Ok(certs)
    }
}

pub fn parse_certificate(der: &[u8]) -> Result<DecodedCertificate, TraceError> {
    let (_, cert) = X509Certificate::from_der(der)
        .map_err(|e| TraceError::parse(format!("failed to parse certificate: {}", e)))?;

    let mut subject_key_id = None;
    let mut authority_key_id = None;
    for ext in cert.extensions() {
        match ext.parsed_extension() {
            ParsedExtension::SubjectKeyIdentifier(ski) => subject_key_id = KeyId::new(ski.0),
            ParsedExtension::AuthorityKeyIdentifier(aki) => {
                authority_key_id = aki.key_identifier.as_ref().and_then(|id| KeyId::new(id.0));
            }
            _ => {}
        }
    }

    Ok(DecodedCertificate {
        subject: rfc4514_name(cert.subject()),
        issuer: rfc4514_name(cert.issuer()),
        not_before: asn1_to_utc(cert.validity().not_before)?,
        not_after: asn1_to_utc(cert.validity().not_after)?,
        subject_key_id,
        authority_key_id,
    })
}

fn asn1_to_utc(time: ASN1Time) -> Result<DateTime<Utc>, TraceError> {
    DateTime::from_timestamp(time.timestamp(), 0)
        .ok_or_else(|| TraceError::parse(format!("validity timestamp out of range: {}", time)))
}

/// RFC 4514 form: last RDN first, RDNs joined by `,`, multi-valued RDNs by `+`.
fn rfc4514_name(name: &X509Name) -> String {
    let rdns: Vec<String> = name.iter()
        .map(|rdn| rdn.iter().map(format_attribute).collect::<Vec<_>>().join("+"))
        .collect();
    rdns.into_iter().rev().collect::<Vec<_>>().join(",")
}

fn format_attribute(attr: &AttributeTypeAndValue) -> String {
    let key = oid2abbrev(attr.attr_type(), oid_registry())
        .map(|abbrev| abbrev.to_string())
        .unwrap_or_else(|_| attr.attr_type().to_id_string());

    match attr.as_str() {
        Ok(value) => format!("{}={}", key, escape_value(value)),
        Err(_) => {
            let mut hex = String::with_capacity(attr.attr_value().data.len() * 2);
            for byte in attr.attr_value().data.iter() {
                let _ = write!(&mut hex, "{:02x}", byte);
            }
            format!("{}=#{}", key, hex)
        }
    }
}

fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let last = value.chars().count().saturating_sub(1);

    for (i, c) in value.chars().enumerate() {
        let special = matches!(c, ',' | '+' | '"' | '\\' | '<' | '>' | ';')
            || (i == 0 && (c == '#' || c == ' '))
            || (i == last && c == ' ');
        if special { out.push('\\'); }
        out.push(c);
    }
    out
}
