use std::fmt::{self, Write};

/// Raw bytes of a Subject or Authority Key Identifier.
///
/// Never empty: a zero-length identifier is treated as an absent extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyId(Vec<u8>);

impl KeyId {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Option<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() { None } else { Some(Self(bytes)) }
    }

    /// Lowercase, colon-separated byte pairs (`98:e2:8a`).
    pub fn to_hex(&self) -> String {
        let mut result = String::with_capacity(self.0.len() * 3);
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 { result.push(':'); }
            let _ = write!(&mut result, "{:02x}", byte);
        }
        result
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
