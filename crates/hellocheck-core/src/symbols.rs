//! Static id → name tables for the cipher suites and protocol versions a
//! ClientHello can carry.
//!
//! Both tables are closed: lookups never insert, and an id with no entry is
//! rendered as a placeholder that embeds the raw id so a later comparison
//! shows exactly which value was unexpected.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize};

/// A cipher suite identifier with its IANA name.
#[derive(Debug, Clone, Copy, Eq, Serialize)]
#[serde(into = "String")]
pub struct CipherSuite {
    pub id: u16,
    pub name: &'static str,
}

impl CipherSuite {
    pub const TLS_AES_256_GCM_SHA384: Self = Self::new(0x1302, "TLS_AES_256_GCM_SHA384");
    pub const TLS_AES_128_GCM_SHA256: Self = Self::new(0x1301, "TLS_AES_128_GCM_SHA256");
    pub const TLS_CHACHA20_POLY1305_SHA256: Self =
        Self::new(0x1303, "TLS_CHACHA20_POLY1305_SHA256");
    pub const TLS_DHE_RSA_WITH_AES_128_CBC_SHA: Self =
        Self::new(0x0033, "TLS_DHE_RSA_WITH_AES_128_CBC_SHA");
    pub const TLS_DHE_RSA_WITH_AES_128_CBC_SHA256: Self =
        Self::new(0x0067, "TLS_DHE_RSA_WITH_AES_128_CBC_SHA256");
    pub const TLS_DHE_RSA_WITH_AES_128_GCM_SHA256: Self =
        Self::new(0x009E, "TLS_DHE_RSA_WITH_AES_128_GCM_SHA256");
    pub const TLS_DHE_RSA_WITH_AES_256_CBC_SHA: Self =
        Self::new(0x0039, "TLS_DHE_RSA_WITH_AES_256_CBC_SHA");
    pub const TLS_DHE_RSA_WITH_AES_256_CBC_SHA256: Self =
        Self::new(0x006B, "TLS_DHE_RSA_WITH_AES_256_CBC_SHA256");
    pub const TLS_DHE_RSA_WITH_AES_256_GCM_SHA384: Self =
        Self::new(0x009F, "TLS_DHE_RSA_WITH_AES_256_GCM_SHA384");

    /// Every known suite, in table order.
    pub const ALL: &'static [Self] = &[
        Self::TLS_AES_256_GCM_SHA384,
        Self::TLS_AES_128_GCM_SHA256,
        Self::TLS_CHACHA20_POLY1305_SHA256,
        Self::TLS_DHE_RSA_WITH_AES_128_CBC_SHA,
        Self::TLS_DHE_RSA_WITH_AES_128_CBC_SHA256,
        Self::TLS_DHE_RSA_WITH_AES_128_GCM_SHA256,
        Self::TLS_DHE_RSA_WITH_AES_256_CBC_SHA,
        Self::TLS_DHE_RSA_WITH_AES_256_CBC_SHA256,
        Self::TLS_DHE_RSA_WITH_AES_256_GCM_SHA384,
    ];

    const fn new(id: u16, name: &'static str) -> Self {
        Self { id, name }
    }

    pub fn from_id(id: u16) -> Option<Self> {
        Self::ALL.iter().copied().find(|cs| cs.id == id)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|cs| cs.name == name)
    }

    /// Canonical name for `id`, or `UNKNOWN-CIPHER-SUITE(<id>)`.
    pub fn name_of(id: u16) -> String {
        match Self::from_id(id) {
            Some(cs) => cs.name.to_string(),
            None => format!("UNKNOWN-CIPHER-SUITE({})", id),
        }
    }

    pub fn names(suites: &[Self]) -> Vec<String> {
        suites.iter().map(|cs| cs.name.to_string()).collect()
    }

    pub fn ids(suites: &[Self]) -> Vec<u16> {
        suites.iter().map(|cs| cs.id).collect()
    }
}

/// A protocol version identifier with its JSSE-style name.
#[derive(Debug, Clone, Copy, Eq, Serialize)]
#[serde(into = "String")]
pub struct ProtocolVersion {
    pub id: u16,
    pub name: &'static str,
}

impl ProtocolVersion {
    pub const TLS13: Self = Self::new(0x0304, "TLSv1.3");
    pub const TLS12: Self = Self::new(0x0303, "TLSv1.2");
    pub const TLS11: Self = Self::new(0x0302, "TLSv1.1");
    pub const TLS10: Self = Self::new(0x0301, "TLSv1");
    pub const SSL30: Self = Self::new(0x0300, "SSLv3");
    /// Marker for the SSLv2-compatible hello format, not a real wire version.
    pub const SSL20_HELLO: Self = Self::new(0x0002, "SSLv2Hello");
    pub const DTLS12: Self = Self::new(0xFEFD, "DTLSv1.2");
    pub const DTLS10: Self = Self::new(0xFEFF, "DTLSv1.0");

    pub const ALL: &'static [Self] = &[
        Self::TLS13,
        Self::TLS12,
        Self::TLS11,
        Self::TLS10,
        Self::SSL30,
        Self::SSL20_HELLO,
        Self::DTLS12,
        Self::DTLS10,
    ];

    const fn new(id: u16, name: &'static str) -> Self {
        Self { id, name }
    }

    pub fn from_id(id: u16) -> Option<Self> {
        Self::ALL.iter().copied().find(|pv| pv.id == id)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|pv| pv.name == name)
    }

    /// Canonical name for `id`, or `UNKNOWN-PROTOCOL-VERSION(<id>)`.
    pub fn name_of(id: u16) -> String {
        match Self::from_id(id) {
            Some(pv) => pv.name.to_string(),
            None => format!("UNKNOWN-PROTOCOL-VERSION({})", id),
        }
    }

    pub fn names(versions: &[Self]) -> Vec<String> {
        versions.iter().map(|pv| pv.name.to_string()).collect()
    }

    pub fn ids(versions: &[Self]) -> Vec<u16> {
        versions.iter().map(|pv| pv.id).collect()
    }
}

/// Raised when a configured name has no table entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} name: {name:?}")]
pub struct UnknownSymbol {
    pub kind: &'static str,
    pub name: String,
}

// Identity is the numeric id; names are only for display.
impl PartialEq for CipherSuite {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Hash for CipherSuite {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialEq for ProtocolVersion {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Hash for ProtocolVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for CipherSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl TryFrom<String> for CipherSuite {
    type Error = UnknownSymbol;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::from_name(&name).ok_or(UnknownSymbol {
            kind: "cipher suite",
            name,
        })
    }
}

impl TryFrom<String> for ProtocolVersion {
    type Error = UnknownSymbol;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::from_name(&name).ok_or(UnknownSymbol {
            kind: "protocol version",
            name,
        })
    }
}

// Hand-written so the `&'static str` field is not treated as borrowed
// from the input.
impl<'de> Deserialize<'de> for CipherSuite {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        Self::try_from(String::deserialize(d)?).map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for ProtocolVersion {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        Self::try_from(String::deserialize(d)?).map_err(serde::de::Error::custom)
    }
}

impl From<CipherSuite> for String {
    fn from(cs: CipherSuite) -> Self {
        cs.name.to_string()
    }
}

impl From<ProtocolVersion> for String {
    fn from(pv: ProtocolVersion) -> Self {
        pv.name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_cipher_suite_names() {
        assert_eq!(CipherSuite::name_of(0x1302), "TLS_AES_256_GCM_SHA384");
        assert_eq!(
            CipherSuite::name_of(0x006B),
            "TLS_DHE_RSA_WITH_AES_256_CBC_SHA256"
        );
        assert_eq!(CipherSuite::ALL.len(), 9);
    }

    #[test]
    fn unknown_cipher_suite_embeds_id() {
        // 0xC02B is a real suite, just not in this table
        let name = CipherSuite::name_of(0xC02B);
        assert_eq!(name, "UNKNOWN-CIPHER-SUITE(49195)");
        assert!(name.contains(&0xC02Bu16.to_string()));
    }

    #[test]
    fn known_protocol_version_names() {
        assert_eq!(ProtocolVersion::name_of(0x0304), "TLSv1.3");
        assert_eq!(ProtocolVersion::name_of(0x0301), "TLSv1");
        assert_eq!(ProtocolVersion::name_of(0x0002), "SSLv2Hello");
        assert_eq!(ProtocolVersion::name_of(0xFEFF), "DTLSv1.0");
        assert_eq!(ProtocolVersion::ALL.len(), 8);
    }

    #[test]
    fn unknown_protocol_version_embeds_id() {
        assert_eq!(
            ProtocolVersion::name_of(0x7F1C),
            "UNKNOWN-PROTOCOL-VERSION(32540)"
        );
    }

    #[test]
    fn ids_are_unique() {
        for (i, a) in CipherSuite::ALL.iter().enumerate() {
            for b in &CipherSuite::ALL[i + 1..] {
                assert_ne!(a.id, b.id, "{} and {} share an id", a, b);
            }
        }
        for (i, a) in ProtocolVersion::ALL.iter().enumerate() {
            for b in &ProtocolVersion::ALL[i + 1..] {
                assert_ne!(a.id, b.id, "{} and {} share an id", a, b);
            }
        }
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(
            CipherSuite::from_name("TLS_CHACHA20_POLY1305_SHA256"),
            Some(CipherSuite::TLS_CHACHA20_POLY1305_SHA256)
        );
        assert_eq!(ProtocolVersion::from_name("DTLSv1.2"), Some(ProtocolVersion::DTLS12));
        assert_eq!(CipherSuite::from_name("TLS_NULL_WITH_NULL_NULL"), None);
    }

    #[test]
    fn names_and_ids_preserve_order() {
        let suites = [CipherSuite::TLS_AES_128_GCM_SHA256, CipherSuite::TLS_AES_256_GCM_SHA384];
        assert_eq!(CipherSuite::ids(&suites), vec![0x1301, 0x1302]);
        assert_eq!(
            CipherSuite::names(&suites),
            vec!["TLS_AES_128_GCM_SHA256", "TLS_AES_256_GCM_SHA384"]
        );
        let versions = [ProtocolVersion::TLS12, ProtocolVersion::TLS13];
        assert_eq!(ProtocolVersion::ids(&versions), vec![0x0303, 0x0304]);
    }

    #[test]
    fn serde_uses_names() {
        let json = serde_json::to_string(&vec![ProtocolVersion::TLS13, ProtocolVersion::SSL30]).unwrap();
        assert_eq!(json, r#"["TLSv1.3","SSLv3"]"#);

        let parsed: Vec<CipherSuite> =
            serde_json::from_str(r#"["TLS_AES_128_GCM_SHA256"]"#).unwrap();
        assert_eq!(parsed, vec![CipherSuite::TLS_AES_128_GCM_SHA256]);

        let err = serde_json::from_str::<Vec<CipherSuite>>(r#"["NOPE"]"#).unwrap_err();
        assert!(err.to_string().contains("NOPE"));
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Owner {
        suites: Vec<CipherSuite>,
        versions: Vec<ProtocolVersion>,
    }

    #[test]
    fn deserializes_inside_owned_struct() {
        // Read through an owned String so nothing can borrow from the input.
        let text = String::from(r#"{"suites":["TLS_AES_256_GCM_SHA384"],"versions":["SSLv2Hello"]}"#);
        let owner: Owner = serde_json::from_reader(text.as_bytes()).unwrap();
        drop(text);
        assert_eq!(owner.suites, vec![CipherSuite::TLS_AES_256_GCM_SHA384]);
        assert_eq!(owner.versions, vec![ProtocolVersion::SSL20_HELLO]);

        let err = serde_json::from_str::<Vec<ProtocolVersion>>(r#"["TLSv9"]"#).unwrap_err();
        assert!(err.to_string().contains("unknown protocol version name"));
    }
}
