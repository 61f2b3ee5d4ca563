use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::hello::dedup::{dedup, has_duplicates};
use crate::hello::encode::{check_alpn_names, ClientHelloBuilder, EncodeError};
use crate::symbols::{CipherSuite, ProtocolVersion};

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("scenario parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid scenario: {0}")]
    Invalid(#[from] EncodeError),
}

/// The candidate lists a client was configured with, plus the protocol
/// version list the handshake engine is documented to send for them.
///
/// Candidate lists may contain duplicates. Cipher suite and ALPN
/// expectations are derived from them; the version expectation is taken
/// as given because ordering and pruning of versions belong to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub cipher_suites: Vec<CipherSuite>,
    pub protocol_versions: Vec<ProtocolVersion>,
    pub alpn_protocols: Vec<String>,
    pub expected_protocol_versions: Vec<ProtocolVersion>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self::reference()
    }
}

impl Scenario {
    /// Candidate lists with trailing repeats in every list.
    pub fn reference() -> Self {
        use CipherSuite as CS;
        use ProtocolVersion as PV;

        Self {
            cipher_suites: vec![
                CS::TLS_AES_256_GCM_SHA384,
                CS::TLS_AES_128_GCM_SHA256,
                CS::TLS_CHACHA20_POLY1305_SHA256,
                CS::TLS_DHE_RSA_WITH_AES_128_CBC_SHA,
                CS::TLS_DHE_RSA_WITH_AES_128_CBC_SHA256,
                CS::TLS_DHE_RSA_WITH_AES_128_GCM_SHA256,
                CS::TLS_DHE_RSA_WITH_AES_256_CBC_SHA,
                CS::TLS_DHE_RSA_WITH_AES_256_CBC_SHA256,
                CS::TLS_DHE_RSA_WITH_AES_256_GCM_SHA384,
                CS::TLS_DHE_RSA_WITH_AES_256_CBC_SHA256,
                CS::TLS_DHE_RSA_WITH_AES_256_CBC_SHA256,
                CS::TLS_DHE_RSA_WITH_AES_256_CBC_SHA256,
            ],
            protocol_versions: vec![
                PV::TLS11,
                PV::SSL20_HELLO,
                PV::DTLS12,
                PV::TLS13,
                PV::DTLS10,
                PV::TLS12,
                PV::SSL30,
                PV::TLS10,
                PV::TLS13,
                PV::TLS13,
                PV::TLS13,
            ],
            alpn_protocols: [
                "http/1.1",
                "spdy/2",
                "spdy/3",
                "stun.turn",
                "stun.nat-discovery",
                "h2c",
                "c-webrtc",
                "sunrpc",
                "irc",
                "http/1.1",
                "http/1.1",
                "http/1.1",
                "http/1.1",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            // Deprecated versions dropped, remainder newest first.
            expected_protocol_versions: vec![PV::TLS13, PV::TLS12, PV::SSL20_HELLO, PV::DTLS12, PV::DTLS10],
        }
    }

    /// Load a scenario from a JSON file. Symbols are given by name.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let file = std::fs::File::open(path).map_err(|source| ScenarioError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let scenario: Scenario = serde_json::from_reader(BufReader::new(file))?;
        check_alpn_names(&scenario.alpn_protocols)?;
        info!(
            "scenario {}: {} suites, {} versions, {} ALPN names",
            path.display(),
            scenario.cipher_suites.len(),
            scenario.protocol_versions.len(),
            scenario.alpn_protocols.len()
        );
        if !scenario.has_duplicates() {
            warn!(
                "scenario {} has no duplicate candidates; a naive engine will pass it",
                path.display()
            );
        }
        Ok(scenario)
    }

    pub fn to_json_pretty(&self) -> Result<String, ScenarioError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn expected_cipher_suites(&self) -> Vec<String> {
        CipherSuite::names(&dedup(&self.cipher_suites))
    }

    pub fn expected_alpn(&self) -> Vec<String> {
        dedup(&self.alpn_protocols)
    }

    pub fn expected_protocol_versions(&self) -> Vec<String> {
        ProtocolVersion::names(&self.expected_protocol_versions)
    }

    /// Whether any candidate list actually exercises duplicate handling.
    pub fn has_duplicates(&self) -> bool {
        has_duplicates(&self.cipher_suites)
            || has_duplicates(&self.protocol_versions)
            || has_duplicates(&self.alpn_protocols)
    }

    /// The ClientHello a conforming engine sends for this scenario.
    pub fn conformant_hello(&self) -> Result<Vec<u8>, EncodeError> {
        let mut builder = self.base_builder();
        builder
            .add_ciphers(&CipherSuite::ids(&dedup(&self.cipher_suites)))
            .add_supported_versions(&ProtocolVersion::ids(&self.expected_protocol_versions))
            .add_alpn(&self.expected_alpn());
        builder.build()
    }

    /// The ClientHello an engine that ignores duplicates would send.
    pub fn naive_hello(&self) -> Result<Vec<u8>, EncodeError> {
        let mut builder = self.base_builder();
        builder
            .add_ciphers(&CipherSuite::ids(&self.cipher_suites))
            .add_supported_versions(&ProtocolVersion::ids(&self.protocol_versions))
            .add_alpn(&self.alpn_protocols);
        builder.build()
    }

    fn base_builder(&self) -> ClientHelloBuilder {
        let mut builder = ClientHelloBuilder::new();
        builder
            .record_version(0x0301)
            .session_id(&[0x5A; 32])
            // server_name for "localhost"
            .add_extension(0x0000, b"\x00\x0c\x00\x00\x09localhost".to_vec())
            // supported_groups: x25519, secp256r1
            .add_extension(0x000a, vec![0x00, 0x04, 0x00, 0x1d, 0x00, 0x17]);
        builder
    }
}
