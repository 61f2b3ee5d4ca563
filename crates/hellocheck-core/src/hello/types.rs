use serde::Serialize;

/// The three negotiable lists pulled out of one ClientHello.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedHandshake {
    /// Cipher suite names in wire order
    pub cipher_suites: Vec<String>,
    /// Protocol version names from `supported_versions` (extension 0x002b)
    pub protocol_versions: Vec<String>,
    /// ALPN protocol tokens (extension 0x0010)
    pub alpn_protocols: Vec<String>,
}

/// TLS record content type for handshake messages.
pub const RECORD_TYPE_HANDSHAKE: u8 = 22;
/// Handshake message type for ClientHello.
pub const HANDSHAKE_CLIENT_HELLO: u8 = 1;
/// Extension type: supported_versions (RFC 8446).
pub const EXT_SUPPORTED_VERSIONS: u16 = 43;
/// Extension type: application_layer_protocol_negotiation (RFC 7301).
pub const EXT_ALPN: u16 = 16;
/// Client version (2) plus client random (32).
pub const FIXED_HELLO_PREFIX_LEN: usize = 34;
