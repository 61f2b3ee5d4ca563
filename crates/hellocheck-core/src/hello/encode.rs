use bytes::{BufMut, BytesMut};

use crate::hello::types::{
    EXT_ALPN, EXT_SUPPORTED_VERSIONS, HANDSHAKE_CLIENT_HELLO, RECORD_TYPE_HANDSHAKE,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("{field} is {len} bytes, limit is {max}")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
    #[error("ALPN protocol names must be 1-255 bytes, got an empty name")]
    EmptyAlpnName,
}

/// A raw extension: type code plus opaque body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    pub extension_type: u16,
    pub data: Vec<u8>,
}

/// Writes a single-record ClientHello exactly as configured.
///
/// No policy is applied: duplicate suites, versions or ALPN names are
/// written as given, and extensions appear in the order they were added.
#[derive(Debug, Clone)]
pub struct ClientHelloBuilder {
    record_version: u16,
    client_version: u16,
    random: [u8; 32],
    session_id: Vec<u8>,
    cipher_suites: Vec<u16>,
    compression_methods: Vec<u8>,
    extensions: Vec<Extension>,
    // First sub-list that did not fit its length prefix; reported by build().
    invalid: Option<EncodeError>,
}

impl Default for ClientHelloBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientHelloBuilder {
    pub fn new() -> Self {
        Self {
            record_version: 0x0303,
            client_version: 0x0303,
            random: [0u8; 32],
            session_id: Vec::new(),
            cipher_suites: Vec::new(),
            compression_methods: vec![0x00],
            extensions: Vec::new(),
            invalid: None,
        }
    }

    pub fn record_version(&mut self, version: u16) -> &mut Self {
        self.record_version = version;
        self
    }

    pub fn client_version(&mut self, version: u16) -> &mut Self {
        self.client_version = version;
        self
    }

    pub fn random(&mut self, random: [u8; 32]) -> &mut Self {
        self.random = random;
        self
    }

    pub fn session_id(&mut self, id: &[u8]) -> &mut Self {
        self.session_id = id.to_vec();
        self
    }

    pub fn add_ciphers(&mut self, ids: &[u16]) -> &mut Self {
        self.cipher_suites.extend_from_slice(ids);
        self
    }

    pub fn compression_methods(&mut self, methods: &[u8]) -> &mut Self {
        self.compression_methods = methods.to_vec();
        self
    }

    pub fn add_extension(&mut self, extension_type: u16, data: Vec<u8>) -> &mut Self {
        self.extensions.push(Extension {
            extension_type,
            data,
        });
        self
    }

    /// Extension 0x002b, client form: u8 byte length then u16 versions.
    pub fn add_supported_versions(&mut self, versions: &[u16]) -> &mut Self {
        let list_len = versions.len() * 2;
        if let Err(e) = check_len("supported_versions list", list_len, u8::MAX as usize) {
            self.invalid.get_or_insert(e);
        }
        let mut data = BytesMut::with_capacity(1 + versions.len() * 2);
        data.put_u8((versions.len() * 2) as u8);
        for v in versions {
            data.put_u16(*v);
        }
        self.add_extension(EXT_SUPPORTED_VERSIONS, data.to_vec())
    }

    /// Extension 0x0010: u16 list length then u8-prefixed names.
    pub fn add_alpn<S: AsRef<str>>(&mut self, protocols: &[S]) -> &mut Self {
        if let Err(e) = check_alpn_names(protocols) {
            self.invalid.get_or_insert(e);
        }
        let list_len: usize = protocols.iter().map(|p| 1 + p.as_ref().len()).sum();
        let mut data = BytesMut::with_capacity(2 + list_len);
        data.put_u16(list_len as u16);
        for p in protocols {
            let p = p.as_ref().as_bytes();
            data.put_u8(p.len() as u8);
            data.put_slice(p);
        }
        self.add_extension(EXT_ALPN, data.to_vec())
    }

    /// Encode the record. Every length field, including the sub-list
    /// prefixes inside supported_versions and ALPN, is checked against its
    /// width; list contents are not.
    pub fn build(&self) -> Result<Vec<u8>, EncodeError> {
        self.check_lengths()?;

        let mut buf = BytesMut::new();

        // Record layer
        buf.put_u8(RECORD_TYPE_HANDSHAKE);
        buf.put_u16(self.record_version);
        let record_len_pos = buf.len();
        buf.put_u16(0);
        let record_start = buf.len();

        // Handshake header: type + u24 length
        buf.put_u8(HANDSHAKE_CLIENT_HELLO);
        let body_len_pos = buf.len();
        buf.put_slice(&[0, 0, 0]);
        let body_start = buf.len();

        buf.put_u16(self.client_version);
        buf.put_slice(&self.random);

        buf.put_u8(self.session_id.len() as u8);
        buf.put_slice(&self.session_id);

        buf.put_u16((self.cipher_suites.len() * 2) as u16);
        for cs in &self.cipher_suites {
            buf.put_u16(*cs);
        }

        buf.put_u8(self.compression_methods.len() as u8);
        buf.put_slice(&self.compression_methods);

        if !self.extensions.is_empty() {
            let ext_len: usize = self.extensions.iter().map(|e| 4 + e.data.len()).sum();
            buf.put_u16(ext_len as u16);
            for ext in &self.extensions {
                buf.put_u16(ext.extension_type);
                buf.put_u16(ext.data.len() as u16);
                buf.put_slice(&ext.data);
            }
        }

        let body_len = buf.len() - body_start;
        buf[body_len_pos..body_len_pos + 3].copy_from_slice(&(body_len as u32).to_be_bytes()[1..]);

        let record_len = buf.len() - record_start;
        buf[record_len_pos..record_len_pos + 2].copy_from_slice(&(record_len as u16).to_be_bytes());

        Ok(buf.to_vec())
    }

    fn check_lengths(&self) -> Result<(), EncodeError> {
        if let Some(e) = &self.invalid {
            return Err(e.clone());
        }
        check_len("session id", self.session_id.len(), u8::MAX as usize)?;
        check_len("cipher suite list", self.cipher_suites.len() * 2, 0xFFFE)?;
        check_len(
            "compression method list",
            self.compression_methods.len(),
            u8::MAX as usize,
        )?;
        for ext in &self.extensions {
            check_len("extension body", ext.data.len(), u16::MAX as usize)?;
        }
        let ext_total: usize = self.extensions.iter().map(|e| 4 + e.data.len()).sum();
        check_len("extension block", ext_total, u16::MAX as usize)?;

        let record_len = 4
            + 34
            + 1
            + self.session_id.len()
            + 2
            + self.cipher_suites.len() * 2
            + 1
            + self.compression_methods.len()
            + if self.extensions.is_empty() { 0 } else { 2 + ext_total };
        check_len("handshake record", record_len, u16::MAX as usize)
    }
}

fn check_len(field: &'static str, len: usize, max: usize) -> Result<(), EncodeError> {
    if len > max {
        return Err(EncodeError::TooLong { field, len, max });
    }
    Ok(())
}

/// Validate ALPN names before handing them to [`ClientHelloBuilder::add_alpn`].
pub fn check_alpn_names<S: AsRef<str>>(protocols: &[S]) -> Result<(), EncodeError> {
    for p in protocols {
        let len = p.as_ref().len();
        if len == 0 {
            return Err(EncodeError::EmptyAlpnName);
        }
        check_len("ALPN protocol name", len, u8::MAX as usize)?;
    }
    let list_len: usize = protocols.iter().map(|p| 1 + p.as_ref().len()).sum();
    check_len("ALPN list", list_len, u16::MAX as usize - 2)
}
