use tracing::{debug, trace};

use crate::hello::cursor::WireCursor;
use crate::hello::types::{
    ExtractedHandshake, EXT_ALPN, EXT_SUPPORTED_VERSIONS, FIXED_HELLO_PREFIX_LEN,
    HANDSHAKE_CLIENT_HELLO, RECORD_TYPE_HANDSHAKE,
};
use crate::symbols::{CipherSuite, ProtocolVersion};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("not a TLS handshake record, type = {0}")]
    NotHandshake(u8),
    #[error("record is incomplete: record length = {record_len}, remaining = {remaining}")]
    IncompleteRecord { record_len: usize, remaining: usize },
    #[error("not a ClientHello message, type = {0}")]
    NotClientHello(u8),
    #[error("truncated at offset {offset}: need {needed} bytes, {remaining} remaining")]
    Truncated {
        offset: usize,
        needed: usize,
        remaining: usize,
    },
}

/// Parse a buffer holding one complete TLS record into the cipher suites,
/// supported versions and ALPN names it proposes.
///
/// The buffer must start at the record header.
pub fn parse_client_hello(raw: &[u8]) -> Result<ExtractedHandshake, ParseError> {
    decode(&mut WireCursor::new(raw))
}

/// Decode a ClientHello starting at the cursor's position.
///
/// On success the cursor is put back where it started, so the same bytes can
/// be read again by the caller. On failure the cursor is left at the point
/// the error was found and nothing is returned.
pub fn decode(cur: &mut WireCursor<'_>) -> Result<ExtractedHandshake, ParseError> {
    let start = cur.position();

    // Record header: type(1) version(2) length(2)
    let record_type = cur.read_u8()?;
    let _record_version = cur.read_u16()?;
    let record_len = cur.read_u16()? as usize;

    if record_type != RECORD_TYPE_HANDSHAKE {
        return Err(ParseError::NotHandshake(record_type));
    }
    if record_len > cur.remaining() {
        return Err(ParseError::IncompleteRecord {
            record_len,
            remaining: cur.remaining(),
        });
    }

    // Handshake header: type in the top byte, u24 body length below it
    let msg_hdr = cur.read_u32()?;
    let msg_type = (msg_hdr >> 24) as u8;
    let msg_len = msg_hdr & 0x00FF_FFFF;
    if msg_type != HANDSHAKE_CLIENT_HELLO {
        return Err(ParseError::NotClientHello(msg_type));
    }
    // The body length is informational; the extension loop below stops at
    // the end of the buffer rather than at this boundary.
    trace!(record_len, msg_len, "ClientHello header");

    cur.skip(FIXED_HELLO_PREFIX_LEN)?;

    let session_id_len = cur.read_u8()? as usize;
    if session_id_len != 0 {
        cur.skip(session_id_len)?;
    }

    let mut hello = ExtractedHandshake::default();

    let cipher_len = cur.read_u16()? as usize;
    for _ in (0..cipher_len).step_by(2) {
        hello.cipher_suites.push(CipherSuite::name_of(cur.read_u16()?));
    }

    let compression_len = cur.read_u8()? as usize;
    if compression_len != 0 {
        cur.skip(compression_len)?;
    }

    // A hello without extensions ends right after the compression methods.
    if cur.has_remaining() {
        let _extensions_len = cur.read_u16()?;
        while cur.has_remaining() {
            read_extension(cur, &mut hello)?;
        }
    }

    cur.set_position(start);
    Ok(hello)
}

fn read_extension(cur: &mut WireCursor<'_>, hello: &mut ExtractedHandshake) -> Result<(), ParseError> {
    let ext_type = cur.read_u16()?;
    let ext_len = cur.read_u16()? as usize;

    match ext_type {
        EXT_SUPPORTED_VERSIONS => {
            let list_len = cur.read_u8()? as usize;
            for _ in (0..list_len).step_by(2) {
                hello
                    .protocol_versions
                    .push(ProtocolVersion::name_of(cur.read_u16()?));
            }
        }
        EXT_ALPN => {
            let mut list_len = cur.read_u16()? as usize;
            while list_len > 0 {
                let name_len = cur.read_u8()? as usize;
                let name = cur.read_bytes(name_len)?;
                hello
                    .alpn_protocols
                    .push(String::from_utf8_lossy(name).into_owned());
                list_len = list_len.saturating_sub(1 + name_len);
            }
        }
        _ => {
            debug!(ext_type, ext_len, "skipping extension");
            cur.skip(ext_len)?;
        }
    }
    Ok(())
}
