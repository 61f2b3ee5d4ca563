use crate::hello::clienthello::ParseError;

/// Read position over a borrowed buffer.
///
/// Every read states how many bytes it consumes and is checked against the
/// bytes remaining before anything is taken, so a short buffer surfaces as
/// `ParseError::Truncated` instead of a partial value.
#[derive(Debug, Clone)]
pub struct WireCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move to an absolute offset. Offsets past the end clamp to the end.
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos.min(self.buf.len());
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn has_remaining(&self) -> bool {
        self.remaining() > 0
    }

    pub fn read_u8(&mut self) -> Result<u8, ParseError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, ParseError> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32, ParseError> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], ParseError> {
        self.take(len)
    }

    pub fn skip(&mut self, len: usize) -> Result<(), ParseError> {
        self.take(len).map(|_| ())
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], ParseError> {
        if len > self.remaining() {
            return Err(ParseError::Truncated {
                offset: self.pos,
                needed: len,
                remaining: self.remaining(),
            });
        }
        let start = self.pos;
        self.pos += len;
        Ok(&self.buf[start..self.pos])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_big_endian() {
        let data = [0x16, 0x03, 0x01, 0x01, 0x00, 0x00, 0x2a];
        let mut cur = WireCursor::new(&data);
        assert_eq!(cur.read_u8().unwrap(), 0x16);
        assert_eq!(cur.read_u16().unwrap(), 0x0301);
        assert_eq!(cur.read_u32().unwrap(), 0x0100_002a);
        assert!(!cur.has_remaining());
    }

    #[test]
    fn short_read_is_an_error_and_does_not_advance() {
        let data = [0x00, 0x01, 0x02];
        let mut cur = WireCursor::new(&data);
        cur.skip(2).unwrap();
        let err = cur.read_u16().unwrap_err();
        assert!(matches!(
            err,
            ParseError::Truncated {
                offset: 2,
                needed: 2,
                remaining: 1
            }
        ));
        assert_eq!(cur.position(), 2);
        assert_eq!(cur.read_u8().unwrap(), 0x02);
    }

    #[test]
    fn read_bytes_borrows_from_buffer() {
        let data = b"\x02h2";
        let mut cur = WireCursor::new(data);
        let len = cur.read_u8().unwrap() as usize;
        assert_eq!(cur.read_bytes(len).unwrap(), b"h2");
    }

    #[test]
    fn set_position_clamps() {
        let data = [1, 2, 3];
        let mut cur = WireCursor::new(&data);
        cur.set_position(10);
        assert_eq!(cur.position(), 3);
        assert_eq!(cur.remaining(), 0);
        cur.set_position(1);
        assert_eq!(cur.read_u8().unwrap(), 2);
    }
}
