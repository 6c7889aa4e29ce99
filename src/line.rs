//! Line framing codec for IRC streams.
//!
//! Splits inbound bytes on `\n`, strips the CR/LF terminator and checks
//! each line before handing it on. Outbound lines get `\r\n` appended.

use bytes::{BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use tracing::warn;

use crate::error::ProtocolError;

/// Longest line accepted from the server, terminator included.
pub const MAX_IRC_LINE_LEN: usize = 8191;

/// Whether `ch` may not appear inside an IRC line.
pub fn is_illegal_control_char(ch: char) -> bool {
    ch == '\0' || ch == '\r' || ch == '\n'
}

/// Codec turning a byte stream into IRC lines and back.
///
/// Lines that are too long, not UTF-8, or carry NUL are logged and
/// skipped; decoding carries on with the next line.
#[derive(Clone, Debug)]
pub struct LineCodec {
    max_len: usize,
    next_index: usize,
    discarding: bool,
}

impl LineCodec {
    /// A codec using [`MAX_IRC_LINE_LEN`].
    pub fn new() -> Self {
        Self::with_max_len(MAX_IRC_LINE_LEN)
    }

    /// A codec rejecting lines longer than `max_len` bytes.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            max_len,
            next_index: 0,
            discarding: false,
        }
    }

    fn validate(line: &str) -> Result<(), ProtocolError> {
        match line.chars().find(|&ch| is_illegal_control_char(ch)) {
            Some(ch) => Err(ProtocolError::IllegalControlChar(ch)),
            None => Ok(()),
        }
    }

    /// Turn one raw frame into a line without its terminator.
    pub fn check(&self, frame: &[u8]) -> Result<String, ProtocolError> {
        if frame.len() > self.max_len {
            return Err(ProtocolError::MessageTooLong(frame.len()));
        }
        let mut line = String::from_utf8(frame.to_vec())?;
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Self::validate(&line)?;
        Ok(line)
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<String>, ProtocolError> {
        loop {
            let Some(offset) = src[self.next_index..].iter().position(|&b| b == b'\n') else {
                if src.len() > self.max_len {
                    warn!(len = src.len(), "discarding overlong line");
                    src.clear();
                    self.next_index = 0;
                    self.discarding = true;
                } else {
                    self.next_index = src.len();
                }
                return Ok(None);
            };

            let end = self.next_index + offset;
            self.next_index = 0;
            let frame = src.split_to(end + 1);
            if std::mem::take(&mut self.discarding) {
                continue;
            }

            match self.check(&frame) {
                Ok(line) => return Ok(Some(line)),
                Err(e) => warn!(error = %e, "dropping unreadable line"),
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<String>, ProtocolError> {
        if let Some(line) = self.decode(src)? {
            return Ok(Some(line));
        }
        if src.is_empty() || std::mem::take(&mut self.discarding) {
            src.clear();
            return Ok(None);
        }

        self.next_index = 0;
        let rest = src.split_to(src.len());
        match self.check(&rest) {
            Ok(line) => Ok(Some(line)),
            Err(e) => {
                warn!(error = %e, "dropping unreadable line");
                Ok(None)
            }
        }
    }
}

impl Encoder<String> for LineCodec {
    type Error = ProtocolError;

    fn encode(&mut self, line: String, dst: &mut BytesMut) -> Result<(), ProtocolError> {
        Self::validate(&line)?;
        dst.reserve(line.len() + 2);
        dst.put_slice(line.as_bytes());
        dst.put_slice(b"\r\n");
        Ok(())
    }
}
