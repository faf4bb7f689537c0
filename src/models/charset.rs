//! 字符编码
//!
//! 文档在内存中总是 UTF-8；磁盘上的字节按配置的编码名解码/编码。
//! 配置缺失或编码名不受支持时静默回退到平台默认编码（UTF-8）。
//! 内置表之外的编码名交给 encoding_rs 的 WHATWG 标签表解析（windows-1252、GBK、Shift_JIS 等）。

use std::fmt;

use encoding_rs::{EncoderResult, Encoding};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Utf8,
    /// UTF-16 with byte-order detection on decode; big-endian with BOM on encode.
    Utf16,
    Utf16Be,
    Utf16Le,
    Iso8859_1,
    UsAscii,
    /// Any other label known to encoding_rs.
    Other(&'static Encoding),
}

pub const PLATFORM_DEFAULT: Charset = Charset::Utf8;

const REPLACEMENT_BYTE: u8 = b'?';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharsetError {
    Unsupported(String),
    Unconfigured,
}

impl fmt::Display for CharsetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharsetError::Unsupported(name) => write!(f, "Unsupported charset: {}", name),
            CharsetError::Unconfigured => write!(f, "No charset configured"),
        }
    }
}

impl std::error::Error for CharsetError {}

impl Charset {
    /// Look up a charset by canonical name or alias, ignoring case.
    pub fn for_name(name: &str) -> Result<Self, CharsetError> {
        let charset = match name.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" | "unicode-1-1-utf-8" => Charset::Utf8,
            "utf-16" | "utf16" | "utf_16" | "unicode" => Charset::Utf16,
            "utf-16be" | "utf16be" | "utf_16be" | "x-utf-16be" | "unicodebigunmarked" => {
                Charset::Utf16Be
            }
            "utf-16le" | "utf16le" | "utf_16le" | "x-utf-16le" | "unicodelittleunmarked" => {
                Charset::Utf16Le
            }
            "iso-8859-1" | "iso8859-1" | "iso8859_1" | "iso_8859_1" | "iso_8859-1" | "latin1"
            | "l1" | "8859_1" | "cp819" | "ibm819" | "iso-latin-1" => Charset::Iso8859_1,
            "us-ascii" | "ascii" | "ascii7" | "646" | "iso646-us" | "us" | "cp367" => {
                Charset::UsAscii
            }
            _ => return Self::for_label(name),
        };
        Ok(charset)
    }

    // encoding_rs folds iso-8859-1 and us-ascii into windows-1252, so those stay in the table above
    fn for_label(name: &str) -> Result<Self, CharsetError> {
        let unsupported = || CharsetError::Unsupported(name.to_string());
        let encoding = Encoding::for_label(name.trim().as_bytes()).ok_or_else(unsupported)?;
        let charset = if encoding == encoding_rs::UTF_8 {
            Charset::Utf8
        } else if encoding == encoding_rs::UTF_16BE {
            Charset::Utf16Be
        } else if encoding == encoding_rs::UTF_16LE {
            Charset::Utf16Le
        } else if encoding == encoding_rs::REPLACEMENT {
            return Err(unsupported());
        } else {
            Charset::Other(encoding)
        };
        Ok(charset)
    }

    pub fn name(self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::Utf16 => "UTF-16",
            Charset::Utf16Be => "UTF-16BE",
            Charset::Utf16Le => "UTF-16LE",
            Charset::Iso8859_1 => "ISO-8859-1",
            Charset::UsAscii => "US-ASCII",
            Charset::Other(encoding) => encoding.name(),
        }
    }

    /// Malformed input becomes U+FFFD.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Charset::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Charset::Utf16 => match bytes {
                [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes),
                [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes),
                _ => decode_utf16(bytes, u16::from_be_bytes),
            },
            Charset::Utf16Be => decode_utf16(bytes, u16::from_be_bytes),
            Charset::Utf16Le => decode_utf16(bytes, u16::from_le_bytes),
            Charset::Iso8859_1 => bytes.iter().map(|&b| char::from(b)).collect(),
            Charset::UsAscii => bytes
                .iter()
                .map(|&b| {
                    if b.is_ascii() {
                        char::from(b)
                    } else {
                        char::REPLACEMENT_CHARACTER
                    }
                })
                .collect(),
            Charset::Other(encoding) => encoding
                .decode_without_bom_handling(bytes)
                .0
                .into_owned(),
        }
    }

    /// Unmappable characters become `?`.
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Charset::Utf8 => text.as_bytes().to_vec(),
            Charset::Utf16 => {
                let mut out = vec![0xFE, 0xFF];
                out.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
                out
            }
            Charset::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
            Charset::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            Charset::Iso8859_1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).unwrap_or(REPLACEMENT_BYTE))
                .collect(),
            Charset::UsAscii => text
                .chars()
                .map(|c| {
                    if c.is_ascii() {
                        c as u8
                    } else {
                        REPLACEMENT_BYTE
                    }
                })
                .collect(),
            Charset::Other(encoding) => encode_with(encoding, text),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> String {
    let chunks = bytes.chunks_exact(2);
    let dangling = !chunks.remainder().is_empty();
    let units = chunks.map(|pair| unit([pair[0], pair[1]]));
    let mut text: String = char::decode_utf16(units)
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    if dangling {
        text.push(char::REPLACEMENT_CHARACTER);
    }
    text
}

fn encode_with(encoding: &'static Encoding, text: &str) -> Vec<u8> {
    let mut encoder = encoding.new_encoder();
    let mut out = Vec::with_capacity(text.len());
    let mut buf = [0u8; 1024];
    let mut src = text;
    loop {
        let (result, read, written) =
            encoder.encode_from_utf8_without_replacement(src, &mut buf, true);
        out.extend_from_slice(&buf[..written]);
        src = &src[read..];
        match result {
            EncoderResult::InputEmpty => return out,
            EncoderResult::OutputFull => {}
            EncoderResult::Unmappable(_) => out.push(REPLACEMENT_BYTE),
        }
    }
}

pub fn resolve(configured: Option<&str>) -> Result<Charset, CharsetError> {
    configured
        .ok_or(CharsetError::Unconfigured)
        .and_then(Charset::for_name)
}

/// Decode with the configured charset, or the platform default if it cannot be resolved.
pub fn decode_or_default(bytes: &[u8], configured: Option<&str>) -> String {
    match resolve(configured) {
        Ok(charset) => charset.decode(bytes),
        Err(err) => {
            tracing::debug!(error = %err, fallback = %PLATFORM_DEFAULT, "decode fallback");
            PLATFORM_DEFAULT.decode(bytes)
        }
    }
}

/// Encode with the configured charset, or the platform default if it cannot be resolved.
pub fn encode_or_default(text: &str, configured: Option<&str>) -> Vec<u8> {
    match resolve(configured) {
        Ok(charset) => charset.encode(text),
        Err(err) => {
            tracing::debug!(error = %err, fallback = %PLATFORM_DEFAULT, "encode fallback");
            PLATFORM_DEFAULT.encode(text)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/charset.rs"]
mod tests;
