//! # Multiaddr
//!
//! A multiaddr is an ordered stack of protocol segments held in one immutable
//! byte buffer.
//!
//! ## Wire Format
//! ```text
//! segment*   where   segment = [code(1)] [value(size / 8)]
//! ```
//! There is no length prefix; the width of each value is implied by the
//! protocol code that precedes it.
//!
//! ## Text Format
//! ```text
//! /ip4/127.0.0.1/tcp/4001
//! /ip4/1.2.3.4/udp/5000/utp
//! ```
//!
//! Construction from bytes never validates. Every walk over the buffer
//! (`format`, `segments`, `iter`) checks bounds before each slice and reports
//! malformed input as a typed error.

use crate::core::codec::{StandardTranscoder, Transcoder};
use crate::core::protocol::{self, Protocol};
use crate::error::{constants, MultiaddrError, Result};
use bytes::{BufMut, Bytes, BytesMut};
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::ser::{Error as _, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// A self-describing network address.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Multiaddr {
    bytes: Bytes,
}

/// One `[code][value]` unit of a multiaddr buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub protocol: Protocol,
    pub value: &'a [u8],
}

impl Segment<'_> {
    /// Encoded length of this segment, code byte included.
    pub fn encoded_len(&self) -> usize {
        1 + self.value.len()
    }
}

/// Iterator over the segments of a buffer.
///
/// Yields `Err` at most once; the iterator is exhausted after the first error.
pub struct SegmentIter<'a> {
    remaining: &'a [u8],
    failed: bool,
}

impl<'a> SegmentIter<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            remaining: bytes,
            failed: false,
        }
    }

    fn fail(&mut self, err: MultiaddrError) -> Option<Result<Segment<'a>>> {
        trace!(error = %err, "segment walk failed");
        self.failed = true;
        Some(Err(err))
    }
}

impl<'a> Iterator for SegmentIter<'a> {
    type Item = Result<Segment<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let (&code, rest) = self.remaining.split_first()?;

        let Some(protocol) = protocol::lookup_by_code(code) else {
            return self.fail(MultiaddrError::UnknownProtocolCode(code));
        };

        let width = protocol.value_len();
        if width > rest.len() {
            return self.fail(MultiaddrError::TruncatedSegment {
                protocol: protocol.name,
                needed: width,
                remaining: rest.len(),
            });
        }

        let (value, tail) = rest.split_at(width);
        self.remaining = tail;
        Some(Ok(Segment { protocol, value }))
    }
}

impl std::iter::FusedIterator for SegmentIter<'_> {}

impl Multiaddr {
    /// An address with no segments.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse the textual form using the standard transcoder.
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with(text, &StandardTranscoder)
    }

    /// Parse the textual form with a caller-supplied transcoder.
    pub fn parse_with(text: &str, codec: &dyn Transcoder) -> Result<Self> {
        let trimmed = text.trim_end_matches('/');
        if trimmed.is_empty() {
            return Ok(Self::empty());
        }

        let rest = trimmed.strip_prefix('/').ok_or_else(|| {
            MultiaddrError::invalid_format(text, constants::ERR_MISSING_LEADING_SLASH)
        })?;

        let mut buf = BytesMut::with_capacity(rest.len());
        let mut parts = rest.split('/');
        while let Some(name) = parts.next() {
            let protocol = protocol::lookup_by_name(name)
                .ok_or_else(|| MultiaddrError::UnknownProtocol(name.to_string()))?;
            buf.put_u8(protocol.code);

            if protocol.is_valueless() {
                continue;
            }

            let value = parts.next().ok_or_else(|| {
                MultiaddrError::invalid_value(protocol.name, constants::ERR_MISSING_VALUE)
            })?;
            let encoded = codec.encode(&protocol, value)?;
            check_width(&protocol, &encoded)?;
            buf.put_slice(&encoded);
        }

        Ok(Self {
            bytes: buf.freeze(),
        })
    }

    /// Wrap raw bytes without validating them.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Build a single-segment address from an already encoded value.
    pub fn from_segment(protocol: Protocol, value: &[u8]) -> Result<Self> {
        check_width(&protocol, value)?;
        let mut buf = BytesMut::with_capacity(1 + value.len());
        buf.put_u8(protocol.code);
        buf.put_slice(value);
        Ok(Self {
            bytes: buf.freeze(),
        })
    }

    /// Render the textual form using the standard transcoder.
    pub fn format(&self) -> Result<String> {
        self.format_with(&StandardTranscoder)
    }

    /// Render the textual form with a caller-supplied transcoder.
    pub fn format_with(&self, codec: &dyn Transcoder) -> Result<String> {
        let mut out = String::new();
        for segment in self.iter() {
            let segment = segment?;
            out.push('/');
            out.push_str(segment.protocol.name);
            if !segment.protocol.is_valueless() {
                out.push('/');
                out.push_str(&codec.decode(&segment.protocol, segment.value)?);
            }
        }
        Ok(out)
    }

    /// Walk the buffer and return the protocol of every segment.
    pub fn segments(&self) -> Result<Vec<Protocol>> {
        self.iter().map(|s| s.map(|s| s.protocol)).collect()
    }

    /// Iterate over the segments of the buffer.
    pub fn iter(&self) -> SegmentIter<'_> {
        SegmentIter::new(&self.bytes)
    }

    /// Check that the whole buffer decodes.
    pub fn validate(&self) -> Result<()> {
        self.iter().try_for_each(|s| s.map(|_| ()))
    }

    /// Append `other` to this address.
    pub fn encapsulate(&self, other: &Multiaddr) -> Multiaddr {
        let mut buf = BytesMut::with_capacity(self.bytes.len() + other.bytes.len());
        buf.put_slice(&self.bytes);
        buf.put_slice(&other.bytes);
        Multiaddr {
            bytes: buf.freeze(),
        }
    }

    /// Remove the last textual occurrence of `other` and everything after it.
    ///
    /// The match is made on the rendered text, not on segment boundaries, so
    /// `/ip4/1.2.3.4/tcp/80` decapsulated by `/tcp/8` yields `/ip4/1.2.3.4`.
    pub fn decapsulate(&self, other: &Multiaddr) -> Result<Multiaddr> {
        self.decapsulate_with(other, &StandardTranscoder)
    }

    /// [`Multiaddr::decapsulate`] matching on the text rendered by `codec`.
    pub fn decapsulate_with(
        &self,
        other: &Multiaddr,
        codec: &dyn Transcoder,
    ) -> Result<Multiaddr> {
        let outer = self.format_with(codec)?;
        let inner = other.format_with(codec)?;

        match outer.rfind(&inner) {
            Some(idx) => Self::parse_with(&outer[..idx], codec),
            None => Err(MultiaddrError::NotContained {
                needle: inner,
                haystack: outer,
            }),
        }
    }

    /// Split into one single-segment address per segment.
    pub fn split(&self) -> Result<Vec<Multiaddr>> {
        let mut out = Vec::new();
        let mut offset = 0;
        for segment in self.iter() {
            let len = segment?.encoded_len();
            out.push(Multiaddr {
                bytes: self.bytes.slice(offset..offset + len),
            });
            offset += len;
        }
        Ok(out)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }

    /// Encoded length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn check_width(protocol: &Protocol, value: &[u8]) -> Result<()> {
    if value.len() == protocol.value_len() {
        Ok(())
    } else {
        Err(MultiaddrError::invalid_value(
            protocol.name,
            format!(
                "expected {} value bytes, got {}",
                protocol.value_len(),
                value.len()
            ),
        ))
    }
}

impl FromStr for Multiaddr {
    type Err = MultiaddrError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Vec<u8>> for Multiaddr {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Bytes> for Multiaddr {
    fn from(bytes: Bytes) -> Self {
        Self { bytes }
    }
}

impl AsRef<[u8]> for Multiaddr {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl<'a> IntoIterator for &'a Multiaddr {
    type Item = Result<Segment<'a>>;
    type IntoIter = SegmentIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for Multiaddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format() {
            Ok(text) => f.debug_tuple("Multiaddr").field(&text).finish(),
            Err(_) => f
                .debug_tuple("Multiaddr")
                .field(&format_args!("<malformed {:02x?}>", self.bytes.as_ref()))
                .finish(),
        }
    }
}

impl Serialize for Multiaddr {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            let text = self.format().map_err(S::Error::custom)?;
            serializer.serialize_str(&text)
        } else {
            serializer.serialize_bytes(&self.bytes)
        }
    }
}

impl<'de> Deserialize<'de> for Multiaddr {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            deserializer.deserialize_str(MultiaddrVisitor)
        } else {
            deserializer.deserialize_byte_buf(MultiaddrVisitor)
        }
    }
}

struct MultiaddrVisitor;

impl<'de> Visitor<'de> for MultiaddrVisitor {
    type Value = Multiaddr;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a multiaddr string or byte buffer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Multiaddr, E> {
        Multiaddr::parse(v).map_err(E::custom)
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> std::result::Result<Multiaddr, E> {
        Ok(Multiaddr::from_bytes(v.to_vec()))
    }

    fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> std::result::Result<Multiaddr, E> {
        Ok(Multiaddr::from_bytes(v))
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Multiaddr, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(b) = seq.next_element::<u8>()? {
            bytes.push(b);
        }
        Ok(Multiaddr::from_bytes(bytes))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::core::protocol::{IP4, IP6, TCP, UDP, UTP};

    #[test]
    fn test_parse_and_segments() {
        let ma = Multiaddr::parse("/ip4/127.0.0.1/tcp/4001").unwrap();
        assert_eq!(ma.as_bytes(), &[4, 127, 0, 0, 1, 6, 0x0F, 0xA1]);
        assert_eq!(ma.segments().unwrap(), vec![IP4, TCP]);
        assert_eq!(ma.format().unwrap(), "/ip4/127.0.0.1/tcp/4001");
    }

    #[test]
    fn test_valueless_protocol() {
        let ma = Multiaddr::parse("/ip4/1.2.3.4/udp/5000/utp").unwrap();
        assert_eq!(ma.segments().unwrap(), vec![IP4, UDP, UTP]);
        assert_eq!(ma.as_bytes().last(), Some(&UTP.code));
        assert_eq!(ma.format().unwrap(), "/ip4/1.2.3.4/udp/5000/utp");
    }

    #[test]
    fn test_empty_and_trailing_slash() {
        assert!(Multiaddr::parse("").unwrap().is_empty());
        assert!(Multiaddr::parse("/").unwrap().is_empty());
        assert_eq!(Multiaddr::empty().format().unwrap(), "");
        assert_eq!(
            Multiaddr::parse("/tcp/80/").unwrap(),
            Multiaddr::parse("/tcp/80").unwrap()
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Multiaddr::parse("ip4/1.2.3.4"),
            Err(MultiaddrError::InvalidFormat { .. })
        ));
        assert!(matches!(
            Multiaddr::parse("/ip5/1.2.3.4"),
            Err(MultiaddrError::UnknownProtocol(name)) if name == "ip5"
        ));
        assert!(matches!(
            Multiaddr::parse("/ip4"),
            Err(MultiaddrError::InvalidValue { .. })
        ));
        assert!(matches!(
            Multiaddr::parse("/ip4/1.2.3.4.5"),
            Err(MultiaddrError::InvalidValue { .. })
        ));
        assert!(matches!(
            Multiaddr::parse("/ip4//tcp/80"),
            Err(MultiaddrError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_walk_reports_truncation() {
        let ma = Multiaddr::from_bytes(vec![4, 127, 0]);
        let err = ma.segments().unwrap_err();
        assert!(matches!(
            err,
            MultiaddrError::TruncatedSegment {
                protocol: "ip4",
                needed: 4,
                remaining: 2
            }
        ));
        assert!(ma.format().is_err());
    }

    #[test]
    fn test_walk_reports_unknown_code() {
        let ma = Multiaddr::from_bytes(vec![6, 0, 80, 0xFF]);
        assert!(matches!(
            ma.segments(),
            Err(MultiaddrError::UnknownProtocolCode(0xFF))
        ));
    }

    #[test]
    fn test_iter_fuses_after_error() {
        let ma = Multiaddr::from_bytes(vec![6, 0, 80, 0xFF, 6, 0, 80]);
        let mut it = ma.iter();
        assert!(it.next().unwrap().is_ok());
        assert!(it.next().unwrap().is_err());
        assert!(it.next().is_none());
    }

    #[test]
    fn test_encapsulate() {
        let a = Multiaddr::parse("/ip4/10.0.0.1").unwrap();
        let b = Multiaddr::parse("/tcp/80").unwrap();
        let c = a.encapsulate(&b);
        assert_eq!(c.len(), a.len() + b.len());
        assert_eq!(c.format().unwrap(), "/ip4/10.0.0.1/tcp/80");
        assert_ne!(c, b.encapsulate(&a));
    }

    #[test]
    fn test_decapsulate() {
        let full = Multiaddr::parse("/ip4/10.0.0.1/tcp/80").unwrap();
        let tcp = Multiaddr::parse("/tcp/80").unwrap();
        assert_eq!(
            full.decapsulate(&tcp).unwrap(),
            Multiaddr::parse("/ip4/10.0.0.1").unwrap()
        );

        let other = Multiaddr::parse("/udp/80").unwrap();
        assert!(matches!(
            full.decapsulate(&other),
            Err(MultiaddrError::NotContained { .. })
        ));
    }

    #[test]
    fn test_decapsulate_uses_last_occurrence() {
        let ma = Multiaddr::parse("/ip4/1.1.1.1/tcp/80/ip4/2.2.2.2/tcp/80").unwrap();
        let tcp = Multiaddr::parse("/tcp/80").unwrap();
        assert_eq!(
            ma.decapsulate(&tcp).unwrap().format().unwrap(),
            "/ip4/1.1.1.1/tcp/80/ip4/2.2.2.2"
        );
    }

    #[test]
    fn test_decapsulate_is_textual() {
        let ma = Multiaddr::parse("/ip4/1.2.3.4/tcp/8080").unwrap();
        let partial = Multiaddr::parse("/tcp/80").unwrap();
        assert_eq!(
            ma.decapsulate(&partial).unwrap().format().unwrap(),
            "/ip4/1.2.3.4"
        );
    }

    #[test]
    fn test_split() {
        let ma = Multiaddr::parse("/ip6/::1/udp/53/utp").unwrap();
        let parts = ma.split().unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].segments().unwrap(), vec![IP6]);
        assert_eq!(parts[2].format().unwrap(), "/utp");
        let rejoined = parts
            .iter()
            .fold(Multiaddr::empty(), |acc, p| acc.encapsulate(p));
        assert_eq!(rejoined, ma);
    }

    #[test]
    fn test_from_segment_checks_width() {
        assert!(Multiaddr::from_segment(TCP, &[0, 80]).is_ok());
        assert!(Multiaddr::from_segment(TCP, &[80]).is_err());
        assert!(Multiaddr::from_segment(UTP, &[]).is_ok());
    }

    #[test]
    fn test_debug_output() {
        let ma = Multiaddr::parse("/tcp/80").unwrap();
        assert_eq!(format!("{ma:?}"), "Multiaddr(\"/tcp/80\")");
        let bad = Multiaddr::from_bytes(vec![0xFF]);
        assert!(format!("{bad:?}").contains("malformed"));
    }

    #[test]
    fn test_serde_json_uses_text() {
        let ma = Multiaddr::parse("/ip4/127.0.0.1/tcp/4001").unwrap();
        let json = serde_json::to_string(&ma).unwrap();
        assert_eq!(json, "\"/ip4/127.0.0.1/tcp/4001\"");
        let back: Multiaddr = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ma);
    }

    #[test]
    fn test_serde_bincode_uses_bytes() {
        let ma = Multiaddr::parse("/ip4/127.0.0.1/udp/53").unwrap();
        let encoded = bincode::serialize(&ma).unwrap();
        let back: Multiaddr = bincode::deserialize(&encoded).unwrap();
        assert_eq!(back.as_bytes(), ma.as_bytes());
    }
}
