//! Encoding stream data.
//!
//! Streams are kept unencoded in memory until the document is finished. Only then
//! are filters chosen, from the [`StreamKind`] of the stream and the
//! [`SerializeSettings`] of the document:
//!
//! | kind      | compression                         | ASCII-compatible output |
//! |-----------|-------------------------------------|-------------------------|
//! | `Content` | Flate if `compress_content_streams` | hex, if compressed      |
//! | `Binary`  | always Flate                        | hex                     |

use std::borrow::Cow;

use pdf_writer::{Dict, Name};

use crate::object::StreamKind;
use crate::SerializeSettings;

const COMPRESSION_LEVEL: u8 = 6;
const HEX_BYTES_PER_LINE: usize = 35;

/// A stream filter.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum StreamFilter {
    Flate,
    AsciiHex,
}

impl StreamFilter {
    fn name(self) -> Name<'static> {
        match self {
            StreamFilter::Flate => Name(b"FlateDecode"),
            StreamFilter::AsciiHex => Name(b"ASCIIHexDecode"),
        }
    }

    fn encode(self, data: &[u8]) -> Vec<u8> {
        match self {
            StreamFilter::Flate => deflate_encode(data),
            StreamFilter::AsciiHex => hex_encode(data),
        }
    }
}

/// The data of a stream after all filters were applied, together with the
/// filters in the order they were applied.
#[derive(Debug)]
pub(crate) struct EncodedStream<'a> {
    data: Cow<'a, [u8]>,
    filters: Vec<StreamFilter>,
}

impl<'a> EncodedStream<'a> {
    pub(crate) fn new(data: &'a [u8], kind: StreamKind, settings: &SerializeSettings) -> Self {
        let compress = match kind {
            StreamKind::Content => settings.compress_content_streams,
            StreamKind::Binary => true,
        };

        let mut filters = Vec::with_capacity(2);
        if compress {
            filters.push(StreamFilter::Flate);
            // Compressed data is binary, so it needs to be hex encoded as well.
            if settings.ascii_compatible {
                filters.push(StreamFilter::AsciiHex);
            }
        }

        let data = filters
            .iter()
            .fold(Cow::Borrowed(data), |data, filter| {
                Cow::Owned(filter.encode(&data))
            });

        Self { data, filters }
    }

    pub(crate) fn data(&self) -> &[u8] {
        &self.data
    }

    /// Write the `/Filter` entry, if any. Decoders run in the reverse order
    /// of the encoders.
    pub(crate) fn write_filters(&self, dict: &mut Dict<'_>) {
        match self.filters.as_slice() {
            [] => {}
            [filter] => {
                dict.pair(Name(b"Filter"), filter.name());
            }
            filters => {
                dict.insert(Name(b"Filter"))
                    .array()
                    .items(filters.iter().rev().map(|f| f.name()));
            }
        }
    }
}

fn deflate_encode(data: &[u8]) -> Vec<u8> {
    miniz_oxide::deflate::compress_to_vec_zlib(data, COMPRESSION_LEVEL)
}

fn hex_encode(data: &[u8]) -> Vec<u8> {
    data.chunks(HEX_BYTES_PER_LINE)
        .map(|line| line.iter().map(|b| format!("{:02X}", b)).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
        .into_bytes()
}

#[cfg(test)]
mod tests {
    use miniz_oxide::inflate::decompress_to_vec_zlib;

    use super::*;
    use crate::util::test_utils::settings_1;

    #[test]
    fn deflate_round_trips() {
        let data = b"BT /F1 12 Tf (Hello) Tj ET".repeat(10);
        assert_eq!(decompress_to_vec_zlib(&deflate_encode(&data)).unwrap(), data);
    }

    #[test]
    fn hex_wraps_lines() {
        let encoded = String::from_utf8(hex_encode(&[0xAB; 36])).unwrap();
        let lines = encoded.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), 70);
        assert_eq!(lines[1], "AB");
    }

    #[test]
    fn uncompressed_content_has_no_filters() {
        let stream = EncodedStream::new(b"q Q", StreamKind::Content, &settings_1());
        assert_eq!(stream.data(), b"q Q");
        assert!(stream.filters.is_empty());
    }

    #[test]
    fn compressed_content() {
        let settings = SerializeSettings::default();
        let stream = EncodedStream::new(b"0 0 m 10 10 l S", StreamKind::Content, &settings);

        assert_eq!(stream.filters, vec![StreamFilter::Flate]);
        assert_eq!(
            decompress_to_vec_zlib(stream.data()).unwrap(),
            b"0 0 m 10 10 l S"
        );
    }

    #[test]
    fn ascii_compatible_binary_data() {
        let stream = EncodedStream::new(&[1, 2, 3], StreamKind::Binary, &settings_1());
        assert_eq!(
            stream.filters,
            vec![StreamFilter::Flate, StreamFilter::AsciiHex]
        );
        assert!(stream.data().iter().all(|b| b.is_ascii()));
    }
}
