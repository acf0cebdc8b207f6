//! Metadata marker location and the database metadata record.
//!
//! The metadata section sits at the very end of an MMDB file, announced
//! by a fixed marker. It is itself an ordinary MMDB map value, decoded
//! with the same [`Decoder`] used for the data section.

use crate::decoder::{Decoder, Value};
use crate::error::{MmdbError, Result};
use std::collections::HashMap;

/// The byte sequence marking the start of the metadata section:
/// `"\xAB\xCD\xEFMaxMind.com"`.
pub const METADATA_MARKER: &[u8] = b"\xAB\xCD\xEFMaxMind.com";

/// The window, from the end of the file, in which the marker is searched
/// for. The marker is never farther than this from EOF in a well-formed
/// database.
const SEARCH_WINDOW: usize = 128 * 1024;

/// The record size of the search tree, in bits per record (two records
/// per node).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSize {
    /// 24-bit records: 6 bytes per node.
    Bits24,
    /// 28-bit records: 7 bytes per node, with nibble-packed middle byte.
    Bits28,
    /// 32-bit records: 8 bytes per node.
    Bits32,
}

impl RecordSize {
    /// Construct from the raw bit count stored in metadata.
    pub fn from_bits(bits: u16) -> Result<Self> {
        match bits {
            24 => Ok(RecordSize::Bits24),
            28 => Ok(RecordSize::Bits28),
            32 => Ok(RecordSize::Bits32),
            other => Err(MmdbError::InvalidMetadata(format!(
                "unsupported record_size: {} bits",
                other
            ))),
        }
    }

    /// Bytes occupied by one full node (two records).
    pub fn node_bytes(self) -> usize {
        match self {
            RecordSize::Bits24 => 6,
            RecordSize::Bits28 => 7,
            RecordSize::Bits32 => 8,
        }
    }

    /// The raw bit count, for reporting back through metadata accessors.
    pub fn bits(self) -> u16 {
        match self {
            RecordSize::Bits24 => 24,
            RecordSize::Bits28 => 28,
            RecordSize::Bits32 => 32,
        }
    }
}

/// The IP version a database was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpVersion {
    /// IPv4-only database; the search tree has a 32-bit depth.
    V4,
    /// IPv6 database (may also answer IPv4 queries via an embedded /96 prefix); 128-bit depth.
    V6,
}

impl IpVersion {
    /// The search tree's traversal depth in bits for this IP version.
    pub fn tree_depth(self) -> u32 {
        match self {
            IpVersion::V4 => 32,
            IpVersion::V6 => 128,
        }
    }
}

/// The decoded MMDB metadata record.
#[derive(Debug, Clone)]
pub struct Metadata {
    /// Number of nodes in the search tree.
    pub node_count: u32,
    /// Record size for the search tree.
    pub record_size: RecordSize,
    /// IP version the database was built for.
    pub ip_version: IpVersion,
    /// Database type/name, e.g. `"GeoLite2-Country"`.
    pub database_type: String,
    /// Languages the `description` map has entries for.
    pub languages: Vec<String>,
    /// Binary format major version (must be 2 for any database this crate can read).
    pub binary_format_major_version: u16,
    /// Binary format minor version.
    pub binary_format_minor_version: u16,
    /// Unix timestamp of when the database was built.
    pub build_epoch: u64,
    /// Human-readable database description, keyed by language code.
    pub description: HashMap<String, String>,
}

impl Metadata {
    /// Decode and validate metadata from its already-located value tree.
    pub(crate) fn from_value(value: Value<'_>) -> Result<Self> {
        let Value::Map(entries) = value else {
            return Err(MmdbError::InvalidMetadata(
                "metadata section is not a map".to_string(),
            ));
        };

        let node_count = required_uint(&entries, "node_count")? as u32;
        let record_size = RecordSize::from_bits(required_uint(&entries, "record_size")? as u16)?;
        let ip_version_num = required_uint(&entries, "ip_version")?;
        let ip_version = match ip_version_num {
            4 => IpVersion::V4,
            6 => IpVersion::V6,
            other => {
                return Err(MmdbError::InvalidMetadata(format!(
                    "invalid ip_version: {}",
                    other
                )))
            }
        };
        let database_type = required_string(&entries, "database_type")?.to_string();
        let languages = match find(&entries, "languages") {
            Some(Value::Array(items)) => items
                .iter()
                .map(|v| match v {
                    Value::String(s) => Ok((*s).to_string()),
                    other => Err(MmdbError::InvalidMetadata(format!(
                        "languages entry decoded to {:?} instead of a string",
                        other.type_id()
                    ))),
                })
                .collect::<Result<Vec<_>>>()?,
            Some(_) => {
                return Err(MmdbError::InvalidMetadata(
                    "languages is not an array".to_string(),
                ))
            }
            None => Vec::new(),
        };
        let binary_format_major_version = required_uint(&entries, "binary_format_major_version")? as u16;
        let binary_format_minor_version = required_uint(&entries, "binary_format_minor_version")? as u16;
        let build_epoch = required_uint(&entries, "build_epoch")?;
        let description = match find(&entries, "description") {
            Some(Value::Map(pairs)) => {
                let mut map = HashMap::with_capacity(pairs.len());
                for (k, v) in pairs {
                    let Value::String(s) = v else {
                        return Err(MmdbError::InvalidMetadata(format!(
                            "description[{:?}] decoded to {:?} instead of a string",
                            k,
                            v.type_id()
                        )));
                    };
                    map.insert((*k).to_string(), (*s).to_string());
                }
                map
            }
            Some(_) => {
                return Err(MmdbError::InvalidMetadata(
                    "description is not a map".to_string(),
                ))
            }
            None => HashMap::new(),
        };

        if node_count == 0 {
            return Err(MmdbError::InvalidMetadata(
                "node_count must be greater than zero".to_string(),
            ));
        }
        if binary_format_major_version != 2 {
            return Err(MmdbError::UnknownDatabaseFormat(format!(
                "unsupported binary_format_major_version: {}",
                binary_format_major_version
            )));
        }

        Ok(Metadata {
            node_count,
            record_size,
            ip_version,
            database_type,
            languages,
            binary_format_major_version,
            binary_format_minor_version,
            build_epoch,
            description,
        })
    }

    /// Bytes occupied by one full search-tree node under this metadata's record size.
    pub fn node_byte_size(&self) -> usize {
        self.record_size.node_bytes()
    }

    /// Size of the search tree in bytes: `node_count * node_byte_size()`.
    pub fn tree_byte_size(&self) -> usize {
        self.node_count as usize * self.node_byte_size()
    }
}

fn find<'a>(entries: &'a [(&'a str, Value<'a>)], key: &str) -> Option<&'a Value<'a>> {
    entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
}

fn required_uint(entries: &[(&str, Value<'_>)], key: &str) -> Result<u64> {
    match find(entries, key) {
        Some(Value::Uint16(n)) => Ok(*n as u64),
        Some(Value::Uint32(n)) => Ok(*n as u64),
        Some(Value::Uint64(n)) => Ok(*n),
        Some(other) => Err(MmdbError::InvalidMetadata(format!(
            "{:?} is not an unsigned integer ({:?})",
            key,
            other.type_id()
        ))),
        None => Err(MmdbError::InvalidMetadata(format!(
            "metadata is missing required field {:?}",
            key
        ))),
    }
}

fn required_string<'a>(entries: &'a [(&'a str, Value<'a>)], key: &str) -> Result<&'a str> {
    match find(entries, key) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(MmdbError::InvalidMetadata(format!(
            "{:?} is not a string ({:?})",
            key,
            other.type_id()
        ))),
        None => Err(MmdbError::InvalidMetadata(format!(
            "metadata is missing required field {:?}",
            key
        ))),
    }
}

/// Search for [`METADATA_MARKER`] within the last [`SEARCH_WINDOW`] bytes
/// of `data`, returning the offset of the last (rightmost) occurrence.
///
/// A well-formed file has exactly one marker; scanning for the last one
/// matches the reference decoder's defensive behavior on files that
/// happen to contain the marker bytes earlier, e.g. inside a string
/// value.
pub fn find_metadata_marker(data: &[u8]) -> Result<usize> {
    if data.len() < METADATA_MARKER.len() {
        return Err(MmdbError::UnknownDatabaseFormat(
            "file is smaller than the metadata marker".to_string(),
        ));
    }

    let search_start = data.len().saturating_sub(SEARCH_WINDOW);
    let mut last_match = None;
    let mut i = search_start;
    while i + METADATA_MARKER.len() <= data.len() {
        if &data[i..i + METADATA_MARKER.len()] == METADATA_MARKER {
            last_match = Some(i);
        }
        i += 1;
    }

    last_match.ok_or_else(|| {
        MmdbError::UnknownDatabaseFormat(
            "no MMDB metadata marker found in the last 128KB of the file".to_string(),
        )
    })
}

/// Locate and decode the metadata record from a whole-file buffer.
///
/// Returns the metadata together with the byte offset of the marker
/// itself (`Reader::from_source` needs that offset to compute the data
/// section's bounds; callers that only want the metadata can use
/// [`read_metadata`] instead).
pub fn locate_and_decode_metadata(data: &[u8]) -> Result<(usize, Metadata)> {
    let marker_offset = find_metadata_marker(data)?;
    let metadata_offset = marker_offset + METADATA_MARKER.len();
    let decoder = Decoder::new(&data[metadata_offset..]);
    let value = decoder.decode_one(0)?;
    let metadata = Metadata::from_value(value)?;
    Ok((marker_offset, metadata))
}

/// Locate and decode the metadata record from a whole-file buffer,
/// discarding the marker offset. See [`locate_and_decode_metadata`].
pub fn read_metadata(data: &[u8]) -> Result<Metadata> {
    locate_and_decode_metadata(data).map(|(_, metadata)| metadata)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_string(s: &str, buf: &mut Vec<u8>) {
        buf.push(0x40 | s.len() as u8);
        buf.extend_from_slice(s.as_bytes());
    }

    fn encode_uint32(n: u32, buf: &mut Vec<u8>) {
        buf.push(0xC4);
        buf.extend_from_slice(&n.to_be_bytes());
    }

    fn encode_uint16(n: u16, buf: &mut Vec<u8>) {
        buf.push(0xA2);
        buf.extend_from_slice(&n.to_be_bytes());
    }

    fn minimal_metadata_map(buf: &mut Vec<u8>) {
        // 8 required top-level keys (languages/description left empty).
        buf.push(0xE0 | 8u8);
        encode_string("node_count", buf);
        encode_uint32(1024, buf);
        encode_string("record_size", buf);
        encode_uint16(28, buf);
        encode_string("ip_version", buf);
        encode_uint16(6, buf);
        encode_string("database_type", buf);
        encode_string("GeoLite2-Country", buf);
        encode_string("languages", buf);
        buf.push(0x00); // array, size 0
        encode_string("binary_format_major_version", buf);
        encode_uint16(2, buf);
        encode_string("binary_format_minor_version", buf);
        encode_uint16(0, buf);
        encode_string("build_epoch", buf);
        encode_uint32(1_700_000_000, buf);
    }

    #[test]
    fn finds_marker_at_known_offset() {
        let mut data = vec![0u8; 10];
        data.extend_from_slice(METADATA_MARKER);
        data.extend_from_slice(b"rest");
        assert_eq!(find_metadata_marker(&data).unwrap(), 10);
    }

    #[test]
    fn keeps_last_marker_when_duplicated() {
        let mut data = Vec::new();
        data.extend_from_slice(METADATA_MARKER);
        data.extend_from_slice(b"----");
        let second = data.len();
        data.extend_from_slice(METADATA_MARKER);
        assert_eq!(find_metadata_marker(&data).unwrap(), second);
    }

    #[test]
    fn missing_marker_is_unknown_format() {
        let data = b"definitely not an mmdb file".to_vec();
        assert!(matches!(
            find_metadata_marker(&data),
            Err(MmdbError::UnknownDatabaseFormat(_))
        ));
    }

    #[test]
    fn decodes_minimal_metadata() {
        let mut data = Vec::new();
        minimal_metadata_map(&mut data);

        let metadata = Metadata::from_value(Decoder::new(&data).decode_one(0).unwrap()).unwrap();
        assert_eq!(metadata.node_count, 1024);
        assert_eq!(metadata.record_size, RecordSize::Bits28);
        assert_eq!(metadata.ip_version, IpVersion::V6);
        assert_eq!(metadata.database_type, "GeoLite2-Country");
        assert!(metadata.languages.is_empty());
        assert_eq!(metadata.binary_format_major_version, 2);
        assert_eq!(metadata.build_epoch, 1_700_000_000);
        assert_eq!(metadata.tree_byte_size(), 1024 * 7);
    }

    #[test]
    fn rejects_zero_node_count() {
        let mut buf = Vec::new();
        buf.push(0xE0 | 8u8);
        encode_string("node_count", &mut buf);
        encode_uint32(0, &mut buf);
        encode_string("record_size", &mut buf);
        encode_uint16(24, &mut buf);
        encode_string("ip_version", &mut buf);
        encode_uint16(4, &mut buf);
        encode_string("database_type", &mut buf);
        encode_string("Test", &mut buf);
        encode_string("languages", &mut buf);
        buf.push(0x00);
        encode_string("binary_format_major_version", &mut buf);
        encode_uint16(2, &mut buf);
        encode_string("binary_format_minor_version", &mut buf);
        encode_uint16(0, &mut buf);
        encode_string("build_epoch", &mut buf);
        encode_uint32(1, &mut buf);

        let result = Metadata::from_value(Decoder::new(&buf).decode_one(0).unwrap());
        assert!(matches!(result, Err(MmdbError::InvalidMetadata(_))));
    }

    #[test]
    fn end_to_end_read_metadata_locates_and_decodes() {
        let mut file = vec![0xAA; 32]; // stand-in search tree bytes
        file.extend_from_slice(METADATA_MARKER);
        minimal_metadata_map(&mut file);

        let metadata = read_metadata(&file).unwrap();
        assert_eq!(metadata.node_count, 1024);
        assert_eq!(metadata.ip_version, IpVersion::V6);
    }
}
