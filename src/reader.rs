//! The top-level façade: opening a database and running lookups against it.
//!
//! `Reader` owns the backing bytes and the parsed metadata; every other
//! operation borrows from it. This mirrors `MMDB_s` owning the mapped
//! file in the reference C API, with [`Entry`] standing in for
//! `MMDB_entry_s { mmdb, offset }`.

use crate::decoder::{Decoder, EntryDataList, PathOutcome, Value};
use crate::error::{MmdbError, Result};
use crate::mmap::Source;
use crate::metadata::{self, Metadata};
use crate::tree::SearchTree;
use std::net::IpAddr;
use std::path::Path;

/// An open, read-only MMDB database.
///
/// Immutable after [`Reader::open`]/[`Reader::from_source`] returns:
/// every lookup and navigation method takes `&self`, so a single `Reader`
/// may be shared across threads (it is `Sync`) without any
/// synchronization.
pub struct Reader {
    source: Source,
    metadata: Metadata,
    data_base: usize,
    data_len: usize,
    metadata_base: usize,
}

/// A cursor into the data section, pointing at the start of an encoded
/// value. Borrowed from the [`Reader`] that produced it.
#[derive(Debug, Clone, Copy)]
pub struct Entry<'a> {
    reader: &'a Reader,
    offset: u32,
}

impl<'a> Entry<'a> {
    /// This entry's offset into its database's data section.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Decode the single value at this entry without navigating further.
    pub fn decode(&self) -> Result<Value<'a>> {
        self.reader.decoder().decode_one(self.offset)
    }

    /// Navigate `path` from this entry.
    pub fn get_value(&self, path: &[&str]) -> Result<PathOutcome<'a>> {
        self.reader.decoder().get_path(self.offset, path)
    }

    /// Materialize this entry's full value subtree as a flattened list.
    pub fn get_entry_data_list(&self) -> Result<Box<EntryDataList<'a>>> {
        self.reader.decoder().decode_tree(self.offset)
    }
}

/// The outcome of a top-level [`Reader::lookup_string`]/[`Reader::lookup_sockaddr`] call.
#[derive(Debug, Clone, Copy)]
pub struct LookupResult<'a> {
    /// Whether a data record was found.
    pub found: bool,
    /// The matched entry. Only meaningful when `found` is true.
    pub entry: Entry<'a>,
    /// The prefix length of the network that matched, or of the deepest
    /// point reached before a "no match" terminal.
    pub netmask: u8,
}

impl Reader {
    /// Open and memory-map a database file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_source(Source::open(path)?)
    }

    /// Build a reader over an already-resident buffer, bypassing mmap.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Self::from_source(Source::from_bytes(bytes))
    }

    /// Build a reader over any [`Source`] (memory-mapped or in-memory).
    pub fn from_source(source: Source) -> Result<Self> {
        let data = source.as_slice();
        let (marker_offset, metadata) = metadata::locate_and_decode_metadata(data)?;
        let metadata_base = marker_offset + metadata::METADATA_MARKER.len();

        let tree_len = metadata.tree_byte_size();
        let data_base = tree_len
            .checked_add(16)
            .ok_or_else(|| MmdbError::InvalidMetadata("search tree size overflow".to_string()))?;
        let data_len = marker_offset.checked_sub(data_base).ok_or_else(|| {
            MmdbError::InvalidMetadata(format!(
                "search tree ({} bytes + 16-byte separator) runs past the metadata marker at {}",
                tree_len, marker_offset
            ))
        })?;
        if data.len() < data_base + data_len {
            return Err(MmdbError::InvalidMetadata(
                "data section runs past end of file".to_string(),
            ));
        }

        Ok(Reader {
            source,
            metadata,
            data_base,
            data_len,
            metadata_base,
        })
    }

    /// The database's metadata record.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Construct an [`Entry`] at an already-known data-section offset,
    /// bypassing a tree lookup. Used by the C ABI compatibility layer,
    /// which receives offsets across the FFI boundary rather than
    /// producing them from a fresh lookup.
    pub(crate) fn entry_at(&self, offset: u32) -> Entry<'_> {
        Entry {
            reader: self,
            offset,
        }
    }

    /// Consume and close the reader. Equivalent to dropping it; provided
    /// for parity with the reference API's explicit `MMDB_close`.
    pub fn close(self) {}

    fn tree(&self) -> SearchTree<'_> {
        let tree_bytes = &self.source.as_slice()[..self.metadata.tree_byte_size()];
        SearchTree::new(tree_bytes, &self.metadata)
    }

    fn decoder(&self) -> Decoder<'_> {
        let data = &self.source.as_slice()[self.data_base..self.data_base + self.data_len];
        Decoder::new(data)
    }

    fn metadata_decoder(&self) -> Decoder<'_> {
        Decoder::new(&self.source.as_slice()[self.metadata_base..])
    }

    /// Parse `text` as an IP address and look it up.
    pub fn lookup_string(&self, text: &str) -> Result<LookupResult<'_>> {
        let addr: IpAddr = text
            .parse()
            .map_err(|_| MmdbError::InvalidData(format!("{:?} is not a valid IP address", text)))?;
        self.lookup_sockaddr(addr)
    }

    /// Look up an already-parsed address.
    pub fn lookup_sockaddr(&self, addr: IpAddr) -> Result<LookupResult<'_>> {
        let result = self.tree().lookup(addr)?;
        Ok(LookupResult {
            found: result.found,
            entry: Entry {
                reader: self,
                offset: result.offset,
            },
            netmask: result.netmask,
        })
    }

    /// Navigate `path` from an entry previously returned by a lookup.
    pub fn get_value<'a>(&'a self, entry: &Entry<'a>, path: &[&str]) -> Result<PathOutcome<'a>> {
        entry.get_value(path)
    }

    /// Materialize an entry's full value subtree as a flattened list.
    pub fn get_entry_data_list<'a>(&'a self, entry: &Entry<'a>) -> Result<Box<EntryDataList<'a>>> {
        entry.get_entry_data_list()
    }

    /// Materialize the metadata record itself as a flattened value list,
    /// for parity with `MMDB_get_metadata_as_entry_data_list`.
    pub fn metadata_as_entry_data_list(&self) -> Result<Box<EntryDataList<'_>>> {
        self.metadata_decoder().decode_tree(0)
    }
}
