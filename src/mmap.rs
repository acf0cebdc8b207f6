//! Buffer sourcing for MMDB files.
//!
//! Provides safe, validated access to the raw bytes of an MMDB database,
//! regardless of whether they come from a memory-mapped file or a buffer
//! already resident in memory. The decoder and search tree only ever see
//! `&[u8]`; they do not know or care which backing is in use.

use crate::error::{MmdbError, Result};
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// A contiguous, immutable byte source backing an open database.
///
/// `Source::Mapped` is the baseline mode: the file is memory-mapped
/// read-only and pages are faulted in on demand. `Source::Owned` holds a
/// fully-read `Vec<u8>`, for callers that supply bytes directly (e.g. from
/// a non-file-backed stream) or that want to avoid mmap.
pub enum Source {
    /// A memory-mapped file.
    Mapped(Mmap),
    /// An in-memory byte buffer.
    Owned(Vec<u8>),
}

impl Source {
    /// Open and memory-map a file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())
            .map_err(|e| MmdbError::FileOpen(format!("{}: {}", path.as_ref().display(), e)))?;
        // SAFETY: the file is not truncated or modified for the lifetime of
        // this mapping in any way this crate can observe; concurrent external
        // mutation of the backing file is a caller hazard shared by every
        // mmap-based reader, not something this crate can guard against.
        let mmap = unsafe { Mmap::map(&file) }
            .map_err(|e| MmdbError::Io(format!("{}: {}", path.as_ref().display(), e)))?;
        Ok(Source::Mapped(mmap))
    }

    /// Wrap an already-resident byte buffer.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Source::Owned(bytes)
    }

    /// Borrow the full contents as a byte slice.
    pub fn as_slice(&self) -> &[u8] {
        match self {
            Source::Mapped(m) => &m[..],
            Source::Owned(v) => &v[..],
        }
    }

    /// Total length in bytes.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// True if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A bounds-checked slice of the buffer.
    pub fn get_slice(&self, offset: usize, length: usize) -> Option<&[u8]> {
        let data = self.as_slice();
        let end = offset.checked_add(length)?;
        if end > data.len() {
            return None;
        }
        Some(&data[offset..end])
    }
}

impl std::fmt::Debug for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Source")
            .field("kind", &match self {
                Source::Mapped(_) => "mapped",
                Source::Owned(_) => "owned",
            })
            .field("len", &self.len())
            .finish()
    }
}
