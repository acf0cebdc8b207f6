//! Error types for the mmdb library.
use std::fmt;
use std::io;

/// Result type alias for mmdb operations.
pub type Result<T> = std::result::Result<T, MmdbError>;

/// The stable error taxonomy for this crate.
///
/// Each variant carries the integer code used by the reference
/// libmaxminddb C API (`MMDB_*_ERROR`) so that [`MmdbError::code`] can be
/// used directly by the C ABI compatibility layer. `IPV6_LOOKUP_IN_IPV4_DATABASE`
/// has no counterpart in the reference taxonomy and is assigned 100 so it can
/// never collide with a future addition to the C-compatible 0..=9 range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MmdbError {
    /// The database file could not be opened.
    FileOpen(String),
    /// The search tree is corrupt (ran out of bits without reaching a terminal).
    CorruptSearchTree(String),
    /// The metadata section is missing required fields or has invalid values.
    InvalidMetadata(String),
    /// An I/O error occurred while reading the file.
    Io(String),
    /// Allocation failed while materializing a value list (see the compat layer).
    OutOfMemory(String),
    /// The file does not contain a recognizable MMDB metadata marker.
    UnknownDatabaseFormat(String),
    /// The data section contains malformed or out-of-bounds encoding.
    InvalidData(String),
    /// A lookup path segment was syntactically invalid (e.g. a non-integer array index).
    InvalidLookupPath(String),
    /// A lookup path attempted to index into a value of the wrong shape.
    LookupPathDoesNotMatchData(String),
    /// An IPv6 address was looked up against an IPv4-only database.
    Ipv6LookupInIpv4Database,
}

impl MmdbError {
    /// The stable integer error code, matching the reference C API where one exists.
    pub fn code(&self) -> i32 {
        match self {
            MmdbError::FileOpen(_) => 1,
            MmdbError::CorruptSearchTree(_) => 2,
            MmdbError::InvalidMetadata(_) => 3,
            MmdbError::Io(_) => 4,
            MmdbError::OutOfMemory(_) => 5,
            MmdbError::UnknownDatabaseFormat(_) => 6,
            MmdbError::InvalidData(_) => 7,
            MmdbError::InvalidLookupPath(_) => 8,
            MmdbError::LookupPathDoesNotMatchData(_) => 9,
            MmdbError::Ipv6LookupInIpv4Database => 100,
        }
    }
}

impl fmt::Display for MmdbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MmdbError::FileOpen(msg) => write!(f, "Error opening database file: {}", msg),
            MmdbError::CorruptSearchTree(msg) => write!(f, "The MMDB search tree is corrupt: {}", msg),
            MmdbError::InvalidMetadata(msg) => write!(f, "Invalid metadata: {}", msg),
            MmdbError::Io(msg) => write!(f, "I/O error: {}", msg),
            MmdbError::OutOfMemory(msg) => write!(f, "Out of memory: {}", msg),
            MmdbError::UnknownDatabaseFormat(msg) => {
                write!(f, "Unknown database format: {}", msg)
            }
            MmdbError::InvalidData(msg) => write!(f, "Invalid or corrupt data: {}", msg),
            MmdbError::InvalidLookupPath(msg) => write!(f, "Invalid lookup path: {}", msg),
            MmdbError::LookupPathDoesNotMatchData(msg) => {
                write!(f, "Lookup path does not match data: {}", msg)
            }
            MmdbError::Ipv6LookupInIpv4Database => {
                write!(f, "You attempted to look up an IPv6 address in an IPv4-only database")
            }
        }
    }
}

impl std::error::Error for MmdbError {}

impl From<io::Error> for MmdbError {
    fn from(err: io::Error) -> Self {
        MmdbError::Io(err.to_string())
    }
}
