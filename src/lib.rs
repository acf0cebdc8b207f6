//! mmdb - a read-only reader for the MaxMind DB binary format
//!
//! Reads the MMDB file format used by GeoIP2 and similar IP-to-record
//! databases: a memory-mappable, immutable file mapping IPv4/IPv6
//! addresses to arbitrary structured records (maps, arrays, strings,
//! numbers, booleans, binary blobs).
//!
//! ```no_run
//! use mmdb::Reader;
//!
//! # fn main() -> Result<(), mmdb::MmdbError> {
//! let reader = Reader::open("GeoLite2-Country.mmdb")?;
//! let result = reader.lookup_string("1.1.1.1")?;
//! if result.found {
//!     if let Some(country) = result.entry.get_value(&["country", "iso_code"])?.into_value() {
//!         println!("{:?}", country);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Layout
//!
//! ```text
//! ┌───────────────────────────────────────┐
//! │  MMDB File                            │
//! ├───────────────────────────────────────┤
//! │  1. Search tree (binary trie)         │
//! │  2. 16-byte all-zero separator        │
//! │  3. Data section (typed, pointer-     │
//! │     compressed values)                │
//! │  4. Metadata marker + metadata map    │
//! └───────────────────────────────────────┘
//!          ↓ mmap() or read-to-memory
//! ┌───────────────────────────────────────┐
//! │  Reader (immutable, Sync)             │
//! │  lookup_string/lookup_sockaddr        │
//! │  -> Entry -> get_value/decode         │
//! └───────────────────────────────────────┘
//! ```
//!
//! # Crates used
//!
//! - [`memmap2`] for the baseline memory-mapped buffer source.
//! - [`clap`] (behind the `cli` feature) for the `mmdb-tool` binary.
//! - [`libc`]/`winapi` for the C ABI compatibility layer's `sockaddr` types.
//!
//! No `thiserror`, `serde`, or async runtime: errors are a hand-written
//! flat enum (see [`error`]), and there is nothing to (de)serialize or
//! await in a synchronous, read-only decoder.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// C ABI compatibility layer mirroring the reference `MMDB_*` functions.
pub mod c_api;
/// Data-section value decoding: pointers, typed values, path navigation.
pub mod decoder;
/// Diagnostic pretty-printing and its round-trip parser.
pub mod dump;
/// The stable error taxonomy for this crate.
pub mod error;
/// Buffer sourcing: memory-mapped or in-memory.
pub mod mmap;
/// Metadata marker location and the metadata record.
pub mod metadata;
/// The top-level façade: `Reader`, `Entry`, lookup operations.
pub mod reader;
/// Binary search tree traversal.
pub mod tree;

pub use decoder::{EntryData, EntryDataList, PathOutcome, Value};
pub use error::{MmdbError, Result};
pub use metadata::{IpVersion, Metadata, RecordSize};
pub use reader::{Entry, LookupResult, Reader};

impl<'a> PathOutcome<'a> {
    /// Convenience accessor: `Some(value)` if found, `None` otherwise.
    pub fn into_value(self) -> Option<Value<'a>> {
        match self {
            PathOutcome::Found(v) => Some(v),
            PathOutcome::NotFound => None,
        }
    }
}

/// The version of this library, as reported by `MMDB_lib_version` in the
/// C ABI compatibility layer.
pub fn lib_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
