//! C ABI compatibility surface.
//!
//! Mirrors the reference libmaxminddb C API (`MMDB_*` functions and
//! structs) so existing C/C++ callers can link against this crate's
//! `cdylib`/`staticlib` output with no source changes. The Rust API in
//! [`crate::reader`] is the implementation; this module is a thin,
//! `unsafe`-isolated wrapper around it.

/// `MMDB_*` function and struct definitions.
pub mod maxminddb_compat;
