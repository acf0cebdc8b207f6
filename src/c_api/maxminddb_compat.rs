//! libmaxminddb-compatible C API.
//!
//! Wraps [`crate::reader::Reader`] directly behind the `MMDB_*` function
//! and struct names used by `maxminddb.h`, so C/C++ code written against
//! the reference library links against this crate's `cdylib`/`staticlib`
//! output unchanged.
//!
//! A handful of rarely-used reference entry points (`MMDB_read_node`,
//! `MMDB_dump_entry_data_list`) have no counterpart here and are kept as
//! stubs that report an error, matching how the reference header
//! documents them as present-but-optional.

use crate::decoder::{EntryData, EntryDataList, PathOutcome, Value};
use crate::reader::Reader;
use std::ffi::{CStr, CString};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::os::raw::{c_char, c_int, c_void};
use std::ptr;

// ============================================================================
// MMDB_DATA_TYPE_* (see maxminddb.h)
// ============================================================================

/// Extended type marker; the real type is `7 + next byte`.
pub const MMDB_DATA_TYPE_EXTENDED: c_int = 0;
/// Pointer into the data section; resolved transparently by this crate.
pub const MMDB_DATA_TYPE_POINTER: c_int = 1;
/// UTF-8 string.
pub const MMDB_DATA_TYPE_UTF8_STRING: c_int = 2;
/// IEEE-754 double.
pub const MMDB_DATA_TYPE_DOUBLE: c_int = 3;
/// Raw byte blob.
pub const MMDB_DATA_TYPE_BYTES: c_int = 4;
/// Unsigned 16-bit integer.
pub const MMDB_DATA_TYPE_UINT16: c_int = 5;
/// Unsigned 32-bit integer.
pub const MMDB_DATA_TYPE_UINT32: c_int = 6;
/// Map.
pub const MMDB_DATA_TYPE_MAP: c_int = 7;
/// Signed 32-bit integer.
pub const MMDB_DATA_TYPE_INT32: c_int = 8;
/// Unsigned 64-bit integer.
pub const MMDB_DATA_TYPE_UINT64: c_int = 9;
/// Unsigned 128-bit integer.
pub const MMDB_DATA_TYPE_UINT128: c_int = 10;
/// Array.
pub const MMDB_DATA_TYPE_ARRAY: c_int = 11;
/// Boolean.
pub const MMDB_DATA_TYPE_BOOLEAN: c_int = 14;
/// IEEE-754 single-precision float.
pub const MMDB_DATA_TYPE_FLOAT: c_int = 15;

// ============================================================================
// STRUCTS (layout-compatible with maxminddb.h)
// ============================================================================

/// An opened database handle.
#[repr(C)]
pub struct MMDB_s {
    _reader: *mut Reader,
    /// Flags passed to [`MMDB_open`]. Accepted but unused; this crate has
    /// no on-disk-vs-mmap distinction to gate behind a flag.
    pub flags: u32,
    /// Owned, heap-allocated copy of the filename passed to `MMDB_open`.
    pub filename: *const c_char,
    /// Unused; present for struct-layout compatibility.
    pub file_size: isize,
}

/// A cursor into a database's data section.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct MMDB_entry_s {
    /// The database this entry was produced by.
    pub mmdb: *const MMDB_s,
    /// The entry's offset into the data section.
    pub offset: u32,
}

/// The result of [`MMDB_lookup_string`]/[`MMDB_lookup_sockaddr`].
#[repr(C)]
pub struct MMDB_lookup_result_s {
    /// Whether a record was found for the looked-up address.
    pub found_entry: bool,
    /// The matched entry; only meaningful when `found_entry` is true.
    pub entry: MMDB_entry_s,
    /// Prefix length of the network that matched.
    pub netmask: u16,
}

/// A single decoded value, in the reference library's flattened
/// tagged-struct shape (rather than a true C union, for simplicity).
/// Only the field matching `data_type` is meaningful.
#[repr(C)]
pub struct MMDB_entry_data_s {
    /// Whether this struct was actually populated.
    pub has_data: bool,
    /// One of the `MMDB_DATA_TYPE_*` constants above.
    pub data_type: c_int,
    /// Valid when `data_type == MMDB_DATA_TYPE_UTF8_STRING`. NUL-terminated,
    /// owned by this struct; freed by [`MMDB_free_entry_data_list`].
    pub utf8_string: *const c_char,
    /// Byte length of `utf8_string`/`bytes`, excluding any NUL terminator.
    pub string_length: u32,
    /// Valid when `data_type == MMDB_DATA_TYPE_BYTES`. Borrowed from the
    /// database's backing buffer; valid for the database's lifetime.
    pub bytes: *const u8,
    /// Valid when `data_type == MMDB_DATA_TYPE_DOUBLE`.
    pub double_value: f64,
    /// Valid when `data_type == MMDB_DATA_TYPE_FLOAT`.
    pub float_value: f32,
    /// Valid when `data_type == MMDB_DATA_TYPE_UINT16`.
    pub uint16: u16,
    /// Valid when `data_type == MMDB_DATA_TYPE_UINT32`.
    pub uint32: u32,
    /// Valid when `data_type == MMDB_DATA_TYPE_INT32`.
    pub int32: i32,
    /// Valid when `data_type == MMDB_DATA_TYPE_UINT64`.
    pub uint64: u64,
    /// Valid when `data_type == MMDB_DATA_TYPE_UINT128`.
    pub uint128: u128,
    /// Valid when `data_type == MMDB_DATA_TYPE_BOOLEAN`.
    pub boolean: bool,
    /// For `MMDB_DATA_TYPE_MAP`/`MMDB_DATA_TYPE_ARRAY`, the number of
    /// entries/elements. Zero otherwise.
    pub data_size: u32,
    /// The data-section offset this value was decoded from.
    pub offset: u32,
}

/// A node in a flattened, depth-first value list.
#[repr(C)]
pub struct MMDB_entry_data_list_s {
    /// This node's payload.
    pub entry_data: MMDB_entry_data_s,
    /// The next node, or NULL at the end of the list.
    pub next: *mut MMDB_entry_data_list_s,
    /// Unused; present for struct-layout compatibility.
    pub pool: *mut c_void,
}

// ============================================================================
// ERROR CODES
// ============================================================================

const MMDB_SUCCESS: c_int = 0;
const MMDB_FILE_OPEN_ERROR: c_int = 1;
const MMDB_CORRUPT_SEARCH_TREE_ERROR: c_int = 2;
const MMDB_INVALID_METADATA_ERROR: c_int = 3;
const MMDB_IO_ERROR: c_int = 4;
const MMDB_OUT_OF_MEMORY_ERROR: c_int = 5;
const MMDB_UNKNOWN_DATABASE_FORMAT_ERROR: c_int = 6;
const MMDB_INVALID_DATA_ERROR: c_int = 7;
const MMDB_INVALID_LOOKUP_PATH_ERROR: c_int = 8;
const MMDB_LOOKUP_PATH_DOES_NOT_MATCH_DATA_ERROR: c_int = 9;
const MMDB_IPV6_LOOKUP_IN_IPV4_DATABASE_ERROR: c_int = 100;

fn empty_result() -> MMDB_lookup_result_s {
    MMDB_lookup_result_s {
        found_entry: false,
        entry: MMDB_entry_s {
            mmdb: ptr::null(),
            offset: 0,
        },
        netmask: 0,
    }
}

// ============================================================================
// CORE API
// ============================================================================

/// Open a database file.
///
/// # Safety
/// `filename` must be a valid NUL-terminated C string. `mmdb` must point
/// at valid, writable memory for an `MMDB_s`.
#[no_mangle]
pub unsafe extern "C" fn MMDB_open(filename: *const c_char, flags: u32, mmdb: *mut MMDB_s) -> c_int {
    if filename.is_null() || mmdb.is_null() {
        return MMDB_FILE_OPEN_ERROR;
    }
    ptr::write_bytes(mmdb, 0, 1);

    let filename_str = match CStr::from_ptr(filename).to_str() {
        Ok(s) => s,
        Err(_) => return MMDB_FILE_OPEN_ERROR,
    };

    let reader = match Reader::open(filename_str) {
        Ok(r) => r,
        Err(err) => return err.code(),
    };

    let filename_copy = match CString::new(filename_str) {
        Ok(s) => s.into_raw(),
        Err(_) => return MMDB_OUT_OF_MEMORY_ERROR,
    };

    (*mmdb)._reader = Box::into_raw(Box::new(reader));
    (*mmdb).flags = flags;
    (*mmdb).filename = filename_copy;
    (*mmdb).file_size = 0;

    MMDB_SUCCESS
}

unsafe fn reader_of<'a>(mmdb: *const MMDB_s) -> Option<&'a Reader> {
    if mmdb.is_null() || (*mmdb)._reader.is_null() {
        None
    } else {
        Some(&*(*mmdb)._reader)
    }
}

/// Look up an IP address given as text.
///
/// # Safety
/// `mmdb` must be a database opened by [`MMDB_open`]. `ipstr` must be a
/// valid NUL-terminated C string. `gai_error`/`mmdb_error`, if non-NULL,
/// must point at writable memory.
#[no_mangle]
pub unsafe extern "C" fn MMDB_lookup_string(
    mmdb: *const MMDB_s,
    ipstr: *const c_char,
    gai_error: *mut c_int,
    mmdb_error: *mut c_int,
) -> MMDB_lookup_result_s {
    if !gai_error.is_null() {
        *gai_error = 0;
    }

    let set_error = |code: c_int| {
        if !mmdb_error.is_null() {
            *mmdb_error = code;
        }
        empty_result()
    };

    if ipstr.is_null() {
        return set_error(MMDB_INVALID_DATA_ERROR);
    }
    let Some(reader) = reader_of(mmdb) else {
        return set_error(MMDB_INVALID_DATA_ERROR);
    };
    let ip_str = match CStr::from_ptr(ipstr).to_str() {
        Ok(s) => s,
        Err(_) => return set_error(MMDB_INVALID_DATA_ERROR),
    };

    match reader.lookup_string(ip_str) {
        Ok(result) => {
            if !mmdb_error.is_null() {
                *mmdb_error = MMDB_SUCCESS;
            }
            MMDB_lookup_result_s {
                found_entry: result.found,
                entry: MMDB_entry_s {
                    mmdb,
                    offset: result.entry.offset(),
                },
                netmask: result.netmask as u16,
            }
        }
        Err(err) => set_error(err.code()),
    }
}

/// Look up an IP address given as a `sockaddr`.
///
/// # Safety
/// Same requirements as [`MMDB_lookup_string`], plus `sockaddr` must be a
/// valid `AF_INET`/`AF_INET6` socket address.
#[cfg(unix)]
#[no_mangle]
pub unsafe extern "C" fn MMDB_lookup_sockaddr(
    mmdb: *const MMDB_s,
    sockaddr: *const libc::sockaddr,
    mmdb_error: *mut c_int,
) -> MMDB_lookup_result_s {
    let set_error = |code: c_int| {
        if !mmdb_error.is_null() {
            *mmdb_error = code;
        }
        empty_result()
    };

    if sockaddr.is_null() {
        return set_error(MMDB_INVALID_DATA_ERROR);
    }

    let ip_addr = match (*sockaddr).sa_family as i32 {
        libc::AF_INET => {
            let sa = sockaddr as *const libc::sockaddr_in;
            IpAddr::V4(Ipv4Addr::from(u32::from_be((*sa).sin_addr.s_addr)))
        }
        libc::AF_INET6 => {
            let sa = sockaddr as *const libc::sockaddr_in6;
            IpAddr::V6(Ipv6Addr::from((*sa).sin6_addr.s6_addr))
        }
        _ => return set_error(MMDB_INVALID_DATA_ERROR),
    };

    let ip_cstr = match CString::new(ip_addr.to_string()) {
        Ok(s) => s,
        Err(_) => return set_error(MMDB_OUT_OF_MEMORY_ERROR),
    };
    let mut gai_error = 0;
    MMDB_lookup_string(mmdb, ip_cstr.as_ptr(), &mut gai_error, mmdb_error)
}

/// Look up an IP address given as a Windows `SOCKADDR`.
///
/// # Safety
/// Same requirements as [`MMDB_lookup_string`], plus `sockaddr` must be a
/// valid `AF_INET`/`AF_INET6` socket address.
#[cfg(windows)]
#[no_mangle]
pub unsafe extern "C" fn MMDB_lookup_sockaddr(
    mmdb: *const MMDB_s,
    sockaddr: *const winapi::shared::ws2def::SOCKADDR,
    mmdb_error: *mut c_int,
) -> MMDB_lookup_result_s {
    use winapi::shared::ws2def::{AF_INET, AF_INET6, SOCKADDR_IN};
    use winapi::shared::ws2ipdef::SOCKADDR_IN6_LH;

    let set_error = |code: c_int| {
        if !mmdb_error.is_null() {
            *mmdb_error = code;
        }
        empty_result()
    };

    if sockaddr.is_null() {
        return set_error(MMDB_INVALID_DATA_ERROR);
    }

    let ip_addr = match (*sockaddr).sa_family as i32 {
        AF_INET => {
            let sa = sockaddr as *const SOCKADDR_IN;
            IpAddr::V4(Ipv4Addr::from(u32::from_be(*(*sa).sin_addr.S_un.S_addr())))
        }
        AF_INET6 => {
            let sa = sockaddr as *const SOCKADDR_IN6_LH;
            IpAddr::V6(Ipv6Addr::from(*(*sa).sin6_addr.u.Byte()))
        }
        _ => return set_error(MMDB_INVALID_DATA_ERROR),
    };

    let ip_cstr = match CString::new(ip_addr.to_string()) {
        Ok(s) => s,
        Err(_) => return set_error(MMDB_OUT_OF_MEMORY_ERROR),
    };
    let mut gai_error = 0;
    MMDB_lookup_string(mmdb, ip_cstr.as_ptr(), &mut gai_error, mmdb_error)
}

unsafe fn entry_data_s_from_value(value: &Value<'_>, offset: u32) -> MMDB_entry_data_s {
    let mut out = MMDB_entry_data_s {
        has_data: true,
        data_type: 0,
        utf8_string: ptr::null(),
        string_length: 0,
        bytes: ptr::null(),
        double_value: 0.0,
        float_value: 0.0,
        uint16: 0,
        uint32: 0,
        int32: 0,
        uint64: 0,
        uint128: 0,
        boolean: false,
        data_size: 0,
        offset,
    };
    match value {
        Value::String(s) => {
            out.data_type = MMDB_DATA_TYPE_UTF8_STRING;
            out.string_length = s.len() as u32;
            out.utf8_string = CString::new(*s).map(CString::into_raw).unwrap_or(ptr::null_mut());
        }
        Value::Double(d) => {
            out.data_type = MMDB_DATA_TYPE_DOUBLE;
            out.double_value = *d;
        }
        Value::Float(f) => {
            out.data_type = MMDB_DATA_TYPE_FLOAT;
            out.float_value = *f;
        }
        Value::Bytes(b) => {
            out.data_type = MMDB_DATA_TYPE_BYTES;
            out.string_length = b.len() as u32;
            out.bytes = b.as_ptr();
        }
        Value::Uint16(n) => {
            out.data_type = MMDB_DATA_TYPE_UINT16;
            out.uint16 = *n;
        }
        Value::Uint32(n) => {
            out.data_type = MMDB_DATA_TYPE_UINT32;
            out.uint32 = *n;
        }
        Value::Int32(n) => {
            out.data_type = MMDB_DATA_TYPE_INT32;
            out.int32 = *n;
        }
        Value::Uint64(n) => {
            out.data_type = MMDB_DATA_TYPE_UINT64;
            out.uint64 = *n;
        }
        Value::Uint128(n) => {
            out.data_type = MMDB_DATA_TYPE_UINT128;
            out.uint128 = *n;
        }
        Value::Bool(b) => {
            out.data_type = MMDB_DATA_TYPE_BOOLEAN;
            out.boolean = *b;
        }
        Value::Map(entries) => {
            out.data_type = MMDB_DATA_TYPE_MAP;
            out.data_size = entries.len() as u32;
        }
        Value::Array(items) => {
            out.data_type = MMDB_DATA_TYPE_ARRAY;
            out.data_size = items.len() as u32;
        }
    }
    out
}

/// Navigate `path` (a NULL-terminated array of NUL-terminated C strings)
/// from `start` and fill `entry_data`.
///
/// # Safety
/// `start`, `entry_data`, and `path` must be valid, non-NULL pointers;
/// `path`'s elements up to its NULL terminator must be valid C strings.
#[no_mangle]
pub unsafe extern "C" fn MMDB_aget_value(
    start: *mut MMDB_entry_s,
    entry_data: *mut MMDB_entry_data_s,
    path: *const *const c_char,
) -> c_int {
    if start.is_null() || entry_data.is_null() || path.is_null() {
        return MMDB_INVALID_DATA_ERROR;
    }
    let Some(reader) = reader_of((*start).mmdb) else {
        return MMDB_INVALID_DATA_ERROR;
    };

    let mut segments = Vec::new();
    let mut owned = Vec::new();
    let mut cursor = path;
    while !(*cursor).is_null() {
        match CStr::from_ptr(*cursor).to_str() {
            Ok(s) => owned.push(s.to_string()),
            Err(_) => return MMDB_INVALID_LOOKUP_PATH_ERROR,
        }
        cursor = cursor.add(1);
    }
    segments.extend(owned.iter().map(String::as_str));

    let entry = reader.entry_at((*start).offset);
    match entry.get_value(&segments) {
        Ok(PathOutcome::Found(value)) => {
            *entry_data = entry_data_s_from_value(&value, (*start).offset);
            MMDB_SUCCESS
        }
        Ok(PathOutcome::NotFound) => {
            ptr::write_bytes(entry_data, 0, 1);
            (*entry_data).has_data = false;
            MMDB_SUCCESS
        }
        Err(err) => err.code(),
    }
}

fn entry_data_list_s_from(list: &EntryDataList<'_>) -> Box<MMDB_entry_data_list_s> {
    let entry_data = match &list.entry_data {
        EntryData::MapHeader(count) => MMDB_entry_data_s {
            has_data: true,
            data_type: MMDB_DATA_TYPE_MAP,
            utf8_string: ptr::null(),
            string_length: 0,
            bytes: ptr::null(),
            double_value: 0.0,
            float_value: 0.0,
            uint16: 0,
            uint32: 0,
            int32: 0,
            uint64: 0,
            uint128: 0,
            boolean: false,
            data_size: *count as u32,
            offset: list.offset,
        },
        EntryData::ArrayHeader(count) => MMDB_entry_data_s {
            has_data: true,
            data_type: MMDB_DATA_TYPE_ARRAY,
            utf8_string: ptr::null(),
            string_length: 0,
            bytes: ptr::null(),
            double_value: 0.0,
            float_value: 0.0,
            uint16: 0,
            uint32: 0,
            int32: 0,
            uint64: 0,
            uint128: 0,
            boolean: false,
            data_size: *count as u32,
            offset: list.offset,
        },
        leaf => {
            let value = match leaf {
                EntryData::String(s) => Value::String(*s),
                EntryData::Double(d) => Value::Double(*d),
                EntryData::Bytes(b) => Value::Bytes(*b),
                EntryData::Uint16(n) => Value::Uint16(*n),
                EntryData::Uint32(n) => Value::Uint32(*n),
                EntryData::Int32(n) => Value::Int32(*n),
                EntryData::Uint64(n) => Value::Uint64(*n),
                EntryData::Uint128(n) => Value::Uint128(*n),
                EntryData::Bool(b) => Value::Bool(*b),
                EntryData::Float(f) => Value::Float(*f),
                EntryData::MapHeader(_) | EntryData::ArrayHeader(_) => unreachable!(),
            };
            unsafe { entry_data_s_from_value(&value, list.offset) }
        }
    };
    Box::new(MMDB_entry_data_list_s {
        entry_data,
        next: ptr::null_mut(),
        pool: ptr::null_mut(),
    })
}

/// Materialize the full value subtree at `start` as a flattened,
/// depth-first linked list.
///
/// # Safety
/// `start` and `entry_data_list` must be valid, non-NULL pointers.
#[no_mangle]
pub unsafe extern "C" fn MMDB_get_entry_data_list(
    start: *mut MMDB_entry_s,
    entry_data_list: *mut *mut MMDB_entry_data_list_s,
) -> c_int {
    if start.is_null() || entry_data_list.is_null() {
        return MMDB_INVALID_DATA_ERROR;
    }
    let Some(reader) = reader_of((*start).mmdb) else {
        return MMDB_INVALID_DATA_ERROR;
    };

    let entry = reader.entry_at((*start).offset);
    let list = match entry.get_entry_data_list() {
        Ok(list) => list,
        Err(err) => return err.code(),
    };

    let mut nodes: Vec<&EntryDataList<'_>> = Vec::new();
    let mut cur: Option<&EntryDataList<'_>> = Some(list.as_ref());
    while let Some(node) = cur {
        nodes.push(node);
        cur = node.next.as_deref();
    }

    let mut head: *mut MMDB_entry_data_list_s = ptr::null_mut();
    let mut tail: *mut MMDB_entry_data_list_s = ptr::null_mut();
    for node in nodes {
        let boxed = Box::into_raw(entry_data_list_s_from(node));
        if head.is_null() {
            head = boxed;
        } else {
            (*tail).next = boxed;
        }
        tail = boxed;
    }

    *entry_data_list = head;
    MMDB_SUCCESS
}

/// Free a list returned by [`MMDB_get_entry_data_list`].
///
/// # Safety
/// `entry_data_list` must have been returned by
/// [`MMDB_get_entry_data_list`], or be NULL.
#[no_mangle]
pub unsafe extern "C" fn MMDB_free_entry_data_list(entry_data_list: *mut MMDB_entry_data_list_s) {
    let mut current = entry_data_list;
    while !current.is_null() {
        let next = (*current).next;
        let node = Box::from_raw(current);
        if node.entry_data.data_type == MMDB_DATA_TYPE_UTF8_STRING && !node.entry_data.utf8_string.is_null() {
            let _ = CString::from_raw(node.entry_data.utf8_string as *mut c_char);
        }
        current = next;
    }
}

/// Close a database opened by [`MMDB_open`].
///
/// # Safety
/// `mmdb` must have been populated by [`MMDB_open`], or be NULL/zeroed.
#[no_mangle]
pub unsafe extern "C" fn MMDB_close(mmdb: *mut MMDB_s) {
    if mmdb.is_null() {
        return;
    }
    if !(*mmdb)._reader.is_null() {
        let _ = Box::from_raw((*mmdb)._reader);
        (*mmdb)._reader = ptr::null_mut();
    }
    if !(*mmdb).filename.is_null() {
        let _ = CString::from_raw((*mmdb).filename as *mut c_char);
        (*mmdb).filename = ptr::null();
    }
}

/// The library version string.
#[no_mangle]
pub extern "C" fn MMDB_lib_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}

/// Convert an `MMDB_*_ERROR` code to a human-readable, static string.
#[no_mangle]
pub extern "C" fn MMDB_strerror(error_code: c_int) -> *const c_char {
    let msg = match error_code {
        MMDB_SUCCESS => "Success\0",
        MMDB_FILE_OPEN_ERROR => "Error opening database file\0",
        MMDB_CORRUPT_SEARCH_TREE_ERROR => "The MMDB search tree is corrupt\0",
        MMDB_INVALID_METADATA_ERROR => "Invalid metadata\0",
        MMDB_IO_ERROR => "I/O error\0",
        MMDB_OUT_OF_MEMORY_ERROR => "Out of memory\0",
        MMDB_UNKNOWN_DATABASE_FORMAT_ERROR => "Unknown database format\0",
        MMDB_INVALID_DATA_ERROR => "Invalid or corrupt data\0",
        MMDB_INVALID_LOOKUP_PATH_ERROR => "Invalid lookup path\0",
        MMDB_LOOKUP_PATH_DOES_NOT_MATCH_DATA_ERROR => "Lookup path does not match data\0",
        MMDB_IPV6_LOOKUP_IN_IPV4_DATABASE_ERROR => {
            "You attempted to look up an IPv6 address in an IPv4-only database\0"
        }
        _ => "Unknown error\0",
    };
    msg.as_ptr() as *const c_char
}

// ============================================================================
// STUBS
// ============================================================================

/// Not implemented: this crate has no raw node-record accessor exposed
/// through the C ABI. Always returns an error.
///
/// # Safety
/// This function only validates its pointer arguments before returning.
#[no_mangle]
pub unsafe extern "C" fn MMDB_read_node(_mmdb: *const MMDB_s, _node_number: u32, _node: *mut c_void) -> c_int {
    MMDB_INVALID_DATA_ERROR
}

/// Not implemented: streaming the value tree to a `FILE*` is not exposed
/// through the C ABI. Use [`MMDB_get_entry_data_list`] and walk the list
/// from Rust or C instead. Always returns an error.
///
/// # Safety
/// This function only validates its pointer arguments before returning.
#[no_mangle]
pub unsafe extern "C" fn MMDB_dump_entry_data_list(
    _stream: *mut libc::FILE,
    _entry_data_list: *const MMDB_entry_data_list_s,
    _indent: c_int,
) -> c_int {
    MMDB_INVALID_DATA_ERROR
}
