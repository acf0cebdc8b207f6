//! Data-section value decoding.
//!
//! Decodes a single typed value at a byte offset in the data section,
//! resolving pointer-compression jumps, and can materialize an entire
//! value subtree either as an owned recursive [`Value`] tree or as a
//! flattened depth-first [`EntryDataList`] mirroring the reference
//! `MMDB_entry_data_list_s` linked list.
//!
//! Control byte layout: high 3 bits select the type, low 5 bits the
//! payload size (with extensions for 29/30/31). Type 0 means "extended":
//! the real type is `7 + next_byte`. See the MaxMind DB format spec.

use crate::error::{MmdbError, Result};

/// A decoded MMDB value, borrowing strings and byte blobs directly from
/// the database's backing buffer.
///
/// `Value` never outlives the `Reader` it was decoded from: the lifetime
/// parameter ties every borrowed slice to the underlying mapped (or
/// owned) bytes. Maps are represented as an ordered sequence of
/// key/value pairs, not a `HashMap`, because the wire format is itself
/// ordered and because a linear scan is the literal implementation of
/// path lookup (see [`Decoder::get_path`]), not an accident of a
/// different data structure.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// UTF-8 string.
    String(&'a str),
    /// IEEE-754 double precision float.
    Double(f64),
    /// Raw byte blob.
    Bytes(&'a [u8]),
    /// Unsigned 16-bit integer.
    Uint16(u16),
    /// Unsigned 32-bit integer.
    Uint32(u32),
    /// Signed 32-bit integer.
    Int32(i32),
    /// Unsigned 64-bit integer.
    Uint64(u64),
    /// Unsigned 128-bit integer.
    Uint128(u128),
    /// Ordered key/value pairs.
    Map(Vec<(&'a str, Value<'a>)>),
    /// Ordered elements.
    Array(Vec<Value<'a>>),
    /// Boolean.
    Bool(bool),
    /// IEEE-754 single precision float.
    Float(f32),
}

impl<'a> Value<'a> {
    /// The `MMDB_DATA_TYPE_*` constant for this value's type.
    pub fn type_id(&self) -> u8 {
        match self {
            Value::String(_) => 2,
            Value::Double(_) => 3,
            Value::Bytes(_) => 4,
            Value::Uint16(_) => 5,
            Value::Uint32(_) => 6,
            Value::Map(_) => 7,
            Value::Int32(_) => 8,
            Value::Uint64(_) => 9,
            Value::Uint128(_) => 10,
            Value::Array(_) => 11,
            Value::Bool(_) => 14,
            Value::Float(_) => 15,
        }
    }
}

/// A single node's payload in a flattened [`EntryDataList`].
///
/// Map and array headers carry only their entry/element count; their
/// members follow immediately afterward in the list, exactly as they do
/// in the reference `MMDB_entry_data_list_s` chain.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryData<'a> {
    /// UTF-8 string.
    String(&'a str),
    /// IEEE-754 double precision float.
    Double(f64),
    /// Raw byte blob.
    Bytes(&'a [u8]),
    /// Unsigned 16-bit integer.
    Uint16(u16),
    /// Unsigned 32-bit integer.
    Uint32(u32),
    /// Signed 32-bit integer.
    Int32(i32),
    /// Unsigned 64-bit integer.
    Uint64(u64),
    /// Unsigned 128-bit integer.
    Uint128(u128),
    /// Boolean.
    Bool(bool),
    /// IEEE-754 single precision float.
    Float(f32),
    /// A map header; `count` entries follow as alternating key/value subtrees.
    MapHeader(usize),
    /// An array header; `count` elements follow.
    ArrayHeader(usize),
}

impl<'a> EntryData<'a> {
    /// The `MMDB_DATA_TYPE_*` constant for this node's type.
    pub fn type_id(&self) -> u8 {
        match self {
            EntryData::String(_) => 2,
            EntryData::Double(_) => 3,
            EntryData::Bytes(_) => 4,
            EntryData::Uint16(_) => 5,
            EntryData::Uint32(_) => 6,
            EntryData::MapHeader(_) => 7,
            EntryData::Int32(_) => 8,
            EntryData::Uint64(_) => 9,
            EntryData::Uint128(_) => 10,
            EntryData::ArrayHeader(_) => 11,
            EntryData::Bool(_) => 14,
            EntryData::Float(_) => 15,
        }
    }
}

/// A single node in a depth-first linearization of a decoded value tree.
///
/// Owns its tail via a `Box` chain; dropping the head frees the whole
/// chain. This mirrors `MMDB_entry_data_list_s`, which this type's
/// `offset` and [`EntryData::type_id`] are deliberately compatible with.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDataList<'a> {
    /// This node's decoded payload.
    pub entry_data: EntryData<'a>,
    /// The data-section offset this node was decoded from (after
    /// following at most one pointer).
    pub offset: u32,
    /// The remainder of the depth-first sequence, if any.
    pub next: Option<Box<EntryDataList<'a>>>,
}

/// The outcome of a [`Decoder::get_path`] navigation.
#[derive(Debug, Clone, PartialEq)]
pub enum PathOutcome<'a> {
    /// The path resolved to a value.
    Found(Value<'a>),
    /// A map key or array index along the path did not exist. This is a
    /// normal outcome, not an error.
    NotFound,
}

/// The shape of a container value, as determined without materializing
/// its contents.
enum Container {
    /// A map with this many key/value pairs.
    Map(usize),
    /// An array with this many elements.
    Array(usize),
}

/// Decodes values out of an MMDB data section.
///
/// `buffer` is the full data-section slice; all offsets passed to this
/// decoder's methods are relative to its start, matching the offsets
/// produced by [`crate::tree::SearchTree`] and stored in metadata.
pub struct Decoder<'a> {
    buffer: &'a [u8],
}

impl<'a> Decoder<'a> {
    /// Create a decoder over a data section.
    pub fn new(buffer: &'a [u8]) -> Self {
        Decoder { buffer }
    }

    /// Decode a single value (including its full subtree) at `offset`.
    pub fn decode_one(&self, offset: u32) -> Result<Value<'a>> {
        let mut cursor = offset as usize;
        self.decode_value(&mut cursor, false)
    }

    /// Materialize the full value tree at `offset` as a flattened,
    /// depth-first list of decoded nodes.
    pub fn decode_tree(&self, offset: u32) -> Result<Box<EntryDataList<'a>>> {
        let mut cursor = offset as usize;
        let mut nodes = Vec::new();
        self.flatten(&mut cursor, false, &mut nodes)?;
        Ok(Self::nodes_to_list(nodes))
    }

    /// Navigate `path` from the value at `offset` without materializing
    /// values along the way that aren't on the path.
    pub fn get_path(&self, offset: u32, path: &[&str]) -> Result<PathOutcome<'a>> {
        let mut cursor = offset as usize;
        self.navigate(&mut cursor, path)
    }

    fn byte(&self, at: usize) -> Result<u8> {
        self.buffer
            .get(at)
            .copied()
            .ok_or_else(|| MmdbError::InvalidData(format!("offset {} out of bounds", at)))
    }

    fn slice(&self, start: usize, len: usize) -> Result<&'a [u8]> {
        let end = start
            .checked_add(len)
            .ok_or_else(|| MmdbError::InvalidData("length overflow".to_string()))?;
        if end > self.buffer.len() {
            return Err(MmdbError::InvalidData(format!(
                "range {}..{} out of bounds (data section is {} bytes)",
                start,
                end,
                self.buffer.len()
            )));
        }
        Ok(&self.buffer[start..end])
    }

    /// Read the control byte at `cursor`, advancing past it, and split it
    /// into `(type_id, payload)`.
    fn read_control(&self, cursor: &mut usize) -> Result<(u8, u8)> {
        let ctrl = self.byte(*cursor)?;
        *cursor += 1;
        Ok((ctrl >> 5, ctrl & 0x1F))
    }

    fn decode_size(&self, cursor: &mut usize, size_bits: u8) -> Result<usize> {
        match size_bits {
            0..=28 => Ok(size_bits as usize),
            29 => {
                let b0 = self.byte(*cursor)?;
                *cursor += 1;
                Ok(29 + b0 as usize)
            }
            30 => {
                let bytes = self.slice(*cursor, 2)?;
                *cursor += 2;
                Ok(29 + 256 + u16::from_be_bytes([bytes[0], bytes[1]]) as usize)
            }
            31 => {
                let bytes = self.slice(*cursor, 3)?;
                *cursor += 3;
                let v = ((bytes[0] as usize) << 16) | ((bytes[1] as usize) << 8) | bytes[2] as usize;
                Ok(29 + 256 + 65536 + v)
            }
            _ => unreachable!("size_bits is masked to 5 bits"),
        }
    }

    /// Decode a pointer's target offset from its payload (the low 5 bits
    /// of the control byte), advancing `cursor` past the pointer's bytes.
    fn decode_pointer_target(&self, cursor: &mut usize, payload: u8) -> Result<u32> {
        let size = (payload >> 3) & 0x3;
        let low3 = (payload & 0x7) as u32;
        match size {
            0 => {
                let b0 = self.byte(*cursor)? as u32;
                *cursor += 1;
                Ok((low3 << 8) | b0)
            }
            1 => {
                let bytes = self.slice(*cursor, 2)?;
                *cursor += 2;
                let v = (low3 << 16) | ((bytes[0] as u32) << 8) | bytes[1] as u32;
                Ok(2048 + v)
            }
            2 => {
                let bytes = self.slice(*cursor, 3)?;
                *cursor += 3;
                let v = (low3 << 24)
                    | ((bytes[0] as u32) << 16)
                    | ((bytes[1] as u32) << 8)
                    | bytes[2] as u32;
                Ok(526_336 + v)
            }
            _ => {
                let bytes = self.slice(*cursor, 4)?;
                *cursor += 4;
                Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
            }
        }
    }

    fn read_uint(&self, cursor: &mut usize, size: usize, max: usize, what: &str) -> Result<u64> {
        if size > max {
            return Err(MmdbError::InvalidData(format!(
                "{} payload of {} bytes exceeds maximum of {}",
                what, size, max
            )));
        }
        let bytes = self.slice(*cursor, size)?;
        *cursor += size;
        let mut value = 0u64;
        for &b in bytes {
            value = (value << 8) | b as u64;
        }
        Ok(value)
    }

    fn read_uint128(&self, cursor: &mut usize, size: usize) -> Result<u128> {
        if size > 16 {
            return Err(MmdbError::InvalidData(format!(
                "uint128 payload of {} bytes exceeds maximum of 16",
                size
            )));
        }
        let bytes = self.slice(*cursor, size)?;
        *cursor += size;
        let mut value = 0u128;
        for &b in bytes {
            value = (value << 8) | b as u128;
        }
        Ok(value)
    }

    fn read_int32(&self, cursor: &mut usize, size: usize) -> Result<i32> {
        if size > 4 {
            return Err(MmdbError::InvalidData(format!(
                "int32 payload of {} bytes exceeds maximum of 4",
                size
            )));
        }
        let bytes = self.slice(*cursor, size)?;
        *cursor += size;
        let mut value: i32 = if size > 0 && bytes[0] & 0x80 != 0 { -1 } else { 0 };
        for &b in bytes {
            value = (value << 8) | b as i32;
        }
        Ok(value)
    }

    /// Decode the value at `cursor`, resolving at most one pointer hop.
    /// `from_pointer` is true when this call is itself the target of a
    /// pointer; a pointer-to-pointer in that state is rejected as
    /// `InvalidData` rather than followed.
    fn decode_value(&self, cursor: &mut usize, from_pointer: bool) -> Result<Value<'a>> {
        let (type_id, payload) = self.read_control(cursor)?;

        if type_id == 1 {
            if from_pointer {
                return Err(MmdbError::InvalidData(
                    "pointer resolves to another pointer".to_string(),
                ));
            }
            let target = self.decode_pointer_target(cursor, payload)?;
            let mut target_cursor = target as usize;
            return self.decode_value(&mut target_cursor, true);
        }

        match type_id {
            0 => self.decode_extended_value(cursor, payload),
            2 => {
                let len = self.decode_size(cursor, payload)?;
                let bytes = self.slice(*cursor, len)?;
                *cursor += len;
                let s = std::str::from_utf8(bytes)
                    .map_err(|_| MmdbError::InvalidData("string is not valid UTF-8".to_string()))?;
                Ok(Value::String(s))
            }
            3 => {
                let len = self.decode_size(cursor, payload)?;
                if len != 8 {
                    return Err(MmdbError::InvalidData(format!(
                        "double payload must be 8 bytes, got {}",
                        len
                    )));
                }
                let bytes = self.slice(*cursor, 8)?;
                *cursor += 8;
                Ok(Value::Double(f64::from_be_bytes(bytes.try_into().unwrap())))
            }
            4 => {
                let len = self.decode_size(cursor, payload)?;
                let bytes = self.slice(*cursor, len)?;
                *cursor += len;
                Ok(Value::Bytes(bytes))
            }
            5 => {
                let len = self.decode_size(cursor, payload)?;
                let v = self.read_uint(cursor, len, 2, "uint16")?;
                Ok(Value::Uint16(v as u16))
            }
            6 => {
                let len = self.decode_size(cursor, payload)?;
                let v = self.read_uint(cursor, len, 4, "uint32")?;
                Ok(Value::Uint32(v as u32))
            }
            7 => {
                let count = self.decode_size(cursor, payload)?;
                let mut entries = Vec::with_capacity(count);
                for _ in 0..count {
                    let key = match self.decode_value(cursor, false)? {
                        Value::String(s) => s,
                        other => {
                            return Err(MmdbError::InvalidData(format!(
                                "map key decoded to {:?} instead of a string",
                                other.type_id()
                            )))
                        }
                    };
                    let value = self.decode_value(cursor, false)?;
                    entries.push((key, value));
                }
                Ok(Value::Map(entries))
            }
            _ => Err(MmdbError::InvalidData(format!(
                "unknown control type {}",
                type_id
            ))),
        }
    }

    fn decode_extended_value(&self, cursor: &mut usize, payload: u8) -> Result<Value<'a>> {
        let raw_ext = self.byte(*cursor)?;
        *cursor += 1;
        let type_id = 7u16 + raw_ext as u16;
        match type_id {
            8 => {
                let len = self.decode_size(cursor, payload)?;
                Ok(Value::Int32(self.read_int32(cursor, len)?))
            }
            9 => {
                let len = self.decode_size(cursor, payload)?;
                Ok(Value::Uint64(self.read_uint(cursor, len, 8, "uint64")?))
            }
            10 => {
                let len = self.decode_size(cursor, payload)?;
                Ok(Value::Uint128(self.read_uint128(cursor, len)?))
            }
            11 => {
                let count = self.decode_size(cursor, payload)?;
                let mut items = Vec::with_capacity(count);
                for _ in 0..count {
                    items.push(self.decode_value(cursor, false)?);
                }
                Ok(Value::Array(items))
            }
            14 => Ok(Value::Bool(payload != 0)),
            15 => {
                let len = self.decode_size(cursor, payload)?;
                if len != 4 {
                    return Err(MmdbError::InvalidData(format!(
                        "float payload must be 4 bytes, got {}",
                        len
                    )));
                }
                let bytes = self.slice(*cursor, 4)?;
                *cursor += 4;
                Ok(Value::Float(f32::from_be_bytes(bytes.try_into().unwrap())))
            }
            _ => Err(MmdbError::InvalidData(format!(
                "unknown extended type {}",
                type_id
            ))),
        }
    }

    /// Advance `cursor` past the value at its current position without
    /// materializing it, for skipping non-matching map/array entries
    /// during path navigation.
    fn skip_value(&self, cursor: &mut usize) -> Result<()> {
        let (type_id, payload) = self.read_control(cursor)?;
        if type_id == 1 {
            self.decode_pointer_target(cursor, payload)?;
            return Ok(());
        }
        match type_id {
            0 => {
                let raw_ext = self.byte(*cursor)?;
                *cursor += 1;
                let ext_type = 7u16 + raw_ext as u16;
                match ext_type {
                    8 | 9 | 10 | 15 => {
                        let len = self.decode_size(cursor, payload)?;
                        *cursor = cursor.checked_add(len).ok_or_else(|| {
                            MmdbError::InvalidData("length overflow".to_string())
                        })?;
                        if *cursor > self.buffer.len() {
                            return Err(MmdbError::InvalidData("value runs past end of data section".to_string()));
                        }
                    }
                    11 => {
                        let count = self.decode_size(cursor, payload)?;
                        for _ in 0..count {
                            self.skip_value(cursor)?;
                        }
                    }
                    14 => {}
                    _ => {
                        return Err(MmdbError::InvalidData(format!(
                            "unknown extended type {}",
                            ext_type
                        )))
                    }
                }
            }
            2 | 4 => {
                let len = self.decode_size(cursor, payload)?;
                *cursor = cursor
                    .checked_add(len)
                    .ok_or_else(|| MmdbError::InvalidData("length overflow".to_string()))?;
                if *cursor > self.buffer.len() {
                    return Err(MmdbError::InvalidData("value runs past end of data section".to_string()));
                }
            }
            3 | 5 | 6 => {
                let len = self.decode_size(cursor, payload)?;
                *cursor = cursor
                    .checked_add(len)
                    .ok_or_else(|| MmdbError::InvalidData("length overflow".to_string()))?;
                if *cursor > self.buffer.len() {
                    return Err(MmdbError::InvalidData("value runs past end of data section".to_string()));
                }
            }
            7 => {
                let count = self.decode_size(cursor, payload)?;
                for _ in 0..count {
                    self.skip_value(cursor)?; // key
                    self.skip_value(cursor)?; // value
                }
            }
            _ => {
                return Err(MmdbError::InvalidData(format!(
                    "unknown control type {}",
                    type_id
                )))
            }
        }
        Ok(())
    }

    /// Classify the value at `cursor` as a map, array, or neither,
    /// resolving at most one pointer hop. `cursor` ends up positioned
    /// immediately after the container's header, pointing at its first
    /// key or element, ready for the caller to iterate.
    fn classify_container(&self, cursor: &mut usize) -> Result<Option<Container>> {
        let (type_id, payload) = self.read_control(cursor)?;
        if type_id == 1 {
            let target = self.decode_pointer_target(cursor, payload)?;
            let mut target_cursor = target as usize;
            let (rtype, rpayload) = self.read_control(&mut target_cursor)?;
            if rtype == 1 {
                return Err(MmdbError::InvalidData(
                    "pointer resolves to another pointer".to_string(),
                ));
            }
            let result = self.classify_from(rtype, rpayload, &mut target_cursor)?;
            *cursor = target_cursor;
            return Ok(result);
        }
        self.classify_from(type_id, payload, cursor)
    }

    fn classify_from(&self, type_id: u8, payload: u8, cursor: &mut usize) -> Result<Option<Container>> {
        match type_id {
            7 => Ok(Some(Container::Map(self.decode_size(cursor, payload)?))),
            0 => {
                let raw_ext = self.byte(*cursor)?;
                *cursor += 1;
                if 7u16 + raw_ext as u16 == 11 {
                    Ok(Some(Container::Array(self.decode_size(cursor, payload)?)))
                } else {
                    Ok(None)
                }
            }
            _ => Ok(None),
        }
    }

    fn navigate(&self, cursor: &mut usize, path: &[&str]) -> Result<PathOutcome<'a>> {
        if path.is_empty() {
            let value = self.decode_value(cursor, false)?;
            return Ok(PathOutcome::Found(value));
        }

        let segment = path[0];
        let rest = &path[1..];

        match self.classify_container(cursor)? {
            Some(Container::Map(count)) => self.navigate_map(cursor, count, segment, rest),
            Some(Container::Array(count)) => self.navigate_array(cursor, count, segment, rest),
            None => Err(MmdbError::LookupPathDoesNotMatchData(format!(
                "path segment {:?} applied to a non-container value",
                segment
            ))),
        }
    }

    fn navigate_map(
        &self,
        cursor: &mut usize,
        count: usize,
        segment: &str,
        rest: &[&str],
    ) -> Result<PathOutcome<'a>> {
        for _ in 0..count {
            let key = match self.decode_value(cursor, false)? {
                Value::String(s) => s,
                other => {
                    return Err(MmdbError::InvalidData(format!(
                        "map key decoded to {:?} instead of a string",
                        other.type_id()
                    )))
                }
            };
            if key == segment {
                return self.navigate(cursor, rest);
            }
            self.skip_value(cursor)?;
        }
        Ok(PathOutcome::NotFound)
    }

    fn navigate_array(
        &self,
        cursor: &mut usize,
        count: usize,
        segment: &str,
        rest: &[&str],
    ) -> Result<PathOutcome<'a>> {
        let index = parse_path_index(segment)?;
        let target = if index < 0 {
            let from_end = (-index) as usize;
            if from_end > count {
                None
            } else {
                Some(count - from_end)
            }
        } else {
            let idx = index as usize;
            if idx >= count {
                None
            } else {
                Some(idx)
            }
        };

        let Some(target) = target else {
            return Ok(PathOutcome::NotFound);
        };

        for i in 0..count {
            if i == target {
                return self.navigate(cursor, rest);
            }
            self.skip_value(cursor)?;
        }
        unreachable!("target index {} was validated against count {}", target, count);
    }

    fn flatten(
        &self,
        cursor: &mut usize,
        from_pointer: bool,
        out: &mut Vec<(EntryData<'a>, u32)>,
    ) -> Result<()> {
        let offset = *cursor as u32;
        let (type_id, payload) = self.read_control(cursor)?;

        if type_id == 1 {
            if from_pointer {
                return Err(MmdbError::InvalidData(
                    "pointer resolves to another pointer".to_string(),
                ));
            }
            let target = self.decode_pointer_target(cursor, payload)?;
            let mut target_cursor = target as usize;
            return self.flatten(&mut target_cursor, true, out);
        }

        match type_id {
            0 => {
                let raw_ext = self.byte(*cursor)?;
                *cursor += 1;
                let ext_type = 7u16 + raw_ext as u16;
                match ext_type {
                    8 => {
                        let len = self.decode_size(cursor, payload)?;
                        out.push((EntryData::Int32(self.read_int32(cursor, len)?), offset));
                    }
                    9 => {
                        let len = self.decode_size(cursor, payload)?;
                        out.push((
                            EntryData::Uint64(self.read_uint(cursor, len, 8, "uint64")?),
                            offset,
                        ));
                    }
                    10 => {
                        let len = self.decode_size(cursor, payload)?;
                        out.push((EntryData::Uint128(self.read_uint128(cursor, len)?), offset));
                    }
                    11 => {
                        let count = self.decode_size(cursor, payload)?;
                        out.push((EntryData::ArrayHeader(count), offset));
                        for _ in 0..count {
                            self.flatten(cursor, false, out)?;
                        }
                    }
                    14 => out.push((EntryData::Bool(payload != 0), offset)),
                    15 => {
                        let len = self.decode_size(cursor, payload)?;
                        if len != 4 {
                            return Err(MmdbError::InvalidData(
                                "float payload must be 4 bytes".to_string(),
                            ));
                        }
                        let bytes = self.slice(*cursor, 4)?;
                        *cursor += 4;
                        out.push((
                            EntryData::Float(f32::from_be_bytes(bytes.try_into().unwrap())),
                            offset,
                        ));
                    }
                    _ => {
                        return Err(MmdbError::InvalidData(format!(
                            "unknown extended type {}",
                            ext_type
                        )))
                    }
                }
            }
            2 => {
                let len = self.decode_size(cursor, payload)?;
                let bytes = self.slice(*cursor, len)?;
                *cursor += len;
                let s = std::str::from_utf8(bytes)
                    .map_err(|_| MmdbError::InvalidData("string is not valid UTF-8".to_string()))?;
                out.push((EntryData::String(s), offset));
            }
            3 => {
                let len = self.decode_size(cursor, payload)?;
                if len != 8 {
                    return Err(MmdbError::InvalidData("double payload must be 8 bytes".to_string()));
                }
                let bytes = self.slice(*cursor, 8)?;
                *cursor += 8;
                out.push((
                    EntryData::Double(f64::from_be_bytes(bytes.try_into().unwrap())),
                    offset,
                ));
            }
            4 => {
                let len = self.decode_size(cursor, payload)?;
                let bytes = self.slice(*cursor, len)?;
                *cursor += len;
                out.push((EntryData::Bytes(bytes), offset));
            }
            5 => {
                let len = self.decode_size(cursor, payload)?;
                let v = self.read_uint(cursor, len, 2, "uint16")?;
                out.push((EntryData::Uint16(v as u16), offset));
            }
            6 => {
                let len = self.decode_size(cursor, payload)?;
                let v = self.read_uint(cursor, len, 4, "uint32")?;
                out.push((EntryData::Uint32(v as u32), offset));
            }
            7 => {
                let count = self.decode_size(cursor, payload)?;
                out.push((EntryData::MapHeader(count), offset));
                for _ in 0..count {
                    self.flatten(cursor, false, out)?; // key
                    self.flatten(cursor, false, out)?; // value
                }
            }
            _ => {
                return Err(MmdbError::InvalidData(format!(
                    "unknown control type {}",
                    type_id
                )))
            }
        }
        Ok(())
    }

    fn nodes_to_list(mut nodes: Vec<(EntryData<'a>, u32)>) -> Box<EntryDataList<'a>> {
        let mut tail: Option<Box<EntryDataList<'a>>> = None;
        while let Some((entry_data, offset)) = nodes.pop() {
            tail = Some(Box::new(EntryDataList {
                entry_data,
                offset,
                next: tail,
            }));
        }
        tail.expect("flatten always produces at least one node")
    }
}

/// Parse an array path segment per the fixed policy: an optional leading
/// `-` for negative (from-the-end) indices, no other sign character, and
/// no leading zeros other than the literal `"0"`.
fn parse_path_index(segment: &str) -> Result<i64> {
    let invalid = || {
        MmdbError::InvalidLookupPath(format!(
            "{:?} is not a valid array index (digits only, optional leading '-', no leading zeros)",
            segment
        ))
    };

    let (negative, digits) = match segment.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, segment),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(invalid());
    }
    if negative && digits == "0" {
        return Err(invalid());
    }

    let magnitude: i64 = digits.parse().map_err(|_| invalid())?;
    Ok(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_string(s: &str, buf: &mut Vec<u8>) {
        let len = s.len();
        assert!(len < 29);
        buf.push(0x40 | len as u8);
        buf.extend_from_slice(s.as_bytes());
    }

    fn encode_uint32(n: u32, buf: &mut Vec<u8>) {
        buf.push(0xC4);
        buf.extend_from_slice(&n.to_be_bytes());
    }

    fn encode_map_header(count: usize, buf: &mut Vec<u8>) {
        assert!(count < 29);
        buf.push(0xE0 | count as u8);
    }

    #[test]
    fn decodes_scalar_string() {
        let mut buf = Vec::new();
        encode_string("hello", &mut buf);
        let decoder = Decoder::new(&buf);
        assert_eq!(decoder.decode_one(0).unwrap(), Value::String("hello"));
    }

    #[test]
    fn decodes_simple_map() {
        let mut buf = Vec::new();
        encode_map_header(2, &mut buf);
        encode_string("country", &mut buf);
        encode_string("US", &mut buf);
        encode_string("asn", &mut buf);
        encode_uint32(13335, &mut buf);

        let decoder = Decoder::new(&buf);
        let value = decoder.decode_one(0).unwrap();
        match value {
            Value::Map(entries) => {
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[0], ("country", Value::String("US")));
                assert_eq!(entries[1], ("asn", Value::Uint32(13335)));
            }
            other => panic!("expected map, got {:?}", other),
        }
    }

    #[test]
    fn empty_map_and_array_decode_cleanly() {
        let mut buf = Vec::new();
        encode_map_header(0, &mut buf);
        let decoder = Decoder::new(&buf);
        assert_eq!(decoder.decode_one(0).unwrap(), Value::Map(vec![]));

        let mut buf = Vec::new();
        buf.push(0x00); // type 0, size 0
        buf.push(0x04); // extended type 11 - 7 = 4 -> array
        let decoder = Decoder::new(&buf);
        assert_eq!(decoder.decode_one(0).unwrap(), Value::Array(vec![]));
    }

    #[test]
    fn empty_string_decodes_cleanly() {
        let buf = vec![0x40u8];
        let decoder = Decoder::new(&buf);
        assert_eq!(decoder.decode_one(0).unwrap(), Value::String(""));
    }

    #[test]
    fn get_path_navigates_nested_map() {
        let mut buf = Vec::new();
        encode_map_header(1, &mut buf);
        encode_string("country", &mut buf);
        encode_map_header(1, &mut buf);
        encode_string("iso_code", &mut buf);
        encode_string("US", &mut buf);

        let decoder = Decoder::new(&buf);
        let outcome = decoder.get_path(0, &["country", "iso_code"]).unwrap();
        assert_eq!(outcome, PathOutcome::Found(Value::String("US")));
    }

    #[test]
    fn get_path_reports_missing_key_as_not_found() {
        let mut buf = Vec::new();
        encode_map_header(1, &mut buf);
        encode_string("country", &mut buf);
        encode_string("US", &mut buf);

        let decoder = Decoder::new(&buf);
        let outcome = decoder.get_path(0, &["city"]).unwrap();
        assert_eq!(outcome, PathOutcome::NotFound);
    }

    #[test]
    fn get_path_wrong_shape_is_an_error() {
        let mut buf = Vec::new();
        encode_string("US", &mut buf);
        let decoder = Decoder::new(&buf);
        let result = decoder.get_path(0, &["country"]);
        assert!(matches!(result, Err(MmdbError::LookupPathDoesNotMatchData(_))));
    }

    #[test]
    fn get_path_negative_array_index() {
        let mut buf = Vec::new();
        buf.push(0x03); // type 0, size 3
        buf.push(0x04); // array
        encode_string("a", &mut buf);
        encode_string("b", &mut buf);
        encode_string("c", &mut buf);

        let decoder = Decoder::new(&buf);
        assert_eq!(
            decoder.get_path(0, &["-1"]).unwrap(),
            PathOutcome::Found(Value::String("c"))
        );
        assert_eq!(
            decoder.get_path(0, &["0"]).unwrap(),
            PathOutcome::Found(Value::String("a"))
        );
    }

    #[test]
    fn get_path_rejects_malformed_index_syntax() {
        assert!(matches!(parse_path_index("01"), Err(MmdbError::InvalidLookupPath(_))));
        assert!(matches!(parse_path_index("-0"), Err(MmdbError::InvalidLookupPath(_))));
        assert!(matches!(parse_path_index("+1"), Err(MmdbError::InvalidLookupPath(_))));
        assert!(matches!(parse_path_index(""), Err(MmdbError::InvalidLookupPath(_))));
        assert_eq!(parse_path_index("0").unwrap(), 0);
        assert_eq!(parse_path_index("42").unwrap(), 42);
        assert_eq!(parse_path_index("-7").unwrap(), -7);
    }

    #[test]
    fn chained_pointer_is_rejected() {
        // offset 0: pointer (size 0) -> points at offset 2
        // offset 2: pointer (size 0) -> points at offset 4
        // offset 4: the string "x"
        let mut buf = vec![0x20, 0x02, 0x20, 0x04];
        encode_string("x", &mut buf);
        let decoder = Decoder::new(&buf);
        let result = decoder.decode_one(0);
        assert!(matches!(result, Err(MmdbError::InvalidData(_))));
    }

    #[test]
    fn pointer_resolves_to_value() {
        let mut buf = vec![0x20, 0x02]; // pointer -> offset 2
        encode_string("resolved", &mut buf);
        let decoder = Decoder::new(&buf);
        assert_eq!(decoder.decode_one(0).unwrap(), Value::String("resolved"));
    }

    #[test]
    fn decode_tree_flattens_map_depth_first() {
        let mut buf = Vec::new();
        encode_map_header(1, &mut buf);
        encode_string("k", &mut buf);
        encode_string("v", &mut buf);

        let decoder = Decoder::new(&buf);
        let list = decoder.decode_tree(0).unwrap();
        assert_eq!(list.entry_data, EntryData::MapHeader(1));
        let key_node = list.next.as_ref().unwrap();
        assert_eq!(key_node.entry_data, EntryData::String("k"));
        let value_node = key_node.next.as_ref().unwrap();
        assert_eq!(value_node.entry_data, EntryData::String("v"));
        assert!(value_node.next.is_none());
    }
}
