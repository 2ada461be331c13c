// ─────────────────────────────────────────────────────────────────────
// SCPN EPOCH Tools — SDF Format Primitives
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! On-disk constants, block/data type codes and a bounds-checked
//! byte cursor shared by the reader and writer.

use epoch_types::error::{EpochError, EpochResult};

pub const SDF_MAGIC: &[u8; 4] = b"SDF1";

/// Written as a native int4; reads back as this value only when the
/// file endianness matches the reader's assumption.
pub const SDF_ENDIANNESS: i32 = 16_911_887;

pub const SDF_VERSION: i32 = 1;
pub const SDF_REVISION: i32 = 4;

/// Fixed width of block ids, units and labels.
pub const SDF_ID_LENGTH: usize = 32;

/// Default width of block names.
pub const SDF_STRING_LENGTH: usize = 64;

/// Size of the file header written by [`crate::writer::SdfWriter`].
pub const SDF_HEADER_LENGTH: usize = 4 + 4 * 3 + SDF_ID_LENGTH + 8 + 8 + 4 * 4 + 8 + 4 * 4 + 3;

/// Size of a block header for a given name width.
pub const fn block_header_length(string_length: usize) -> usize {
    8 + 8 + SDF_ID_LENGTH + 8 + 4 + 4 + 4 + string_length + 4
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    Scrubbed,
    Null,
    PlainMesh,
    PointMesh,
    PlainVariable,
    PointVariable,
    Constant,
    Array,
    RunInfo,
    Source,
    PlainDerived,
    PointDerived,
    CpuSplit,
    Other(i32),
}

impl BlockType {
    pub fn from_code(code: i32) -> Self {
        match code {
            -1 => BlockType::Scrubbed,
            0 => BlockType::Null,
            1 => BlockType::PlainMesh,
            2 => BlockType::PointMesh,
            3 => BlockType::PlainVariable,
            4 => BlockType::PointVariable,
            5 => BlockType::Constant,
            6 => BlockType::Array,
            7 => BlockType::RunInfo,
            8 => BlockType::Source,
            14 => BlockType::PlainDerived,
            15 => BlockType::PointDerived,
            20 => BlockType::CpuSplit,
            other => BlockType::Other(other),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            BlockType::Scrubbed => -1,
            BlockType::Null => 0,
            BlockType::PlainMesh => 1,
            BlockType::PointMesh => 2,
            BlockType::PlainVariable => 3,
            BlockType::PointVariable => 4,
            BlockType::Constant => 5,
            BlockType::Array => 6,
            BlockType::RunInfo => 7,
            BlockType::Source => 8,
            BlockType::PlainDerived => 14,
            BlockType::PointDerived => 15,
            BlockType::CpuSplit => 20,
            BlockType::Other(code) => code,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Null,
    Int4,
    Int8,
    Real4,
    Real8,
    Real16,
    Character,
    Logical,
    Other(i32),
}

impl DataType {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => DataType::Null,
            1 => DataType::Int4,
            2 => DataType::Int8,
            3 => DataType::Real4,
            4 => DataType::Real8,
            5 => DataType::Real16,
            6 => DataType::Character,
            7 => DataType::Logical,
            other => DataType::Other(other),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            DataType::Null => 0,
            DataType::Int4 => 1,
            DataType::Int8 => 2,
            DataType::Real4 => 3,
            DataType::Real8 => 4,
            DataType::Real16 => 5,
            DataType::Character => 6,
            DataType::Logical => 7,
            DataType::Other(code) => code,
        }
    }

    /// Element size in bytes for the numeric types this crate decodes.
    pub fn numeric_size(self) -> Option<usize> {
        match self {
            DataType::Int4 | DataType::Real4 => Some(4),
            DataType::Int8 | DataType::Real8 => Some(8),
            DataType::Logical => Some(1),
            _ => None,
        }
    }
}

/// Bounds-checked cursor over an in-memory SDF file.
pub(crate) struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
    big_endian: bool,
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        ByteReader {
            buf,
            pos: 0,
            big_endian: false,
        }
    }

    pub(crate) fn set_big_endian(&mut self, big_endian: bool) {
        self.big_endian = big_endian;
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn seek(&mut self, pos: usize) -> EpochResult<()> {
        if pos > self.buf.len() {
            return Err(EpochError::sdf(format!(
                "seek to offset {pos} past end of file ({} bytes)",
                self.buf.len()
            )));
        }
        self.pos = pos;
        Ok(())
    }

    pub(crate) fn take(&mut self, n: usize) -> EpochResult<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.buf.len())
            .ok_or_else(|| {
                EpochError::sdf(format!(
                    "unexpected end of file reading {n} bytes at offset {}",
                    self.pos
                ))
            })?;
        let out = &self.buf[self.pos..end];
        self.pos = end;
        Ok(out)
    }

    fn array<const N: usize>(&mut self) -> EpochResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub(crate) fn u8(&mut self) -> EpochResult<u8> {
        Ok(self.take(1)?[0])
    }

    pub(crate) fn i32(&mut self) -> EpochResult<i32> {
        let b = self.array::<4>()?;
        Ok(if self.big_endian {
            i32::from_be_bytes(b)
        } else {
            i32::from_le_bytes(b)
        })
    }

    pub(crate) fn i64(&mut self) -> EpochResult<i64> {
        let b = self.array::<8>()?;
        Ok(if self.big_endian {
            i64::from_be_bytes(b)
        } else {
            i64::from_le_bytes(b)
        })
    }

    pub(crate) fn f32(&mut self) -> EpochResult<f32> {
        let b = self.array::<4>()?;
        Ok(if self.big_endian {
            f32::from_be_bytes(b)
        } else {
            f32::from_le_bytes(b)
        })
    }

    pub(crate) fn f64(&mut self) -> EpochResult<f64> {
        let b = self.array::<8>()?;
        Ok(if self.big_endian {
            f64::from_be_bytes(b)
        } else {
            f64::from_le_bytes(b)
        })
    }

    /// Non-negative int4 as a size.
    pub(crate) fn len32(&mut self, what: &str) -> EpochResult<usize> {
        let v = self.i32()?;
        usize::try_from(v).map_err(|_| EpochError::sdf(format!("negative {what}: {v}")))
    }

    /// Non-negative int8 as an offset.
    pub(crate) fn offset64(&mut self, what: &str) -> EpochResult<usize> {
        let v = self.i64()?;
        usize::try_from(v).map_err(|_| EpochError::sdf(format!("negative {what}: {v}")))
    }

    /// Fixed-width string, NUL and space padded.
    pub(crate) fn string(&mut self, len: usize) -> EpochResult<String> {
        let raw = self.take(len)?;
        let end = raw.iter().position(|&c| c == 0).unwrap_or(raw.len());
        Ok(String::from_utf8_lossy(&raw[..end]).trim_end().to_string())
    }

    /// One element of `dtype`, widened to f64.
    pub(crate) fn value(&mut self, dtype: DataType) -> EpochResult<f64> {
        match dtype {
            DataType::Int4 => Ok(self.i32()? as f64),
            DataType::Int8 => Ok(self.i64()? as f64),
            DataType::Real4 => Ok(self.f32()? as f64),
            DataType::Real8 => self.f64(),
            DataType::Logical => Ok(if self.u8()? != 0 { 1.0 } else { 0.0 }),
            other => Err(EpochError::sdf(format!(
                "unsupported datatype code {}",
                other.code()
            ))),
        }
    }

    pub(crate) fn values(&mut self, dtype: DataType, count: usize) -> EpochResult<Vec<f64>> {
        let size = dtype.numeric_size().ok_or_else(|| {
            EpochError::sdf(format!("unsupported datatype code {}", dtype.code()))
        })?;
        let needed = count
            .checked_mul(size)
            .ok_or_else(|| EpochError::sdf("array size overflow"))?;
        if self.pos.checked_add(needed).map_or(true, |end| end > self.buf.len()) {
            return Err(EpochError::sdf(format!(
                "array of {count} elements at offset {} runs past end of file",
                self.pos
            )));
        }
        (0..count).map(|_| self.value(dtype)).collect()
    }
}

/// Write a fixed-width, NUL padded string. Longer input is truncated.
pub(crate) fn put_string(out: &mut Vec<u8>, s: &str, len: usize) {
    let bytes = s.as_bytes();
    let n = bytes.len().min(len);
    out.extend_from_slice(&bytes[..n]);
    out.extend(std::iter::repeat(0u8).take(len - n));
}
