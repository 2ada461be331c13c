// ─────────────────────────────────────────────────────────────────────
// SCPN EPOCH Tools — SDF Reader
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Block-level SDF parser.
//!
//! Walks the linked block list of an SDF file and decodes the block
//! kinds needed for field visualisation: plain meshes, plain (and
//! derived) variables and constants. Everything else is kept as a
//! header-only entry so listings can still show it.

use std::path::Path;

use epoch_types::error::{EpochError, EpochResult};
use ndarray::{Array1, ArrayD, IxDyn, ShapeBuilder};
use tracing::debug;

use crate::format::{
    block_header_length, BlockType, ByteReader, DataType, SDF_ENDIANNESS, SDF_ID_LENGTH,
    SDF_MAGIC,
};

/// File header.
#[derive(Debug, Clone, PartialEq)]
pub struct SdfHeader {
    pub version: i32,
    pub revision: i32,
    pub code_name: String,
    pub first_block_location: usize,
    pub summary_location: usize,
    pub summary_size: usize,
    pub nblocks: usize,
    pub block_header_length: usize,
    pub step: i32,
    pub time: f64,
    pub jobid: (i32, i32),
    pub string_length: usize,
    pub code_io_version: i32,
    pub restart: bool,
    pub other_domains: bool,
    pub station_file: bool,
    pub big_endian: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockHeader {
    pub next_block_location: usize,
    pub data_location: usize,
    pub id: String,
    pub data_length: usize,
    pub block_type: BlockType,
    pub data_type: DataType,
    pub ndims: usize,
    pub name: String,
    pub info_length: usize,
}

/// Plain (rectilinear) mesh: one coordinate array per dimension.
#[derive(Debug, Clone)]
pub struct MeshBlock {
    pub mults: Vec<f64>,
    pub labels: Vec<String>,
    pub units: Vec<String>,
    pub geometry: i32,
    pub extents: Vec<(f64, f64)>,
    pub axes: Vec<Array1<f64>>,
}

/// Field sampled on a plain mesh, stored x-fastest on disk.
#[derive(Debug, Clone)]
pub struct VariableBlock {
    pub mult: f64,
    pub units: String,
    pub mesh_id: String,
    pub stagger: i32,
    pub data: ArrayD<f64>,
}

#[derive(Debug, Clone)]
pub enum BlockPayload {
    PlainMesh(MeshBlock),
    PlainVariable(VariableBlock),
    Constant(f64),
    Skipped,
}

#[derive(Debug, Clone)]
pub struct SdfBlock {
    pub header: BlockHeader,
    pub payload: BlockPayload,
}

/// A fully parsed SDF file.
#[derive(Debug, Clone)]
pub struct SdfFile {
    pub header: SdfHeader,
    pub blocks: Vec<SdfBlock>,
}

impl SdfFile {
    pub fn open(path: impl AsRef<Path>) -> EpochResult<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::parse(&bytes)
    }

    pub fn parse(bytes: &[u8]) -> EpochResult<Self> {
        let mut r = ByteReader::new(bytes);
        let header = read_header(&mut r)?;
        check_block_table(&header, bytes.len())?;

        let mut blocks = Vec::new();
        let mut location = header.first_block_location;
        for index in 0..header.nblocks {
            let block = read_block(&mut r, &header, location)
                .map_err(|e| block_error(index, location, e))?;
            if matches!(block.payload, BlockPayload::Skipped) {
                debug!(
                    id = %block.header.id,
                    block_type = block.header.block_type.code(),
                    "skipping unsupported SDF block"
                );
            }
            location = block.header.next_block_location;
            blocks.push(block);
        }

        Ok(SdfFile { header, blocks })
    }
}

/// Every block header must fit between the first block and end of file.
fn check_block_table(header: &SdfHeader, file_len: usize) -> EpochResult<()> {
    let minimum = block_header_length(header.string_length);
    if header.block_header_length < minimum {
        return Err(EpochError::sdf(format!(
            "block header length {} is shorter than {minimum}",
            header.block_header_length
        )));
    }
    let available = file_len.saturating_sub(header.first_block_location);
    let fits = header
        .nblocks
        .checked_mul(header.block_header_length)
        .is_some_and(|needed| needed <= available);
    if !fits {
        return Err(EpochError::sdf(format!(
            "{} blocks of {} bytes cannot fit in a {file_len} byte file",
            header.nblocks, header.block_header_length
        )));
    }
    Ok(())
}

fn block_error(index: usize, location: usize, err: EpochError) -> EpochError {
    let detail = match err {
        EpochError::SdfFormat(msg) => msg,
        other => other.to_string(),
    };
    EpochError::sdf(format!("block {index} at offset {location}: {detail}"))
}

fn read_block(
    r: &mut ByteReader<'_>,
    header: &SdfHeader,
    location: usize,
) -> EpochResult<SdfBlock> {
    r.seek(location)?;
    let block_header = read_block_header(r, header)?;
    r.seek(location + header.block_header_length)?;
    let payload = read_payload(r, &block_header)?;
    Ok(SdfBlock {
        header: block_header,
        payload,
    })
}

fn read_header(r: &mut ByteReader<'_>) -> EpochResult<SdfHeader> {
    let magic = r.take(4)?;
    if magic != SDF_MAGIC {
        return Err(EpochError::sdf("not an SDF file (bad magic)"));
    }
    let marker = r.take(4)?;
    let big_endian = if i32::from_le_bytes([marker[0], marker[1], marker[2], marker[3]])
        == SDF_ENDIANNESS
    {
        false
    } else if i32::from_be_bytes([marker[0], marker[1], marker[2], marker[3]]) == SDF_ENDIANNESS
    {
        true
    } else {
        return Err(EpochError::sdf("unrecognised endianness marker"));
    };
    r.set_big_endian(big_endian);

    let version = r.i32()?;
    if version != 1 {
        return Err(EpochError::sdf(format!("unsupported SDF version {version}")));
    }
    let revision = r.i32()?;
    let code_name = r.string(SDF_ID_LENGTH)?;
    let first_block_location = r.offset64("first block location")?;
    let summary_location = r.offset64("summary location")?;
    let summary_size = r.len32("summary size")?;
    let nblocks = r.len32("block count")?;
    let block_header_length = r.len32("block header length")?;
    let step = r.i32()?;
    let time = r.f64()?;
    let jobid = (r.i32()?, r.i32()?);
    let string_length = r.len32("string length")?;
    let code_io_version = r.i32()?;
    let restart = r.u8()? != 0;
    let other_domains = r.u8()? != 0;
    let station_file = if r.position() < first_block_location {
        r.u8()? != 0
    } else {
        false
    };

    Ok(SdfHeader {
        version,
        revision,
        code_name,
        first_block_location,
        summary_location,
        summary_size,
        nblocks,
        block_header_length,
        step,
        time,
        jobid,
        string_length,
        code_io_version,
        restart,
        other_domains,
        station_file,
        big_endian,
    })
}

fn read_block_header(r: &mut ByteReader<'_>, header: &SdfHeader) -> EpochResult<BlockHeader> {
    let next_block_location = r.offset64("next block location")?;
    let data_location = r.offset64("data location")?;
    let id = r.string(SDF_ID_LENGTH)?;
    let data_length = r.offset64("data length")?;
    let block_type = BlockType::from_code(r.i32()?);
    let data_type = DataType::from_code(r.i32()?);
    let ndims = r.len32("ndims")?;
    let name = r.string(header.string_length)?;
    let info_length = if header.revision > 0 {
        r.len32("info length")?
    } else {
        0
    };
    Ok(BlockHeader {
        next_block_location,
        data_location,
        id,
        data_length,
        block_type,
        data_type,
        ndims,
        name,
        info_length,
    })
}

fn read_dims(r: &mut ByteReader<'_>, ndims: usize) -> EpochResult<Vec<usize>> {
    (0..ndims).map(|_| r.len32("dimension")).collect()
}

fn read_payload(r: &mut ByteReader<'_>, block: &BlockHeader) -> EpochResult<BlockPayload> {
    match block.block_type {
        BlockType::PlainMesh => read_plain_mesh(r, block).map(BlockPayload::PlainMesh),
        BlockType::PlainVariable | BlockType::PlainDerived => {
            read_plain_variable(r, block).map(BlockPayload::PlainVariable)
        }
        BlockType::Constant => Ok(BlockPayload::Constant(r.value(block.data_type)?)),
        _ => Ok(BlockPayload::Skipped),
    }
}

fn read_plain_mesh(r: &mut ByteReader<'_>, block: &BlockHeader) -> EpochResult<MeshBlock> {
    let nd = block.ndims;
    let mults = (0..nd).map(|_| r.f64()).collect::<EpochResult<Vec<_>>>()?;
    let labels = (0..nd)
        .map(|_| r.string(SDF_ID_LENGTH))
        .collect::<EpochResult<Vec<_>>>()?;
    let units = (0..nd)
        .map(|_| r.string(SDF_ID_LENGTH))
        .collect::<EpochResult<Vec<_>>>()?;
    let geometry = r.i32()?;
    let minval = (0..nd).map(|_| r.f64()).collect::<EpochResult<Vec<_>>>()?;
    let maxval = (0..nd).map(|_| r.f64()).collect::<EpochResult<Vec<_>>>()?;
    let dims = read_dims(r, nd)?;

    r.seek(block.data_location)?;
    let mut axes = Vec::with_capacity(nd);
    for &n in &dims {
        axes.push(Array1::from(r.values(block.data_type, n)?));
    }

    Ok(MeshBlock {
        mults,
        labels,
        units,
        geometry,
        extents: minval.into_iter().zip(maxval).collect(),
        axes,
    })
}

fn read_plain_variable(
    r: &mut ByteReader<'_>,
    block: &BlockHeader,
) -> EpochResult<VariableBlock> {
    let mult = r.f64()?;
    let units = r.string(SDF_ID_LENGTH)?;
    let mesh_id = r.string(SDF_ID_LENGTH)?;
    let dims = read_dims(r, block.ndims)?;
    let stagger = r.i32()?;

    let count = dims
        .iter()
        .try_fold(1usize, |acc, &n| acc.checked_mul(n))
        .ok_or_else(|| EpochError::sdf("variable size overflow"))?;
    r.seek(block.data_location)?;
    let values = r.values(block.data_type, count)?;
    let data = ArrayD::from_shape_vec(IxDyn(&dims).f(), values)
        .map_err(|e| EpochError::sdf(format!("variable shape {dims:?}: {e}")))?;

    Ok(VariableBlock {
        mult,
        units,
        mesh_id,
        stagger,
        data,
    })
}
