// ─────────────────────────────────────────────────────────────────────
// SCPN EPOCH Tools — SDF Writer
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Minimal SDF writer.
//!
//! Produces plain meshes, plain variables and constants in real8, which
//! is enough for fixtures, benchmarks and synthetic datasets. Output is
//! little-endian unless [`SdfWriter::with_big_endian`] is set. There is
//! no summary section; `summary_location` points at end of file.

use std::path::Path;

use epoch_types::error::EpochResult;
use ndarray::{Array1, ArrayD};

use crate::format::{
    block_header_length, put_string, BlockType, DataType, SDF_ENDIANNESS, SDF_HEADER_LENGTH,
    SDF_ID_LENGTH, SDF_MAGIC, SDF_REVISION, SDF_STRING_LENGTH, SDF_VERSION,
};

struct PendingBlock {
    id: String,
    name: String,
    block_type: BlockType,
    ndims: usize,
    metadata: Vec<u8>,
    data: Vec<u8>,
}

pub struct SdfWriter {
    code_name: String,
    step: i32,
    time: f64,
    big_endian: bool,
    blocks: Vec<PendingBlock>,
}

fn put_i32(out: &mut Vec<u8>, v: i32, big_endian: bool) {
    if big_endian {
        out.extend_from_slice(&v.to_be_bytes());
    } else {
        out.extend_from_slice(&v.to_le_bytes());
    }
}

fn put_i64(out: &mut Vec<u8>, v: i64, big_endian: bool) {
    if big_endian {
        out.extend_from_slice(&v.to_be_bytes());
    } else {
        out.extend_from_slice(&v.to_le_bytes());
    }
}

fn put_f64(out: &mut Vec<u8>, v: f64, big_endian: bool) {
    if big_endian {
        out.extend_from_slice(&v.to_be_bytes());
    } else {
        out.extend_from_slice(&v.to_le_bytes());
    }
}

impl SdfWriter {
    pub fn new(code_name: &str, step: i32, time: f64) -> Self {
        SdfWriter {
            code_name: code_name.to_string(),
            step,
            time,
            big_endian: false,
            blocks: Vec::new(),
        }
    }

    /// Byte order of everything written afterwards. Set before adding blocks.
    pub fn with_big_endian(mut self, big_endian: bool) -> Self {
        self.big_endian = big_endian;
        self
    }

    pub fn add_mesh(
        &mut self,
        id: &str,
        name: &str,
        axes: &[Array1<f64>],
        labels: &[&str],
        units: &[&str],
    ) -> &mut Self {
        let nd = axes.len();
        let be = self.big_endian;
        let mut metadata = Vec::new();
        for _ in 0..nd {
            put_f64(&mut metadata, 1.0, be);
        }
        for d in 0..nd {
            put_string(&mut metadata, labels.get(d).copied().unwrap_or(""), SDF_ID_LENGTH);
        }
        for d in 0..nd {
            put_string(&mut metadata, units.get(d).copied().unwrap_or(""), SDF_ID_LENGTH);
        }
        // Cartesian geometry.
        put_i32(&mut metadata, 1, be);
        for axis in axes {
            put_f64(&mut metadata, axis.iter().copied().fold(f64::INFINITY, f64::min), be);
        }
        for axis in axes {
            put_f64(&mut metadata, axis.iter().copied().fold(f64::NEG_INFINITY, f64::max), be);
        }
        for axis in axes {
            put_i32(&mut metadata, axis.len() as i32, be);
        }

        let mut data = Vec::new();
        for axis in axes {
            for &v in axis {
                put_f64(&mut data, v, be);
            }
        }

        self.blocks.push(PendingBlock {
            id: id.to_string(),
            name: name.to_string(),
            block_type: BlockType::PlainMesh,
            ndims: nd,
            metadata,
            data,
        });
        self
    }

    pub fn add_variable(
        &mut self,
        id: &str,
        name: &str,
        units: &str,
        mesh_id: &str,
        values: &ArrayD<f64>,
    ) -> &mut Self {
        let be = self.big_endian;
        let mut metadata = Vec::new();
        put_f64(&mut metadata, 1.0, be);
        put_string(&mut metadata, units, SDF_ID_LENGTH);
        put_string(&mut metadata, mesh_id, SDF_ID_LENGTH);
        for &n in values.shape() {
            put_i32(&mut metadata, n as i32, be);
        }
        // Cell-centred.
        put_i32(&mut metadata, 0, be);

        // Reversing the axes and iterating logically yields x-fastest order.
        let mut data = Vec::with_capacity(values.len() * 8);
        for &v in values.view().reversed_axes().iter() {
            put_f64(&mut data, v, be);
        }

        self.blocks.push(PendingBlock {
            id: id.to_string(),
            name: name.to_string(),
            block_type: BlockType::PlainVariable,
            ndims: values.ndim(),
            metadata,
            data,
        });
        self
    }

    pub fn add_constant(&mut self, id: &str, name: &str, value: f64) -> &mut Self {
        let be = self.big_endian;
        let mut metadata = Vec::new();
        put_f64(&mut metadata, value, be);
        self.blocks.push(PendingBlock {
            id: id.to_string(),
            name: name.to_string(),
            block_type: BlockType::Constant,
            ndims: 1,
            metadata,
            data: Vec::new(),
        });
        self
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let bhl = block_header_length(SDF_STRING_LENGTH);
        let total: usize = SDF_HEADER_LENGTH
            + self
                .blocks
                .iter()
                .map(|b| bhl + b.metadata.len() + b.data.len())
                .sum::<usize>();

        let be = self.big_endian;
        let mut out = Vec::with_capacity(total);
        out.extend_from_slice(SDF_MAGIC);
        put_i32(&mut out, SDF_ENDIANNESS, be);
        put_i32(&mut out, SDF_VERSION, be);
        put_i32(&mut out, SDF_REVISION, be);
        put_string(&mut out, &self.code_name, SDF_ID_LENGTH);
        put_i64(&mut out, SDF_HEADER_LENGTH as i64, be);
        put_i64(&mut out, total as i64, be);
        put_i32(&mut out, 0, be);
        put_i32(&mut out, self.blocks.len() as i32, be);
        put_i32(&mut out, bhl as i32, be);
        put_i32(&mut out, self.step, be);
        put_f64(&mut out, self.time, be);
        put_i32(&mut out, 0, be);
        put_i32(&mut out, 0, be);
        put_i32(&mut out, SDF_STRING_LENGTH as i32, be);
        put_i32(&mut out, 1, be);
        out.extend_from_slice(&[0u8, 0, 0]);
        debug_assert_eq!(out.len(), SDF_HEADER_LENGTH);

        for block in &self.blocks {
            let start = out.len();
            let data_location = start + bhl + block.metadata.len();
            let next = data_location + block.data.len();
            put_i64(&mut out, next as i64, be);
            put_i64(&mut out, data_location as i64, be);
            put_string(&mut out, &block.id, SDF_ID_LENGTH);
            put_i64(&mut out, block.data.len() as i64, be);
            put_i32(&mut out, block.block_type.code(), be);
            put_i32(&mut out, DataType::Real8.code(), be);
            put_i32(&mut out, block.ndims as i32, be);
            put_string(&mut out, &block.name, SDF_STRING_LENGTH);
            put_i32(&mut out, block.metadata.len() as i32, be);
            out.extend_from_slice(&block.metadata);
            out.extend_from_slice(&block.data);
        }
        out
    }

    pub fn write(&self, path: impl AsRef<Path>) -> EpochResult<()> {
        std::fs::write(path, self.to_bytes())?;
        Ok(())
    }
}
