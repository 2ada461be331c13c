// ─────────────────────────────────────────────────────────────────────
// SCPN EPOCH Tools — Snapshot
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! One SDF file loaded as a name → variable map.
//!
//! Block names are exposed with `/` and spaces replaced by `_`, so
//! `"Electric Field/Ex"` is looked up as `Electric_Field_Ex` and the
//! mesh `"Grid/Grid"` as `Grid_Grid`. Each plain mesh also gets a
//! cell-centred companion, `Grid_Grid_mid`.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use epoch_types::error::{EpochError, EpochResult};
use indexmap::IndexMap;
use ndarray::{Array1, ArrayD};
use tracing::info;

use crate::reader::{BlockPayload, SdfFile, SdfHeader};

/// A field variable sampled on a mesh.
#[derive(Debug, Clone)]
pub struct Variable {
    pub name: String,
    pub block_id: String,
    pub units: String,
    pub mesh_id: String,
    pub stagger: i32,
    pub data: ArrayD<f64>,
}

impl Variable {
    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Finite min/max, ignoring NaN and infinities.
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// A rectilinear mesh.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,
    pub block_id: String,
    pub labels: Vec<String>,
    pub units: Vec<String>,
    pub geometry: i32,
    pub axes: Vec<Array1<f64>>,
}

impl Mesh {
    /// Cell-centre mesh: each axis replaced by its midpoints.
    pub fn midpoints(&self) -> Mesh {
        Mesh {
            name: format!("{}_mid", self.name),
            block_id: format!("{}_mid", self.block_id),
            labels: self.labels.clone(),
            units: self.units.clone(),
            geometry: self.geometry,
            axes: self.axes.iter().map(midpoints).collect(),
        }
    }
}

fn midpoints(nodes: &Array1<f64>) -> Array1<f64> {
    if nodes.len() < 2 {
        return nodes.clone();
    }
    Array1::from_shape_fn(nodes.len() - 1, |i| 0.5 * (nodes[i] + nodes[i + 1]))
}

/// Coordinates along one axis of a variable, ready for plotting.
#[derive(Debug, Clone)]
pub struct Axis {
    pub label: String,
    pub units: String,
    pub values: Array1<f64>,
}

/// Turn an SDF block name into its lookup key.
pub fn variable_key(block_name: &str) -> String {
    block_name
        .chars()
        .map(|c| if c == '/' || c == ' ' { '_' } else { c })
        .collect()
}

#[derive(Debug, Clone)]
pub struct Snapshot {
    pub path: PathBuf,
    pub header: SdfHeader,
    variables: IndexMap<String, Variable>,
    meshes: IndexMap<String, Mesh>,
    constants: IndexMap<String, f64>,
}

impl Snapshot {
    pub fn open(path: impl AsRef<Path>) -> EpochResult<Self> {
        let path = path.as_ref();
        info!("Reading file {}", path.display());
        let file = SdfFile::open(path).map_err(|e| match e {
            EpochError::SdfFormat(msg) => {
                EpochError::SdfFormat(format!("{}: {msg}", path.display()))
            }
            other => other,
        })?;
        Ok(Self::from_file(file, path))
    }

    pub fn from_file(file: SdfFile, path: impl Into<PathBuf>) -> Self {
        let mut variables = IndexMap::new();
        let mut meshes = IndexMap::new();
        let mut constants = IndexMap::new();

        for block in file.blocks {
            let key = variable_key(&block.header.name);
            match block.payload {
                BlockPayload::PlainMesh(m) => {
                    let mesh = Mesh {
                        name: key.clone(),
                        block_id: block.header.id,
                        labels: m.labels,
                        units: m.units,
                        geometry: m.geometry,
                        axes: m.axes,
                    };
                    let mid = mesh.midpoints();
                    meshes.insert(key, mesh);
                    meshes.insert(mid.name.clone(), mid);
                }
                BlockPayload::PlainVariable(v) => {
                    variables.insert(
                        key.clone(),
                        Variable {
                            name: key,
                            block_id: block.header.id,
                            units: v.units,
                            mesh_id: v.mesh_id,
                            stagger: v.stagger,
                            data: v.data,
                        },
                    );
                }
                BlockPayload::Constant(value) => {
                    constants.insert(key, value);
                }
                BlockPayload::Skipped => {}
            }
        }

        Snapshot {
            path: path.into(),
            header: file.header,
            variables,
            meshes,
            constants,
        }
    }

    pub fn time(&self) -> f64 {
        self.header.time
    }

    pub fn step(&self) -> i32 {
        self.header.step
    }

    /// Field variable by lookup key (`Electric_Field_Ex`), raw block name
    /// (`Electric Field/Ex`) or block id (`ex`). Fails with the list of
    /// available names.
    pub fn variable(&self, name: &str) -> EpochResult<&Variable> {
        self.variables
            .get(name)
            .or_else(|| self.variables.get(&variable_key(name)))
            .or_else(|| self.variables.values().find(|v| v.block_id == name))
            .ok_or_else(|| EpochError::VariableNotFound {
                name: name.to_string(),
                available: self.variable_names().map(str::to_string).collect(),
            })
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variable(name).is_ok()
    }

    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values()
    }

    /// Mesh by lookup key (`Grid_Grid`) or by block id (`grid`).
    pub fn mesh(&self, name_or_id: &str) -> Option<&Mesh> {
        self.meshes
            .get(name_or_id)
            .or_else(|| self.meshes.values().find(|m| m.block_id == name_or_id))
    }

    pub fn meshes(&self) -> impl Iterator<Item = &Mesh> {
        self.meshes.values()
    }

    pub fn constant(&self, name: &str) -> Option<f64> {
        self.constants.get(name).copied()
    }

    pub fn constants(&self) -> impl Iterator<Item = (&str, f64)> {
        self.constants.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Plot coordinates for each axis of `var`.
    ///
    /// Node coordinates are used when the sizes match, cell centres when
    /// the variable is one shorter than the mesh, plain indices otherwise.
    pub fn axes_for(&self, var: &Variable) -> Vec<Axis> {
        let mesh = self.mesh(&var.mesh_id);
        var.shape()
            .iter()
            .enumerate()
            .map(|(d, &n)| {
                let fallback = Axis {
                    label: format!("dim {d}"),
                    units: String::new(),
                    values: Array1::from_shape_fn(n, |i| i as f64),
                };
                let Some(mesh) = mesh else {
                    return fallback;
                };
                let Some(nodes) = mesh.axes.get(d) else {
                    return fallback;
                };
                let values = if nodes.len() == n {
                    nodes.clone()
                } else if nodes.len() == n + 1 {
                    midpoints(nodes)
                } else {
                    return fallback;
                };
                Axis {
                    label: mesh.labels.get(d).cloned().unwrap_or_default(),
                    units: mesh.units.get(d).cloned().unwrap_or_default(),
                    values,
                }
            })
            .collect()
    }

    /// Human-readable listing of the variables [`Snapshot::variable`] accepts.
    pub fn list_variables(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} (step {}, t = {:.6e} s)",
            self.path.display(),
            self.step(),
            self.time()
        );
        for var in self.variables.values() {
            let _ = writeln!(
                out,
                "  {:<48} {:?} [{}]",
                var.name,
                var.shape(),
                var.units
            );
        }
        out
    }

    /// Meshes and constants, which cannot be plotted as variables.
    pub fn list_blocks(&self) -> String {
        let mut out = String::new();
        for mesh in self.meshes.values() {
            let shape: Vec<usize> = mesh.axes.iter().map(|a| a.len()).collect();
            let _ = writeln!(out, "  {:<48} {:?} (grid)", mesh.name, shape);
        }
        for (name, value) in &self.constants {
            let _ = writeln!(out, "  {:<48} {:e} (constant)", name, value);
        }
        out
    }
}
