// ─────────────────────────────────────────────────────────────────────
// SCPN EPOCH Tools — Deck
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! In-memory deck: ordered sections of key/value blocks.
//!
//! Parameters are addressed with colon paths, `block:key` for a single
//! block (`constant:intens`), `block:name:key` for named blocks
//! (`species:Electron:charge`) and `block:index:key` for repeated
//! unnamed blocks (`laser:0:intensity_w_cm2`).

use epoch_types::error::{EpochError, EpochResult};
use indexmap::IndexMap;
use serde::Serialize;

use crate::value::Value;

pub type Block = IndexMap<String, Value>;

/// All blocks of one kind (`begin:<kind>`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Section {
    /// Exactly one unnamed block.
    Single(Block),
    /// Blocks carrying a `name` entry, keyed by it.
    Named(IndexMap<String, Block>),
    /// An unnamed block kind that occurs more than once.
    Repeated(Vec<Block>),
}

impl Section {
    pub fn blocks(&self) -> Vec<&Block> {
        match self {
            Section::Single(b) => vec![b],
            Section::Named(map) => map.values().collect(),
            Section::Repeated(list) => list.iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Section::Single(_) => 1,
            Section::Named(map) => map.len(),
            Section::Repeated(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Key used for named blocks.
pub(crate) fn block_name(block: &Block) -> Option<String> {
    block.get("name").map(|v| v.to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Deck {
    sections: IndexMap<String, Section>,
}

struct ParsedPath<'a> {
    kind: &'a str,
    selector: Option<&'a str>,
    key: &'a str,
}

fn split_path(path: &str) -> EpochResult<ParsedPath<'_>> {
    let parts: Vec<&str> = path.split(':').map(str::trim).collect();
    if parts.iter().any(|p| p.is_empty()) {
        return Err(EpochError::deck_path(path, "empty path component"));
    }
    match parts.as_slice() {
        [kind, key] => Ok(ParsedPath {
            kind,
            selector: None,
            key,
        }),
        [kind, selector, key] => Ok(ParsedPath {
            kind,
            selector: Some(selector),
            key,
        }),
        _ => Err(EpochError::deck_path(
            path,
            "expected 'block:key' or 'block:name:key'",
        )),
    }
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn section(&self, kind: &str) -> Option<&Section> {
        self.sections.get(kind)
    }

    /// Add a parsed block, grouping it with earlier blocks of the same kind.
    pub fn push_block(&mut self, kind: &str, block: Block) -> EpochResult<()> {
        let name = block_name(&block);
        let mixing =
            || EpochError::deck_path(kind, "mixes named and unnamed blocks of the same kind");

        let Some(section) = self.sections.get_mut(kind) else {
            let section = match name {
                Some(name) => Section::Named(IndexMap::from([(name, block)])),
                None => Section::Single(block),
            };
            self.sections.insert(kind.to_string(), section);
            return Ok(());
        };

        match section {
            Section::Named(map) => {
                let Some(name) = name else {
                    return Err(mixing());
                };
                if map.contains_key(&name) {
                    return Err(EpochError::deck_path(
                        kind,
                        format!("duplicate block named '{name}'"),
                    ));
                }
                map.insert(name, block);
            }
            Section::Repeated(list) => {
                if name.is_some() {
                    return Err(mixing());
                }
                list.push(block);
            }
            Section::Single(_) => {
                if name.is_some() {
                    return Err(mixing());
                }
                if let Section::Single(first) =
                    std::mem::replace(section, Section::Repeated(Vec::new()))
                {
                    *section = Section::Repeated(vec![first, block]);
                }
            }
        }
        Ok(())
    }

    fn locate(&self, kind: &str, selector: Option<&str>, path: &str) -> EpochResult<&Block> {
        let section = self
            .sections
            .get(kind)
            .ok_or_else(|| EpochError::deck_path(path, format!("no '{kind}' block")))?;
        match (section, selector) {
            (Section::Single(block), None) => Ok(block),
            (Section::Named(map), Some(name)) => map
                .get(name)
                .ok_or_else(|| EpochError::deck_path(path, format!("no {kind} named '{name}'"))),
            (Section::Repeated(list), Some(index)) => index
                .parse::<usize>()
                .ok()
                .and_then(|i| list.get(i))
                .ok_or_else(|| {
                    EpochError::deck_path(
                        path,
                        format!("'{index}' is not a block index below {}", list.len()),
                    )
                }),
            (Section::Named(_), None) | (Section::Repeated(_), None) => Err(EpochError::deck_path(
                path,
                format!("select one of the '{kind}' blocks with '{kind}:<name>:<key>'"),
            )),
            (Section::Single(_), Some(_)) => Err(EpochError::deck_path(
                path,
                format!("'{kind}' is a single block; use '{kind}:key'"),
            )),
        }
    }

    pub fn block(&self, kind: &str, selector: Option<&str>) -> EpochResult<&Block> {
        let path = match selector {
            Some(s) => format!("{kind}:{s}"),
            None => kind.to_string(),
        };
        self.locate(kind, selector, &path)
    }

    pub fn block_mut(&mut self, kind: &str, selector: Option<&str>) -> EpochResult<&mut Block> {
        // Same lookup rules and messages as `block`.
        self.block(kind, selector)?;
        let section = self
            .sections
            .get_mut(kind)
            .ok_or_else(|| EpochError::deck_path(kind, "block not found"))?;
        let block = match (section, selector) {
            (Section::Single(block), None) => Some(block),
            (Section::Named(map), Some(name)) => map.get_mut(name),
            (Section::Repeated(list), Some(index)) => {
                index.parse::<usize>().ok().and_then(|i| list.get_mut(i))
            }
            _ => None,
        };
        block.ok_or_else(|| EpochError::deck_path(kind, "block not found"))
    }

    pub fn get(&self, path: &str) -> EpochResult<&Value> {
        let p = split_path(path)?;
        let block = self.locate(p.kind, p.selector, path)?;
        block
            .get(p.key)
            .ok_or_else(|| EpochError::deck_path(path, format!("no key '{}'", p.key)))
    }

    /// Assign a value, inserting the key if the block lacks it.
    /// Returns the previous value.
    ///
    /// Only edits that survive [`dumps`](crate::dumps) and reload are
    /// accepted: `name` keys are fixed (they decide how blocks group), keys
    /// must be single words and the value must read back unchanged.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> EpochResult<Option<Value>> {
        let p = split_path(path)?;
        if p.key == "name" {
            return Err(EpochError::deck_path(
                path,
                "block names cannot be set; they decide how blocks are grouped",
            ));
        }
        if p.key.contains(|c: char| c == '=' || c == '#' || c.is_whitespace()) {
            return Err(EpochError::deck_path(
                path,
                format!("'{}' is not a valid key", p.key),
            ));
        }
        let value = value.into();
        value
            .check_writable()
            .map_err(|message| EpochError::deck_path(path, message))?;
        let block = self.block_mut(p.kind, p.selector)?;
        Ok(block.insert(p.key.to_string(), value))
    }
}
