// ─────────────────────────────────────────────────────────────────────
// SCPN EPOCH Tools — Deck Parser
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Deck text → [`Deck`].
//!
//! ```text
//! begin:species
//!   name = Electron      # comment
//!   charge = -1.0
//!   include_species:Electron
//! end:species
//! ```

use std::io::Read;
use std::path::Path;

use epoch_types::error::{EpochError, EpochResult};
use tracing::debug;

use crate::deck::{Block, Deck};
use crate::value::Value;

fn parse_error(line: usize, message: impl Into<String>) -> EpochError {
    EpochError::DeckParse {
        line,
        message: message.into(),
    }
}

/// Split `key = value`, falling back to `key:value` when there is no `=`.
fn split_assignment(line: &str) -> Option<(&str, &str)> {
    line.split_once('=').or_else(|| line.split_once(':'))
}

/// Parse deck text.
pub fn loads(text: &str) -> EpochResult<Deck> {
    let mut deck = Deck::new();
    // (kind, block, line of `begin`)
    let mut open: Option<(String, Block, usize)> = None;

    for (idx, raw_line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        if let Some((keyword, rest)) = line.split_once(':') {
            let kind = rest.trim();
            match keyword.trim() {
                "begin" => {
                    if let Some((current, _, started)) = &open {
                        return Err(parse_error(
                            line_no,
                            format!(
                                "begin:{kind} inside block '{current}' opened at line {started}"
                            ),
                        ));
                    }
                    if kind.is_empty() {
                        return Err(parse_error(line_no, "begin without a block name"));
                    }
                    open = Some((kind.to_string(), Block::new(), line_no));
                    continue;
                }
                "end" => {
                    let Some((current, block, _)) = open.take() else {
                        return Err(parse_error(line_no, format!("end:{kind} without begin")));
                    };
                    if current != kind {
                        return Err(parse_error(
                            line_no,
                            format!("end:{kind} closes block '{current}'"),
                        ));
                    }
                    deck.push_block(&current, block).map_err(|e| match e {
                        EpochError::DeckPath { path, message } => {
                            parse_error(line_no, format!("{path}: {message}"))
                        }
                        other => other,
                    })?;
                    continue;
                }
                _ => {}
            }
        }

        let Some((_, block, _)) = open.as_mut() else {
            return Err(parse_error(line_no, format!("'{line}' outside any block")));
        };
        let (key, value) = split_assignment(line)
            .ok_or_else(|| parse_error(line_no, format!("expected 'key = value', got '{line}'")))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(parse_error(line_no, "missing key before '='"));
        }
        let value = Value::parse(value);
        match block.get_mut(key) {
            Some(existing) => existing.push(value),
            None => {
                block.insert(key.to_string(), value);
            }
        }
    }

    if let Some((kind, _, started)) = open {
        return Err(parse_error(
            started,
            format!("block '{kind}' is never closed"),
        ));
    }
    Ok(deck)
}

/// Parse a deck from any reader.
pub fn load<R: Read>(mut reader: R) -> EpochResult<Deck> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    loads(&text)
}

pub fn load_file(path: impl AsRef<Path>) -> EpochResult<Deck> {
    let path = path.as_ref();
    debug!("Reading deck {}", path.display());
    let file = std::fs::File::open(path)?;
    let deck = load(std::io::BufReader::new(file))?;
    debug!("{}: {} block kinds", path.display(), deck.keys().count());
    Ok(deck)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Section;

    const DECK: &str = "\
begin:control
  nx = 256
  ny = 256
  t_end = 50 * femto   # end time
  stdout_frequency = 10
end:control

begin:constant
  intens = 1.0e23
  nel = 1.0e21
end:constant

begin:species
  name = Electron
  charge = -1.0
  mass = 1.0
  number_density = if((r gt ri) and (r lt ro), den_cone, 0.0)
  number_density = if(x gt xo, 0.0, number_density(Electron))
end:species

begin:species
  name = Positron
  charge = 1.0
  mass = 1.0
end:species

begin:output
  dt_snapshot = 5 * femto
  grid = always
  ex = always
  use_random_seed = T
end:output

begin:dist_fn
  name = x_px
  include_species:Electron
end:dist_fn
";

    #[test]
    fn test_top_level_keys_in_order() {
        let deck = loads(DECK).unwrap();
        assert_eq!(
            deck.keys().collect::<Vec<_>>(),
            vec!["control", "constant", "species", "output", "dist_fn"]
        );
    }

    #[test]
    fn test_values_and_comments() {
        let deck = loads(DECK).unwrap();
        assert_eq!(deck.get("control:nx").unwrap(), &Value::Int(256));
        assert_eq!(
            deck.get("control:t_end").unwrap(),
            &Value::Str("50 * femto".into())
        );
        assert_eq!(deck.get("constant:intens").unwrap(), &Value::Float(1.0e23));
        assert_eq!(deck.get("output:use_random_seed").unwrap(), &Value::Bool(true));
        assert_eq!(
            deck.get("dist_fn:x_px:include_species").unwrap(),
            &Value::Str("Electron".into())
        );
    }

    #[test]
    fn test_repeated_key_is_list() {
        let deck = loads(DECK).unwrap();
        let density = deck.get("species:Electron:number_density").unwrap();
        assert_eq!(density.items().len(), 2);
        assert!(density.items()[1]
            .as_str()
            .unwrap()
            .contains("number_density(Electron)"));
        assert!(matches!(deck.section("species"), Some(Section::Named(m)) if m.len() == 2));
    }

    #[test]
    fn test_structural_errors() {
        let cases = [
            ("begin:control\nnx = 1\n", 1, "never closed"),
            ("nx = 1\n", 1, "outside any block"),
            ("begin:control\nend:species\n", 2, "closes block 'control'"),
            ("end:control\n", 1, "without begin"),
            ("begin:a\nbegin:b\n", 2, "inside block 'a'"),
            ("begin:control\n  just_a_word\nend:control\n", 2, "expected 'key = value'"),
            (
                "begin:species\nname = e\nend:species\nbegin:species\nname = e\nend:species\n",
                6,
                "duplicate block named 'e'",
            ),
        ];
        for (text, line, needle) in cases {
            match loads(text).expect_err(needle) {
                EpochError::DeckParse { line: got, message } => {
                    assert_eq!(got, line, "{needle}");
                    assert!(message.contains(needle), "{message}");
                }
                other => panic!("Unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn test_load_from_reader() {
        let deck = load(DECK.as_bytes()).unwrap();
        assert_eq!(deck.section("species").map(|s| s.len()), Some(2));
    }
}
