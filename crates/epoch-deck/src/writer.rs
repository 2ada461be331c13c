// ─────────────────────────────────────────────────────────────────────
// SCPN EPOCH Tools — Deck Writer
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use std::io::Write;
use std::path::Path;

use epoch_types::error::EpochResult;

use crate::deck::Deck;

/// Render a deck as text. Repeated keys come out as repeated lines.
pub fn dumps(deck: &Deck) -> String {
    let mut out = String::new();
    for (kind, section) in deck.sections() {
        for block in section.blocks() {
            out.push_str(&format!("begin:{kind}\n"));
            for (key, value) in block {
                for item in value.items() {
                    out.push_str(&format!("  {key} = {item}\n"));
                }
            }
            out.push_str(&format!("end:{kind}\n\n"));
        }
    }
    out
}

pub fn dump<W: Write>(deck: &Deck, mut writer: W) -> EpochResult<()> {
    writer.write_all(dumps(deck).as_bytes())?;
    writer.flush()?;
    Ok(())
}

pub fn dump_file(deck: &Deck, path: impl AsRef<Path>) -> EpochResult<()> {
    let file = std::fs::File::create(path)?;
    dump(deck, std::io::BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{load_file, loads};
    use crate::value::Value;

    const DECK: &str = "\
begin:control
  nx = 128
  t_end = 20 * femto
end:control

begin:species
  name = proton
  charge = 2.0
  mass = 1836.2
  fraction = 0.5
  number_density = if((r gt ri) and (r lt ro), den_cone, 0.0)
  number_density = if(x gt xo, 0.0, number_density(proton))
end:species

begin:laser
  boundary = x_min
  intensity_w_cm2 = 1.0e20
end:laser

begin:laser
  boundary = x_max
  intensity_w_cm2 = 5.0e19
end:laser
";

    #[test]
    fn test_dumps_format() {
        let deck = loads(DECK).unwrap();
        let text = dumps(&deck);
        assert!(text.starts_with("begin:control\n  nx = 128\n"));
        assert!(text.contains("  charge = 2.0\n"));
        assert!(text.contains("  intensity_w_cm2 = 1e20\n"));
        assert_eq!(text.matches("  number_density = ").count(), 2);
        assert_eq!(text.matches("begin:laser").count(), 2);
    }

    #[test]
    fn test_modify_dump_reload_changes_one_value() {
        let original = loads(DECK).unwrap();
        let mut edited = original.clone();
        edited.set("species:proton:charge", 1.0).unwrap();

        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("output.deck");
        dump_file(&edited, &path).unwrap();
        let reloaded = load_file(&path).unwrap();

        assert_eq!(reloaded, edited);
        assert_eq!(reloaded.get("species:proton:charge").unwrap(), &Value::Float(1.0));

        // Restoring the one edited value gives back the original.
        let mut restored = reloaded;
        restored.set("species:proton:charge", 2.0).unwrap();
        assert_eq!(restored, original);
    }
}
