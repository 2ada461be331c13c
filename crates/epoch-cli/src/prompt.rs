// ─────────────────────────────────────────────────────────────────────
// SCPN EPOCH Tools — Variable Prompt
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use epoch_sdf::Snapshot;

/// The variable to work on: `given` when set, otherwise list what
/// `snapshot` holds and read a name from `input`. Returns the lookup key,
/// also when a raw block name or id was entered.
pub fn choose_variable<R: BufRead, W: Write>(
    snapshot: &Snapshot,
    given: Option<String>,
    mut input: R,
    mut output: W,
) -> Result<String> {
    let name = match given {
        Some(name) => name.trim().to_string(),
        None => {
            writeln!(output, "Choose a variable to plot from the following list:")?;
            write!(output, "{}", snapshot.list_variables())?;
            write!(output, "Enter the variable name to plot: ")?;
            output.flush()?;

            let mut line = String::new();
            input.read_line(&mut line).context("reading variable name")?;
            line.trim().to_string()
        }
    };
    if name.is_empty() {
        bail!("no variable name given");
    }
    Ok(snapshot.variable(&name)?.name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use epoch_sdf::reader::SdfFile;
    use epoch_sdf::writer::SdfWriter;
    use epoch_types::error::EpochError;
    use ndarray::{Array1, Array2};

    fn snapshot() -> Snapshot {
        let x = Array1::linspace(0.0, 1.0, 4);
        let y = Array1::linspace(0.0, 1.0, 3);
        let ex = Array2::from_elem((3, 2), 1.0).into_dyn();
        let mut w = SdfWriter::new("Epoch2d", 1, 1.0e-15);
        w.add_mesh("grid", "Grid/Grid", &[x, y], &["X", "Y"], &["m", "m"])
            .add_variable("ex", "Electric Field/Ex", "V/m", "grid", &ex);
        Snapshot::from_file(SdfFile::parse(&w.to_bytes()).unwrap(), "0001.sdf")
    }

    #[test]
    fn test_prompt_trims_input() {
        let snap = snapshot();
        let mut shown = Vec::new();
        let name = choose_variable(&snap, None, "  Electric_Field_Ex \n".as_bytes(), &mut shown).unwrap();
        assert_eq!(name, "Electric_Field_Ex");
        let shown = String::from_utf8(shown).unwrap();
        assert!(shown.contains("Choose a variable"));
        assert!(shown.contains("Electric_Field_Ex"));
    }

    #[test]
    fn test_given_name_skips_prompt() {
        let snap = snapshot();
        let mut shown = Vec::new();
        let name = choose_variable(&snap, Some("Electric_Field_Ex".into()), std::io::empty(), &mut shown)
            .unwrap();
        assert_eq!(name, "Electric_Field_Ex");
        assert!(shown.is_empty());
    }

    #[test]
    fn test_raw_block_name_resolves_to_key() {
        let snap = snapshot();
        let name = choose_variable(&snap, None, "Electric Field/Ex\n".as_bytes(), std::io::sink())
            .unwrap();
        assert_eq!(name, "Electric_Field_Ex");
        let name = choose_variable(&snap, Some("ex".into()), std::io::empty(), std::io::sink()).unwrap();
        assert_eq!(name, "Electric_Field_Ex");
    }

    #[test]
    fn test_unknown_name_is_variable_not_found() {
        let snap = snapshot();
        let err = choose_variable(&snap, None, "Nonexistent_Field\n".as_bytes(), std::io::sink())
            .expect_err("unknown variable");
        match err.downcast_ref::<EpochError>() {
            Some(EpochError::VariableNotFound { name, .. }) => assert_eq!(name, "Nonexistent_Field"),
            other => panic!("Unexpected error: {other:?}"),
        }
        assert!(choose_variable(&snap, None, "\n".as_bytes(), std::io::sink()).is_err());
    }
}
