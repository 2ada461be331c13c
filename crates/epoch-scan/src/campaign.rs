// ─────────────────────────────────────────────────────────────────────
// SCPN EPOCH Tools — Campaign
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! One simulation directory per parameter set.
//!
//! Case `i` is nested in buckets of 10⁶, 10⁴ and 10² cases so no directory
//! ends up with more than a hundred entries:
//!
//! ```text
//! root/run_0_1000000/run_0_10000/run_0_100/run_0/input.deck
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use epoch_deck::{dump_file, Deck};
use epoch_types::error::EpochResult;
use tracing::{debug, info};

use crate::params::Sample;

/// Name of the deck written into every case directory.
pub const DECK_FILE_NAME: &str = "input.deck";

const BUCKETS: [usize; 3] = [1_000_000, 10_000, 100];

/// Directory of case `index` below `root`.
pub fn case_dir(root: impl AsRef<Path>, index: usize) -> PathBuf {
    let mut dir = root.as_ref().to_path_buf();
    for size in BUCKETS {
        let start = index / size * size;
        dir.push(format!("run_{start}_{}", start + size));
    }
    dir.push(format!("run_{index}"));
    dir
}

#[derive(Debug, Clone)]
pub struct Campaign {
    template: Deck,
    root: PathBuf,
    cases: usize,
}

impl Campaign {
    pub fn new(template: Deck, root: impl Into<PathBuf>) -> Self {
        Self {
            template,
            root: root.into(),
            cases: 0,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of cases set up so far.
    pub fn len(&self) -> usize {
        self.cases
    }

    pub fn is_empty(&self) -> bool {
        self.cases == 0
    }

    /// Template deck with the sample's values assigned.
    pub fn deck_for(&self, sample: &Sample) -> EpochResult<Deck> {
        let mut deck = self.template.clone();
        for (path, &value) in sample {
            deck.set(path, value)?;
        }
        Ok(deck)
    }

    /// Write the next case and return its directory.
    pub fn setup_case(&mut self, sample: &Sample) -> EpochResult<PathBuf> {
        let deck = self.deck_for(sample)?;
        let dir = case_dir(&self.root, self.cases);
        std::fs::create_dir_all(&dir)?;
        dump_file(&deck, dir.join(DECK_FILE_NAME))?;
        debug!("Case {} → {}: {:?}", self.cases, dir.display(), sample);
        self.cases += 1;
        Ok(dir)
    }
}

/// Write one path per line.
pub fn write_paths<P: AsRef<Path>>(paths: &[P], file: impl AsRef<Path>) -> EpochResult<()> {
    let file = file.as_ref();
    let mut out = std::io::BufWriter::new(std::fs::File::create(file)?);
    for path in paths {
        writeln!(out, "{}", path.as_ref().display())?;
    }
    out.flush()?;
    info!("Wrote {} case paths to {}", paths.len(), file.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridScan;
    use crate::params::{ParameterRange, ParameterSpace};
    use epoch_deck::{load_file, loads, Value};

    const TEMPLATE: &str = "\
begin:control
  nx = 256
end:control

begin:constant
  intens = 1.0e23
  nel = 1.0e21
end:constant
";

    #[test]
    fn test_case_dir_buckets() {
        assert_eq!(
            case_dir("camp", 0),
            PathBuf::from("camp/run_0_1000000/run_0_10000/run_0_100/run_0")
        );
        assert_eq!(
            case_dir("camp", 1_234_567),
            PathBuf::from(
                "camp/run_1000000_2000000/run_1230000_1240000/run_1234500_1234600/run_1234567"
            )
        );
    }

    #[test]
    fn test_four_samples_four_paths() {
        let tmp = tempfile::tempdir().unwrap();
        let space = ParameterSpace::new()
            .with("constant:intens", ParameterRange::log(1.0e22, 1.0e24))
            .with("constant:nel", ParameterRange::log(1.0e20, 1.0e24));
        let scan = GridScan::new(space, 4).unwrap();

        let mut campaign = Campaign::new(loads(TEMPLATE).unwrap(), tmp.path().join("campaign"));
        let mut paths = Vec::new();
        for sample in scan {
            let dir = campaign.setup_case(&sample).unwrap();
            let deck = load_file(dir.join(DECK_FILE_NAME)).unwrap();
            assert_eq!(
                deck.get("constant:nel").unwrap(),
                &Value::Float(sample["constant:nel"])
            );
            // Untouched keys carried over from the template.
            assert_eq!(deck.get("control:nx").unwrap(), &Value::Int(256));
            paths.push(dir);
        }
        assert_eq!(campaign.len(), 4);
        assert_eq!(paths[3], case_dir(campaign.root(), 3));

        let list = tmp.path().join("paths.txt");
        write_paths(&paths, &list).unwrap();
        let text = std::fs::read_to_string(&list).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert!(text.lines().next().unwrap().ends_with("run_0_100/run_0"));
    }

    #[test]
    fn test_unknown_block_fails_without_writing() {
        let tmp = tempfile::tempdir().unwrap();
        let mut campaign = Campaign::new(loads(TEMPLATE).unwrap(), tmp.path());
        let sample = Sample::from([("laser:intensity".to_string(), 1.0)]);
        assert!(campaign.setup_case(&sample).is_err());
        assert!(campaign.is_empty());
        assert!(!case_dir(tmp.path(), 0).exists());
    }
}
