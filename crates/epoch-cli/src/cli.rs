// ─────────────────────────────────────────────────────────────────────
// SCPN EPOCH Tools — Command Line
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "epoch-vis")]
#[command(version, about = "Inspect, plot and animate EPOCH SDF output; edit decks; set up parameter scans")]
pub struct Cli {
    /// JSON tool configuration (figure size, colormap, output names, ...)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug logging, including every file read
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Rendering overrides shared by the plotting commands.
#[derive(Args, Debug, Clone, Default)]
pub struct RenderArgs {
    /// Variable to plot; prompted for when omitted
    #[arg(long = "var")]
    pub var: Option<String>,

    /// Colormap: viridis, jet, plasma, gray
    #[arg(long)]
    pub colormap: Option<String>,

    /// Interpolation: nearest, bilinear, bicubic
    #[arg(long)]
    pub interpolation: Option<String>,

    /// Logarithmic colour scale
    #[arg(long)]
    pub log: bool,

    /// Figure width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Figure height in pixels
    #[arg(long)]
    pub height: Option<u32>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the variables of a snapshot, or the snapshots of a directory
    List {
        /// SDF file or directory of SDF files
        path: PathBuf,
    },

    /// Plot one variable of a single snapshot to an image
    Plot {
        file: PathBuf,
        #[command(flatten)]
        render: RenderArgs,
        /// Output image (default from config: plot.png)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Autoplay every snapshot of a directory into a preview image
    Play {
        dir: PathBuf,
        #[command(flatten)]
        render: RenderArgs,
        /// Seconds between frames
        #[arg(long)]
        duration: Option<f64>,
        /// Preview image rewritten each frame
        #[arg(long)]
        preview: Option<PathBuf>,
    },

    /// Write an animated GIF of a 2D variable over all snapshots
    Gif {
        dir: PathBuf,
        #[command(flatten)]
        render: RenderArgs,
        /// Seconds per frame (fps = 1 / duration)
        #[arg(long)]
        duration: Option<f64>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Step through snapshots with ← / →, Home / End; q quits
    Browse {
        dir: PathBuf,
        #[command(flatten)]
        render: RenderArgs,
        /// Draw a frame slider under the plot
        #[arg(long)]
        slider: bool,
        #[arg(long)]
        preview: Option<PathBuf>,
    },

    /// Save one variable as a NumPy .npy array
    Export {
        file: PathBuf,
        #[arg(long = "var")]
        var: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Read or edit an input deck
    #[command(subcommand)]
    Deck(DeckCommand),

    /// Materialise a parameter scan as one deck per case
    Scan(ScanArgs),
}

#[derive(Subcommand, Debug)]
pub enum DeckCommand {
    /// Print a deck's blocks, a single value, or its JSON form
    Show {
        deck: PathBuf,
        /// `block:key` or `block:name:key`
        #[arg(long)]
        get: Option<String>,
        #[arg(long)]
        json: bool,
    },

    /// Assign one value and write the deck out
    Set {
        deck: PathBuf,
        /// `block:key` or `block:name:key`
        path: String,
        value: String,
        #[arg(short, long, default_value = "output.deck")]
        output: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Template deck
    #[arg(long)]
    pub deck: PathBuf,

    /// JSON map of deck path → {"min", "max", "log"}
    #[arg(long)]
    pub params: PathBuf,

    /// Number of parameter sets
    #[arg(short = 'n', long, default_value = "4")]
    pub samples: usize,

    /// Campaign root directory
    #[arg(long, default_value = "campaign")]
    pub root: PathBuf,

    /// File receiving one case directory per line
    #[arg(long, default_value = "paths.txt")]
    pub paths: PathBuf,

    /// Monte Carlo sampling instead of a grid
    #[arg(long)]
    pub random: bool,

    #[arg(long, default_value = "0")]
    pub seed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_gif_with_overrides() {
        let cli = Cli::try_parse_from([
            "epoch-vis", "-v", "gif", "test_2d", "--var", "Electric_Field_Ex",
            "--duration", "0.05", "--colormap", "jet",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Gif { dir, render, duration, output } => {
                assert_eq!(dir, PathBuf::from("test_2d"));
                assert_eq!(render.var.as_deref(), Some("Electric_Field_Ex"));
                assert_eq!(render.colormap.as_deref(), Some("jet"));
                assert_eq!(duration, Some(0.05));
                assert_eq!(output, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_deck_set() {
        let cli = Cli::try_parse_from([
            "epoch-vis", "deck", "set", "input.deck", "species:Positron:charge", "1.0",
        ])
        .unwrap();
        match cli.command {
            Command::Deck(DeckCommand::Set { path, value, output, .. }) => {
                assert_eq!(path, "species:Positron:charge");
                assert_eq!(value, "1.0");
                assert_eq!(output, PathBuf::from("output.deck"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
