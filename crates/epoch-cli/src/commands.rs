// ─────────────────────────────────────────────────────────────────────
// SCPN EPOCH Tools — Subcommands
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use epoch_deck::{dump_file, load_file, Value};
use epoch_scan::{write_paths, Campaign, GridScan, ParameterSpace, RandomScan, Sample};
use epoch_sdf::export::export_npy;
use epoch_sdf::{discover, load_directory, Snapshot};
use epoch_types::config::ToolConfig;
use epoch_viz::{play, plot_auto, render_png, write_gif, Figure, Plot2dOptions};
use tracing::info;

use crate::cli::{Cli, Command, DeckCommand, RenderArgs, ScanArgs};
use crate::prompt::choose_variable;
use crate::viewer::{browse, Viewer};

/// Tool settings plus the command-line overrides that apply to one run.
struct Settings {
    config: ToolConfig,
    opts: Plot2dOptions,
    size: (u32, u32),
}

fn load_config(path: Option<&Path>) -> Result<ToolConfig> {
    match path {
        Some(path) => ToolConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(ToolConfig::default()),
    }
}

fn settings(config: ToolConfig, render: &RenderArgs) -> Result<Settings> {
    let mut render_cfg = config.render.clone();
    if let Some(colormap) = &render.colormap {
        render_cfg.colormap = colormap.clone();
    }
    if let Some(interpolation) = &render.interpolation {
        render_cfg.interpolation = interpolation.clone();
    }
    render_cfg.log_scale |= render.log;
    let opts = Plot2dOptions::from_config(&render_cfg)?;
    let size = (
        render.width.unwrap_or(config.figure.width),
        render.height.unwrap_or(config.figure.height),
    );
    if size.0 < 64 || size.1 < 64 {
        bail!("figure must be at least 64x64 px, got {}x{}", size.0, size.1);
    }
    Ok(Settings { config, opts, size })
}

fn snapshots(dir: &Path, config: &ToolConfig) -> Result<Vec<Snapshot>> {
    let snaps = load_directory(dir, &config.sdf_extension)
        .with_context(|| format!("loading snapshots from {}", dir.display()))?;
    info!("Loaded {} snapshots from {}", snaps.len(), dir.display());
    Ok(snaps)
}

/// Variable from the command line, or asked for on the terminal.
fn variable(snapshot: &Snapshot, given: Option<String>) -> Result<String> {
    choose_variable(snapshot, given, std::io::stdin().lock(), std::io::stdout())
}

fn duration_or(config: &ToolConfig, duration: Option<f64>) -> f64 {
    duration.unwrap_or(config.render.frame_duration)
}

pub fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::List { path } => list(&path, &config),
        Command::Plot {
            file,
            render,
            output,
        } => {
            let s = settings(config, &render)?;
            let output = output.unwrap_or_else(|| PathBuf::from(&s.config.output.plot));
            plot(&file, render.var, &s, &output)
        }
        Command::Play {
            dir,
            render,
            duration,
            preview,
        } => {
            let s = settings(config, &render)?;
            let snaps = snapshots(&dir, &s.config)?;
            let var = variable(&snaps[0], render.var)?;
            let preview = preview.unwrap_or_else(|| PathBuf::from(&s.config.output.preview));
            let duration = duration_or(&s.config, duration);
            let shown = play(&snaps, &var, &s.opts, s.size, duration, &preview, |_, _| {})?;
            println!("Played {shown} frames into {}", preview.display());
            Ok(())
        }
        Command::Gif {
            dir,
            render,
            duration,
            output,
        } => {
            let s = settings(config, &render)?;
            let snaps = snapshots(&dir, &s.config)?;
            let var = variable(&snaps[0], render.var)?;
            let output = output.unwrap_or_else(|| PathBuf::from(&s.config.output.gif));
            let duration = duration_or(&s.config, duration);
            let frames = write_gif(&snaps, &var, &s.opts, s.size, duration, &output)
                .with_context(|| format!("writing {}", output.display()))?;
            println!("Animation saved as {} ({frames} frames)", output.display());
            Ok(())
        }
        Command::Browse {
            dir,
            render,
            slider,
            preview,
        } => {
            let s = settings(config, &render)?;
            let snaps = snapshots(&dir, &s.config)?;
            let var = variable(&snaps[0], render.var)?;
            let preview = preview.unwrap_or_else(|| PathBuf::from(&s.config.output.preview));
            let viewer = Viewer::new(&snaps, &var, s.opts, s.size, slider)?;
            browse(viewer, &preview)
        }
        Command::Export { file, var, output } => {
            let snap = Snapshot::open(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let name = variable(&snap, var)?;
            let output = output.unwrap_or_else(|| PathBuf::from(format!("{name}.npy")));
            export_npy(snap.variable(&name)?, &output)?;
            println!("Saved {name} to {}", output.display());
            Ok(())
        }
        Command::Deck(cmd) => deck(cmd),
        Command::Scan(args) => scan(&args).map(|_| ()),
    }
}

fn list(path: &Path, config: &ToolConfig) -> Result<()> {
    if path.is_dir() {
        let entries = discover(path, &config.sdf_extension)
            .with_context(|| format!("scanning {}", path.display()))?;
        for entry in &entries {
            println!("{:>6}  {}", entry.number, entry.path.display());
        }
        if let Some(first) = entries.first() {
            let snap = Snapshot::open(&first.path)?;
            println!("\nVariables in {}:", first.path.display());
            print!("{}", snap.list_variables());
            print_blocks(&snap);
        }
    } else {
        let snap =
            Snapshot::open(path).with_context(|| format!("reading {}", path.display()))?;
        println!(
            "{}: step {}, t = {:.3e} s",
            path.display(),
            snap.step(),
            snap.time()
        );
        print!("{}", snap.list_variables());
        print_blocks(&snap);
    }
    Ok(())
}

fn print_blocks(snap: &Snapshot) {
    let blocks = snap.list_blocks();
    if !blocks.is_empty() {
        println!("Grids and constants:");
        print!("{blocks}");
    }
}

fn plot(file: &Path, var: Option<String>, s: &Settings, output: &Path) -> Result<()> {
    let snap = Snapshot::open(file).with_context(|| format!("reading {}", file.display()))?;
    let name = variable(&snap, var)?;
    let fig = plot_figure(&snap, &name, s)?;
    render_png(&fig, output).with_context(|| format!("writing {}", output.display()))?;
    println!("Plot saved as {}", output.display());
    Ok(())
}

fn plot_figure(snap: &Snapshot, name: &str, s: &Settings) -> Result<Figure> {
    let mut fig = Figure::new(s.size.0, s.size.1);
    let ax = fig.add_axes();
    plot_auto(&mut fig, ax, snap, name, &s.opts)?;
    Ok(fig)
}

fn deck(cmd: DeckCommand) -> Result<()> {
    match cmd {
        DeckCommand::Show { deck, get, json } => {
            let parsed =
                load_file(&deck).with_context(|| format!("reading deck {}", deck.display()))?;
            match (get, json) {
                (Some(path), true) => {
                    println!("{}", serde_json::to_string_pretty(parsed.get(&path)?)?)
                }
                (Some(path), false) => println!("{}", parsed.get(&path)?),
                (None, true) => println!("{}", serde_json::to_string_pretty(&parsed)?),
                (None, false) => {
                    for (kind, section) in parsed.sections() {
                        println!("{kind}: {} block(s)", section.len());
                    }
                }
            }
            Ok(())
        }
        DeckCommand::Set {
            deck,
            path,
            value,
            output,
        } => {
            let mut parsed =
                load_file(&deck).with_context(|| format!("reading deck {}", deck.display()))?;
            let value = Value::parse(&value);
            let previous = parsed.set(&path, value.clone())?;
            dump_file(&parsed, &output)
                .with_context(|| format!("writing deck {}", output.display()))?;
            match previous {
                Some(old) => println!("{path}: {old} → {value} ({})", output.display()),
                None => println!("{path}: set to {value} ({})", output.display()),
            }
            Ok(())
        }
    }
}

fn scan(args: &ScanArgs) -> Result<Vec<PathBuf>> {
    let template = load_file(&args.deck)
        .with_context(|| format!("reading template deck {}", args.deck.display()))?;
    let space = ParameterSpace::from_file(&args.params)
        .with_context(|| format!("reading parameters {}", args.params.display()))?;

    let samples: Vec<Sample> = if args.random {
        RandomScan::new(space, args.samples, args.seed)?.collect()
    } else {
        GridScan::new(space, args.samples)?.collect()
    };

    let mut campaign = Campaign::new(template, &args.root);
    let paths = samples
        .iter()
        .map(|sample| campaign.setup_case(sample))
        .collect::<Result<Vec<_>, _>>()?;
    write_paths(&paths, &args.paths)?;
    println!(
        "Set up {} cases under {}; paths in {}",
        campaign.len(),
        campaign.root().display(),
        args.paths.display()
    );
    Ok(paths)
}
