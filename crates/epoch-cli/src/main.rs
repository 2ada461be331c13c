// ─────────────────────────────────────────────────────────────────────
// SCPN EPOCH Tools — epoch-vis
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use std::process;

use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod prompt;
mod viewer;

use cli::Cli;

const VERBOSE_FILTER: &str = "epoch_vis=debug,epoch_sdf=debug,epoch_deck=debug,epoch_scan=debug,epoch_viz=debug";

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        VERBOSE_FILTER
    } else {
        "epoch_vis=info,epoch_scan=info,epoch_viz=info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = commands::run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
