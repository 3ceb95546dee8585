mod args;
mod renderer;
mod table;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use linescale_core::model::Session;
use linescale_core::svg::render_svg;
use linescale_core::views::{ScaleReport, render_plot, scale_session};
use linescale_protocol::Viewport;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::args::SessionArgs;

#[derive(Parser)]
#[command(name = "linescale")]
#[command(about = "Scale tool-path lines between working areas and flag out-of-bounds coordinates")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default lab session to a JSON file
    Init {
        /// Destination file
        #[arg(value_hint = clap::ValueHint::FilePath)]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Scale the session's lines and print the results table
    Scale {
        #[command(flatten)]
        input: SessionArgs,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write original.svg and scaled.svg plots
    Plot {
        #[command(flatten)]
        input: SessionArgs,

        /// Output directory
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        out: PathBuf,

        /// Use the dark palette
        #[arg(long)]
        dark: bool,

        /// Plot width and height in pixels
        #[arg(long, default_value_t = 800.0)]
        size: f64,
    },

    /// Browse the results in the terminal
    View {
        #[command(flatten)]
        input: SessionArgs,
    },
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "linescale=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { path, force } => init(&path, force),
        Commands::Scale { input, json } => {
            let report = build_report(&input)?;
            let mut out = std::io::stdout().lock();
            if json {
                serde_json::to_writer_pretty(&mut out, &report)?;
                writeln!(out)?;
            } else {
                write!(out, "{}", table::format_report(&report))?;
            }
            Ok(())
        }
        Commands::Plot {
            input,
            out,
            dark,
            size,
        } => {
            let report = build_report(&input)?;
            write_plots(&report, &out, dark, size)
        }
        Commands::View { input } => {
            let report = build_report(&input)?;
            renderer::render_tui(&report)
        }
    }
}

fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    Session::default()
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote default session");
    Ok(())
}

fn build_report(input: &SessionArgs) -> Result<ScaleReport> {
    let session = input.load()?;
    let report = scale_session(&session).context("cannot scale and visualize")?;
    let flagged = report.out_of_bounds_rows().len();
    if flagged > 0 {
        tracing::warn!(
            lines = flagged,
            "scaled lines fall outside the new working area"
        );
    }
    Ok(report)
}

fn write_plots(report: &ScaleReport, out: &Path, dark: bool, size: f64) -> Result<()> {
    if !(size.is_finite() && size > 0.0) {
        bail!("plot size must be positive, got {size}");
    }
    std::fs::create_dir_all(out).with_context(|| format!("creating {}", out.display()))?;
    let viewport = Viewport::sized(size, size);

    let plots = [
        ("original.svg", &report.original, report.old_area, "Original Lines"),
        ("scaled.svg", &report.scaled, report.new_area, "Scaled Lines"),
    ];
    for (file, lines, area, title) in plots {
        let cmds = render_plot(lines, area, &viewport, title);
        let svg = render_svg(&cmds, size, size, dark);
        let path = out.join(file);
        std::fs::write(&path, svg).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), lines = lines.len(), "wrote plot");
    }
    Ok(())
}
