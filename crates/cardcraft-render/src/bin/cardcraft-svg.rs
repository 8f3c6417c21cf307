//! Render a card template or a saved card document to SVG.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use cardcraft_core::layout::DEFAULT_GRID_SIZE;
use cardcraft_core::{CardDocument, TemplateCatalog};
use cardcraft_render::{RenderContext, RenderError, SvgRenderer};
use clap::{Parser, Subcommand};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("unknown template `{0}`; run `cardcraft-svg list` to see the built-in templates")]
    UnknownTemplate(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid card JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error(transparent)]
    Render(#[from] RenderError),
}

#[derive(Parser, Debug)]
#[command(name = "cardcraft-svg", about = "Export CardCraft cards as SVG")]
struct Cli {
    /// Output pixels per card unit.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Overlay the alignment grid.
    #[arg(long)]
    grid: bool,

    /// Write to a file instead of stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the built-in templates.
    List,
    /// Render a built-in template by id.
    Template { id: String },
    /// Render a card document stored as JSON.
    File { path: PathBuf },
}

fn main() {
    env_logger::init();
    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let catalog = TemplateCatalog::builtin();
    let document = match cli.command {
        Command::List => {
            let mut stdout = io::stdout().lock();
            for template in catalog.all() {
                writeln!(stdout, "{}\t{}\t{}", template.id, template.category.name(), template.name)?;
            }
            return Ok(());
        }
        Command::Template { id } => catalog
            .get(&id)
            .map(|template| template.document.clone())
            .ok_or(CliError::UnknownTemplate(id))?,
        Command::File { path } => {
            let json = fs::read_to_string(&path)?;
            log::info!("loaded card from {}", path.display());
            CardDocument::from_json(&json)?
        }
    };

    let mut ctx = RenderContext::new(&document).with_scale(cli.scale);
    if cli.grid {
        ctx = ctx.with_grid(DEFAULT_GRID_SIZE);
    }
    let svg = SvgRenderer::new().render_to_string(&ctx)?;

    match cli.output {
        Some(path) => {
            fs::write(&path, svg)?;
            log::info!("wrote {}", path.display());
        }
        None => io::stdout().lock().write_all(svg.as_bytes())?,
    }
    Ok(())
}
