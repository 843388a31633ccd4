use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use eyre::{Context, Result};
use serde::Serialize;
use tilepuzzle_core::{ProfileCatalog, PuzzleState};

use crate::resources::DirResources;
use crate::settings::Settings;

/// Tile puzzle command-line interface
///
/// If no subcommand is specified, then an interactive game is started.
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    /// Settings file to load on top of the defaults.
    #[arg(short, long, global = true)]
    pub settings: Option<PathBuf>,
    /// Directory containing the tile images and the profile document.
    #[arg(short, long, global = true)]
    pub assets: Option<PathBuf>,
    /// Seed for reproducible shuffles.
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub subcommand: Option<Subcommand>,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Play the puzzle interactively.
    Play,
    /// Print all profiles from the bundled document as JSON.
    Profiles,
    /// Parse a profile document and report which entries would be skipped.
    Check {
        /// Profile document to check, use '-' for stdin.
        #[arg(value_parser)]
        document: clio::Input,
    },
}

pub(crate) fn exec(args: Args) -> Result<()> {
    let mut settings = Settings::load(args.settings.as_deref());
    if let Some(assets_dir) = args.assets {
        settings.assets_dir = assets_dir;
    }
    if args.seed.is_some() {
        settings.seed = args.seed;
    }

    let resources = DirResources::new(&settings.assets_dir, settings.image_extensions.clone());
    log::debug!("using assets in {}", resources.dir().display());

    match args.subcommand.unwrap_or(Subcommand::Play) {
        Subcommand::Play => {
            let mut puzzle =
                PuzzleState::new(Arc::new(resources)).with_shuffle_algorithm(settings.shuffle);
            if let Some(seed) = settings.seed {
                puzzle = puzzle.with_seed(seed);
            }
            crate::play::run(&mut puzzle, std::io::stdin().lock(), std::io::stdout())
        }

        Subcommand::Profiles => {
            let catalog = ProfileCatalog::load(&resources).context("error loading profiles")?;
            write_json_output(catalog.records())
        }

        Subcommand::Check { mut document } => {
            let mut buffer = vec![];
            document
                .read_to_end(&mut buffer)
                .context("error reading profile document")?;
            let catalog =
                ProfileCatalog::from_slice(&buffer).context("error parsing profile document")?;
            for diagnostic in catalog.diagnostics() {
                println!("{diagnostic}");
            }
            println!(
                "{} profiles, {} skipped entries",
                catalog.len(),
                catalog.diagnostics().len(),
            );
            Ok(())
        }
    }
}

fn write_json_output<T: ?Sized + Serialize>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), value)
        .context("error serializing data and writing to stdout")?;
    println!();
    Ok(())
}
