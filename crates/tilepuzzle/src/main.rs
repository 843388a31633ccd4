//! Terminal front end for the tile reordering puzzle.

#[macro_use]
extern crate lazy_static;

mod cli;
mod play;
mod resources;
mod settings;

fn main() -> eyre::Result<()> {
    use clap::Parser;

    let args = cli::Args::parse();

    // Initialize logging.
    env_logger::builder().init();

    color_eyre::install()?;

    cli::exec(args)
}
