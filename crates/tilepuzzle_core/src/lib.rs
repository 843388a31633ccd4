//! Tile reordering puzzle backend.
//!
//! An image is sliced into [`TILE_COUNT`] tiles, which are shuffled and then
//! dragged back into place by the user. Solving the puzzle (or skipping it)
//! unlocks the "reverse side" of each tile: a [`ProfileRecord`] loaded in the
//! background from a bundled JSON document.
//!
//! The presentation layer owns a [`PuzzleState`], calls its operations in
//! response to user input, and renders the result. Everything the core needs
//! from the platform goes through a [`ResourceProvider`].

pub mod catalog;
mod diagnostics;
mod events;
mod puzzle;
mod resources;

pub use catalog::{ParseError, ProfileCatalog, ProfileLoadCompletion, ProfileRecord};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use events::PuzzleEvent;
pub use puzzle::*;
pub use resources::ResourceProvider;

/// Number of tiles in a puzzle, when all image assets are present.
pub const TILE_COUNT: usize = 8;

/// Name of the bundled profile document, without extension.
pub const PROFILE_DOCUMENT_NAME: &str = "ios_model_challenge";
/// Extension of the bundled profile document.
pub const PROFILE_DOCUMENT_EXT: &str = "json";

/// Returns the asset names of the tiles in solved order: `"1"` through
/// `"8"`.
pub fn tile_asset_names() -> impl Iterator<Item = String> {
    (1..=TILE_COUNT).map(|i| i.to_string())
}

#[cfg(test)]
mod tests;
