use std::fmt;

/// Stable identity of a tile within one puzzle session.
///
/// This is an index into the tile arena of [`crate::PuzzleState`], which is
/// also the tile's position in the solved order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId(pub u32);
impl TileId {
    /// Returns the ID as an index into the tile arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One piece of the sliced puzzle image.
#[derive(Debug, Clone)]
pub struct Tile<I> {
    /// Stable identity.
    pub id: TileId,
    /// Asset name the image was loaded from.
    pub name: String,
    /// Opaque image handle.
    pub image: I,
}
