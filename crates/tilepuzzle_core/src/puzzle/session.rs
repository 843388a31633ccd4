use std::fmt;

/// Generation counter distinguishing one populate/reset cycle from the next.
///
/// Background profile loads are tagged with the token of the session that
/// started them, so that results arriving after a reset can be discarded.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionToken(u64);
impl SessionToken {
    /// Returns the token for the following session.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}
impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Where a puzzle session is in its lifecycle.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, strum::Display)]
pub enum SolvePhase {
    /// Nothing has been populated yet, or the puzzle was reset.
    #[default]
    Empty,
    /// Tiles are populated and the puzzle has not been solved.
    Unsolved,
    /// The user arranged the tiles into the solved order.
    Solved,
    /// The user skipped the puzzle.
    Bypassed,
}
impl SolvePhase {
    /// Returns whether the tile profiles are unlocked.
    pub fn is_solved(self) -> bool {
        matches!(self, SolvePhase::Solved | SolvePhase::Bypassed)
    }
}

/// Result of [`crate::PuzzleState::evaluate_solved()`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SolveTransition {
    /// The puzzle was just solved. The caller should announce success.
    BecameSolved,
    /// The puzzle was already solved (or skipped) before this evaluation.
    AlreadySolved,
    /// The puzzle is still unsolved.
    Unchanged,
}
impl SolveTransition {
    /// Returns whether the puzzle is solved after the evaluation.
    pub fn is_solved(self) -> bool {
        !matches!(self, SolveTransition::Unchanged)
    }
}
