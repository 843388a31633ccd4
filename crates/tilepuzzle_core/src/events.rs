use crate::ProfileRecord;

/// Event emitted by [`crate::PuzzleState`] for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PuzzleEvent {
    /// The solved flag changed. `true` is emitted exactly once per session,
    /// when the puzzle is solved or skipped.
    SolvedChanged(bool),
    /// The profile list changed, because a background load completed,
    /// placeholders were synthesized, or the puzzle was cleared.
    ProfilesUpdated(Vec<ProfileRecord>),
}

/// Callback registered with [`crate::PuzzleState::subscribe()`].
pub(crate) type Listener = Box<dyn FnMut(&PuzzleEvent)>;
