//! Puzzle state machine: populating, shuffling, and moving tiles, and
//! detecting when the puzzle is solved.

use std::fmt;
use std::sync::{Arc, mpsc};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

mod session;
mod shuffle;
mod tile;

pub use session::{SessionToken, SolvePhase, SolveTransition};
pub use shuffle::ShuffleAlgorithm;
pub use tile::{Tile, TileId};

use crate::events::Listener;
use crate::{
    Diagnostics, ProfileCatalog, ProfileLoadCompletion, ProfileRecord, PuzzleEvent,
    ResourceProvider,
};

/// Error returned by a puzzle operation that was called at the wrong time or
/// with bad arguments.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    /// The operation requires tiles but the puzzle has not been populated.
    #[error("puzzle has not been populated")]
    NotPopulated,
    /// A tile position is not a valid index into the current order.
    #[error("position {position} is out of range for {len} tiles")]
    PositionOutOfRange {
        /// Requested position.
        position: usize,
        /// Number of tiles.
        len: usize,
    },
}

/// State of a tile puzzle.
///
/// This must only be mutated from one thread (normally the UI thread).
/// Profiles are loaded on a background thread and only applied when the
/// owning thread calls [`Self::poll_profiles()`] or
/// [`Self::wait_for_profiles()`].
pub struct PuzzleState<R: ResourceProvider> {
    resources: Arc<R>,

    /// Arena of tiles, indexed by [`TileId`].
    tiles: Vec<Tile<R::Image>>,
    /// Present arrangement.
    current_order: Vec<TileId>,
    /// Arrangement that wins the puzzle.
    solved_order: Vec<TileId>,

    /// Profile for each tile position, in document order.
    profiles: Vec<ProfileRecord>,
    /// Whether missing profiles should be replaced with placeholders whenever
    /// the profile list changes during this session.
    pad_profiles: bool,

    phase: SolvePhase,
    session: SessionToken,
    /// Whether a profile load for the current session is in flight.
    loading: bool,
    completions_tx: mpsc::Sender<ProfileLoadCompletion>,
    completions_rx: mpsc::Receiver<ProfileLoadCompletion>,

    shuffle_algorithm: ShuffleAlgorithm,
    rng: ChaCha12Rng,

    diagnostics: Diagnostics,
    listeners: Vec<Listener>,
}

impl<R: ResourceProvider> fmt::Debug for PuzzleState<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PuzzleState")
            .field("current_order", &self.current_order)
            .field("solved_order", &self.solved_order)
            .field("profiles", &self.profiles.len())
            .field("phase", &self.phase)
            .field("session", &self.session)
            .field("loading", &self.loading)
            .field("shuffle_algorithm", &self.shuffle_algorithm)
            .finish_non_exhaustive()
    }
}

impl<R: ResourceProvider> PuzzleState<R> {
    /// Constructs a new empty puzzle that loads its images and profiles from
    /// `resources`.
    pub fn new(resources: Arc<R>) -> Self {
        let (completions_tx, completions_rx) = mpsc::channel();
        Self {
            resources,

            tiles: vec![],
            current_order: vec![],
            solved_order: vec![],

            profiles: vec![],
            pad_profiles: false,

            phase: SolvePhase::Empty,
            session: SessionToken::default(),
            loading: false,
            completions_tx,
            completions_rx,

            shuffle_algorithm: ShuffleAlgorithm::default(),
            rng: ChaCha12Rng::from_rng(&mut rand::rng()),

            diagnostics: Diagnostics::new(),
            listeners: vec![],
        }
    }

    /// Sets the algorithm used by [`Self::shuffle()`].
    #[must_use]
    pub fn with_shuffle_algorithm(mut self, shuffle_algorithm: ShuffleAlgorithm) -> Self {
        self.shuffle_algorithm = shuffle_algorithm;
        self
    }
    /// Seeds the random number generator used by [`Self::shuffle()`], so that
    /// the same sequence of games is generated every time.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha12Rng::seed_from_u64(seed);
        self
    }

    /// Registers a callback for [`PuzzleEvent`]s.
    pub fn subscribe(&mut self, listener: impl FnMut(&PuzzleEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&mut self, event: PuzzleEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
    fn emit_profiles_updated(&mut self) {
        let profiles = self.profiles.clone();
        self.emit(PuzzleEvent::ProfilesUpdated(profiles));
    }

    /// Loads the tile images in solved order and starts loading profiles in
    /// the background.
    ///
    /// Any previous tiles and profiles are discarded. Missing image assets are
    /// skipped, so the puzzle may have fewer than [`crate::TILE_COUNT`] tiles.
    pub fn populate(&mut self) {
        self.clear();

        for name in crate::tile_asset_names() {
            match self.resources.load_image(&name) {
                Some(image) => {
                    let id = TileId(self.tiles.len() as u32);
                    self.tiles.push(Tile { id, name, image });
                }
                None => self
                    .diagnostics
                    .asset_missing(format!("image asset {name:?} is missing")),
            }
        }
        self.solved_order = self.tiles.iter().map(|tile| tile.id).collect();
        self.current_order = self.solved_order.clone();
        self.phase = SolvePhase::Unsolved;
        log::debug!(
            "populated session {} with {} tiles",
            self.session,
            self.tiles.len(),
        );

        self.loading = true;
        ProfileCatalog::spawn_load(
            Arc::clone(&self.resources),
            self.session,
            self.completions_tx.clone(),
        );
    }

    /// Starts a new game: populates the puzzle, shuffles it, and pads the
    /// profile list.
    pub fn new_game(&mut self) {
        self.populate();
        self.shuffle_algorithm
            .shuffle(&mut self.current_order, &mut self.rng);
        self.ensure_profile_count_matches_tiles();
    }

    /// Skips the puzzle: populates it in solved order and unlocks the
    /// profiles without requiring the user to arrange the tiles.
    pub fn skip(&mut self) {
        self.populate();
        self.phase = SolvePhase::Bypassed;
        log::info!("puzzle skipped");
        self.emit(PuzzleEvent::SolvedChanged(true));
        self.ensure_profile_count_matches_tiles();
    }

    /// Clears all tiles, profiles, and flags. Profile loads that are still in
    /// flight will be discarded when they complete.
    pub fn reset(&mut self) {
        self.clear();
        log::debug!("reset to session {}", self.session);
    }

    fn clear(&mut self) {
        let was_solved = self.phase.is_solved();
        let had_profiles = !self.profiles.is_empty();

        self.session = self.session.next();
        self.tiles.clear();
        self.current_order.clear();
        self.solved_order.clear();
        self.profiles.clear();
        self.pad_profiles = false;
        self.phase = SolvePhase::Empty;
        self.loading = false;
        self.diagnostics.clear();

        if was_solved {
            self.emit(PuzzleEvent::SolvedChanged(false));
        }
        if had_profiles {
            self.emit_profiles_updated();
        }
    }

    /// Scrambles the current order using the configured algorithm and random
    /// number generator.
    pub fn shuffle(&mut self) -> Result<(), PuzzleError> {
        if self.phase == SolvePhase::Empty {
            return Err(PuzzleError::NotPopulated);
        }
        self.shuffle_algorithm
            .shuffle(&mut self.current_order, &mut self.rng);
        Ok(())
    }
    /// Scrambles the current order using the configured algorithm and the
    /// given random number generator.
    pub fn shuffle_with_rng<G: Rng>(&mut self, rng: &mut G) -> Result<(), PuzzleError> {
        if self.phase == SolvePhase::Empty {
            return Err(PuzzleError::NotPopulated);
        }
        self.shuffle_algorithm.shuffle(&mut self.current_order, rng);
        Ok(())
    }

    /// Removes the tile at position `from` and reinserts it at position `to`.
    ///
    /// Call [`Self::evaluate_solved()`] afterwards.
    ///
    /// # Panics
    ///
    /// Panics if either position is out of range.
    pub fn move_tile(&mut self, from: usize, to: usize) {
        let len = self.current_order.len();
        assert!(
            from < len && to < len,
            "cannot move tile from {from} to {to} in a puzzle with {len} tiles",
        );
        move_element(&mut self.current_order, from, to);
    }
    /// Same as [`Self::move_tile()`], but returns an error instead of
    /// panicking if either position is out of range.
    pub fn try_move_tile(&mut self, from: usize, to: usize) -> Result<(), PuzzleError> {
        let len = self.current_order.len();
        for position in [from, to] {
            if position >= len {
                return Err(PuzzleError::PositionOutOfRange { position, len });
            }
        }
        move_element(&mut self.current_order, from, to);
        Ok(())
    }

    /// Marks the puzzle solved if the tiles are in the solved order.
    ///
    /// Once solved, the puzzle stays solved until it is reset or populated
    /// again, even if tiles are moved afterwards.
    pub fn evaluate_solved(&mut self) -> SolveTransition {
        if self.phase.is_solved() {
            return SolveTransition::AlreadySolved;
        }
        if self.phase == SolvePhase::Unsolved && self.is_arranged() {
            self.phase = SolvePhase::Solved;
            log::info!("puzzle solved");
            self.emit(PuzzleEvent::SolvedChanged(true));
            SolveTransition::BecameSolved
        } else {
            SolveTransition::Unchanged
        }
    }

    /// Returns whether the current order is identical to the solved order.
    /// An empty puzzle is never arranged.
    pub fn is_arranged(&self) -> bool {
        !self.current_order.is_empty() && self.current_order == self.solved_order
    }

    /// Appends placeholder profiles until there is at least one profile per
    /// tile, and keeps doing so whenever profiles finish loading during this
    /// session. Returns the number of placeholders added.
    pub fn ensure_profile_count_matches_tiles(&mut self) -> usize {
        self.pad_profiles = true;
        let added = self.pad_with_placeholders();
        if added > 0 {
            log::debug!("added {added} placeholder profiles");
            self.emit_profiles_updated();
        }
        added
    }
    fn pad_with_placeholders(&mut self) -> usize {
        let shortfall = self.current_order.len().saturating_sub(self.profiles.len());
        self.profiles
            .extend(std::iter::repeat_with(ProfileRecord::placeholder).take(shortfall));
        shortfall
    }

    /// Applies any profile loads that have completed, without blocking.
    /// Returns whether the profiles changed.
    pub fn poll_profiles(&mut self) -> bool {
        let mut changed = false;
        while let Ok(completion) = self.completions_rx.try_recv() {
            changed |= self.apply_completion(completion);
        }
        changed
    }

    /// Blocks until the profile load for the current session has completed
    /// and applies it. Returns immediately if no load is in flight.
    pub fn wait_for_profiles(&mut self) {
        while self.loading {
            match self.completions_rx.recv() {
                Ok(completion) => {
                    self.apply_completion(completion);
                }
                Err(mpsc::RecvError) => break,
            }
        }
    }

    /// Applies a completed profile load if it belongs to the current session.
    /// Returns whether the profiles changed.
    pub(crate) fn apply_completion(&mut self, completion: ProfileLoadCompletion) -> bool {
        let ProfileLoadCompletion { session, result } = completion;
        if session != self.session {
            log::debug!(
                "discarding profiles from stale session {session} (current session is {})",
                self.session,
            );
            return false;
        }
        self.loading = false;

        match result {
            Ok(catalog) => {
                let (records, diagnostics) = catalog.into_parts();
                self.diagnostics.extend(diagnostics);
                self.profiles.retain(|profile| !profile.placeholder);
                self.profiles.extend(records);
                if self.pad_profiles {
                    self.pad_with_placeholders();
                }
                self.emit_profiles_updated();
                true
            }
            Err(e) => {
                self.diagnostics
                    .document_unreadable(format!("unable to load profiles: {e}"));
                false
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn completion_sender(&self) -> mpsc::Sender<ProfileLoadCompletion> {
        self.completions_tx.clone()
    }

    /// Returns the resource provider.
    pub fn resources(&self) -> &Arc<R> {
        &self.resources
    }
    /// Returns the diagnostics emitted during the current session.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Returns the number of tiles.
    pub fn len(&self) -> usize {
        self.current_order.len()
    }
    /// Returns whether there are no tiles.
    pub fn is_empty(&self) -> bool {
        self.current_order.is_empty()
    }
    /// Returns the tile IDs in their present arrangement.
    pub fn current_order(&self) -> &[TileId] {
        &self.current_order
    }
    /// Returns the tile IDs in the arrangement that wins the puzzle.
    pub fn solved_order(&self) -> &[TileId] {
        &self.solved_order
    }
    /// Returns the tiles in their present arrangement.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile<R::Image>> {
        self.current_order.iter().map(|&id| &self.tiles[id.index()])
    }
    /// Returns the tile with the given ID.
    pub fn tile(&self, id: TileId) -> Option<&Tile<R::Image>> {
        self.tiles.get(id.index())
    }
    /// Returns the tile at the given position.
    pub fn tile_at(&self, position: usize) -> Option<&Tile<R::Image>> {
        self.tile(*self.current_order.get(position)?)
    }
    /// Returns the present position of the tile with the given ID.
    pub fn position_of(&self, id: TileId) -> Option<usize> {
        self.current_order.iter().position(|&tile| tile == id)
    }

    /// Returns the profiles, one per tile position once padded.
    pub fn profiles(&self) -> &[ProfileRecord] {
        &self.profiles
    }
    /// Returns the profile on the reverse side of the tile at the given
    /// position.
    pub fn profile_at(&self, position: usize) -> Option<&ProfileRecord> {
        self.profiles.get(position)
    }
    /// Returns whether the tile at the given position can be flipped over to
    /// show its profile, which requires the puzzle to be solved.
    pub fn can_flip(&self, position: usize) -> bool {
        self.is_solved() && position < self.current_order.len()
    }

    /// Returns whether the puzzle is solved (or skipped).
    pub fn is_solved(&self) -> bool {
        self.phase.is_solved()
    }
    /// Returns where the session is in its lifecycle.
    pub fn phase(&self) -> SolvePhase {
        self.phase
    }
    /// Returns the current session token.
    pub fn session(&self) -> SessionToken {
        self.session
    }
    /// Returns whether a profile load for the current session is in flight.
    pub fn is_loading_profiles(&self) -> bool {
        self.loading
    }
}

/// Moves the element at index `from` to index `to`, shifting the elements in
/// between.
fn move_element<T>(slice: &mut [T], from: usize, to: usize) {
    if from < to {
        slice[from..=to].rotate_left(1);
    } else if to < from {
        slice[to..=from].rotate_right(1);
    }
}
