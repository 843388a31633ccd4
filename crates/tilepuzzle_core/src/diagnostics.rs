use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

/// Sink for non-fatal problems encountered while setting up a puzzle.
///
/// Every diagnostic is also sent to the `log` facade, so this exists only for
/// callers (and tests) that want to inspect what was skipped. Cloning is cheap
/// and clones share the same list.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    lines: Arc<Mutex<Vec<Diagnostic>>>,
}
impl Diagnostics {
    /// Constructs a new empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic and logs it as a warning.
    pub fn push(&self, diagnostic: Diagnostic) {
        log::warn!("{diagnostic}");
        self.lines.lock().push(diagnostic);
    }
    /// Records many diagnostics without logging them again.
    pub fn extend(&self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.lines.lock().extend(diagnostics);
    }

    /// Records an [`DiagnosticKind::AssetMissing`] diagnostic.
    pub fn asset_missing(&self, msg: impl ToString) {
        self.push(Diagnostic::new(DiagnosticKind::AssetMissing, msg));
    }
    /// Records a [`DiagnosticKind::FieldMissing`] diagnostic.
    pub fn field_missing(&self, msg: impl ToString) {
        self.push(Diagnostic::new(DiagnosticKind::FieldMissing, msg));
    }
    /// Records a [`DiagnosticKind::DocumentUnreadable`] diagnostic.
    pub fn document_unreadable(&self, msg: impl ToString) {
        self.push(Diagnostic::new(DiagnosticKind::DocumentUnreadable, msg));
    }

    /// Clears all diagnostics.
    pub fn clear(&self) {
        self.lines.lock().clear();
    }
    /// Returns all the diagnostics so far.
    pub fn lines(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        self.lines.lock()
    }
    /// Removes and returns all the diagnostics so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.lines.lock())
    }
    /// Returns the number of diagnostics of the given kind.
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.lines.lock().iter().filter(|d| d.kind == kind).count()
    }
}

/// Kind of non-fatal problem.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum DiagnosticKind {
    /// An image asset was missing, so the puzzle has fewer tiles.
    AssetMissing,
    /// A field of the profile document was missing or had the wrong type, so
    /// that branch of the document was skipped.
    FieldMissing,
    /// The profile document could not be read or parsed at all.
    DocumentUnreadable,
}

/// Non-fatal problem, with a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Kind of problem.
    pub kind: DiagnosticKind,
    /// Brief message.
    pub msg: String,
}
impl Diagnostic {
    /// Constructs a new diagnostic.
    pub fn new(kind: DiagnosticKind, msg: impl ToString) -> Self {
        Self {
            kind,
            msg: msg.to_string(),
        }
    }
}
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { kind, msg } = self;
        write!(f, "{kind}: {msg}")
    }
}
