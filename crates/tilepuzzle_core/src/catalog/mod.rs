//! Catalog of programmer profiles, parsed from the bundled JSON document.
//!
//! The document looks like this:
//!
//! ```json
//! {
//!   "response": {
//!     "locations": [
//!       {
//!         "name": "New York",
//!         "services": [
//!           { "platform": "iOS", "programmers": [ { "name": "Ada" } ] }
//!         ]
//!       }
//!     ]
//!   }
//! }
//! ```
//!
//! Parsing is best-effort: a malformed location, service, or programmer is
//! skipped with a [`Diagnostic`] and the rest of the document is still used.
//! Only a document that cannot be read or is not JSON at all is an error.

use std::sync::{Arc, mpsc};

use serde_json::Value;

mod location;
mod record;

use location::Location;
pub use record::ProfileRecord;

use crate::{
    Diagnostic, Diagnostics, PROFILE_DOCUMENT_EXT, PROFILE_DOCUMENT_NAME, ResourceProvider,
    SessionToken,
};

/// Error that prevents the profile document from being used at all.
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    /// The bundled document does not exist or could not be read.
    #[error("unable to read bundled file {0:?}")]
    DocumentUnreadable(String),
    /// The document is not valid JSON.
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Flat ordered list of profiles, along with the diagnostics emitted while
/// parsing them.
#[derive(Debug, Default, Clone)]
pub struct ProfileCatalog {
    records: Vec<ProfileRecord>,
    diagnostics: Vec<Diagnostic>,
}
impl ProfileCatalog {
    /// Constructs an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads and parses the bundled profile document.
    pub fn load(resources: &impl ResourceProvider) -> Result<Self, ParseError> {
        let filename = format!("{PROFILE_DOCUMENT_NAME}.{PROFILE_DOCUMENT_EXT}");
        let Some(bytes) = resources.read_bundled_file(PROFILE_DOCUMENT_NAME, PROFILE_DOCUMENT_EXT)
        else {
            log::warn!("bundled file {filename:?} is missing");
            return Err(ParseError::DocumentUnreadable(filename));
        };
        log::trace!("read {} bytes from {filename:?}", bytes.len());
        Self::from_slice(&bytes)
    }

    /// Parses a profile document.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ParseError> {
        let document: Value = serde_json::from_slice(bytes)?;
        Ok(Self::from_document(&document))
    }

    /// Builds a catalog from an already-parsed JSON document.
    pub fn from_document(document: &Value) -> Self {
        let diagnostics = Diagnostics::new();
        let mut records = vec![];

        match document.pointer("/response/locations") {
            Some(Value::Array(locations)) => {
                for (i, value) in locations.iter().enumerate() {
                    if let Some(location) = Location::parse(i, value, &diagnostics) {
                        records.extend(location.into_records());
                    }
                }
            }
            Some(_) => diagnostics.field_missing("`response.locations` is not an array"),
            None => diagnostics.field_missing("missing `response.locations`"),
        }

        log::debug!("parsed {} profiles", records.len());
        Self {
            records,
            diagnostics: diagnostics.take(),
        }
    }

    /// Spawns a thread that loads the bundled profile document and sends the
    /// result on `tx`, tagged with `session`.
    pub fn spawn_load<R: ResourceProvider>(
        resources: Arc<R>,
        session: SessionToken,
        tx: mpsc::Sender<ProfileLoadCompletion>,
    ) {
        std::thread::spawn(move || {
            log::trace!("loading profiles for session {session}");
            let result = Self::load(&*resources);
            if tx.send(ProfileLoadCompletion { session, result }).is_err() {
                log::debug!("dropping profiles for session {session}; receiver is gone");
            }
        });
    }

    /// Returns the profiles in document order.
    pub fn records(&self) -> &[ProfileRecord] {
        &self.records
    }
    /// Returns the diagnostics emitted while parsing.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
    /// Returns the number of profiles.
    pub fn len(&self) -> usize {
        self.records.len()
    }
    /// Returns whether there are no profiles.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
    /// Splits the catalog into its profiles and diagnostics.
    pub fn into_parts(self) -> (Vec<ProfileRecord>, Vec<Diagnostic>) {
        (self.records, self.diagnostics)
    }
}

/// Result of a background profile load.
#[derive(Debug)]
pub struct ProfileLoadCompletion {
    /// Session that requested the load.
    pub session: SessionToken,
    /// Loaded catalog, or the reason it could not be loaded.
    pub result: Result<ProfileCatalog, ParseError>,
}
