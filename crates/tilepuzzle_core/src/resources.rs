/// Platform capability for loading image assets and bundled files.
///
/// The provider is shared with the background thread that loads profiles, so
/// it must be `Send + Sync`.
pub trait ResourceProvider: 'static + Send + Sync {
    /// Opaque image handle.
    type Image;

    /// Loads the image asset with the given name, or returns `None` if it does
    /// not exist.
    fn load_image(&self, name: &str) -> Option<Self::Image>;

    /// Reads the bundled file `{name}.{ext}`, or returns `None` if it does not
    /// exist or cannot be read.
    fn read_bundled_file(&self, name: &str, ext: &str) -> Option<Vec<u8>>;
}
