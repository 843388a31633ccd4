use std::path::{Path, PathBuf};

use tilepuzzle_core::ResourceProvider;

/// Resources stored as plain files in a directory.
///
/// Tile images are `{dir}/{name}.{ext}` for the first configured extension
/// that exists, and the image handle is the file path. Bundled files are
/// `{dir}/{name}.{ext}`.
#[derive(Debug, Clone)]
pub struct DirResources {
    dir: PathBuf,
    image_extensions: Vec<String>,
}
impl DirResources {
    pub fn new(dir: impl Into<PathBuf>, image_extensions: Vec<String>) -> Self {
        Self {
            dir: dir.into(),
            image_extensions,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
impl ResourceProvider for DirResources {
    type Image = PathBuf;

    fn load_image(&self, name: &str) -> Option<Self::Image> {
        self.image_extensions
            .iter()
            .map(|ext| self.dir.join(format!("{name}.{ext}")))
            .find(|path| path.is_file())
    }

    fn read_bundled_file(&self, name: &str, ext: &str) -> Option<Vec<u8>> {
        let path = self.dir.join(format!("{name}.{ext}"));
        match std::fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                log::warn!("error reading {}: {e}", path.display());
                None
            }
        }
    }
}
