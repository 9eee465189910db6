use std::{
    collections::HashMap,
    fs,
    path::PathBuf,
};

use crate::error::LoadError;

/// Path of the standard library every interpreter imports on start-up.
pub const BOOTSTRAP_PATH: &str = "MATHLIB/BOOTSTRAP.MATH";
/// Source of the standard library, bundled into the binary.
pub const BOOTSTRAP_SOURCE: &str = include_str!("../../stdlib/bootstrap.math");

/// Paths under this prefix are served from the bundled modules, never from
/// the loader.
const BUNDLED_PREFIX: &str = "MATHLIB/";

/// Retrieves the source text behind an `IMPORT` path.
///
/// Loading is synchronous; the interpreter blocks on it.
pub trait SourceLoader {
    /// Returns the text of the module at `path`.
    ///
    /// # Errors
    /// A `LoadError` describing why the text is unavailable.
    fn load(&self, path: &str) -> Result<String, LoadError>;
}

/// Loads modules from the file system, relative to a root directory.
#[derive(Debug, Clone)]
pub struct FsLoader {
    root: PathBuf,
}

impl FsLoader {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl SourceLoader for FsLoader {
    fn load(&self, path: &str) -> Result<String, LoadError> {
        let full = self.root.join(path);
        fs::read_to_string(&full).map_err(|source| LoadError::Io { path: full.display().to_string(),
                                                                    source })
    }
}

/// Serves modules from memory. Useful for embedding hosts and tests.
///
/// # Example
/// ```
/// use abacus::interpreter::import::{MemoryLoader, SourceLoader};
///
/// let loader = MemoryLoader::default().with_module("LIB.MATH", "X = 1");
///
/// assert_eq!(loader.load("LIB.MATH").unwrap(), "X = 1");
/// assert!(loader.load("OTHER.MATH").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    modules: HashMap<String, String>,
}

impl MemoryLoader {
    #[must_use]
    pub fn with_module(mut self, path: impl Into<String>, source: impl Into<String>) -> Self {
        self.modules.insert(path.into(), source.into());
        self
    }
}

impl SourceLoader for MemoryLoader {
    fn load(&self, path: &str) -> Result<String, LoadError> {
        self.modules
            .get(path)
            .cloned()
            .ok_or_else(|| LoadError::UnknownModule { path: path.to_string() })
    }
}

/// Resolves `path` against the bundled modules first, then `loader`.
pub(crate) fn load_module(loader: &dyn SourceLoader, path: &str) -> Result<String, LoadError> {
    if path == BOOTSTRAP_PATH {
        return Ok(BOOTSTRAP_SOURCE.to_string());
    }
    if path.starts_with(BUNDLED_PREFIX) {
        return Err(LoadError::UnknownModule { path: path.to_string() });
    }
    loader.load(path)
}
