use std::io;

use thiserror::Error;

/// Failure to retrieve the source text of a module.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The loader went to disk and the read failed.
    #[error("could not read '{path}': {source}")]
    Io {
        /// The resolved location that was read.
        path:   String,
        /// The underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// No module is known under this path, for instance a `MATHLIB/` path
    /// that is not bundled.
    #[error("no module named '{path}'")]
    UnknownModule {
        /// The requested path.
        path: String,
    },
}
