use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("IO Error on {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("Error decoding {}: {source}", .path.display())]
    Data {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Error rendering {}: {source}", .path.display())]
    Template {
        path: PathBuf,
        source: handlebars::RenderError,
    },

    #[error("Error computing {}: {source}", .path.display())]
    Overflow { path: PathBuf, source: Overflow },

    #[error("Invalid money format: {source}")]
    Format {
        #[from]
        source: num_format::Error,
    },

    #[error("Money precision of {precision} digits exceeds 28")]
    Precision { precision: u32 },

    #[error("{feature} is not supported yet")]
    Unsupported { feature: &'static str },
}

/// An amount that does not fit in a `Decimal`.
#[derive(Debug, Error, PartialEq, Clone, Copy)]
#[error("{0} is too large")]
pub struct Overflow(pub &'static str);

/// Wraps an `io::Error` with the path it happened on, for use in `map_err`.
pub fn io_error(path: &Path) -> impl FnOnce(io::Error) -> RunError + '_ {
    move |source| RunError::Io {
        path: path.to_path_buf(),
        source,
    }
}
