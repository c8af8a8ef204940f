use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Failures at the end of a run. All of them are fatal.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to run renderer '{program}': {source}")]
    RenderInvocation {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Renderer '{program}' exited with {status}: {stderr}")]
    RendererFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize graph: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, OutputError>;
