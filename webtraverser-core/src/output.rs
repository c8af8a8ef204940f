//! Where the finished graph goes, picked from the `--output` value.

use crate::dot::to_dot;
use crate::error::{OutputError, Result};
use crate::render::Renderer;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use webtraverser_scanner::WebGraph;

pub const DEFAULT_OUTPUT: &str = "out.svg";
pub const STDOUT_MARKER: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Rendered through the external renderer.
    Svg(PathBuf),
    /// Graph description, verbatim.
    Dot(PathBuf),
    /// JSON snapshot of the graph.
    Json(PathBuf),
    Stdout,
    /// No known extension; the description goes to stdout.
    Unrecognized(String),
}

impl OutputTarget {
    pub fn from_path(output: &str) -> Self {
        let output = output.trim();
        let lower = output.to_lowercase();

        if output == STDOUT_MARKER {
            OutputTarget::Stdout
        } else if lower.ends_with(".svg") {
            OutputTarget::Svg(PathBuf::from(output))
        } else if lower.ends_with(".dot") {
            OutputTarget::Dot(PathBuf::from(output))
        } else if lower.ends_with(".json") {
            OutputTarget::Json(PathBuf::from(output))
        } else {
            OutputTarget::Unrecognized(output.to_string())
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            OutputTarget::Svg(path) | OutputTarget::Dot(path) | OutputTarget::Json(path) => {
                Some(path.as_path())
            }
            OutputTarget::Stdout | OutputTarget::Unrecognized(_) => None,
        }
    }
}

/// Produce the bytes `target` expects for `graph`.
pub async fn render_output(
    graph: &WebGraph,
    target: &OutputTarget,
    renderer: &Renderer,
) -> Result<Vec<u8>> {
    match target {
        OutputTarget::Svg(_) => renderer.render(&to_dot(graph)).await,
        OutputTarget::Json(_) => Ok(serde_json::to_vec_pretty(&graph.snapshot())?),
        OutputTarget::Dot(_) | OutputTarget::Stdout | OutputTarget::Unrecognized(_) => {
            Ok(to_dot(graph).into_bytes())
        }
    }
}

/// Render `graph` and write it to `target`. Existing files are overwritten.
pub async fn write_output(
    graph: &WebGraph,
    target: &OutputTarget,
    renderer: &Renderer,
) -> Result<()> {
    if let OutputTarget::Unrecognized(output) = target {
        warn!("Don't know how to handle {}. Writing to stdout", output);
    }

    let bytes = render_output(graph, target, renderer).await?;

    match target.path() {
        Some(path) => {
            tokio::fs::write(path, &bytes)
                .await
                .map_err(|source| OutputError::OutputWrite {
                    path: path.to_path_buf(),
                    source,
                })?;
            info!("Wrote {} bytes to {}", bytes.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(&bytes)
                .and_then(|_| stdout.flush())
                .map_err(|source| OutputError::OutputWrite {
                    path: PathBuf::from(STDOUT_MARKER),
                    source,
                })?;
        }
    }

    Ok(())
}
