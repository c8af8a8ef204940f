//! Hands a graph description to an external renderer (Graphviz by default).

use crate::error::{OutputError, Result};
use std::io;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

pub const DEFAULT_RENDERER: &str = "dot";

#[derive(Debug, Clone)]
pub struct Renderer {
    program: String,
    args: Vec<String>,
}

impl Renderer {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `<program> -Tsvg`
    pub fn svg(program: impl Into<String>) -> Self {
        Self::new(program, ["-Tsvg"])
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Feed `description` to the renderer's stdin and collect its stdout.
    pub async fn render(&self, description: &str) -> Result<Vec<u8>> {
        debug!("Running {} {:?}", self.program, self.args);

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.invocation_error(e))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| self.invocation_error(io::Error::other("stdin not captured")))?;

        // Fed concurrently with draining stdout.
        let input = description.as_bytes().to_vec();
        let writer = tokio::spawn(async move {
            stdin.write_all(&input).await?;
            stdin.shutdown().await
        });

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| self.invocation_error(e))?;

        if !output.status.success() {
            return Err(OutputError::RendererFailed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        writer
            .await
            .map_err(|e| self.invocation_error(io::Error::other(e)))?
            .map_err(|e| self.invocation_error(e))?;

        Ok(output.stdout)
    }

    fn invocation_error(&self, source: io::Error) -> OutputError {
        OutputError::RenderInvocation {
            program: self.program.clone(),
            source,
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::svg(DEFAULT_RENDERER)
    }
}
