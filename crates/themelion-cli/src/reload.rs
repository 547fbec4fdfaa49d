//! Dev-server side of `watch`: output rewriting and client messages.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use themelion_module::{GeneratedModule, ModuleError, ReloadSink, WriteOutcome, write_if_changed};
use tracing::{error, info};

use crate::pipeline::{BuildOptions, Project, build};
use crate::types::BuildResult;

/// Messages for the dev-server client, one JSON object per line.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage<'a> {
    FullReload,
    Error { message: &'a str },
}

/// Rewrites the output module after each regeneration and tells the client.
pub struct OutputSink<W> {
    output: PathBuf,
    client: W,
}

impl<W: Write> OutputSink<W> {
    pub fn new(output: impl Into<PathBuf>, client: W) -> Self {
        Self {
            output: output.into(),
            client,
        }
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn into_client(self) -> W {
        self.client
    }

    pub fn send(&mut self, message: &ClientMessage<'_>) {
        let sent = serde_json::to_string(message)
            .map_err(std::io::Error::from)
            .and_then(|line| writeln!(self.client, "{line}"))
            .and_then(|()| self.client.flush());
        if let Err(err) = sent {
            error!(error = %err, "failed to send client message");
        }
    }

    /// Runs the first build of a watch session.
    ///
    /// A failure is reported to the client instead of ending the session;
    /// the next change under a source root retries.
    pub fn initial_build(
        &mut self,
        project: &Project,
        options: BuildOptions,
    ) -> Option<BuildResult> {
        match build(project, &self.output, options) {
            Ok(result) => Some(result),
            Err(err) => {
                let message = format!("{err:#}");
                error!(error = %message, "initial build failed, watching anyway");
                self.send(&ClientMessage::Error { message: &message });
                None
            }
        }
    }
}

impl<W: Write> ReloadSink for OutputSink<W> {
    fn full_reload(&mut self, module: &GeneratedModule) {
        match write_if_changed(&self.output, &module.code) {
            Ok(WriteOutcome::Written) => {
                info!(output = %self.output.display(), "module rewritten");
            }
            Ok(WriteOutcome::Unchanged) => {
                info!(output = %self.output.display(), "module unchanged");
            }
            Err(err) => {
                error!(error = %err, "failed to write module");
                let message = err.to_string();
                self.send(&ClientMessage::Error { message: &message });
                return;
            }
        }
        self.send(&ClientMessage::FullReload);
    }

    fn reload_failed(&mut self, error: &ModuleError) {
        let message = error.to_string();
        self.send(&ClientMessage::Error { message: &message });
    }
}
