use std::path::Path;

use serde_json::Value;
use url::Url;

use crate::config::ExportTarget;
use crate::editor::{EditorComponent, ExportOutput, TerminalEvent};
use crate::foundation::error::{BridgeError, BridgeResult, PluginError};
use crate::protocol::{EditorResult, Reply};
use crate::session::edit_session::EditSession;

/// Turns an editor terminal event into the reply for the pending caller.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResultReconciler;

impl ResultReconciler {
    /// Build the single reply for `session`. Serialized state is read from `editor`.
    #[tracing::instrument(skip_all, fields(session = %session.id()))]
    pub fn reconcile<E: EditorComponent + ?Sized>(
        session: &EditSession,
        event: TerminalEvent,
        editor: &mut E,
    ) -> Reply {
        match event {
            TerminalEvent::Succeeded(output) => Self::succeeded(session, output, editor)
                .and_then(|result| {
                    serde_json::to_value(result)
                        .map(Some)
                        .map_err(|e| BridgeError::export(e.to_string()))
                })
                .map_err(|e| {
                    tracing::warn!(error = %e, "export reconciliation failed");
                    PluginError::from(e)
                }),
            TerminalEvent::Failed(msg) => {
                tracing::warn!(error = %msg, "editor reported export failure");
                Err(PluginError::from(BridgeError::export(msg)))
            }
            TerminalEvent::Cancelled => Ok(None),
        }
    }

    fn succeeded<E: EditorComponent + ?Sized>(
        session: &EditSession,
        output: ExportOutput,
        editor: &mut E,
    ) -> BridgeResult<EditorResult> {
        let serialization = Self::serialization(session, editor)?;
        let segments = session.echo_segments().then(|| match &output.segments {
            Some(rendered) => rendered.iter().map(|s| s.to_spec()).collect::<Vec<_>>(),
            None => session.composition().segment_specs(),
        });

        Ok(EditorResult {
            video: output.video.to_string(),
            has_changes: output.has_changes,
            serialization,
            video_size: output.size,
            identifier: session.id().to_string(),
            segments,
        })
    }

    fn serialization<E: EditorComponent + ?Sized>(
        session: &EditSession,
        editor: &mut E,
    ) -> BridgeResult<Value> {
        let policy = session.policy();
        if !policy.enabled {
            return Ok(Value::Null);
        }
        let bytes = editor
            .serialized_state()
            .ok_or(BridgeError::MissingSerializationData)?;

        match policy.target {
            ExportTarget::FileUrl => {
                let path = policy.file_path(session.id());
                write_state(&path, &bytes)?;
                let abs =
                    std::path::absolute(&path).map_err(|e| BridgeError::export(e.to_string()))?;
                let url = Url::from_file_path(&abs).map_err(|()| {
                    BridgeError::export(format!("'{}' has no file URL", abs.display()))
                })?;
                Ok(Value::String(url.to_string()))
            }
            ExportTarget::InMemory => {
                serde_json::from_slice(&bytes).map_err(|e| BridgeError::export(e.to_string()))
            }
        }
    }
}

fn write_state(path: &Path, bytes: &[u8]) -> BridgeResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| BridgeError::export(e.to_string()))?;
    }
    std::fs::write(path, bytes).map_err(|e| BridgeError::export(e.to_string()))
}

#[cfg(test)]
#[path = "../../tests/unit/session/reconcile.rs"]
mod tests;
