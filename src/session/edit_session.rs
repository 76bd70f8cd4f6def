use std::path::Path;

use anyhow::Context as _;
use serde_json::Value;
use url::Url;

use crate::composition::model::VideoComposition;
use crate::config::{ExportOptions, SerializationPolicy, VideoFormat};
use crate::editor::{
    EditModel, EditorComponent, EditorHooks, PresentRequest, RestoreContext, TerminalEvent,
};
use crate::foundation::core::SessionId;
use crate::foundation::error::{BridgeError, BridgeResult};

/// Lifecycle of one edit attempt.
///
/// `Idle -> Presenting -> {Succeeded | Failed | Cancelled} -> Idle`; nothing else is legal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Not presented yet, or finished.
    Idle,
    /// The editor is on screen.
    Presenting,
    /// Export finished.
    Succeeded,
    /// Export failed.
    Failed,
    /// Dismissed by the user.
    Cancelled,
}

impl SessionState {
    /// One of the three outcomes.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Cancelled)
    }

    /// Whether `self -> next` is a legal step.
    pub fn can_transition_to(self, next: SessionState) -> bool {
        match (self, next) {
            (Self::Idle, Self::Presenting) => true,
            (Self::Presenting, n) => n.is_terminal(),
            (s, Self::Idle) => s.is_terminal(),
            _ => false,
        }
    }

    fn for_event(event: &TerminalEvent) -> Self {
        match event {
            TerminalEvent::Succeeded(_) => Self::Succeeded,
            TerminalEvent::Failed(_) => Self::Failed,
            TerminalEvent::Cancelled => Self::Cancelled,
        }
    }
}

/// A state change the session machine does not allow.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("illegal session transition {from:?} -> {to:?}")]
pub struct IllegalTransition {
    /// State before the attempted change.
    pub from: SessionState,
    /// Requested state.
    pub to: SessionState,
}

/// Serialized state from an earlier session, as supplied by the host.
#[derive(Clone, Debug, PartialEq)]
pub enum PriorState {
    /// State object sent with the request.
    Inline(Value),
    /// File holding the state.
    Location(Url),
}

impl PriorState {
    /// Interpret the request's `serialization` value. Anything unusable is dropped with a warning.
    pub fn from_value(raw: &Value) -> Option<Self> {
        match raw {
            Value::Null => None,
            Value::Object(_) => Some(Self::Inline(raw.clone())),
            Value::String(s) => {
                let url = Url::parse(s).ok().or_else(|| {
                    let p = Path::new(s);
                    p.is_absolute().then(|| Url::from_file_path(p).ok()).flatten()
                });
                if url.is_none() {
                    tracing::warn!(location = %s, "ignoring unparseable serialization location");
                }
                url.map(Self::Location)
            }
            other => {
                tracing::warn!(kind = ?other, "ignoring serialization of unsupported type");
                None
            }
        }
    }

    fn load(&self) -> anyhow::Result<Vec<u8>> {
        match self {
            Self::Inline(v) => Ok(serde_json::to_vec(v)?),
            Self::Location(url) => {
                anyhow::ensure!(
                    url.scheme() == "file",
                    "unsupported serialization scheme '{}'",
                    url.scheme()
                );
                let path = url
                    .to_file_path()
                    .map_err(|()| anyhow::anyhow!("'{url}' is not a local file URL"))?;
                std::fs::read(&path).with_context(|| format!("read '{}'", path.display()))
            }
        }
    }
}

/// One edit attempt, from presentation to its single terminal outcome.
#[derive(Debug)]
pub struct EditSession {
    id: SessionId,
    composition: VideoComposition,
    policy: SerializationPolicy,
    format: VideoFormat,
    output: Option<String>,
    echo_segments: bool,
    state: SessionState,
}

impl EditSession {
    /// A fresh `Idle` session with its own identity.
    pub fn new(
        composition: VideoComposition,
        policy: SerializationPolicy,
        export: &ExportOptions,
    ) -> Self {
        Self {
            id: SessionId::generate(),
            composition,
            policy,
            format: export.video.format,
            output: export.filename.clone(),
            echo_segments: export.video.segments,
            state: SessionState::Idle,
        }
    }

    /// Session identity, echoed as `identifier` in the success response.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// What the editor was presented with.
    pub fn composition(&self) -> &VideoComposition {
        &self.composition
    }

    /// Serialization policy captured at creation.
    pub fn policy(&self) -> &SerializationPolicy {
        &self.policy
    }

    /// Whether the success response carries the segment list.
    pub fn echo_segments(&self) -> bool {
        self.echo_segments
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    fn transition(&mut self, next: SessionState) -> Result<(), IllegalTransition> {
        if !self.state.can_transition_to(next) {
            return Err(IllegalTransition {
                from: self.state,
                to: next,
            });
        }
        tracing::debug!(session = %self.id, from = ?self.state, to = ?next, "session transition");
        self.state = next;
        Ok(())
    }

    /// Restore prior state (falling back to a default model) and present the editor.
    pub fn start<E: EditorComponent + ?Sized>(
        &mut self,
        editor: &mut E,
        prior: Option<&PriorState>,
        hooks: &mut EditorHooks,
        configuration: Option<&Value>,
    ) -> BridgeResult<()> {
        if self.state != SessionState::Idle {
            return Err(BridgeError::present(format!(
                "session {} already started",
                self.id
            )));
        }

        let model = match prior {
            Some(prior) => self.restore(editor, prior),
            None => EditModel::default(),
        };

        let (icons, will_present) = hooks.split();
        let request = PresentRequest {
            session: self.id,
            composition: &self.composition,
            model: &model,
            format: self.format,
            output: self.output.as_deref(),
            icons,
            configuration,
        };
        if let Some(f) = will_present {
            f(&request);
        }
        editor
            .present(&request)
            .map_err(|e| BridgeError::present(format!("{e:#}")))?;

        tracing::info!(
            session = %self.id,
            segments = self.composition.segments().len(),
            restored = !model.is_default(),
            "editor presented"
        );
        self.transition(SessionState::Presenting)
            .map_err(|e| BridgeError::present(e.to_string()))
    }

    fn restore<E: EditorComponent + ?Sized>(
        &self,
        editor: &mut E,
        prior: &PriorState,
    ) -> EditModel {
        let ctx = RestoreContext {
            canvas: self.composition.size(),
            catalog: self.composition.catalog(),
        };
        match prior.load().and_then(|bytes| editor.restore(&bytes, &ctx)) {
            Ok(model) => model,
            Err(e) => {
                tracing::warn!(
                    session = %self.id,
                    error = %format!("{e:#}"),
                    "could not restore serialized state, starting fresh"
                );
                EditModel::default()
            }
        }
    }

    /// Record the editor's terminal outcome.
    pub fn conclude(&mut self, event: &TerminalEvent) -> Result<(), IllegalTransition> {
        self.transition(SessionState::for_event(event))
    }

    /// Return to `Idle` after the response has been assembled.
    pub fn teardown(&mut self) -> Result<(), IllegalTransition> {
        self.transition(SessionState::Idle)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/edit_session.rs"]
mod tests;
