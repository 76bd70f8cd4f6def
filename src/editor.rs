//! Contract of the opaque editor component.
//!
//! The bridge never looks inside the editor. It hands over a [`PresentRequest`], waits for one
//! [`TerminalEvent`], dismisses the UI and asks for serialized state when the policy wants it.

use std::collections::BTreeMap;

use serde_json::Value;
use url::Url;

use crate::composition::model::{ResolvedSegment, VideoComposition};
use crate::config::VideoFormat;
use crate::foundation::core::{CanvasSize, SessionId};

pub(crate) mod headless;

/// Edit state restored from a previous session, opaque to the bridge.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EditModel(Option<Value>);

impl EditModel {
    /// Wrap an already parsed state object.
    pub fn from_value(v: Value) -> Self {
        Self(Some(v))
    }

    /// Parse serialized state bytes as a JSON object.
    pub fn from_json_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let v: Value = serde_json::from_slice(bytes)?;
        anyhow::ensure!(v.is_object(), "serialized edit state must be a JSON object");
        Ok(Self(Some(v)))
    }

    /// True for the model used when nothing was restored.
    pub fn is_default(&self) -> bool {
        self.0.is_none()
    }

    /// The restored state, if any.
    pub fn as_value(&self) -> Option<&Value> {
        self.0.as_ref()
    }
}

/// What a restore attempt may check serialized state against.
#[derive(Clone, Debug)]
pub struct RestoreContext<'a> {
    /// Explicit canvas size of the new composition.
    pub canvas: Option<CanvasSize>,
    /// Resolved sources of the new composition.
    pub catalog: Vec<&'a Url>,
}

/// Everything the editor needs to present one session.
#[derive(Clone, Debug)]
pub struct PresentRequest<'a> {
    /// Identity of the session being presented.
    pub session: SessionId,
    /// What to edit.
    pub composition: &'a VideoComposition,
    /// Restored or default edit state.
    pub model: &'a EditModel,
    /// Output container hint.
    pub format: VideoFormat,
    /// Output location hint from `export.filename`.
    pub output: Option<&'a str>,
    /// Icon replacements from [`EditorHooks`].
    pub icons: &'a BTreeMap<String, Url>,
    /// The request's raw configuration, passed through untouched.
    pub configuration: Option<&'a Value>,
}

/// Result of a successful export.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportOutput {
    /// Location of the exported video.
    pub video: Url,
    /// Whether the user actually changed anything.
    pub has_changes: bool,
    /// Size of the exported video.
    pub size: CanvasSize,
    /// Segments as rendered by the editor; the composition's own segments are echoed if absent.
    pub segments: Option<Vec<ResolvedSegment>>,
}

/// The three ways an editor session can end.
#[derive(Clone, Debug, PartialEq)]
pub enum TerminalEvent {
    /// Export finished.
    Succeeded(ExportOutput),
    /// Export failed with the editor's message.
    Failed(String),
    /// The user dismissed the editor.
    Cancelled,
}

/// The opaque editor component.
///
/// `present` is expected to return once the UI is up; the terminal outcome arrives later through
/// [`crate::VideoEditorController::complete`].
pub trait EditorComponent {
    /// Rebuild an edit model from serialized state.
    fn restore(&mut self, data: &[u8], ctx: &RestoreContext<'_>) -> anyhow::Result<EditModel> {
        let _ = ctx;
        EditModel::from_json_bytes(data)
    }

    /// Show the editor for `request`.
    fn present(&mut self, request: &PresentRequest<'_>) -> anyhow::Result<()>;

    /// Hide the presented UI.
    fn dismiss(&mut self, animated: bool);

    /// Serialized edit state of the session that just ended, if the editor can provide it.
    fn serialized_state(&mut self) -> Option<Vec<u8>>;
}

type WillPresent = Box<dyn FnMut(&PresentRequest<'_>)>;

/// Presentation customization injected at controller construction.
#[derive(Default)]
pub struct EditorHooks {
    /// Replacement images keyed by the editor's icon identifier.
    pub icon_replacements: BTreeMap<String, Url>,
    will_present: Option<WillPresent>,
}

impl EditorHooks {
    /// No replacements and no callback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the editor icon `id` with the image at `replacement`.
    pub fn icon(mut self, id: impl Into<String>, replacement: Url) -> Self {
        self.icon_replacements.insert(id.into(), replacement);
        self
    }

    /// Run `f` right before every presentation.
    pub fn on_will_present(mut self, f: impl FnMut(&PresentRequest<'_>) + 'static) -> Self {
        self.will_present = Some(Box::new(f));
        self
    }

    pub(crate) fn split(&mut self) -> (&BTreeMap<String, Url>, Option<&mut WillPresent>) {
        (&self.icon_replacements, self.will_present.as_mut())
    }
}

impl std::fmt::Debug for EditorHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorHooks")
            .field("icon_replacements", &self.icon_replacements)
            .field("will_present", &self.will_present.is_some())
            .finish()
    }
}
