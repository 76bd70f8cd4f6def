use crate::editor::{EditorComponent, PresentRequest};
use crate::foundation::core::{CanvasSize, SessionId};

/// What a [`HeadlessEditor`] saw when a session was presented.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Session that was presented.
    pub session: SessionId,
    /// Number of segments in the composition.
    pub segment_count: usize,
    /// Explicit canvas size, if any.
    pub canvas: Option<CanvasSize>,
    /// Whether prior state was restored.
    pub restored: bool,
    /// Output container hint.
    pub format: crate::config::VideoFormat,
}

/// Editor without UI: presentation and dismissal are recorded, serialized state is scripted.
///
/// Used by the CLI replay command and by tests.
#[derive(Clone, Debug, Default)]
pub struct HeadlessEditor {
    /// Bytes returned from `serialized_state`.
    pub state: Option<Vec<u8>>,
    /// Make the next `present` call fail with this message.
    pub fail_present: Option<String>,
    presentations: Vec<Presentation>,
    dismissals: usize,
    visible: bool,
}

impl HeadlessEditor {
    /// Editor with no state and no scripted failure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `state` as the serialized edit state.
    pub fn with_state(mut self, state: impl Into<Vec<u8>>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Every presentation so far, oldest first.
    pub fn presentations(&self) -> &[Presentation] {
        &self.presentations
    }

    /// How often the editor was dismissed.
    pub fn dismissals(&self) -> usize {
        self.dismissals
    }

    /// True between `present` and `dismiss`.
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl EditorComponent for HeadlessEditor {
    fn present(&mut self, request: &PresentRequest<'_>) -> anyhow::Result<()> {
        if let Some(msg) = self.fail_present.take() {
            anyhow::bail!(msg);
        }
        self.presentations.push(Presentation {
            session: request.session,
            segment_count: request.composition.segments().len(),
            canvas: request.composition.size(),
            restored: !request.model.is_default(),
            format: request.format,
        });
        self.visible = true;
        Ok(())
    }

    fn dismiss(&mut self, _animated: bool) {
        self.dismissals += 1;
        self.visible = false;
    }

    fn serialized_state(&mut self) -> Option<Vec<u8>> {
        self.state.clone()
    }
}
