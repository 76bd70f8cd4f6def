//! Session controller that exposes an opaque video editor component to a host application over a
//! single request/response channel.
//!
//! The editor does the editing; this crate does the bookkeeping around it:
//!
//! 1. **Admit**: at most one request is outstanding per controller ([`SessionGuard`]).
//! 2. **Build**: the loosely shaped `video` argument becomes one validated [`VideoComposition`].
//! 3. **Present**: an [`EditSession`] restores prior edit state (best effort) and presents the
//!    editor.
//! 4. **Reconcile**: the editor's terminal event becomes exactly one reply, plus optional
//!    serialized edit state ([`ResultReconciler`]).
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod composition;
mod config;
mod editor;
mod foundation;
mod license;
mod protocol;
mod session;

pub use crate::assets::resolve::{
    AssetResolver, DirectoryAssets, EmbeddedAssets, NoEmbeddedAssets,
};
pub use crate::composition::builder::{SizeSpec, VideoCompositionBuilder};
pub use crate::composition::model::{
    AssetDescription, ResolvedSegment, SegmentSpec, VideoComposition,
};
pub use crate::config::{
    Configuration, ExportOptions, ExportTarget, SerializationOptions, SerializationPolicy,
    VideoFormat, VideoOptions,
};
pub use crate::editor::headless::{HeadlessEditor, Presentation};
pub use crate::editor::{
    EditModel, EditorComponent, EditorHooks, ExportOutput, PresentRequest, RestoreContext,
    TerminalEvent,
};
pub use crate::foundation::core::{CanvasSize, SessionId};
pub use crate::foundation::error::{
    BridgeError, BridgeResult, ErrorCode, PluginError, ValidationError,
};
pub use crate::license::{AcceptAnyLicense, LicenseVerifier};
pub use crate::protocol::{
    EditorResult, Method, MethodCall, OpenEditorArgs, Reply, UnlockArgs, VideoArgs,
};
pub use crate::session::controller::{ControllerOptions, VideoEditorController};
pub use crate::session::edit_session::{EditSession, IllegalTransition, PriorState, SessionState};
pub use crate::session::guard::{Busy, ResponseHandle, SessionGuard};
pub use crate::session::reconcile::ResultReconciler;
