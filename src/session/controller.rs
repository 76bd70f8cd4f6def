use serde_json::Value;

use crate::assets::resolve::AssetResolver;
use crate::composition::builder::VideoCompositionBuilder;
use crate::config::{Configuration, SerializationPolicy};
use crate::editor::{EditorComponent, EditorHooks, TerminalEvent};
use crate::foundation::core::SessionId;
use crate::foundation::error::{BridgeError, BridgeResult, PluginError};
use crate::license::{AcceptAnyLicense, LicenseVerifier};
use crate::protocol::{Method, MethodCall, OpenEditorArgs, Reply, UnlockArgs, parse_args};
use crate::session::edit_session::{EditSession, PriorState};
use crate::session::guard::{Busy, ResponseHandle, SessionGuard};
use crate::session::reconcile::ResultReconciler;

/// Controller-wide settings fixed at construction.
#[derive(Clone, Debug, Default)]
pub struct ControllerOptions {
    /// Serialization policy for requests whose configuration has no serialization block.
    pub serialization: SerializationPolicy,
}

/// Owns the editor component and answers host requests one at a time.
///
/// Every admitted request is answered exactly once: immediately for validation failures,
/// `unlock` and `release`, or through [`VideoEditorController::complete`] once the editor reaches
/// a terminal state.
pub struct VideoEditorController<E> {
    editor: E,
    resolver: AssetResolver,
    license: Box<dyn LicenseVerifier>,
    hooks: EditorHooks,
    options: ControllerOptions,
    guard: SessionGuard,
    session: Option<EditSession>,
}

impl<E: EditorComponent> VideoEditorController<E> {
    /// Controller with no hooks, an accept-all license verifier and serialization disabled.
    pub fn new(editor: E, resolver: AssetResolver) -> Self {
        Self {
            editor,
            resolver,
            license: Box::new(AcceptAnyLicense),
            hooks: EditorHooks::default(),
            options: ControllerOptions::default(),
            guard: SessionGuard::new(),
            session: None,
        }
    }

    /// Use `verifier` for `unlock`.
    pub fn with_license(mut self, verifier: impl LicenseVerifier + 'static) -> Self {
        self.license = Box::new(verifier);
        self
    }

    /// Use `hooks` for every presentation.
    pub fn with_hooks(mut self, hooks: EditorHooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Replace the controller-wide settings.
    pub fn with_options(mut self, options: ControllerOptions) -> Self {
        self.options = options;
        self
    }

    /// The owned editor component.
    pub fn editor(&self) -> &E {
        &self.editor
    }

    /// Mutable access to the owned editor component.
    pub fn editor_mut(&mut self) -> &mut E {
        &mut self.editor
    }

    /// True while a response is outstanding.
    pub fn is_busy(&self) -> bool {
        self.guard.is_busy()
    }

    /// Identity of the session currently presented, if any.
    pub fn active_session(&self) -> Option<SessionId> {
        self.session.as_ref().map(EditSession::id)
    }

    /// Entry point for every host request.
    pub fn handle(&mut self, call: MethodCall, respond: ResponseHandle) {
        if let Err(Busy(rejected)) = self.guard.admit(respond) {
            tracing::debug!(method = %call.method, "rejecting request while another is pending");
            rejected.send(Err(PluginError::from(BridgeError::Busy)));
            return;
        }

        let reply = match Method::parse(&call.method) {
            Some(Method::OpenEditor) => match self.open_editor(call.arguments) {
                Ok(()) => return,
                Err(e) => Err(e),
            },
            Some(Method::Unlock) => self.unlock(call.arguments).map(|()| None),
            Some(Method::Release) => Ok(None),
            None => Err(BridgeError::NotImplemented(call.method)),
        };
        self.deliver(reply.map_err(PluginError::from));
    }

    fn open_editor(&mut self, arguments: Value) -> BridgeResult<()> {
        let args = parse_args::<Option<OpenEditorArgs>>(arguments)?.unwrap_or_default();
        let config = Configuration::from_value(args.configuration.as_ref())?;
        let policy = config.serialization_policy(&self.options.serialization)?;

        let video = args.video.unwrap_or_default();
        let composition = VideoCompositionBuilder::new(&self.resolver)
            .build(video.description().as_ref(), video.size.as_ref())?;

        let prior = args.serialization.as_ref().and_then(PriorState::from_value);
        let mut session = EditSession::new(composition, policy, &config.export);
        session.start(
            &mut self.editor,
            prior.as_ref(),
            &mut self.hooks,
            args.configuration.as_ref(),
        )?;
        self.session = Some(session);
        Ok(())
    }

    fn unlock(&mut self, arguments: Value) -> BridgeResult<()> {
        let args: UnlockArgs = parse_args(arguments)?;
        self.license
            .unlock(&args.license)
            .map_err(|e| BridgeError::unlock(format!("{e:#}")))?;
        tracing::info!("editor license unlocked");
        Ok(())
    }

    /// Terminal callback from the editor: dismiss, reconcile, answer the pending caller.
    ///
    /// The session and the pending slot are both cleared before the reply callback runs, so the
    /// callback may issue the next request. Events arriving without an active session are
    /// ignored.
    #[tracing::instrument(skip_all)]
    pub fn complete(&mut self, event: TerminalEvent) {
        let Some(mut session) = self.session.take() else {
            tracing::warn!(?event, "terminal event without an active session");
            return;
        };
        if let Err(e) = session.conclude(&event) {
            tracing::warn!(session = %session.id(), error = %e, "unexpected session state");
        }

        self.editor.dismiss(true);
        let reply = ResultReconciler::reconcile(&session, event, &mut self.editor);
        if let Err(e) = session.teardown() {
            tracing::warn!(session = %session.id(), error = %e, "unexpected session state");
        }
        tracing::info!(session = %session.id(), ok = reply.is_ok(), "session finished");
        self.deliver(reply);
    }

    fn deliver(&mut self, reply: Reply) {
        if !self.guard.resolve(reply) {
            tracing::warn!("no pending response to deliver to");
        }
    }
}

impl<E: std::fmt::Debug> std::fmt::Debug for VideoEditorController<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoEditorController")
            .field("editor", &self.editor)
            .field("busy", &self.guard.is_busy())
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
