use crate::protocol::Reply;

/// The callback that answers one host request. Consumed by [`ResponseHandle::send`], so it can
/// only ever be answered once.
pub struct ResponseHandle {
    reply: Box<dyn FnOnce(Reply)>,
}

impl ResponseHandle {
    /// Wrap the host's reply callback.
    pub fn new(reply: impl FnOnce(Reply) + 'static) -> Self {
        Self {
            reply: Box::new(reply),
        }
    }

    /// Answer the request.
    pub fn send(self, reply: Reply) {
        (self.reply)(reply)
    }
}

impl std::fmt::Debug for ResponseHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseHandle").finish_non_exhaustive()
    }
}

/// Admission was refused; the rejected caller's handle is given back so it can be told.
#[derive(Debug)]
pub struct Busy(pub ResponseHandle);

/// Single pending-response slot. Not a queue: a request arriving while the slot is occupied is
/// rejected, never buffered.
#[derive(Debug, Default)]
pub struct SessionGuard {
    pending: Option<ResponseHandle>,
}

impl SessionGuard {
    /// An empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Occupy the slot with `handle`, or hand it back as [`Busy`] if the slot is taken.
    pub fn admit(&mut self, handle: ResponseHandle) -> Result<(), Busy> {
        if self.pending.is_some() {
            return Err(Busy(handle));
        }
        self.pending = Some(handle);
        Ok(())
    }

    /// True while a response is outstanding.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Empty the slot and answer the pending caller. Returns `false` if nothing was pending.
    ///
    /// The slot is cleared before the callback runs, so a callback that immediately issues the
    /// next request is admitted.
    pub fn resolve(&mut self, reply: Reply) -> bool {
        match self.pending.take() {
            Some(handle) => {
                handle.send(reply);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/guard.rs"]
mod tests;
