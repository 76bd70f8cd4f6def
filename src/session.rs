//! Session controller: admission, edit session lifecycle and result reconciliation.

pub(crate) mod controller;
pub(crate) mod edit_session;
pub(crate) mod guard;
pub(crate) mod reconcile;
