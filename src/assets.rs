//! Raw asset URI resolution.

pub(crate) mod resolve;
