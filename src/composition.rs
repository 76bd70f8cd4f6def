//! Canonical video composition and the builder that funnels every request shape into it.

pub(crate) mod builder;
pub(crate) mod model;
