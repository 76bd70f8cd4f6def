use crate::foundation::error::{BridgeError, BridgeResult, ValidationError};

/// Canvas dimensions of a composition, both strictly positive.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CanvasSize {
    /// Width in points.
    pub width: f64,
    /// Height in points.
    pub height: f64,
}

impl CanvasSize {
    /// Construct a size, rejecting non-finite or non-positive dimensions.
    pub fn new(width: f64, height: f64) -> BridgeResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(BridgeError::validation(ValidationError::InvalidCanvasSize));
        }
        Ok(Self { width, height })
    }
}

/// Single-use identity of one edit session.
///
/// Only used to correlate a delivered response with the request that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct SessionId(uuid::Uuid);

impl SessionId {
    /// Generate a fresh random identity.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
