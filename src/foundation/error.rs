/// Convenience alias used throughout the bridge.
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Reasons a video description cannot become a composition.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A size dictionary was supplied but a dimension is missing, non-numeric or not positive.
    #[error("Invalid video size: width and height must be both positive.")]
    InvalidCanvasSize,

    /// No asset survived resolution and no concrete size was given.
    #[error("A video composition without assets must have a specific size.")]
    MissingCompositionSize,

    /// The single video source could not be resolved.
    #[error("Could not resolve the video source.")]
    UnresolvableSource(String),

    /// Neither assets nor a size were supplied.
    #[error("The video must not be null.")]
    MissingVideoDescription,
}

/// Top-level error taxonomy of the bridge.
#[derive(thiserror::Error, Debug)]
pub enum BridgeError {
    /// A request arrived while another one is still pending.
    #[error("Cancelled due to multiple requests.")]
    Busy,

    /// The video description could not become a composition.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Request arguments are missing or ill-typed.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// The `configuration` object could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The editor refused to present.
    #[error("unable to present editor: {0}")]
    Present(String),

    /// Serialization is enabled but the editor has no state to hand over.
    #[error("The editor did not provide serialization data.")]
    MissingSerializationData,

    /// Export failed in the editor or while writing its state.
    #[error("{0}")]
    Export(String),

    /// The license verifier rejected the key.
    #[error("{0}")]
    Unlock(String),

    /// The host called a method the bridge does not know.
    #[error("method not implemented: {0}")]
    NotImplemented(String),

    /// Wrapped lower-level error from a collaborator or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BridgeError {
    /// Build a [`BridgeError::Validation`] value.
    pub fn validation(err: ValidationError) -> Self {
        Self::Validation(err)
    }

    /// Build a [`BridgeError::InvalidArguments`] value.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Build a [`BridgeError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`BridgeError::Present`] value.
    pub fn present(msg: impl Into<String>) -> Self {
        Self::Present(msg.into())
    }

    /// Build a [`BridgeError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`BridgeError::Unlock`] value.
    pub fn unlock(msg: impl Into<String>) -> Self {
        Self::Unlock(msg.into())
    }

    /// Stable caller-facing classification of this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Busy => ErrorCode::MultipleRequests,
            Self::Validation(_) | Self::Config(_) | Self::Present(_) => ErrorCode::UnableToLoad,
            Self::MissingSerializationData | Self::Export(_) | Self::Other(_) => {
                ErrorCode::UnableToExport
            }
            Self::Unlock(_) => ErrorCode::UnableToUnlock,
            Self::InvalidArguments(_) => ErrorCode::InvalidArguments,
            Self::NotImplemented(_) => ErrorCode::NotImplemented,
        }
    }
}

/// Stable error codes delivered to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCode {
    /// Another request was still pending.
    MultipleRequests,
    /// The editor could not be opened with the given description.
    UnableToLoad,
    /// The session ended without a usable export.
    UnableToExport,
    /// The license key was rejected.
    UnableToUnlock,
    /// Request arguments are missing or ill-typed.
    InvalidArguments,
    /// Unknown method name.
    NotImplemented,
}

impl ErrorCode {
    /// Wire spelling of the code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MultipleRequests => "multiple-requests",
            Self::UnableToLoad => "unable-to-load",
            Self::UnableToExport => "unable-to-export",
            Self::UnableToUnlock => "unable-to-unlock",
            Self::InvalidArguments => "invalid-arguments",
            Self::NotImplemented => "not-implemented",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured error as delivered through the response channel.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PluginError {
    /// Stable classification.
    pub code: ErrorCode,
    /// Human-readable description.
    pub message: String,
    /// Extra context, such as the raw URI that failed to resolve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl PluginError {
    /// Error without details.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attach extra context.
    pub fn with_details(mut self, details: impl Into<serde_json::Value>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl std::fmt::Display for PluginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PluginError {}

impl From<BridgeError> for PluginError {
    fn from(err: BridgeError) -> Self {
        let code = err.code();
        match err {
            BridgeError::Validation(ValidationError::UnresolvableSource(raw)) => {
                PluginError::new(code, ValidationError::UnresolvableSource(raw.clone()).to_string())
                    .with_details(raw)
            }
            BridgeError::Unlock(msg) => {
                PluginError::new(code, "The license is invalid.").with_details(msg)
            }
            BridgeError::Other(e) => PluginError::new(code, format!("{e:#}")),
            other => PluginError::new(code, other.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
