//! Per-request editor configuration and the serialization policy derived from it.

use std::path::{Path, PathBuf};

use serde_json::Value;
use url::Url;

use crate::foundation::core::SessionId;
use crate::foundation::error::{BridgeError, BridgeResult};

/// The `configuration` object of an `openEditor` request.
///
/// Unknown keys are ignored; they belong to the editor component.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Configuration {
    /// The `export` block.
    pub export: ExportOptions,
}

impl Configuration {
    /// Parse the raw object; absent or `null` yields the defaults.
    pub fn from_value(raw: Option<&Value>) -> BridgeResult<Self> {
        match raw {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(v) => {
                serde_json::from_value(v.clone()).map_err(|e| BridgeError::config(e.to_string()))
            }
        }
    }

    /// The serialization policy for one session: the request's own block, else `fallback`.
    pub fn serialization_policy(
        &self,
        fallback: &SerializationPolicy,
    ) -> BridgeResult<SerializationPolicy> {
        match &self.export.serialization {
            Some(opts) => SerializationPolicy::from_options(opts),
            None => Ok(fallback.clone()),
        }
    }
}

/// Export settings of one request.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportOptions {
    /// Output location hint for the rendered video.
    pub filename: Option<String>,
    /// Video output settings.
    pub video: VideoOptions,
    /// Overrides the controller-wide serialization policy when present.
    pub serialization: Option<SerializationOptions>,
}

/// The `export.video` block.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoOptions {
    /// Output container hint.
    pub format: VideoFormat,
    /// Echo the resolved segment list back in the success response.
    pub segments: bool,
}

/// Output container hint handed to the editor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoFormat {
    /// MPEG-4.
    #[default]
    Mp4,
    /// QuickTime.
    Mov,
    /// Apple MPEG-4 video.
    M4v,
}

impl VideoFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Mp4 => "mp4",
            Self::Mov => "mov",
            Self::M4v => "m4v",
        }
    }
}

/// The `export.serialization` block.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SerializationOptions {
    /// Persist edit state at all.
    pub enabled: bool,
    /// Inline object or file.
    pub export_type: ExportTarget,
    /// File URL or path for [`ExportTarget::FileUrl`].
    pub filename: Option<String>,
}

/// Where serialized edit state goes after a successful export.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ExportTarget {
    /// Returned inline as a structured object.
    #[default]
    #[serde(rename = "object")]
    InMemory,
    /// Written to a file; the response carries its URL.
    #[serde(rename = "fileURL")]
    FileUrl,
}

/// Whether and how edit state is persisted alongside the exported video.
///
/// Captured when a session starts and read-only until it ends.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SerializationPolicy {
    /// Persist edit state at all.
    pub enabled: bool,
    /// Inline object or file.
    pub target: ExportTarget,
    /// Explicit file location; a temp-dir path is derived when unset.
    pub export_path: Option<PathBuf>,
}

impl SerializationPolicy {
    /// No serialization; the response carries `null`.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Policy described by a request's serialization block.
    pub fn from_options(opts: &SerializationOptions) -> BridgeResult<Self> {
        let export_path = opts.filename.as_deref().map(parse_location).transpose()?;
        Ok(Self {
            enabled: opts.enabled,
            target: opts.export_type,
            export_path,
        })
    }

    /// File the serialized state is written to for `session` when exporting to a file.
    pub fn file_path(&self, session: SessionId) -> PathBuf {
        let path = self
            .export_path
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(session.to_string()));
        if path.extension().is_some() {
            path
        } else {
            path.with_extension("json")
        }
    }
}

/// Accept either a `file://` URL or a plain filesystem path.
fn parse_location(raw: &str) -> BridgeResult<PathBuf> {
    if raw.trim().is_empty() {
        return Err(BridgeError::config("serialization filename must be non-empty"));
    }
    match Url::parse(raw) {
        Ok(url) if url.scheme() == "file" => url
            .to_file_path()
            .map_err(|()| BridgeError::config(format!("'{raw}' is not a local file URL"))),
        Ok(url) => Err(BridgeError::config(format!(
            "unsupported serialization location scheme '{}'",
            url.scheme()
        ))),
        Err(_) => Ok(Path::new(raw).to_path_buf()),
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
