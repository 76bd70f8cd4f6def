//! Request and response shapes exchanged with the host over the method channel.

use serde_json::Value;

use crate::composition::model::{AssetDescription, SegmentSpec};
use crate::foundation::core::CanvasSize;
use crate::foundation::error::{BridgeError, BridgeResult, PluginError};

/// What the host eventually receives for one call: a value (possibly `null`) or an error.
pub type Reply = Result<Option<Value>, PluginError>;

/// One request from the host.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MethodCall {
    /// Method name, such as `openEditor`.
    pub method: String,
    /// Method arguments; `null` when omitted.
    #[serde(default)]
    pub arguments: Value,
}

impl MethodCall {
    /// Call `method` with `arguments`.
    pub fn new(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }
}

/// Methods the bridge understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    /// Present the editor and answer once it finishes.
    OpenEditor,
    /// Activate a license.
    Unlock,
    /// Acknowledged immediately; the controller owns no releasable resources between sessions.
    Release,
}

impl Method {
    /// Map a wire method name; `None` for unknown names.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "openEditor" => Some(Self::OpenEditor),
            "unlock" => Some(Self::Unlock),
            "release" => Some(Self::Release),
            _ => None,
        }
    }
}

/// Arguments of `openEditor`.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpenEditorArgs {
    /// Raw `configuration` object, parsed by [`crate::Configuration::from_value`].
    pub configuration: Option<Value>,
    /// Prior serialized edit state: an inline object or a URI string.
    pub serialization: Option<Value>,
    /// What to edit.
    pub video: Option<VideoArgs>,
}

/// The `video` object of `openEditor`.
///
/// List entries stay loosely typed here so one malformed entry cannot fail the whole request.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct VideoArgs {
    /// Explicit `{width, height}` dictionary.
    pub size: Option<Value>,
    /// Untrimmed source strings.
    pub videos: Option<Vec<Value>>,
    /// `{videoUri, startTime?, endTime?}` objects.
    pub segments: Option<Vec<Value>>,
    /// A single source string.
    pub video: Option<String>,
}

impl VideoArgs {
    /// Which shape the caller used; lists take precedence over a single source.
    ///
    /// List entries without a string source are dropped with a warning, like entries that fail
    /// to resolve.
    pub fn description(&self) -> Option<AssetDescription> {
        if let Some(videos) = &self.videos {
            return Some(AssetDescription::SourceList(
                videos.iter().filter_map(source_entry).collect(),
            ));
        }
        if let Some(segments) = &self.segments {
            return Some(AssetDescription::SegmentList(
                segments.iter().filter_map(segment_entry).collect(),
            ));
        }
        if let Some(video) = &self.video {
            return Some(AssetDescription::SingleSource(video.clone()));
        }
        match &self.size {
            Some(v) if !v.is_null() => Some(AssetDescription::SizeOnly),
            _ => None,
        }
    }
}

fn source_entry(entry: &Value) -> Option<String> {
    let source = entry.as_str().map(str::to_owned);
    if source.is_none() {
        tracing::warn!(%entry, "dropping video source that is not a string");
    }
    source
}

fn segment_entry(entry: &Value) -> Option<SegmentSpec> {
    let Some(uri) = entry.get("videoUri").and_then(Value::as_str) else {
        tracing::warn!(%entry, "dropping segment without a string videoUri");
        return None;
    };
    Some(SegmentSpec {
        video_uri: uri.to_owned(),
        start_time: trim_marker(entry, "startTime"),
        end_time: trim_marker(entry, "endTime"),
    })
}

fn trim_marker(entry: &Value, key: &str) -> Option<f64> {
    let raw = entry.get(key).filter(|v| !v.is_null())?;
    let seconds = raw.as_f64();
    if seconds.is_none() {
        tracing::warn!(key, marker = %raw, "ignoring non-numeric trim marker");
    }
    seconds
}

/// Arguments of `unlock`.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct UnlockArgs {
    /// License key handed to the verifier.
    pub license: String,
}

pub(crate) fn parse_args<T: serde::de::DeserializeOwned>(raw: Value) -> BridgeResult<T> {
    serde_json::from_value(raw).map_err(|e| BridgeError::invalid_arguments(e.to_string()))
}

/// Success payload of `openEditor`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorResult {
    /// URL of the exported video.
    pub video: String,
    /// Whether the user changed anything.
    pub has_changes: bool,
    /// Inline object, file URL string, or `null` when serialization is disabled.
    pub serialization: Value,
    /// Size of the exported video.
    pub video_size: CanvasSize,
    /// Session identity.
    pub identifier: String,
    /// Echoed segments, when `export.video.segments` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<SegmentSpec>>,
}

#[cfg(test)]
#[path = "../tests/unit/protocol.rs"]
mod tests;
