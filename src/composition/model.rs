use url::Url;

use crate::foundation::core::CanvasSize;
use crate::foundation::error::ValidationError;

/// One clip as described by the caller, in the wire shape `{videoUri, startTime?, endTime?}`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentSpec {
    /// Source of the clip, as sent by the caller.
    pub video_uri: String,
    /// Trim start in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<f64>,
    /// Trim end in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<f64>,
}

/// The ways a caller can describe what to edit. At most one shape per request.
#[derive(Clone, Debug, PartialEq)]
pub enum AssetDescription {
    /// One source that must resolve.
    SingleSource(String),
    /// Untrimmed sources; unresolvable entries are dropped.
    SourceList(Vec<String>),
    /// Sources with optional trim markers; unresolvable entries are dropped.
    SegmentList(Vec<SegmentSpec>),
    /// Blank canvas; the size must come from the explicit size dictionary.
    SizeOnly,
}

/// A segment whose source resolved to a concrete resource URL.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedSegment {
    /// Concrete resource location.
    pub url: Url,
    /// Trim start in seconds.
    pub start_time: Option<f64>,
    /// Trim end in seconds.
    pub end_time: Option<f64>,
}

impl ResolvedSegment {
    /// The whole clip at `url`.
    pub fn untrimmed(url: Url) -> Self {
        Self {
            url,
            start_time: None,
            end_time: None,
        }
    }

    /// Re-serialize into the caller-facing segment shape.
    pub fn to_spec(&self) -> SegmentSpec {
        SegmentSpec {
            video_uri: self.url.to_string(),
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

/// Validated description of what the editor operates on.
///
/// A composition without segments always carries a concrete size; there is no way to construct
/// one otherwise.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoComposition {
    segments: Vec<ResolvedSegment>,
    size: Option<CanvasSize>,
}

impl VideoComposition {
    /// Fails with [`ValidationError::MissingCompositionSize`] when there are neither segments nor
    /// a size.
    pub fn new(
        segments: Vec<ResolvedSegment>,
        size: Option<CanvasSize>,
    ) -> Result<Self, ValidationError> {
        if segments.is_empty() && size.is_none() {
            return Err(ValidationError::MissingCompositionSize);
        }
        Ok(Self { segments, size })
    }

    /// Segments in playback order.
    pub fn segments(&self) -> &[ResolvedSegment] {
        &self.segments
    }

    /// Explicit canvas size, if the caller supplied one.
    pub fn size(&self) -> Option<CanvasSize> {
        self.size
    }

    /// True for a size-only canvas.
    pub fn is_blank(&self) -> bool {
        self.segments.is_empty()
    }

    /// Resolved source URLs in segment order.
    pub fn catalog(&self) -> Vec<&Url> {
        self.segments.iter().map(|s| &s.url).collect()
    }

    /// Segments in the caller-facing wire shape.
    pub fn segment_specs(&self) -> Vec<SegmentSpec> {
        self.segments.iter().map(ResolvedSegment::to_spec).collect()
    }
}
