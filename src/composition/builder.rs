use serde_json::Value;

use crate::assets::resolve::AssetResolver;
use crate::composition::model::{
    AssetDescription, ResolvedSegment, SegmentSpec, VideoComposition,
};
use crate::foundation::core::CanvasSize;
use crate::foundation::error::ValidationError;

/// Outcome of parsing the optional explicit size dictionary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SizeSpec {
    /// No dictionary was supplied (or it was `null`).
    Unspecified,
    /// A dictionary was supplied but does not describe a positive size.
    Invalid,
    /// A usable positive size.
    Concrete(CanvasSize),
}

impl SizeSpec {
    /// Classify the raw `size` argument. `null` counts as absent.
    pub fn parse(raw: Option<&Value>) -> Self {
        let Some(raw) = raw else {
            return Self::Unspecified;
        };
        if raw.is_null() {
            return Self::Unspecified;
        }
        let Some(obj) = raw.as_object() else {
            return Self::Invalid;
        };
        let dim = |key: &str| obj.get(key).and_then(Value::as_f64);
        match (dim("width"), dim("height")) {
            (Some(w), Some(h)) => CanvasSize::new(w, h).map_or(Self::Invalid, Self::Concrete),
            _ => Self::Invalid,
        }
    }

    fn concrete(self) -> Option<CanvasSize> {
        match self {
            Self::Concrete(size) => Some(size),
            _ => None,
        }
    }
}

/// Normalizes every accepted request shape into one [`VideoComposition`].
///
/// Unresolvable entries of a list are dropped (and logged); an unresolvable single source is
/// fatal.
#[derive(Debug)]
pub struct VideoCompositionBuilder<'a> {
    resolver: &'a AssetResolver,
}

impl<'a> VideoCompositionBuilder<'a> {
    /// Builder resolving sources through `resolver`.
    pub fn new(resolver: &'a AssetResolver) -> Self {
        Self { resolver }
    }

    /// Build the composition for `description`, sized by `explicit_size` when it is concrete.
    ///
    /// A missing description with a non-null size is treated as a blank canvas request.
    #[tracing::instrument(skip(self, explicit_size))]
    pub fn build(
        &self,
        description: Option<&AssetDescription>,
        explicit_size: Option<&Value>,
    ) -> Result<VideoComposition, ValidationError> {
        let size = SizeSpec::parse(explicit_size);

        let size_only = AssetDescription::SizeOnly;
        let description = match description {
            Some(d) => d,
            None if size == SizeSpec::Unspecified => {
                return Err(ValidationError::MissingVideoDescription);
            }
            None => &size_only,
        };

        match description {
            AssetDescription::SourceList(uris) => {
                let segments = uris
                    .iter()
                    .filter_map(|raw| self.resolve_or_drop(raw))
                    .map(ResolvedSegment::untrimmed)
                    .collect();
                finish_list(segments, size)
            }
            AssetDescription::SegmentList(specs) => {
                let segments = specs
                    .iter()
                    .filter_map(|spec| self.resolve_segment(spec))
                    .collect();
                finish_list(segments, size)
            }
            AssetDescription::SingleSource(raw) => {
                let url = self
                    .resolver
                    .resolve(raw)
                    .ok_or_else(|| ValidationError::UnresolvableSource(raw.clone()))?;
                let size = match size {
                    SizeSpec::Invalid => return Err(ValidationError::InvalidCanvasSize),
                    other => other.concrete(),
                };
                VideoComposition::new(vec![ResolvedSegment::untrimmed(url)], size)
            }
            AssetDescription::SizeOnly => match size {
                SizeSpec::Concrete(s) => VideoComposition::new(Vec::new(), Some(s)),
                SizeSpec::Invalid => Err(ValidationError::InvalidCanvasSize),
                SizeSpec::Unspecified => Err(ValidationError::MissingVideoDescription),
            },
        }
    }

    fn resolve_or_drop(&self, raw: &str) -> Option<url::Url> {
        let url = self.resolver.resolve(raw);
        if url.is_none() {
            tracing::warn!(uri = raw, "dropping unresolvable video source");
        }
        url
    }

    fn resolve_segment(&self, spec: &SegmentSpec) -> Option<ResolvedSegment> {
        let url = self.resolve_or_drop(&spec.video_uri)?;
        if let (Some(start), Some(end)) = (spec.start_time, spec.end_time)
            && start >= end
        {
            tracing::warn!(
                uri = %spec.video_uri,
                start,
                end,
                "segment trim start is not before its end"
            );
        }
        Some(ResolvedSegment {
            url,
            start_time: spec.start_time,
            end_time: spec.end_time,
        })
    }
}

fn finish_list(
    segments: Vec<ResolvedSegment>,
    size: SizeSpec,
) -> Result<VideoComposition, ValidationError> {
    if segments.is_empty() {
        return match size {
            SizeSpec::Concrete(s) => VideoComposition::new(segments, Some(s)),
            _ => Err(ValidationError::MissingCompositionSize),
        };
    }
    match size {
        SizeSpec::Concrete(s) => VideoComposition::new(segments, Some(s)),
        SizeSpec::Unspecified => VideoComposition::new(segments, None),
        SizeSpec::Invalid => Err(ValidationError::InvalidCanvasSize),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/builder.rs"]
mod tests;
