//! Error types for the camera/clip/projection pipeline.
use std::fmt;

/// Which side of the near plane a misused clip call had its endpoints on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipFault {
    /// Both endpoints are in front of the near plane; nothing to clip.
    BothInFront,
    /// Both endpoints are behind the near plane; nothing is visible.
    BothBehind,
    /// The behind and in-front endpoints were passed in the wrong order.
    Swapped,
}

impl fmt::Display for ClipFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipFault::BothInFront => f.write_str("both endpoints are in front of the near plane"),
            ClipFault::BothBehind => f.write_str("both endpoints are behind the near plane"),
            ClipFault::Swapped => f.write_str("behind and in-front endpoints are swapped"),
        }
    }
}

/// Identifies a single primitive of a [`Scene`](crate::Scene).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveRef {
    Point(usize),
    Line(usize),
    Edge { object: usize, edge: usize },
    Triangle { object: usize, triangle: usize },
}

impl fmt::Display for PrimitiveRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveRef::Point(i) => write!(f, "point #{i}"),
            PrimitiveRef::Line(i) => write!(f, "line #{i}"),
            PrimitiveRef::Edge { object, edge } => write!(f, "object #{object} edge #{edge}"),
            PrimitiveRef::Triangle { object, triangle } => {
                write!(f, "object #{object} triangle #{triangle}")
            }
        }
    }
}

/// Precondition violations detected while building a frame.
///
/// None of these are transient: each one means some caller handed a pure
/// function input it does not accept, so the frame is abandoned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("expected {expected} components, found {found}")]
    InvalidDimension { expected: usize, found: usize },

    #[error("degenerate clip: {0}")]
    DegenerateClip(ClipFault),

    #[error("triangle clipping needs 1 or 2 vertices in front of the near plane, found {in_front}")]
    InvalidVisibilityPartition { in_front: usize },

    #[error("vertex index {index} out of range for a mesh with {len} vertices")]
    VertexIndexOutOfRange { index: usize, len: usize },

    #[error("{primitive}: {source}")]
    Primitive {
        primitive: PrimitiveRef,
        #[source]
        source: Box<RenderError>,
    },
}

impl RenderError {
    /// Attaches the primitive being compiled when the error occurred.
    pub fn at(self, primitive: PrimitiveRef) -> Self {
        RenderError::Primitive {
            primitive,
            source: Box::new(self),
        }
    }

    /// The innermost error, with any primitive context stripped.
    pub fn root_cause(&self) -> &RenderError {
        match self {
            RenderError::Primitive { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_names_primitive() {
        let err = RenderError::InvalidVisibilityPartition { in_front: 3 }
            .at(PrimitiveRef::Triangle { object: 1, triangle: 4 });
        assert_eq!(
            err.to_string(),
            "object #1 triangle #4: triangle clipping needs 1 or 2 vertices in front of the near plane, found 3"
        );
        assert_eq!(
            err.root_cause(),
            &RenderError::InvalidVisibilityPartition { in_front: 3 }
        );
    }

    #[test]
    fn test_clip_fault_message() {
        let err = RenderError::DegenerateClip(ClipFault::BothBehind).at(PrimitiveRef::Line(2));
        assert_eq!(
            err.to_string(),
            "line #2: degenerate clip: both endpoints are behind the near plane"
        );
    }
}
