use crate::callbacks::VertexHandle;
use crate::engine::WindingRule;

/// Error returned when a tessellator can't be created.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InitializationError {
    #[error("the tessellation engine could not allocate a context")]
    ContextUnavailable,
    #[error("the tessellation engine does not support the {0:?} winding rule")]
    UnsupportedWindingRule(WindingRule),
}

/// Errors reported by a tessellation engine through `TessCallbacks::error`.
///
/// The numeric codes are the ones used by the GLU tessellator, so that engines
/// exposing raw codes can be translated with `EngineError::from_code`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("gluTessBeginPolygon() must precede a gluTessEndPolygon()")]
    MissingBeginPolygon,
    #[error("gluTessBeginContour() must precede a gluTessEndContour()")]
    MissingBeginContour,
    #[error("gluTessEndPolygon() must follow a gluTessBeginPolygon()")]
    MissingEndPolygon,
    #[error("gluTessEndContour() must follow a gluTessBeginContour()")]
    MissingEndContour,
    #[error("a coordinate is too large or not a number")]
    CoordTooLarge,
    #[error("need combine callback")]
    NeedCombineCallback,
    #[error("out of memory")]
    OutOfMemory,
    #[error("internal error: {0}")]
    Internal(String),
    #[error("unknown error code #{0}")]
    Unknown(u32),
}

impl EngineError {
    pub const MISSING_BEGIN_POLYGON: u32 = 100151;
    pub const MISSING_BEGIN_CONTOUR: u32 = 100152;
    pub const MISSING_END_POLYGON: u32 = 100153;
    pub const MISSING_END_CONTOUR: u32 = 100154;
    pub const COORD_TOO_LARGE: u32 = 100155;
    pub const NEED_COMBINE_CALLBACK: u32 = 100156;
    pub const OUT_OF_MEMORY: u32 = 100902;

    /// Translate a numeric engine error code.
    pub fn from_code(code: u32) -> Self {
        match code {
            Self::MISSING_BEGIN_POLYGON => EngineError::MissingBeginPolygon,
            Self::MISSING_BEGIN_CONTOUR => EngineError::MissingBeginContour,
            Self::MISSING_END_POLYGON => EngineError::MissingEndPolygon,
            Self::MISSING_END_CONTOUR => EngineError::MissingEndContour,
            Self::COORD_TOO_LARGE => EngineError::CoordTooLarge,
            Self::NEED_COMBINE_CALLBACK => EngineError::NeedCombineCallback,
            Self::OUT_OF_MEMORY => EngineError::OutOfMemory,
            other => EngineError::Unknown(other),
        }
    }

    /// The numeric code of this error, if it has one.
    pub fn code(&self) -> Option<u32> {
        match self {
            EngineError::MissingBeginPolygon => Some(Self::MISSING_BEGIN_POLYGON),
            EngineError::MissingBeginContour => Some(Self::MISSING_BEGIN_CONTOUR),
            EngineError::MissingEndPolygon => Some(Self::MISSING_END_POLYGON),
            EngineError::MissingEndContour => Some(Self::MISSING_END_CONTOUR),
            EngineError::CoordTooLarge => Some(Self::COORD_TOO_LARGE),
            EngineError::NeedCombineCallback => Some(Self::NEED_COMBINE_CALLBACK),
            EngineError::OutOfMemory => Some(Self::OUT_OF_MEMORY),
            EngineError::Internal(_) => None,
            EngineError::Unknown(code) => Some(*code),
        }
    }
}

/// A non-fatal anomaly encountered during one tessellation call.
///
/// Warnings are logged as they happen and the call carries on with the rest
/// of the geometry.
#[derive(Clone, Debug, PartialEq)]
pub enum TessellationWarning {
    /// The engine reported an error.
    Engine(EngineError),
    /// The engine emitted a primitive kind the tessellator can't assemble.
    UnrecognizedPrimitive(u32),
    /// The engine ended a primitive that was never begun.
    MissingBegin,
    /// A triangle list ended with a group of fewer than three vertices.
    IncompleteTriangle { leftover: usize },
    /// The engine referenced a vertex that doesn't exist in this call.
    UnknownVertex(VertexHandle),
}

impl core::fmt::Display for TessellationWarning {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TessellationWarning::Engine(e) => {
                write!(f, "tessellation error: {e}")
            }
            TessellationWarning::UnrecognizedPrimitive(kind) => {
                write!(f, "unrecognized tessellation primitive: {kind:#x}")
            }
            TessellationWarning::MissingBegin => {
                write!(f, "primitive ended without a matching begin")
            }
            TessellationWarning::IncompleteTriangle { leftover } => {
                write!(f, "dropped {leftover} trailing vertices of a triangle list")
            }
            TessellationWarning::UnknownVertex(handle) => {
                write!(f, "reference to unknown vertex {handle:?}")
            }
        }
    }
}

impl From<EngineError> for TessellationWarning {
    fn from(value: EngineError) -> Self {
        TessellationWarning::Engine(value)
    }
}

#[test]
fn error_codes() {
    for code in 100151..=100156 {
        assert_eq!(EngineError::from_code(code).code(), Some(code));
    }
    assert_eq!(EngineError::from_code(100902), EngineError::OutOfMemory);
    assert_eq!(EngineError::from_code(7), EngineError::Unknown(7));
    assert_eq!(
        EngineError::from_code(100154).to_string(),
        "gluTessEndContour() must follow a gluTessBeginContour()"
    );
}
