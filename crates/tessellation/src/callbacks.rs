//! The callback protocol between a tessellation engine and its client.
//!
//! An engine runs synchronously inside `TessEngine::end_polygon` and reports its
//! output through a [`TessCallbacks`] implementation:
//!
//! - `begin(kind)` opens a primitive batch,
//! - `vertex(handle)` appends one vertex to the batch,
//! - `end()` closes the batch,
//! - `combine(..)` asks the client to create a vertex that was not part of the
//!   input (for example at an edge intersection),
//! - `error(..)` reports a problem without interrupting the tessellation.
//!
//! Several `begin`/`vertex`/`end` sequences may happen during a single call.
//!
//! ## Example
//!
//! ```
//! use polytess_tessellation::callbacks::*;
//! use polytess_tessellation::math::Vertex;
//! use polytess_tessellation::EngineError;
//!
//! // Counts the primitives an engine emits.
//! struct Counter {
//!     primitives: usize,
//! }
//!
//! impl TessCallbacks for Counter {
//!     fn begin(&mut self, _kind: PrimitiveKind) {}
//!     fn vertex(&mut self, _vertex: VertexHandle) {}
//!     fn end(&mut self) {
//!         self.primitives += 1;
//!     }
//!     fn combine(&mut self, _: Vertex, _: &[VertexHandle], _: &[f32]) -> VertexHandle {
//!         VertexHandle::Combined(0)
//!     }
//!     fn error(&mut self, _error: EngineError) {}
//! }
//! ```

use crate::error::EngineError;
use crate::math::Vertex;

/// How the vertices between a `begin` and an `end` are assembled into triangles.
///
/// The numeric values are the GL primitive enumerants.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum PrimitiveKind {
    /// Consecutive groups of three vertices.
    Triangles,
    /// Each vertex after the second forms a triangle with the two previous ones.
    TriangleStrip,
    /// Each vertex after the second forms a triangle with the previous one and the first one.
    TriangleFan,
    /// Anything else, which can't be turned into triangles.
    Unknown(u32),
}

impl PrimitiveKind {
    pub const GL_TRIANGLES: u32 = 0x0004;
    pub const GL_TRIANGLE_STRIP: u32 = 0x0005;
    pub const GL_TRIANGLE_FAN: u32 = 0x0006;

    pub fn from_gl(value: u32) -> Self {
        match value {
            Self::GL_TRIANGLES => PrimitiveKind::Triangles,
            Self::GL_TRIANGLE_STRIP => PrimitiveKind::TriangleStrip,
            Self::GL_TRIANGLE_FAN => PrimitiveKind::TriangleFan,
            other => PrimitiveKind::Unknown(other),
        }
    }

    pub fn to_gl(self) -> u32 {
        match self {
            PrimitiveKind::Triangles => Self::GL_TRIANGLES,
            PrimitiveKind::TriangleStrip => Self::GL_TRIANGLE_STRIP,
            PrimitiveKind::TriangleFan => Self::GL_TRIANGLE_FAN,
            PrimitiveKind::Unknown(value) => value,
        }
    }
}

/// The client data attached to each vertex submitted to an engine.
///
/// Engines don't interpret handles, they hand them back through
/// `TessCallbacks::vertex`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum VertexHandle {
    /// The n-th vertex submitted in the current polygon.
    Input(u32),
    /// The n-th vertex created by `TessCallbacks::combine` in the current polygon.
    Combined(u32),
}

impl VertexHandle {
    #[inline]
    pub fn is_input(self) -> bool {
        matches!(self, VertexHandle::Input(_))
    }

    #[inline]
    pub fn is_combined(self) -> bool {
        matches!(self, VertexHandle::Combined(_))
    }
}

/// Receives the output of a tessellation engine.
pub trait TessCallbacks {
    /// A new primitive batch starts.
    fn begin(&mut self, kind: PrimitiveKind);

    /// Append a vertex to the current primitive batch.
    fn vertex(&mut self, vertex: VertexHandle);

    /// The current primitive batch is complete.
    fn end(&mut self);

    /// Create a vertex at `position`.
    ///
    /// `sources` are the vertices the new one is made of and `weights` their
    /// respective contributions. Both slices have the same length, which may be
    /// zero if the engine doesn't track them.
    fn combine(
        &mut self,
        position: Vertex,
        sources: &[VertexHandle],
        weights: &[f32],
    ) -> VertexHandle;

    /// The engine ran into a problem. Tessellation of the remaining geometry continues.
    fn error(&mut self, error: EngineError);
}

#[test]
fn gl_primitive_values() {
    assert_eq!(PrimitiveKind::from_gl(4), PrimitiveKind::Triangles);
    assert_eq!(PrimitiveKind::from_gl(5), PrimitiveKind::TriangleStrip);
    assert_eq!(PrimitiveKind::from_gl(6), PrimitiveKind::TriangleFan);
    assert_eq!(PrimitiveKind::from_gl(2), PrimitiveKind::Unknown(2));
    assert_eq!(PrimitiveKind::TriangleFan.to_gl(), 6);
}
