use crate::callbacks::{PrimitiveKind, TessCallbacks, VertexHandle};
use crate::error::{EngineError, TessellationWarning};
use crate::math::{Triangle, Vertex};

/// The state of a single tessellation call.
///
/// Holds the input vertices, the vertices created by the engine, the primitive
/// being assembled and the resulting triangles. A new context is created for
/// every call so nothing leaks from one polygon to the next.
pub(crate) struct CallContext {
    inputs: Vec<Vertex>,
    spare: Vec<Vertex>,
    shape: Vec<Vertex>,
    style: Option<PrimitiveKind>,
    triangles: Vec<Triangle>,
    warnings: Vec<TessellationWarning>,
}

impl CallContext {
    pub fn new(inputs: Vec<Vertex>) -> Self {
        CallContext {
            inputs,
            spare: Vec::new(),
            shape: Vec::new(),
            style: None,
            triangles: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn into_output(self) -> (Vec<Triangle>, Vec<TessellationWarning>) {
        (self.triangles, self.warnings)
    }

    fn resolve(&self, handle: VertexHandle) -> Option<Vertex> {
        match handle {
            VertexHandle::Input(idx) => self.inputs.get(idx as usize).copied(),
            VertexHandle::Combined(idx) => self.spare.get(idx as usize).copied(),
        }
    }

    fn warn(&mut self, warning: TessellationWarning) {
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }

    fn assemble_fan(&mut self) {
        if let Some((&center, rest)) = self.shape.split_first() {
            for pair in rest.windows(2) {
                self.triangles.push(Triangle::new(center, pair[0], pair[1]));
            }
        }
    }

    fn assemble_strip(&mut self) {
        for w in self.shape.windows(3) {
            self.triangles.push(Triangle::new(w[0], w[1], w[2]));
        }
    }

    fn assemble_list(&mut self) {
        let chunks = self.shape.chunks_exact(3);
        let leftover = chunks.remainder().len();
        for t in chunks {
            self.triangles.push(Triangle::new(t[0], t[1], t[2]));
        }

        if leftover > 0 {
            self.warn(TessellationWarning::IncompleteTriangle { leftover });
        }
    }
}

impl TessCallbacks for CallContext {
    fn begin(&mut self, kind: PrimitiveKind) {
        // Engines pair begin and end, the previous batch is already drained.
        self.style = Some(kind);
    }

    fn vertex(&mut self, vertex: VertexHandle) {
        match self.resolve(vertex) {
            Some(position) => self.shape.push(position),
            None => self.warn(TessellationWarning::UnknownVertex(vertex)),
        }
    }

    fn end(&mut self) {
        match self.style {
            Some(PrimitiveKind::TriangleFan) => self.assemble_fan(),
            Some(PrimitiveKind::TriangleStrip) => self.assemble_strip(),
            Some(PrimitiveKind::Triangles) => self.assemble_list(),
            Some(PrimitiveKind::Unknown(kind)) => {
                self.warn(TessellationWarning::UnrecognizedPrimitive(kind));
            }
            None => self.warn(TessellationWarning::MissingBegin),
        }

        self.style = None;
        self.shape.clear();
    }

    fn combine(
        &mut self,
        position: Vertex,
        _sources: &[VertexHandle],
        _weights: &[f32],
    ) -> VertexHandle {
        let id = VertexHandle::Combined(self.spare.len() as u32);
        self.spare.push(position);
        id
    }

    fn error(&mut self, error: EngineError) {
        self.warn(TessellationWarning::Engine(error));
    }
}
