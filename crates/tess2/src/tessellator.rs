use crate::tessellation::callbacks::{PrimitiveKind, TessCallbacks, VertexHandle};
use crate::tessellation::engine::{PolygonRecorder, TessEngine, WindingRule};
use crate::tessellation::math::{vertex, Vector, Vertex};
use crate::tessellation::{EngineError, InitializationError};

use std::os::raw::c_void;
use std::ptr;
use std::slice;
use tess2_sys::*;

const TESS_UNDEF: u32 = !0;

/// A tessellation engine implemented on top of [libtess2](https://github.com/memononen/libtess2).
///
/// Supports all winding rules. Polygons don't need to be in the xy plane,
/// libtess2 projects them along the normal set with `set_normal`, or computes
/// one if none was set.
///
/// The output is reported as a single `PrimitiveKind::Triangles` batch.
/// Vertices that libtess2 creates at intersections are reported through
/// `TessCallbacks::combine`, without sources (libtess2 doesn't expose them).
pub struct Tess2Engine {
    tess: *mut TESStesselator,
    winding_rule: WindingRule,
    normal: Option<[f32; 3]>,
    recorder: PolygonRecorder,
    coordinates: Vec<f32>,
    // Handles of the vertices in the order they were added to libtess2.
    submitted: Vec<VertexHandle>,
    // Handles of the vertices created by combine, indexed by output vertex.
    combined: Vec<Option<VertexHandle>>,
}

impl Tess2Engine {
    pub fn new() -> Result<Self, InitializationError> {
        let tess = unsafe { tessNewTess(ptr::null_mut()) };
        if tess.is_null() {
            return Err(InitializationError::ContextUnavailable);
        }

        Ok(Tess2Engine {
            tess,
            winding_rule: WindingRule::Odd,
            normal: None,
            recorder: PolygonRecorder::new(),
            coordinates: Vec::new(),
            submitted: Vec::new(),
            combined: Vec::new(),
        })
    }
}

fn tess_winding_rule(rule: WindingRule) -> TessWindingRule {
    match rule {
        WindingRule::Odd => TessWindingRule::TESS_WINDING_ODD,
        WindingRule::NonZero => TessWindingRule::TESS_WINDING_NONZERO,
        WindingRule::Positive => TessWindingRule::TESS_WINDING_POSITIVE,
        WindingRule::Negative => TessWindingRule::TESS_WINDING_NEGATIVE,
        WindingRule::AbsGeqTwo => TessWindingRule::TESS_WINDING_ABS_GEQ_TWO,
    }
}

impl TessEngine for Tess2Engine {
    fn set_winding_rule(&mut self, rule: WindingRule) -> Result<(), InitializationError> {
        self.winding_rule = rule;
        Ok(())
    }

    fn winding_rule(&self) -> WindingRule {
        self.winding_rule
    }

    fn set_normal(&mut self, normal: Option<Vector>) {
        self.normal = normal.map(|n| [n.x, n.y, n.z]);
    }

    fn begin_polygon(&mut self) {
        self.recorder.begin_polygon();
    }

    fn begin_contour(&mut self) {
        self.recorder.begin_contour();
    }

    fn add_vertex(&mut self, position: Vertex, vertex: VertexHandle) {
        self.recorder.add_vertex(position, vertex);
    }

    fn end_contour(&mut self) {
        self.recorder.end_contour();
    }

    fn end_polygon(&mut self, callbacks: &mut dyn TessCallbacks) {
        let polygon = self.recorder.end_polygon(callbacks);
        if polygon.is_empty() {
            return;
        }

        let tess = self.tess;

        self.submitted.clear();
        for contour in polygon.contours() {
            self.coordinates.clear();
            for p in contour.positions {
                self.coordinates.extend_from_slice(&[p.x, p.y, p.z]);
            }
            self.submitted.extend_from_slice(contour.handles);

            unsafe {
                tessAddContour(
                    tess,
                    3,
                    self.coordinates.as_ptr() as *const c_void,
                    12,
                    contour.positions.len() as i32,
                );
            }
        }

        let normal = self
            .normal
            .as_mut()
            .map_or(ptr::null_mut(), |n| n.as_mut_ptr());

        let res = unsafe {
            tessTesselate(
                tess,
                tess_winding_rule(self.winding_rule),
                TessElementType::TESS_POLYGONS,
                3,
                3,
                normal,
            )
        };

        if res != 1 {
            callbacks.error(EngineError::OutOfMemory);
            return;
        }

        let (vertices, indices, elements) = unsafe {
            let num_vertices = tessGetVertexCount(tess) as usize;
            let num_elements = tessGetElementCount(tess) as usize;
            let vertices = tessGetVertices(tess) as *const f32;
            let indices = tessGetVertexIndices(tess) as *const u32;
            let elements = tessGetElements(tess) as *const u32;

            if num_elements == 0 || vertices.is_null() || indices.is_null() || elements.is_null() {
                log::trace!("libtess2 produced no triangles");
                return;
            }

            (
                slice::from_raw_parts(vertices, num_vertices * 3),
                slice::from_raw_parts(indices, num_vertices),
                slice::from_raw_parts(elements, num_elements * 3),
            )
        };

        self.combined.clear();
        self.combined.resize(indices.len(), None);

        callbacks.begin(PrimitiveKind::Triangles);
        for &element in elements {
            let idx = element as usize;
            let source = match indices.get(idx) {
                Some(&source) => source,
                None => {
                    callbacks.error(EngineError::Internal(format!("invalid element {}", element)));
                    continue;
                }
            };

            let handle = if source != TESS_UNDEF {
                match self.submitted.get(source as usize) {
                    Some(&handle) => handle,
                    None => {
                        callbacks.error(EngineError::Internal(format!("invalid vertex {}", source)));
                        continue;
                    }
                }
            } else if let Some(handle) = self.combined[idx] {
                handle
            } else {
                let position = vertex(
                    vertices[idx * 3],
                    vertices[idx * 3 + 1],
                    vertices[idx * 3 + 2],
                );
                let handle = callbacks.combine(position, &[], &[]);
                self.combined[idx] = Some(handle);
                handle
            };

            callbacks.vertex(handle);
        }
        callbacks.end();
    }
}

impl Drop for Tess2Engine {
    fn drop(&mut self) {
        unsafe {
            tessDeleteTess(self.tess);
        }
    }
}
