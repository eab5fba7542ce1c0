//! A tessellation engine implemented on top of lyon's fill tessellator.

use crate::callbacks::{PrimitiveKind, TessCallbacks, VertexHandle};
use crate::engine::{PolygonRecorder, RecordedPolygon, TessEngine, WindingRule};
use crate::error::{EngineError, InitializationError};
use crate::math::{vertex, Vector, Vertex};

use lyon_tessellation::geometry_builder::{
    FillGeometryBuilder, GeometryBuilder, GeometryBuilderError,
};
use lyon_tessellation::math::{point, Point};
use lyon_tessellation::path::{EndpointId, IdEvent};
use lyon_tessellation::{
    FillOptions, FillRule, FillTessellator, FillVertex, VertexId, VertexSource,
};

/// The default tessellation engine.
///
/// Polygons are projected on a plane and tessellated with
/// [lyon_tessellation](https://docs.rs/lyon_tessellation/)'s `FillTessellator`.
/// The projection plane is the one orthogonal to the normal set with
/// `set_normal`, or to the polygon's own normal if none was set.
///
/// Only the `Odd` and `NonZero` winding rules are supported.
///
/// The whole output is reported as a single `PrimitiveKind::Triangles` batch.
/// Vertices that lyon introduces at intersections (or where several input
/// vertices are merged) are created through `TessCallbacks::combine`, with the
/// coordinate along the normal interpolated from the source vertices.
pub struct SweepEngine {
    tessellator: FillTessellator,
    options: FillOptions,
    winding_rule: WindingRule,
    normal: Option<Vector>,
    recorder: PolygonRecorder,
    projected: Vec<Point>,
    events: Vec<IdEvent>,
}

impl SweepEngine {
    pub fn new() -> Self {
        SweepEngine {
            tessellator: FillTessellator::new(),
            options: FillOptions::even_odd(),
            winding_rule: WindingRule::Odd,
            normal: None,
            recorder: PolygonRecorder::new(),
            projected: Vec::new(),
            events: Vec::new(),
        }
    }
}

impl Default for SweepEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TessEngine for SweepEngine {
    fn set_winding_rule(&mut self, rule: WindingRule) -> Result<(), InitializationError> {
        let fill_rule = match rule {
            WindingRule::Odd => FillRule::EvenOdd,
            WindingRule::NonZero => FillRule::NonZero,
            other => {
                return Err(InitializationError::UnsupportedWindingRule(other));
            }
        };

        self.options = self.options.with_fill_rule(fill_rule);
        self.winding_rule = rule;

        Ok(())
    }

    fn winding_rule(&self) -> WindingRule {
        self.winding_rule
    }

    fn set_normal(&mut self, normal: Option<Vector>) {
        self.normal = normal;
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

        let normal = match self.normal {
            Some(n) if n.square_length() > 0.0 => n,
            _ => newell_normal(&polygon),
        };
        let projection = Projection::from_normal(normal);
        log::trace!("tessellating {} contours, projection {:?}", polygon.num_contours(), projection);

        self.projected.clear();
        self.projected
            .extend(polygon.positions().iter().map(|&p| projection.project(p)));

        self.events.clear();
        for range in polygon.contour_ranges() {
            let first = EndpointId(range.start as u32);
            self.events.push(IdEvent::Begin { at: first });
            for i in (range.start + 1)..range.end {
                self.events.push(IdEvent::Line {
                    from: EndpointId(i as u32 - 1),
                    to: EndpointId(i as u32),
                });
            }
            self.events.push(IdEvent::End {
                last: EndpointId(range.end as u32 - 1),
                first,
                close: true,
            });
        }

        let positions: (&[Point], &[Point]) = (&self.projected[..], &[]);
        let mut bridge = CallbackBridge {
            callbacks,
            polygon,
            projection,
            vertices: Vec::with_capacity(self.projected.len()),
            sources: Vec::new(),
            weights: Vec::new(),
            handles: Vec::new(),
        };

        let result = self.tessellator.tessellate_with_ids(
            self.events.iter().cloned(),
            &positions,
            None,
            &self.options,
            &mut bridge,
        );

        if let Err(e) = result {
            bridge.callbacks.error(EngineError::Internal(e.to_string()));
        }
    }
}

/// Which coordinate is dropped to bring the polygon into 2D.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Projection {
    DropX,
    DropY,
    DropZ,
}

impl Projection {
    fn from_normal(n: Vector) -> Self {
        let (x, y, z) = (n.x.abs(), n.y.abs(), n.z.abs());
        if z >= x && z >= y {
            Projection::DropZ
        } else if x >= y {
            Projection::DropX
        } else {
            Projection::DropY
        }
    }

    fn project(self, v: Vertex) -> Point {
        match self {
            Projection::DropX => point(v.y, v.z),
            Projection::DropY => point(v.z, v.x),
            Projection::DropZ => point(v.x, v.y),
        }
    }

    fn depth(self, v: Vertex) -> f32 {
        match self {
            Projection::DropX => v.x,
            Projection::DropY => v.y,
            Projection::DropZ => v.z,
        }
    }

    fn unproject(self, p: Point, depth: f32) -> Vertex {
        match self {
            Projection::DropX => vertex(depth, p.x, p.y),
            Projection::DropY => vertex(p.y, depth, p.x),
            Projection::DropZ => vertex(p.x, p.y, depth),
        }
    }
}

/// Newell's method. Gives a null vector for degenerate polygons.
fn newell_normal(polygon: &RecordedPolygon) -> Vector {
    let mut n = Vector::zero();
    for contour in polygon.contours() {
        let points = contour.positions;
        for (i, a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            n.x += (a.y - b.y) * (a.z + b.z);
            n.y += (a.z - b.z) * (a.x + b.x);
            n.z += (a.x - b.x) * (a.y + b.y);
        }
    }

    n
}

/// Forwards lyon's output to the callbacks.
struct CallbackBridge<'l> {
    callbacks: &'l mut dyn TessCallbacks,
    polygon: RecordedPolygon<'l>,
    projection: Projection,
    // Indexed by lyon's vertex ids.
    vertices: Vec<VertexHandle>,
    // Sources of the vertex being added, as indices in the recorded polygon.
    sources: Vec<usize>,
    weights: Vec<f32>,
    handles: Vec<VertexHandle>,
}

impl<'l> CallbackBridge<'l> {
    fn push_source(&mut self, id: EndpointId, weight: f32) {
        let idx = id.to_usize();
        match self.sources.iter().position(|&s| s == idx) {
            Some(i) => self.weights[i] += weight,
            None => {
                self.sources.push(idx);
                self.weights.push(weight);
            }
        }
    }

    fn combined_vertex(&mut self, position: Point) -> VertexHandle {
        let total: f32 = self.weights.iter().sum();
        if total > 0.0 {
            for w in &mut self.weights {
                *w /= total;
            }
        }

        let positions = self.polygon.positions();
        let mut depth = 0.0;
        for (&idx, &weight) in self.sources.iter().zip(self.weights.iter()) {
            depth += self.projection.depth(positions[idx]) * weight;
        }

        let all_handles = self.polygon.handles();
        self.handles.clear();
        self.handles
            .extend(self.sources.iter().map(|&idx| all_handles[idx]));

        let position = self.projection.unproject(position, depth);

        self.callbacks.combine(position, &self.handles, &self.weights)
    }
}

impl<'l> GeometryBuilder for CallbackBridge<'l> {
    fn begin_geometry(&mut self) {
        self.callbacks.begin(PrimitiveKind::Triangles);
    }

    fn end_geometry(&mut self) {
        self.callbacks.end();
    }

    fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId) {
        for id in &[a, b, c] {
            match self.vertices.get(id.to_usize()) {
                Some(&handle) => self.callbacks.vertex(handle),
                None => {
                    self.callbacks
                        .error(EngineError::Internal(format!("invalid vertex id {}", id.0)));
                }
            }
        }
    }

    fn abort_geometry(&mut self) {
        // Keep what was produced so far.
        self.callbacks.end();
    }
}

impl<'l> FillGeometryBuilder for CallbackBridge<'l> {
    fn add_fill_vertex(&mut self, vertex: FillVertex) -> Result<VertexId, GeometryBuilderError> {
        let id = self.vertices.len();
        if id >= u32::MAX as usize {
            return Err(GeometryBuilderError::TooManyVertices);
        }

        self.sources.clear();
        self.weights.clear();
        for source in vertex.sources() {
            match source {
                VertexSource::Endpoint { id } => self.push_source(id, 1.0),
                VertexSource::Edge { from, to, t } => {
                    self.push_source(from, 1.0 - t);
                    self.push_source(to, t);
                }
            }
        }

        // Vertices that map to exactly one input vertex keep its handle.
        let handle = if self.sources.len() == 1 {
            self.polygon.handles()[self.sources[0]]
        } else {
            self.combined_vertex(vertex.position())
        };

        self.vertices.push(handle);

        Ok(VertexId(id as u32))
    }
}
