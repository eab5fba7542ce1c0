//! The interface between the tessellator and the engine doing the actual work.

use crate::callbacks::{TessCallbacks, VertexHandle};
use crate::error::{EngineError, InitializationError};
use crate::math::{Vector, Vertex};

use core::ops::Range;

/// Decides which parts of the plane are inside the polygon, from the winding
/// number of each region (the sum of the signed crossings of all contours).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum WindingRule {
    /// Inside if the winding number is odd.
    Odd,
    /// Inside if the winding number is not zero.
    NonZero,
    /// Inside if the winding number is strictly positive.
    Positive,
    /// Inside if the winding number is strictly negative.
    Negative,
    /// Inside if the absolute value of the winding number is at least two.
    AbsGeqTwo,
}

/// A polygon tessellation engine.
///
/// Polygons are submitted with a `begin_polygon`, `begin_contour`,
/// `add_vertex`, `end_contour`, `end_polygon` sequence. The engine does its
/// work synchronously in `end_polygon` and reports the output to the provided
/// callbacks before returning.
///
/// Engines keep no state across polygons other than their configuration.
pub trait TessEngine {
    /// Fails if the engine can't tessellate with this rule.
    fn set_winding_rule(&mut self, rule: WindingRule) -> Result<(), InitializationError>;

    fn winding_rule(&self) -> WindingRule;

    /// The normal of the plane to project the polygon on, or `None` to let
    /// the engine compute it.
    fn set_normal(&mut self, normal: Option<Vector>);

    fn begin_polygon(&mut self);

    fn begin_contour(&mut self);

    /// Submit a vertex of the current contour. `vertex` is handed back through
    /// the callbacks whenever the engine emits this vertex.
    fn add_vertex(&mut self, position: Vertex, vertex: VertexHandle);

    fn end_contour(&mut self);

    /// Tessellate the current polygon.
    fn end_polygon(&mut self, callbacks: &mut dyn TessCallbacks);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum RecorderState {
    Dormant,
    InPolygon,
    InContour,
}

/// Records the contours of a polygon submission for engines that consume the
/// whole polygon at once.
///
/// Calls made out of order are recovered from the same way GLU does it: the
/// missing calls are inserted and an error is queued. Queued errors are
/// delivered to the callbacks by `end_polygon`, before any geometry.
///
/// Contours with less than three vertices enclose no area and are dropped.
/// Contours with a non-finite coordinate are dropped with a
/// `EngineError::CoordTooLarge` error.
pub struct PolygonRecorder {
    state: RecorderState,
    positions: Vec<Vertex>,
    handles: Vec<VertexHandle>,
    contours: Vec<Range<usize>>,
    contour_start: usize,
    errors: Vec<EngineError>,
}

impl PolygonRecorder {
    pub fn new() -> Self {
        PolygonRecorder {
            state: RecorderState::Dormant,
            positions: Vec::new(),
            handles: Vec::new(),
            contours: Vec::new(),
            contour_start: 0,
            errors: Vec::new(),
        }
    }

    pub fn begin_polygon(&mut self) {
        self.goto_state(RecorderState::Dormant);
        self.start_polygon();
    }

    pub fn begin_contour(&mut self) {
        self.goto_state(RecorderState::InPolygon);
        self.start_contour();
    }

    pub fn add_vertex(&mut self, position: Vertex, vertex: VertexHandle) {
        self.goto_state(RecorderState::InContour);
        self.positions.push(position);
        self.handles.push(vertex);
    }

    pub fn end_contour(&mut self) {
        self.goto_state(RecorderState::InContour);
        self.finish_contour();
    }

    /// Close the polygon, report the queued protocol errors and return the
    /// recorded geometry.
    ///
    /// The geometry stays available until the next `begin_polygon`.
    pub fn end_polygon(&mut self, callbacks: &mut dyn TessCallbacks) -> RecordedPolygon {
        self.goto_state(RecorderState::InPolygon);
        self.state = RecorderState::Dormant;

        for error in self.errors.drain(..) {
            callbacks.error(error);
        }

        RecordedPolygon {
            positions: &self.positions,
            handles: &self.handles,
            contours: &self.contours,
        }
    }

    fn goto_state(&mut self, target: RecorderState) {
        while self.state != target {
            match (self.state, self.state < target) {
                (RecorderState::Dormant, _) => {
                    self.errors.push(EngineError::MissingBeginPolygon);
                    self.start_polygon();
                }
                (RecorderState::InPolygon, true) => {
                    self.errors.push(EngineError::MissingBeginContour);
                    self.start_contour();
                }
                (RecorderState::InPolygon, false) => {
                    // The unfinished polygon is discarded.
                    self.errors.push(EngineError::MissingEndPolygon);
                    self.state = RecorderState::Dormant;
                }
                (RecorderState::InContour, _) => {
                    self.errors.push(EngineError::MissingEndContour);
                    self.finish_contour();
                }
            }
        }
    }

    fn start_polygon(&mut self) {
        self.positions.clear();
        self.handles.clear();
        self.contours.clear();
        self.state = RecorderState::InPolygon;
    }

    fn start_contour(&mut self) {
        self.contour_start = self.positions.len();
        self.state = RecorderState::InContour;
    }

    fn finish_contour(&mut self) {
        let range = self.contour_start..self.positions.len();
        self.state = RecorderState::InPolygon;

        let positions = &self.positions[range.clone()];
        if positions
            .iter()
            .any(|p| !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()))
        {
            self.errors.push(EngineError::CoordTooLarge);
            self.truncate(range.start);
            return;
        }

        if range.len() < 3 {
            log::trace!("skipping degenerate contour with {} vertices", range.len());
            self.truncate(range.start);
            return;
        }

        self.contours.push(range);
    }

    fn truncate(&mut self, len: usize) {
        self.positions.truncate(len);
        self.handles.truncate(len);
    }
}

impl Default for PolygonRecorder {
    fn default() -> Self {
        Self::new()
    }
}

/// The geometry of a polygon recorded by a `PolygonRecorder`.
#[derive(Copy, Clone)]
pub struct RecordedPolygon<'l> {
    positions: &'l [Vertex],
    handles: &'l [VertexHandle],
    contours: &'l [Range<usize>],
}

impl<'l> RecordedPolygon<'l> {
    /// Positions of all vertices of the kept contours, contour after contour.
    pub fn positions(&self) -> &'l [Vertex] {
        self.positions
    }

    /// Handles of all vertices, in the same order as `positions`.
    pub fn handles(&self) -> &'l [VertexHandle] {
        self.handles
    }

    /// Ranges of `positions` and `handles` covered by each contour.
    pub fn contour_ranges(&self) -> &'l [Range<usize>] {
        self.contours
    }

    pub fn contours(&self) -> impl Iterator<Item = Contour<'l>> + 'l {
        let positions = self.positions;
        let handles = self.handles;
        self.contours.iter().map(move |range| Contour {
            positions: &positions[range.clone()],
            handles: &handles[range.clone()],
        })
    }

    pub fn num_contours(&self) -> usize {
        self.contours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }
}

/// A closed contour of a recorded polygon.
#[derive(Copy, Clone)]
pub struct Contour<'l> {
    pub positions: &'l [Vertex],
    pub handles: &'l [VertexHandle],
}
