use crate::callbacks::{PrimitiveKind, TessCallbacks, VertexHandle};
use crate::engine::{TessEngine, WindingRule};
use crate::error::{EngineError, InitializationError, TessellationWarning};
use crate::math::{vector, vertex, Triangle, Vector, Vertex};
use crate::{Tesselator, TessellatorOptions};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn total_area(triangles: &[Triangle]) -> f32 {
    triangles.iter().map(Triangle::area).sum()
}

fn assert_approx_eq(a: f32, b: f32) {
    assert!((a - b).abs() < 1e-3, "{} != {}", a, b);
}

fn square(x: f32, y: f32, size: f32, clockwise: bool) -> Vec<Vertex> {
    let mut points = vec![
        vertex(x, y, 0.0),
        vertex(x + size, y, 0.0),
        vertex(x + size, y + size, 0.0),
        vertex(x, y + size, 0.0),
    ];
    if clockwise {
        points.reverse();
    }

    points
}

#[test]
fn single_triangle() {
    init_logging();
    let input = [
        vertex(0.0, 0.0, 0.0),
        vertex(1.0, 0.0, 0.0),
        vertex(0.0, 1.0, 0.0),
    ];

    let mut tess = Tesselator::new().unwrap();
    let triangles = tess.tessellate(&[&input[..]]);

    assert_eq!(triangles.len(), 1);
    for &v in &input {
        assert!(triangles[0].has_vertex(v));
    }
}

#[test]
fn convex_quad() {
    init_logging();
    let input = square(0.0, 0.0, 2.0, false);

    let mut tess = Tesselator::new().unwrap();
    let triangles = tess.tessellate(&[&input]);

    assert_eq!(triangles.len(), 2);
    assert_approx_eq(total_area(&triangles), 4.0);
    for t in &triangles {
        for v in &t.vertices() {
            assert!(input.contains(v));
        }
    }
}

#[test]
fn hole_is_excluded() {
    init_logging();
    let outer = square(0.0, 0.0, 10.0, true);
    let hole = square(4.0, 4.0, 2.0, false);

    let mut tess = Tesselator::new().unwrap();
    let result = tess.tessellate_with_warnings(&[outer, hole]);

    assert!(result.warnings.is_empty());
    assert_eq!(result.triangles.len(), 8);
    assert_approx_eq(total_area(&result.triangles), 96.0);
    for t in &result.triangles {
        let c = t.centroid();
        let inside_hole = c.x > 4.0 && c.x < 6.0 && c.y > 4.0 && c.y < 6.0;
        assert!(!inside_hole, "{:?} is inside the hole", t);
    }
}

#[test]
fn overlapping_loops_are_merged() {
    init_logging();
    // Both loops go in the same direction, the overlap has a winding number of 2.
    let a = square(0.0, 0.0, 2.0, false);
    let b = square(1.0, 1.0, 2.0, false);

    let mut tess = Tesselator::new().unwrap();
    let triangles = tess.tessellate(&[a, b]);

    assert_approx_eq(total_area(&triangles), 7.0);
}

#[test]
fn self_intersection() {
    init_logging();
    let input = [
        vertex(0.0, 0.0, 0.0),
        vertex(2.0, 2.0, 0.0),
        vertex(2.0, 0.0, 0.0),
        vertex(0.0, 2.0, 0.0),
    ];

    let mut tess = Tesselator::new().unwrap();
    let result = tess.tessellate_with_warnings(&[&input[..]]);

    assert!(result.warnings.is_empty());
    assert_approx_eq(total_area(&result.triangles), 2.0);

    let mut num_created = 0;
    for t in &result.triangles {
        for v in &t.vertices() {
            if !input.contains(v) {
                num_created += 1;
                assert_approx_eq(v.x, 1.0);
                assert_approx_eq(v.y, 1.0);
                assert_eq!(v.z, 0.0);
            }
        }
    }
    assert!(num_created > 0);
}

#[test]
fn idempotent() {
    init_logging();
    let outer = square(0.0, 0.0, 10.0, true);
    let hole = square(2.0, 3.0, 4.0, false);
    let loops = [outer, hole];

    let mut tess = Tesselator::new().unwrap();
    let first = tess.tessellate(&loops);
    let second = tess.tessellate(&loops);

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn calls_are_isolated() {
    init_logging();
    let first_input = [
        vertex(0.0, 0.0, 0.0),
        vertex(5.0, 0.0, 0.0),
        vertex(0.0, 5.0, 0.0),
        // Self-intersecting, creates extra vertices.
        vertex(5.0, 5.0, 0.0),
    ];
    let second_input = square(10.0, 10.0, 1.0, false);

    let mut tess = Tesselator::new().unwrap();
    let first = tess.tessellate(&[&first_input[..]]);
    assert!(!first.is_empty());

    let second = tess.tessellate(&[&second_input]);
    assert_eq!(second.len(), 2);
    for t in &second {
        for v in &t.vertices() {
            assert!(second_input.contains(v));
        }
    }
}

#[test]
fn degenerate_loops() {
    init_logging();
    let empty: Vec<Vertex> = Vec::new();
    let point = vec![vertex(1.0, 1.0, 0.0)];
    let segment = vec![vertex(1.0, 1.0, 0.0), vertex(2.0, 1.0, 0.0)];
    let triangle = vec![
        vertex(0.0, 0.0, 0.0),
        vertex(1.0, 0.0, 0.0),
        vertex(0.0, 1.0, 0.0),
    ];

    let mut tess = Tesselator::new().unwrap();

    let result = tess.tessellate_with_warnings(&[empty.clone(), point.clone(), segment.clone()]);
    assert!(result.triangles.is_empty());
    assert!(result.warnings.is_empty());

    let no_loops: &[Vec<Vertex>] = &[];
    assert!(tess.tessellate(no_loops).is_empty());

    let triangles = tess.tessellate(&[empty, point, triangle, segment]);
    assert_eq!(triangles.len(), 1);
}

#[test]
fn invalid_coordinates_are_reported() {
    init_logging();
    let broken = vec![
        vertex(0.0, 0.0, 0.0),
        vertex(f32::INFINITY, 0.0, 0.0),
        vertex(0.0, 1.0, 0.0),
    ];
    let valid = square(5.0, 5.0, 1.0, false);

    let mut tess = Tesselator::new().unwrap();
    let result = tess.tessellate_with_warnings(&[broken, valid]);

    assert_eq!(result.triangles.len(), 2);
    assert_eq!(
        result.warnings,
        vec![TessellationWarning::Engine(EngineError::CoordTooLarge)]
    );
}

#[test]
fn polygon_outside_of_the_xy_plane() {
    init_logging();
    // A square in the y = 1 plane.
    let input = vec![
        vertex(0.0, 1.0, 0.0),
        vertex(2.0, 1.0, 0.0),
        vertex(2.0, 1.0, 2.0),
        vertex(0.0, 1.0, 2.0),
    ];

    let mut tess = Tesselator::new().unwrap();
    let triangles = tess.tessellate(&[&input]);

    assert_eq!(triangles.len(), 2);
    assert_approx_eq(total_area(&triangles), 4.0);
    for t in &triangles {
        for v in &t.vertices() {
            assert!(input.contains(v));
        }
    }

    // Same thing with an explicit normal.
    let options = TessellatorOptions::DEFAULT.with_normal(vector(0.0, 1.0, 0.0));
    let mut tess = Tesselator::with_options(&options).unwrap();
    assert_eq!(tess.tessellate(&[&input]).len(), 2);
}

#[test]
fn winding_rule_is_non_zero() {
    let tess = Tesselator::new().unwrap();
    assert_eq!(tess.winding_rule(), WindingRule::NonZero);
}

#[test]
fn tessellator_is_send() {
    fn assert_send<T: Send>() {}
    assert_send::<Tesselator>();
}

/// What the scripted engine does in `end_polygon`.
#[derive(Clone, Debug)]
enum Step {
    Begin(PrimitiveKind),
    Vertex(VertexHandle),
    End,
    Combine(Vertex),
    Error(EngineError),
}

/// An engine that ignores its input and replays a script of callbacks.
struct ScriptedEngine {
    script: Vec<Step>,
    supports_non_zero: bool,
    winding_rule: WindingRule,
    normal: Option<Vector>,
    contours: Vec<Vec<(Vertex, VertexHandle)>>,
}

impl ScriptedEngine {
    fn new(script: Vec<Step>) -> Self {
        ScriptedEngine {
            script,
            supports_non_zero: true,
            winding_rule: WindingRule::Odd,
            normal: None,
            contours: Vec::new(),
        }
    }
}

impl TessEngine for ScriptedEngine {
    fn set_winding_rule(&mut self, rule: WindingRule) -> Result<(), InitializationError> {
        if rule == WindingRule::NonZero && !self.supports_non_zero {
            return Err(InitializationError::UnsupportedWindingRule(rule));
        }
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
        self.contours.clear();
    }

    fn begin_contour(&mut self) {
        self.contours.push(Vec::new());
    }

    fn add_vertex(&mut self, position: Vertex, vertex: VertexHandle) {
        if let Some(contour) = self.contours.last_mut() {
            contour.push((position, vertex));
        }
    }

    fn end_contour(&mut self) {}

    fn end_polygon(&mut self, callbacks: &mut dyn TessCallbacks) {
        for step in &self.script {
            match step {
                Step::Begin(kind) => callbacks.begin(*kind),
                Step::Vertex(handle) => callbacks.vertex(*handle),
                Step::End => callbacks.end(),
                Step::Combine(position) => {
                    callbacks.combine(*position, &[], &[]);
                }
                Step::Error(error) => callbacks.error(error.clone()),
            }
        }
    }
}

fn primitive(kind: PrimitiveKind, num_vertices: u32) -> Vec<Step> {
    let mut steps = vec![Step::Begin(kind)];
    steps.extend((0..num_vertices).map(|i| Step::Vertex(VertexHandle::Input(i))));
    steps.push(Step::End);
    steps
}

fn line(n: usize) -> Vec<Vertex> {
    (0..n).map(|i| vertex(i as f32, (i * i) as f32, 0.0)).collect()
}

fn scripted(script: Vec<Step>) -> Tesselator<ScriptedEngine> {
    Tesselator::from_engine(ScriptedEngine::new(script)).unwrap()
}

#[test]
fn assemble_triangle_fan() {
    let v = line(4);
    let mut tess = scripted(primitive(PrimitiveKind::TriangleFan, 4));

    assert_eq!(
        tess.tessellate(&[&v]),
        vec![
            Triangle::new(v[0], v[1], v[2]),
            Triangle::new(v[0], v[2], v[3]),
        ]
    );
}

#[test]
fn assemble_triangle_strip() {
    let v = line(4);
    let mut tess = scripted(primitive(PrimitiveKind::TriangleStrip, 4));

    assert_eq!(
        tess.tessellate(&[&v]),
        vec![
            Triangle::new(v[0], v[1], v[2]),
            Triangle::new(v[1], v[2], v[3]),
        ]
    );
}

#[test]
fn assemble_triangle_list() {
    let v = line(6);
    let mut tess = scripted(primitive(PrimitiveKind::Triangles, 6));

    assert_eq!(
        tess.tessellate(&[&v]),
        vec![
            Triangle::new(v[0], v[1], v[2]),
            Triangle::new(v[3], v[4], v[5]),
        ]
    );
}

#[test]
fn several_primitives_in_one_call() {
    let v = line(4);
    let mut script = primitive(PrimitiveKind::TriangleFan, 4);
    script.extend(primitive(PrimitiveKind::TriangleStrip, 3));
    script.extend(primitive(PrimitiveKind::Triangles, 3));
    let mut tess = scripted(script);

    assert_eq!(
        tess.tessellate(&[&v]),
        vec![
            Triangle::new(v[0], v[1], v[2]),
            Triangle::new(v[0], v[2], v[3]),
            Triangle::new(v[0], v[1], v[2]),
            Triangle::new(v[0], v[1], v[2]),
        ]
    );
}

#[test]
fn unrecognized_primitive_is_dropped() {
    init_logging();
    let v = line(4);
    // GL_LINE_LOOP, then a valid fan.
    let mut script = primitive(PrimitiveKind::from_gl(0x0002), 4);
    script.extend(primitive(PrimitiveKind::TriangleFan, 3));
    let mut tess = scripted(script);

    let result = tess.tessellate_with_warnings(&[&v]);
    assert_eq!(result.triangles, vec![Triangle::new(v[0], v[1], v[2])]);
    assert_eq!(
        result.warnings,
        vec![TessellationWarning::UnrecognizedPrimitive(2)]
    );
}

#[test]
fn engine_errors_do_not_abort_the_call() {
    init_logging();
    let v = line(3);
    let mut script = vec![Step::Error(EngineError::from_code(100155))];
    script.extend(primitive(PrimitiveKind::Triangles, 3));
    let mut tess = scripted(script);

    let result = tess.tessellate_with_warnings(&[&v]);
    assert_eq!(result.triangles.len(), 1);
    assert_eq!(
        result.warnings,
        vec![TessellationWarning::Engine(EngineError::CoordTooLarge)]
    );
}

#[test]
fn combined_vertices_live_for_one_call() {
    let v = line(3);
    let created = vertex(10.0, 10.0, 10.0);
    let script = vec![
        Step::Combine(created),
        Step::Begin(PrimitiveKind::Triangles),
        Step::Vertex(VertexHandle::Input(0)),
        Step::Vertex(VertexHandle::Input(1)),
        Step::Vertex(VertexHandle::Combined(0)),
        Step::End,
    ];
    let mut tess = scripted(script);

    let triangles = tess.tessellate(&[&v]);
    assert_eq!(triangles, vec![Triangle::new(v[0], v[1], created)]);

    // The script references Combined(0) again, it must resolve to the vertex
    // created in the new call, not to a leftover.
    tess.engine_mut().script[0] = Step::Combine(vertex(-1.0, -1.0, -1.0));
    let triangles = tess.tessellate(&[&v]);
    assert_eq!(
        triangles,
        vec![Triangle::new(v[0], v[1], vertex(-1.0, -1.0, -1.0))]
    );
}

#[test]
fn vertices_are_submitted_in_order() {
    let a = line(3);
    let b = line(4);
    let mut tess = scripted(Vec::new());
    tess.tessellate(&[&a, &b]);

    let contours = &tess.engine().contours;
    assert_eq!(contours.len(), 2);
    assert_eq!(contours[0][0], (a[0], VertexHandle::Input(0)));
    assert_eq!(contours[1][0], (b[0], VertexHandle::Input(3)));
    assert_eq!(contours[1][3], (b[3], VertexHandle::Input(6)));
}

#[test]
fn engine_configuration() {
    let options = TessellatorOptions::DEFAULT.with_normal(vector(0.0, 0.0, 1.0));
    let tess =
        Tesselator::from_engine_with_options(ScriptedEngine::new(Vec::new()), &options).unwrap();
    let engine = tess.into_engine();
    assert_eq!(engine.winding_rule, WindingRule::NonZero);
    assert_eq!(engine.normal, Some(vector(0.0, 0.0, 1.0)));

    let mut engine = ScriptedEngine::new(Vec::new());
    engine.supports_non_zero = false;
    assert_eq!(
        Tesselator::from_engine(engine).err(),
        Some(InitializationError::UnsupportedWindingRule(WindingRule::NonZero))
    );
}
