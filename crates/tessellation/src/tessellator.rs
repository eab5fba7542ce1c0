use crate::callbacks::VertexHandle;
use crate::context::CallContext;
use crate::engine::{TessEngine, WindingRule};
use crate::error::{InitializationError, TessellationWarning};
use crate::math::{Triangle, Vertex};
use crate::sweep::SweepEngine;
use crate::TessellatorOptions;

/// The output of `Tesselator::tessellate_with_warnings`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tessellation {
    pub triangles: Vec<Triangle>,
    /// Everything that was logged as a warning during the call.
    pub warnings: Vec<TessellationWarning>,
}

/// Turns polygons made of one or several closed loops into triangles, using
/// the non-zero winding rule.
///
/// The tessellator owns a tessellation engine for its whole lifetime. The
/// engine's winding rule is set once, when the tessellator is created. Each
/// call to `tessellate` works on its own buffers, so calls don't influence
/// each other.
///
/// Problems during a call (errors reported by the engine, primitives that
/// can't be assembled) are logged and skipped. The call returns whatever
/// triangles could be produced.
///
/// ## Example
///
/// ```
/// use polytess_tessellation::Tesselator;
/// use polytess_tessellation::math::vertex;
///
/// let mut tessellator = Tesselator::new().unwrap();
///
/// let outer = [
///     vertex(0.0, 0.0, 0.0),
///     vertex(0.0, 10.0, 0.0),
///     vertex(10.0, 10.0, 0.0),
///     vertex(10.0, 0.0, 0.0),
/// ];
/// let hole = [
///     vertex(4.0, 4.0, 0.0),
///     vertex(6.0, 4.0, 0.0),
///     vertex(6.0, 6.0, 0.0),
///     vertex(4.0, 6.0, 0.0),
/// ];
///
/// let triangles = tessellator.tessellate(&[&outer[..], &hole[..]]);
/// assert_eq!(triangles.len(), 8);
/// ```
pub struct Tesselator<Engine: TessEngine = SweepEngine> {
    engine: Engine,
}

impl Tesselator<SweepEngine> {
    /// Create a tessellator using the default engine.
    pub fn new() -> Result<Self, InitializationError> {
        Self::with_options(&TessellatorOptions::DEFAULT)
    }

    /// Create a tessellator using the default engine.
    pub fn with_options(options: &TessellatorOptions) -> Result<Self, InitializationError> {
        Self::from_engine_with_options(SweepEngine::new(), options)
    }
}

impl<Engine: TessEngine> Tesselator<Engine> {
    pub const WINDING_RULE: WindingRule = WindingRule::NonZero;

    pub fn from_engine(engine: Engine) -> Result<Self, InitializationError> {
        Self::from_engine_with_options(engine, &TessellatorOptions::DEFAULT)
    }

    pub fn from_engine_with_options(
        mut engine: Engine,
        options: &TessellatorOptions,
    ) -> Result<Self, InitializationError> {
        engine.set_winding_rule(Self::WINDING_RULE)?;
        engine.set_normal(options.normal);

        Ok(Tesselator { engine })
    }

    pub fn winding_rule(&self) -> WindingRule {
        self.engine.winding_rule()
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Access the engine, for example to inspect engine-specific state.
    ///
    /// Changing the winding rule through this reference breaks the guarantees
    /// of the tessellator.
    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn into_engine(self) -> Engine {
        self.engine
    }

    /// Tessellate a polygon made of the provided loops.
    ///
    /// Each loop is implicitly closed. Loops with less than three vertices
    /// don't produce any triangle.
    pub fn tessellate<Loop: AsRef<[Vertex]>>(&mut self, loops: &[Loop]) -> Vec<Triangle> {
        self.tessellate_with_warnings(loops).triangles
    }

    /// Same as `tessellate`, also returning the warnings that were logged
    /// during the call.
    pub fn tessellate_with_warnings<Loop: AsRef<[Vertex]>>(
        &mut self,
        loops: &[Loop],
    ) -> Tessellation {
        let num_vertices: usize = loops.iter().map(|l| l.as_ref().len()).sum();
        let mut inputs: Vec<Vertex> = Vec::with_capacity(num_vertices);

        self.engine.begin_polygon();
        for contour in loops {
            self.engine.begin_contour();
            for &position in contour.as_ref() {
                let handle = VertexHandle::Input(inputs.len() as u32);
                inputs.push(position);
                self.engine.add_vertex(position, handle);
            }
            self.engine.end_contour();
        }

        let mut ctx = CallContext::new(inputs);
        self.engine.end_polygon(&mut ctx);

        let (triangles, warnings) = ctx.into_output();
        log::debug!(
            "tessellated {} loops ({} vertices) into {} triangles, {} warnings",
            loops.len(),
            num_vertices,
            triangles.len(),
            warnings.len(),
        );

        Tessellation {
            triangles,
            warnings,
        }
    }
}
