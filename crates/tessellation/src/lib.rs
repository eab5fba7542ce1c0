#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::float_cmp)]

//! Triangulation of polygons made of several closed loops.
//!
//! This crate is reexported in [polytess](https://docs.rs/polytess/).
//!
//! ## Overview
//!
//! The most interesting types and traits of this crate are:
//!
//! * [Tesselator](struct.Tesselator.html) - Turns a list of vertex loops into a list of
//!   triangles, using the non-zero winding rule. Holes are expressed with loops going in
//!   the opposite direction, overlapping loops going in the same direction are merged.
//! * [TessEngine](engine/trait.TessEngine.html) - The interface of the engines doing the
//!   actual tessellation work. The default engine, [SweepEngine](struct.SweepEngine.html),
//!   is built on lyon's fill tessellator. The `polytess_tess2` crate provides one built
//!   on libtess2.
//! * [TessCallbacks](callbacks/trait.TessCallbacks.html) - How engines report their output:
//!   triangle lists, strips and fans, vertices created at intersections and errors.
//!
//! ## Data flow
//!
//! For each call, the tessellator submits every vertex of every loop to the engine
//! along with a [VertexHandle](callbacks/enum.VertexHandle.html). The engine runs
//! synchronously and reports primitives made of these handles, creating new vertices
//! through `combine` when it needs to. The tessellator turns the primitives into
//! [Triangle](math/struct.Triangle.html)s.
//!
//! ## Errors
//!
//! Only the creation of a tessellator can fail. During a call, errors reported by the
//! engine and primitives that can't be turned into triangles are logged with the
//! [log](https://docs.rs/log/) crate and skipped.

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub extern crate lyon_tessellation;

pub mod callbacks;
mod context;
pub mod engine;
mod error;
pub mod math;
mod sweep;
mod tessellator;

#[cfg(test)]
mod tessellator_tests;

#[doc(inline)]
pub use crate::callbacks::{PrimitiveKind, TessCallbacks, VertexHandle};

#[doc(inline)]
pub use crate::engine::{PolygonRecorder, TessEngine, WindingRule};

#[doc(inline)]
pub use crate::error::*;

pub use crate::math::{Triangle, Vertex};

pub use crate::sweep::SweepEngine;

pub use crate::tessellator::{Tessellation, Tesselator};

use crate::math::Vector;

/// Parameters for the tessellator.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct TessellatorOptions {
    /// Normal of the plane the polygons are projected on.
    ///
    /// When `None`, the engine computes the normal from the input. Setting it is
    /// only useful for polygons that are not in the xy plane, when the caller
    /// already knows their orientation.
    ///
    /// Default value: `None`.
    pub normal: Option<Vector>,
}

impl TessellatorOptions {
    pub const DEFAULT: Self = TessellatorOptions { normal: None };

    #[inline]
    pub const fn with_normal(mut self, normal: Vector) -> Self {
        self.normal = Some(normal);
        self
    }
}

impl Default for TessellatorOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}
