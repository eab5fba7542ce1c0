#![deny(bare_trait_objects)]

//! A polytess tessellation engine using
//! [libtess2](https://github.com/memononen/libtess2).
//!
//! # Comparison with the default `SweepEngine`
//!
//! Advantages:
//!
//! - Supports all winding rules, not only `Odd` and `NonZero`.
//! - Projects non-planar input on its own.
//!
//! Disadvantages:
//!
//! - Wrapper around a C library (as opposed to pure rust with no
//!   unsafe code).
//! - Doesn't report the sources of the vertices it creates at intersections.
//!
//! ## Example
//!
//! ```
//! use polytess_tess2::Tess2Engine;
//! use polytess_tess2::tessellation::Tesselator;
//! use polytess_tess2::tessellation::math::vertex;
//!
//! let engine = Tess2Engine::new().unwrap();
//! let mut tessellator = Tesselator::from_engine(engine).unwrap();
//!
//! let triangles = tessellator.tessellate(&[[
//!     vertex(0.0, 0.0, 0.0),
//!     vertex(1.0, 0.0, 0.0),
//!     vertex(1.0, 1.0, 0.0),
//!     vertex(0.0, 1.0, 0.0),
//! ]]);
//!
//! assert_eq!(triangles.len(), 2);
//! ```

pub extern crate polytess_tessellation as tessellation;
pub extern crate tess2_sys;

mod tessellator;

pub use crate::tessellator::Tess2Engine;
