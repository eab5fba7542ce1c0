#![deny(bare_trait_objects)]

//! Triangulation of polygons made of one or several closed loops of 3D vertices.
//!
//! # Crates
//!
//! This meta-crate (`polytess`) reexports the following sub-crates for convenience:
//!
//! * [![crate](https://img.shields.io/crates/v/polytess_tessellation.svg)](https://crates.io/crates/polytess_tessellation)
//!   [![doc](https://docs.rs/polytess_tessellation/badge.svg)](https://docs.rs/polytess_tessellation) -
//!   **polytess_tessellation** - The tessellator, the engine interface and the default engine.
//! * [![crate](https://img.shields.io/crates/v/polytess_tess2.svg)](https://crates.io/crates/polytess_tess2)
//!   [![doc](https://docs.rs/polytess_tess2/badge.svg)](https://docs.rs/polytess_tess2) -
//!   **polytess_tess2** - An engine built on libtess2, available with the `libtess2` feature.
//!
//! Each `polytess_<name>` crate is reexported as a `<name>` module in `polytess`. For example:
//!
//! ```ignore
//! extern crate polytess_tessellation;
//! use polytess_tessellation::Tesselator;
//! ```
//!
//! Is equivalent to:
//!
//! ```ignore
//! extern crate polytess;
//! use polytess::tessellation::Tesselator;
//! ```
//!
//! # Feature flags
//!
//! Serialization using serde can be enabled on each crate using the
//! `serialization` feature flag (disabled by default).
//!
//! # Example
//!
//! ```
//! use polytess::Tesselator;
//! use polytess::math::vertex;
//!
//! let mut tessellator = Tesselator::new().unwrap();
//!
//! // A square with a triangular hole. Holes go in the opposite direction.
//! let outer = [
//!     vertex(0.0, 0.0, 0.0),
//!     vertex(4.0, 0.0, 0.0),
//!     vertex(4.0, 4.0, 0.0),
//!     vertex(0.0, 4.0, 0.0),
//! ];
//! let hole = [
//!     vertex(1.0, 1.0, 0.0),
//!     vertex(2.0, 3.0, 0.0),
//!     vertex(3.0, 1.0, 0.0),
//! ];
//!
//! let triangles = tessellator.tessellate(&[&outer[..], &hole[..]]);
//! let area: f32 = triangles.iter().map(|t| t.area()).sum();
//! assert!((area - 14.0).abs() < 1e-4);
//! ```

pub extern crate polytess_tessellation;
#[cfg(feature = "libtess2")]
pub extern crate polytess_tess2;

pub use polytess_tessellation as tessellation;
#[cfg(feature = "libtess2")]
pub use polytess_tess2 as tess2;

pub use tessellation::math;
pub use tessellation::{
    Tessellation, TessellationWarning, TessellatorOptions, Tesselator, Triangle, Vertex,
};
