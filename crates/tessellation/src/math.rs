//! Basic types used to describe polygon input and triangle output.

/// A vertex position. `z` is carried through tessellation untouched for planar
/// input in the xy plane.
pub type Vertex = euclid::default::Point3D<f32>;

/// A 3D vector.
pub type Vector = euclid::default::Vector3D<f32>;

/// Shorthand for `Vertex::new(x, y, z)`.
#[inline]
pub fn vertex(x: f32, y: f32, z: f32) -> Vertex {
    Vertex::new(x, y, z)
}

/// Shorthand for `Vector::new(x, y, z)`.
#[inline]
pub fn vector(x: f32, y: f32, z: f32) -> Vector {
    Vector::new(x, y, z)
}

/// A triangle produced by the tessellator.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Triangle {
    pub a: Vertex,
    pub b: Vertex,
    pub c: Vertex,
}

impl Triangle {
    #[inline]
    pub fn new(a: Vertex, b: Vertex, c: Vertex) -> Self {
        Triangle { a, b, c }
    }

    #[inline]
    pub fn vertices(&self) -> [Vertex; 3] {
        [self.a, self.b, self.c]
    }

    /// Returns true if one of the three corners is exactly `v`.
    pub fn has_vertex(&self, v: Vertex) -> bool {
        self.a == v || self.b == v || self.c == v
    }

    /// Non-normalized face normal, following the `a, b, c` order.
    pub fn normal(&self) -> Vector {
        (self.b - self.a).cross(self.c - self.a)
    }

    /// Unsigned area.
    pub fn area(&self) -> f32 {
        self.normal().length() * 0.5
    }

    pub fn centroid(&self) -> Vertex {
        let sum = self.a.to_vector() + self.b.to_vector() + self.c.to_vector();
        (sum / 3.0).to_point()
    }
}

impl From<[Vertex; 3]> for Triangle {
    fn from(v: [Vertex; 3]) -> Self {
        Triangle::new(v[0], v[1], v[2])
    }
}

#[test]
fn triangle_area() {
    let t = Triangle::new(
        vertex(0.0, 0.0, 0.0),
        vertex(2.0, 0.0, 0.0),
        vertex(0.0, 2.0, 0.0),
    );
    assert_eq!(t.area(), 2.0);
    assert_eq!(t.normal(), vector(0.0, 0.0, 4.0));
    assert!(t.has_vertex(vertex(2.0, 0.0, 0.0)));
    assert!(!t.has_vertex(vertex(2.0, 2.0, 0.0)));
}
