/// Geometry primitives for wireframe meshes
use nalgebra::{Point3, Vector3};

/// A mesh vertex position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
        }
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }

    pub fn z(&self) -> f32 {
        self.position.z
    }
}

impl From<Point3<f32>> for Vertex {
    fn from(position: Point3<f32>) -> Self {
        Self { position }
    }
}

/// A closed polygon given as zero-based indices into a vertex buffer.
///
/// Edges run between consecutive indices and from the last index back to the
/// first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polygon {
    pub indices: Vec<usize>,
}

impl Polygon {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate the polygon's edges as index pairs, closing the loop
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.indices.len();
        (0..n).map(move |i| (self.indices[i], self.indices[(i + 1) % n]))
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Bounds {
    /// Bounding box of a vertex set, `None` when the set is empty
    pub fn from_vertices(vertices: &[Vertex]) -> Option<Self> {
        let first = vertices.first()?.position;
        let mut bounds = Self {
            min: first,
            max: first,
        };

        for vertex in &vertices[1..] {
            let p = vertex.position;
            bounds.min = Point3::new(
                bounds.min.x.min(p.x),
                bounds.min.y.min(p.y),
                bounds.min.z.min(p.z),
            );
            bounds.max = Point3::new(
                bounds.max.x.max(p.x),
                bounds.max.y.max(p.y),
                bounds.max.z.max(p.z),
            );
        }

        Some(bounds)
    }

    /// Size of the box along each axis
    pub fn extents(&self) -> Vector3<f32> {
        self.max - self.min
    }

    pub fn center(&self) -> Point3<f32> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Largest of the three extents
    pub fn max_extent(&self) -> f32 {
        self.extents().max()
    }
}

/// Arithmetic mean of a vertex set, the origin when the set is empty
pub fn centroid(vertices: &[Vertex]) -> Point3<f32> {
    if vertices.is_empty() {
        return Point3::origin();
    }

    let sum = vertices
        .iter()
        .fold(Vector3::zeros(), |acc, v| acc + v.position.coords);
    Point3::from(sum / vertices.len() as f32)
}
