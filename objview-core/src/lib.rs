/// objview Core Library - OBJ mesh loading and interactive transforms
///
/// This library loads the vertex/face subset of Wavefront OBJ, normalizes the
/// mesh into a unit volume, and recomputes the displayed vertices from a
/// single affine transform whenever the translation, rotation or scale change.

pub mod controller;
pub mod error;
pub mod geometry;
pub mod mesh;
pub mod normalize;
pub mod obj;
pub mod options;
pub mod transform;

// Re-export commonly used types
pub use controller::{MeshController, MeshObserver};
pub use error::{LoadError, LoadResult, ParseError, ParseResult};
pub use geometry::{Bounds, Polygon, Vertex};
pub use mesh::Mesh;
pub use normalize::normalize;
pub use obj::{parse_obj, parse_obj_with, write_obj, ParsedMesh};
pub use options::LoadOptions;
pub use transform::{compose, AffineMatrix, TransformState};
