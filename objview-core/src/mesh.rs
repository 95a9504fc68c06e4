/// Loaded mesh with its live transform.
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use log::{debug, info, trace};
use nalgebra::Point3;

use crate::error::{LoadError, LoadResult};
use crate::geometry::{self, Bounds, Polygon, Vertex};
use crate::normalize::normalize;
use crate::obj::parse_obj_with;
use crate::options::LoadOptions;
use crate::transform::{compose, TransformState};

/// A polygon mesh ready for display.
///
/// `original` holds the vertices as loaded (and normalized); `current` is
/// always `original` with the transform state applied, recomputed in full
/// on every change.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    original: Vec<Vertex>,
    current: Vec<Vertex>,
    polygons: Vec<Polygon>,
    state: TransformState,
    source: Option<PathBuf>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an OBJ file with the default options
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> LoadResult<()> {
        self.load_with(path, &LoadOptions::default())
    }

    /// Load an OBJ file, replacing everything in the mesh.
    ///
    /// The mesh is cleared first, so on error it is left empty.
    pub fn load_with<P: AsRef<Path>>(&mut self, path: P, options: &LoadOptions) -> LoadResult<()> {
        let path = path.as_ref();
        self.clear();
        debug!("Loading mesh from {}", path.display());

        let mut file = File::open(path).map_err(|source| LoadError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let mut text = String::new();
        file.read_to_string(&mut text)
            .map_err(|source| LoadError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;

        self.load_str_with(&text, options)?;
        self.source = Some(path.to_path_buf());
        Ok(())
    }

    /// Load OBJ text with the default options
    pub fn load_str(&mut self, text: &str) -> LoadResult<()> {
        self.load_str_with(text, &LoadOptions::default())
    }

    /// Load OBJ text, replacing everything in the mesh.
    ///
    /// The mesh is cleared first, so on error it is left empty.
    pub fn load_str_with(&mut self, text: &str, options: &LoadOptions) -> LoadResult<()> {
        self.clear();

        let parsed = parse_obj_with(text, options)?;
        let mut vertices = parsed.vertices;
        if options.normalize {
            if let Some(bounds) = normalize(&mut vertices) {
                debug!(
                    "Normalized mesh from bounds {:?} to {:?}",
                    bounds.min, bounds.max
                );
            }
        }

        self.original = vertices;
        self.polygons = parsed.polygons;
        self.rebuild();

        info!(
            "Loaded mesh with {} vertices, {} polygons, {} edges",
            self.vertex_count(),
            self.polygon_count(),
            self.edge_count()
        );
        Ok(())
    }

    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.state.translate(dx, dy, dz);
        self.rebuild();
    }

    pub fn rotate_x(&mut self, angle: f32) {
        self.state.rotate(angle, 0.0, 0.0);
        self.rebuild();
    }

    pub fn rotate_y(&mut self, angle: f32) {
        self.state.rotate(0.0, angle, 0.0);
        self.rebuild();
    }

    pub fn rotate_z(&mut self, angle: f32) {
        self.state.rotate(0.0, 0.0, angle);
        self.rebuild();
    }

    /// Multiply the uniform scale by `factor`
    pub fn scale(&mut self, factor: f32) {
        self.state.scale_by(factor);
        self.rebuild();
    }

    pub fn set_translation(&mut self, tx: f32, ty: f32, tz: f32) {
        self.state.set_translation(tx, ty, tz);
        self.rebuild();
    }

    pub fn set_rotation(&mut self, rx: f32, ry: f32, rz: f32) {
        self.state.set_rotation(rx, ry, rz);
        self.rebuild();
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.state.set_scale(scale);
        self.rebuild();
    }

    /// Replace the whole transform state at once
    pub fn set_transform(&mut self, state: TransformState) {
        self.state = TransformState::new(state.translation, state.rotation, state.scale);
        self.rebuild();
    }

    pub fn reset_transform(&mut self) {
        self.set_transform(TransformState::identity());
    }

    /// Displayed vertices, with the current transform applied
    pub fn vertices(&self) -> &[Vertex] {
        &self.current
    }

    /// Vertices as loaded, before any transform
    pub fn original_vertices(&self) -> &[Vertex] {
        &self.original
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn transform(&self) -> &TransformState {
        &self.state
    }

    /// Path of the file the mesh was loaded from
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn vertex_count(&self) -> usize {
        self.current.len()
    }

    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    /// Half the total number of polygon corners.
    ///
    /// Exact for closed meshes where every edge borders two polygons; not a
    /// count of unique edges otherwise.
    pub fn edge_count(&self) -> usize {
        self.polygons.iter().map(Polygon::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty() && self.polygons.is_empty()
    }

    /// Pivot of rotation and scale: the mean of the original vertices
    pub fn centroid(&self) -> Point3<f32> {
        geometry::centroid(&self.original)
    }

    /// Bounds of the displayed vertices
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_vertices(&self.current)
    }

    pub fn clear(&mut self) {
        self.original.clear();
        self.current.clear();
        self.polygons.clear();
        self.state = TransformState::identity();
        self.source = None;
    }

    fn rebuild(&mut self) {
        let matrix = compose(&self.state, &self.centroid());
        trace!("Rebuilding {} vertices with {:?}", self.original.len(), self.state);

        self.current.clone_from(&self.original);
        for vertex in &mut self.current {
            matrix.apply_to_vertex(vertex);
        }
    }
}
