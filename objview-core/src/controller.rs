/// Mesh controller that notifies observers about loads and transforms. A
/// display layer redraws on `on_changed` and reads the vertex and polygon
/// buffers from the mesh it is handed.
use std::path::Path;

use log::error;

use crate::error::{LoadError, LoadResult};
use crate::mesh::Mesh;
use crate::options::LoadOptions;

/// Receiver of mesh events. All methods default to doing nothing.
pub trait MeshObserver {
    /// A load succeeded.
    fn on_loaded(&mut self, _vertex_count: usize, _edge_count: usize) {}

    /// A load failed; the mesh is now empty.
    fn on_load_error(&mut self, _error: &LoadError) {}

    /// The displayed geometry changed.
    fn on_changed(&mut self, _mesh: &Mesh) {}
}

/// Owns a [`Mesh`] and forwards operations to it, notifying observers.
#[derive(Default)]
pub struct MeshController {
    mesh: Mesh,
    options: LoadOptions,
    observers: Vec<Box<dyn MeshObserver>>,
}

impl MeshController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: LoadOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    pub fn add_observer(&mut self, observer: Box<dyn MeshObserver>) {
        self.observers.push(observer);
    }

    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> LoadResult<()> {
        let result = self.mesh.load_with(path, &self.options);
        self.finish_load(result)
    }

    pub fn load_str(&mut self, text: &str) -> LoadResult<()> {
        let result = self.mesh.load_str_with(text, &self.options);
        self.finish_load(result)
    }

    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.mesh.translate(dx, dy, dz);
        self.notify_changed();
    }

    pub fn rotate_x(&mut self, angle: f32) {
        self.mesh.rotate_x(angle);
        self.notify_changed();
    }

    pub fn rotate_y(&mut self, angle: f32) {
        self.mesh.rotate_y(angle);
        self.notify_changed();
    }

    pub fn rotate_z(&mut self, angle: f32) {
        self.mesh.rotate_z(angle);
        self.notify_changed();
    }

    pub fn scale(&mut self, factor: f32) {
        self.mesh.scale(factor);
        self.notify_changed();
    }

    pub fn set_translation(&mut self, tx: f32, ty: f32, tz: f32) {
        self.mesh.set_translation(tx, ty, tz);
        self.notify_changed();
    }

    pub fn set_rotation(&mut self, rx: f32, ry: f32, rz: f32) {
        self.mesh.set_rotation(rx, ry, rz);
        self.notify_changed();
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.mesh.set_scale(scale);
        self.notify_changed();
    }

    pub fn clear(&mut self) {
        self.mesh.clear();
        self.notify_changed();
    }

    fn finish_load(&mut self, result: LoadResult<()>) -> LoadResult<()> {
        match result {
            Ok(()) => {
                let (vertices, edges) = (self.mesh.vertex_count(), self.mesh.edge_count());
                for observer in &mut self.observers {
                    observer.on_loaded(vertices, edges);
                }
                self.notify_changed();
                Ok(())
            }
            Err(err) => {
                error!("Failed to load mesh: {err}");
                for observer in &mut self.observers {
                    observer.on_load_error(&err);
                }
                Err(err)
            }
        }
    }

    fn notify_changed(&mut self) {
        for observer in &mut self.observers {
            observer.on_changed(&self.mesh);
        }
    }
}
