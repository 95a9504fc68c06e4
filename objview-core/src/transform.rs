/// Affine transformation matrices and the interactive transform state
use log::warn;
use nalgebra::{Matrix4, Point3, Vector3};

use crate::geometry::Vertex;

/// Accumulated user transform: translation, rotation angles in radians about
/// X, Y and Z, and a uniform scale factor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    pub translation: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: f32,
}

impl TransformState {
    pub fn new(translation: Vector3<f32>, rotation: Vector3<f32>, scale: f32) -> Self {
        Self {
            translation,
            rotation,
            scale: clamp_scale(scale),
        }
    }

    pub fn identity() -> Self {
        Self {
            translation: Vector3::zeros(),
            rotation: Vector3::zeros(),
            scale: 1.0,
        }
    }

    /// Translate by delta amounts
    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.translation += Vector3::new(dx, dy, dz);
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.rotation += Vector3::new(dx, dy, dz);
    }

    /// Multiply the scale factor by `factor`
    pub fn scale_by(&mut self, factor: f32) {
        self.scale = clamp_scale(self.scale * factor);
    }

    pub fn set_translation(&mut self, tx: f32, ty: f32, tz: f32) {
        self.translation = Vector3::new(tx, ty, tz);
    }

    pub fn set_rotation(&mut self, rx: f32, ry: f32, rz: f32) {
        self.rotation = Vector3::new(rx, ry, rz);
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = clamp_scale(scale);
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::identity()
    }
}

/// Scale factors must stay positive; anything else falls back to 1
fn clamp_scale(scale: f32) -> f32 {
    if scale > 0.0 && scale.is_finite() {
        scale
    } else {
        warn!("Rejected scale factor {scale}, using 1");
        1.0
    }
}

/// A 4x4 homogeneous affine transform.
///
/// Every elementary operation right-multiplies onto the accumulated matrix
/// (`M = M * E`), so the operation composed last is the first one applied to
/// a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineMatrix {
    matrix: Matrix4<f32>,
}

impl AffineMatrix {
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    pub fn from_matrix(matrix: Matrix4<f32>) -> Self {
        Self { matrix }
    }

    pub fn matrix(&self) -> &Matrix4<f32> {
        &self.matrix
    }

    /// Right-multiply by another matrix
    #[must_use]
    pub fn multiply(self, other: &Matrix4<f32>) -> Self {
        Self {
            matrix: self.matrix * other,
        }
    }

    #[must_use]
    pub fn translate(self, dx: f32, dy: f32, dz: f32) -> Self {
        self.multiply(&Matrix4::new_translation(&Vector3::new(dx, dy, dz)))
    }

    #[must_use]
    pub fn scale(self, sx: f32, sy: f32, sz: f32) -> Self {
        self.multiply(&Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz)))
    }

    /// Rotate about X; positive angles turn Y toward Z
    #[must_use]
    pub fn rotate_x(self, angle: f32) -> Self {
        self.multiply(&Matrix4::new_rotation(Vector3::x() * angle))
    }

    /// Rotate about Y; positive angles turn Z toward X
    #[must_use]
    pub fn rotate_y(self, angle: f32) -> Self {
        self.multiply(&Matrix4::new_rotation(Vector3::y() * angle))
    }

    /// Rotate about Z; positive angles turn X toward Y
    #[must_use]
    pub fn rotate_z(self, angle: f32) -> Self {
        self.multiply(&Matrix4::new_rotation(Vector3::z() * angle))
    }

    pub fn reset(&mut self) {
        self.matrix = Matrix4::identity();
    }

    /// Transform a point; the homogeneous coordinate of an affine product is
    /// always 1, so no perspective divide is done
    pub fn apply_to_point(&self, point: &Point3<f32>) -> Point3<f32> {
        let p = self.matrix * point.to_homogeneous();
        Point3::new(p.x, p.y, p.z)
    }

    pub fn apply_to_vertex(&self, vertex: &mut Vertex) {
        vertex.position = self.apply_to_point(&vertex.position);
    }
}

impl Default for AffineMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

/// Build the composite matrix for a transform state pivoting on `centroid`.
///
/// Points are moved into the centroid frame, scaled, rotated about X then Y
/// then Z, moved back, and finally offset by the state's translation.
pub fn compose(state: &TransformState, centroid: &Point3<f32>) -> AffineMatrix {
    let t = state.translation;
    let r = state.rotation;
    let c = centroid.coords;

    AffineMatrix::identity()
        .translate(t.x, t.y, t.z)
        .translate(c.x, c.y, c.z)
        .rotate_z(r.z)
        .rotate_y(r.y)
        .rotate_x(r.x)
        .scale(state.scale, state.scale, state.scale)
        .translate(-c.x, -c.y, -c.z)
}
