/// Fit raw mesh coordinates into a unit volume around the origin
use crate::geometry::{Bounds, Vertex};

/// Center vertices on their bounding box and divide by its largest extent.
///
/// Afterwards every coordinate lies in `[-0.5, 0.5]`. A mesh with zero extent
/// on every axis is only centered. Returns the bounds before normalization,
/// or `None` for an empty slice, which is left untouched.
pub fn normalize(vertices: &mut [Vertex]) -> Option<Bounds> {
    let bounds = Bounds::from_vertices(vertices)?;

    let mut scale = bounds.max_extent();
    if scale == 0.0 {
        scale = 1.0;
    }
    let center = bounds.center();

    for vertex in vertices.iter_mut() {
        vertex.position = ((vertex.position - center) / scale).into();
    }

    Some(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::centroid;
    use approx::assert_relative_eq;

    #[test]
    fn test_small_mesh_fills_unit_volume() {
        let mut vertices = vec![
            Vertex::new(-0.001, -0.002, -0.003),
            Vertex::new(0.001, 0.002, 0.003),
        ];
        normalize(&mut vertices).unwrap();

        for v in &vertices {
            for c in [v.x(), v.y(), v.z()] {
                assert!((-1.0..=1.0).contains(&c));
            }
        }
        assert_relative_eq!(vertices[1].z(), 0.5);

        let c = centroid(&vertices);
        assert_relative_eq!(c.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(c.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(c.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_uniform_scale_keeps_proportions() {
        let mut vertices = vec![
            Vertex::new(10.0, 0.0, 0.0),
            Vertex::new(30.0, 10.0, 5.0),
        ];
        let bounds = normalize(&mut vertices).unwrap();
        assert_relative_eq!(bounds.max_extent(), 20.0);

        assert_relative_eq!(vertices[0].x(), -0.5);
        assert_relative_eq!(vertices[0].y(), -0.25);
        assert_relative_eq!(vertices[0].z(), -0.125);
        assert_relative_eq!(vertices[1].x(), 0.5);
        assert_relative_eq!(vertices[1].y(), 0.25);
        assert_relative_eq!(vertices[1].z(), 0.125);
    }

    #[test]
    fn test_degenerate_mesh_is_centered() {
        let mut vertices = vec![Vertex::new(3.0, -4.0, 7.0); 3];
        normalize(&mut vertices).unwrap();
        assert!(vertices.iter().all(|v| *v == Vertex::new(0.0, 0.0, 0.0)));
    }

    #[test]
    fn test_empty_is_noop() {
        let mut vertices: Vec<Vertex> = Vec::new();
        assert!(normalize(&mut vertices).is_none());
    }
}
