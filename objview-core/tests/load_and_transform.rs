//! Loading OBJ files from disk and transforming the result.

use std::f32::consts::{FRAC_PI_2, PI};
use std::io::Write;
use std::path::PathBuf;

use approx::assert_relative_eq;
use objview_core::{write_obj, LoadError, LoadOptions, Mesh, ParseError, Vertex};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load_cube() -> Mesh {
    let mut mesh = Mesh::new();
    mesh.load(fixture("cube.obj")).unwrap();
    mesh
}

fn assert_vertex_eq(actual: &Vertex, x: f32, y: f32, z: f32) {
    assert_relative_eq!(actual.x(), x, epsilon = 1e-6);
    assert_relative_eq!(actual.y(), y, epsilon = 1e-6);
    assert_relative_eq!(actual.z(), z, epsilon = 1e-6);
}

#[test]
fn cube_counts() {
    let mesh = load_cube();
    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.polygons().len(), 6);
    assert_eq!(mesh.edge_count(), 12);
    assert_eq!(mesh.source(), Some(fixture("cube.obj").as_path()));
}

#[test]
fn cube_is_normalized() {
    let mesh = load_cube();
    for v in mesh.vertices() {
        for c in [v.x(), v.y(), v.z()] {
            assert!((-1.0..=1.0).contains(&c), "{c} outside the unit volume");
        }
    }

    let c = mesh.centroid();
    assert_relative_eq!(c.x, 0.0, epsilon = 1e-6);
    assert_relative_eq!(c.y, 0.0, epsilon = 1e-6);
    assert_relative_eq!(c.z, 0.0, epsilon = 1e-6);
}

#[test]
fn invalid_vertex_leaves_mesh_empty() {
    let mut mesh = load_cube();
    let err = mesh.load(fixture("invalid_vertex.obj")).unwrap_err();

    match err {
        LoadError::Parse(ParseError::InvalidVertex { line_number, line }) => {
            assert_eq!(line_number, 3);
            assert_eq!(line, "v 1.0 1.0");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(mesh.vertex_count(), 0);
    assert!(mesh.polygons().is_empty());
    assert!(mesh.source().is_none());
}

#[test]
fn degenerate_polygon_fails() {
    let mut mesh = Mesh::new();
    let err = mesh.load(fixture("degenerate_polygon.obj")).unwrap_err();
    assert!(matches!(
        err,
        LoadError::Parse(ParseError::DegeneratePolygon {
            line_number: 5,
            count: 2,
            ..
        })
    ));
    assert!(mesh.is_empty());
}

#[test]
fn out_of_range_index_depends_on_options() {
    let mut mesh = Mesh::new();
    let err = mesh.load(fixture("out_of_range.obj")).unwrap_err();
    assert!(matches!(
        err,
        LoadError::Parse(ParseError::IndexOutOfRange {
            line_number: 5,
            index: 9,
            vertex_count: 3,
        })
    ));

    mesh.load_with(fixture("out_of_range.obj"), &LoadOptions::permissive())
        .unwrap();
    assert_eq!(mesh.polygons()[1].indices, vec![0, 2, 8]);
}

#[test]
fn missing_file_fails_to_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.obj");

    let mut mesh = load_cube();
    let err = mesh.load(&path).unwrap_err();
    match err {
        LoadError::FileOpen { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(mesh.vertex_count(), 0);
}

#[test]
fn non_utf8_file_fails_to_read() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"v 0 0 0\nv \xff\xfe 1 1\n").unwrap();

    let mut mesh = Mesh::new();
    let err = mesh.load(file.path()).unwrap_err();
    assert!(matches!(err, LoadError::FileRead { .. }));
}

#[test]
fn rotations_match_right_handed_axes() {
    let mut mesh = load_cube();
    let v = mesh.vertices()[6];

    mesh.rotate_x(FRAC_PI_2);
    assert_vertex_eq(&mesh.vertices()[6], v.x(), -v.z(), v.y());

    mesh.reset_transform();
    mesh.rotate_y(FRAC_PI_2);
    assert_vertex_eq(&mesh.vertices()[6], v.z(), v.y(), -v.x());

    mesh.reset_transform();
    mesh.rotate_z(FRAC_PI_2);
    assert_vertex_eq(&mesh.vertices()[6], -v.y(), v.x(), v.z());

    mesh.reset_transform();
    mesh.rotate_x(PI);
    assert_vertex_eq(&mesh.vertices()[6], v.x(), -v.y(), -v.z());
}

#[test]
fn full_turn_restores_vertices() {
    let mut mesh = load_cube();
    let before = mesh.vertices().to_vec();

    mesh.rotate_y(1.25);
    mesh.rotate_y(2.0 * PI - 1.25);
    for (after, before) in mesh.vertices().iter().zip(&before) {
        assert_vertex_eq(after, before.x(), before.y(), before.z());
    }
}

#[test]
fn translation_is_relative_to_previous_position() {
    let mut mesh = load_cube();
    mesh.set_rotation(0.2, 0.4, 0.6);
    mesh.set_scale(0.8);
    let before = mesh.vertices().to_vec();

    mesh.translate(-3.0, -8.0, -1.0);
    for (after, before) in mesh.vertices().iter().zip(&before) {
        assert_vertex_eq(after, before.x() - 3.0, before.y() - 8.0, before.z() - 1.0);
    }
}

#[test]
fn exported_geometry_reloads() {
    let mut mesh = load_cube();
    mesh.set_rotation(0.0, FRAC_PI_2, 0.0);

    let mut file = tempfile::Builder::new().suffix(".obj").tempfile().unwrap();
    write_obj(&mut file, mesh.vertices(), mesh.polygons()).unwrap();
    file.flush().unwrap();

    let mut reloaded = Mesh::new();
    reloaded
        .load_with(file.path(), &LoadOptions::raw())
        .unwrap();
    assert_eq!(reloaded.vertex_count(), mesh.vertex_count());
    assert_eq!(reloaded.polygons(), mesh.polygons());
    assert_eq!(reloaded.vertices(), mesh.vertices());
}
