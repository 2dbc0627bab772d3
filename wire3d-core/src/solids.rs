//! Built-in example solids
use crate::color::Color;
use crate::geometry::Object;
use crate::math::Vec3;

fn vertices(coords: &[[f64; 3]]) -> Vec<Vec3> {
    coords.iter().map(|&[x, y, z]| Vec3::new(x, y, z)).collect()
}

/// Names accepted by [`by_name`].
pub const NAMES: [&str; 5] = [
    "cube",
    "tetrahedron",
    "octahedron",
    "triangular-prism",
    "pentagonal-prism",
];

pub fn by_name(name: &str) -> Option<Object> {
    match name {
        "cube" => Some(cube()),
        "tetrahedron" => Some(tetrahedron()),
        "octahedron" => Some(octahedron()),
        "triangular-prism" => Some(triangular_prism()),
        "pentagonal-prism" => Some(pentagonal_prism()),
        _ => None,
    }
}

/// A 100-unit cube spanning `-20..80` on every axis.
#[rustfmt::skip]
pub fn cube() -> Object {
    Object::new(
        vertices(&[
            [-20.0, -20.0, -20.0],
            [80.0, -20.0, -20.0],
            [80.0, 80.0, -20.0],
            [-20.0, 80.0, -20.0],
            [-20.0, -20.0, 80.0],
            [80.0, -20.0, 80.0],
            [80.0, 80.0, 80.0],
            [-20.0, 80.0, 80.0],
        ]),
        Color::BLUE,
        Color::rgb(0x00, 0x00, 0x99),
    )
    .with_edges(vec![
        [0, 1], [1, 2], [2, 3], [3, 0],
        [4, 5], [5, 6], [6, 7], [7, 4],
        [0, 4], [1, 5], [2, 6], [3, 7],
    ])
    .with_triangles(vec![
        [0, 1, 2], [0, 2, 3],
        [4, 5, 6], [4, 6, 7],
        [0, 1, 5], [0, 5, 4],
        [1, 2, 6], [1, 6, 5],
        [2, 3, 7], [2, 7, 6],
        [3, 0, 4], [3, 4, 7],
    ])
}

pub fn tetrahedron() -> Object {
    Object::new(
        vertices(&[
            [0.0, 100.0, 0.0],
            [-50.0, 0.0, -50.0],
            [50.0, 0.0, -50.0],
            [0.0, 0.0, 50.0],
        ]),
        Color::GREEN,
        Color::rgb(0x00, 0x88, 0x00),
    )
    .with_edges(vec![[0, 1], [0, 2], [0, 3], [1, 2], [2, 3], [3, 1]])
    .with_triangles(vec![[0, 1, 2], [0, 2, 3], [0, 3, 1], [1, 2, 3]])
}

#[rustfmt::skip]
pub fn octahedron() -> Object {
    // top, bottom, then the equator ring 2 -> 4 -> 3 -> 5
    Object::new(
        vertices(&[
            [0.0, 100.0, 0.0],
            [0.0, -100.0, 0.0],
            [-50.0, 0.0, 0.0],
            [50.0, 0.0, 0.0],
            [0.0, 0.0, -50.0],
            [0.0, 0.0, 50.0],
        ]),
        Color::PURPLE,
        Color::rgb(0x88, 0x00, 0x88),
    )
    .with_edges(vec![
        [0, 2], [0, 3], [0, 4], [0, 5],
        [1, 2], [1, 3], [1, 4], [1, 5],
        [2, 4], [4, 3], [3, 5], [5, 2],
    ])
    .with_triangles(vec![
        [0, 2, 4], [0, 4, 3], [0, 3, 5], [0, 5, 2],
        [1, 4, 2], [1, 3, 4], [1, 5, 3], [1, 2, 5],
    ])
}

#[rustfmt::skip]
pub fn triangular_prism() -> Object {
    Object::new(
        vertices(&[
            [0.0, 0.0, 0.0],
            [100.0, 0.0, 0.0],
            [50.0, 80.0, 0.0],
            [0.0, 0.0, 100.0],
            [100.0, 0.0, 100.0],
            [50.0, 80.0, 100.0],
        ]),
        Color::YELLOW,
        Color::rgb(0x88, 0x88, 0x00),
    )
    .with_edges(vec![
        [0, 1], [1, 2], [2, 0],
        [3, 4], [4, 5], [5, 3],
        [0, 3], [1, 4], [2, 5],
    ])
    .with_triangles(vec![
        [0, 1, 2],
        [3, 4, 5],
        [1, 3, 0],
        [1, 3, 4],
        [2, 4, 1],
        [2, 4, 5],
        [0, 5, 2],
        [0, 5, 3],
    ])
}

#[rustfmt::skip]
pub fn pentagonal_prism() -> Object {
    Object::new(
        vertices(&[
            [0.0, 100.0, 0.0],
            [95.0, 31.0, 0.0],
            [59.0, -81.0, 0.0],
            [-59.0, -81.0, 0.0],
            [-95.0, 31.0, 0.0],
            [0.0, 100.0, 100.0],
            [95.0, 31.0, 100.0],
            [59.0, -81.0, 100.0],
            [-59.0, -81.0, 100.0],
            [-95.0, 31.0, 100.0],
        ]),
        Color::ORANGE,
        Color::rgb(0x88, 0x55, 0x00),
    )
    .with_edges(vec![
        [0, 1], [1, 2], [2, 3], [3, 4], [4, 0],
        [5, 6], [6, 7], [7, 8], [8, 9], [9, 5],
        [0, 5], [1, 6], [2, 7], [3, 8], [4, 9],
    ])
    .with_triangles(vec![
        // pentagon caps, fanned from vertex 0 and 5
        [0, 1, 2], [0, 2, 3], [0, 3, 4],
        [5, 6, 7], [5, 7, 8], [5, 8, 9],
        // sides
        [0, 1, 6], [0, 6, 5],
        [1, 2, 7], [1, 7, 6],
        [2, 3, 8], [2, 8, 7],
        [3, 4, 9], [3, 9, 8],
        [4, 0, 5], [4, 5, 9],
    ])
}
