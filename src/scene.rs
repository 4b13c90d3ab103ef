use glam::Vec3;

use crate::mesh::Vertex;

/// Placement of the clay subject and the lamp marker.
pub const SUBJECT_POSITION: Vec3 = Vec3::new(0.0, 0.0, 0.0);
pub const SUBJECT_SCALE: Vec3 = Vec3::new(2.0, 2.0, 2.0);
pub const LAMP_SCALE: Vec3 = Vec3::new(0.5, 0.5, 0.5);

pub const OBJECT_COLOR: [f32; 3] = [0.5, 0.5, 1.0];
pub const LIGHT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
const GREEN: [f32; 4] = [0.0, 0.5, 0.0, 1.0];
const YELLOW: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const TABLE: [f32; 4] = [0.5, 0.5, 1.0, 1.0];

/// Builds the whole hand-modeled scene as one interleaved vertex table:
/// a small box with a differently colored face per side, the table plane
/// it sits on, a square pyramid, and a group of ramp-like triangles.
pub fn scene_vertices() -> Vec<Vertex> {
    #[rustfmt::skip]
    let vertices = vec![
        // Box, front face
        Vertex::new([-2.5, -0.5,  0.5], BLUE),
        Vertex::new([-2.0, -0.5,  0.5], BLUE),
        Vertex::new([-2.5,  0.0,  0.5], BLUE),
        Vertex::new([-2.0,  0.0,  0.5], BLUE),
        // Box, back face
        Vertex::new([-2.0,  0.0, -0.5], GREEN),
        Vertex::new([-2.5,  0.0, -0.5], GREEN),
        Vertex::new([-2.0, -0.5, -0.5], GREEN),
        Vertex::new([-2.5, -0.5, -0.5], GREEN),
        // Box, left face
        Vertex::new([-2.5, -0.5,  0.5], YELLOW),
        Vertex::new([-2.5,  0.0,  0.5], YELLOW),
        Vertex::new([-2.5,  0.0, -0.5], YELLOW),
        Vertex::new([-2.5, -0.5, -0.5], YELLOW),
        // Box, bottom face (front edge blue, back edge green)
        Vertex::new([-2.5, -0.5,  0.5], BLUE),
        Vertex::new([-2.0, -0.5,  0.5], BLUE),
        Vertex::new([-2.5, -0.5, -0.5], GREEN),
        Vertex::new([-2.0, -0.5, -0.5], GREEN),
        // Box, top face (left edge yellow, right edge red)
        Vertex::new([-2.5,  0.0,  0.5], YELLOW),
        Vertex::new([-2.0,  0.0,  0.5], RED),
        Vertex::new([-2.0,  0.0, -0.5], RED),
        Vertex::new([-2.5,  0.0, -0.5], YELLOW),
        // Box, right face
        Vertex::new([-2.0, -0.5,  0.5], RED),
        Vertex::new([-2.0,  0.0,  0.5], RED),
        Vertex::new([-2.0,  0.0, -0.5], RED),
        Vertex::new([-2.0, -0.5, -0.5], RED),
        // Table plane, sunk slightly below the box so it never shows through
        Vertex::new([-5.0, -0.51, -5.0], TABLE),
        Vertex::new([ 5.0, -0.51, -5.0], TABLE),
        Vertex::new([ 5.0, -0.51,  5.0], TABLE),
        Vertex::new([ 5.0, -0.51,  5.0], TABLE),
        Vertex::new([-5.0, -0.51,  5.0], TABLE),
        Vertex::new([-5.0, -0.51, -5.0], TABLE),
        // Pyramid base
        Vertex::new([ 2.0, -0.5,  2.0], BLUE),
        Vertex::new([ 2.0, -0.5,  4.0], BLUE),
        Vertex::new([ 4.0, -0.5,  2.0], BLUE),
        Vertex::new([ 4.0, -0.5,  2.0], BLUE),
        Vertex::new([ 4.0, -0.5,  4.0], BLUE),
        Vertex::new([ 2.0, -0.5,  4.0], BLUE),
        // Pyramid sides, apex at (3, 1, 3)
        Vertex::new([ 2.0, -0.5,  2.0], BLUE),
        Vertex::new([ 2.0, -0.5,  4.0], BLUE),
        Vertex::new([ 3.0,  1.0,  3.0], BLUE),
        Vertex::new([ 2.0, -0.5,  2.0], BLUE),
        Vertex::new([ 4.0, -0.5,  2.0], BLUE),
        Vertex::new([ 3.0,  1.0,  3.0], BLUE),
        Vertex::new([ 4.0, -0.5,  4.0], BLUE),
        Vertex::new([ 2.0, -0.5,  4.0], BLUE),
        Vertex::new([ 3.0,  1.0,  3.0], BLUE),
        Vertex::new([ 4.0, -0.5,  4.0], BLUE),
        Vertex::new([ 4.0, -0.5,  2.0], BLUE),
        Vertex::new([ 3.0,  1.0,  3.0], BLUE),
        // Ramp group: tall back wall
        Vertex::new([ 3.5,  2.5, -4.0], BLUE),
        Vertex::new([ 3.5, -0.5, -4.0], BLUE),
        Vertex::new([-0.5, -0.5, -4.0], BLUE),
        Vertex::new([ 3.5,  2.5, -4.0], BLUE),
        Vertex::new([-0.5,  2.5, -4.0], BLUE),
        Vertex::new([-0.5, -0.5, -4.0], BLUE),
        // Ramp group: low front wall
        Vertex::new([ 3.5,  1.0, -2.0], BLUE),
        Vertex::new([ 3.5, -0.5, -2.0], BLUE),
        Vertex::new([-0.5, -0.5, -2.0], BLUE),
        Vertex::new([ 3.5,  1.0, -2.0], BLUE),
        Vertex::new([-0.5,  1.0, -2.0], BLUE),
        Vertex::new([-0.5, -0.5, -2.0], BLUE),
        // Ramp group: right side
        Vertex::new([ 3.5,  2.5, -4.0], BLUE),
        Vertex::new([ 3.5,  1.0, -2.0], BLUE),
        Vertex::new([ 3.5, -0.5, -2.0], BLUE),
        Vertex::new([ 3.5,  2.5, -4.0], BLUE),
        Vertex::new([ 3.5, -0.5, -4.0], BLUE),
        Vertex::new([ 3.5, -0.5, -2.0], BLUE),
        // Ramp group: left side
        Vertex::new([-0.5,  2.5, -4.0], BLUE),
        Vertex::new([-0.5,  1.0, -2.0], BLUE),
        Vertex::new([-0.5, -0.5, -2.0], BLUE),
        Vertex::new([-0.5,  2.5, -4.0], BLUE),
        Vertex::new([-0.5, -0.5, -4.0], BLUE),
        Vertex::new([-0.5, -0.5, -2.0], BLUE),
        // Ramp group: slanted top slab
        Vertex::new([ 4.0,  2.5, -4.0], BLUE),
        Vertex::new([ 4.0,  0.85, -1.8], BLUE),
        Vertex::new([-1.0,  0.85, -1.8], BLUE),
        Vertex::new([ 4.0,  2.5, -4.0], BLUE),
        Vertex::new([-1.0,  0.85, -1.8], BLUE),
        Vertex::new([-1.0,  2.5, -4.0], BLUE),
    ];
    vertices
}

/// Index table matching `scene_vertices`: thirty triangles.
pub fn scene_indices() -> Vec<u16> {
    #[rustfmt::skip]
    let indices = vec![
        // Box faces, two triangles each
        0, 1, 2,
        1, 2, 3,
        4, 5, 6,
        5, 6, 7,
        8, 9, 10,
        8, 10, 11,
        12, 13, 14,
        13, 14, 15,
        16, 17, 18,
        16, 18, 19,
        20, 21, 22,
        20, 22, 23,
        // Table plane
        24, 25, 26,
        27, 28, 29,
        // Pyramid base and sides
        30, 31, 32,
        33, 34, 35,
        36, 37, 38,
        39, 40, 41,
        42, 43, 44,
        45, 46, 47,
        // Ramp group
        48, 49, 50,
        51, 52, 53,
        54, 55, 56,
        57, 58, 59,
        60, 61, 62,
        63, 64, 65,
        66, 67, 68,
        69, 70, 71,
        72, 73, 74,
        75, 76, 77,
    ];
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_have_expected_sizes() {
        assert_eq!(scene_vertices().len(), 78);
        assert_eq!(scene_indices().len(), 90);
    }

    #[test]
    fn every_index_is_in_range() {
        let vertex_count = scene_vertices().len() as u16;
        assert!(scene_indices().iter().all(|&i| i < vertex_count));
    }

    #[test]
    fn index_count_is_whole_triangles() {
        assert_eq!(scene_indices().len() % 3, 0);
    }

    #[test]
    fn table_plane_sits_below_the_box() {
        let vertices = scene_vertices();
        let lowest_box_y = vertices[..24]
            .iter()
            .map(|v| v.position[1])
            .fold(f32::INFINITY, f32::min);
        assert!(vertices[24..30].iter().all(|v| v.position[1] < lowest_box_y));
    }
}
