//! Quad expansion to vertex arrays.
//!
//! Converts quads into positions, normals and indices suitable for GPU
//! rendering. Winding is taken from `FACE_LAYOUTS`, so every triangle is
//! counter-clockwise when seen from outside the solid.

use crate::core::{MeshOutput, MeshSettings, Quad, FACE_LAYOUTS};

/// Expand per-direction quads into vertex arrays.
///
/// # Arguments
/// * `quads` - Array of 6 quad vectors, one per face direction
/// * `settings` - Voxel size and chunk origin applied to every vertex
pub fn expand_quads(quads: &[Vec<Quad>; 6], settings: &MeshSettings) -> MeshOutput {
    let total_quads: usize = quads.iter().map(Vec::len).sum();
    let mut output = MeshOutput::with_capacity(total_quads);

    for list in quads {
        for quad in list {
            emit_quad(quad, settings, &mut output);
        }
    }

    output
}

/// Emit a single quad as 4 vertices and 6 indices.
fn emit_quad(quad: &Quad, settings: &MeshSettings, output: &mut MeshOutput) {
    let base_vertex = output.vertex_count() as u32;
    let normal = FACE_LAYOUTS[quad.face].normal;

    for corner in quad_corners(quad) {
        for axis in 0..3 {
            output
                .positions
                .push(settings.origin[axis] + corner[axis] as f32 * settings.voxel_size);
        }
        output.normals.extend_from_slice(&normal);
    }

    // Add indices (two triangles, CCW winding)
    output.indices.extend_from_slice(&[
        base_vertex,
        base_vertex + 1,
        base_vertex + 2,
        base_vertex,
        base_vertex + 2,
        base_vertex + 3,
    ]);
}

/// Compute the 4 grid-space corners of a quad in emission order.
///
/// Positive faces sit on the far side of their layer (`layer + 1`). Corners
/// run base, +depth, +depth+width, +width; negative faces reverse that loop.
pub fn quad_corners(quad: &Quad) -> [[u32; 3]; 4] {
    let layout = &FACE_LAYOUTS[quad.face];

    let mut base = [0u32; 3];
    base[layout.axis] = quad.layer + u32::from(!layout.flip_winding);
    base[layout.depth_axis] = quad.depth;
    base[layout.width_axis] = quad.width;

    let mut along_depth = base;
    along_depth[layout.depth_axis] += quad.depth_len;

    let mut along_both = along_depth;
    along_both[layout.width_axis] += quad.width_len;

    let mut along_width = base;
    along_width[layout.width_axis] += quad.width_len;

    if layout.flip_winding {
        [base, along_width, along_both, along_depth]
    } else {
        [base, along_depth, along_both, along_width]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FACE_NEG_Z, FACE_POS_X, FACE_POS_Y};

    fn unit_quad(face: usize) -> Quad {
        Quad { face, layer: 0, depth: 0, width: 0, depth_len: 1, width_len: 1 }
    }

    fn single(quad: Quad) -> [Vec<Quad>; 6] {
        let mut quads: [Vec<Quad>; 6] = Default::default();
        quads[quad.face].push(quad);
        quads
    }

    fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    #[test]
    fn single_quad_vertex_count() {
        let output = expand_quads(&single(unit_quad(FACE_POS_Y)), &MeshSettings::default());

        assert_eq!(output.vertex_count(), 4);
        assert_eq!(output.triangle_count(), 2);
        assert_eq!(output.positions.len(), 12);
        assert_eq!(output.normals.len(), 12);
        assert_eq!(output.indices, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn indices_reference_own_block() {
        let mut quads: [Vec<Quad>; 6] = Default::default();
        for face in 0..6 {
            quads[face].push(unit_quad(face));
        }

        let output = expand_quads(&quads, &MeshSettings::default());

        assert_eq!(output.vertex_count(), 24);
        for (q, block) in output.indices.chunks_exact(6).enumerate() {
            let b = q as u32 * 4;
            assert_eq!(block, &[b, b + 1, b + 2, b, b + 2, b + 3]);
        }
    }

    #[test]
    fn empty_quads() {
        let quads: [Vec<Quad>; 6] = Default::default();
        let output = expand_quads(&quads, &MeshSettings::default());

        assert!(output.is_empty());
        assert_eq!(output.vertex_count(), 0);
    }

    #[test]
    fn positive_face_sits_past_layer() {
        let quad = Quad { face: FACE_POS_X, layer: 3, depth: 1, width: 2, depth_len: 2, width_len: 4 };

        // +X: depth on Y, width on Z
        assert_eq!(
            quad_corners(&quad),
            [[4, 1, 2], [4, 3, 2], [4, 3, 6], [4, 1, 6]]
        );
    }

    #[test]
    fn negative_face_sits_on_layer_reversed() {
        let quad = Quad { face: FACE_NEG_Z, layer: 5, depth: 0, width: 0, depth_len: 1, width_len: 2 };

        // -Z: depth on X, width on Y
        assert_eq!(
            quad_corners(&quad),
            [[0, 0, 5], [0, 2, 5], [1, 2, 5], [1, 0, 5]]
        );
    }

    #[test]
    fn winding_faces_outward() {
        for face in 0..6 {
            let quad = Quad { face, layer: 2, depth: 1, width: 1, depth_len: 3, width_len: 2 };
            let output = expand_quads(&single(quad), &MeshSettings::default());
            let p = |i: u32| {
                let i = i as usize * 3;
                [output.positions[i], output.positions[i + 1], output.positions[i + 2]]
            };

            for tri in output.indices.chunks_exact(3) {
                let (a, b, c) = (p(tri[0]), p(tri[1]), p(tri[2]));
                let n = cross(
                    [b[0] - a[0], b[1] - a[1], b[2] - a[2]],
                    [c[0] - a[0], c[1] - a[1], c[2] - a[2]],
                );
                let expected = FACE_LAYOUTS[face].normal;
                let dot = n[0] * expected[0] + n[1] * expected[1] + n[2] * expected[2];
                assert!(dot > 0.0, "face {} winds inward", face);
            }
        }
    }

    #[test]
    fn normal_directions() {
        for face in 0..6 {
            let output = expand_quads(&single(unit_quad(face)), &MeshSettings::default());

            for n in output.normals.chunks_exact(3) {
                assert_eq!(n, &FACE_LAYOUTS[face].normal, "Face {} has wrong normal", face);
            }
        }
    }

    #[test]
    fn voxel_size_scaling() {
        let settings = MeshSettings::default().with_voxel_size(0.5);
        let output = expand_quads(&single(unit_quad(FACE_POS_Y)), &settings);

        for &pos in &output.positions {
            assert!((0.0..=0.5).contains(&pos));
        }
    }

    #[test]
    fn origin_offset() {
        let settings = MeshSettings::default().with_origin([10.0, 20.0, 30.0]);
        let output = expand_quads(&single(unit_quad(FACE_POS_Y)), &settings);

        for v in output.positions.chunks_exact(3) {
            assert!(v[0] >= 10.0 && v[1] >= 20.0 && v[2] >= 30.0);
        }
        // +Y face of cell (0, 0, 0) sits at y = 1
        assert!(output.positions.chunks_exact(3).all(|v| v[1] == 21.0));
    }
}
