//! Per-voxel culled meshing.
//!
//! The brute-force alternative to the binary mesher: every solid cell checks
//! its six neighbours one by one and emits a 1×1 quad for each empty one.
//! Slower and unmerged, but simple enough to serve as the reference the
//! greedy output is checked against.

use crate::core::{OccupancyGrid, Quad, FACE_LAYOUTS};

/// Emit one unit quad per visible face, indexed by face.
///
/// Neighbours outside the grid count as empty.
pub fn culled_quads(grid: &OccupancyGrid) -> [Vec<Quad>; 6] {
    let mut quads: [Vec<Quad>; 6] = Default::default();

    for cell in grid.solid_cells() {
        for (face, layout) in FACE_LAYOUTS.iter().enumerate() {
            let step = if layout.flip_winding { -1 } else { 1 };
            let mut neighbour = cell.map(|c| c as i64);
            neighbour[layout.axis] += step;

            if grid.is_solid_signed(neighbour[0], neighbour[1], neighbour[2]) {
                continue;
            }

            quads[face].push(Quad {
                face,
                layer: cell[layout.axis] as u32,
                depth: cell[layout.depth_axis] as u32,
                width: cell[layout.width_axis] as u32,
                depth_len: 1,
                width_len: 1,
            });
        }
    }

    quads
}
