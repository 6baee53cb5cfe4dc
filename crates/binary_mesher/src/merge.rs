//! Greedy merge of face planes into quads.
//!
//! Each plane row is split into chains, and every chain is grown along the
//! plane's width axis for as long as the next row contains the whole chain.
//! Bits absorbed into a quad are cleared from the plane, so every visible
//! face ends up in exactly one quad.
//!
//! Growth only goes one way (increasing width), which keeps the merge
//! deterministic and O(D³) but not globally minimal.

use crate::chain::chains;
use crate::core::Quad;
use crate::planes::FacePlanes;

/// Greedy merge for one direction.
///
/// Consumes the plane: every word of `face` is zero afterwards.
pub fn greedy_merge_plane(face: usize, planes: &mut FacePlanes, output: &mut Vec<Quad>) {
    let d = planes.diameter();

    for layer in 0..d {
        let rows = planes.layer_mut(face, layer);

        for width in 0..d {
            // Already missing any bits consumed by earlier rows
            let row = rows[width];
            if row == 0 {
                continue;
            }

            for chain in chains(row) {
                let mut width_len = 1u32;
                for next in rows[width + 1..].iter_mut() {
                    if *next & chain.bitmask != chain.bitmask {
                        break;
                    }
                    *next &= !chain.bitmask;
                    width_len += 1;
                }

                output.push(Quad {
                    face,
                    layer: layer as u32,
                    depth: chain.offset,
                    width: width as u32,
                    depth_len: chain.length,
                    width_len,
                });
            }

            rows[width] = 0;
        }
    }
}

/// Greedy merge for all six directions, indexed by face.
pub fn greedy_merge(planes: &mut FacePlanes) -> [Vec<Quad>; 6] {
    let mut quads: [Vec<Quad>; 6] = Default::default();
    for (face, out) in quads.iter_mut().enumerate() {
        greedy_merge_plane(face, planes, out);
    }
    quads
}
