//! Bitwise face plane construction.
//!
//! A face is visible where a cell is solid and its neighbour along the face
//! normal is empty. Within one column word that is a single shift-and-mask,
//! which finds the boundary bits of every run at once. Cells on the chunk
//! border always expose their border face.
//!
//! The boundary bits are then regrouped into six planes (one per direction)
//! so that faces sharing a layer can be merged in 2-D.

use crate::core::{Sequence, FACE_LAYOUTS};
use crate::encode::AxisColumns;

/// Run boundaries of one [`Sequence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Links {
    /// Highest bit of every run: the face looking towards `+axis`.
    pub positive: Sequence,
    /// Lowest bit of every run: the face looking towards `-axis`.
    pub negative: Sequence,
}

/// Find the boundary bits of every run in `sequence`.
///
/// `sequence >> 1` lines each bit up with its `+1` neighbour, so
/// `sequence & !(sequence >> 1)` keeps solid bits whose upper neighbour is
/// empty. The left shift does the same for the lower neighbour. A run of
/// length one sets the same bit in both masks.
///
/// ```
/// use binary_mesher::links;
///
/// let l = links(0b0110);
/// assert_eq!(l.positive, 0b0100);
/// assert_eq!(l.negative, 0b0010);
/// ```
#[inline]
pub fn links(sequence: Sequence) -> Links {
    Links {
        positive: sequence & !(sequence >> 1),
        negative: sequence & !(sequence << 1),
    }
}

/// Face visibility for all six directions.
///
/// `get(face, layer, width)` has bit `depth` set when the cell at
/// (`layer`, `depth`, `width`) along the axes of `FACE_LAYOUTS[face]` exposes a
/// face in that direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacePlanes {
    diameter: usize,
    planes: [Vec<Sequence>; 6],
}

impl FacePlanes {
    /// Empty planes for a chunk of the given diameter.
    pub fn new(diameter: usize) -> Self {
        let words = diameter * diameter;
        Self {
            diameter,
            planes: std::array::from_fn(|_| vec![0; words]),
        }
    }

    #[inline]
    pub fn diameter(&self) -> usize {
        self.diameter
    }

    /// Get the word at (`layer`, `width`) of a plane.
    #[inline]
    pub fn get(&self, face: usize, layer: usize, width: usize) -> Sequence {
        self.planes[face][layer * self.diameter + width]
    }

    /// Get a mutable reference to a plane word.
    #[inline]
    pub fn get_mut(&mut self, face: usize, layer: usize, width: usize) -> &mut Sequence {
        &mut self.planes[face][layer * self.diameter + width]
    }

    /// The `D` words of one layer, indexed by width.
    pub fn layer_mut(&mut self, face: usize, layer: usize) -> &mut [Sequence] {
        let d = self.diameter;
        &mut self.planes[face][layer * d..(layer + 1) * d]
    }

    /// Count visible unit faces per direction.
    pub fn face_counts(&self) -> [usize; 6] {
        std::array::from_fn(|face| {
            self.planes[face].iter().map(|w| w.count_ones() as usize).sum()
        })
    }

    /// Count total visible unit faces.
    pub fn total_faces(&self) -> usize {
        self.face_counts().iter().sum()
    }
}

/// Build the six face planes from per-axis column words.
///
/// For axis `a`, the column at row `(depth, width)` is split into its
/// [`Links`]; bit `layer` of the positive mask becomes bit `depth` of
/// `plane[2a][layer][width]`, and likewise for the negative mask in
/// `plane[2a + 1]`. Grouping by layer is what lets the expander merge a chain
/// across neighbouring widths.
pub fn build_face_planes(columns: &AxisColumns) -> FacePlanes {
    let d = columns.diameter();
    let mut planes = FacePlanes::new(d);

    for axis in 0..3 {
        let pos_face = axis * 2;
        let neg_face = axis * 2 + 1;
        debug_assert_eq!(FACE_LAYOUTS[pos_face].axis, axis);

        for depth in 0..d {
            for width in 0..d {
                let column = columns.get(axis, depth, width);

                // Skip empty columns
                if column == 0 {
                    continue;
                }

                let Links { positive, negative } = links(column);
                scatter(&mut planes, pos_face, positive, depth, width);
                scatter(&mut planes, neg_face, negative, depth, width);
            }
        }
    }

    planes
}

/// Move each set bit `layer` of `bits` to bit `depth` of `plane[layer][width]`.
#[inline]
fn scatter(planes: &mut FacePlanes, face: usize, mut bits: Sequence, depth: usize, width: usize) {
    while bits != 0 {
        let layer = bits.trailing_zeros() as usize;
        *planes.get_mut(face, layer, width) |= 1 << depth;
        bits &= bits - 1;
    }
}
