//! Input conversion functions to [`OccupancyGrid`].
//!
//! Provides conversion from:
//! - Dense code arrays (any non-zero value is solid)
//! - Position arrays (world-space voxel centre coordinates)

use crate::core::{MeshSettings, OccupancyGrid};
use crate::error::{MeshError, Result};

/// Epsilon for robust float-to-int conversion.
/// Handles floating point edge cases near integer boundaries.
const COORD_EPSILON: f32 = 1e-5;

/// Robust floor that handles values very close to integers.
///
/// When a value is within COORD_EPSILON of an integer, rounds to that integer
/// instead of flooring.
#[inline]
fn robust_floor(value: f32) -> i64 {
    let rounded = value.round();
    if (value - rounded).abs() < COORD_EPSILON {
        rounded as i64
    } else {
        value.floor() as i64
    }
}

/// Convert a dense array of cell codes to an occupancy grid.
///
/// Codes are laid out x outer, y middle, z inner (see [`OccupancyGrid`]).
/// Any value other than `T::default()` (zero for integers) is solid; the code
/// itself is a material concern and is discarded.
///
/// # Example
/// ```
/// use binary_mesher::dense_to_grid;
///
/// let mut codes = vec![0u8; 4 * 4 * 4];
/// codes[1] = 7; // (0, 0, 1)
///
/// let grid = dense_to_grid(4, &codes).unwrap();
/// assert!(grid.is_solid(0, 0, 1));
/// assert_eq!(grid.solid_count(), 1);
/// ```
pub fn dense_to_grid<T>(diameter: usize, codes: &[T]) -> Result<OccupancyGrid>
where
    T: Copy + Default + PartialEq,
{
    let empty = T::default();
    let cells = codes.iter().map(|&code| code != empty).collect();
    OccupancyGrid::from_cells(diameter, cells)
}

/// Convert voxel centre positions to an occupancy grid.
///
/// Positions are world-space (x, y, z) triples packed as a flat array and are
/// mapped through `settings` (voxel size and chunk origin). Voxels outside the
/// chunk are ignored.
///
/// # Example
/// ```
/// use binary_mesher::{positions_to_grid, MeshSettings};
///
/// let positions = [0.5, 0.5, 0.5, 1.5, 0.5, 0.5];
/// let grid = positions_to_grid(4, &positions, &MeshSettings::default()).unwrap();
///
/// assert!(grid.is_solid(0, 0, 0));
/// assert!(grid.is_solid(1, 0, 0));
/// ```
pub fn positions_to_grid(
    diameter: usize,
    positions: &[f32],
    settings: &MeshSettings,
) -> Result<OccupancyGrid> {
    settings.validate()?;
    if positions.len() % 3 != 0 {
        return Err(MeshError::RaggedPositions { len: positions.len() });
    }

    let mut grid = OccupancyGrid::new(diameter)?;
    let inv_size = 1.0 / settings.voxel_size;
    let d = diameter as i64;
    let mut skipped = 0usize;

    for pos in positions.chunks_exact(3) {
        if !pos.iter().all(|c| c.is_finite()) {
            skipped += 1;
            continue;
        }
        let lx = robust_floor((pos[0] - settings.origin[0]) * inv_size);
        let ly = robust_floor((pos[1] - settings.origin[1]) * inv_size);
        let lz = robust_floor((pos[2] - settings.origin[2]) * inv_size);

        if (0..d).contains(&lx) && (0..d).contains(&ly) && (0..d).contains(&lz) {
            grid.set(lx as usize, ly as usize, lz as usize, true);
        } else {
            skipped += 1;
        }
    }

    if skipped > 0 {
        log::debug!("ignored {} positions outside the chunk or non-finite", skipped);
    }

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn robust_floor_normal() {
        assert_eq!(robust_floor(1.5), 1);
        assert_eq!(robust_floor(1.9), 1);
        assert_eq!(robust_floor(2.1), 2);
    }

    #[test]
    fn robust_floor_near_integer() {
        assert_eq!(robust_floor(1.999999), 2);
        assert_eq!(robust_floor(2.000001), 2);
        assert_eq!(robust_floor(-0.000001), 0);
        assert_eq!(robust_floor(-0.5), -1);
    }

    #[test]
    fn dense_axis_order() {
        let mut codes = vec![0u16; 2 * 2 * 2];
        codes[4] = 3; // x = 1
        codes[2] = 1; // y = 1
        codes[1] = 9; // z = 1

        let grid = dense_to_grid(2, &codes).unwrap();

        assert!(grid.is_solid(1, 0, 0));
        assert!(grid.is_solid(0, 1, 0));
        assert!(grid.is_solid(0, 0, 1));
        assert_eq!(grid.solid_count(), 3);
    }

    #[test]
    fn dense_accepts_bools() {
        let grid = dense_to_grid(2, &[true; 8]).unwrap();
        assert_eq!(grid.solid_count(), 8);
    }

    #[test]
    fn dense_rejects_wrong_length() {
        let codes = vec![1u8; 100];
        assert_eq!(
            dense_to_grid(4, &codes),
            Err(MeshError::GridSizeMismatch { expected: 64, actual: 100 }),
        );
    }

    #[test]
    fn dense_rejects_bad_diameter() {
        let codes = vec![1u8; 27];
        assert!(matches!(
            dense_to_grid(3, &codes),
            Err(MeshError::InvalidDimension { diameter: 3, .. })
        ));
    }

    #[test]
    fn positions_with_origin_and_size() {
        let settings = MeshSettings::default()
            .with_voxel_size(0.5)
            .with_origin([10.0, 20.0, 30.0]);
        let positions = [10.25, 20.75, 31.25];

        let grid = positions_to_grid(4, &positions, &settings).unwrap();

        assert!(grid.is_solid(0, 1, 2));
        assert_eq!(grid.solid_count(), 1);
    }

    #[test]
    fn positions_out_of_bounds_ignored() {
        let positions = [
            0.5, 0.5, 0.5,
            100.0, 0.5, 0.5,
            -100.0, 0.5, 0.5,
        ];
        let grid = positions_to_grid(8, &positions, &MeshSettings::default()).unwrap();

        assert_eq!(grid.solid_count(), 1);
    }

    #[test]
    fn positions_reject_ragged_input() {
        let positions = [0.5, 0.5];
        assert_eq!(
            positions_to_grid(8, &positions, &MeshSettings::default()),
            Err(MeshError::RaggedPositions { len: 2 }),
        );
    }

    #[test]
    fn positions_nan_ignored() {
        let positions = [
            f32::NAN, f32::NAN, f32::NAN,
            0.5, f32::NAN, 0.5,
            f32::INFINITY, 0.5, 0.5,
            1.5, 1.5, 1.5,
        ];
        let grid = positions_to_grid(4, &positions, &MeshSettings::default()).unwrap();

        assert!(!grid.is_solid(0, 0, 0));
        assert!(grid.is_solid(1, 1, 1));
        assert_eq!(grid.solid_count(), 1);
    }
}
