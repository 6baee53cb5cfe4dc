//! Core type definitions for the binary mesher.

use bytemuck::{Pod, Zeroable};

use crate::error::{MeshError, Result};

/// One bit-packed row of occupancy or face visibility along a single axis.
pub type Sequence = u32;

/// Width of a [`Sequence`] in bits, and therefore the largest chunk diameter.
pub const MAX_DIAMETER: usize = Sequence::BITS as usize;

/// Axis indices.
pub const AXIS_X: usize = 0;
pub const AXIS_Y: usize = 1;
pub const AXIS_Z: usize = 2;

/// Face direction indices.
///
/// Ordered by axis, positive before negative, so that
/// `face = axis * 2 + (negative as usize)`.
pub const FACE_POS_X: usize = 0;
pub const FACE_NEG_X: usize = 1;
pub const FACE_POS_Y: usize = 2;
pub const FACE_NEG_Y: usize = 3;
pub const FACE_POS_Z: usize = 4;
pub const FACE_NEG_Z: usize = 5;

/// Orientation of one face direction.
///
/// A plane for direction `face` is indexed `[layer][width]` with bit `depth`,
/// where `layer` runs along `axis`, `depth` along `depth_axis` and `width`
/// along `width_axis`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceLayout {
    /// Axis the face looks along.
    pub axis: usize,
    /// Axis a chain runs along (bit index inside a plane row).
    pub depth_axis: usize,
    /// Axis the greedy expander grows along.
    pub width_axis: usize,
    /// Outward unit normal.
    pub normal: [f32; 3],
    /// Emit corners in reverse order (negative directions).
    pub flip_winding: bool,
}

/// Orientation table for all six directions.
///
/// `depth_axis × width_axis` points along `+axis` for every entry (cyclic
/// order), so unflipped corners wind counter-clockwise seen from `+axis`.
pub const FACE_LAYOUTS: [FaceLayout; 6] = [
    FaceLayout { axis: AXIS_X, depth_axis: AXIS_Y, width_axis: AXIS_Z, normal: [1.0, 0.0, 0.0], flip_winding: false },
    FaceLayout { axis: AXIS_X, depth_axis: AXIS_Y, width_axis: AXIS_Z, normal: [-1.0, 0.0, 0.0], flip_winding: true },
    FaceLayout { axis: AXIS_Y, depth_axis: AXIS_Z, width_axis: AXIS_X, normal: [0.0, 1.0, 0.0], flip_winding: false },
    FaceLayout { axis: AXIS_Y, depth_axis: AXIS_Z, width_axis: AXIS_X, normal: [0.0, -1.0, 0.0], flip_winding: true },
    FaceLayout { axis: AXIS_Z, depth_axis: AXIS_X, width_axis: AXIS_Y, normal: [0.0, 0.0, 1.0], flip_winding: false },
    FaceLayout { axis: AXIS_Z, depth_axis: AXIS_X, width_axis: AXIS_Y, normal: [0.0, 0.0, -1.0], flip_winding: true },
];

/// Human-readable direction names, indexed by face.
pub const FACE_NAMES: [&str; 6] = ["+X", "-X", "+Y", "-Y", "+Z", "-Z"];

/// Check that `diameter` is a power of two no wider than a [`Sequence`].
pub fn validate_diameter(diameter: usize) -> Result<()> {
    if diameter == 0 || !diameter.is_power_of_two() || diameter > MAX_DIAMETER {
        log::warn!("rejecting chunk diameter {}", diameter);
        return Err(MeshError::InvalidDimension { diameter, max: MAX_DIAMETER });
    }
    Ok(())
}

/// Dense cubic occupancy field.
///
/// Cells are stored x outer, y middle, z inner:
/// `cells[x * D * D + y * D + z]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    diameter: usize,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    /// Create an all-empty grid.
    pub fn new(diameter: usize) -> Result<Self> {
        validate_diameter(diameter)?;
        Ok(Self {
            diameter,
            cells: vec![false; diameter * diameter * diameter],
        })
    }

    /// Wrap an existing cell vector. Length must be `diameter³`.
    pub fn from_cells(diameter: usize, cells: Vec<bool>) -> Result<Self> {
        validate_diameter(diameter)?;
        let expected = diameter * diameter * diameter;
        if cells.len() != expected {
            log::warn!("occupancy length {} does not match diameter {}", cells.len(), diameter);
            return Err(MeshError::GridSizeMismatch { expected, actual: cells.len() });
        }
        Ok(Self { diameter, cells })
    }

    /// Cube side length.
    #[inline]
    pub fn diameter(&self) -> usize {
        self.diameter
    }

    /// Linear index of a cell.
    ///
    /// # Panics
    /// If any coordinate is outside `0..diameter`; a wrapped index would
    /// address a different cell.
    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        assert!(
            x < self.diameter && y < self.diameter && z < self.diameter,
            "cell ({}, {}, {}) out of bounds for diameter {}",
            x, y, z, self.diameter
        );
        (x * self.diameter + y) * self.diameter + z
    }

    /// Mark a cell solid or empty.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, solid: bool) {
        let idx = self.index(x, y, z);
        self.cells[idx] = solid;
    }

    /// Mark a cell, rejecting coordinates outside the grid.
    pub fn try_set(&mut self, x: usize, y: usize, z: usize, solid: bool) -> Result<()> {
        let d = self.diameter;
        if x >= d || y >= d || z >= d {
            return Err(MeshError::CellOutOfBounds { cell: [x, y, z], diameter: d });
        }
        self.set(x, y, z, solid);
        Ok(())
    }

    /// Check if a cell is solid.
    #[inline]
    pub fn is_solid(&self, x: usize, y: usize, z: usize) -> bool {
        self.cells[self.index(x, y, z)]
    }

    /// Solid check that treats anything outside the grid as empty.
    pub fn is_solid_signed(&self, x: i64, y: i64, z: i64) -> bool {
        let d = self.diameter as i64;
        if x < 0 || y < 0 || z < 0 || x >= d || y >= d || z >= d {
            return false;
        }
        self.is_solid(x as usize, y as usize, z as usize)
    }

    /// Raw cells in storage order.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Count solid cells.
    pub fn solid_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Check if no cell is solid.
    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&c| c)
    }

    /// Iterate `[x, y, z]` of every solid cell in storage order.
    pub fn solid_cells(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        let d = self.diameter;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, solid)| **solid)
            .map(move |(i, _)| [i / (d * d), (i / d) % d, i % d])
    }
}

/// A merged rectangle of same-direction unit faces.
///
/// `layer`, `depth` and `width` are cell coordinates along the axes named by
/// `FACE_LAYOUTS[face]`; the rectangle covers `depth_len × width_len` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Quad {
    pub face: usize,
    pub layer: u32,
    pub depth: u32,
    pub width: u32,
    pub depth_len: u32,
    pub width_len: u32,
}

impl Quad {
    /// Number of unit faces covered.
    pub fn area(&self) -> u32 {
        self.depth_len * self.width_len
    }

    /// Grid coordinates of the first covered cell.
    pub fn min_cell(&self) -> [u32; 3] {
        let layout = &FACE_LAYOUTS[self.face];
        let mut cell = [0u32; 3];
        cell[layout.axis] = self.layer;
        cell[layout.depth_axis] = self.depth;
        cell[layout.width_axis] = self.width;
        cell
    }

    /// Grid coordinates of every cell whose face this quad covers.
    pub fn cells(&self) -> impl Iterator<Item = [u32; 3]> {
        let layout = FACE_LAYOUTS[self.face];
        let base = self.min_cell();
        let (depth_len, width_len) = (self.depth_len, self.width_len);
        (0..depth_len).flat_map(move |d| {
            (0..width_len).map(move |w| {
                let mut cell = base;
                cell[layout.depth_axis] += d;
                cell[layout.width_axis] += w;
                cell
            })
        })
    }
}

/// Interleaved vertex, laid out for direct GPU upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Output mesh data ready for GPU buffers.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MeshOutput {
    /// Vertex positions (3 floats per vertex).
    pub positions: Vec<f32>,
    /// Vertex normals (3 floats per vertex), constant per quad.
    pub normals: Vec<f32>,
    /// Triangle indices (6 per quad).
    pub indices: Vec<u32>,
}

impl MeshOutput {
    /// Pre-allocate capacity for a known quad count.
    pub fn with_capacity(quads: usize) -> Self {
        Self {
            positions: Vec::with_capacity(quads * 4 * 3),
            normals: Vec::with_capacity(quads * 4 * 3),
            indices: Vec::with_capacity(quads * 6),
        }
    }

    /// Number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of quads in the mesh.
    pub fn quad_count(&self) -> usize {
        self.indices.len() / 6
    }

    /// Check if the mesh has no geometry.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Clear all mesh data.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.normals.clear();
        self.indices.clear();
    }

    /// Positions and normals zipped into [`Vertex`] records.
    pub fn interleaved(&self) -> Vec<Vertex> {
        self.positions
            .chunks_exact(3)
            .zip(self.normals.chunks_exact(3))
            .map(|(p, n)| Vertex {
                position: [p[0], p[1], p[2]],
                normal: [n[0], n[1], n[2]],
            })
            .collect()
    }

    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.positions.as_slice())
    }

    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.normals.as_slice())
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.indices.as_slice())
    }
}

/// World placement of a meshed chunk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshSettings {
    /// Size of each voxel in world units.
    pub voxel_size: f32,
    /// World position of the chunk's minimum corner.
    pub origin: [f32; 3],
}

impl MeshSettings {
    pub fn with_voxel_size(mut self, voxel_size: f32) -> Self {
        self.voxel_size = voxel_size;
        self
    }

    pub fn with_origin(mut self, origin: [f32; 3]) -> Self {
        self.origin = origin;
        self
    }

    /// Reject sizes and origins that would produce non-finite geometry.
    pub fn validate(&self) -> Result<()> {
        if !self.voxel_size.is_finite() || self.voxel_size <= 0.0 {
            return Err(MeshError::InvalidSettings("voxel_size must be finite and > 0".into()));
        }
        if self.origin.iter().any(|c| !c.is_finite()) {
            return Err(MeshError::InvalidSettings("origin must be finite".into()));
        }
        Ok(())
    }
}

impl Default for MeshSettings {
    /// Unit voxels at the origin: positions come out in grid space.
    fn default() -> Self {
        Self {
            voxel_size: 1.0,
            origin: [0.0; 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diameter_validation() {
        for d in [1, 2, 4, 8, 16, 32] {
            assert!(validate_diameter(d).is_ok(), "diameter {} should be accepted", d);
        }
        for d in [0, 3, 6, 33, 48, 64] {
            assert_eq!(
                validate_diameter(d),
                Err(MeshError::InvalidDimension { diameter: d, max: 32 }),
            );
        }
    }

    #[test]
    fn grid_set_get() {
        let mut grid = OccupancyGrid::new(8).unwrap();
        grid.set(1, 2, 3, true);

        assert!(grid.is_solid(1, 2, 3));
        assert!(!grid.is_solid(3, 2, 1));
        assert_eq!(grid.index(1, 2, 3), 64 + 16 + 3);
        assert_eq!(grid.solid_count(), 1);

        grid.set(1, 2, 3, false);
        assert!(grid.is_empty());
    }

    #[test]
    fn grid_outside_is_empty() {
        let mut grid = OccupancyGrid::new(2).unwrap();
        grid.set(0, 0, 0, true);

        assert!(grid.is_solid_signed(0, 0, 0));
        assert!(!grid.is_solid_signed(-1, 0, 0));
        assert!(!grid.is_solid_signed(0, 2, 0));
    }

    #[test]
    fn grid_try_set_rejects_wrapping_coordinate() {
        let mut grid = OccupancyGrid::new(4).unwrap();

        assert_eq!(
            grid.try_set(0, 0, 4, true),
            Err(MeshError::CellOutOfBounds { cell: [0, 0, 4], diameter: 4 }),
        );
        assert!(!grid.is_solid(0, 1, 0));
        assert!(grid.is_empty());

        assert_eq!(grid.try_set(3, 3, 3, true), Ok(()));
        assert!(grid.is_solid(3, 3, 3));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn grid_set_panics_outside_chunk() {
        let mut grid = OccupancyGrid::new(4).unwrap();
        grid.set(0, 0, 4, true);
    }

    #[test]
    fn grid_from_cells_checks_length() {
        assert_eq!(
            OccupancyGrid::from_cells(2, vec![false; 7]),
            Err(MeshError::GridSizeMismatch { expected: 8, actual: 7 }),
        );
        assert!(OccupancyGrid::from_cells(2, vec![true; 8]).is_ok());
    }

    #[test]
    fn solid_cells_order() {
        let mut grid = OccupancyGrid::new(4).unwrap();
        grid.set(3, 0, 1, true);
        grid.set(0, 2, 3, true);

        let cells: Vec<_> = grid.solid_cells().collect();
        assert_eq!(cells, vec![[0, 2, 3], [3, 0, 1]]);
    }

    #[test]
    fn layouts_are_right_handed() {
        for (face, layout) in FACE_LAYOUTS.iter().enumerate() {
            assert_eq!(layout.axis, face / 2);
            assert_eq!(layout.depth_axis, (layout.axis + 1) % 3);
            assert_eq!(layout.width_axis, (layout.axis + 2) % 3);
            assert_eq!(layout.flip_winding, face % 2 == 1);

            let sign = if layout.flip_winding { -1.0 } else { 1.0 };
            let mut expected = [0.0; 3];
            expected[layout.axis] = sign;
            assert_eq!(layout.normal, expected, "face {}", FACE_NAMES[face]);
        }
    }

    #[test]
    fn quad_cells_follow_layout() {
        let quad = Quad { face: FACE_POS_Y, layer: 5, depth: 1, width: 2, depth_len: 2, width_len: 3 };

        // +Y: layer on Y, depth on Z, width on X
        assert_eq!(quad.min_cell(), [2, 5, 1]);
        assert_eq!(quad.area(), 6);

        let cells: Vec<_> = quad.cells().collect();
        assert_eq!(cells.len(), 6);
        assert!(cells.contains(&[4, 5, 2]));
        assert!(cells.iter().all(|c| c[1] == 5));
    }

    #[test]
    fn mesh_output_counts() {
        let mut mesh = MeshOutput::default();
        assert_eq!(mesh.vertex_count(), 0);
        assert!(mesh.is_empty());

        mesh.positions.extend_from_slice(&[0.0; 12]);
        mesh.normals.extend_from_slice(&[0.0; 12]);
        mesh.indices.extend_from_slice(&[0, 1, 2, 0, 2, 3]);

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.quad_count(), 1);
        assert_eq!(mesh.interleaved().len(), 4);
        assert_eq!(mesh.position_bytes().len(), 48);
        assert_eq!(mesh.index_bytes().len(), 24);

        mesh.clear();
        assert!(mesh.is_empty());
    }

    #[test]
    fn settings_validation() {
        assert!(MeshSettings::default().validate().is_ok());
        assert!(MeshSettings::default().with_voxel_size(0.0).validate().is_err());
        assert!(MeshSettings::default().with_voxel_size(f32::NAN).validate().is_err());
        assert!(MeshSettings::default().with_origin([0.0, f32::INFINITY, 0.0]).validate().is_err());
    }
}
