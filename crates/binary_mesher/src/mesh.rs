//! Main meshing pipeline.
//!
//! Orchestrates the complete meshing process:
//! 1. Column encoding (pack occupancy along each axis)
//! 2. Face planes (find visible faces, regroup by layer)
//! 3. Greedy merge (combine chains into quads)
//! 4. Quad expansion (convert quads to vertex arrays)

use crate::core::{MeshOutput, MeshSettings, OccupancyGrid, Quad, FACE_NAMES};
use crate::culled::culled_quads;
use crate::encode::encode_columns;
use crate::error::Result;
use crate::expand::expand_quads;
use crate::merge::greedy_merge;
use crate::planes::build_face_planes;

/// Run the binary greedy mesher up to quad output, indexed by face.
///
/// Also returns the number of visible unit faces before merging.
fn greedy_quads_counted(grid: &OccupancyGrid) -> ([Vec<Quad>; 6], usize) {
    // Early exit for empty grids
    if grid.is_empty() {
        return (Default::default(), 0);
    }

    let columns = encode_columns(grid);
    let mut planes = build_face_planes(&columns);
    let visible_faces = planes.total_faces();
    let quads = greedy_merge(&mut planes);

    (quads, visible_faces)
}

/// Merged quads for every direction, indexed by face.
pub fn greedy_quads(grid: &OccupancyGrid) -> [Vec<Quad>; 6] {
    greedy_quads_counted(grid).0
}

/// Mesh an occupancy grid into geometry (positions, normals, indices).
///
/// This is the main entry point for meshing.
///
/// # Example
/// ```
/// use binary_mesher::{mesh_grid, MeshSettings, OccupancyGrid};
///
/// let mut grid = OccupancyGrid::new(16).unwrap();
/// grid.set(8, 8, 8, true);
///
/// let mesh = mesh_grid(&grid, &MeshSettings::default()).unwrap();
/// assert_eq!(mesh.triangle_count(), 12);
/// ```
pub fn mesh_grid(grid: &OccupancyGrid, settings: &MeshSettings) -> Result<MeshOutput> {
    Ok(mesh_grid_with_stats(grid, settings)?.0)
}

/// Mesh with the per-voxel culled mesher instead of greedy merging.
///
/// Same output contract as [`mesh_grid`], one quad per visible unit face.
pub fn mesh_grid_culled(grid: &OccupancyGrid, settings: &MeshSettings) -> Result<MeshOutput> {
    settings.validate()?;
    let quads = culled_quads(grid);
    let mesh = expand_quads(&quads, settings);
    log::debug!(
        "culled mesh for {}³ chunk: {} quads",
        grid.diameter(),
        mesh.quad_count()
    );
    Ok(mesh)
}

/// Statistics about a mesh result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshStats {
    /// Total number of quads generated
    pub quad_count: usize,
    /// Quads per face direction, indexed by face
    pub quads_per_face: [usize; 6],
    /// Total vertices
    pub vertex_count: usize,
    /// Total triangles
    pub triangle_count: usize,
    /// Visible unit faces (quad count without merging)
    pub visible_faces: usize,
    /// Merge efficiency (1.0 = perfect merging, 0.0 = no merging)
    pub merge_efficiency: f32,
}

impl MeshStats {
    fn from_quads(quads: &[Vec<Quad>; 6], visible_faces: usize, mesh: &MeshOutput) -> Self {
        let quads_per_face: [usize; 6] = std::array::from_fn(|face| quads[face].len());
        let quad_count: usize = quads_per_face.iter().sum();

        let merge_efficiency = if visible_faces > 0 {
            1.0 - (quad_count as f32 / visible_faces as f32)
        } else {
            0.0
        };

        Self {
            quad_count,
            quads_per_face,
            vertex_count: mesh.vertex_count(),
            triangle_count: mesh.triangle_count(),
            visible_faces,
            merge_efficiency,
        }
    }
}

/// Mesh a grid and return statistics along with the mesh.
pub fn mesh_grid_with_stats(
    grid: &OccupancyGrid,
    settings: &MeshSettings,
) -> Result<(MeshOutput, MeshStats)> {
    settings.validate()?;

    let (quads, visible_faces) = greedy_quads_counted(grid);
    let mesh = expand_quads(&quads, settings);
    let stats = MeshStats::from_quads(&quads, visible_faces, &mesh);

    for (face, count) in stats.quads_per_face.iter().enumerate() {
        log::trace!("{} quads: {}", FACE_NAMES[face], count);
    }
    log::debug!(
        "meshed {}³ chunk: {} quads from {} faces (efficiency {:.2})",
        grid.diameter(),
        stats.quad_count,
        stats.visible_faces,
        stats.merge_efficiency
    );

    Ok((mesh, stats))
}
