//! Binary greedy meshing for occupancy chunks up to 32³.
//!
//! Occupancy is packed into 32-bit words along each axis, face boundaries are
//! found with shift-and-mask tricks, and the resulting runs are greedily
//! merged into quads. A per-voxel culled mesher is included for comparison.
//!
//! # Example
//!
//! ```
//! use binary_mesher::{mesh_grid, MeshSettings, OccupancyGrid};
//!
//! let mut grid = OccupancyGrid::new(32).unwrap();
//! grid.set(16, 16, 16, true); // Single voxel at center
//!
//! let mesh = mesh_grid(&grid, &MeshSettings::default()).unwrap();
//! assert_eq!(mesh.triangle_count(), 12); // Cube = 6 faces × 2 triangles
//! ```

pub mod core;
pub mod error;
pub mod convert;
pub mod encode;
pub mod planes;
pub mod chain;
pub mod merge;
pub mod culled;
pub mod expand;
pub mod mesh;

// Re-export primary types
pub use crate::core::{
    OccupancyGrid,
    Quad,
    MeshOutput,
    MeshSettings,
    Vertex,
    FaceLayout,
    Sequence,
    validate_diameter,
    // Constants
    MAX_DIAMETER,
    AXIS_X, AXIS_Y, AXIS_Z,
    FACE_POS_X, FACE_NEG_X, FACE_POS_Y, FACE_NEG_Y, FACE_POS_Z, FACE_NEG_Z,
    FACE_LAYOUTS, FACE_NAMES,
};
pub use crate::error::{MeshError, Result};

// Re-export pipeline stages
pub use crate::encode::{encode_columns, AxisColumns};
pub use crate::planes::{build_face_planes, links, FacePlanes, Links};
pub use crate::chain::{chains, Chain, Chains};
pub use crate::merge::{greedy_merge, greedy_merge_plane};
pub use crate::culled::culled_quads;
pub use crate::expand::expand_quads;

// Re-export main entry points
pub use crate::mesh::{greedy_quads, mesh_grid, mesh_grid_culled, mesh_grid_with_stats, MeshStats};
pub use crate::convert::{dense_to_grid, positions_to_grid};
