//! WASM bindings for the binary mesher.
//!
//! Provides JavaScript-accessible functions for occupancy meshing. Input
//! validation errors surface as thrown JavaScript errors.

use wasm_bindgen::prelude::*;
use binary_mesher::{
    dense_to_grid, mesh_grid, mesh_grid_culled, mesh_grid_with_stats, positions_to_grid,
    MeshOutput, MeshSettings,
};

/// Mesh result returned to JavaScript.
///
/// Contains vertex data ready for use with Three.js BufferGeometry.
#[wasm_bindgen]
pub struct MeshResult {
    positions: Vec<f32>,
    normals: Vec<f32>,
    indices: Vec<u32>,
    vertex_buffer: Vec<u8>,
}

#[wasm_bindgen]
impl MeshResult {
    /// Get vertex positions (3 floats per vertex).
    #[wasm_bindgen(getter)]
    pub fn positions(&self) -> Vec<f32> {
        self.positions.clone()
    }

    /// Get vertex normals (3 floats per vertex).
    #[wasm_bindgen(getter)]
    pub fn normals(&self) -> Vec<f32> {
        self.normals.clone()
    }

    /// Get triangle indices.
    #[wasm_bindgen(getter)]
    pub fn indices(&self) -> Vec<u32> {
        self.indices.clone()
    }

    /// Interleaved position + normal bytes (24 bytes per vertex).
    #[wasm_bindgen(getter)]
    pub fn vertex_buffer(&self) -> Vec<u8> {
        self.vertex_buffer.clone()
    }

    /// Number of vertices in the mesh.
    #[wasm_bindgen(getter)]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of triangles in the mesh.
    #[wasm_bindgen(getter)]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether the mesh is empty (no geometry).
    #[wasm_bindgen(getter)]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl From<MeshOutput> for MeshResult {
    fn from(output: MeshOutput) -> Self {
        let vertices = output.interleaved();
        let vertex_buffer: Vec<u8> = bytemuck::cast_slice(vertices.as_slice()).to_vec();
        Self {
            positions: output.positions,
            normals: output.normals,
            indices: output.indices,
            vertex_buffer,
        }
    }
}

/// Mesh statistics for debugging.
#[wasm_bindgen]
pub struct MeshStats {
    quad_count: usize,
    visible_faces: usize,
    vertex_count: usize,
    triangle_count: usize,
    merge_efficiency: f32,
    quads_per_face: [usize; 6],
}

#[wasm_bindgen]
impl MeshStats {
    #[wasm_bindgen(getter)]
    pub fn quad_count(&self) -> usize { self.quad_count }

    #[wasm_bindgen(getter)]
    pub fn visible_faces(&self) -> usize { self.visible_faces }

    #[wasm_bindgen(getter)]
    pub fn vertex_count(&self) -> usize { self.vertex_count }

    #[wasm_bindgen(getter)]
    pub fn triangle_count(&self) -> usize { self.triangle_count }

    #[wasm_bindgen(getter)]
    pub fn merge_efficiency(&self) -> f32 { self.merge_efficiency }

    /// Per-direction quad counts as [+X, -X, +Y, -Y, +Z, -Z].
    #[wasm_bindgen(getter)]
    pub fn quads_per_face(&self) -> Vec<usize> { self.quads_per_face.to_vec() }
}

impl From<binary_mesher::MeshStats> for MeshStats {
    fn from(stats: binary_mesher::MeshStats) -> Self {
        Self {
            quad_count: stats.quad_count,
            visible_faces: stats.visible_faces,
            vertex_count: stats.vertex_count,
            triangle_count: stats.triangle_count,
            merge_efficiency: stats.merge_efficiency,
            quads_per_face: stats.quads_per_face,
        }
    }
}

fn mesh_settings(voxel_size: f32, origin_x: f32, origin_y: f32, origin_z: f32) -> MeshSettings {
    MeshSettings::default()
        .with_voxel_size(voxel_size)
        .with_origin([origin_x, origin_y, origin_z])
}

fn mesh_occupancy_impl(
    occupancy: &[u8],
    diameter: usize,
    settings: &MeshSettings,
    culled: bool,
) -> binary_mesher::Result<MeshOutput> {
    let grid = dense_to_grid(diameter, occupancy)?;
    log(&format!("meshing {}³ chunk, {} solid", diameter, grid.solid_count()));
    if culled {
        mesh_grid_culled(&grid, settings)
    } else {
        mesh_grid(&grid, settings)
    }
}

fn mesh_occupancy_stats_impl(
    occupancy: &[u8],
    diameter: usize,
    settings: &MeshSettings,
) -> binary_mesher::Result<(MeshOutput, binary_mesher::MeshStats)> {
    let grid = dense_to_grid(diameter, occupancy)?;
    log(&format!("meshing {}³ chunk with stats, {} solid", diameter, grid.solid_count()));
    mesh_grid_with_stats(&grid, settings)
}

/// Mesh a dense occupancy grid.
///
/// # Arguments
/// * `occupancy` - One byte per cell (0 = empty), x outer, y middle, z inner
/// * `diameter` - Cube side length: a power of two up to 32
/// * `voxel_size` - Size of each voxel in world units
/// * `origin_x`, `origin_y`, `origin_z` - World position offset
///
/// # Example (JavaScript)
/// ```javascript
/// const occupancy = new Uint8Array(32 * 32 * 32);
/// occupancy.fill(1); // All solid
/// const result = mesh_occupancy(occupancy, 32, 1.0, 0.0, 0.0, 0.0);
/// ```
#[wasm_bindgen]
pub fn mesh_occupancy(
    occupancy: &[u8],
    diameter: u32,
    voxel_size: f32,
    origin_x: f32,
    origin_y: f32,
    origin_z: f32,
) -> Result<MeshResult, JsError> {
    let settings = mesh_settings(voxel_size, origin_x, origin_y, origin_z);
    let output = mesh_occupancy_impl(occupancy, diameter as usize, &settings, false)?;
    Ok(output.into())
}

/// Mesh a dense occupancy grid with the per-voxel culled mesher.
///
/// Produces one quad per visible face; useful to compare against
/// `mesh_occupancy`.
#[wasm_bindgen]
pub fn mesh_occupancy_culled(
    occupancy: &[u8],
    diameter: u32,
    voxel_size: f32,
    origin_x: f32,
    origin_y: f32,
    origin_z: f32,
) -> Result<MeshResult, JsError> {
    let settings = mesh_settings(voxel_size, origin_x, origin_y, origin_z);
    let output = mesh_occupancy_impl(occupancy, diameter as usize, &settings, true)?;
    Ok(output.into())
}

/// Mesh a dense occupancy grid and return `[MeshResult, MeshStats]`.
#[wasm_bindgen]
pub fn mesh_occupancy_with_stats(
    occupancy: &[u8],
    diameter: u32,
    voxel_size: f32,
    origin_x: f32,
    origin_y: f32,
    origin_z: f32,
) -> Result<js_sys::Array, JsError> {
    let settings = mesh_settings(voxel_size, origin_x, origin_y, origin_z);
    let (output, stats) = mesh_occupancy_stats_impl(occupancy, diameter as usize, &settings)?;

    let result = js_sys::Array::new();
    result.push(&JsValue::from(MeshResult::from(output)));
    result.push(&JsValue::from(MeshStats::from(stats)));
    Ok(result)
}

/// Mesh voxel center positions.
///
/// Positions outside the `diameter`³ chunk placed at the origin are ignored.
///
/// # Example (JavaScript)
/// ```javascript
/// const positions = new Float32Array([0.5, 0.5, 0.5, 1.5, 0.5, 0.5]);
/// const result = mesh_voxel_positions(positions, 32, 1.0, 0.0, 0.0, 0.0);
/// ```
#[wasm_bindgen]
pub fn mesh_voxel_positions(
    positions: &[f32],
    diameter: u32,
    voxel_size: f32,
    origin_x: f32,
    origin_y: f32,
    origin_z: f32,
) -> Result<MeshResult, JsError> {
    let settings = mesh_settings(voxel_size, origin_x, origin_y, origin_z);
    let grid = positions_to_grid(diameter as usize, positions, &settings)?;
    let output = mesh_grid(&grid, &settings)?;
    Ok(output.into())
}

// Logging support

thread_local! {
    static LOG_ENABLED: std::cell::Cell<bool> = std::cell::Cell::new(false);
}

/// Forwards `log` records from the mesher library to the browser console.
struct ConsoleLogger;

static CONSOLE_LOGGER: ConsoleLogger = ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        LOG_ENABLED.with(|enabled| enabled.get())
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = format!("[{}] {}: {}", record.level(), record.target(), record.args());
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&message.into()),
            log::Level::Warn => web_sys::console::warn_1(&message.into()),
            _ => web_sys::console::log_1(&message.into()),
        }
    }

    fn flush(&self) {}
}

/// Enable or disable console logging.
///
/// Enabling also routes the mesher's `log` records (debug and above) to the
/// console.
#[wasm_bindgen]
pub fn set_log_enabled(enabled: bool) {
    LOG_ENABLED.with(|flag| flag.set(enabled));
    if enabled {
        // Fails only if a logger is already installed; keep that one.
        let _ = log::set_logger(&CONSOLE_LOGGER);
        log::set_max_level(log::LevelFilter::Debug);
    } else {
        log::set_max_level(log::LevelFilter::Off);
    }
}

fn log(message: &str) {
    if LOG_ENABLED.with(|enabled| enabled.get()) {
        web_sys::console::log_1(&message.into());
    }
}

/// Get the version of the mesher library.
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
