// Map Domain Model

/// Map identifier as used by the extraction binary (decimal, non-negative)
pub type MapId = u32;

/// The one map whose extraction needs the off-mesh connection data
pub const OFF_MESH_MAP: MapId = 0;

/// Auxiliary input file for [`OFF_MESH_MAP`], resolved relative to the
/// launcher's working directory
pub const OFF_MESH_FILE: &str = "offmesh.txt";
