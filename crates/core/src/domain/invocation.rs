// Extractor Invocation Building

use super::map::{MapId, OFF_MESH_FILE, OFF_MESH_MAP};

/// Flag that keeps the extraction binary from prompting on its own console
pub const SILENT_FLAG: &str = "--silent";

/// Flag naming the off-mesh connection input file
pub const OFF_MESH_FLAG: &str = "--offMeshInput";

/// One concrete extractor invocation: the map it is for and the full
/// argument vector to pass to the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub map_id: MapId,
    pub args: Vec<String>,
}

impl Invocation {
    /// Build the argument vector for one map.
    ///
    /// Every map gets its identifier as decimal text plus the silent flag.
    /// Only [`OFF_MESH_MAP`] additionally gets `--offMeshInput offmesh.txt`;
    /// the off-mesh connections of every other map live on-path.
    pub fn for_map(map_id: MapId) -> Self {
        let mut args = vec![map_id.to_string(), SILENT_FLAG.to_string()];

        if map_id == OFF_MESH_MAP {
            args.push(OFF_MESH_FLAG.to_string());
            args.push(OFF_MESH_FILE.to_string());
        }

        Self { map_id, args }
    }

    pub fn has_off_mesh_input(&self) -> bool {
        self.args.iter().any(|a| a == OFF_MESH_FLAG)
    }
}
