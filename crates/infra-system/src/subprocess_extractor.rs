// Subprocess extractor - runs the real extraction binary
// tokio::process for async child supervision

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use mmap_batch_core::domain::Invocation;
use mmap_batch_core::port::{Extractor, LaunchError};

/// Opens the child in its own console window so concurrent extractions stay
/// visually distinguishable (Windows only)
#[cfg(windows)]
const CREATE_NEW_CONSOLE: u32 = 0x0000_0010;

/// The extraction binary sits next to the launcher's working directory; only
/// its name differs by platform, the invocation contract is identical.
fn extractor_binary() -> &'static str {
    if cfg!(windows) {
        "mmap-extractor.exe"
    } else {
        "./mmap-extractor"
    }
}

/// Extractor adapter that spawns one `mmap-extractor` process per invocation
/// and waits for it to exit.
///
/// The child inherits stdout/stderr: extraction output belongs to the
/// operator's console and is never captured or interpreted here. Exit codes
/// are likewise opaque to the launcher.
pub struct SubprocessExtractor {
    separate_console: bool,
}

impl SubprocessExtractor {
    pub fn new(separate_console: bool) -> Self {
        Self { separate_console }
    }

    fn build_command(&self, invocation: &Invocation) -> Command {
        let mut command = Command::new(extractor_binary());
        command.args(&invocation.args);

        // No-op off Windows; there is no separate-console concept to request
        if self.separate_console {
            #[cfg(windows)]
            command.creation_flags(CREATE_NEW_CONSOLE);
        }

        command
    }
}

#[async_trait]
impl Extractor for SubprocessExtractor {
    async fn run(&self, invocation: &Invocation) -> Result<(), LaunchError> {
        debug!(
            map_id = invocation.map_id,
            program = extractor_binary(),
            args = ?invocation.args,
            "Spawning extractor"
        );

        let mut child = self
            .build_command(invocation)
            .spawn()
            .map_err(|e| LaunchError::SpawnFailed(e.to_string()))?;

        // Exit status is deliberately not inspected; the extraction's own
        // success or failure stays with the operator
        let _ = child
            .wait()
            .await
            .map_err(|e| LaunchError::Io(e.to_string()))?;

        debug!(map_id = invocation.map_id, "Extractor exited");

        Ok(())
    }
}
