//! Whole-file reads

use crate::operations::{ReadStrategy, TreeError};
use fs_view::NodeHandle;
use services_storage::{ByteStream, TreeProvider};
use std::io::Read;
use tracing::debug;

/// Reads the whole contents of a resolved file node
///
/// The stream is owned by this call and dropped on every exit path,
/// including failed reads.
pub fn read_node<P: TreeProvider>(
    provider: &P,
    handle: &NodeHandle<P::Node>,
    strategy: ReadStrategy,
) -> Result<Vec<u8>, TreeError> {
    let mut stream = provider
        .open_stream(handle.node())
        .map_err(|e| TreeError::StreamUnavailable(format!("{}: {}", handle.path(), e)))?;

    let read_failure = |e: std::io::Error| TreeError::ReadFailure(format!("{}: {}", handle.path(), e));
    let available = stream.available().map_err(read_failure)?;

    match strategy {
        ReadStrategy::ToCompletion => {
            let mut bytes = Vec::with_capacity(available);
            stream.read_to_end(&mut bytes).map_err(read_failure)?;
            Ok(bytes)
        }
        ReadStrategy::BoundedAvailable => {
            let mut bytes = vec![0u8; available];
            let read = stream.read(&mut bytes).map_err(read_failure)?;
            if read < available {
                debug!(path = handle.path(), available, read, "Short bounded read");
            }
            bytes.truncate(read);
            Ok(bytes)
        }
    }
}
