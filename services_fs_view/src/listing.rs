//! Directory listing
//!
//! Flattens a directory into relative file paths, shallow or depth-first.

use fs_view::NodeHandle;
use services_storage::TreeProvider;
use tracing::warn;

/// Lists the files below a resolved node
///
/// Shallow listings report the bare names of the node's files and skip its
/// subdirectories. Recursive listings descend into every subdirectory and
/// report `dir/sub/name` paths relative to the node; an empty directory
/// contributes nothing. Order follows the provider's enumeration order.
///
/// A subtree that cannot be enumerated (typically because it vanished after
/// resolution) contributes nothing and the rest of the listing continues.
/// A file node lists as empty.
pub fn list_node<P: TreeProvider>(
    provider: &P,
    handle: &NodeHandle<P::Node>,
    recursive: bool,
) -> Vec<String> {
    let mut files = Vec::new();
    if handle.is_directory() {
        collect(provider, handle.node(), recursive, "", &mut files);
    }
    files
}

fn collect<P: TreeProvider>(
    provider: &P,
    dir: &P::Node,
    recursive: bool,
    prefix: &str,
    files: &mut Vec<String>,
) {
    let children = match provider.children(dir) {
        Ok(children) => children,
        Err(e) => {
            warn!(prefix, error = %e, "Skipping subtree that could not be enumerated");
            return;
        }
    };

    for child in children {
        if child.kind.is_file() {
            files.push(join(prefix, &child.name));
        } else if recursive {
            let sub_prefix = join(prefix, &child.name);
            collect(provider, &child.node, recursive, &sub_prefix, files);
        }
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", prefix, name)
    }
}
