//! Git operations
//!
//! Shallow, single-revision clones with recursive shallow submodules,
//! performed by the `git` command-line client.

use crate::infra::tools::CloneRequest;

/// Git program name
pub const GIT: &str = "git";

/// Arguments for a shallow clone of `request.tag` into `request.dest`
pub fn clone_args(request: &CloneRequest) -> Vec<String> {
    let mut args = vec!["clone".to_string(), "--recurse-submodules".to_string()];
    if let Some(tag) = &request.tag {
        args.push("-b".to_string());
        args.push(tag.clone());
    }
    args.extend([
        "--depth".to_string(),
        "1".to_string(),
        "--shallow-submodules".to_string(),
        request.url.clone(),
        request.dest.display().to_string(),
    ]);
    args
}
