//! CMake invocation
//!
//! Builds the argument lists for the configure, build and install steps.

use crate::infra::tools::{BuildRequest, ConfigureRequest, InstallRequest};

/// CMake program name
pub const CMAKE: &str = "cmake";

/// `cmake -B <build> <defines...> -S <source>`
pub fn configure_args(request: &ConfigureRequest) -> Vec<String> {
    let mut args = vec!["-B".to_string(), request.build_dir.display().to_string()];
    args.extend(request.options.iter().map(|o| o.to_define()));
    args.push("-S".to_string());
    args.push(request.source_dir.display().to_string());
    args
}

/// `cmake --build <build> --config <type> -j <jobs>`
pub fn build_args(request: &BuildRequest) -> Vec<String> {
    vec![
        "--build".to_string(),
        request.build_dir.display().to_string(),
        "--config".to_string(),
        request.build_type.to_string(),
        "-j".to_string(),
        request.jobs.to_string(),
    ]
}

/// `cmake --build <build> --target install`
pub fn install_args(request: &InstallRequest) -> Vec<String> {
    vec![
        "--build".to_string(),
        request.build_dir.display().to_string(),
        "--target".to_string(),
        "install".to_string(),
    ]
}
