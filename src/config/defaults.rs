//! Default configuration values

/// Default root directory for the operation
pub const DEFAULT_ROOT_DIR: &str = ".";

/// Default download directory, relative to the root directory
pub const DEFAULT_DOWNLOAD_DIR: &str = "download";

/// Default shared install prefix, relative to the root directory
pub const DEFAULT_INSTALL_DIR: &str = "ext_libs/install";

/// Default build output directory of the consuming project
pub const DEFAULT_BUILD_OUTPUT_DIR: &str = "build";

/// Default C compiler
pub const DEFAULT_C_COMPILER: &str = "gcc";

/// Default C++ compiler
pub const DEFAULT_CPP_COMPILER: &str = "g++";

/// Default number of parallel build jobs
pub const DEFAULT_CORES_TO_USE: usize = 8;

/// Build directory inside an extracted source tree
pub const DEFAULT_BUILD_SUBDIR: &str = "build";

/// C++ standard requested from every C++ dependency
pub const CXX_STANDARD: u32 = 17;

/// Environment variables removed before any external tool runs
pub const INTERFERING_ENV_VARS: &[&str] = &["SDKROOT", "CPATH", "LIBRARY_PATH"];
