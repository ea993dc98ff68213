//! Upstream source URLs

/// Abseil release archive
pub const ABSEIL_URL: &str =
    "https://github.com/abseil/abseil-cpp/releases/download/20240722.0/abseil-cpp-20240722.0.tar.gz";

/// Protobuf release archive
pub const PROTOBUF_URL: &str =
    "https://github.com/protocolbuffers/protobuf/releases/download/v28.3/protobuf-28.3.tar.gz";

/// zlib tag archive
pub const ZLIB_URL: &str = "https://github.com/madler/zlib/archive/refs/tags/v1.3.tar.gz";

/// gRPC git repository
pub const GRPC_URL: &str = "https://github.com/grpc/grpc.git";

/// gRPC tag to check out
pub const GRPC_VERSION: &str = "v1.66.0";
