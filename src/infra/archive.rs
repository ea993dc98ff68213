//! Archive extraction
//!
//! Unpacks gzip-compressed tarballs in-process.

use flate2::read::GzDecoder;
use std::fs::File;
use std::io;
use std::path::Path;

/// Extract a `.tar.gz` archive into `dest_dir`
///
/// The archive's top-level directory lands directly under `dest_dir`.
pub fn extract_tar_gz(archive: &Path, dest_dir: &Path) -> io::Result<()> {
    let file = File::open(archive)?;
    std::fs::create_dir_all(dest_dir)?;
    tar::Archive::new(GzDecoder::new(file)).unpack(dest_dir)
}
