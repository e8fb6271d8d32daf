//! Output directory and file lifecycle.
//!
//! Every task writes into a uniquely named temp file inside the output
//! directory and atomically renames it to its final name on success. A temp
//! file that is never finalized is removed on drop, so a failed task leaves
//! nothing behind.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Prefix for in-progress output files.
pub const TEMP_PREFIX: &str = ".batchrun-";

/// Temp file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Creates `dir` (and parents) if it does not exist.
/// Returns `true` if the directory was created by this call.
pub fn ensure_output_dir(dir: &Path) -> io::Result<bool> {
    if dir.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(dir)?;
    tracing::info!(path = %dir.display(), "created output directory");
    Ok(true)
}

/// File being written into the output directory. Call `finalize` to move it
/// to its final name; dropping it without finalizing deletes the temp file.
pub struct OutputFile {
    tmp: NamedTempFile,
    final_path: PathBuf,
}

impl OutputFile {
    /// Create a temp file in `dir` that will become `dir/name` on finalize.
    pub fn create(dir: &Path, name: &str) -> io::Result<Self> {
        let tmp = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(TEMP_SUFFIX)
            .tempfile_in(dir)?;
        Ok(OutputFile {
            tmp,
            final_path: dir.join(name),
        })
    }

    /// Path the file will have after `finalize`.
    pub fn final_path(&self) -> &Path {
        &self.final_path
    }

    /// Path to the current temp file.
    pub fn temp_path(&self) -> &Path {
        self.tmp.path()
    }

    /// Flush and sync the data, then atomically rename the temp file to the
    /// final path, replacing any existing file there.
    pub fn finalize(mut self) -> io::Result<PathBuf> {
        self.tmp.flush()?;
        self.tmp.as_file().sync_all()?;
        self.tmp
            .persist(&self.final_path)
            .map_err(|e| e.error)?;
        Ok(self.final_path)
    }
}

impl Write for OutputFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.tmp.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.tmp.flush()
    }
}
