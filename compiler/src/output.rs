//! Placement of generated files on disk.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::debug;

use crate::{compiler::Target, types::Message};

/// `<out_dir>[/<namespace segments>]/<struct_name>.<ext>`
pub fn output_path(out_dir: &Path, message: &Message, target: Target) -> PathBuf {
    let mut path = out_dir.to_path_buf();
    for segment in message.package_segments() {
        path.push(segment);
    }
    path.push(format!("{}.{}", message.struct_name, target.extension()));
    path
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Updated,
    Unchanged,
}

/// Write `contents` to `path` unless the file already holds exactly that
/// text. An unchanged file is not opened for writing, so its timestamp stays
/// put. Missing parent directories are created.
pub fn write_if_changed(path: &Path, contents: &str) -> io::Result<WriteOutcome> {
    let outcome = match fs::read(path) {
        Ok(existing) if existing == contents.as_bytes() => {
            debug!("{} is up to date", path.display());
            return Ok(WriteOutcome::Unchanged);
        }
        Ok(_) => WriteOutcome::Updated,
        Err(e) if e.kind() == io::ErrorKind::NotFound => WriteOutcome::Created,
        Err(e) => return Err(e),
    };

    if let Some(parent) = path.parent() {
        // create_dir_all succeeds when another writer created the path first.
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    debug!("{:?} {}", outcome, path.display());
    Ok(outcome)
}
