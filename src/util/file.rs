use chrono::{DateTime, Local};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use crate::config::constants;

/// Size and modification time of a file
#[derive(Debug, Clone)]
pub struct FileInfo {
    pub path: PathBuf,
    pub size: u64,
    pub modified: DateTime<Local>,
}

impl FileInfo {
    pub fn read(path: &Path) -> io::Result<Self> {
        let metadata = fs::metadata(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            size: metadata.len(),
            modified: DateTime::<Local>::from(metadata.modified()?),
        })
    }

    pub fn modified_display(&self) -> String {
        self.modified.format(constants::TIMESTAMP_FORMAT).to_string()
    }
}

/// Create `dir` (and parents) if needed. Returns whether it was created.
pub fn ensure_dir(dir: &Path) -> io::Result<bool> {
    if dir.is_dir() {
        debug!("Directory already exists: {:?}", dir);
        return Ok(false);
    }
    fs::create_dir_all(dir)?;
    debug!("Created directory: {:?}", dir);
    Ok(true)
}

/// Names of the entries in `dir`, sorted
pub fn list_names(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        names.push(entry?.file_name().to_string_lossy().to_string());
    }
    names.sort();
    Ok(names)
}

/// Move `from` to `to`, replacing any existing file at `to`
pub fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            debug!("Rename across devices, copying {:?} to {:?}", from, to);
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
        Err(e) => Err(e),
    }
}

/// Path of `name` inside `dir`, only when `name` is a single plain file name
pub fn resolve_in_dir(dir: &Path, name: &str) -> Option<PathBuf> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(file_name)), None) => Some(dir.join(file_name)),
        _ => None,
    }
}

/// Delete the regular file `name` inside `dir`. Returns false when there is
/// no such file.
pub fn remove_file_in(dir: &Path, name: &str) -> io::Result<bool> {
    let Some(target) = resolve_in_dir(dir, name) else {
        debug!("Refusing to resolve {:?} outside {:?}", name, dir);
        return Ok(false);
    };
    if !target.is_file() {
        return Ok(false);
    }
    fs::remove_file(&target)?;
    Ok(true)
}
