//! File access confined to one base directory.

use std::io::Write;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Resolves caller-supplied paths against a base directory and refuses any
/// that would land outside it, including through `..` or symlinks.
#[derive(Clone, Debug)]
pub struct SafeFs {
    base: PathBuf,
}

impl SafeFs {
    /// The base must exist. It is canonicalized once so later containment
    /// checks compare like with like.
    pub fn new(base: impl AsRef<Path>) -> Result<Self> {
        let base = base.as_ref();
        let base = std::fs::canonicalize(base).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("{}: {}", e, base.display()),
            ))
        })?;
        Ok(Self { base })
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Joins `path` onto the base (absolute paths are taken as-is) and
    /// normalizes `.` and `..` lexically. The result must stay under the base.
    pub fn resolve(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();
        let joined = self.base.join(path);
        let mut resolved = PathBuf::new();
        for component in joined.components() {
            match component {
                Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                    resolved.push(component.as_os_str());
                }
                Component::CurDir => {}
                Component::ParentDir => {
                    resolved.pop();
                }
            }
        }
        if !resolved.starts_with(&self.base) {
            return Err(self.outside(path));
        }
        Ok(resolved)
    }

    /// Like [`resolve`](Self::resolve), then follows symlinks of the
    /// existing part of the path and checks again.
    fn resolve_existing(&self, path: &Path) -> Result<PathBuf> {
        let resolved = self.resolve(path)?;
        let real = std::fs::canonicalize(&resolved).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("{}: {}", e, resolved.display()),
            ))
        })?;
        if !real.starts_with(&self.base) {
            return Err(self.outside(path));
        }
        Ok(real)
    }

    pub fn read(&self, path: impl AsRef<Path>) -> Result<Vec<u8>> {
        let real = self.resolve_existing(path.as_ref())?;
        Ok(std::fs::read(real)?)
    }

    pub fn read_to_string(&self, path: impl AsRef<Path>) -> Result<String> {
        let real = self.resolve_existing(path.as_ref())?;
        Ok(std::fs::read_to_string(real)?)
    }

    /// Creates `path` and any missing parents, all inside the base.
    pub fn mkdir_recursive(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let resolved = self.resolve(path.as_ref())?;
        std::fs::create_dir_all(&resolved)?;
        let real = std::fs::canonicalize(&resolved)?;
        if !real.starts_with(&self.base) {
            return Err(self.outside(path.as_ref()));
        }
        Ok(real)
    }

    /// Writes through a temporary file in the target directory and renames
    /// it into place, so readers never observe a partial file.
    pub fn write(&self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Result<PathBuf> {
        let path = path.as_ref();
        let resolved = self.resolve(path)?;
        let Some(file_name) = resolved.file_name().map(|n| n.to_os_string()) else {
            return Err(self.outside(path));
        };
        let parent = match resolved.parent() {
            Some(parent) => self.mkdir_recursive(parent)?,
            None => return Err(self.outside(path)),
        };
        let target = parent.join(file_name);

        let mut tmp = tempfile::NamedTempFile::new_in(&parent)?;
        tmp.write_all(contents.as_ref())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&target).map_err(|e| Error::Io(e.error))?;
        log::debug!("Wrote {}", target.display());
        Ok(target)
    }

    fn outside(&self, path: &Path) -> Error {
        Error::PathOutsideBase {
            path: path.to_path_buf(),
            base: self.base.clone(),
        }
    }
}
