//! Output directory layout
//!
//! Each input is written to its own relative path under the output root, so
//! `a/store.ts` and `b/store.ts` never land on the same file. Two inputs that
//! still map to one target (`./x.ts` and `x.ts`) are rejected, as is any
//! input path that would climb out of the root.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use crate::errors::{Result, TransformError};

pub struct OutputTree {
    root: PathBuf,
    claimed: HashSet<PathBuf>,
}

impl OutputTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            claimed: HashSet::new(),
        }
    }

    /// Mirror of `input` under the root; root and prefix components are dropped
    pub fn target_for(&self, input: &Path) -> Result<PathBuf> {
        let mut relative = PathBuf::new();
        for component in input.components() {
            match component {
                Component::Normal(part) => relative.push(part),
                Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
                Component::ParentDir => {
                    return Err(TransformError::output(
                        input.display().to_string(),
                        "'..' would place the output outside the output directory",
                    ))
                }
            }
        }
        if relative.as_os_str().is_empty() {
            return Err(TransformError::output(
                input.display().to_string(),
                "input path has no file name",
            ));
        }
        Ok(self.root.join(relative))
    }

    /// Reserve the target for `input`; a second claim on the same target fails
    pub fn claim(&mut self, input: &Path) -> Result<PathBuf> {
        let target = self.target_for(input)?;
        if !self.claimed.insert(target.clone()) {
            return Err(TransformError::output(
                input.display().to_string(),
                format!("another input is already written to {}", target.display()),
            ));
        }
        Ok(target)
    }

    /// Claim the target and write `contents` to it, creating parent directories
    pub fn write(&mut self, input: &Path, contents: &str) -> Result<PathBuf> {
        let target = self.claim(input)?;
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&target, contents)?;
        debug!("wrote {}", target.display());
        Ok(target)
    }
}
