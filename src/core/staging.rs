use crate::utils::error::{CmsError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Paths (relative to the site root) deployed with the site.
pub const WEB_ASSETS: &[&str] = &[
    "index.html",
    "css",
    "js",
    "images",
    "fonts",
    "robots.txt",
    "sitemap.xml",
    "_headers",
    "cms-data.json",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagingReport {
    pub copied_files: usize,
    pub skipped: Vec<String>,
}

pub struct AssetStager {
    allow_list: Vec<String>,
}

impl Default for AssetStager {
    fn default() -> Self {
        Self::new(WEB_ASSETS.iter().map(|s| s.to_string()).collect())
    }
}

impl AssetStager {
    pub fn new(allow_list: Vec<String>) -> Self {
        Self { allow_list }
    }

    /// 允許清單須包含快照檔名，否則 dist/ 不會帶上內容
    pub fn with_snapshot(mut self, snapshot_file: &str) -> Self {
        if !self.allow_list.iter().any(|p| p == snapshot_file) {
            self.allow_list.push(snapshot_file.to_string());
        }
        self
    }

    pub fn allow_list(&self) -> &[String] {
        &self.allow_list
    }

    /// Recreates `dist` and copies every allow-listed path that exists under `root`.
    ///
    /// `dist` must sit outside the site root's inputs: it may not be the root,
    /// one of its parents, or any allow-listed path.
    pub fn stage(&self, root: &Path, dist: &Path) -> Result<StagingReport> {
        let root = resolve(root)?;
        let dist = self.checked_dist(&root, dist)?;

        if dist.exists() {
            tracing::debug!("Removing previous output at {}", dist.display());
            fs::remove_dir_all(&dist)?;
        }
        fs::create_dir_all(&dist)?;

        let mut report = StagingReport::default();
        for item in &self.allow_list {
            let src = root.join(item);
            if !src.exists() {
                tracing::debug!("Skipping missing asset: {}", item);
                report.skipped.push(item.clone());
                continue;
            }
            report.copied_files += copy_tree(&src, &dist.join(item), &dist)?;
        }

        tracing::info!(
            "📦 {} populated with web assets ({} files, {} skipped)",
            dist.display(),
            report.copied_files,
            report.skipped.len()
        );
        Ok(report)
    }

    fn checked_dist(&self, root: &Path, dist: &Path) -> Result<PathBuf> {
        let dist = resolve(dist)?;

        let reason = if root.starts_with(&dist) {
            Some("output directory would replace the site root".to_string())
        } else {
            self.allow_list
                .iter()
                .find(|item| dist.starts_with(root.join(item)))
                .map(|item| format!("output directory overlaps the deployed asset '{}'", item))
        };

        match reason {
            Some(reason) => {
                tracing::error!("❌ Refusing to stage into {}: {}", dist.display(), reason);
                Err(CmsError::InvalidConfigValueError {
                    field: "dist".to_string(),
                    value: dist.display().to_string(),
                    reason,
                })
            }
            None => Ok(dist),
        }
    }
}

/// 將路徑轉成絕對路徑；尚未存在的尾段直接接在最近的既有上層之後
fn resolve(path: &Path) -> Result<PathBuf> {
    let mut existing = path;
    let mut missing = Vec::new();
    while !existing.as_os_str().is_empty() && !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => break,
        }
    }

    let mut resolved = if existing.as_os_str().is_empty() {
        std::env::current_dir()?
    } else {
        existing.canonicalize()?
    };
    for name in missing.iter().rev() {
        resolved.push(name);
    }
    Ok(resolved)
}

fn copy_tree(src: &Path, dest: &Path, skip: &Path) -> Result<usize> {
    if src == skip {
        return Ok(0);
    }
    if src.is_dir() {
        fs::create_dir_all(dest)?;
        let mut copied = 0;
        let mut children: Vec<PathBuf> = fs::read_dir(src)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<_>>()?;
        children.sort();

        for child in children {
            if let Some(name) = child.file_name() {
                copied += copy_tree(&child, &dest.join(name), skip)?;
            }
        }
        Ok(copied)
    } else {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(src, dest)?;
        Ok(1)
    }
}
