//! Scan root discovery
//!
//! Windows scans every drive letter that answers, macOS scans `/` plus each
//! mount under `/Volumes`, other systems scan `/`. If nothing can be
//! enumerated the primary volume is returned so a scan always has a root.

use std::io;
use std::path::{Path, PathBuf};

/// Roots to scan on this machine
pub async fn enumerate_volumes() -> Vec<PathBuf> {
    match platform_volumes().await {
        Ok(roots) if !roots.is_empty() => {
            tracing::debug!(?roots, "Enumerated volumes");
            roots
        }
        Ok(_) => {
            tracing::warn!("No volumes found, using primary volume");
            vec![primary_volume()]
        }
        Err(e) => {
            tracing::warn!(error = %e, "Volume enumeration failed, using primary volume");
            vec![primary_volume()]
        }
    }
}

/// Root of the system volume
pub fn primary_volume() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from("C:\\")
    } else {
        PathBuf::from("/")
    }
}

/// Entries of a mount directory such as `/Volumes`, sorted
pub async fn mounted_under(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut mounts = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        mounts.push(entry.path());
    }
    mounts.sort();
    Ok(mounts)
}

#[cfg(windows)]
async fn platform_volumes() -> io::Result<Vec<PathBuf>> {
    let mut drives = Vec::new();
    for letter in b'A'..=b'Z' {
        let root = PathBuf::from(format!("{}:\\", char::from(letter)));
        if tokio::fs::metadata(&root).await.is_ok() {
            drives.push(root);
        }
    }
    Ok(drives)
}

#[cfg(target_os = "macos")]
async fn platform_volumes() -> io::Result<Vec<PathBuf>> {
    let mut roots = vec![PathBuf::from("/")];
    match mounted_under(Path::new("/Volumes")).await {
        Ok(mounts) => roots.extend(mounts),
        Err(e) => tracing::warn!(error = %e, "Cannot read /Volumes"),
    }
    Ok(roots)
}

#[cfg(not(any(windows, target_os = "macos")))]
async fn platform_volumes() -> io::Result<Vec<PathBuf>> {
    Ok(vec![PathBuf::from("/")])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn always_returns_a_root() {
        let roots = enumerate_volumes().await;
        assert!(!roots.is_empty());
        if cfg!(not(windows)) {
            assert_eq!(roots[0], PathBuf::from("/"));
        }
    }

    #[tokio::test]
    async fn mounted_under_lists_children() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("Backup")).unwrap();
        std::fs::create_dir(temp.path().join("Archive")).unwrap();

        let mounts = mounted_under(temp.path()).await.unwrap();
        assert_eq!(
            mounts,
            vec![temp.path().join("Archive"), temp.path().join("Backup")]
        );
    }

    #[tokio::test]
    async fn mounted_under_missing_dir_fails() {
        let temp = TempDir::new().unwrap();
        assert!(mounted_under(&temp.path().join("nope")).await.is_err());
    }
}
