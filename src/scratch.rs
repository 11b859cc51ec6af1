use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Per-run scratch files for the patched image.
///
/// `image` holds the flashable result of the patch sequence; `staging` is
/// the intermediate file between the slope and offset patches. Both are
/// overwritten on every iteration and left behind on failure so the
/// operator can inspect them.
#[derive(Debug, Clone)]
pub struct ScratchSpace {
    image: PathBuf,
    staging: PathBuf,
}

impl ScratchSpace {
    /// Names are derived from the wall clock once per run, e.g. `tmp1722945600`.
    pub fn new(dir: Option<&Path>) -> Self {
        let epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self::with_stem(dir, &format!("tmp{epoch}"))
    }

    pub fn with_stem(dir: Option<&Path>, stem: &str) -> Self {
        let base = dir.unwrap_or_else(|| Path::new(""));
        Self {
            image: base.join(stem),
            staging: base.join(format!("{stem}.0")),
        }
    }

    pub fn image(&self) -> &Path {
        &self.image
    }

    pub fn staging(&self) -> &Path {
        &self.staging
    }

    /// Best-effort removal; missing files are fine.
    pub fn cleanup(&self) {
        let _ = std::fs::remove_file(&self.image);
        let _ = std::fs::remove_file(&self.staging);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staging_name_extends_image_name() {
        let s = ScratchSpace::with_stem(None, "tmp123");
        assert_eq!(s.image(), Path::new("tmp123"));
        assert_eq!(s.staging(), Path::new("tmp123.0"));
    }

    #[test]
    fn test_cleanup_removes_both_and_tolerates_missing() {
        let dir = tempfile::tempdir().unwrap();
        let s = ScratchSpace::with_stem(Some(dir.path()), "tmp42");

        std::fs::write(s.image(), b"image").unwrap();
        s.cleanup();
        assert!(!s.image().exists());
        assert!(!s.staging().exists());

        // nothing on disk at all
        s.cleanup();
    }
}
