use std::io::{self, Write};
use std::path::Path;

use tempfile::{NamedTempFile, TempDir};

/// Temporary file holding one artifact's bytes, deleted on drop on every
/// exit path. The suffix keeps the artifact's extension so external tools
/// see a realistic path.
pub struct ScratchFile {
    inner: NamedTempFile,
}

impl ScratchFile {
    pub fn write(bytes: &[u8], suffix: &str) -> io::Result<Self> {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile()?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(Self { inner: file })
    }

    pub fn path(&self) -> &Path {
        self.inner.path()
    }
}

/// Temporary directory for archive extraction. Deletion on drop is recursive
/// and tolerates whatever the untrusted archive populated it with.
pub struct ScratchDir {
    inner: TempDir,
}

impl ScratchDir {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            inner: tempfile::tempdir()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.inner.path()
    }
}

/// Suffix for a scratch file, e.g. ".py" for "src/main.py". Empty when the
/// name has no extension.
pub fn extension_suffix(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn scratch_file_is_deleted_on_drop() {
        let path: PathBuf;
        {
            let scratch = ScratchFile::write(b"print('hi')", ".py").unwrap();
            path = scratch.path().to_path_buf();
            assert!(path.exists());
            assert!(path.to_string_lossy().ends_with(".py"));
        }
        assert!(!path.exists());
    }

    #[test]
    fn scratch_dir_is_deleted_recursively() {
        let path: PathBuf;
        {
            let scratch = ScratchDir::new().unwrap();
            path = scratch.path().to_path_buf();
            fs::create_dir_all(path.join("nested/deeply")).unwrap();
            fs::write(path.join("nested/deeply/file.py"), b"x = 1").unwrap();
        }
        assert!(!path.exists());
    }

    #[test]
    fn extension_suffix_handles_missing_extension() {
        assert_eq!(extension_suffix("src/main.py"), ".py");
        assert_eq!(extension_suffix("LICENSE"), "");
    }
}
