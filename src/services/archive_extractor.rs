use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;
use zip::ZipArchive;

use crate::config::constants::{ARCHIVE_EXTENSION, REVIEW_ERROR_MARKER, SKIPPED_FILENAME_SUFFIXES};
use crate::errors::{CodervetError, CodervetResult};
use crate::services::content_decoder;
use crate::services::scratch::{ScratchDir, ScratchFile};
use crate::structs::analysis_result::AnalysisResult;
use crate::structs::artifact::Artifact;

/// Archive members that survive filtering, plus placeholder results for
/// members that were deliberately skipped.
pub struct ExtractedBatch {
    pub artifacts: Vec<Artifact>,
    pub skipped: Vec<AnalysisResult>,
}

pub struct ArchiveExtractor {
    max_member_size: u64,
}

impl ArchiveExtractor {
    pub fn new(max_member_size: u64) -> Self {
        Self { max_member_size }
    }

    /// Archive inputs are rejected by name before any byte is read.
    pub fn ensure_zip_name(name: &str) -> CodervetResult<()> {
        if name.to_lowercase().ends_with(ARCHIVE_EXTENSION) {
            Ok(())
        } else {
            Err(CodervetError::UnsupportedArchive {
                name: name.to_string(),
            })
        }
    }

    /// Expands the archive into a scratch directory and enumerates its
    /// member files. A malformed archive is one request-level error; there is
    /// nothing meaningful to analyze in it.
    pub fn extract(&self, name: &str, bytes: &[u8]) -> CodervetResult<ExtractedBatch> {
        Self::ensure_zip_name(name)?;

        let scratch_zip = ScratchFile::write(bytes, ARCHIVE_EXTENSION)
            .map_err(|e| CodervetError::file_error(Path::new(name), "stage archive", e))?;
        let file = fs::File::open(scratch_zip.path())
            .map_err(|e| CodervetError::file_error(scratch_zip.path(), "open archive", e))?;

        let mut archive = ZipArchive::new(file).map_err(CodervetError::malformed_archive)?;

        let extract_root = ScratchDir::new()
            .map_err(|e| CodervetError::file_error(Path::new(name), "create extraction dir", e))?;
        self.expand(&mut archive, extract_root.path())?;

        let mut artifacts = Vec::new();
        let mut skipped = Vec::new();
        self.enumerate(extract_root.path(), &mut artifacts, &mut skipped)?;

        Ok(ExtractedBatch { artifacts, skipped })
        // extract_root and scratch_zip are deleted here on every path
    }

    fn expand(
        &self,
        archive: &mut ZipArchive<fs::File>,
        root: &Path,
    ) -> CodervetResult<()> {
        for index in 0..archive.len() {
            let mut entry = archive
                .by_index(index)
                .map_err(CodervetError::malformed_archive)?;

            // Traversal defense: drop any member whose path would escape the
            // extraction root.
            let relative = match entry.enclosed_name() {
                Some(relative) => relative,
                None => {
                    log::warn!("📦 Skipping archive member with unsafe path: {}", entry.name());
                    continue;
                }
            };

            let destination = root.join(relative);
            if entry.is_dir() {
                fs::create_dir_all(&destination)
                    .map_err(|e| CodervetError::file_error(&destination, "create dir", e))?;
                continue;
            }
            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| CodervetError::file_error(parent, "create dir", e))?;
            }
            let mut out = fs::File::create(&destination)
                .map_err(|e| CodervetError::file_error(&destination, "create", e))?;
            io::copy(&mut entry, &mut out).map_err(CodervetError::malformed_archive)?;
        }
        Ok(())
    }

    fn enumerate(
        &self,
        root: &Path,
        artifacts: &mut Vec<Artifact>,
        skipped: &mut Vec<AnalysisResult>,
    ) -> CodervetResult<()> {
        for entry in WalkDir::new(root).into_iter().filter_map(Result::ok) {
            if !entry.file_type().is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy();
            if file_name.starts_with('.') {
                continue;
            }
            if SKIPPED_FILENAME_SUFFIXES
                .iter()
                .any(|suffix| file_name.ends_with(suffix))
            {
                continue;
            }

            // Member names keep their path relative to the extraction root.
            let relative_name = entry
                .path()
                .strip_prefix(root)
                .unwrap_or(entry.path())
                .to_string_lossy()
                .to_string();

            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            if size > self.max_member_size {
                skipped.push(AnalysisResult::placeholder(
                    &relative_name,
                    content_decoder::classify(&relative_name),
                    format!(
                        "{} File too large (>{}), skipped.",
                        REVIEW_ERROR_MARKER,
                        size_limit_label(self.max_member_size)
                    ),
                ));
                continue;
            }

            let bytes = fs::read(entry.path())
                .map_err(|e| CodervetError::file_error(entry.path(), "read member", e))?;
            artifacts.push(Artifact::new(relative_name, bytes));
        }
        Ok(())
    }
}

/// Whole-MiB ceilings read as "5 MiB"; anything else is reported in bytes so
/// a small limit never rounds down to "0 MiB".
fn size_limit_label(bytes: u64) -> String {
    const MIB: u64 = 1024 * 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{} MiB", bytes / MIB)
    } else {
        format!("{} bytes", bytes)
    }
}
