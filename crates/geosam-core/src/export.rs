//! Export packaging: shapefile sidecar archives and artifact reads.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::{GeosamError, Result};

/// Sidecar extensions that make up a complete shapefile.
pub const SIDECAR_EXTENSIONS: [&str; 4] = ["shp", "shx", "dbf", "prj"];

/// Zip the shapefile sidecars sharing `shp_path`'s base name into
/// `zip_path`. Missing sidecars are skipped silently; entry names are the
/// files' base names. Returns the number of entries written.
pub fn write_shapefile_archive(shp_path: &Path, zip_path: &Path) -> Result<usize> {
    let file = File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    let mut entries = 0;
    for ext in SIDECAR_EXTENSIONS {
        let sidecar = shp_path.with_extension(ext);
        if !sidecar.exists() {
            continue;
        }
        let name = sidecar
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("sidecar")
            .to_string();

        zip.start_file(name, options)
            .map_err(|e| GeosamError::Serialization(format!("zip entry failed: {}", e)))?;
        zip.write_all(&fs::read(&sidecar)?)?;
        entries += 1;
    }

    zip.finish()
        .map_err(|e| GeosamError::Serialization(format!("zip finish failed: {}", e)))?;

    tracing::debug!(path = %zip_path.display(), entries, "Shapefile archive written");
    Ok(entries)
}

/// Read an artifact's full byte content for a download response.
///
/// The file handle is scoped to this call; a missing file is reported as
/// [`GeosamError::ArtifactMissing`].
pub fn read_artifact(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(GeosamError::ArtifactMissing { path: path.to_path_buf() });
    }
    Ok(fs::read(path)?)
}

/// Best-effort removal of a prior artifact; failures are ignored.
pub fn remove_stale(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::debug!(path = %path.display(), error = %e, "Stale artifact not removed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use tempfile::tempdir;

    #[test]
    fn test_archive_contains_only_existing_sidecars() {
        let dir = tempdir().unwrap();
        let shp = dir.path().join("masks.shp");
        fs::write(&shp, b"shp bytes").unwrap();
        fs::write(shp.with_extension("dbf"), b"dbf bytes").unwrap();
        // No .shx or .prj on disk.

        let zip_path = dir.path().join("segmentation_shp.zip");
        let entries = write_shapefile_archive(&shp, &zip_path).unwrap();
        assert_eq!(entries, 2);

        let mut archive = zip::ZipArchive::new(File::open(&zip_path).unwrap()).unwrap();
        let names: BTreeSet<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(names, BTreeSet::from(["masks.shp".to_string(), "masks.dbf".to_string()]));
    }

    #[test]
    fn test_archive_with_no_sidecars_is_empty() {
        let dir = tempdir().unwrap();
        let shp = dir.path().join("masks.shp");
        let zip_path = dir.path().join("segmentation_shp.zip");

        let entries = write_shapefile_archive(&shp, &zip_path).unwrap();
        assert_eq!(entries, 0);
        assert!(zip_path.exists());
    }

    #[test]
    fn test_read_artifact_missing() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("gone.png");
        assert!(matches!(read_artifact(&missing), Err(GeosamError::ArtifactMissing { .. })));
    }

    #[test]
    fn test_read_artifact_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("visualization.png");
        fs::write(&path, b"image bytes").unwrap();
        assert_eq!(read_artifact(&path).unwrap(), b"image bytes");
    }

    #[test]
    fn test_remove_stale_is_best_effort() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("satellite.png");
        fs::write(&path, b"old").unwrap();

        remove_stale(&path);
        assert!(!path.exists());
        // Removing again must not panic or error.
        remove_stale(&path);
    }
}
