//! Artifact distribution.
//!
//! After a full compilation pass, every file in the build-output directory
//! is copied to each configured destination. The output directory is the
//! only staging area; language roots are never read here.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Copy all output-directory files to every destination.
///
/// Destinations are created on demand. Existing files of the same name are
/// overwritten, and each copy carries over the artifact's modification time
/// so consumers see the build's timestamps. A failure against one
/// destination is recorded and skipped; the remaining destinations are
/// still served.
///
/// # Returns
/// One message per failed destination or file copy.
pub fn distribute(output_dir: &Path, destinations: &[PathBuf]) -> Vec<String> {
    let mut failures = Vec::new();

    let artifacts = match collect_artifacts(output_dir) {
        Ok(artifacts) => artifacts,
        Err(e) => {
            failures.push(format!("failed to read {}: {}", output_dir.display(), e));
            return failures;
        }
    };

    for dest in destinations {
        if let Err(e) = fs::create_dir_all(dest) {
            failures.push(format!("failed to create {}: {}", dest.display(), e));
            continue;
        }

        for artifact in &artifacts {
            let file_name = match artifact.file_name() {
                Some(name) => name,
                None => continue,
            };
            let target = dest.join(file_name);
            if let Err(e) = copy_artifact(artifact, &target) {
                failures.push(format!("failed to copy to {}: {}", target.display(), e));
            }
        }
    }

    failures
}

/// Copy one artifact, carrying its modification time to the target.
fn copy_artifact(artifact: &Path, target: &Path) -> io::Result<()> {
    fs::copy(artifact, target)?;
    let modified = fs::metadata(artifact)?.modified()?;
    fs::File::options().write(true).open(target)?.set_modified(modified)?;
    Ok(())
}

/// Regular files currently staged in the output directory.
fn collect_artifacts(output_dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut artifacts = Vec::new();
    for entry in fs::read_dir(output_dir)? {
        let path = entry?.path();
        if path.is_file() {
            artifacts.push(path);
        }
    }
    artifacts.sort();
    Ok(artifacts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn staged_output(files: &[(&str, &str)]) -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("bin");
        fs::create_dir(&out).unwrap();
        for (name, content) in files {
            fs::write(out.join(name), content).unwrap();
        }
        (temp, out)
    }

    #[test]
    fn test_distribute_to_multiple_destinations() {
        let (temp, out) = staged_output(&[("a.vert.spv", "spirv-a"), ("b.comp.dxil", "dxil-b")]);
        let dest1 = temp.path().join("out1");
        let dest2 = temp.path().join("out2");

        let failures = distribute(&out, &[dest1.clone(), dest2.clone()]);

        assert!(failures.is_empty());
        for dest in [&dest1, &dest2] {
            assert_eq!(fs::read_to_string(dest.join("a.vert.spv")).unwrap(), "spirv-a");
            assert_eq!(fs::read_to_string(dest.join("b.comp.dxil")).unwrap(), "dxil-b");
        }
    }

    #[test]
    fn test_distribute_creates_missing_destination() {
        let (temp, out) = staged_output(&[("a.spv", "x")]);
        let dest = temp.path().join("nested").join("consumer");

        let failures = distribute(&out, &[dest.clone()]);

        assert!(failures.is_empty());
        assert!(dest.join("a.spv").exists());
    }

    #[test]
    fn test_distribute_overwrites_existing_artifact() {
        let (temp, out) = staged_output(&[("a.spv", "new")]);
        let dest = temp.path().join("out");
        fs::create_dir(&dest).unwrap();
        fs::write(dest.join("a.spv"), "old").unwrap();

        let failures = distribute(&out, &[dest.clone()]);

        assert!(failures.is_empty());
        assert_eq!(fs::read_to_string(dest.join("a.spv")).unwrap(), "new");
    }

    #[test]
    fn test_distribute_skips_subdirectories() {
        let (temp, out) = staged_output(&[("a.spv", "x")]);
        fs::create_dir(out.join("nested")).unwrap();
        let dest = temp.path().join("out");

        let failures = distribute(&out, &[dest.clone()]);

        assert!(failures.is_empty());
        assert!(dest.join("a.spv").exists());
        assert!(!dest.join("nested").exists());
    }

    #[test]
    fn test_distribute_preserves_modification_time() {
        use std::time::{Duration, SystemTime};

        let (temp, out) = staged_output(&[("a.spv", "x")]);
        let stale = SystemTime::now() - Duration::from_secs(10_000);
        fs::File::options()
            .write(true)
            .open(out.join("a.spv"))
            .unwrap()
            .set_modified(stale)
            .unwrap();
        let dest = temp.path().join("out");

        let failures = distribute(&out, &[dest.clone()]);

        assert!(failures.is_empty());
        let source = fs::metadata(out.join("a.spv")).unwrap().modified().unwrap();
        let copied = fs::metadata(dest.join("a.spv")).unwrap().modified().unwrap();
        assert_eq!(copied, source);
    }

    #[cfg(unix)]
    #[test]
    fn test_distribute_one_bad_destination_does_not_block_others() {
        let (temp, out) = staged_output(&[("a.spv", "x")]);
        // Regular file in place of a destination directory
        let bad = temp.path().join("bad");
        fs::write(&bad, "not a directory").unwrap();
        let good = temp.path().join("good");

        let failures = distribute(&out, &[bad, good.clone()]);

        assert_eq!(failures.len(), 1);
        assert!(good.join("a.spv").exists());
    }
}
