use super::error::EngineError;
use std::path::{Path, PathBuf};

/// Builds output file names as `<directory>/<prefix><suffix>[_NNN].<extension>`.
#[derive(Debug, Clone, Copy)]
pub struct OutputNamer<'a> {
    directory: &'a Path,
    serial: Option<u32>,
}

impl<'a> OutputNamer<'a> {
    pub fn new(directory: &'a Path, serial: Option<u32>) -> Self {
        Self { directory, serial }
    }

    pub fn name(&self, prefix: &str, suffix: &str, extension: &str) -> PathBuf {
        let mut file_name = format!("{}{}", prefix, suffix);
        if let Some(serial) = self.serial {
            file_name.push_str(&format!("_{:03}", serial));
        }
        file_name.push('.');
        file_name.push_str(extension);
        self.directory.join(file_name)
    }
}

/// A file the pipeline is about to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifact {
    path: PathBuf,
}

impl OutputArtifact {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fails if the file exists and `overwrite` is off.
    ///
    /// Must be called immediately before the write.
    pub fn check(&self, overwrite: bool) -> Result<(), EngineError> {
        if !overwrite && self.path.exists() {
            return Err(EngineError::OutputAlreadyExists {
                path: self.path.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn name_without_serial() {
        let namer = OutputNamer::new(Path::new("out"), None);
        assert_eq!(
            namer.name("1abc_helix_", "Ile_Val", "png"),
            Path::new("out").join("1abc_helix_Ile_Val.png")
        );
    }

    #[test]
    fn name_with_zero_padded_serial() {
        let namer = OutputNamer::new(Path::new("out"), Some(7));
        assert_eq!(
            namer.name("1abc_", "loop", "pdb"),
            Path::new("out").join("1abc_loop_007.pdb")
        );
    }

    #[test]
    fn check_respects_overwrite_flag() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("taken.png");
        let artifact = OutputArtifact::new(path.clone());
        assert!(artifact.check(false).is_ok());

        std::fs::write(&path, b"x").unwrap();
        assert!(matches!(
            artifact.check(false),
            Err(EngineError::OutputAlreadyExists { path: p }) if p == path
        ));
        assert!(artifact.check(true).is_ok());
    }

    #[test]
    fn already_exists_message_names_the_path() {
        let error = EngineError::OutputAlreadyExists {
            path: PathBuf::from("out/a.png"),
        };
        assert_eq!(
            error.to_string(),
            "out/a.png already exists and overwrite is set to False."
        );
    }
}
