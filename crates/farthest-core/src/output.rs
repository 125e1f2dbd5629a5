//! Where rendered tables go.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::OutputPathError;

/// Output sink for a rendered table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Standard output.
    Stdout,
    /// A file, created or truncated on write.
    File(Utf8PathBuf),
}

impl Destination {
    /// Resolve a requested output path.
    ///
    /// `None` means standard output. A path that is itself a directory, or
    /// whose parent directory does not exist, yields [`OutputPathError`];
    /// callers are expected to fall back to [`Destination::Stdout`].
    pub fn for_path(path: Option<&Utf8Path>) -> Result<Self, OutputPathError> {
        let Some(path) = path else {
            return Ok(Self::Stdout);
        };
        if path.is_dir() {
            return Err(OutputPathError::IsDirectory {
                path: path.to_path_buf(),
            });
        }
        match path.parent() {
            Some(dir) if !dir.as_str().is_empty() && !dir.is_dir() => {
                Err(OutputPathError::MissingDirectory {
                    dir: dir.to_path_buf(),
                })
            }
            _ => Ok(Self::File(path.to_path_buf())),
        }
    }

    /// Write `contents` to the destination.
    #[tracing::instrument(skip(contents), fields(bytes = contents.len()))]
    pub fn write(&self, contents: &str) -> std::io::Result<()> {
        match self {
            Self::Stdout => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(contents.as_bytes())?;
                stdout.flush()
            }
            Self::File(path) => std::fs::write(path.as_std_path(), contents),
        }
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stdout => f.write_str("<stdout>"),
            Self::File(path) => write!(f, "{path}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn no_path_is_stdout() {
        assert_eq!(Destination::for_path(None).unwrap(), Destination::Stdout);
    }

    #[test]
    fn bare_file_name_uses_current_dir() {
        let dest = Destination::for_path(Some(Utf8Path::new("days.tsv"))).unwrap();
        assert_eq!(dest, Destination::File(Utf8PathBuf::from("days.tsv")));
    }

    #[test]
    fn existing_directory_is_accepted() {
        let tmp = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("days.tsv")).unwrap();
        let dest = Destination::for_path(Some(&path)).unwrap();
        assert_eq!(dest, Destination::File(path));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("missing").join("days.tsv")).unwrap();
        let err = Destination::for_path(Some(&path)).unwrap_err();
        assert!(
            matches!(err, OutputPathError::MissingDirectory { ref dir } if dir.as_str().ends_with("missing"))
        );
    }

    #[test]
    fn existing_directory_as_target_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        assert_eq!(
            Destination::for_path(Some(&path)).unwrap_err(),
            OutputPathError::IsDirectory { path }
        );
    }

    #[test]
    fn writes_file() {
        let tmp = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("days.tsv")).unwrap();
        Destination::File(path.clone())
            .write("2020-01-01\t1000\n")
            .unwrap();
        assert_eq!(
            std::fs::read_to_string(path.as_std_path()).unwrap(),
            "2020-01-01\t1000\n"
        );
    }
}
