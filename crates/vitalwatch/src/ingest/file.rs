//! File ingestion: replay recorded feed files from a directory.

use std::path::PathBuf;

use crate::domain::SubjectStore;
use crate::VitalError;

use super::parser::parse_line;
use super::IngestStats;

/// Reads every regular file in a directory and appends the parsed
/// records to a store.
pub struct FileReader {
    directory: PathBuf,
}

impl FileReader {
    /// Create a reader for the given directory.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Read all files, appending valid records to `store`.
    ///
    /// Malformed lines are logged and skipped; they never reach the
    /// store. Blank lines are ignored. Fails only on I/O errors.
    pub async fn read_into(&self, store: &SubjectStore) -> Result<IngestStats, VitalError> {
        let mut stats = IngestStats::default();

        let mut entries = tokio::fs::read_dir(&self.directory).await?;
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let path = entry.path();
            let contents = tokio::fs::read_to_string(&path).await?;
            for line in contents.lines() {
                if line.trim().is_empty() {
                    continue;
                }
                match parse_line(line) {
                    Ok(record) => {
                        store.append(record);
                        stats.accepted += 1;
                    }
                    Err(error) => {
                        tracing::warn!(file = %path.display(), %error, "discarding malformed line");
                        stats.rejected += 1;
                    }
                }
            }
        }

        tracing::info!(
            directory = %self.directory.display(),
            accepted = stats.accepted,
            rejected = stats.rejected,
            "file ingestion complete"
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SubjectId;

    #[tokio::test]
    async fn reads_valid_lines_and_skips_malformed() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(
            dir.path().join("feed.csv"),
            "1,1000,Saturation,95.0%\nnot a record\n2,2000,SystolicPressure,120\n\n",
        )
        .await
        .unwrap();

        let store = SubjectStore::new();
        let stats = FileReader::new(dir.path()).read_into(&store).await.unwrap();

        assert_eq!(stats.accepted, 2);
        assert_eq!(stats.rejected, 1);
        assert_eq!(store.full_window(SubjectId::new(1)).len(), 1);
        assert_eq!(store.full_window(SubjectId::new(2)).len(), 1);
    }

    #[tokio::test]
    async fn reads_multiple_files() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("a.csv"), "1,1000,Saturation,95\n")
            .await
            .unwrap();
        tokio::fs::write(dir.path().join("b.csv"), "1,2000,Saturation,94\n")
            .await
            .unwrap();

        let store = SubjectStore::new();
        let stats = FileReader::new(dir.path()).read_into(&store).await.unwrap();
        assert_eq!(stats.accepted, 2);
        assert_eq!(store.full_window(SubjectId::new(1)).len(), 2);
    }

    #[tokio::test]
    async fn missing_directory_is_an_error() {
        let store = SubjectStore::new();
        let result = FileReader::new("/does/not/exist").read_into(&store).await;
        assert!(matches!(result, Err(VitalError::Io(_))));
    }
}
