//! File-backed result persistence
//!
//! One file per subject and phase: `<data_dir>/<id>_<phase>_test.txt`,
//! holding a single line `max_forward,max_backward,combined`. Downstream
//! analysis consumes these files as opaque rows.

use crate::results::record::ResultRecord;
use crate::session::{ResultSink, SessionError};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes result records under a data directory
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        FileStore {
            data_dir: data_dir.into(),
        }
    }

    /// Result file path for a record
    pub fn path_for(&self, record: &ResultRecord) -> PathBuf {
        self.data_dir
            .join(format!("{}_{}_test.txt", record.subject_id, record.phase))
    }

    /// Render the single record line
    fn line_for(record: &ResultRecord) -> String {
        format!(
            "{},{},{}\n",
            record.max_forward_length,
            record.max_backward_length,
            record.combined_score()
        )
    }

    #[allow(dead_code)]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

impl ResultSink for FileStore {
    fn persist(&mut self, record: &ResultRecord) -> Result<(), SessionError> {
        fs::create_dir_all(&self.data_dir)?;
        let path = self.path_for(record);
        fs::write(&path, Self::line_for(record))?;
        tracing::info!(path = %path.display(), "result record persisted");
        Ok(())
    }
}
