use std::fs::{self, OpenOptions};
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::{Error, Message};

/// Where transcripts go unless configured otherwise.
pub const DEFAULT_CONVERSATIONS_DIR: &str = "conversations";

/// Writes transcripts as JSON files into one directory.
///
/// Each save creates a new file named after the current local time, e.g.
/// `conversation_20240301_154502.json`. Existing files are never touched:
/// a second save within the same second gets a `_1`, `_2`, ... suffix.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TranscriptStore {
    dir: PathBuf,
}

impl Default for TranscriptStore {
    #[inline]
    fn default() -> Self {
        Self::new(DEFAULT_CONVERSATIONS_DIR)
    }
}

impl TranscriptStore {
    /// Creates a store rooted at `dir`. The directory is created on the
    /// first save.
    #[inline]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the directory transcripts are written to.
    #[inline]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `messages` to a new file and returns its path.
    pub fn save(&self, messages: &[Message]) -> Result<PathBuf, Error> {
        fs::create_dir_all(&self.dir).map_err(|err| storage_error(&self.dir, err))?;
        let json = serde_json::to_string_pretty(messages)
            .map_err(|err| Error::storage().with_reason(err.to_string()))?;

        let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let mut attempt = 0u32;
        loop {
            let name = if attempt == 0 {
                format!("conversation_{stamp}.json")
            } else {
                format!("conversation_{stamp}_{attempt}.json")
            };
            let path = self.dir.join(name);

            let mut file = match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
            {
                Ok(file) => file,
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                    attempt += 1;
                    continue;
                }
                Err(err) => return Err(storage_error(&path, err)),
            };
            file.write_all(json.as_bytes())
                .map_err(|err| storage_error(&path, err))?;

            info!("conversation saved to {}", path.display());
            return Ok(path);
        }
    }

    /// Reads a transcript written by [`TranscriptStore::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Vec<Message>, Error> {
        let path = path.as_ref();
        let json =
            fs::read_to_string(path).map_err(|err| storage_error(path, err))?;
        serde_json::from_str(&json).map_err(|err| {
            Error::storage().with_reason(format!("{}: {err}", path.display()))
        })
    }
}

#[inline]
fn storage_error(path: &Path, err: io::Error) -> Error {
    Error::storage().with_reason(format!("{}: {err}", path.display()))
}
