use std::io::ErrorKind;
use std::path::PathBuf;

use super::KeyValueStore;
use crate::error::StoreResult;

/// One JSON file per key inside a data directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        let slug = key.replace(['/', '\\', ':'], "_");
        self.dir.join(format!("{slug}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> StoreResult<Option<serde_json::Value>> {
        let path = self.path(key);

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(serde_json::from_str(&contents)?))
    }

    fn save(&self, key: &str, value: &serde_json::Value) -> StoreResult<()> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.path(key);
        let temp = path.with_extension("json.tmp");

        std::fs::write(&temp, serde_json::to_string_pretty(value)?)?;

        // Owner-only: the session file holds OAuth tokens
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&temp, std::fs::Permissions::from_mode(0o600))?;
        }

        std::fs::rename(&temp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        match std::fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
