use super::PersistenceError;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// A place to keep string values under fixed keys across runs of the program
pub(crate) trait KeyValueStore {
    /// Returns `Ok(None)` if nothing has been saved under `key` yet
    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    fn save(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// Keeps each key in a JSON file of the same name inside a directory
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub(crate) fn new<P: Into<PathBuf>>(dir: P) -> FileStore {
        FileStore { dir: dir.into() }
    }

    pub(crate) fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PersistenceError::Read { path, source }),
        }
    }

    // The value is written to a temporary file next to the target and then
    // renamed over it so that an interrupted write leaves the old contents.
    fn save(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        write_then_rename(&self.dir, &tmp, &path, value)
            .map_err(|source| PersistenceError::Write { path, source })
    }
}

fn write_then_rename(dir: &Path, tmp: &Path, path: &Path, value: &str) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    write_synced(tmp, value)
        .and_then(|()| fs::rename(tmp, path))
        .inspect_err(|_| {
            let _ = fs::remove_file(tmp);
        })
}

fn write_synced(path: &Path, value: &str) -> io::Result<()> {
    let mut fp = fs::File::create(path)?;
    fp.write_all(value.as_bytes())?;
    fp.sync_all()
}

#[cfg(test)]
pub(crate) use self::memory::MemoryStore;
