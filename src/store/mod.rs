mod kv;
pub(crate) use self::kv::{FileStore, KeyValueStore};
#[cfg(test)]
pub(crate) use self::kv::MemoryStore;
use crate::birthday::BirthdayRecord;
use crate::calendar::DateMarker;
use std::collections::BTreeSet;
use std::path::PathBuf;
use thiserror::Error;
use time::Date;

/// Key under which the whole birthday collection is saved
pub(crate) const BIRTHDAYS_KEY: &str = "birthdays";

/// The birthday collection and the backend it is mirrored to.
///
/// Records are kept in insertion order.  Every mutation rewrites the full
/// collection to the backend before returning.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct BirthdayStore<K> {
    records: Vec<BirthdayRecord>,
    backend: K,
}

impl<K: KeyValueStore> BirthdayStore<K> {
    /// Load the saved collection from `backend`.  Missing or unreadable data
    /// results in an empty store.
    pub(crate) fn open(backend: K) -> BirthdayStore<K> {
        let records = match backend.load(BIRTHDAYS_KEY) {
            Ok(Some(src)) => match serde_json::from_str::<Vec<BirthdayRecord>>(&src) {
                Ok(records) => {
                    log::info!("Loaded {} birthdays", records.len());
                    records
                }
                Err(e) => {
                    log::warn!("Saved birthdays could not be parsed; starting empty: {e}");
                    Vec::new()
                }
            },
            Ok(None) => {
                log::info!("No saved birthdays found; starting empty");
                Vec::new()
            }
            Err(e) => {
                log::warn!("{e}; starting empty");
                Vec::new()
            }
        };
        BirthdayStore { records, backend }
    }

    pub(crate) fn all(&self) -> &[BirthdayRecord] {
        &self.records
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append `record` and save the collection.
    ///
    /// If saving fails, the record stays in the in-memory collection and the
    /// error is returned so that the user can be warned that it may not
    /// survive a restart.
    pub(crate) fn add(&mut self, record: BirthdayRecord) -> Result<(), StoreError> {
        log::info!("Adding birthday {} ({}) on {}", record.id, record.name, record.date);
        self.records.push(record);
        self.persist()?;
        Ok(())
    }

    /// Remove the records at the given positions and save the collection.
    ///
    /// All offsets are checked before anything is removed; if any is out of
    /// range, the collection is left untouched.  Repeated offsets are only
    /// removed once.
    pub(crate) fn remove(&mut self, offsets: &[usize]) -> Result<(), StoreError> {
        let len = self.records.len();
        if let Some(&offset) = offsets.iter().find(|&&i| i >= len) {
            return Err(StoreError::OutOfRange { offset, len });
        }
        let offsets = offsets.iter().copied().collect::<BTreeSet<_>>();
        for &i in offsets.iter().rev() {
            let record = self.records.remove(i);
            log::info!("Removed birthday {} ({})", record.id, record.name);
        }
        self.persist()?;
        Ok(())
    }

    /// All birthdays whose month and day match those of `date`, in insertion
    /// order.  The year is ignored on both sides.
    pub(crate) fn birthdays_on(&self, date: Date) -> Vec<&BirthdayRecord> {
        self.enumerate_on(date).map(|(_, r)| r).collect()
    }

    /// Like [`BirthdayStore::birthdays_on`], but also yields each record's
    /// position in the collection
    pub(crate) fn enumerate_on(&self, date: Date) -> impl Iterator<Item = (usize, &BirthdayRecord)> {
        self.records
            .iter()
            .enumerate()
            .filter(move |(_, r)| r.falls_on(date))
    }

    pub(crate) fn has_birthday_on(&self, date: Date) -> bool {
        self.records.iter().any(|r| r.falls_on(date))
    }

    fn persist(&mut self) -> Result<(), PersistenceError> {
        let src = serde_json::to_string_pretty(&self.records)?;
        self.backend.save(BIRTHDAYS_KEY, &src).inspect_err(|e| {
            log::error!("Failed to save {} birthdays: {e}", self.records.len());
        })
    }

    #[cfg(test)]
    pub(crate) fn backend(&self) -> &K {
        &self.backend
    }
}

impl<K: KeyValueStore> DateMarker for BirthdayStore<K> {
    fn is_marked(&self, date: Date) -> bool {
        self.has_birthday_on(date)
    }
}

#[derive(Debug, Error)]
pub(crate) enum PersistenceError {
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode birthdays as JSON")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("no birthday at position {offset}; only {len} are stored")]
    OutOfRange { offset: usize, len: usize },
    #[error("birthdays may not survive a restart")]
    Persistence(#[from] PersistenceError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn alex() -> BirthdayRecord {
        BirthdayRecord::new("Alex".into(), date!(1990 - 03 - 03), String::new())
    }

    fn sam() -> BirthdayRecord {
        BirthdayRecord::new("Sam".into(), date!(1985 - 07 - 09), "allergic to nuts".into())
    }

    fn kim() -> BirthdayRecord {
        BirthdayRecord::new("Kim".into(), date!(2001 - 03 - 03), String::new())
    }

    #[test]
    fn test_open_empty() {
        let store = BirthdayStore::open(MemoryStore::new());
        assert!(store.is_empty());
    }

    #[test]
    fn test_open_corrupt_data() {
        let store = BirthdayStore::open(MemoryStore::with_entry(BIRTHDAYS_KEY, "{not json"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_open_saved_data() {
        let src = r#"[
            {"id": "6f1c3e9e-6a47-4c9b-9a55-6e1f4f8ad0a1", "name": "Alex", "date": "1990-03-03", "notes": ""},
            {"id": "0b0e8a38-1c52-4a8b-8c7f-0a4a1c2d3e4f", "name": "Sam", "date": "1985-07-09T00:00:00Z"}
        ]"#;
        let store = BirthdayStore::open(MemoryStore::with_entry(BIRTHDAYS_KEY, src));
        assert_eq!(store.len(), 2);
        assert_eq!(store.all()[0].name, "Alex");
        assert_eq!(store.all()[1].date, date!(1985 - 07 - 09));
    }

    #[test]
    fn test_add_and_query() {
        let mut store = BirthdayStore::open(MemoryStore::new());
        store.add(alex()).unwrap();
        let on = store.birthdays_on(date!(2024 - 03 - 03));
        assert_eq!(on.len(), 1);
        assert_eq!(on[0].name, "Alex");
        assert!(store.birthdays_on(date!(2024 - 03 - 04)).is_empty());
        assert!(store.has_birthday_on(date!(1800 - 03 - 03)));
        assert!(!store.has_birthday_on(date!(2024 - 03 - 04)));
    }

    #[test]
    fn test_add_persists_immediately() {
        let mut store = BirthdayStore::open(MemoryStore::new());
        store.add(alex()).unwrap();
        store.add(sam()).unwrap();
        let saved = store.backend().get(BIRTHDAYS_KEY).unwrap();
        let records = serde_json::from_str::<Vec<BirthdayRecord>>(saved).unwrap();
        assert_eq!(records, store.all());
    }

    #[test]
    fn test_reopen_round_trip() {
        let mut store = BirthdayStore::open(MemoryStore::new());
        store.add(alex()).unwrap();
        store.add(sam()).unwrap();
        store.add(kim()).unwrap();
        let reopened = BirthdayStore::open(store.backend().clone());
        assert_eq!(reopened.all(), store.all());
    }

    #[test]
    fn test_reopen_round_trip_on_disk() {
        let tmpdir = tempfile::tempdir().unwrap();
        let mut store = BirthdayStore::open(FileStore::new(tmpdir.path()));
        store.add(alex()).unwrap();
        store.add(sam()).unwrap();
        let reopened = BirthdayStore::open(FileStore::new(tmpdir.path()));
        assert_eq!(reopened.all(), store.all());
    }

    #[test]
    fn test_insertion_order_kept() {
        let mut store = BirthdayStore::open(MemoryStore::new());
        store.add(sam()).unwrap();
        store.add(kim()).unwrap();
        store.add(alex()).unwrap();
        let names = store.all().iter().map(|r| r.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["Sam", "Kim", "Alex"]);
        let names = store
            .birthdays_on(date!(2030 - 03 - 03))
            .into_iter()
            .map(|r| r.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, ["Kim", "Alex"]);
    }

    #[test]
    fn test_remove() {
        let mut store = BirthdayStore::open(MemoryStore::new());
        store.add(alex()).unwrap();
        store.add(sam()).unwrap();
        let removed = store.all()[0].id;
        store.remove(&[0]).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store
            .birthdays_on(date!(2024 - 03 - 03))
            .iter()
            .all(|r| r.id != removed));
        let reopened = BirthdayStore::open(store.backend().clone());
        assert_eq!(reopened.all(), store.all());
    }

    #[test]
    fn test_remove_several() {
        let mut store = BirthdayStore::open(MemoryStore::new());
        store.add(alex()).unwrap();
        store.add(sam()).unwrap();
        store.add(kim()).unwrap();
        store.remove(&[2, 0, 2]).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.all()[0].name, "Sam");
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut store = BirthdayStore::open(MemoryStore::new());
        store.add(alex()).unwrap();
        store.add(sam()).unwrap();
        let e = store.remove(&[0, 2]).unwrap_err();
        assert!(
            matches!(e, StoreError::OutOfRange { offset: 2, len: 2 }),
            "unexpected error: {e:?}"
        );
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_enumerate_on() {
        let mut store = BirthdayStore::open(MemoryStore::new());
        store.add(alex()).unwrap();
        store.add(sam()).unwrap();
        store.add(kim()).unwrap();
        let offsets = store
            .enumerate_on(date!(2024 - 03 - 03))
            .map(|(i, _)| i)
            .collect::<Vec<_>>();
        assert_eq!(offsets, [0, 2]);
    }

    #[test]
    fn test_failed_save_keeps_record_in_memory() {
        let mut backend = MemoryStore::new();
        backend.fail_writes = true;
        let mut store = BirthdayStore::open(backend);
        let e = store.add(alex()).unwrap_err();
        assert!(
            matches!(e, StoreError::Persistence(PersistenceError::Write { .. })),
            "unexpected error: {e:?}"
        );
        assert_eq!(store.len(), 1);
        assert_eq!(store.birthdays_on(date!(2024 - 03 - 03)).len(), 1);
    }

    #[test]
    fn test_failed_save_after_remove_keeps_removal() {
        let mut store = BirthdayStore::open(MemoryStore::new());
        store.add(alex()).unwrap();
        store.add(sam()).unwrap();
        store.backend.fail_writes = true;
        let e = store.remove(&[0]).unwrap_err();
        assert!(
            matches!(e, StoreError::Persistence(PersistenceError::Write { .. })),
            "unexpected error: {e:?}"
        );
        assert_eq!(store.len(), 1);
        assert_eq!(store.all()[0].name, "Sam");
        assert!(store.birthdays_on(date!(2024 - 03 - 03)).is_empty());
    }

    #[test]
    fn test_open_unreadable_data() {
        let tmpdir = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmpdir.path().join("birthdays.json")).unwrap();
        let mut store = BirthdayStore::open(FileStore::new(tmpdir.path()));
        assert!(store.is_empty());
        // Saving over a directory fails, and the store keeps working in memory
        assert!(store.add(alex()).is_err(), "saved over a directory");
        assert_eq!(store.len(), 1);
    }
}
