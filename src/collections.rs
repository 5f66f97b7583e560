//! In-memory collections backing the resource handlers
//!
//! Each collection is a `Vec` behind a `parking_lot::RwLock`; reads clone out
//! so no lock is held across an await point.

use crate::models::{Book, User};
use chrono::Utc;
use parking_lot::{Mutex, RwLock};

/// A record addressable by a unique id
pub trait Record: Clone + Send + Sync {
    type Id: PartialEq + ?Sized;

    fn id(&self) -> &Self::Id;
}

impl Record for User {
    type Id = i64;

    fn id(&self) -> &i64 {
        &self.id
    }
}

impl Record for Book {
    type Id = str;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Default)]
pub struct Collection<T> {
    records: RwLock<Vec<T>>,
}

impl<T: Record> Collection<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    pub fn list(&self) -> Vec<T> {
        self.records.read().clone()
    }

    pub fn list_limited(&self, limit: usize) -> Vec<T> {
        self.records.read().iter().take(limit).cloned().collect()
    }

    pub fn find(&self, id: &T::Id) -> Option<T> {
        self.records.read().iter().find(|r| r.id() == id).cloned()
    }

    pub fn insert(&self, record: T) {
        self.records.write().push(record);
    }

    pub fn remove(&self, id: &T::Id) -> Option<T> {
        let mut records = self.records.write();
        let index = records.iter().position(|r| r.id() == id)?;
        Some(records.remove(index))
    }
}

/// Millisecond-timestamp ids, strictly increasing within the process
#[derive(Debug, Default)]
pub struct TimestampIds {
    last: Mutex<i64>,
}

impl TimestampIds {
    pub fn next(&self) -> i64 {
        let mut last = self.last.lock();
        let candidate = Utc::now().timestamp_millis();
        *last = candidate.max(*last + 1);
        *last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_users() {
        let users = Collection::new(User::seed());

        assert_eq!(users.list().len(), 2);
        assert_eq!(users.find(&1).map(|u| u.name), Some("Alice".to_string()));
        assert!(users.find(&99).is_none());
        assert_eq!(users.list_limited(1).len(), 1);
        assert_eq!(users.list_limited(10).len(), 2);
        assert!(users.list_limited(0).is_empty());
    }

    #[test]
    fn test_collection_reflects_last_write() {
        let books = Collection::new(Book::seed());

        books.insert(Book {
            id: "abc".to_string(),
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            published_year: 1965,
        });
        assert_eq!(books.list().len(), 3);
        assert_eq!(books.list().last().map(|b| b.id.as_str()), Some("abc"));

        let removed = books.remove("12345").unwrap();
        assert_eq!(removed.title, "The Great Gatsby");
        assert!(books.find("12345").is_none());
        assert!(books.remove("12345").is_none());
        assert_eq!(books.list().len(), 2);
    }

    #[test]
    fn test_timestamp_ids_strictly_increase() {
        let ids = TimestampIds::default();
        let mut previous = ids.next();

        for _ in 0..1000 {
            let id = ids.next();
            assert!(id > previous);
            previous = id;
        }
    }
}
