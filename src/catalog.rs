//! Catalog bookkeeping: records, users, borrowing.
//!
//! The catalog owns the mutable side of a record (its availability). Indexes
//! only ever see a [`Library::snapshot`], so borrowing a book never touches a
//! built index and a rebuild is needed before availability shows up there.

use crate::error::{CatalogError, Result};
use crate::types::Record;
use crate::utils::{is_blank_query, normalize};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// A library patron and the identifiers they currently hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub borrowed: Vec<String>,
}

impl User {
    pub fn new(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            borrowed: Vec::new(),
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (ID: {})", self.name, self.user_id)
    }
}

/// Counts shown by the `stats` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total: usize,
    pub available: usize,
    pub borrowed: usize,
    pub users: usize,
}

/// In-memory catalog. Records keep insertion order.
#[derive(Debug, Clone, Default)]
pub struct Library {
    records: Vec<Record>,
    positions: HashMap<String, usize>,
    users: HashMap<String, User>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from records, rejecting the first duplicate or
    /// unidentifiable one.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> CatalogResult<Self> {
        let mut library = Self::new();
        for record in records {
            library.add_record(record)?;
        }
        Ok(library)
    }

    pub fn add_record(&mut self, record: Record) -> CatalogResult<()> {
        if is_blank_query(&record.isbn) {
            return Err(CatalogError::MalformedRecord {
                reason: format!("'{}' has a blank isbn", record.title),
            });
        }
        if self.positions.contains_key(&record.isbn) {
            return Err(CatalogError::DuplicateRecord { isbn: record.isbn });
        }
        self.positions.insert(record.isbn.clone(), self.records.len());
        self.records.push(record);
        Ok(())
    }

    pub fn register_user(&mut self, user: User) -> CatalogResult<()> {
        if self.users.contains_key(&user.user_id) {
            return Err(CatalogError::DuplicateUser {
                user_id: user.user_id,
            });
        }
        self.users.insert(user.user_id.clone(), user);
        Ok(())
    }

    /// Lend `isbn` to `user_id`. The record must be available.
    pub fn borrow(&mut self, user_id: &str, isbn: &str) -> CatalogResult<()> {
        let position = self.position(isbn)?;
        let user = self
            .users
            .get_mut(user_id)
            .ok_or_else(|| CatalogError::UnknownUser {
                user_id: user_id.to_string(),
            })?;
        let record = &mut self.records[position];
        if !record.available {
            return Err(CatalogError::Unavailable {
                isbn: isbn.to_string(),
            });
        }
        record.available = false;
        user.borrowed.push(isbn.to_string());
        Ok(())
    }

    /// Take `isbn` back from `user_id`. The user must be holding it.
    pub fn give_back(&mut self, user_id: &str, isbn: &str) -> CatalogResult<()> {
        let position = self.position(isbn)?;
        let user = self
            .users
            .get_mut(user_id)
            .ok_or_else(|| CatalogError::UnknownUser {
                user_id: user_id.to_string(),
            })?;
        let Some(slot) = user.borrowed.iter().position(|held| held == isbn) else {
            return Err(CatalogError::NotBorrowed {
                user_id: user_id.to_string(),
                isbn: isbn.to_string(),
            });
        };
        user.borrowed.remove(slot);
        self.records[position].available = true;
        Ok(())
    }

    pub fn record(&self, isbn: &str) -> Option<&Record> {
        self.positions.get(isbn).map(|&i| &self.records[i])
    }

    pub fn user(&self, user_id: &str) -> Option<&User> {
        self.users.get(user_id)
    }

    /// Every record, in insertion order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Records a user holds. Unknown users hold nothing.
    pub fn borrowed_by(&self, user_id: &str) -> Vec<&Record> {
        self.users
            .get(user_id)
            .map(|user| {
                user.borrowed
                    .iter()
                    .filter_map(|isbn| self.record(isbn))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn stats(&self) -> CatalogStats {
        let available = self.records.iter().filter(|r| r.available).count();
        CatalogStats {
            total: self.records.len(),
            available,
            borrowed: self.records.len() - available,
            users: self.users.len(),
        }
    }

    /// Baseline full scan: case-insensitive substring on title and author,
    /// case-sensitive substring on the identifier.
    pub fn linear_search(&self, query: &str) -> Vec<&Record> {
        linear_scan(&self.records, query)
    }

    /// Copy of every record, ready for an index build.
    pub fn snapshot(&self) -> Vec<Record> {
        self.records.clone()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, isbn: &str) -> CatalogResult<usize> {
        self.positions
            .get(isbn)
            .copied()
            .ok_or_else(|| CatalogError::UnknownRecord {
                isbn: isbn.to_string(),
            })
    }
}

/// Read a catalog file: a JSON array of records.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Write records as a pretty-printed JSON array.
pub fn save_records(path: impl AsRef<Path>, records: &[Record]) -> Result<()> {
    let text = serde_json::to_string_pretty(records)?;
    fs::write(path, text)?;
    Ok(())
}

/// Full scan over a slice of records, the same match rule as
/// [`Library::linear_search`].
pub fn linear_scan<'a>(records: &'a [Record], query: &str) -> Vec<&'a Record> {
    let needle = normalize(query);
    records
        .iter()
        .filter(|record| {
            normalize(&record.title).contains(&needle)
                || normalize(&record.author).contains(&needle)
                || record.isbn.contains(query)
        })
        .collect()
}
