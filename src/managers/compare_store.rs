//! Compare list: up to three colleges picked for side-by-side comparison.
//!
//! Local only. The list is written to `compareList` on every change and
//! hydrated from it on construction.

use crate::services::local_storage::{keys, LocalStorage, LocalStorageTrait};
use crate::types::college::College;
use crate::types::errors::CompareError;

/// Maximum number of colleges in the compare list.
pub const MAX_COMPARE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareAddOutcome {
    Added,
    AlreadyPresent,
    AtCapacity,
}

/// Trait defining compare list operations.
pub trait CompareStoreTrait {
    fn add(&mut self, college: College) -> Result<CompareAddOutcome, CompareError>;
    fn remove(&mut self, college_id: &str) -> Result<(), CompareError>;
    fn is_in_compare(&self, college_id: &str) -> bool;
    fn list(&self) -> &[College];
    fn clear(&mut self) -> Result<(), CompareError>;
}

pub struct CompareStore {
    storage: LocalStorage,
    list: Vec<College>,
}

impl CompareStore {
    /// Creates the store and hydrates it from storage. A stored value that
    /// is malformed, or holds duplicates or too many entries, is cleaned up.
    pub fn new(storage: LocalStorage) -> Result<Self, CompareError> {
        let stored: Vec<College> = storage
            .get_item_lenient(keys::COMPARE_LIST)?
            .unwrap_or_default();

        let mut list: Vec<College> = Vec::with_capacity(MAX_COMPARE);
        for college in stored {
            if list.len() == MAX_COMPARE {
                break;
            }
            if !list.iter().any(|c| c.id == college.id) {
                list.push(college);
            }
        }
        Ok(Self { storage, list })
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    fn persist(&self) -> Result<(), CompareError> {
        self.storage.set_item(keys::COMPARE_LIST, &self.list)?;
        Ok(())
    }
}

impl CompareStoreTrait for CompareStore {
    fn add(&mut self, college: College) -> Result<CompareAddOutcome, CompareError> {
        if self.list.len() >= MAX_COMPARE {
            return Ok(CompareAddOutcome::AtCapacity);
        }
        if self.is_in_compare(&college.id) {
            return Ok(CompareAddOutcome::AlreadyPresent);
        }
        self.list.push(college);
        self.persist()?;
        Ok(CompareAddOutcome::Added)
    }

    fn remove(&mut self, college_id: &str) -> Result<(), CompareError> {
        self.list.retain(|c| c.id != college_id);
        self.persist()
    }

    fn is_in_compare(&self, college_id: &str) -> bool {
        self.list.iter().any(|c| c.id == college_id)
    }

    fn list(&self) -> &[College] {
        &self.list
    }

    fn clear(&mut self) -> Result<(), CompareError> {
        self.list.clear();
        self.storage.remove_item(keys::COMPARE_LIST)?;
        Ok(())
    }
}
