//! Admission deadline tracker.
//!
//! Builds a deadline schedule for each favorited college, merges it with
//! what is already stored (stored entries keep their dates and completion
//! state), and persists the merged list under `deadlines`.

use std::collections::HashSet;

use crate::services::local_storage::{keys, LocalStorage};
use crate::types::college::College;
use crate::types::deadline::{Deadline, DeadlineKind, DeadlinePriority};
use crate::types::errors::DeadlineError;

pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Upper bound on the entries returned by [`DeadlineTracker::upcoming`].
pub const UPCOMING_LIMIT: usize = 5;

/// Whole days until `deadline`, rounded up. Negative once it has passed.
pub fn days_until(deadline: &Deadline, now: i64) -> i64 {
    ((deadline.due_at - now) as f64 / DAY_MS as f64).ceil() as i64
}

/// The default schedule for the favorite at position `index`.
fn schedule_for(college: &College, index: i64, now: i64) -> Vec<Deadline> {
    let make = |prefix: &str, kind, title: &str, days: i64, description: &str, priority| Deadline {
        id: format!("{}-{}", prefix, college.id),
        college_id: college.id.clone(),
        college_name: college.name.clone(),
        kind,
        title: title.to_string(),
        due_at: now + days * DAY_MS,
        description: Some(description.to_string()),
        is_completed: false,
        priority,
    };

    let mut out = vec![
        make(
            "app",
            DeadlineKind::Application,
            "Application Deadline",
            30 + index * 15,
            "Submit your complete application with all required documents",
            DeadlinePriority::High,
        ),
        make(
            "exam",
            DeadlineKind::EntranceExam,
            "Entrance Exam Registration",
            45 + index * 10,
            "Register for the entrance examination",
            DeadlinePriority::Medium,
        ),
    ];
    if index % 2 == 0 {
        out.push(make(
            "scholarship",
            DeadlineKind::Scholarship,
            "Scholarship Application",
            20 + index * 8,
            "Apply for merit-based scholarships",
            DeadlinePriority::Medium,
        ));
    }
    out
}

pub struct DeadlineTracker {
    storage: LocalStorage,
    deadlines: Vec<Deadline>,
}

impl DeadlineTracker {
    pub fn new(storage: LocalStorage) -> Result<Self, DeadlineError> {
        let deadlines = storage
            .get_item_lenient(keys::DEADLINES)?
            .unwrap_or_default();
        Ok(Self { storage, deadlines })
    }

    pub fn deadlines(&self) -> &[Deadline] {
        &self.deadlines
    }

    /// Merges stored deadlines with the schedule for `favorites`, dedups by
    /// id (stored wins), sorts by due date and persists.
    pub fn sync_with_favorites(&mut self, favorites: &[College], now: i64) -> Result<&[Deadline], DeadlineError> {
        let generated = favorites
            .iter()
            .enumerate()
            .flat_map(|(i, college)| schedule_for(college, i as i64, now));

        let mut seen = HashSet::new();
        let mut merged: Vec<Deadline> = std::mem::take(&mut self.deadlines)
            .into_iter()
            .chain(generated)
            .filter(|d| seen.insert(d.id.clone()))
            .collect();
        merged.sort_by_key(|d| d.due_at);

        self.deadlines = merged;
        self.storage.set_item(keys::DEADLINES, &self.deadlines)?;
        Ok(&self.deadlines)
    }

    pub fn mark_completed(&mut self, id: &str) -> Result<(), DeadlineError> {
        let deadline = self
            .deadlines
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| DeadlineError::NotFound(id.to_string()))?;
        deadline.is_completed = true;
        self.storage.set_item(keys::DEADLINES, &self.deadlines)?;
        Ok(())
    }

    /// Open deadlines that have not passed, soonest first, at most
    /// [`UPCOMING_LIMIT`].
    pub fn upcoming(&self, now: i64) -> Vec<&Deadline> {
        self.deadlines
            .iter()
            .filter(|d| !d.is_completed && days_until(d, now) >= 0)
            .take(UPCOMING_LIMIT)
            .collect()
    }
}
