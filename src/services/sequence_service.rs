use chrono::{Days, NaiveDate};
use std::collections::{BTreeMap, BTreeSet};

use crate::{
    errors::{AppError, AppResult},
    models::domain::GeneratedItem,
};

/// Where the next generated item goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeedPosition {
    pub date: NaiveDate,
    pub slot: u32,
    pub next_id: u64,
}

/// Assigns `(date, slot)` positions under a fixed per-day capacity.
#[derive(Clone, Copy, Debug)]
pub struct SequenceService {
    daily_capacity: u32,
    lead_days: u64,
}

impl SequenceService {
    pub fn new(daily_capacity: u32, lead_days: i64) -> Self {
        Self {
            daily_capacity: daily_capacity.max(1),
            lead_days: lead_days.max(0) as u64,
        }
    }

    /// Next free position after the latest `(date, slot)` in `feed`.
    ///
    /// An empty feed starts `lead_days` before `today`. Fails when the date
    /// would leave the calendar range.
    pub fn current_position(
        &self,
        feed: &[GeneratedItem],
        today: NaiveDate,
    ) -> AppResult<FeedPosition> {
        let next_id = Self::next_id(feed);

        let (date, slot) = match feed.iter().map(GeneratedItem::position).max() {
            Some((last_date, last_slot)) => (last_date, last_slot),
            None => {
                let start = today
                    .checked_sub_days(Days::new(self.lead_days))
                    .ok_or_else(|| {
                        AppError::ValidationError(format!(
                            "{} days before {} is out of range",
                            self.lead_days, today
                        ))
                    })?;
                (start, 0)
            }
        };

        match slot.checked_add(1).filter(|s| *s <= self.daily_capacity) {
            Some(next_slot) => Ok(FeedPosition {
                date,
                slot: next_slot,
                next_id,
            }),
            None => {
                let next_date = date.checked_add_days(Days::new(1)).ok_or_else(|| {
                    AppError::ValidationError(format!("no day follows {}", date))
                })?;
                Ok(FeedPosition {
                    date: next_date,
                    slot: 1,
                    next_id,
                })
            }
        }
    }

    /// Feed length for a well-formed feed; never reuses an id if items were
    /// removed from the middle.
    fn next_id(feed: &[GeneratedItem]) -> u64 {
        let after_max = feed.iter().map(|item| item.id + 1).max().unwrap_or(0);
        after_max.max(feed.len() as u64)
    }

    /// Describe every ordering or capacity violation in `feed`.
    pub fn find_violations(&self, feed: &[GeneratedItem]) -> Vec<String> {
        let mut violations = Vec::new();
        let mut slots_by_date: BTreeMap<NaiveDate, BTreeSet<u32>> = BTreeMap::new();

        for item in feed {
            if item.slot == 0 || item.slot > self.daily_capacity {
                violations.push(format!(
                    "item {} on {} has slot {} outside 1..={}",
                    item.id, item.date, item.slot, self.daily_capacity
                ));
            }
            if !slots_by_date.entry(item.date).or_default().insert(item.slot) {
                violations.push(format!(
                    "item {} duplicates slot {} on {}",
                    item.id, item.slot, item.date
                ));
            }
        }

        for pair in feed.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if a.id >= b.id {
                violations.push(format!("id {} is followed by id {}", a.id, b.id));
            }
            if a.position() > b.position() {
                violations.push(format!(
                    "item {} at ({}, {}) is appended after later ({}, {})",
                    b.id, b.date, b.slot, a.date, a.slot
                ));
            }
        }

        violations
    }
}
