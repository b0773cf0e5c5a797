//! Study plan domain object.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::foundation::Timestamp;

/// A week-by-week study schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlan {
    pub title: String,
    #[serde(default)]
    pub overview: String,
    pub schedule: Vec<Week>,
    #[serde(default)]
    pub tips: Vec<String>,
}

impl StudyPlan {
    /// Total number of scheduled days across all weeks.
    pub fn day_count(&self) -> usize {
        self.schedule.iter().map(|w| w.days.len()).sum()
    }

    /// Total planned study hours.
    pub fn total_hours(&self) -> f64 {
        self.schedule
            .iter()
            .flat_map(|w| w.days.iter())
            .map(|d| d.hours)
            .sum()
    }
}

/// One week of the schedule. Week numbers start at 1 and are sequential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Week {
    pub week: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
    pub days: Vec<Day>,
}

/// One study day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    pub day: String,
    pub subjects: Vec<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub hours: f64,
    #[serde(default)]
    pub completed: bool,
    /// Indices into `topics`.
    #[serde(default)]
    pub completed_topics: BTreeSet<usize>,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,
}

impl Day {
    /// Creates an open day with no progress recorded.
    pub fn new(
        day: impl Into<String>,
        subjects: Vec<String>,
        topics: Vec<String>,
        hours: f64,
    ) -> Self {
        Self {
            day: day.into(),
            subjects,
            topics,
            hours,
            completed: false,
            completed_topics: BTreeSet::new(),
            notes: String::new(),
            completed_at: None,
        }
    }
}
