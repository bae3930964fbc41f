//! Skill statistics and search for the dashboard sidebar

use std::cmp::Ordering;
use std::collections::HashMap;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::models::{Progress, Skill};

/// Ordering for skill listings; every order puts the largest value first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SkillSort {
    /// Newest first, by id
    #[default]
    Recent,
    Difficulty,
    Hours,
}

impl FromStr for SkillSort {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "recent" => Ok(SkillSort::Recent),
            "difficulty" => Ok(SkillSort::Difficulty),
            "hours" => Ok(SkillSort::Hours),
            other => Err(ValidationError::InvalidSort(other.to_string())),
        }
    }
}

/// Totals shown in the overview card
#[derive(Debug, Clone, PartialEq)]
pub struct SkillStats {
    pub total_skills: usize,
    pub total_hours: f64,
    pub by_progress: HashMap<Progress, usize>,
}

impl SkillStats {
    pub fn from_skills(skills: &[Skill]) -> Self {
        let mut by_progress = HashMap::new();
        for progress in skills.iter().filter_map(Skill::progress) {
            *by_progress.entry(progress).or_insert(0) += 1;
        }

        Self {
            total_skills: skills.len(),
            total_hours: skills.iter().filter_map(|s| s.hours_spent).sum(),
            by_progress,
        }
    }

    pub fn count(&self, progress: Progress) -> usize {
        self.by_progress.get(&progress).copied().unwrap_or(0)
    }
}

/// Skills whose name, platform or resource type contains `query`
///
/// Matching is case-insensitive; a blank query keeps every skill.
pub fn filter_skills<'a>(skills: &'a [Skill], query: &str) -> Vec<&'a Skill> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return skills.iter().collect();
    }

    let hit = |field: Option<&str>| {
        field
            .map(|f| f.to_lowercase().contains(&query))
            .unwrap_or(false)
    };

    skills
        .iter()
        .filter(|s| {
            hit(Some(s.name.as_str()))
                || hit(s.platform.as_deref())
                || hit(s.resource_type.as_deref())
        })
        .collect()
}

/// Keep only skills at `progress`; `None` keeps everything
pub fn filter_by_progress<'a>(skills: Vec<&'a Skill>, progress: Option<Progress>) -> Vec<&'a Skill> {
    match progress {
        Some(wanted) => skills
            .into_iter()
            .filter(|s| s.progress() == Some(wanted))
            .collect(),
        None => skills,
    }
}

/// Stable sort, largest first; missing difficulty or hours count as zero
pub fn sort_skills(skills: &mut [&Skill], order: SkillSort) {
    match order {
        SkillSort::Recent => skills.sort_by(|a, b| compare_ids(&b.id, &a.id)),
        SkillSort::Difficulty => {
            skills.sort_by_key(|s| std::cmp::Reverse(s.difficulty.unwrap_or(0)))
        }
        SkillSort::Hours => skills.sort_by(|a, b| {
            let (a, b) = (a.hours_spent.unwrap_or(0.0), b.hours_spent.unwrap_or(0.0));
            b.partial_cmp(&a).unwrap_or(Ordering::Equal)
        }),
    }
}

// Backend ids are integers; compare numerically when both parse
fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        _ => a.cmp(b),
    }
}

/// Format hours without a trailing ".0" for whole numbers
pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{:.0}", hours)
    } else {
        format!("{:.1}", hours)
    }
}
