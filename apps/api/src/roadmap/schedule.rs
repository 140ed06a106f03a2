//! Day budgeting for roadmaps.
//!
//! A stored roadmap is only an ordered list of milestones. On read, the
//! requested number of days is spread across them and the milestones are also
//! grouped into weekly chunks for the week-by-week view.

use crate::models::roadmap::{Milestone, RoadmapResponse, RoadmapWeek, ScheduledMilestone, StoredRoadmap};

pub const DEFAULT_DAYS: u32 = 30;
pub const MAX_DAYS: u32 = 365;

const EMPTY_WEEK_SUMMARY: &str = "Deep practice and review";

/// Missing or non-numeric input falls back to the default budget.
pub fn parse_days(raw: Option<&str>) -> u32 {
    raw.and_then(|d| d.trim().parse::<u32>().ok())
        .filter(|d| *d > 0)
        .unwrap_or(DEFAULT_DAYS)
}

/// Every milestone gets at least one day; no plan runs past a year.
pub fn effective_days(requested: u32, milestone_count: usize) -> u32 {
    let floor = (milestone_count as u32).clamp(1, MAX_DAYS);
    requested.clamp(floor, MAX_DAYS)
}

/// Splits `days` evenly; the last milestone absorbs the remainder so the plan
/// always ends on day `days`.
pub fn schedule_milestones(milestones: &[Milestone], days: u32) -> Vec<ScheduledMilestone> {
    let n = milestones.len() as u32;
    if n == 0 {
        return Vec::new();
    }
    let per = (days / n).max(1);

    milestones
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let i = i as u32;
            let start_day = 1 + i * per;
            let end_day = if i + 1 == n { days.max(start_day) } else { (i + 1) * per };
            ScheduledMilestone {
                title: m.title.clone(),
                details: m.details.clone(),
                outcomes: m.outcomes.clone(),
                resources: m.resources.clone(),
                start_day,
                end_day,
                duration: format!("Days {start_day}-{end_day}"),
            }
        })
        .collect()
}

/// Groups milestones into `max(1, min(days / 7, n))` weeks. Earlier weeks take
/// the extra milestone when the split is uneven.
pub fn plan_weeks(milestones: &[Milestone], days: u32) -> Vec<RoadmapWeek> {
    let n = milestones.len();
    if n == 0 {
        return Vec::new();
    }
    let num_weeks = ((days / 7) as usize).min(n).max(1);
    let base = n / num_weeks;
    let remainder = n % num_weeks;

    let mut weeks = Vec::with_capacity(num_weeks);
    let mut cursor = 0;
    for week in 1..=num_weeks {
        let take = base + usize::from(week <= remainder);
        let slice = &milestones[cursor..cursor + take];
        cursor += take;

        let focus: Vec<String> = slice
            .iter()
            .map(|m| m.title.clone())
            .filter(|t| !t.is_empty())
            .collect();
        let summary = if focus.is_empty() {
            EMPTY_WEEK_SUMMARY.to_string()
        } else {
            focus.join(", ")
        };
        weeks.push(RoadmapWeek {
            title: format!("Week {week}"),
            summary,
            focus,
        });
    }
    weeks
}

pub fn build_roadmap(goal: &str, requested_days: u32, stored: StoredRoadmap) -> RoadmapResponse {
    let days = effective_days(requested_days, stored.milestones.len());
    RoadmapResponse {
        goal: goal.to_string(),
        days,
        milestones: schedule_milestones(&stored.milestones, days),
        weeks: plan_weeks(&stored.milestones, days),
        overview: stored.overview,
    }
}
