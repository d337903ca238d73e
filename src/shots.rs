use crate::models::{ShotCounterEntry, Tool};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// How a counter entry's `shot_count` relates to the tool's running total.
///
/// The two dashboard revisions disagreed on this, so it stays a runtime
/// choice (`SHOT_POLICY`). The backend contract treats entries as
/// increments, which is why `SumOfIncrements` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Policy {
    /// Each entry adds its `shot_count` on top of the initial count.
    #[default]
    SumOfIncrements,
    /// Each entry is an absolute cumulative reading; the highest wins.
    MaxReading,
}

impl Policy {
    pub fn parse(value: &str) -> Option<Policy> {
        match value.trim() {
            "sum" => Some(Policy::SumOfIncrements),
            "max-reading" | "max" => Some(Policy::MaxReading),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum LimitStatus {
    NoLimit,
    Within { remaining: i64 },
    Over { remaining: i64 },
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryPoint {
    pub entry_id: String,
    pub recorded_at: Option<DateTime<Utc>>,
    pub shot_count: u64,
    pub increment: u64,
    pub running_total: u64,
    pub over_limit: bool,
}

/// The tool's current cumulative shot total.
///
/// `entries` may span all tools; anything not referencing `tool` is
/// ignored. With no matching entries the result is the initial count.
pub fn current_total(policy: Policy, tool: &Tool, entries: &[ShotCounterEntry]) -> u64 {
    let readings = for_tool(tool, entries).map(|entry| entry.shot_count);
    match policy {
        Policy::SumOfIncrements => {
            readings.fold(tool.initial_shot_count, |total, count| total.saturating_add(count))
        }
        Policy::MaxReading => readings
            .max()
            .map_or(tool.initial_shot_count, |highest| highest.max(tool.initial_shot_count)),
    }
}

/// One point per counter entry for the tool, in chronological order.
///
/// Entries without a timestamp sort before dated ones; ties keep their
/// original relative order. The running total starts at the tool's
/// initial count.
pub fn history(policy: Policy, tool: &Tool, entries: &[ShotCounterEntry]) -> Vec<HistoryPoint> {
    let mut sorted: Vec<&ShotCounterEntry> = for_tool(tool, entries).collect();
    sorted.sort_by_key(|entry| entry.recorded_at);

    let mut running = tool.initial_shot_count;
    sorted
        .into_iter()
        .map(|entry| {
            let increment = match policy {
                Policy::SumOfIncrements => entry.shot_count,
                Policy::MaxReading => entry.shot_count.saturating_sub(running),
            };
            running = match policy {
                Policy::SumOfIncrements => running.saturating_add(entry.shot_count),
                Policy::MaxReading => running.max(entry.shot_count),
            };
            // Under the max policy a stale lower reading is compared
            // against the limit as-is, not via the running total.
            let checked = match policy {
                Policy::SumOfIncrements => running,
                Policy::MaxReading => entry.shot_count,
            };
            HistoryPoint {
                entry_id: entry.id.clone(),
                recorded_at: entry.recorded_at,
                shot_count: entry.shot_count,
                increment,
                running_total: running,
                over_limit: tool.max_shot_count.is_some_and(|max| checked > max),
            }
        })
        .collect()
}

/// Total after applying a not-yet-submitted increment.
///
/// Callers validate `pending` (finite, non-negative) before this point.
pub fn projected_total(
    policy: Policy,
    tool: &Tool,
    entries: &[ShotCounterEntry],
    pending: u64,
) -> u64 {
    current_total(policy, tool, entries).saturating_add(pending)
}

/// Headroom against the tool's configured maximum.
///
/// Absent maximum means the question does not apply, which is distinct
/// from being within limit. Equal to the limit counts as within;
/// `remaining` stays signed so callers can show how far over.
pub fn remaining_before_limit(tool: &Tool, projected: u64) -> LimitStatus {
    match tool.max_shot_count {
        None => LimitStatus::NoLimit,
        Some(max) => {
            let remaining = max as i64 - projected as i64;
            if remaining < 0 {
                LimitStatus::Over { remaining }
            } else {
                LimitStatus::Within { remaining }
            }
        }
    }
}

fn for_tool<'a>(
    tool: &'a Tool,
    entries: &'a [ShotCounterEntry],
) -> impl Iterator<Item = &'a ShotCounterEntry> {
    entries.iter().filter(move |entry| entry.tool_id == tool.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ToolStatus;
    use chrono::TimeZone;

    fn tool(initial: u64, max: Option<u64>) -> Tool {
        Tool {
            id: "tool-1".to_string(),
            asset_number: "A-001".to_string(),
            name: "Frame mold".to_string(),
            manufacturer: None,
            cavity_count: None,
            location: None,
            status: ToolStatus::Active,
            initial_shot_count: initial,
            max_shot_count: max,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn entry(id: &str, tool_id: &str, count: u64, at: Option<(u32, u32)>) -> ShotCounterEntry {
        ShotCounterEntry {
            id: id.to_string(),
            tool_id: tool_id.to_string(),
            shot_count: count,
            source: Default::default(),
            recorded_by: None,
            recorded_at: at
                .map(|(month, day)| Utc.with_ymd_and_hms(2026, month, day, 12, 0, 0).unwrap()),
        }
    }

    #[test]
    fn no_entries_yields_initial_count() {
        let tool = tool(500, None);
        assert_eq!(current_total(Policy::SumOfIncrements, &tool, &[]), 500);
        assert_eq!(current_total(Policy::MaxReading, &tool, &[]), 500);
    }

    #[test]
    fn total_never_drops_below_initial() {
        let tool = tool(900, None);
        let entries = vec![entry("a", "tool-1", 100, Some((2, 1)))];
        assert!(current_total(Policy::SumOfIncrements, &tool, &entries) >= 900);
        assert_eq!(current_total(Policy::MaxReading, &tool, &entries), 900);
    }

    #[test]
    fn entries_for_other_tools_are_excluded() {
        let tool = tool(0, None);
        let entries = vec![
            entry("a", "tool-1", 10, Some((2, 1))),
            entry("b", "tool-2", 999, Some((2, 2))),
            entry("c", "no-such-tool", 999, None),
        ];
        assert_eq!(current_total(Policy::SumOfIncrements, &tool, &entries), 10);
        assert_eq!(history(Policy::SumOfIncrements, &tool, &entries).len(), 1);
    }

    #[test]
    fn sum_policy_scenario_with_projection() {
        let tool = tool(500, Some(1000));
        let entries = vec![
            entry("a", "tool-1", 200, Some((2, 1))),
            entry("b", "tool-1", 150, Some((2, 2))),
        ];
        assert_eq!(current_total(Policy::SumOfIncrements, &tool, &entries), 850);

        let projected = projected_total(Policy::SumOfIncrements, &tool, &entries, 200);
        assert_eq!(projected, 1050);
        assert_eq!(
            remaining_before_limit(&tool, projected),
            LimitStatus::Over { remaining: -50 }
        );
    }

    #[test]
    fn max_policy_takes_highest_reading() {
        let tool = tool(0, Some(500));
        let entries = vec![
            entry("a", "tool-1", 100, Some((2, 1))),
            entry("b", "tool-1", 450, Some((2, 2))),
            entry("c", "tool-1", 300, Some((2, 3))),
        ];
        assert_eq!(current_total(Policy::MaxReading, &tool, &entries), 450);

        let points = history(Policy::MaxReading, &tool, &entries);
        assert_eq!(points.len(), 3);
        // The late stale reading neither lowers the total nor trips the limit.
        assert_eq!(points[2].shot_count, 300);
        assert_eq!(points[2].running_total, 450);
        assert!(!points[2].over_limit);
    }

    #[test]
    fn history_sorts_chronologically_with_undated_first() {
        let tool = tool(0, None);
        let entries = vec![
            entry("late", "tool-1", 30, Some((3, 1))),
            entry("undated", "tool-1", 10, None),
            entry("early", "tool-1", 20, Some((2, 1))),
        ];
        let points = history(Policy::SumOfIncrements, &tool, &entries);
        let order: Vec<&str> = points.iter().map(|p| p.entry_id.as_str()).collect();
        assert_eq!(order, vec!["undated", "early", "late"]);
        assert_eq!(points[0].running_total, 10);
        assert_eq!(points[1].running_total, 30);
        assert_eq!(points[2].running_total, 60);
    }

    #[test]
    fn history_ties_keep_original_order() {
        let tool = tool(0, None);
        let same_day = Some((2, 1));
        let entries = vec![
            entry("first", "tool-1", 1, same_day),
            entry("second", "tool-1", 2, same_day),
            entry("third", "tool-1", 3, same_day),
        ];
        let points = history(Policy::SumOfIncrements, &tool, &entries);
        let order: Vec<&str> = points.iter().map(|p| p.entry_id.as_str()).collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }

    #[test]
    fn history_marks_points_past_the_limit() {
        let tool = tool(0, Some(25));
        let entries = vec![
            entry("a", "tool-1", 20, Some((2, 1))),
            entry("b", "tool-1", 10, Some((2, 2))),
        ];
        let points = history(Policy::SumOfIncrements, &tool, &entries);
        assert!(!points[0].over_limit);
        assert!(points[1].over_limit);
        assert_eq!(points[1].running_total, 30);
    }

    #[test]
    fn missing_max_is_no_limit_not_within() {
        let tool = tool(0, None);
        assert_eq!(remaining_before_limit(&tool, 0), LimitStatus::NoLimit);
        assert_eq!(remaining_before_limit(&tool, u64::MAX), LimitStatus::NoLimit);
    }

    #[test]
    fn equal_to_limit_is_within() {
        let tool = tool(0, Some(1000));
        assert_eq!(
            remaining_before_limit(&tool, 1000),
            LimitStatus::Within { remaining: 0 }
        );
        assert_eq!(
            remaining_before_limit(&tool, 1001),
            LimitStatus::Over { remaining: -1 }
        );
    }

    #[test]
    fn repeated_calls_agree() {
        let tool = tool(5, Some(100));
        let entries = vec![
            entry("a", "tool-1", 7, Some((2, 1))),
            entry("b", "tool-1", 11, None),
        ];
        let first = current_total(Policy::SumOfIncrements, &tool, &entries);
        let second = current_total(Policy::SumOfIncrements, &tool, &entries);
        assert_eq!(first, second);
        assert_eq!(first, 23);
    }

    #[test]
    fn policy_parsing() {
        assert_eq!(Policy::parse("sum"), Some(Policy::SumOfIncrements));
        assert_eq!(Policy::parse("max-reading"), Some(Policy::MaxReading));
        assert_eq!(Policy::parse(" max "), Some(Policy::MaxReading));
        assert_eq!(Policy::parse("latest"), None);
    }
}
