use crate::models::{ActionStatus, Severity, ShotSource, Tool, ToolStatus, WorkingSet};
use crate::shots::{self, HistoryPoint, LimitStatus, Policy};
use std::collections::HashMap;

pub fn render_index(policy: Policy, data: &WorkingSet) -> String {
    INDEX_HTML
        .replace("{{POLICY}}", policy_label(policy))
        .replace("{{TOOL_ROWS}}", &tool_rows(policy, data))
        .replace("{{COUNTER_ROWS}}", &counter_rows(policy, data))
        .replace("{{MAINTENANCE_ROWS}}", &maintenance_rows(data))
        .replace("{{FAILURE_CODE_ROWS}}", &failure_code_rows(data))
        .replace("{{FAILURE_REPORT_ROWS}}", &failure_report_rows(data))
        .replace("{{ACTION_ROWS}}", &action_rows(data))
}

fn tool_rows(policy: Policy, data: &WorkingSet) -> String {
    if data.tools.is_empty() {
        return empty_row(7, "No tools registered.");
    }

    data.tools
        .iter()
        .map(|tool| {
            let total = shots::current_total(policy, tool, &data.shot_counters);
            let (total_cell, max_cell) = shot_cells(tool, total);
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>{}{}</tr>",
                escape(&tool.asset_number),
                escape(&tool.name),
                status_label(tool.status),
                escape(tool.location.as_deref().unwrap_or("-")),
                tool.initial_shot_count,
                total_cell,
                max_cell,
            )
        })
        .collect()
}

fn shot_cells(tool: &Tool, total: u64) -> (String, String) {
    match shots::remaining_before_limit(tool, total) {
        LimitStatus::NoLimit => (
            format!("<td><span class=\"shot-total\">{total}</span></td>"),
            "<td>no limit</td>".to_string(),
        ),
        LimitStatus::Within { .. } => (
            format!("<td><span class=\"shot-total\">{total}</span></td>"),
            format!("<td>{}</td>", tool.max_shot_count.unwrap_or_default()),
        ),
        LimitStatus::Over { .. } => (
            format!(
                "<td><span class=\"shot-total over-limit\">{total}</span> \
                 <span class=\"badge badge-negative\">Over limit</span></td>"
            ),
            format!("<td>{}</td>", tool.max_shot_count.unwrap_or_default()),
        ),
    }
}

fn counter_rows(policy: Policy, data: &WorkingSet) -> String {
    if data.shot_counters.is_empty() {
        return empty_row(6, "No shot counters recorded.");
    }

    // One history pass per tool, then joined back by entry id so the
    // table can keep raw insertion order while showing running totals.
    let mut points: HashMap<String, HistoryPoint> = HashMap::new();
    for tool in &data.tools {
        for point in shots::history(policy, tool, &data.shot_counters) {
            points.insert(point.entry_id.clone(), point);
        }
    }

    data.shot_counters
        .iter()
        .map(|entry| {
            let tool_name = data
                .tool(&entry.tool_id)
                .map(|tool| tool.name.as_str())
                .unwrap_or("(unknown tool)");
            let (total, badge) = match points.get(entry.id.as_str()) {
                Some(point) if point.over_limit => (
                    point.running_total.to_string(),
                    " <span class=\"badge badge-negative\">Over limit</span>".to_string(),
                ),
                Some(point) => (point.running_total.to_string(), String::new()),
                None => ("-".to_string(), String::new()),
            };
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(tool_name),
                entry.shot_count,
                total,
                badge,
                source_label(entry.source),
                escape(entry.recorded_by.as_deref().unwrap_or("-")),
                entry
                    .recorded_at
                    .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "-".to_string()),
            )
        })
        .collect()
}

fn maintenance_rows(data: &WorkingSet) -> String {
    if data.maintenance_logs.is_empty() {
        return empty_row(5, "No maintenance logged.");
    }

    data.maintenance_logs
        .iter()
        .map(|log| {
            let tool_name = data
                .tool(&log.tool_id)
                .map(|tool| tool.name.as_str())
                .unwrap_or("(unknown tool)");
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(tool_name),
                escape(&log.performed_by),
                log.duration_minutes
                    .map(|mins| format!("{mins} min"))
                    .unwrap_or_else(|| "-".to_string()),
                escape(log.observations.as_deref().unwrap_or("-")),
                if log.follow_up_required { "yes" } else { "no" },
            )
        })
        .collect()
}

fn failure_code_rows(data: &WorkingSet) -> String {
    if data.failure_codes.is_empty() {
        return empty_row(4, "No failure codes defined.");
    }

    data.failure_codes
        .iter()
        .map(|code| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(&code.code),
                escape(&code.name),
                severity_label(code.severity_default),
                if code.active { "active" } else { "inactive" },
            )
        })
        .collect()
}

fn failure_report_rows(data: &WorkingSet) -> String {
    if data.failure_reports.is_empty() {
        return empty_row(5, "No failures reported.");
    }

    data.failure_reports
        .iter()
        .map(|report| {
            let tool_name = data
                .tool(&report.tool_id)
                .map(|tool| tool.name.as_str())
                .unwrap_or("(unknown tool)");
            let code = report
                .failure_code_id
                .as_deref()
                .and_then(|id| data.failure_codes.iter().find(|code| code.id == id))
                .map(|code| code.code.as_str())
                .unwrap_or("-");
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(tool_name),
                escape(code),
                severity_label(report.severity),
                escape(&report.reported_by),
                escape(report.description.as_deref().unwrap_or("-")),
            )
        })
        .collect()
}

fn action_rows(data: &WorkingSet) -> String {
    if data.action_items.is_empty() {
        return empty_row(5, "No open actions.");
    }

    data.action_items
        .iter()
        .map(|item| {
            let tool_name = data
                .tool(&item.tool_id)
                .map(|tool| tool.name.as_str())
                .unwrap_or("(unknown tool)");
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(&item.title),
                escape(tool_name),
                escape(&item.assigned_to),
                item.due_date
                    .map(|date| date.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                action_label(item.status),
            )
        })
        .collect()
}

fn empty_row(columns: usize, message: &str) -> String {
    format!("<tr><td colspan=\"{columns}\" class=\"empty\">{message}</td></tr>")
}

fn policy_label(policy: Policy) -> &'static str {
    match policy {
        Policy::SumOfIncrements => "sum of increments",
        Policy::MaxReading => "highest reading",
    }
}

fn status_label(status: ToolStatus) -> &'static str {
    match status {
        ToolStatus::Active => "active",
        ToolStatus::Maintenance => "maintenance",
        ToolStatus::Retired => "retired",
    }
}

fn source_label(source: ShotSource) -> &'static str {
    match source {
        ShotSource::Manual => "manual",
        ShotSource::Imported => "imported",
        ShotSource::Automatic => "automatic",
    }
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Low => "low",
        Severity::Medium => "medium",
        Severity::High => "high",
        Severity::Critical => "critical",
    }
}

fn action_label(status: ActionStatus) -> &'static str {
    match status {
        ActionStatus::Open => "open",
        ActionStatus::InProgress => "in progress",
        ActionStatus::Completed => "completed",
        ActionStatus::Cancelled => "cancelled",
    }
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Tool Shot Board</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef2f5;
      --bg-2: #cfdde6;
      --ink: #22303a;
      --accent: #d9534f;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.92);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e4ecf1 60%, #f2f6f8 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      padding: 32px 24px 48px;
    }

    .board {
      width: min(1100px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    header h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.8rem, 4vw, 2.6rem);
      margin: 0;
    }

    .subtitle {
      margin: 4px 0 0;
      color: #5a6c77;
    }

    section {
      background: var(--card);
      border-radius: 18px;
      box-shadow: var(--shadow);
      padding: 22px 24px;
    }

    h2 {
      margin: 0 0 14px;
      font-size: 1.15rem;
      color: var(--accent-2);
    }

    table {
      width: 100%;
      border-collapse: collapse;
      font-size: 0.92rem;
    }

    th {
      text-align: left;
      padding: 8px 10px;
      border-bottom: 2px solid #d6e0e7;
      color: #5a6c77;
      font-weight: 500;
    }

    td {
      padding: 8px 10px;
      border-bottom: 1px solid #e7edf1;
    }

    td.empty {
      color: #8a98a1;
      text-align: center;
      padding: 18px;
    }

    .shot-total {
      font-variant-numeric: tabular-nums;
      font-weight: 600;
    }

    .shot-total.over-limit {
      color: var(--accent);
    }

    .badge {
      display: inline-block;
      border-radius: 999px;
      padding: 2px 10px;
      font-size: 0.75rem;
      margin-left: 6px;
    }

    .badge-negative {
      background: #fbe3e2;
      color: var(--accent);
    }
  </style>
</head>
<body>
  <div class="board">
    <header>
      <h1>Tool Shot Board</h1>
      <p class="subtitle">Shot totals computed as {{POLICY}}.</p>
    </header>

    <section>
      <h2>Tools</h2>
      <table>
        <thead>
          <tr>
            <th>Asset</th>
            <th>Name</th>
            <th>Status</th>
            <th>Location</th>
            <th>Initial shots</th>
            <th>Current shots</th>
            <th>Max shots</th>
          </tr>
        </thead>
        <tbody>{{TOOL_ROWS}}</tbody>
      </table>
    </section>

    <section>
      <h2>Shot counters</h2>
      <table>
        <thead>
          <tr>
            <th>Tool</th>
            <th>Shots recorded</th>
            <th>Total shots</th>
            <th>Source</th>
            <th>Recorded by</th>
            <th>Recorded at</th>
          </tr>
        </thead>
        <tbody>{{COUNTER_ROWS}}</tbody>
      </table>
    </section>

    <section>
      <h2>Maintenance</h2>
      <table>
        <thead>
          <tr>
            <th>Tool</th>
            <th>Performed by</th>
            <th>Duration</th>
            <th>Observations</th>
            <th>Follow-up</th>
          </tr>
        </thead>
        <tbody>{{MAINTENANCE_ROWS}}</tbody>
      </table>
    </section>

    <section>
      <h2>Failure codes</h2>
      <table>
        <thead>
          <tr>
            <th>Code</th>
            <th>Name</th>
            <th>Default severity</th>
            <th>State</th>
          </tr>
        </thead>
        <tbody>{{FAILURE_CODE_ROWS}}</tbody>
      </table>
    </section>

    <section>
      <h2>Failure reports</h2>
      <table>
        <thead>
          <tr>
            <th>Tool</th>
            <th>Code</th>
            <th>Severity</th>
            <th>Reported by</th>
            <th>Description</th>
          </tr>
        </thead>
        <tbody>{{FAILURE_REPORT_ROWS}}</tbody>
      </table>
    </section>

    <section>
      <h2>Action items</h2>
      <table>
        <thead>
          <tr>
            <th>Title</th>
            <th>Tool</th>
            <th>Assigned to</th>
            <th>Due</th>
            <th>Status</th>
          </tr>
        </thead>
        <tbody>{{ACTION_ROWS}}</tbody>
      </table>
    </section>
  </div>
</body>
</html>
"#;
