use prettytable::{Cell, Row, Table};
use serde::Serialize;

use crate::solver::{outcome::SolvedGrid, rule::Rule};

/// Counters for a single registered rule across the whole solve.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PerRuleStats {
    pub applications: u64,
    pub edges_removed: u64,
}

/// Counters for one full solve: rounds run, edges at the start and end, and
/// per-rule contribution, in registration order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SolveStats {
    pub rounds: usize,
    pub initial_edges: usize,
    pub final_edges: usize,
    pub forced_assignments: u64,
    pub rule_stats: Vec<PerRuleStats>,
}

impl SolveStats {
    pub(crate) fn new(rules: &[Box<dyn Rule>], initial_edges: usize) -> Self {
        Self {
            initial_edges,
            rule_stats: vec![PerRuleStats::default(); rules.len()],
            ..Default::default()
        }
    }

    pub(crate) fn record_application(&mut self, rule_id: usize, edges_removed: usize) {
        let entry = &mut self.rule_stats[rule_id];
        entry.applications += 1;
        entry.edges_removed += edges_removed as u64;
    }
}

/// Renders the per-rule counters as a table, most productive rules first.
pub fn render_stats_table(stats: &SolveStats, rules: &[Box<dyn Rule>]) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Rule Type"),
        Cell::new("ID"),
        Cell::new("Description"),
        Cell::new("Applications"),
        Cell::new("Edges Removed"),
    ]));

    let mut sorted_stats: Vec<(usize, &PerRuleStats)> =
        stats.rule_stats.iter().enumerate().collect();
    sorted_stats.sort_by_key(|(_, s)| std::cmp::Reverse(s.edges_removed));

    for (rule_id, rule_stats) in sorted_stats {
        let descriptor = rules[rule_id].descriptor();
        table.add_row(Row::new(vec![
            Cell::new(&descriptor.name),
            Cell::new(&rule_id.to_string()),
            Cell::new(&descriptor.description),
            Cell::new(&rule_stats.applications.to_string()),
            Cell::new(&rule_stats.edges_removed.to_string()),
        ]));
    }

    table.to_string()
}

/// Renders a solved grid as a table with one row per slot, anchored on the
/// items of `anchor_category`.
pub fn render_grid_table(grid: &SolvedGrid, anchor_category: &str) -> String {
    let mut categories: Vec<&str> = Vec::new();
    let mut rows: Vec<(&str, &std::collections::BTreeMap<String, String>)> = Vec::new();
    for (item, answers) in grid.iter() {
        if answers.contains_key(anchor_category) {
            continue;
        }
        // Items without an anchor-category answer are the anchors themselves.
        if categories.is_empty() {
            categories = answers.keys().map(String::as_str).collect();
        }
        rows.push((item, answers));
    }

    let mut table = Table::new();
    let mut header = vec![Cell::new(anchor_category)];
    header.extend(categories.iter().map(|c| Cell::new(c)));
    table.add_row(Row::new(header));

    for (item, answers) in rows {
        let mut cells = vec![Cell::new(item)];
        for category in &categories {
            cells.push(Cell::new(answers.get(*category).map(String::as_str).unwrap_or("")));
        }
        table.add_row(Row::new(cells));
    }

    table.to_string()
}
