//! Terminal summaries of cleaning and selection runs

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;
use polars::prelude::*;

use crate::pipeline::frame::text_values;
use crate::pipeline::{ColumnGroup, ColumnGroups, DependenceScore, DropOutcome, Result};

/// Shape change and group membership of a cleaning run
#[derive(Debug, Clone)]
pub struct CleaningSummary {
    pub initial_rows: usize,
    pub initial_columns: usize,
    pub final_rows: usize,
    pub final_columns: usize,
    pub groups: ColumnGroups,
}

impl CleaningSummary {
    pub fn new(raw: &DataFrame, cleaned: &DataFrame, groups: &ColumnGroups) -> Self {
        Self {
            initial_rows: raw.height(),
            initial_columns: raw.width(),
            final_rows: cleaned.height(),
            final_columns: cleaned.width(),
            groups: groups.clone(),
        }
    }

    pub fn duplicates_removed(&self) -> usize {
        self.initial_rows.saturating_sub(self.final_rows)
    }

    pub fn display(&self) {
        print_section("📋", "CLEANING SUMMARY");

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![Cell::new("Rows"), Cell::new(self.final_rows)]);
        table.add_row(vec![
            Cell::new("Duplicates removed"),
            Cell::new(self.duplicates_removed()).fg(if self.duplicates_removed() == 0 {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);
        table.add_row(vec![Cell::new("Initial columns"), Cell::new(self.initial_columns)]);
        table.add_row(vec![
            Cell::new("Final columns"),
            Cell::new(self.final_columns)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
        print_indented(&table);

        print_section("🗂️ ", "COLUMN GROUPS");
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Group").add_attribute(Attribute::Bold),
            Cell::new("Columns").add_attribute(Attribute::Bold),
            Cell::new("Members").add_attribute(Attribute::Bold),
        ]);
        for group in ColumnGroup::ALL {
            let members = self.groups.get(group);
            table.add_row(vec![
                Cell::new(group.name()).fg(Color::Cyan),
                Cell::new(members.len()),
                Cell::new(members.join(", ")),
            ]);
        }
        print_indented(&table);
    }
}

/// Print dependence scores, most redundant first
pub fn display_dependence(scores: &[DependenceScore]) {
    print_section("🔗", "LINEAR DEPENDENCE");

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Feature").add_attribute(Attribute::Bold),
        Cell::new("R²").add_attribute(Attribute::Bold),
    ]);
    for score in scores {
        let color = if score.r2 > 0.9 {
            Color::Red
        } else if score.r2 > 0.5 {
            Color::Yellow
        } else {
            Color::Green
        };
        table.add_row(vec![
            Cell::new(&score.feature),
            Cell::new(format!("{:.4}", score.r2)).fg(color),
        ]);
    }
    print_indented(&table);
}

/// Print the outcome of a recursive dropping run
pub fn display_selection(outcome: &DropOutcome, n_features: usize) {
    print_section("📉", "SELECTION SUMMARY");

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new("Initial Features"), Cell::new(n_features)]);
    table.add_row(vec![
        Cell::new("Dropped"),
        Cell::new(outcome.dropped.len()).fg(if outcome.dropped.is_empty() {
            Color::White
        } else {
            Color::Red
        }),
    ]);
    table.add_row(vec![
        Cell::new("Final Features"),
        Cell::new(n_features - outcome.dropped.len())
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Baseline CV R²"),
        Cell::new(format!("{:.5}", outcome.baseline_score)),
    ]);
    table.add_row(vec![
        Cell::new("Final CV R²"),
        Cell::new(format!("{:.5}", outcome.final_score))
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
    ]);
    print_indented(&table);

    if !outcome.dropped.is_empty() {
        println!();
        println!(
            "      {} {}:",
            style("Dropped, in order").yellow(),
            style(format!("({})", outcome.dropped.len())).dim()
        );
        for feature in &outcome.dropped {
            println!("        {} {}", style("•").dim(), feature);
        }
    }
}

/// Print any DataFrame as a table, values rendered as text
pub fn display_frame(title: &str, df: &DataFrame) -> Result<()> {
    print_section("📄", title);

    let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    let columns: Vec<Vec<Option<String>>> = names
        .iter()
        .map(|name| text_values(df, name))
        .collect::<Result<_>>()?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(
        names
            .iter()
            .map(|n| Cell::new(n).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    for row in 0..df.height() {
        table.add_row(
            columns
                .iter()
                .map(|c| Cell::new(c[row].as_deref().unwrap_or("")))
                .collect::<Vec<_>>(),
        );
    }
    print_indented(&table);
    Ok(())
}

fn print_section(icon: &str, title: &str) {
    println!();
    println!("    {} {}", style(icon).cyan(), style(title).white().bold());
    println!("    {}", style("─".repeat(50)).dim());
    println!();
}

fn print_indented(table: &Table) {
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}
