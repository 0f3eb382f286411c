use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crm_model::BatchStats;

use crate::types::BatchResult;

pub fn print_summary(result: &BatchResult) {
    println!("Source: {}", result.source.display());
    println!("Origin: {}", result.origin);
    match &result.outputs {
        Some(outputs) => {
            println!("Accepted: {}", outputs.accepted.display());
            println!("Rejected: {}", outputs.rejected.display());
        }
        None if result.dry_run => println!("Dry run: no tables written"),
        None => {}
    }
    if let Some(path) = &result.report {
        println!("Report: {}", path.display());
    }
    println!("{}", summary_table(result));
}

/// Counter rows in display order, with the colour used for non-zero values.
pub fn stat_rows(stats: &BatchStats) -> Vec<(&'static str, usize, Option<Color>)> {
    vec![
        ("Input rows", stats.input_rows, None),
        ("Duplicates removed", stats.duplicates_removed, Some(Color::Yellow)),
        ("Accepted", stats.accepted, Some(Color::Green)),
        ("Rejected", stats.rejected, Some(Color::Red)),
        ("  invalid date", stats.invalid_dates, Some(Color::Red)),
        ("  unknown region", stats.unknown_regions, Some(Color::Red)),
        ("Unsplit names", stats.unsplit_names, Some(Color::Yellow)),
        ("Missing identity", stats.missing_identities, Some(Color::Yellow)),
        ("VIP", stats.vip, None),
    ]
}

fn summary_table(result: &BatchResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Count")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (label, value, color) in stat_rows(&result.stats) {
        table.add_row(vec![label_cell(label), count_cell(value, color)]);
    }
    if let Some(store) = &result.store {
        table.add_row(vec![
            label_cell("Stored (new)"),
            count_cell(store.inserted, Some(Color::Green)),
        ]);
        table.add_row(vec![
            label_cell("Stored (already present)"),
            count_cell(store.already_present, None),
        ]);
        table.add_row(vec![
            label_cell("Not stored (no identity)"),
            count_cell(store.skipped_missing_identity, Some(Color::Yellow)),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn label_cell(label: &str) -> Cell {
    if label.starts_with(' ') {
        dim_cell(label)
    } else {
        Cell::new(label)
    }
}

fn count_cell(value: usize, color: Option<Color>) -> Cell {
    match color {
        Some(color) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        _ if value == 0 => dim_cell(value),
        _ => Cell::new(value),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_breakdown_follows_the_total() {
        let stats = BatchStats {
            rejected: 3,
            invalid_dates: 2,
            unknown_regions: 1,
            ..BatchStats::default()
        };
        let rows = stat_rows(&stats);
        let labels: Vec<&str> = rows.iter().map(|(label, _, _)| *label).collect();
        let rejected = labels.iter().position(|label| *label == "Rejected").unwrap();
        assert_eq!(labels[rejected + 1], "  invalid date");
        assert_eq!(rows[rejected + 1].1, 2);
        assert_eq!(rows[rejected + 2].1, 1);
    }
}
