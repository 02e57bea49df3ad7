use crate::cluster::{MergeStep, SimilarityMatrix};
use colored::*;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color as TableColor, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub fn create_spinner(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

pub fn section_header(title: &str) {
    eprintln!("\n{} {}", "▶".cyan().bold(), title.bold());
}

pub fn success(message: &str) {
    eprintln!("{} {}", "✓".green().bold(), message);
}

fn styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Joins in the order they happened, one row each
pub fn merge_table(merges: &[MergeStep]) -> Table {
    let mut table = styled_table();
    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Left").add_attribute(Attribute::Bold).fg(TableColor::Cyan),
        Cell::new("Right").add_attribute(Attribute::Bold).fg(TableColor::Cyan),
        Cell::new("Similarity").add_attribute(Attribute::Bold),
        Cell::new("Roots").add_attribute(Attribute::Bold),
    ]);

    for (step, merge) in merges.iter().enumerate() {
        table.add_row(vec![
            Cell::new(step + 1),
            Cell::new(&merge.left),
            Cell::new(&merge.right),
            Cell::new(format!("{:.4}", merge.similarity))
                .fg(TableColor::Green)
                .set_alignment(CellAlignment::Right),
            Cell::new(merge.forest_size).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

/// Square similarity table; the diagonal is left blank
pub fn similarity_table(matrix: &SimilarityMatrix) -> Table {
    let names: Vec<&str> = matrix.names().collect();
    let mut table = styled_table();

    let mut header = vec![Cell::new("")];
    header.extend(
        names
            .iter()
            .map(|name| Cell::new(name).add_attribute(Attribute::Bold).fg(TableColor::Cyan)),
    );
    table.set_header(header);

    for row in &names {
        let mut cells = vec![Cell::new(row).add_attribute(Attribute::Bold).fg(TableColor::Cyan)];
        for column in &names {
            let cell = match matrix.similarity(row, column) {
                Some(value) => Cell::new(format!("{:.4}", value)),
                None => Cell::new("-").fg(TableColor::DarkGrey),
            };
            cells.push(cell.set_alignment(CellAlignment::Right));
        }
        table.add_row(cells);
    }

    table
}

/// Comma-separated similarity matrix with a header row
pub fn similarity_csv(matrix: &SimilarityMatrix) -> String {
    let names: Vec<&str> = matrix.names().collect();
    let mut csv = String::new();

    csv.push_str("organism");
    for name in &names {
        csv.push(',');
        csv.push_str(&csv_field(name));
    }
    csv.push('\n');

    for row in &names {
        csv.push_str(&csv_field(row));
        for column in &names {
            csv.push(',');
            match matrix.similarity(row, column) {
                Some(value) => csv.push_str(&format!("{:.6}", value)),
                None => csv.push_str("1.000000"),
            }
        }
        csv.push('\n');
    }

    csv
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bio::parse_records_from_str;

    fn matrix() -> SimilarityMatrix {
        let records = parse_records_from_str(">a\nAAAA\n\n>b\nAAAA\n\n>c\nCCCC\n", 2).unwrap();
        SimilarityMatrix::from_records(&records)
    }

    #[test]
    fn test_similarity_csv() {
        let csv = similarity_csv(&matrix());
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "organism,a,b,c");
        assert_eq!(lines[1], "a,1.000000,1.000000,0.000000");
        assert_eq!(lines[3], "c,0.000000,0.000000,1.000000");
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_tables_have_a_row_per_entry() {
        assert_eq!(similarity_table(&matrix()).row_iter().count(), 3);

        let merges = vec![MergeStep {
            left: "a".to_string(),
            right: "b".to_string(),
            similarity: 1.0,
            forest_size: 3,
        }];
        assert_eq!(merge_table(&merges).row_iter().count(), 1);
    }
}
