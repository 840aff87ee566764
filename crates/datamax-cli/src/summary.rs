use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use datamax_cli::types::{PhaseReport, PhaseStatus, PipelineResult};
use datamax_model::Entity;
use datamax_validate::Issue;

pub fn print_summary(result: &PipelineResult) {
    println!("Mode: {}", result.mode);
    println!("Output: {}", result.output_dir.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Phase"),
        header_cell("Status"),
        header_cell("Drugs"),
        header_cell("Trials"),
        header_cell("Notes"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for report in &result.phases {
        table.add_row(vec![
            Cell::new(report.phase)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            status_cell(report.status),
            count_cell(records_for(report, Entity::Drugs)),
            count_cell(records_for(report, Entity::ClinicalTrials)),
            notes_cell(&report.notes),
        ]);
    }
    println!("{table}");
    print_quality_table(result);
    print_issue_table(result);
}

fn print_quality_table(result: &PipelineResult) {
    if result.quality.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Records"),
        header_cell("Duplicates"),
        header_cell("Missing"),
        header_cell("Completeness"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for report in &result.quality {
        let missing = report
            .missing_data
            .iter()
            .map(|missing| format!("{} {:.1}%", missing.column, missing.percentage))
            .collect::<Vec<_>>();
        table.add_row(vec![
            Cell::new(&report.data_type),
            Cell::new(report.total_records),
            if report.duplicate_records > 0 {
                Cell::new(report.duplicate_records).fg(Color::Yellow)
            } else {
                dim_cell(0)
            },
            if missing.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(missing.join("\n"))
            },
            score_cell(report.completeness_score),
        ]);
    }
    println!();
    println!("Quality:");
    println!("{table}");
}

fn print_issue_table(result: &PipelineResult) {
    let issues: Vec<(String, &Issue)> = result
        .validation
        .iter()
        .flat_map(|report| {
            report
                .issues
                .iter()
                .map(move |issue| (report.entity.to_string(), issue))
        })
        .collect();
    if issues.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Column"),
        header_cell("Count"),
        header_cell("Message"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for (entity, issue) in issues {
        table.add_row(vec![
            Cell::new(entity).fg(Color::Blue),
            issue.column().map_or_else(|| dim_cell("-"), Cell::new),
            issue
                .count()
                .map_or_else(|| dim_cell("-"), |count| Cell::new(count).fg(Color::Yellow)),
            Cell::new(issue.to_string()),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

fn records_for(report: &PhaseReport, entity: Entity) -> Option<usize> {
    report
        .records
        .iter()
        .find(|(candidate, _)| *candidate == entity)
        .map(|(_, count)| *count)
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(status: PhaseStatus) -> Cell {
    let cell = Cell::new(status.as_str().to_uppercase());
    match status {
        PhaseStatus::Succeeded => cell.fg(Color::Green).add_attribute(Attribute::Bold),
        PhaseStatus::Warned => cell.fg(Color::Yellow),
        PhaseStatus::Skipped => cell.fg(Color::DarkGrey),
        PhaseStatus::Failed => cell.fg(Color::Red).add_attribute(Attribute::Bold),
    }
}

fn score_cell(score: f64) -> Cell {
    let color = if score >= 95.0 {
        Color::Green
    } else if score >= 80.0 {
        Color::Yellow
    } else {
        Color::Red
    };
    Cell::new(format!("{score:.2}")).fg(color)
}

fn notes_cell(notes: &[String]) -> Cell {
    if notes.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(notes.join("\n"))
    }
}

fn count_cell(count: Option<usize>) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
