//! Descriptive data quality report.
//!
//! Percentages are `count / total_records * 100` rounded to two decimals, and
//! the completeness score is 100 minus the mean of those rounded percentages
//! over every column. A table with no rows or no columns scores 100.

use std::collections::HashSet;

use datamax_model::Table;
use serde::Serialize;
use tracing::info;

/// Missing-value statistics for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnMissing {
    pub column: String,
    pub count: u64,
    pub percentage: f64,
}

/// Completeness summary of one table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityReport {
    pub data_type: String,
    pub total_records: u64,
    /// Rows identical to an earlier row across all columns.
    pub duplicate_records: u64,
    /// Columns with at least one missing value, in column order.
    pub missing_data: Vec<ColumnMissing>,
    pub completeness_score: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn as_count(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}

/// Build the quality report for `table` under the label `data_type`.
pub fn generate_quality_report(table: &Table, data_type: &str) -> QualityReport {
    info!(data_type, "generating quality report");
    let total = table.height();

    let mut seen = HashSet::new();
    let duplicates = table
        .rows()
        .iter()
        .filter(|row| !seen.insert(format!("{row:?}")))
        .count();

    let mut missing_data = Vec::new();
    let mut percentage_sum = 0.0;
    for column in table.columns() {
        let nulls = table
            .column_values(column)
            .map_or(0, |values| values.iter().filter(|value| value.is_null()).count());
        let percentage = if total == 0 {
            0.0
        } else {
            round2(nulls as f64 / total as f64 * 100.0)
        };
        percentage_sum += percentage;
        if nulls > 0 {
            missing_data.push(ColumnMissing {
                column: column.clone(),
                count: as_count(nulls),
                percentage,
            });
        }
    }

    let completeness_score = if table.is_empty() || table.width() == 0 {
        100.0
    } else {
        100.0 - percentage_sum / table.width() as f64
    };

    let report = QualityReport {
        data_type: data_type.to_string(),
        total_records: as_count(total),
        duplicate_records: as_count(duplicates),
        missing_data,
        completeness_score,
    };
    info!(
        data_type,
        completeness_score = report.completeness_score,
        "quality report generated"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use datamax_model::Value;

    #[test]
    fn test_rounds_percentages() {
        let table = Table::from_rows(
            "drugs",
            vec!["name".to_string(), "manufacturer".to_string()],
            vec![
                vec![Value::text("Aspirin"), Value::Null],
                vec![Value::text("Ibuprofen"), Value::text("Pfizer")],
                vec![Value::text("Metformin"), Value::text("Merck")],
            ],
        )
        .unwrap();

        let report = generate_quality_report(&table, "drugs");

        assert_eq!(report.missing_data.len(), 1);
        assert_eq!(report.missing_data[0].percentage, 33.33);
        assert!((report.completeness_score - 83.335).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_rows_compare_every_column() {
        let table = Table::from_rows(
            "drugs",
            vec!["name".to_string(), "manufacturer".to_string()],
            vec![
                vec![Value::text("Aspirin"), Value::text("Bayer")],
                vec![Value::text("Aspirin"), Value::text("Generic")],
                vec![Value::text("Aspirin"), Value::text("Bayer")],
            ],
        )
        .unwrap();

        let report = generate_quality_report(&table, "drugs");

        assert_eq!(report.duplicate_records, 1);
        assert_eq!(report.completeness_score, 100.0);
    }

    #[test]
    fn test_zero_columns() {
        let report = generate_quality_report(&Table::new("empty", Vec::new()), "empty");
        assert_eq!(report.completeness_score, 100.0);
        assert!(report.missing_data.is_empty());
    }
}
