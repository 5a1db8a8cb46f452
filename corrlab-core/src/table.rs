//! Date-aligned value table.
//!
//! Multiple price series are outer-joined onto a common date axis: the axis
//! is the union of all input dates, and a column without an observation on
//! some date holds an explicit `None` — never zero, and never a forward-fill
//! of tradable price data.

use crate::data::provider::PriceSeries;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

/// A date-indexed table with one named column per series.
///
/// Row-major: `values[row][col]` is the value of `columns[col]` on
/// `dates[row]`. `dates` is sorted ascending; `columns` keeps input order.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedTable {
    dates: Vec<NaiveDate>,
    columns: Vec<String>,
    values: Vec<Vec<Option<f64>>>,
}

impl AlignedTable {
    /// Outer-join named series on date.
    ///
    /// The date axis is the union of all input dates (sorted ascending);
    /// column order follows the input slice. Dates a series does not cover
    /// become `None` in its column.
    pub fn outer_join(series: &[(String, PriceSeries)]) -> Self {
        let mut all_dates = BTreeSet::new();
        for (_, s) in series {
            for point in s.points() {
                all_dates.insert(point.date);
            }
        }
        let dates: Vec<NaiveDate> = all_dates.into_iter().collect();

        let lookups: Vec<HashMap<NaiveDate, f64>> = series
            .iter()
            .map(|(_, s)| s.points().iter().map(|p| (p.date, p.close)).collect())
            .collect();

        let values: Vec<Vec<Option<f64>>> = dates
            .iter()
            .map(|date| lookups.iter().map(|lookup| lookup.get(date).copied()).collect())
            .collect();

        Self {
            dates,
            columns: series.iter().map(|(name, _)| name.clone()).collect(),
            values,
        }
    }

    /// Day-over-day percentage change per column: `(v_t - v_{t-1}) / v_{t-1}`
    /// over consecutive table rows.
    ///
    /// The first row is `None` for every column. A cell is defined only when
    /// the column has a value on both the current and the previous row and
    /// the previous value is nonzero; gaps stay gaps.
    pub fn returns(&self) -> Self {
        let n_rows = self.values.len();
        let n_cols = self.columns.len();

        let values: Vec<Vec<Option<f64>>> = (0..n_rows)
            .map(|row| {
                (0..n_cols)
                    .map(|col| {
                        if row == 0 {
                            return None;
                        }
                        match (self.values[row - 1][col], self.values[row][col]) {
                            (Some(prev), Some(curr)) if prev != 0.0 => {
                                Some((curr - prev) / prev)
                            }
                            _ => None,
                        }
                    })
                    .collect()
            })
            .collect();

        Self {
            dates: self.dates.clone(),
            columns: self.columns.clone(),
            values,
        }
    }

    /// Keep only rows where every column has a value.
    pub fn drop_incomplete_rows(&self) -> Self {
        let mut dates = Vec::new();
        let mut values = Vec::new();

        for (date, row) in self.dates.iter().zip(&self.values) {
            if row.iter().all(|cell| cell.is_some()) {
                dates.push(*date);
                values.push(row.clone());
            }
        }

        Self {
            dates,
            columns: self.columns.clone(),
            values,
        }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.values.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Defined values of one column, in row order.
    pub fn column_values(&self, col: usize) -> Vec<f64> {
        self.values.iter().filter_map(|row| row[col]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::provider::{PriceField, PricePoint};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn series(name: &str, points: &[(&str, f64)]) -> (String, PriceSeries) {
        let points = points
            .iter()
            .map(|(date, close)| PricePoint {
                date: d(date),
                close: *close,
            })
            .collect();
        (
            name.to_string(),
            PriceSeries::new(name, PriceField::AdjClose, points),
        )
    }

    #[test]
    fn outer_join_unions_dates_and_marks_gaps() {
        let input = [
            series(
                "S&P 500",
                &[("2024-01-02", 100.0), ("2024-01-03", 101.0), ("2024-01-04", 102.0)],
            ),
            // missing 2024-01-03
            series("NASDAQ", &[("2024-01-02", 200.0), ("2024-01-04", 202.0)]),
        ];

        let table = AlignedTable::outer_join(&input);

        assert_eq!(table.dates().len(), 3);
        assert_eq!(table.columns(), ["S&P 500", "NASDAQ"]);
        assert_eq!(table.cell(1, 0), Some(101.0));
        assert_eq!(table.cell(1, 1), None);
    }

    #[test]
    fn join_keeps_column_order() {
        let input = [
            series("Zed", &[("2024-01-02", 1.0)]),
            series("Alpha", &[("2024-01-02", 2.0)]),
        ];
        let table = AlignedTable::outer_join(&input);
        assert_eq!(table.columns(), ["Zed", "Alpha"]);
    }

    #[test]
    fn returns_first_row_is_undefined() {
        let input = [series(
            "S&P 500",
            &[("2024-01-02", 100.0), ("2024-01-03", 110.0)],
        )];
        let returns = AlignedTable::outer_join(&input).returns();

        assert_eq!(returns.row_count(), 2);
        assert_eq!(returns.cell(0, 0), None);
        assert!((returns.cell(1, 0).unwrap() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn returns_do_not_bridge_gaps() {
        let input = [
            series(
                "S&P 500",
                &[("2024-01-02", 100.0), ("2024-01-03", 101.0), ("2024-01-04", 102.0)],
            ),
            series("NASDAQ", &[("2024-01-02", 200.0), ("2024-01-04", 202.0)]),
        ];
        let returns = AlignedTable::outer_join(&input).returns();

        // NASDAQ has no 01-03 price, so neither the 01-03 nor the 01-04
        // return is defined for it.
        assert_eq!(returns.cell(1, 1), None);
        assert_eq!(returns.cell(2, 1), None);
        assert!(returns.cell(2, 0).is_some());
    }

    #[test]
    fn zero_previous_price_yields_undefined_return() {
        let input = [series(
            "S&P 500",
            &[("2024-01-02", 0.0), ("2024-01-03", 110.0)],
        )];
        let returns = AlignedTable::outer_join(&input).returns();
        assert_eq!(returns.cell(1, 0), None);
    }

    #[test]
    fn drop_incomplete_keeps_only_full_rows() {
        let input = [
            series(
                "S&P 500",
                &[("2024-01-02", 100.0), ("2024-01-03", 101.0), ("2024-01-04", 102.0)],
            ),
            series("NASDAQ", &[("2024-01-02", 200.0), ("2024-01-04", 202.0)]),
        ];
        let cleaned = AlignedTable::outer_join(&input).drop_incomplete_rows();

        assert_eq!(cleaned.row_count(), 2);
        assert_eq!(cleaned.dates(), [d("2024-01-02"), d("2024-01-04")]);
    }

    #[test]
    fn returns_then_drop_leaves_common_valid_dates_only() {
        let input = [
            series(
                "S&P 500",
                &[("2024-01-02", 100.0), ("2024-01-03", 110.0), ("2024-01-04", 121.0)],
            ),
            series(
                "NASDAQ",
                &[("2024-01-02", 50.0), ("2024-01-03", 55.0), ("2024-01-04", 60.5)],
            ),
        ];
        let cleaned = AlignedTable::outer_join(&input)
            .returns()
            .drop_incomplete_rows();

        assert_eq!(cleaned.row_count(), 2);
        assert_eq!(cleaned.dates(), [d("2024-01-03"), d("2024-01-04")]);
        assert!((cleaned.cell(0, 0).unwrap() - 0.1).abs() < 1e-12);
        assert!((cleaned.cell(1, 1).unwrap() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn empty_input_yields_empty_table() {
        let table = AlignedTable::outer_join(&[]);
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
    }
}
