//! Pairwise Pearson correlation.
//!
//! Pure functions over cleaned return columns, in the style of the
//! performance-metric helpers: slice in, scalar out, no table or provider
//! dependencies.
//!
//! Coefficient policy: two identical return columns — every self-pair, and
//! cross-pairs with element-wise equal returns — are `1.0` by definition.
//! Any other pair with fewer than two observations or zero variance on
//! either side is undefined (`None`) and serializes as JSON `null`.

use crate::table::AlignedTable;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Sample Pearson correlation coefficient of two equal-length slices.
///
/// Returns `None` for mismatched or sub-2-length inputs and for zero
/// variance on either side. The result is clamped to `[-1, 1]` to absorb
/// floating-point overshoot on perfectly collinear inputs.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom.is_nan() || denom <= 0.0 {
        return None;
    }

    Some((cov / denom).clamp(-1.0, 1.0))
}

/// Square correlation matrix keyed by display name.
///
/// `names` keeps the order of the cleaned table's columns (and therefore
/// basket declaration order). Serializes as the nested mapping
/// `{name: {name: coefficient | null}}` with keys in that order.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    names: Vec<String>,
    values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn empty() -> Self {
        Self {
            names: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Correlate every pair of columns of a cleaned returns table.
    ///
    /// Expects the table to have already passed through
    /// [`AlignedTable::drop_incomplete_rows`]; a table with no rows (or no
    /// columns) collapses to the empty matrix. Each unordered pair is
    /// computed once and mirrored, so symmetry holds structurally.
    pub fn from_returns(table: &AlignedTable) -> Self {
        if table.row_count() == 0 || table.column_count() == 0 {
            return Self::empty();
        }

        let n = table.column_count();
        let columns: Vec<Vec<f64>> = (0..n).map(|c| table.column_values(c)).collect();

        let mut values = vec![vec![None; n]; n];
        for i in 0..n {
            values[i][i] = Some(1.0);
            for j in i + 1..n {
                // Identical columns are perfectly proportional price moves:
                // 1.0 by definition even when variance is zero.
                let coeff = if columns[i] == columns[j] {
                    Some(1.0)
                } else {
                    pearson(&columns[i], &columns[j])
                };
                values[i][j] = coeff;
                values[j][i] = coeff;
            }
        }

        Self {
            names: table.columns().to_vec(),
            values,
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Coefficient for a pair of display names, `None` when either name is
    /// absent or the coefficient is undefined.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.names.iter().position(|n| n == a)?;
        let j = self.names.iter().position(|n| n == b)?;
        self.values[i][j]
    }
}

impl Serialize for CorrelationMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Row<'a> {
            names: &'a [String],
            cells: &'a [Option<f64>],
        }

        impl Serialize for Row<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.names.len()))?;
                for (name, cell) in self.names.iter().zip(self.cells) {
                    map.serialize_entry(name, cell)?;
                }
                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(self.names.len()))?;
        for (name, cells) in self.names.iter().zip(&self.values) {
            map.serialize_entry(
                name,
                &Row {
                    names: &self.names,
                    cells,
                },
            )?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::provider::{PriceField, PricePoint, PriceSeries};
    use chrono::NaiveDate;

    fn returns_table(columns: &[(&str, &[f64])]) -> AlignedTable {
        // Synthesize a price series whose day-over-day returns equal the
        // requested column, then run it through the real pipeline steps.
        let series: Vec<(String, PriceSeries)> = columns
            .iter()
            .map(|(name, rets)| {
                let mut price = 100.0;
                let mut points = vec![PricePoint {
                    date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                    close: price,
                }];
                for (i, r) in rets.iter().enumerate() {
                    price *= 1.0 + r;
                    points.push(PricePoint {
                        date: NaiveDate::from_ymd_opt(2024, 1, 2 + i as u32).unwrap(),
                        close: price,
                    });
                }
                (
                    name.to_string(),
                    PriceSeries::new(*name, PriceField::AdjClose, points),
                )
            })
            .collect();

        AlignedTable::outer_join(&series)
            .returns()
            .drop_incomplete_rows()
    }

    #[test]
    fn pearson_perfectly_proportional_is_one() {
        assert_eq!(pearson(&[0.1, 0.2, 0.3], &[0.2, 0.4, 0.6]), Some(1.0));
    }

    #[test]
    fn pearson_inverse_is_minus_one() {
        assert_eq!(pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]), Some(-1.0));
    }

    #[test]
    fn pearson_zero_variance_is_undefined() {
        assert_eq!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]), None);
    }

    #[test]
    fn pearson_needs_two_observations() {
        assert_eq!(pearson(&[1.0], &[2.0]), None);
        assert_eq!(pearson(&[], &[]), None);
        assert_eq!(pearson(&[1.0, 2.0], &[1.0]), None);
    }

    #[test]
    fn matrix_diagonal_is_exactly_one() {
        let table = returns_table(&[
            ("S&P 500", &[0.01, -0.02, 0.03]),
            ("NASDAQ", &[0.02, 0.01, -0.01]),
        ]);
        let matrix = CorrelationMatrix::from_returns(&table);
        assert_eq!(matrix.get("S&P 500", "S&P 500"), Some(1.0));
        assert_eq!(matrix.get("NASDAQ", "NASDAQ"), Some(1.0));
    }

    #[test]
    fn matrix_is_symmetric() {
        let table = returns_table(&[
            ("S&P 500", &[0.01, -0.02, 0.03, 0.005]),
            ("NASDAQ", &[0.02, 0.01, -0.01, 0.0]),
        ]);
        let matrix = CorrelationMatrix::from_returns(&table);
        assert_eq!(
            matrix.get("S&P 500", "NASDAQ"),
            matrix.get("NASDAQ", "S&P 500")
        );
    }

    #[test]
    fn zero_variance_cross_pair_is_null_self_pair_is_one() {
        let table = returns_table(&[
            ("Flat", &[0.0, 0.0, 0.0]),
            ("NASDAQ", &[0.02, 0.01, -0.01]),
        ]);
        let matrix = CorrelationMatrix::from_returns(&table);
        assert_eq!(matrix.get("Flat", "Flat"), Some(1.0));
        assert_eq!(matrix.get("Flat", "NASDAQ"), None);
        assert_eq!(matrix.get("NASDAQ", "NASDAQ"), Some(1.0));
    }

    #[test]
    fn identical_columns_correlate_to_one_even_when_constant() {
        let table = returns_table(&[("A", &[0.1, 0.1]), ("B", &[0.1, 0.1])]);
        let matrix = CorrelationMatrix::from_returns(&table);
        assert_eq!(matrix.get("A", "B"), Some(1.0));
    }

    #[test]
    fn empty_table_collapses_to_empty_matrix() {
        let matrix = CorrelationMatrix::from_returns(&AlignedTable::outer_join(&[]));
        assert!(matrix.is_empty());
    }

    #[test]
    fn serializes_as_ordered_nested_mapping() {
        let table = returns_table(&[
            ("Zed", &[0.01, -0.02, 0.03]),
            ("Alpha", &[0.02, 0.01, -0.01]),
        ]);
        let matrix = CorrelationMatrix::from_returns(&table);
        let json = serde_json::to_string(&matrix).unwrap();

        // Input order, not alphabetical.
        assert!(json.find("\"Zed\"").unwrap() < json.find("\"Alpha\"").unwrap());

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["Zed"]["Zed"], 1.0);
        assert_eq!(value["Zed"]["Alpha"], value["Alpha"]["Zed"]);
    }

    #[test]
    fn empty_matrix_serializes_as_empty_object() {
        let json = serde_json::to_string(&CorrelationMatrix::empty()).unwrap();
        assert_eq!(json, "{}");
    }
}
