//! Result sorting for property search.
//!
//! Sort is stable: records with equal keys keep their input order in both
//! directions.

use crate::domain::property::PropertyRecord;
use crate::domain::query::params::SortOrder;

/// Sorts borrowed records by a named field.
pub struct ResultSorter;

impl ResultSorter {
    /// Sorts `records` in place by `field`.
    ///
    /// Descending order reverses each comparison, not the output, so ties
    /// are never reordered.
    pub fn sort(records: &mut [&PropertyRecord], field: &str, order: SortOrder) {
        records.sort_by(|a, b| {
            let ordering = a.field(field).compare(&b.field(field));
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn ids(records: &[&PropertyRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_sort_numeric_both_directions() {
        let a = PropertyRecord::new("a").with_price(300.0);
        let b = PropertyRecord::new("b").with_price(100.0);
        let c = PropertyRecord::new("c").with_price(200.0);

        let mut refs = vec![&a, &b, &c];
        ResultSorter::sort(&mut refs, "price", SortOrder::Asc);
        assert_eq!(ids(&refs), ["b", "c", "a"]);

        ResultSorter::sort(&mut refs, "price", SortOrder::Desc);
        assert_eq!(ids(&refs), ["a", "c", "b"]);
    }

    #[test]
    fn test_sort_stable_in_both_directions() {
        let a = PropertyRecord::new("a").with_price(5.0);
        let b = PropertyRecord::new("b").with_price(5.0);
        let c = PropertyRecord::new("c").with_price(1.0);
        let d = PropertyRecord::new("d").with_price(5.0);

        let mut refs = vec![&a, &b, &c, &d];
        ResultSorter::sort(&mut refs, "price", SortOrder::Desc);
        assert_eq!(ids(&refs), ["a", "b", "d", "c"]);

        let mut refs = vec![&a, &b, &c, &d];
        ResultSorter::sort(&mut refs, "price", SortOrder::Asc);
        assert_eq!(ids(&refs), ["c", "a", "b", "d"]);
    }

    #[test]
    fn test_sort_text_ignores_case() {
        let a = PropertyRecord::new("1").with_city("windsor");
        let b = PropertyRecord::new("2").with_city("Avon");
        let c = PropertyRecord::new("3").with_city("bristol");

        let mut refs = vec![&a, &b, &c];
        ResultSorter::sort(&mut refs, "city", SortOrder::Asc);
        assert_eq!(ids(&refs), ["2", "3", "1"]);
    }

    #[test]
    fn test_missing_values_sort_first_ascending() {
        let a = PropertyRecord::new("a").with_metadata("bedrooms", json!(3));
        let b = PropertyRecord::new("b");
        let c = PropertyRecord::new("c").with_metadata("bedrooms", json!(1));

        let mut refs = vec![&a, &b, &c];
        ResultSorter::sort(&mut refs, "bedrooms", SortOrder::Asc);
        assert_eq!(ids(&refs), ["b", "c", "a"]);

        ResultSorter::sort(&mut refs, "bedrooms", SortOrder::Desc);
        assert_eq!(ids(&refs), ["a", "c", "b"]);
    }

    #[test]
    fn test_sort_by_sale_date() {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        let a = PropertyRecord::new("a").with_sale_date(date(2022, 1, 9));
        let b = PropertyRecord::new("b").with_sale_date(date(2019, 7, 1));

        let mut refs = vec![&a, &b];
        ResultSorter::sort(&mut refs, "saleDate", SortOrder::Asc);
        assert_eq!(ids(&refs), ["b", "a"]);
    }

    // Every third listing carries a text value; numbers must still come out ordered.
    #[test]
    fn test_mixed_kind_field_sorts_numbers_in_order() {
        let records: Vec<PropertyRecord> = (0..300)
            .map(|i| {
                let value = if i % 3 == 0 {
                    json!(format!("lot {}", (i * 37) % 101))
                } else {
                    json!((i * 7919) % 1000)
                };
                PropertyRecord::new(format!("p{}", i)).with_metadata("lotSize", value)
            })
            .collect();

        for order in [SortOrder::Asc, SortOrder::Desc] {
            let mut refs: Vec<&PropertyRecord> = records.iter().collect();
            ResultSorter::sort(&mut refs, "lotSize", order);

            let numbers: Vec<f64> = refs
                .iter()
                .filter_map(|r| r.metadata["lotSize"].as_f64())
                .collect();
            assert_eq!(numbers.len(), 200);
            let in_order = numbers.windows(2).all(|w| match order {
                SortOrder::Asc => w[0] <= w[1],
                SortOrder::Desc => w[0] >= w[1],
            });
            assert!(in_order, "{:?} numbers out of order", order);

            // Kinds form contiguous runs: numbers before text ascending, after it descending.
            let first_text = refs.iter().position(|r| r.metadata["lotSize"].is_string()).unwrap();
            let last_text = refs.iter().rposition(|r| r.metadata["lotSize"].is_string()).unwrap();
            assert_eq!(last_text - first_text + 1, 100);
            match order {
                SortOrder::Asc => assert_eq!(first_text, 200),
                SortOrder::Desc => assert_eq!(last_text, 99),
            }
        }
    }

    #[test]
    fn test_unknown_field_keeps_input_order() {
        let a = PropertyRecord::new("z").with_price(1.0);
        let b = PropertyRecord::new("y").with_price(2.0);
        let c = PropertyRecord::new("x").with_price(0.5);

        let mut refs = vec![&a, &b, &c];
        ResultSorter::sort(&mut refs, "notAField", SortOrder::Desc);
        assert_eq!(ids(&refs), ["z", "y", "x"]);
    }
}
