//! Tests for KPI computation and low stock detection

use super::*;

fn example_table() -> InventoryTable {
    InventoryTable::new(vec![
        InventoryRow::new("A", 10, 20, None),
        InventoryRow::new("B", 30, 10, None),
    ])
}

fn table_without(column: &str, rows: Vec<InventoryRow>) -> InventoryTable {
    let headers: Vec<String> = Column::all()
        .iter()
        .map(|c| c.header().to_string())
        .filter(|h| h != column)
        .collect();
    let records = rows
        .iter()
        .map(|r| {
            headers
                .iter()
                .map(|h| match h.as_str() {
                    "Product" => r.product.clone(),
                    "Stock" => r.stock.to_string(),
                    "ReorderLevel" => r.reorder_level.to_string(),
                    _ => r.category.clone().unwrap_or_default(),
                })
                .collect()
        })
        .collect::<Vec<Vec<String>>>();
    InventoryTable::from_records(headers, records).unwrap()
}

mod kpis {
    use super::*;

    #[test]
    fn example_values() {
        let table = example_table();

        assert_eq!(total_stock(&table).unwrap(), 40);
        assert!((avg_reorder(&table).unwrap() - 15.0).abs() < 1e-9);
        assert!((days_on_hand(&table).unwrap() - 2.5).abs() < 1e-9);
        assert!((turnover(&table).unwrap() - 1.33).abs() < 1e-9);
    }

    #[test]
    fn compute_bundles_all_metrics() {
        let kpis = Kpis::compute(&example_table()).unwrap();

        assert_eq!(kpis.total_stock, 40);
        assert_eq!(kpis.fill_rate, FILL_RATE);
        assert!((kpis.days_on_hand - 2.5).abs() < 1e-9);
        assert!((kpis.turnover - 1.33).abs() < 1e-9);
    }

    #[test]
    fn empty_table() {
        let table = InventoryTable::default();

        assert_eq!(total_stock(&table).unwrap(), 0);
        assert!(avg_reorder(&table).unwrap().is_nan());
        assert_eq!(days_on_hand(&table).unwrap(), 0.0);
        assert!(matches!(turnover(&table), Err(Error::DivideByZero(_))));
    }

    #[test]
    fn turnover_fails_when_all_reorder_levels_are_zero() {
        let table = InventoryTable::new(vec![
            InventoryRow::new("A", 5, 0, None),
            InventoryRow::new("B", 7, 0, None),
        ]);

        assert!(matches!(
            turnover(&table),
            Err(Error::DivideByZero("turnover"))
        ));
        assert!(Kpis::compute(&table).is_err());
        // days on hand stays defined thanks to the +1 guard
        assert_eq!(days_on_hand(&table).unwrap(), 12.0);
    }

    #[test]
    fn rounding() {
        let table = InventoryTable::new(vec![
            InventoryRow::new("A", 10, 2, None),
            InventoryRow::new("B", 0, 1, None),
        ]);

        // 10 / (1.5 + 1) = 4.0, 10 / 3 = 3.333..
        assert_eq!(days_on_hand(&table).unwrap(), 4.0);
        assert_eq!(turnover(&table).unwrap(), 3.33);
    }

    #[test]
    fn missing_reorder_level_fails() {
        let table = table_without("ReorderLevel", example_table().rows().to_vec());

        assert!(matches!(
            avg_reorder(&table),
            Err(Error::MissingColumn("ReorderLevel"))
        ));
        assert!(matches!(
            days_on_hand(&table),
            Err(Error::MissingColumn("ReorderLevel"))
        ));
        assert!(Kpis::compute(&table).is_err());
    }

    #[test]
    fn missing_stock_fails() {
        let table = table_without("Stock", example_table().rows().to_vec());

        assert!(matches!(
            total_stock(&table),
            Err(Error::MissingColumn("Stock"))
        ));
    }
}

mod low_stock_detection {
    use super::*;

    #[test]
    fn example_low_stock() {
        let low = low_stock(&example_table()).unwrap();

        assert_eq!(low.len(), 1);
        assert_eq!(low[0].product, "A");
    }

    #[test]
    fn strictly_below_reorder_level_in_order() {
        let table = InventoryTable::new(vec![
            InventoryRow::new("C", 4, 5, None),
            InventoryRow::new("D", 5, 5, None),
            InventoryRow::new("E", 0, 1, None),
            InventoryRow::new("F", 9, 3, None),
        ]);

        let names: Vec<String> = low_stock(&table)
            .unwrap()
            .into_iter()
            .map(|r| r.product)
            .collect();
        assert_eq!(names, vec!["C", "E"]);
    }

    #[test]
    fn is_idempotent() {
        let table = example_table();
        assert_eq!(low_stock(&table).unwrap(), low_stock(&table).unwrap());
    }

    #[test]
    fn missing_reorder_level_fails() {
        let table = table_without("ReorderLevel", example_table().rows().to_vec());

        assert!(matches!(
            low_stock(&table),
            Err(Error::MissingColumn("ReorderLevel"))
        ));
    }
}

mod lowest {
    use super::*;

    #[test]
    fn returns_sorted_prefix() {
        let table = InventoryTable::new(vec![
            InventoryRow::new("A", 9, 0, None),
            InventoryRow::new("B", 3, 0, None),
            InventoryRow::new("C", 7, 0, None),
            InventoryRow::new("D", 1, 0, None),
            InventoryRow::new("E", 8, 0, None),
            InventoryRow::new("F", 2, 0, None),
        ]);

        let names: Vec<String> = top_n_lowest(&table, 5)
            .unwrap()
            .into_iter()
            .map(|r| r.product)
            .collect();
        assert_eq!(names, vec!["D", "F", "B", "C", "E"]);
    }

    #[test]
    fn ties_keep_table_order() {
        let table = InventoryTable::new(vec![
            InventoryRow::new("X", 2, 0, None),
            InventoryRow::new("Y", 1, 0, None),
            InventoryRow::new("Z", 2, 0, None),
        ]);

        let names: Vec<String> = top_n_lowest(&table, 3)
            .unwrap()
            .into_iter()
            .map(|r| r.product)
            .collect();
        assert_eq!(names, vec!["Y", "X", "Z"]);
    }

    #[test]
    fn small_table_returns_everything() {
        let lowest = top_n_lowest(&example_table(), 5).unwrap();
        assert_eq!(lowest.len(), 2);
        assert_eq!(lowest[0].product, "A");
    }

    #[test]
    fn missing_product_fails() {
        let table = table_without("Product", example_table().rows().to_vec());
        assert!(matches!(
            top_n_lowest(&table, 5),
            Err(Error::MissingColumn("Product"))
        ));
    }
}

mod categories {
    use super::*;

    #[test]
    fn sums_by_category_sorted_by_name() {
        let table = InventoryTable::new(vec![
            InventoryRow::new("A", 5, 0, Some("Tools")),
            InventoryRow::new("B", 3, 0, Some("Parts")),
            InventoryRow::new("C", 2, 0, Some("Tools")),
            InventoryRow::new("D", 8, 0, None),
        ]);

        let totals = stock_by_category(&table).unwrap().unwrap();
        assert_eq!(
            totals,
            vec![("Parts".to_string(), 3), ("Tools".to_string(), 7)]
        );
    }

    #[test]
    fn no_category_column_skips_chart() {
        let table = table_without("Category", example_table().rows().to_vec());
        assert_eq!(stock_by_category(&table).unwrap(), None);
    }

    #[test]
    fn overflowing_category_total_fails() {
        let table = InventoryTable::new(vec![
            InventoryRow::new("A", u64::MAX, 1, Some("Tools")),
            InventoryRow::new("B", 1, 1, Some("Tools")),
        ]);
        assert!(matches!(
            stock_by_category(&table),
            Err(Error::Overflow("Stock"))
        ));
    }
}

mod overflow {
    use super::*;

    fn huge_table() -> InventoryTable {
        InventoryTable::new(vec![
            InventoryRow::new("A", u64::MAX, u64::MAX, None),
            InventoryRow::new("B", 1, 1, None),
        ])
    }

    #[test]
    fn total_stock_reports_overflow() {
        assert!(matches!(
            total_stock(&huge_table()),
            Err(Error::Overflow("Stock"))
        ));
    }

    #[test]
    fn reorder_sum_reports_overflow() {
        let table = InventoryTable::new(vec![
            InventoryRow::new("A", 1, u64::MAX, None),
            InventoryRow::new("B", 1, 1, None),
        ]);
        assert!(matches!(
            avg_reorder(&table),
            Err(Error::Overflow("ReorderLevel"))
        ));
        assert!(matches!(
            turnover(&table),
            Err(Error::Overflow("ReorderLevel"))
        ));
    }

    #[test]
    fn compute_propagates_overflow() {
        assert!(Kpis::compute(&huge_table()).is_err());
    }

    #[test]
    fn largest_single_value_still_sums() {
        let table = InventoryTable::new(vec![InventoryRow::new("A", u64::MAX, 1, None)]);
        assert_eq!(total_stock(&table).unwrap(), u64::MAX);
    }
}
