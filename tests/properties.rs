use proptest::prelude::*;

use revenue_recon::config::ColumnNames;
use revenue_recon::loader::read_table;
use revenue_recon::output::write_table;
use revenue_recon::{reconcile, reconcile_with, Cell, CostType, ReconConfig, Row, Table};

const COST_TYPES: [&str; 5] = ["CPM", "CPC", "Cost Per Unit", "Flat Fee", ""];

#[derive(Debug, Clone)]
struct Input {
    line_item: u8,
    cost_type: usize,
    goal: u32,
    kpi: u32,
    spend_cents: u32,
}

fn input() -> impl Strategy<Value = Input> {
    (0u8..5, 0usize..COST_TYPES.len(), 0u32..100_000, 0u32..50_000, 0u32..1_000_000).prop_map(
        |(line_item, cost_type, goal, kpi, spend_cents)| Input {
            line_item,
            cost_type,
            goal,
            kpi,
            spend_cents,
        },
    )
}

fn table(inputs: &[Input]) -> Table {
    let header: Vec<String> = ColumnNames::default()
        .required()
        .iter()
        .map(|(_, n)| n.to_string())
        .collect();
    let rows: Vec<Row> = inputs
        .iter()
        .map(|i| {
            let mut r: Row = vec![Cell::text("x"); 6];
            r.push(Cell::text(format!("L{}", i.line_item)));
            r.push(Cell::text(COST_TYPES[i.cost_type]));
            r.push(Cell::text(i.goal.to_string()));
            r.extend([Cell::Empty, Cell::Empty, Cell::Empty]);
            r.push(Cell::text(i.kpi.to_string()));
            r.push(Cell::text(format!("{}.{:02}", i.spend_cents / 100, i.spend_cents % 100)));
            r
        })
        .collect();
    Table::new(header, rows)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * b.abs().max(1.0)
}

proptest! {
    #[test]
    fn weights_sum_to_one_or_are_all_zero(inputs in prop::collection::vec(input(), 1..40)) {
        let out = reconcile_with(&table(&inputs), &ReconConfig::default()).unwrap();
        for group in &out.groups {
            let weights: Vec<f64> = group.rows.iter().map(|&p| out.allocations[p].weight).collect();
            if group.total_delivery > 0.0 {
                prop_assert!(close(weights.iter().sum::<f64>(), 1.0));
            } else {
                prop_assert!(weights.iter().all(|w| *w == 0.0));
            }
        }
    }

    #[test]
    fn contracted_actuals_add_up_to_goal(inputs in prop::collection::vec(input(), 1..40)) {
        let out = reconcile_with(&table(&inputs), &ReconConfig::default()).unwrap();
        for group in out.groups.iter().filter(|g| g.total_delivery > 0.0) {
            let total: f64 = group.rows.iter().map(|&p| out.allocations[p].contracted_actual).sum();
            prop_assert!(close(total, group.contracted_goal));
        }
    }

    #[test]
    fn extra_delivery_is_kpi_minus_actual(inputs in prop::collection::vec(input(), 1..40)) {
        let out = reconcile_with(&table(&inputs), &ReconConfig::default()).unwrap();
        for (i, a) in inputs.iter().zip(&out.allocations) {
            prop_assert_eq!(a.extra_delivery, i.kpi as f64 - a.contracted_actual);
        }
    }

    #[test]
    fn every_row_is_kept_in_order(inputs in prop::collection::vec(input(), 0..40)) {
        let t = table(&inputs);
        let out = reconcile(&t).unwrap();
        prop_assert_eq!(out.rows.len(), t.rows.len());
        for (before, after) in t.rows.iter().zip(&out.rows) {
            prop_assert_eq!(&after[..before.len()], &before[..]);
        }
    }

    #[test]
    fn zero_kpi_costs_nothing(spend in 0.0f64..1e6, extra in -1e6f64..1e6) {
        for label in COST_TYPES {
            let ct = CostType::parse(label);
            let cost = ct.cost_per_kpi(spend, 0.0);
            prop_assert_eq!(cost, 0.0);
            prop_assert_eq!(ct.extra_spend(extra, cost), 0.0);
        }
    }

    #[test]
    fn reconcile_is_idempotent_on_reload(inputs in prop::collection::vec(input(), 1..25)) {
        let t = table(&inputs);
        let first = reconcile(&t).unwrap();

        let mut buf = Vec::new();
        write_table(&mut buf, &first).unwrap();
        let (reloaded, _) = read_table(buf.as_slice()).unwrap();
        let second = reconcile(&reloaded.truncated(t.header.len())).unwrap();

        for (a, b) in first.rows.iter().zip(&second.rows) {
            let a: Vec<String> = a.iter().map(|c| c.to_string()).collect();
            let b: Vec<String> = b.iter().map(|c| c.to_string()).collect();
            prop_assert_eq!(a, b);
        }
    }
}
