//! Recommendation synthesis: order quantities, assembly, ordering, and the
//! quick forecast facade.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use stocksense_catalog::{CatalogItem, SaleEvent};
use stocksense_core::Sku;

use crate::classify::{ReorderPriority, ReorderReason, classify, prioritize};
use crate::history::{DEFAULT_WINDOW_DAYS, aggregate};
use crate::lead_time::LeadTime;
use crate::stockout::{DaysOfStock, project};
use crate::velocity::{VelocityEstimate, estimate};

/// Lightweight single-item summary: estimator + projector only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub average_daily_units: f64,
    pub days_until_stockout: DaysOfStock,
}

/// One line of the restocking plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderRecommendation {
    pub item: CatalogItem,
    pub current_stock: u32,
    pub recommended_order_quantity: u32,
    pub days_of_stock_remaining: DaysOfStock,
    pub average_daily_units: f64,
    pub estimated_stockout_date: Option<NaiveDate>,
    pub reason: ReorderReason,
    pub priority: ReorderPriority,
}

/// Units to order for one item.
///
/// With measured velocity: enough to cover lead-time demand beyond what is
/// already on hand. Without data: plain stock-level replenishment back up to
/// the floor. Saturating unsigned arithmetic keeps the result >= 0.
fn order_quantity(item: &CatalogItem, estimate: &VelocityEstimate, lead_time: LeadTime) -> u32 {
    if estimate.has_sufficient_data {
        let lead_demand = (estimate.average_daily_units * f64::from(lead_time.days())).ceil();
        (lead_demand as u32).saturating_sub(item.current_stock())
    } else {
        item.min_stock_level().saturating_sub(item.current_stock())
    }
}

/// Run the full pipeline over a catalog snapshot with the default 30-day
/// lookback window.
///
/// Pure function of `(items, histories, lead_time, today)`: identical inputs
/// yield an identical, order-stable list.
pub fn generate_recommendations(
    items: &[CatalogItem],
    history_by_sku: &HashMap<Sku, Vec<SaleEvent>>,
    lead_time: LeadTime,
    today: NaiveDate,
) -> Vec<ReorderRecommendation> {
    generate_recommendations_in_window(items, history_by_sku, DEFAULT_WINDOW_DAYS, lead_time, today)
}

/// [`generate_recommendations`] with an explicit lookback window.
pub fn generate_recommendations_in_window(
    items: &[CatalogItem],
    history_by_sku: &HashMap<Sku, Vec<SaleEvent>>,
    window_days: u32,
    lead_time: LeadTime,
    today: NaiveDate,
) -> Vec<ReorderRecommendation> {
    static NO_EVENTS: Vec<SaleEvent> = Vec::new();

    let mut recommendations: Vec<ReorderRecommendation> = Vec::new();

    for item in items {
        let events = history_by_sku.get(item.sku()).unwrap_or(&NO_EVENTS);
        let history = aggregate(item.sku(), std::slice::from_ref(events), window_days, today);
        let velocity = estimate(&history);
        let projection = project(item.current_stock(), &velocity, today);

        let Some(reason) = classify(item, &velocity, projection.days_remaining, lead_time) else {
            continue;
        };
        let priority = prioritize(reason, projection.days_remaining, lead_time);

        recommendations.push(ReorderRecommendation {
            current_stock: item.current_stock(),
            recommended_order_quantity: order_quantity(item, &velocity, lead_time),
            days_of_stock_remaining: projection.days_remaining,
            average_daily_units: velocity.average_daily_units,
            estimated_stockout_date: projection.estimated_date,
            reason,
            priority,
            item: item.clone(),
        });
    }

    // Priority desc, runway asc (unbounded last), then name for a stable UI
    // order.
    recommendations.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| a.days_of_stock_remaining.cmp(&b.days_of_stock_remaining))
            .then_with(|| a.item.name().cmp(b.item.name()))
    });

    recommendations
}

/// [`generate_recommendations`] evaluated at the current UTC date.
pub fn generate_recommendations_now(
    items: &[CatalogItem],
    history_by_sku: &HashMap<Sku, Vec<SaleEvent>>,
    lead_time: LeadTime,
) -> Vec<ReorderRecommendation> {
    generate_recommendations(items, history_by_sku, lead_time, Utc::now().date_naive())
}

/// Single-item read path: estimator + projector only, bypassing
/// classification and synthesis.
///
/// Shares the exact estimator and projector with the full pipeline, so the
/// two paths cannot disagree on velocity.
pub fn quick_forecast(
    item: &CatalogItem,
    history: &[SaleEvent],
    window_days: u32,
    today: NaiveDate,
) -> Forecast {
    let batch = history.to_vec();
    let aggregated = aggregate(item.sku(), std::slice::from_ref(&batch), window_days, today);
    let velocity = estimate(&aggregated);
    let projection = project(item.current_stock(), &velocity, today);

    Forecast {
        average_daily_units: velocity.average_daily_units,
        days_until_stockout: projection.days_remaining,
    }
}

/// [`quick_forecast`] evaluated at the current UTC date.
pub fn quick_forecast_now(item: &CatalogItem, history: &[SaleEvent], window_days: u32) -> Forecast {
    quick_forecast(item, history, window_days, Utc::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;
    use stocksense_catalog::SalesChannelKind;

    fn sku(s: &str) -> Sku {
        Sku::new(s).unwrap()
    }

    fn item(s: &str, name: &str, stock: u32, min: u32) -> CatalogItem {
        CatalogItem::new(sku(s), name, stock, min).unwrap()
    }

    fn today() -> NaiveDate {
        "2026-08-30".parse().unwrap()
    }

    /// Spread `total_units` evenly over the `days` leading up to `today`.
    fn steady_sales(s: &str, total_units: u32, days: u32) -> Vec<SaleEvent> {
        let per_day = total_units / days;
        (0..days)
            .map(|offset| {
                let date = today().checked_sub_days(Days::new(u64::from(offset))).unwrap();
                SaleEvent::new(sku(s), date, per_day, SalesChannelKind::Storefront, None).unwrap()
            })
            .collect()
    }

    fn histories(entries: Vec<(&str, Vec<SaleEvent>)>) -> HashMap<Sku, Vec<SaleEvent>> {
        entries
            .into_iter()
            .map(|(s, events)| (sku(s), events))
            .collect()
    }

    #[test]
    fn scenario_out_of_stock_with_floor_and_no_history() {
        let items = vec![item("A", "Anvil", 0, 5)];
        let recs = generate_recommendations(
            &items,
            &histories(vec![]),
            LeadTime::clamped(7),
            today(),
        );

        assert_eq!(recs.len(), 1);
        let rec = &recs[0];
        assert_eq!(rec.reason, ReorderReason::OutOfStock);
        assert_eq!(rec.priority, ReorderPriority::Critical);
        assert_eq!(rec.days_of_stock_remaining, DaysOfStock::Finite(0));
        assert_eq!(rec.recommended_order_quantity, 5);
        assert_eq!(rec.estimated_stockout_date, Some(today()));
    }

    #[test]
    fn scenario_fast_seller_runs_out_inside_lead_time() {
        // 300 units over the 30-day window = 10/day; 50 on hand = 5 days.
        let items = vec![item("B", "Bolt", 50, 0)];
        let history = histories(vec![("B", steady_sales("B", 300, 30))]);
        let recs = generate_recommendations(&items, &history, LeadTime::clamped(7), today());

        assert_eq!(recs.len(), 1);
        let rec = &recs[0];
        assert_eq!(rec.reason, ReorderReason::HighVelocityStockoutRisk);
        assert_eq!(rec.priority, ReorderPriority::High);
        assert_eq!(rec.days_of_stock_remaining, DaysOfStock::Finite(5));
        assert_eq!(rec.average_daily_units, 10.0);
        // ceil(10 * 7) - 50
        assert_eq!(rec.recommended_order_quantity, 20);
    }

    #[test]
    fn scenario_slow_seller_with_deep_stock_is_excluded() {
        // 30 units over 30 days = 1/day; 100 on hand = 100 days of cover.
        let items = vec![item("C", "Clamp", 100, 0)];
        let history = histories(vec![("C", steady_sales("C", 30, 30))]);
        let recs = generate_recommendations(&items, &history, LeadTime::clamped(7), today());

        assert!(recs.is_empty());
    }

    #[test]
    fn scenario_below_minimum_without_history_uses_stock_level_fallback() {
        let items = vec![item("D", "Dowel", 3, 10)];
        let recs = generate_recommendations(
            &items,
            &histories(vec![]),
            LeadTime::clamped(7),
            today(),
        );

        assert_eq!(recs.len(), 1);
        let rec = &recs[0];
        assert_eq!(rec.reason, ReorderReason::BelowMinimum);
        assert_eq!(rec.priority, ReorderPriority::High);
        assert_eq!(rec.recommended_order_quantity, 7);
        assert!(rec.days_of_stock_remaining.is_unbounded());
        assert_eq!(rec.estimated_stockout_date, None);
    }

    #[test]
    fn idle_item_with_stock_and_no_floor_is_excluded() {
        let items = vec![item("E", "Eyelet", 40, 0)];
        let recs = generate_recommendations(
            &items,
            &histories(vec![]),
            LeadTime::clamped(7),
            today(),
        );

        assert!(recs.is_empty());
    }

    #[test]
    fn output_is_sorted_by_priority_then_runway_then_name() {
        let items = vec![
            item("S1", "Zinc sheet", 50, 0),  // high, 5 days
            item("S2", "Anvil", 0, 5),        // critical
            item("S3", "Bolt", 30, 0),        // high, 3 days
            item("S4", "Axle", 0, 0),         // critical
            item("S5", "Washer", 3, 10),      // high, unbounded runway
        ];
        let history = histories(vec![
            ("S1", steady_sales("S1", 300, 30)),
            ("S3", steady_sales("S3", 300, 30)),
        ]);
        let recs = generate_recommendations(&items, &history, LeadTime::clamped(7), today());

        let order: Vec<&str> = recs.iter().map(|r| r.item.name()).collect();
        // Criticals first (0 days each, tie broken by name), then the high
        // tier by runway with the unbounded-runway item last.
        assert_eq!(order, vec!["Anvil", "Axle", "Bolt", "Zinc sheet", "Washer"]);
    }

    #[test]
    fn identical_inputs_yield_identical_lists() {
        let items = vec![
            item("A", "Anvil", 0, 5),
            item("B", "Bolt", 50, 0),
            item("D", "Dowel", 3, 10),
        ];
        let history = histories(vec![("B", steady_sales("B", 300, 30))]);

        let first = generate_recommendations(&items, &history, LeadTime::clamped(7), today());
        let second = generate_recommendations(&items, &history, LeadTime::clamped(7), today());

        assert_eq!(first, second);
    }

    #[test]
    fn quick_forecast_agrees_with_the_full_pipeline() {
        let fast = item("B", "Bolt", 50, 0);
        let events = steady_sales("B", 300, 30);

        let forecast = quick_forecast(&fast, &events, 30, today());
        assert_eq!(forecast.average_daily_units, 10.0);
        assert_eq!(forecast.days_until_stockout, DaysOfStock::Finite(5));

        let recs = generate_recommendations(
            std::slice::from_ref(&fast),
            &histories(vec![("B", events)]),
            LeadTime::clamped(7),
            today(),
        );
        assert_eq!(recs[0].average_daily_units, forecast.average_daily_units);
        assert_eq!(recs[0].days_of_stock_remaining, forecast.days_until_stockout);
    }

    #[test]
    fn quick_forecast_with_no_stock_is_an_immediate_stockout() {
        let empty = item("A", "Anvil", 0, 0);
        let forecast = quick_forecast(&empty, &[], 30, today());
        assert_eq!(forecast.days_until_stockout, DaysOfStock::Finite(0));
        assert_eq!(forecast.average_daily_units, 0.0);
    }

    #[test]
    fn recommendation_serializes_for_external_consumers() {
        let items = vec![item("A", "Anvil", 0, 5)];
        let recs = generate_recommendations(
            &items,
            &histories(vec![]),
            LeadTime::clamped(7),
            today(),
        );

        let json = serde_json::to_value(&recs[0]).unwrap();
        assert_eq!(json["reason"], "out_of_stock");
        assert_eq!(json["priority"], "critical");
        assert_eq!(json["recommended_order_quantity"], 5);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_item(tag: usize) -> impl Strategy<Value = CatalogItem> {
            (0u32..200, 0u32..50).prop_map(move |(stock, min)| {
                item(&format!("SKU-{tag}"), &format!("Item {tag}"), stock, min)
            })
        }

        fn arb_events(tag: usize) -> impl Strategy<Value = Vec<SaleEvent>> {
            proptest::collection::vec((0u64..40, 1u32..25), 0..12).prop_map(move |sales| {
                sales
                    .into_iter()
                    .map(|(days_ago, units)| {
                        let date = today().checked_sub_days(Days::new(days_ago)).unwrap();
                        SaleEvent::new(
                            sku(&format!("SKU-{tag}")),
                            date,
                            units,
                            SalesChannelKind::Storefront,
                            None,
                        )
                        .unwrap()
                    })
                    .collect()
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: every out-of-stock item is recommended, critical,
            /// with zero days of stock remaining.
            #[test]
            fn out_of_stock_is_always_critical(
                min in 0u32..50,
                events in arb_events(0),
            ) {
                let items = vec![item("SKU-0", "Item 0", 0, min)];
                let history = histories(vec![("SKU-0", events)]);
                let recs = generate_recommendations(&items, &history, LeadTime::clamped(7), today());

                prop_assert_eq!(recs.len(), 1);
                prop_assert_eq!(recs[0].priority, ReorderPriority::Critical);
                prop_assert_eq!(recs[0].days_of_stock_remaining, DaysOfStock::Finite(0));
            }

            /// Property: no sales, stock on hand, no floor — nothing to say.
            #[test]
            fn idle_unfloored_items_are_never_recommended(stock in 1u32..500) {
                let items = vec![item("SKU-0", "Item 0", stock, 0)];
                let recs = generate_recommendations(
                    &items,
                    &histories(vec![]),
                    LeadTime::clamped(7),
                    today(),
                );

                prop_assert!(recs.is_empty());
            }

            /// Property: the pipeline is a pure function — rerunning it on
            /// the same snapshot yields the same list.
            #[test]
            fn pipeline_is_idempotent(
                a in arb_item(0), b in arb_item(1), c in arb_item(2),
                ev_a in arb_events(0), ev_b in arb_events(1), ev_c in arb_events(2),
                lead_days in 0u32..40,
            ) {
                let items = vec![a, b, c];
                let history = histories(vec![("SKU-0", ev_a), ("SKU-1", ev_b), ("SKU-2", ev_c)]);
                let lead = LeadTime::clamped(lead_days);

                let first = generate_recommendations(&items, &history, lead, today());
                let second = generate_recommendations(&items, &history, lead, today());

                prop_assert_eq!(first, second);
            }

            /// Property: for fixed stock and history, increasing lead time
            /// never lowers an item's priority tier.
            #[test]
            fn priority_is_monotone_in_lead_time(
                item_strategy in arb_item(0),
                events in arb_events(0),
            ) {
                let items = vec![item_strategy];
                let history = histories(vec![("SKU-0", events)]);

                let mut last: Option<ReorderPriority> = None;
                for lead_days in 1u32..=30 {
                    let recs = generate_recommendations(
                        &items,
                        &history,
                        LeadTime::clamped(lead_days),
                        today(),
                    );
                    let priority = recs.first().map(|r| r.priority);
                    if let (Some(prev), Some(curr)) = (last, priority) {
                        prop_assert!(curr >= prev, "priority dropped at lead {}", lead_days);
                    }
                    if priority.is_some() {
                        last = priority;
                    }
                }
            }

            /// Property: the unbounded runway sentinel appears exactly when
            /// velocity is zero with stock on hand.
            #[test]
            fn unbounded_runway_iff_zero_velocity_with_stock(
                item_strategy in arb_item(0),
                events in arb_events(0),
            ) {
                let stock = item_strategy.current_stock();
                let items = vec![item_strategy];
                let history = histories(vec![("SKU-0", events)]);
                let recs = generate_recommendations(&items, &history, LeadTime::clamped(7), today());

                if let Some(rec) = recs.first() {
                    let unbounded = rec.days_of_stock_remaining.is_unbounded();
                    let degenerate = rec.average_daily_units == 0.0 && stock > 0;
                    prop_assert_eq!(unbounded, degenerate);
                }
            }
        }
    }
}
