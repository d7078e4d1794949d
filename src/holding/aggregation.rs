//! Net worth totals and asset allocation breakdowns.
//!
//! Reduces a user's holdings to asset/liability totals and groups asset
//! value by category, where a holding's category is the first token of its
//! comma-separated tag list.

use std::collections::HashMap;

use serde::Serialize;

use crate::holding::{HoldingItem, HoldingKind};

/// The label for asset holdings that have no tags.
pub const UNTAGGED_CATEGORY: &str = "Other";

/// The share of total assets held in one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationEntry {
    /// The category name, taken from the holding's first tag.
    pub category: String,
    /// The summed value of the category's holdings in currency units.
    pub value: f64,
    /// The category's share of total assets as a percentage, rounded to two
    /// decimal places. Fixed at 0.00 when there are no assets.
    pub percentage_of_assets: f64,
}

/// A user's net worth totals and asset allocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetWorthSummary {
    /// The sum of all asset values.
    pub total_assets: f64,
    /// The sum of all liability values.
    pub total_liabilities: f64,
    /// Total assets minus total liabilities. May be negative.
    pub net_worth: f64,
    /// Asset value grouped by category, ordered by descending value.
    pub allocation: Vec<AllocationEntry>,
}

/// Reduce a user's holdings to totals and a category allocation breakdown.
///
/// Liabilities only contribute to the totals; the allocation covers assets.
/// Categories are ordered by descending value, with ties kept in the order
/// the category was first encountered. An empty input produces all-zero
/// totals and an empty allocation.
pub fn aggregate_holdings(holdings: &[HoldingItem]) -> NetWorthSummary {
    let mut total_assets = 0.0;
    let mut total_liabilities = 0.0;

    for holding in holdings {
        match holding.kind {
            HoldingKind::Asset => total_assets += holding.value,
            HoldingKind::Liability => total_liabilities += holding.value,
        }
    }

    // Group asset value by category, remembering first-encounter order so
    // that equal-value categories sort stably.
    let mut category_order: Vec<String> = Vec::new();
    let mut category_totals: HashMap<String, f64> = HashMap::new();

    for holding in holdings {
        if holding.kind != HoldingKind::Asset {
            continue;
        }

        let category = category_for(&holding.tags);

        if !category_totals.contains_key(category) {
            category_order.push(category.to_owned());
        }

        *category_totals.entry(category.to_owned()).or_insert(0.0) += holding.value;
    }

    let mut allocation: Vec<AllocationEntry> = category_order
        .into_iter()
        .map(|category| {
            let value = category_totals[&category];
            let percentage_of_assets = if total_assets == 0.0 {
                0.0
            } else {
                round_to_cents(100.0 * value / total_assets)
            };

            AllocationEntry {
                category,
                value,
                percentage_of_assets,
            }
        })
        .collect();

    // Stable sort keeps first-encounter order for equal values.
    allocation.sort_by(|a, b| b.value.total_cmp(&a.value));

    NetWorthSummary {
        total_assets,
        total_liabilities,
        net_worth: total_assets - total_liabilities,
        allocation,
    }
}

/// The category of a holding: its first comma-delimited tag, trimmed of
/// whitespace, or [UNTAGGED_CATEGORY] when there are no tags.
fn category_for(tags: &str) -> &str {
    match tags.split(',').next().map(str::trim) {
        Some(first_tag) if !first_tag.is_empty() => first_tag,
        _ => UNTAGGED_CATEGORY,
    }
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod aggregate_holdings_tests {
    use time::OffsetDateTime;

    use crate::{
        auth::UserId,
        holding::{HoldingItem, HoldingKind},
    };

    use super::{UNTAGGED_CATEGORY, aggregate_holdings, round_to_cents};

    fn holding(kind: HoldingKind, value: f64, tags: &str) -> HoldingItem {
        HoldingItem {
            id: 0,
            user_id: UserId::new("user-1"),
            name: "Holding".to_owned(),
            kind,
            value,
            tags: tags.to_owned(),
            isin: None,
            shares: None,
            price_per_share: None,
            recurring: false,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn empty_input_yields_zero_totals_and_no_allocation() {
        let summary = aggregate_holdings(&[]);

        assert_eq!(summary.total_assets, 0.0);
        assert_eq!(summary.total_liabilities, 0.0);
        assert_eq!(summary.net_worth, 0.0);
        assert!(summary.allocation.is_empty());
    }

    #[test]
    fn sums_assets_and_liabilities_separately() {
        let holdings = vec![
            holding(HoldingKind::Asset, 25_786.01, "fondos indexados, inversión"),
            holding(HoldingKind::Asset, 8_850.0, "liquidez"),
            holding(HoldingKind::Liability, 12_000.0, ""),
        ];

        let summary = aggregate_holdings(&holdings);

        // The raw sums carry f64 representation error, so compare at cent
        // precision.
        assert_eq!(round_to_cents(summary.total_assets), 34_636.01);
        assert_eq!(summary.total_liabilities, 12_000.0);
        assert_eq!(round_to_cents(summary.net_worth), 22_636.01);
    }

    #[test]
    fn allocation_uses_first_tag_and_two_decimal_percentages() {
        let holdings = vec![
            holding(HoldingKind::Asset, 25_786.01, "fondos indexados, inversión"),
            holding(HoldingKind::Asset, 8_850.0, "liquidez"),
        ];

        let summary = aggregate_holdings(&holdings);

        assert_eq!(summary.allocation.len(), 2);
        assert_eq!(summary.allocation[0].category, "fondos indexados");
        assert_eq!(summary.allocation[0].percentage_of_assets, 74.45);
        assert_eq!(summary.allocation[1].category, "liquidez");
        assert_eq!(summary.allocation[1].percentage_of_assets, 25.55);
    }

    #[test]
    fn untagged_assets_fall_into_other() {
        let holdings = vec![
            holding(HoldingKind::Asset, 100.0, ""),
            holding(HoldingKind::Asset, 50.0, "   "),
        ];

        let summary = aggregate_holdings(&holdings);

        assert_eq!(summary.allocation.len(), 1);
        assert_eq!(summary.allocation[0].category, UNTAGGED_CATEGORY);
        assert_eq!(summary.allocation[0].value, 150.0);
        assert_eq!(summary.allocation[0].percentage_of_assets, 100.0);
    }

    #[test]
    fn single_category_sums_to_one_hundred_percent() {
        let holdings = vec![
            holding(HoldingKind::Asset, 123.45, "stocks"),
            holding(HoldingKind::Asset, 678.9, "stocks, retirement"),
        ];

        let summary = aggregate_holdings(&holdings);

        assert_eq!(summary.allocation.len(), 1);
        assert_eq!(summary.allocation[0].percentage_of_assets, 100.0);
    }

    #[test]
    fn aggregation_is_invariant_under_reordering() {
        let mut holdings = vec![
            holding(HoldingKind::Asset, 25_786.01, "fondos indexados"),
            holding(HoldingKind::Asset, 8_850.0, "liquidez"),
            holding(HoldingKind::Liability, 4_000.0, ""),
        ];

        let forwards = aggregate_holdings(&holdings);
        holdings.reverse();
        let backwards = aggregate_holdings(&holdings);

        assert_eq!(forwards.total_assets, backwards.total_assets);
        assert_eq!(forwards.total_liabilities, backwards.total_liabilities);
        assert_eq!(forwards.net_worth, backwards.net_worth);
        assert_eq!(forwards.allocation, backwards.allocation);
    }

    #[test]
    fn allocation_is_ordered_by_descending_value_with_stable_ties() {
        let holdings = vec![
            holding(HoldingKind::Asset, 100.0, "alpha"),
            holding(HoldingKind::Asset, 100.0, "beta"),
            holding(HoldingKind::Asset, 500.0, "gamma"),
        ];

        let summary = aggregate_holdings(&holdings);

        let categories: Vec<&str> = summary
            .allocation
            .iter()
            .map(|entry| entry.category.as_str())
            .collect();

        assert_eq!(categories, vec!["gamma", "alpha", "beta"]);
    }

    #[test]
    fn zero_value_assets_contribute_zero_percent_and_sort_last() {
        let holdings = vec![
            holding(HoldingKind::Asset, 0.0, "empty"),
            holding(HoldingKind::Asset, 100.0, "stocks"),
        ];

        let summary = aggregate_holdings(&holdings);

        assert_eq!(summary.allocation[1].category, "empty");
        assert_eq!(summary.allocation[1].percentage_of_assets, 0.0);
    }

    #[test]
    fn liabilities_never_appear_in_the_allocation() {
        let holdings = vec![
            holding(HoldingKind::Asset, 100.0, "stocks"),
            holding(HoldingKind::Liability, 100.0, "mortgage"),
        ];

        let summary = aggregate_holdings(&holdings);

        assert_eq!(summary.allocation.len(), 1);
        assert_eq!(summary.allocation[0].category, "stocks");
    }

    #[test]
    fn negative_net_worth_is_valid() {
        let holdings = vec![
            holding(HoldingKind::Asset, 100.0, ""),
            holding(HoldingKind::Liability, 500.0, ""),
        ];

        let summary = aggregate_holdings(&holdings);

        assert_eq!(summary.net_worth, -400.0);
    }
}
