/*
 * Copyright (c) 2026 Mohamad Al-Zawahreh (dba Sovereign Systems).
 *
 * This file is part of the Creator Earnings Estimator.
 *
 * LICENSE: DUAL-LICENSED (AGPLv3 or COMMERCIAL).
 * PATENT NOTICE: Protected by US Patent App #63/935,467.
 */

//! Creator earnings estimation.
//!
//! Maps (platform, view volume, platform-specific parameters) to an
//! estimated monthly payout:
//!
//! - per-mille: `views * pct/100 * avg(min, max) / 1000`
//! - niche RPM: same, with the RPM pair of the selected niche
//! - subscription: `sum(count_i * tier_i) + views * pct/100 * ad_rpm / 1000`
//!
//! Unknown platforms, unknown niches and missing view counts all produce a
//! zero estimate rather than an error. The estimator holds no state between
//! calls; callers re-run it whenever any input changes.
//!
//! View counts and percentages arrive as plain JSON numbers. Negative or
//! non-finite values are rejected at the boundary (JSON decoding) rather
//! than here; fractional values are used as given. Percentages outside the
//! input surface's 40-80 window are accepted and used as given.

use crate::format;
use crate::rates::{MonetizationModel, RateTable};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

// ── Input surface ──────────────────────────────────────────────────

/// Lowest monetized-views percentage the input surface allows.
pub const MONETIZED_PERCENT_MIN: u32 = 40;
/// Highest monetized-views percentage the input surface allows.
pub const MONETIZED_PERCENT_MAX: u32 = 80;
/// Slider position before the creator touches it.
pub const DEFAULT_MONETIZED_PERCENT: u32 = 60;

/// Clamp a raw slider value into [`MONETIZED_PERCENT_MIN`, `MONETIZED_PERCENT_MAX`].
pub fn clamp_monetized_percent(raw: i64) -> u32 {
    raw.clamp(MONETIZED_PERCENT_MIN as i64, MONETIZED_PERCENT_MAX as i64) as u32
}

// ── Types ──────────────────────────────────────────────────────────

/// Active subscriber count per tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionCounts {
    #[serde(default)]
    pub tier1: u32,
    #[serde(default)]
    pub tier2: u32,
    #[serde(default)]
    pub tier3: u32,
}

impl SubscriptionCounts {
    pub fn new(tier1: u32, tier2: u32, tier3: u32) -> Self {
        Self {
            tier1,
            tier2,
            tier3,
        }
    }

    /// Build from raw form values, clamping negatives to zero.
    pub fn from_signed(tier1: i64, tier2: i64, tier3: i64) -> Self {
        let clamp = |v: i64| v.clamp(0, u32::MAX as i64) as u32;
        Self::new(clamp(tier1), clamp(tier2), clamp(tier3))
    }

    pub fn as_array(&self) -> [u32; 3] {
        [self.tier1, self.tier2, self.tier3]
    }
}

/// One estimation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationInput {
    pub platform: String,
    #[serde(default, deserialize_with = "non_negative_opt")]
    pub total_views: Option<f64>,
    #[serde(default = "default_percent", deserialize_with = "non_negative")]
    pub monetized_views_percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_niche: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_counts: Option<SubscriptionCounts>,
}

fn default_percent() -> f64 {
    DEFAULT_MONETIZED_PERCENT as f64
}

fn non_negative<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() || value < 0.0 {
        return Err(D::Error::custom(format!(
            "expected a non-negative number, got {}",
            value
        )));
    }
    Ok(value)
}

fn non_negative_opt<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    #[derive(Deserialize)]
    struct Wrapped(#[serde(deserialize_with = "non_negative")] f64);

    Ok(Option::<Wrapped>::deserialize(deserializer)?.map(|Wrapped(v)| v))
}

impl EstimationInput {
    pub fn new(platform: impl Into<String>, total_views: u64, monetized_views_percent: u32) -> Self {
        Self {
            platform: platform.into(),
            total_views: Some(total_views as f64),
            monetized_views_percent: monetized_views_percent as f64,
            selected_niche: None,
            subscription_counts: None,
        }
    }

    pub fn with_niche(mut self, niche: impl Into<String>) -> Self {
        self.selected_niche = Some(niche.into());
        self
    }

    pub fn with_subscriptions(mut self, counts: SubscriptionCounts) -> Self {
        self.subscription_counts = Some(counts);
        self
    }

    /// Views eligible for payout. Zero when the view count is absent or zero.
    pub fn monetized_views(&self) -> f64 {
        match self.total_views {
            Some(views) if views > 0.0 => views * self.monetized_views_percent / 100.0,
            _ => 0.0,
        }
    }
}

/// The estimate handed back to the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationResult {
    pub estimated_monthly_earnings: f64,
    /// Empty when the platform is unknown.
    pub rate_basis_description: String,
}

impl EstimationResult {
    /// Earnings rounded to cents.
    pub fn rounded_earnings(&self) -> f64 {
        format::round_cents(self.estimated_monthly_earnings)
    }

    /// Earnings as a 2-decimal display string.
    pub fn formatted_earnings(&self) -> String {
        format::format_amount(self.estimated_monthly_earnings)
    }
}

/// Intermediate figures behind an estimate.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsBreakdown {
    pub monetized_views: f64,
    /// Averaged per-mille rate (or RPM) applied to monetized views.
    pub rate_per_mille: f64,
    pub subscription_earnings: f64,
    pub view_earnings: f64,
    pub total: f64,
    pub basis: String,
}

impl EarningsBreakdown {
    pub fn into_result(self) -> EstimationResult {
        EstimationResult {
            estimated_monthly_earnings: self.total,
            rate_basis_description: self.basis,
        }
    }
}

// ── Estimator ──────────────────────────────────────────────────────

/// Stateless estimator bound to a rate table.
#[derive(Debug, Clone, Copy)]
pub struct EarningsEstimator<'t> {
    rates: &'t RateTable,
}

impl Default for EarningsEstimator<'static> {
    fn default() -> Self {
        Self::new(RateTable::builtin())
    }
}

impl<'t> EarningsEstimator<'t> {
    pub fn new(rates: &'t RateTable) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &'t RateTable {
        self.rates
    }

    /// Estimate monthly earnings. Never fails.
    pub fn estimate(&self, input: &EstimationInput) -> EstimationResult {
        self.breakdown(input).into_result()
    }

    /// Same computation as [`estimate`](Self::estimate), keeping the
    /// intermediate figures.
    pub fn breakdown(&self, input: &EstimationInput) -> EarningsBreakdown {
        let Some(platform) = self.rates.get(&input.platform) else {
            tracing::trace!(platform = %input.platform, "no rates for platform");
            return EarningsBreakdown::default();
        };

        let monetized_views = input.monetized_views();
        let mut out = EarningsBreakdown {
            monetized_views,
            basis: platform.basis.clone(),
            ..Default::default()
        };

        match &platform.model {
            MonetizationModel::PerMille { rate } => {
                out.rate_per_mille = rate.midpoint();
                out.view_earnings = per_mille(monetized_views, out.rate_per_mille);
            }
            MonetizationModel::NicheRpm { niches } => {
                let rate = input
                    .selected_niche
                    .as_deref()
                    .and_then(|niche| niches.get(niche));
                if let Some(rate) = rate {
                    out.rate_per_mille = rate.midpoint();
                    out.view_earnings = per_mille(monetized_views, out.rate_per_mille);
                }
            }
            MonetizationModel::Subscription {
                tiers,
                ad_rate_per_mille,
            } => {
                let counts = input.subscription_counts.unwrap_or_default();
                out.subscription_earnings = counts
                    .as_array()
                    .iter()
                    .zip(tiers.as_array())
                    .map(|(&count, value)| count as f64 * value)
                    .sum();
                out.rate_per_mille = *ad_rate_per_mille;
                out.view_earnings = per_mille(monetized_views, *ad_rate_per_mille);
            }
        }

        out.total = out.subscription_earnings + out.view_earnings;
        out
    }
}

fn per_mille(monetized_views: f64, rate: f64) -> f64 {
    if monetized_views <= 0.0 {
        return 0.0;
    }
    monetized_views * rate / 1000.0
}

/// Estimate against the built-in rate table.
pub fn estimate(input: &EstimationInput) -> EstimationResult {
    EarningsEstimator::default().estimate(input)
}

// ── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::{PlatformRates, RateRange, TierValues};
    use std::collections::BTreeMap;

    const EPS: f64 = 1e-9;

    fn test_table() -> RateTable {
        let mut niches = BTreeMap::new();
        niches.insert("Tech".to_string(), RateRange::new(4.0, 10.0));
        niches.insert("Gaming".to_string(), RateRange::new(2.0, 5.0));

        RateTable::from_entries([
            (
                "short",
                PlatformRates::new(
                    "short-form",
                    MonetizationModel::PerMille {
                        rate: RateRange::new(0.02, 0.04),
                    },
                ),
            ),
            (
                "long",
                PlatformRates::new("long-form", MonetizationModel::NicheRpm { niches }),
            ),
            (
                "stream",
                PlatformRates::new(
                    "streaming",
                    MonetizationModel::Subscription {
                        tiers: TierValues::new(2.50, 5.00, 12.50),
                        ad_rate_per_mille: 3.0,
                    },
                ),
            ),
        ])
        .unwrap()
    }

    fn earnings(table: &RateTable, input: &EstimationInput) -> f64 {
        EarningsEstimator::new(table)
            .estimate(input)
            .estimated_monthly_earnings
    }

    // ── Reference scenarios ───────────────────────────────────

    #[test]
    fn test_per_mille_scenario() {
        let table = test_table();
        let result = EarningsEstimator::new(&table).estimate(&EstimationInput::new("short", 100_000, 70));
        assert!((result.estimated_monthly_earnings - 2.10).abs() < EPS);
        assert_eq!(result.formatted_earnings(), "2.10");
        assert_eq!(result.rate_basis_description, "short-form");
    }

    #[test]
    fn test_niche_scenario() {
        let table = test_table();
        let input = EstimationInput::new("long", 50_000, 50).with_niche("Tech");
        let result = EarningsEstimator::new(&table).estimate(&input);
        assert!((result.estimated_monthly_earnings - 175.0).abs() < EPS);
        assert_eq!(result.formatted_earnings(), "175.00");
    }

    #[test]
    fn test_subscription_scenario() {
        let table = test_table();
        let input = EstimationInput::new("stream", 0, 60)
            .with_subscriptions(SubscriptionCounts::new(10, 5, 1));
        let result = EarningsEstimator::new(&table).estimate(&input);
        assert!((result.estimated_monthly_earnings - 62.50).abs() < EPS);
        assert_eq!(result.formatted_earnings(), "62.50");
    }

    #[test]
    fn test_unknown_platform() {
        let table = test_table();
        let input = EstimationInput::new("Foo", 1_000_000, 80)
            .with_niche("Tech")
            .with_subscriptions(SubscriptionCounts::new(100, 100, 100));
        let result = EarningsEstimator::new(&table).estimate(&input);
        assert_eq!(result.estimated_monthly_earnings, 0.0);
        assert_eq!(result.rate_basis_description, "");
    }

    // ── Properties ────────────────────────────────────────────

    #[test]
    fn test_zero_views_per_mille() {
        let table = test_table();
        for pct in [0, 40, 60, 80, 150] {
            assert_eq!(earnings(&table, &EstimationInput::new("short", 0, pct)), 0.0);
        }
    }

    #[test]
    fn test_missing_views() {
        let table = test_table();
        let mut input = EstimationInput::new("short", 0, 70);
        input.total_views = None;
        assert_eq!(earnings(&table, &input), 0.0);
    }

    #[test]
    fn test_monotonic_in_views() {
        let table = test_table();
        let mut last = 0.0;
        for views in [0, 1, 999, 1_000, 50_000, 1_000_000, 10_000_000] {
            let e = earnings(&table, &EstimationInput::new("short", views, 60));
            assert!(e >= last, "{} < {} at {} views", e, last, views);
            last = e;
        }
    }

    #[test]
    fn test_monotonic_in_percent() {
        let table = test_table();
        let mut last = 0.0;
        for pct in 0..=120 {
            let input = EstimationInput::new("long", 250_000, pct).with_niche("Gaming");
            let e = earnings(&table, &input);
            assert!(e >= last);
            last = e;
        }
    }

    #[test]
    fn test_out_of_range_percent_is_used_as_given() {
        let table = test_table();
        // 200% of 1000 views at 0.03 per mille
        let e = earnings(&table, &EstimationInput::new("short", 1_000, 200));
        assert!((e - 0.06).abs() < EPS);
    }

    #[test]
    fn test_unknown_niche() {
        let table = test_table();
        for views in [0, 10, 1_000_000] {
            let input = EstimationInput::new("long", views, 80).with_niche("Cooking");
            assert_eq!(earnings(&table, &input), 0.0);
        }
        // niche labels are exact
        let input = EstimationInput::new("long", 10_000, 80).with_niche("tech");
        assert_eq!(earnings(&table, &input), 0.0);
    }

    #[test]
    fn test_niche_not_selected() {
        let table = test_table();
        let result = EarningsEstimator::new(&table).estimate(&EstimationInput::new("long", 10_000, 80));
        assert_eq!(result.estimated_monthly_earnings, 0.0);
        assert_eq!(result.rate_basis_description, "long-form");
    }

    #[test]
    fn test_subscription_all_zero() {
        let table = test_table();
        let input = EstimationInput::new("stream", 0, 60)
            .with_subscriptions(SubscriptionCounts::default());
        assert_eq!(earnings(&table, &input), 0.0);

        let mut input = EstimationInput::new("stream", 0, 60);
        input.subscription_counts = None;
        assert_eq!(earnings(&table, &input), 0.0);
    }

    #[test]
    fn test_subscription_tier_linearity() {
        let table = test_table();
        let base = SubscriptionCounts::new(3, 4, 2);
        let doubled = SubscriptionCounts::new(3, 8, 2);
        let e1 = earnings(&table, &EstimationInput::new("stream", 0, 60).with_subscriptions(base));
        let e2 = earnings(&table, &EstimationInput::new("stream", 0, 60).with_subscriptions(doubled));
        // tier2 contributes 4 * 5.00 = 20.00; doubling adds exactly that again
        assert!((e2 - e1 - 20.0).abs() < EPS);

        let only_t3 = earnings(
            &table,
            &EstimationInput::new("stream", 0, 60).with_subscriptions(SubscriptionCounts::new(0, 0, 7)),
        );
        assert!((only_t3 - 87.5).abs() < EPS);
    }

    #[test]
    fn test_subscription_with_ad_revenue() {
        let table = test_table();
        let input = EstimationInput::new("stream", 100_000, 50)
            .with_subscriptions(SubscriptionCounts::new(10, 5, 1));
        let b = EarningsEstimator::new(&table).breakdown(&input);
        assert!((b.subscription_earnings - 62.5).abs() < EPS);
        // 50_000 monetized views * 3.0 / 1000
        assert!((b.view_earnings - 150.0).abs() < EPS);
        assert!((b.total - 212.5).abs() < EPS);
    }

    #[test]
    fn test_breakdown_matches_estimate() {
        let table = test_table();
        let estimator = EarningsEstimator::new(&table);
        let input = EstimationInput::new("short", 123_456, 55);
        let b = estimator.breakdown(&input);
        assert!((b.monetized_views - 67_900.8).abs() < 1e-6);
        assert!((b.rate_per_mille - 0.03).abs() < EPS);
        assert_eq!(b.total, estimator.estimate(&input).estimated_monthly_earnings);
    }

    #[test]
    fn test_repeated_calls_are_independent() {
        let table = test_table();
        let estimator = EarningsEstimator::new(&table);
        let a = EstimationInput::new("short", 100_000, 70);
        let b = EstimationInput::new("short", 200_000, 70);
        let first = estimator.estimate(&a);
        let _ = estimator.estimate(&b);
        assert_eq!(estimator.estimate(&a), first);
    }

    // ── Built-in table ────────────────────────────────────────

    #[test]
    fn test_builtin_tiktok() {
        let result = estimate(&EstimationInput::new("TikTok", 100_000, 70));
        assert!((result.estimated_monthly_earnings - 2.10).abs() < EPS);
        assert!(result.rate_basis_description.contains("TikTok"));
    }

    #[test]
    fn test_builtin_youtube_technology() {
        let input = EstimationInput::new("YouTube", 50_000, 50).with_niche("Technology");
        assert!((estimate(&input).estimated_monthly_earnings - 175.0).abs() < EPS);
    }

    #[test]
    fn test_builtin_twitch() {
        let input = EstimationInput::new("Twitch", 0, 60)
            .with_subscriptions(SubscriptionCounts::new(10, 5, 1));
        assert!((estimate(&input).estimated_monthly_earnings - 62.5).abs() < EPS);
    }

    // ── Input surface ─────────────────────────────────────────

    #[test]
    fn test_clamp_monetized_percent() {
        assert_eq!(clamp_monetized_percent(-5), 40);
        assert_eq!(clamp_monetized_percent(39), 40);
        assert_eq!(clamp_monetized_percent(65), 65);
        assert_eq!(clamp_monetized_percent(81), 80);
        assert_eq!(clamp_monetized_percent(i64::MAX), 80);
    }

    #[test]
    fn test_subscription_counts_from_signed() {
        assert_eq!(
            SubscriptionCounts::from_signed(-3, 0, 12),
            SubscriptionCounts::new(0, 0, 12)
        );
    }

    #[test]
    fn test_input_json_shape() {
        let json = r#"{
            "platform": "YouTube",
            "totalViews": 50000,
            "monetizedViewsPercent": 50,
            "selectedNiche": "Technology"
        }"#;
        let input: EstimationInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.total_views, Some(50_000.0));
        assert_eq!(input.selected_niche.as_deref(), Some("Technology"));
        assert_eq!(input.subscription_counts, None);
    }

    #[test]
    fn test_input_json_defaults() {
        let input: EstimationInput =
            serde_json::from_str(r#"{"platform": "Twitch", "subscriptionCounts": {"tier1": 4}}"#)
                .unwrap();
        assert_eq!(input.total_views, None);
        assert_eq!(input.monetized_views_percent, DEFAULT_MONETIZED_PERCENT as f64);
        assert_eq!(input.subscription_counts, Some(SubscriptionCounts::new(4, 0, 0)));
    }

    #[test]
    fn test_input_json_rejects_negative_views() {
        let parsed: Result<EstimationInput, _> =
            serde_json::from_str(r#"{"platform": "TikTok", "totalViews": -10}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_input_json_fractional_views() {
        let input: EstimationInput = serde_json::from_str(
            r#"{"platform": "TikTok", "totalViews": 1500.5, "monetizedViewsPercent": 60}"#,
        )
        .unwrap();
        assert_eq!(input.total_views, Some(1500.5));
        // 900.3 monetized views at 0.03 per mille
        assert!((estimate(&input).estimated_monthly_earnings - 0.027009).abs() < EPS);
    }

    #[test]
    fn test_input_json_fractional_percent() {
        let input: EstimationInput = serde_json::from_str(
            r#"{"platform": "TikTok", "totalViews": 100000, "monetizedViewsPercent": 62.5}"#,
        )
        .unwrap();
        assert_eq!(input.monetized_views_percent, 62.5);
        assert!((input.monetized_views() - 62_500.0).abs() < EPS);
        assert!((estimate(&input).estimated_monthly_earnings - 1.875).abs() < EPS);
    }

    #[test]
    fn test_input_json_exponent_views() {
        let input: EstimationInput = serde_json::from_str(
            r#"{"platform": "TikTok", "totalViews": 1e21, "monetizedViewsPercent": 50}"#,
        )
        .unwrap();
        assert_eq!(input.total_views, Some(1e21));
        assert!(estimate(&input).estimated_monthly_earnings > 0.0);
    }

    #[test]
    fn test_input_json_null_views() {
        let input: EstimationInput =
            serde_json::from_str(r#"{"platform": "TikTok", "totalViews": null}"#).unwrap();
        assert_eq!(input.total_views, None);
        assert_eq!(estimate(&input).estimated_monthly_earnings, 0.0);
    }

    #[test]
    fn test_input_json_rejects_negative_percent() {
        let parsed: Result<EstimationInput, _> =
            serde_json::from_str(r#"{"platform": "TikTok", "monetizedViewsPercent": -1}"#);
        assert!(parsed.unwrap_err().to_string().contains("non-negative"));
    }

    #[test]
    fn test_breakdown_json_shape() {
        let table = test_table();
        let input = EstimationInput::new("stream", 0, 60)
            .with_subscriptions(SubscriptionCounts::new(10, 5, 1));
        let b = EarningsEstimator::new(&table).breakdown(&input);
        assert_eq!(
            serde_json::to_string(&b).unwrap(),
            r#"{"monetizedViews":0.0,"ratePerMille":3.0,"subscriptionEarnings":62.5,"viewEarnings":0.0,"total":62.5,"basis":"streaming"}"#
        );
    }

    #[test]
    fn test_result_json_roundtrip() {
        let result = estimate(&EstimationInput::new("YouTube", 50_000, 50).with_niche("Technology"));
        let json = serde_json::to_string(&result).unwrap();
        let back: EstimationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_result_json_shape() {
        let result = EstimationResult {
            estimated_monthly_earnings: 62.5,
            rate_basis_description: "subs".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&result).unwrap(),
            r#"{"estimatedMonthlyEarnings":62.5,"rateBasisDescription":"subs"}"#
        );
    }
}
