/*
 * Copyright (c) 2026 Mohamad Al-Zawahreh (dba Sovereign Systems).
 *
 * This file is part of the Creator Earnings Estimator.
 *
 * LICENSE: DUAL-LICENSED (AGPLv3 or COMMERCIAL).
 * PATENT NOTICE: Protected by US Patent App #63/935,467.
 */

//! Platform monetization rate table.
//!
//! Every supported platform maps to exactly one monetization model:
//! - **Per-mille:** a flat {min, max} payout per 1000 views (short-form video,
//!   photo sharing).
//! - **Niche RPM:** a {min, max} RPM per content niche (long-form video).
//! - **Subscription:** three fixed monthly tier payouts plus a flat ad RPM
//!   (live streaming).
//!
//! The built-in table is assembled once from the constants below. Override
//! tables go through the same validation whether they are built in code or
//! deserialized from JSON (see `crate::config`).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ── Built-in rates ─────────────────────────────────────────────────

/// TikTok Creator Rewards payout per 1000 qualified views (USD).
pub const TIKTOK_PER_MILLE: RateRange = RateRange::new(0.02, 0.04);

/// Instagram Reels play bonus per 1000 plays (USD).
pub const INSTAGRAM_PER_MILLE: RateRange = RateRange::new(0.01, 0.03);

/// YouTube AdSense RPM by content niche (USD per 1000 monetized views).
pub const YOUTUBE_NICHE_RPM: &[(&str, RateRange)] = &[
    ("Beauty", RateRange::new(3.0, 7.0)),
    ("Education", RateRange::new(5.0, 12.0)),
    ("Entertainment", RateRange::new(2.0, 5.0)),
    ("Finance", RateRange::new(10.0, 30.0)),
    ("Gaming", RateRange::new(2.0, 6.0)),
    ("Lifestyle", RateRange::new(3.0, 8.0)),
    ("Technology", RateRange::new(4.0, 10.0)),
];

/// Twitch creator share of a Tier 1/2/3 subscription per month (USD).
pub const TWITCH_TIERS: TierValues = TierValues::new(2.50, 5.00, 12.50);

/// Twitch ad revenue: $2-$4 per 1000 views, averaged.
pub const TWITCH_AD_RATE_PER_MILLE: f64 = 3.0;

// ── Types ──────────────────────────────────────────────────────────

/// An inclusive {min, max} payout range per 1000 views.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateRange {
    pub min: f64,
    pub max: f64,
}

impl RateRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// The averaged rate used by every per-mille formula.
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    fn validate(&self, platform: &str) -> Result<(), RateTableError> {
        check_rate(platform, self.min)?;
        check_rate(platform, self.max)?;
        if self.min > self.max {
            return Err(RateTableError::InvertedRange {
                platform: platform.to_string(),
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Fixed monthly payout for each of the three subscription tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierValues {
    pub tier1: f64,
    pub tier2: f64,
    pub tier3: f64,
}

impl TierValues {
    pub const fn new(tier1: f64, tier2: f64, tier3: f64) -> Self {
        Self {
            tier1,
            tier2,
            tier3,
        }
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.tier1, self.tier2, self.tier3]
    }
}

/// How a platform turns audience into money.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MonetizationModel {
    PerMille {
        rate: RateRange,
    },
    NicheRpm {
        niches: BTreeMap<String, RateRange>,
    },
    Subscription {
        tiers: TierValues,
        ad_rate_per_mille: f64,
    },
}

impl MonetizationModel {
    /// Short label for listings.
    pub fn label(&self) -> &'static str {
        match self {
            MonetizationModel::PerMille { .. } => "per_mille",
            MonetizationModel::NicheRpm { .. } => "niche_rpm",
            MonetizationModel::Subscription { .. } => "subscription",
        }
    }
}

/// A single platform entry: its model plus the human-readable rate basis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformRates {
    /// Shown next to the estimate; never used in computation.
    pub basis: String,
    pub model: MonetizationModel,
}

impl PlatformRates {
    pub fn new(basis: impl Into<String>, model: MonetizationModel) -> Self {
        Self {
            basis: basis.into(),
            model,
        }
    }

    fn validate(&self, platform: &str) -> Result<(), RateTableError> {
        match &self.model {
            MonetizationModel::PerMille { rate } => rate.validate(platform),
            MonetizationModel::NicheRpm { niches } => {
                if niches.is_empty() {
                    return Err(RateTableError::EmptyNicheTable(platform.to_string()));
                }
                for (niche, rate) in niches {
                    if niche.trim().is_empty() {
                        return Err(RateTableError::EmptyNiche(platform.to_string()));
                    }
                    rate.validate(platform)?;
                }
                Ok(())
            }
            MonetizationModel::Subscription {
                tiers,
                ad_rate_per_mille,
            } => {
                for value in tiers.as_array() {
                    check_rate(platform, value)?;
                }
                check_rate(platform, *ad_rate_per_mille)
            }
        }
    }
}

fn check_rate(platform: &str, value: f64) -> Result<(), RateTableError> {
    if !value.is_finite() || value < 0.0 {
        return Err(RateTableError::InvalidRate {
            platform: platform.to_string(),
            value,
        });
    }
    Ok(())
}

/// Rate table validation failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RateTableError {
    #[error("platform identifier must not be empty")]
    EmptyPlatform,
    #[error("platform '{0}' is listed more than once (identifiers are case-insensitive)")]
    DuplicatePlatform(String),
    #[error("platform '{platform}' has an invalid rate {value}: rates must be finite and non-negative")]
    InvalidRate { platform: String, value: f64 },
    #[error("platform '{platform}' has min rate {min} above max rate {max}")]
    InvertedRange {
        platform: String,
        min: f64,
        max: f64,
    },
    #[error("platform '{0}' uses niche rates but lists no niches")]
    EmptyNicheTable(String),
    #[error("platform '{0}' lists a niche with an empty label")]
    EmptyNiche(String),
}

// ── Rate table ─────────────────────────────────────────────────────

/// Immutable platform -> monetization model mapping.
///
/// Keys are stored lowercase; lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRateTable")]
pub struct RateTable {
    platforms: BTreeMap<String, PlatformRates>,
}

#[derive(Deserialize)]
struct RawRateTable {
    platforms: BTreeMap<String, PlatformRates>,
}

impl TryFrom<RawRateTable> for RateTable {
    type Error = RateTableError;

    fn try_from(raw: RawRateTable) -> Result<Self, Self::Error> {
        RateTable::from_entries(raw.platforms)
    }
}

lazy_static::lazy_static! {
    static ref BUILTIN: RateTable = RateTable::build_builtin();
}

impl RateTable {
    /// Build a validated table. Identifiers are lowercased; two identifiers
    /// that collide after lowercasing are rejected.
    pub fn from_entries<I, K>(entries: I) -> Result<Self, RateTableError>
    where
        I: IntoIterator<Item = (K, PlatformRates)>,
        K: AsRef<str>,
    {
        let mut platforms = BTreeMap::new();
        for (id, rates) in entries {
            let key = normalize_platform(id.as_ref());
            if key.is_empty() {
                return Err(RateTableError::EmptyPlatform);
            }
            rates.validate(&key)?;
            if platforms.insert(key.clone(), rates).is_some() {
                return Err(RateTableError::DuplicatePlatform(key));
            }
        }
        Ok(Self { platforms })
    }

    /// The process-wide default table.
    pub fn builtin() -> &'static RateTable {
        &BUILTIN
    }

    fn build_builtin() -> RateTable {
        let youtube_niches = YOUTUBE_NICHE_RPM
            .iter()
            .map(|(niche, rate)| (niche.to_string(), *rate))
            .collect();

        let platforms = [
            (
                "tiktok",
                PlatformRates::new(
                    "TikTok Creator Rewards: $0.02-$0.04 per 1,000 qualified views",
                    MonetizationModel::PerMille {
                        rate: TIKTOK_PER_MILLE,
                    },
                ),
            ),
            (
                "instagram",
                PlatformRates::new(
                    "Instagram Reels bonuses: $0.01-$0.03 per 1,000 plays",
                    MonetizationModel::PerMille {
                        rate: INSTAGRAM_PER_MILLE,
                    },
                ),
            ),
            (
                "youtube",
                PlatformRates::new(
                    "YouTube AdSense RPM for the selected content niche",
                    MonetizationModel::NicheRpm {
                        niches: youtube_niches,
                    },
                ),
            ),
            (
                "twitch",
                PlatformRates::new(
                    "Twitch subscriptions ($2.50/$5.00/$12.50 per sub) plus $2-$4 ad RPM",
                    MonetizationModel::Subscription {
                        tiers: TWITCH_TIERS,
                        ad_rate_per_mille: TWITCH_AD_RATE_PER_MILLE,
                    },
                ),
            ),
        ];

        let platforms = platforms
            .into_iter()
            .map(|(id, rates)| (id.to_string(), rates))
            .collect();
        RateTable { platforms }
    }

    /// Look up a platform. `None` means "no calculation".
    pub fn get(&self, platform: &str) -> Option<&PlatformRates> {
        self.platforms.get(&normalize_platform(platform))
    }

    /// Iterate entries in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PlatformRates)> {
        self.platforms.iter().map(|(id, rates)| (id.as_str(), rates))
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    /// Parse and validate a JSON override table.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

fn normalize_platform(platform: &str) -> String {
    platform.trim().to_lowercase()
}

// ── Tests ──────────────────────────────────────────────────────────
