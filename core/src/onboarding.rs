/*
 * Copyright (c) 2026 Mohamad Al-Zawahreh (dba Sovereign Systems).
 *
 * This file is part of the Creator Earnings Estimator.
 *
 * LICENSE: DUAL-LICENSED (AGPLv3 or COMMERCIAL).
 * PATENT NOTICE: Protected by US Patent App #63/935,467.
 */

//! Platform connect flow: follower bucket plus monetization checklist.
//!
//! A creator may continue past the connect step once they have picked a
//! follower range and ticked at least one requirement from the platform's
//! checklist.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Follower count buckets offered by the connect step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FollowerRange {
    #[serde(rename = "0-1K")]
    UnderOneThousand,
    #[serde(rename = "1K-10K")]
    OneToTenThousand,
    #[serde(rename = "10K-50K")]
    TenToFiftyThousand,
    #[serde(rename = "50K-100K")]
    FiftyToHundredThousand,
    #[serde(rename = "100K+")]
    OverHundredThousand,
}

impl FollowerRange {
    pub const ALL: [FollowerRange; 5] = [
        FollowerRange::UnderOneThousand,
        FollowerRange::OneToTenThousand,
        FollowerRange::TenToFiftyThousand,
        FollowerRange::FiftyToHundredThousand,
        FollowerRange::OverHundredThousand,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FollowerRange::UnderOneThousand => "0-1K",
            FollowerRange::OneToTenThousand => "1K-10K",
            FollowerRange::TenToFiftyThousand => "10K-50K",
            FollowerRange::FiftyToHundredThousand => "50K-100K",
            FollowerRange::OverHundredThousand => "100K+",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.label() == label)
    }
}

/// One checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Requirement {
    pub id: &'static str,
    pub label: &'static str,
}

const fn req(id: &'static str, label: &'static str) -> Requirement {
    Requirement { id, label }
}

const TWITCH_REQUIREMENTS: &[Requirement] = &[
    req("followers_50", "At least 50 followers"),
    req("broadcast_minutes_500", "500+ broadcast minutes in the last 30 days"),
    req("broadcast_days_7", "7+ unique broadcast days in the last 30 days"),
    req("average_viewers_3", "Average of 3+ concurrent viewers"),
];

const YOUTUBE_REQUIREMENTS: &[Requirement] = &[
    req("subscribers_1000", "1,000+ subscribers"),
    req("watch_hours_4000", "4,000+ public watch hours in the last 12 months"),
    req("shorts_views_10m", "10M+ valid Shorts views in the last 90 days"),
];

const TIKTOK_REQUIREMENTS: &[Requirement] = &[
    req("followers_10k", "10,000+ followers"),
    req("views_100k", "100,000+ video views in the last 30 days"),
    req("age_18", "18 years or older"),
];

const INSTAGRAM_REQUIREMENTS: &[Requirement] = &[
    req("professional_account", "Professional (creator or business) account"),
    req("partner_policies", "Meets Partner Monetization Policies"),
];

/// The monetization checklist for `platform` (case-insensitive).
/// Unknown platforms have an empty checklist.
pub fn monetization_requirements(platform: &str) -> &'static [Requirement] {
    match platform.trim().to_lowercase().as_str() {
        "twitch" => TWITCH_REQUIREMENTS,
        "youtube" => YOUTUBE_REQUIREMENTS,
        "tiktok" => TIKTOK_REQUIREMENTS,
        "instagram" => INSTAGRAM_REQUIREMENTS,
        _ => &[],
    }
}

/// State of the connect step for one platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectForm {
    pub platform: String,
    #[serde(default)]
    pub follower_range: Option<FollowerRange>,
    #[serde(default)]
    pub checked: BTreeSet<String>,
}

impl ConnectForm {
    pub fn new(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            ..Default::default()
        }
    }

    pub fn select_range(&mut self, range: FollowerRange) {
        self.follower_range = Some(range);
    }

    /// Flip a checkbox. Returns the new checked state.
    pub fn toggle(&mut self, requirement_id: &str) -> bool {
        if self.checked.remove(requirement_id) {
            false
        } else {
            self.checked.insert(requirement_id.to_string());
            true
        }
    }

    /// Checked items that belong to this platform's checklist.
    pub fn satisfied(&self) -> impl Iterator<Item = &'static Requirement> + '_ {
        monetization_requirements(&self.platform)
            .iter()
            .filter(move |r| self.checked.contains(r.id))
    }

    pub fn can_continue(&self) -> bool {
        self.follower_range.is_some() && self.satisfied().next().is_some()
    }
}
