/*
 * Copyright (c) 2026 Mohamad Al-Zawahreh (dba Sovereign Systems).
 *
 * This file is part of the Creator Earnings Estimator.
 *
 * LICENSE: DUAL-LICENSED (AGPLv3 or COMMERCIAL).
 *
 * 1. OPEN SOURCE: You may use this file under the terms of the GNU Affero
 * General Public License v3.0. If you link to this code, your ENTIRE
 * application must be open-sourced under AGPLv3.
 *
 * 2. COMMERCIAL: For proprietary use, you must obtain a Commercial License
 * from Sovereign Systems.
 *
 * PATENT NOTICE: Protected by US Patent App #63/935,467.
 * NO IMPLIED LICENSE to rights of Mohamad Al-Zawahreh or Sovereign Systems.
 */

use crate::estimator::{EarningsEstimator, EstimationInput};
use crate::format;
use crate::onboarding::{monetization_requirements, ConnectForm};
use crate::rates::{MonetizationModel, RateTable};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use std::panic;

/// Initialize panic hook for WASM environment.
/// This ensures panics are logged to the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    panic::set_hook(Box::new(console_error_panic_hook::hook));
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EstimateResponse {
    estimated_monthly_earnings: f64,
    rate_basis_description: String,
    formatted_earnings: String,
}

#[derive(Serialize)]
struct PlatformListing<'a> {
    platform: &'a str,
    model: &'static str,
    basis: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    niches: Vec<&'a str>,
}

fn make_error_json(msg: &str) -> String {
    serde_json::json!({ "error": msg }).to_string()
}

/// Estimates monthly earnings against the built-in rate table.
///
/// # Arguments
/// * `input_json` - `{ platform, totalViews, monetizedViewsPercent, selectedNiche?, subscriptionCounts? }`
///
/// # Returns
/// * `{ "estimatedMonthlyEarnings": .., "rateBasisDescription": .., "formattedEarnings": .. }`,
///   or `{ "error": "..." }` if the input does not parse.
#[wasm_bindgen]
pub fn estimate_earnings(input_json: &str) -> String {
    estimate_with(RateTable::builtin(), input_json)
}

pub(crate) fn estimate_with(rates: &RateTable, input_json: &str) -> String {
    let input: EstimationInput = match serde_json::from_str(input_json) {
        Ok(input) => input,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected estimation input");
            return make_error_json(&format!("Invalid input: {}", e));
        }
    };

    let result = EarningsEstimator::new(rates).estimate(&input);
    let response = EstimateResponse {
        formatted_earnings: result.formatted_earnings(),
        estimated_monthly_earnings: result.estimated_monthly_earnings,
        rate_basis_description: result.rate_basis_description,
    };
    serde_json::to_string(&response)
        .unwrap_or_else(|e| make_error_json(&format!("Serialization Error: {}", e)))
}

/// Lists the built-in platforms for populating the platform selector.
#[wasm_bindgen]
pub fn list_platforms() -> String {
    list_platforms_in(RateTable::builtin())
}

pub(crate) fn list_platforms_in(rates: &RateTable) -> String {
    let listings: Vec<PlatformListing<'_>> = rates
        .iter()
        .map(|(platform, entry)| PlatformListing {
            platform,
            model: entry.model.label(),
            basis: &entry.basis,
            niches: match &entry.model {
                MonetizationModel::NicheRpm { niches } => {
                    niches.keys().map(String::as_str).collect()
                }
                _ => Vec::new(),
            },
        })
        .collect();
    serde_json::to_string(&listings).unwrap_or_else(|_| "[]".to_string())
}

/// Thousands-separated view count for display next to the estimate.
///
/// Takes a JS `number`. Negative or non-finite counts format as `0`;
/// fractions are dropped.
#[wasm_bindgen]
pub fn format_view_count(views: f64) -> String {
    format::format_views(format::whole_views(views))
}

/// Monetization checklist for a platform as a JSON array of `{ id, label }`.
#[wasm_bindgen]
pub fn platform_requirements(platform: &str) -> String {
    serde_json::to_string(monetization_requirements(platform)).unwrap_or_else(|_| "[]".to_string())
}

/// Whether the connect step may continue.
///
/// # Arguments
/// * `form_json` - `{ platform, followerRange?, checked: [ids] }`
#[wasm_bindgen]
pub fn can_continue(form_json: &str) -> bool {
    match serde_json::from_str::<ConnectForm>(form_json) {
        Ok(form) => form.can_continue(),
        Err(e) => {
            tracing::warn!(error = %e, "Rejected connect form");
            false
        }
    }
}
