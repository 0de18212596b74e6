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

pub mod config;
pub mod estimator;
pub mod format;
pub mod onboarding;
pub mod rates;
pub mod wasm;

pub use estimator::{
    clamp_monetized_percent, estimate, EarningsBreakdown, EarningsEstimator, EstimationInput,
    EstimationResult, SubscriptionCounts,
};
pub use rates::{MonetizationModel, PlatformRates, RateRange, RateTable, RateTableError, TierValues};
