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

use creator_earnings::config::{self, RATES_PATH_ENV};
use creator_earnings::format::{format_usd, format_views, whole_views};
use creator_earnings::{EarningsEstimator, EstimationInput, MonetizationModel, RateTable};
use std::env;
use std::fs;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_usage() {
    println!("Usage: earnings <input.json>");
    println!("       earnings --platforms");
    println!("  Estimates monthly creator earnings from an EstimationInput JSON file.");
    println!("  Set {} to a JSON file to override the built-in rates.", RATES_PATH_ENV);
}

fn print_platforms(rates: &RateTable) {
    for (platform, entry) in rates.iter() {
        println!("{:<12} {:<13} {}", platform, entry.model.label(), entry.basis);
        if let MonetizationModel::NicheRpm { niches } = &entry.model {
            for (niche, rate) in niches {
                println!("{:<12}   {:<20} ${:.2}-${:.2} RPM", "", niche, rate.min, rate.max);
            }
        }
    }
}

fn run_estimate(rates: &RateTable, filename: &str) -> Result<(), Box<dyn std::error::Error>> {
    let json_content = fs::read_to_string(filename)?;
    let input: EstimationInput = serde_json::from_str(&json_content)?;

    let estimator = EarningsEstimator::new(rates);
    let breakdown = estimator.breakdown(&input);
    info!(
        platform = %input.platform,
        monetized_views = breakdown.monetized_views,
        total = breakdown.total,
        "Estimate computed"
    );

    let result = breakdown.into_result();
    println!("{}", serde_json::to_string_pretty(&result)?);
    if result.rate_basis_description.is_empty() {
        println!("{}: no rates for this platform", input.platform);
    } else {
        println!(
            "{}: {} / month from {} views ({})",
            input.platform,
            format_usd(result.estimated_monthly_earnings),
            format_views(whole_views(input.total_views.unwrap_or(0.0))),
            result.rate_basis_description
        );
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = env::args().collect();
    let Some(arg) = args.get(1) else {
        print_usage();
        return Ok(());
    };

    let rates = config::rate_table_from_env()?;

    match arg.as_str() {
        "-h" | "--help" => print_usage(),
        "--platforms" => print_platforms(&rates),
        filename => run_estimate(&rates, filename)?,
    }
    Ok(())
}
