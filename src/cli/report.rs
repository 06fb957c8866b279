//! Detection output rendering

use crate::detect::{Detection, Opportunity, SkipReason};

/// Print a detection result to stdout
pub fn print_detection(detection: &Detection, json: bool, verbose: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&detection.opportunities)?);
        return Ok(());
    }

    if detection.opportunities.is_empty() {
        println!("No opportunities found");
    }
    for opportunity in &detection.opportunities {
        print_opportunity(opportunity);
    }

    if verbose {
        for skip in &detection.skips {
            println!("  skipped {}: {}", skip.fixture_id, describe(&skip.reason));
        }
    }

    Ok(())
}

fn print_opportunity(opp: &Opportunity) {
    println!("{}", opp.match_name);
    if let Some(commence) = opp.commence_time {
        println!("  commences: {}", commence.to_rfc3339());
    }
    println!(
        "  implied probability: {}%  margin: {}%",
        opp.implied_probability_pct, opp.profit_margin_pct
    );
    for leg in &opp.legs {
        println!(
            "  {} @ {} ({}) via {}: stake {} returns {}",
            leg.outcome, leg.price, leg.fractional, leg.bookmaker, leg.stake, leg.payout_if_win
        );
    }
    println!(
        "  total stake: {}  estimated profit: {}",
        opp.total_stake(),
        opp.estimated_profit
    );
}

fn describe(reason: &SkipReason) -> String {
    match reason {
        SkipReason::IncompleteMarket { outcomes } => {
            format!("incomplete market ({} outcomes)", outcomes)
        }
        SkipReason::UnsupportedMarketShape { outcomes } => {
            format!("unsupported market shape ({} outcomes)", outcomes)
        }
        SkipReason::BelowThreshold { profit_margin_pct } => {
            format!("margin {}% below threshold", profit_margin_pct)
        }
    }
}
