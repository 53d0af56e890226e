use anyhow::{bail, Result};

use trade_journal::core::{compute_risk_reward, rr_bucket, RiskReward};
use trade_journal::models::Direction;

/// Usage: rr_calc <long|short> <entry> <stop> <target>
fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != 4 {
        bail!("usage: rr_calc <long|short> <entry> <stop> <target>");
    }

    let direction: Direction = args[0].parse()?;
    // Unparseable prices behave like empty form fields
    let price = |s: &str| s.parse::<f64>().ok();

    let ratio = compute_risk_reward(
        price(&args[1]),
        price(&args[2]),
        price(&args[3]),
        Some(direction),
    );

    match ratio {
        Some(r) => println!("Risk:Reward {} (bucket {})", RiskReward::label(Some(r)), rr_bucket(Some(r))),
        None => println!("Risk:Reward {} (undefined: zero risk or missing input)", RiskReward::label(None)),
    }

    Ok(())
}
