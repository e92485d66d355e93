//! CLI commands
//!
//! Each command returns the text to print so the binary stays a thin shell.

use refnet_core::{Amount, Asset};
use refnet_engine::{OperationRequest, OperationResult};
use refnet_referral::ReferralCode;

use crate::context::AppContext;
use crate::payload::ActionPayload;

/// List configured assets with their limits and fees
pub fn assets(ctx: &AppContext) -> Result<String, anyhow::Error> {
    if ctx.json {
        let assets: Vec<_> = ctx.engine.assets().collect();
        return Ok(serde_json::to_string_pretty(&assets)?);
    }

    let lines: Vec<String> = ctx
        .engine
        .assets()
        .map(|c| {
            format!(
                "{:<5} deposit min {} (fee {}), withdraw min {} (fee {})",
                c.asset, c.deposit_min, c.deposit_fee_rate, c.withdraw_min, c.withdraw_fee_rate
            )
        })
        .collect();
    Ok(lines.join("\n"))
}

/// List packages with prices and commission
pub fn packages(ctx: &AppContext) -> Result<String, anyhow::Error> {
    let catalog = ctx.engine.packages();
    if ctx.json {
        return Ok(serde_json::to_string_pretty(catalog)?);
    }

    let lines: Vec<String> = catalog
        .iter()
        .map(|p| {
            let prices: Vec<String> = p
                .prices
                .iter()
                .map(|(asset, price)| format!("{price} {asset}"))
                .collect();
            format!(
                "#{} {:<12} {} commission, {} referral level(s), price {}",
                p.id,
                p.name,
                p.commission_rate,
                p.referral_levels,
                prices.join(" / ")
            )
        })
        .collect();
    Ok(lines.join("\n"))
}

/// Evaluate a deposit
pub fn deposit(ctx: &AppContext, asset: Asset, amount: &str) -> Result<String, anyhow::Error> {
    let request = OperationRequest::deposit(asset, amount, Amount::ZERO);
    render(ctx, &request)
}

/// Evaluate a withdrawal
pub fn withdraw(
    ctx: &AppContext,
    asset: Asset,
    amount: &str,
    balance: Amount,
    destination: &str,
) -> Result<String, anyhow::Error> {
    let request = OperationRequest::withdraw(asset, amount, balance, destination);
    render(ctx, &request)
}

/// Evaluate a package purchase
pub fn buy(
    ctx: &AppContext,
    package_id: u32,
    asset: Asset,
    referrer: Option<String>,
    amount: Option<&str>,
) -> Result<String, anyhow::Error> {
    let mut request = ctx
        .engine
        .buy_package_request(package_id, asset, Amount::ZERO, referrer)?;
    if let Some(amount) = amount {
        request = request.with_amount(amount);
    }
    render(ctx, &request)
}

/// Print a referral link, generating a code when none is given
pub fn referral_link(code: Option<&str>, base_url: &str) -> Result<String, anyhow::Error> {
    let code = match code {
        Some(code) => ReferralCode::new(code)?,
        None => ReferralCode::generate(&mut rand::thread_rng()),
    };
    Ok(code.link(base_url))
}

/// Backend payload for a withdrawal, or an error if it is not admissible
pub fn payload_withdraw(
    ctx: &AppContext,
    asset: Asset,
    amount: &str,
    balance: Amount,
    destination: &str,
    from_wallet: &str,
) -> Result<String, anyhow::Error> {
    let request = OperationRequest::withdraw(asset, amount, balance, destination);
    let result = ctx.engine.evaluate(&request)?;
    let payload = ActionPayload::withdraw(&request, &result, from_wallet)?;
    Ok(serde_json::to_string_pretty(&payload)?)
}

/// Backend payload for a package purchase
pub fn payload_buy(
    ctx: &AppContext,
    package_id: u32,
    asset: Asset,
    wallet: &str,
    referrer: Option<String>,
) -> Result<String, anyhow::Error> {
    let request = ctx
        .engine
        .buy_package_request(package_id, asset, Amount::ZERO, referrer)?;
    let result = ctx.engine.evaluate(&request)?;
    let payload = ActionPayload::buy_package(&request, &result, wallet)?;
    Ok(serde_json::to_string_pretty(&payload)?)
}

fn render(ctx: &AppContext, request: &OperationRequest) -> Result<String, anyhow::Error> {
    let result = ctx.engine.evaluate(request)?;
    if ctx.json {
        return Ok(serde_json::to_string_pretty(&result)?);
    }
    describe(ctx, &result)
}

fn describe(ctx: &AppContext, result: &OperationResult) -> Result<String, anyhow::Error> {
    let config = ctx.engine.asset(result.asset)?;

    if let Some(reason) = result.reason {
        return Ok(format!("❌ {} rejected: {}", result.kind, reason));
    }

    let mut out = format!(
        "✅ {} admitted: due {}, fee {}, net {}",
        result.kind,
        config.display(result.due),
        config.display(result.fee),
        config.display(result.net)
    );
    if let Some(referrer) = &result.referrer {
        out.push_str(&format!(" (referrer {referrer})"));
    }
    Ok(out)
}
