//! Integration tests for RefNet
//!
//! These tests drive the full flow: configuration file, engine evaluation,
//! backend payloads, the admin withdrawal queue, earnings reports and
//! referral commission.

use std::io::Write;

use refnet_core::{Amount, Asset};
use refnet_engine::{AssetConfig, EngineConfig, OperationRequest, Rejection};
use refnet_referral::{accrue_purchase, Upline};
use refnet_reports::{summarize, Activity, Period, TicketStatus, WithdrawalQueue};
use refnet_rpc::{commands, ActionPayload, AppContext};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::NamedTempFile;

const DESTINATION: &str = "0x1234567890123456789012345678901234567890";

fn amount(value: Decimal) -> Amount {
    Amount::new(value).unwrap()
}

/// Config with a BNB minimum withdrawal of 1
fn write_config() -> NamedTempFile {
    let mut config = EngineConfig::default();
    for asset in config.assets.iter_mut() {
        if asset.asset == Asset::Bnb {
            asset.withdraw_min = amount(dec!(1));
        }
    }
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string(&config).unwrap().as_bytes())
        .unwrap();
    file
}

/// Test: config file → withdraw → queue → approve → report
#[test]
fn test_withdrawal_workflow() {
    let file = write_config();
    let ctx = AppContext::new(Some(file.path()), false).unwrap();

    // 1. Below the configured minimum
    let request = OperationRequest::withdraw(Asset::Bnb, "0.5", amount(dec!(2.5)), DESTINATION);
    let result = ctx.engine.evaluate(&request).unwrap();
    assert_eq!(result.reason, Some(Rejection::BelowMinimum));

    // 2. Full balance
    let request = OperationRequest::withdraw(Asset::Bnb, "2.5", amount(dec!(2.5)), DESTINATION);
    let result = ctx.engine.evaluate(&request).unwrap();
    assert!(result.admissible);
    assert_eq!(result.fee.value(), dec!(0.125));
    assert_eq!(result.net.value(), dec!(2.375));

    // 3. Payload for the backend
    let payload = ActionPayload::withdraw(&request, &result, "0x7a2f").unwrap();
    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json["action"], "withdraw");
    assert_eq!(json["amount"], "2.5");

    // 4. Admin review
    let now = chrono::Utc::now();
    let mut queue = WithdrawalQueue::new();
    let id = queue.submit("0x7a2f", &request, &result, now).unwrap();
    let payout = queue.approve(id).unwrap();
    assert_eq!(payout.amount.value(), dec!(2.375));
    assert_eq!(queue.get(id).unwrap().status, TicketStatus::Approved);

    // 5. Earnings report picks up the fee
    let config = ctx.engine.asset(Asset::Bnb).unwrap();
    let activity = Activity::from_result(&result, config, "0x7a2f", now).unwrap();
    let summary = summarize(&[activity], Period::Today, now).unwrap();
    assert_eq!(summary.total_for(Asset::Bnb).value(), dec!(0.125));
}

/// Test: package purchase with referrer → payload → commission
#[test]
fn test_package_purchase_workflow() {
    let ctx = AppContext::new(None, false).unwrap();
    let vip = ctx.engine.packages().get(3).unwrap().clone();
    let starter = ctx.engine.packages().get(1).unwrap().clone();

    let request = ctx
        .engine
        .buy_package_request(2, Asset::Bnb, Amount::ZERO, Some("REF123ABC".to_string()))
        .unwrap();
    let result = ctx.engine.evaluate(&request).unwrap();
    assert!(result.admissible);
    assert_eq!(result.due.value(), dec!(0.5));
    assert!(result.fee.is_zero());

    let payload = ActionPayload::buy_package(&request, &result, "0xbuyer").unwrap();
    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json["referrer"], "REF123ABC");
    assert_eq!(json["package_id"], 2);

    // Direct referrer holds Starter (1 level), grand-referrer holds VIP
    let upline = vec![
        Upline::new("0xstarter", Some(starter)),
        Upline::new("0xvip", Some(vip)),
    ];
    let accruals = accrue_purchase(&result, &upline);
    assert_eq!(accruals.len(), 2);
    assert_eq!(accruals[0].amount.value(), dec!(0.015));
    assert_eq!(accruals[1].amount.value(), dec!(0.05));
    assert_eq!(accruals[1].level, 2);
}

/// Test: package with an asset not in its price list
#[test]
fn test_unsupported_package_asset() {
    let ctx = AppContext::new(None, false).unwrap();
    let request = ctx
        .engine
        .buy_package_request(1, Asset::Eth, Amount::ZERO, None)
        .unwrap();
    let result = ctx.engine.evaluate(&request).unwrap();
    assert_eq!(result.reason, Some(Rejection::UnsupportedAsset));
    assert!(ActionPayload::buy_package(&request, &result, "0xw").is_err());
}

#[test]
fn test_commands_text_output() {
    let ctx = AppContext::new(None, false).unwrap();

    let out = commands::withdraw(&ctx, Asset::Btc, "0.05", amount(dec!(1)), DESTINATION).unwrap();
    assert_eq!(
        out,
        "✅ withdraw admitted: due 0.05 BTC, fee 0.0025 BTC, net 0.0475 BTC"
    );

    let out = commands::withdraw(&ctx, Asset::Btc, "0.05", amount(dec!(1)), "").unwrap();
    assert_eq!(out, "❌ withdraw rejected: missing address");

    let out = commands::deposit(&ctx, Asset::Bnb, "abc").unwrap();
    assert_eq!(out, "❌ deposit rejected: invalid amount");

    let out = commands::packages(&ctx).unwrap();
    assert_eq!(out.lines().count(), 3);
    assert!(out.contains("VIP"));
}

#[test]
fn test_commands_json_output() {
    let ctx = AppContext::new(None, true).unwrap();
    let out = commands::buy(&ctx, 3, Asset::Btc, None, None).unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();

    assert_eq!(json["admissible"], true);
    assert_eq!(json["kind"], "buy_package");
    assert_eq!(json["due"], "0.015");

    let out = commands::assets(&ctx).unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 4);
}

#[test]
fn test_payload_commands() {
    let ctx = AppContext::new(None, false).unwrap();

    let out = commands::payload_buy(&ctx, 1, Asset::Bnb, "0xw", None).unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["amount"], "0.1");
    assert_eq!(json["referrer"], "");

    let err = commands::payload_withdraw(&ctx, Asset::Bnb, "5", amount(dec!(1)), DESTINATION, "0xw")
        .unwrap_err();
    assert!(err.to_string().contains("insufficient balance"));

    assert!(commands::payload_buy(&ctx, 7, Asset::Bnb, "0xw", None).is_err());
}

#[test]
fn test_referral_link_command() {
    let link = commands::referral_link(Some("ref123abc"), "https://crypto-platform.com").unwrap();
    assert_eq!(link, "https://crypto-platform.com/ref/REF123ABC");

    let generated = commands::referral_link(None, "https://example.org").unwrap();
    assert!(generated.starts_with("https://example.org/ref/REF"));

    assert!(commands::referral_link(Some("bad code"), "https://example.org").is_err());
}

#[test]
fn test_config_missing_asset_is_an_error() {
    let config = EngineConfig {
        assets: vec![AssetConfig::default_for(Asset::Bnb)],
        ..EngineConfig::default()
    };
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string(&config).unwrap().as_bytes())
        .unwrap();

    let ctx = AppContext::new(Some(file.path()), false).unwrap();
    assert!(commands::deposit(&ctx, Asset::Btc, "1").is_err());
}
