//! Platform earnings per period
//!
//! Every deposit, withdrawal and package sale earns the platform
//! `amount × earnings_rate`: the operation fee for deposits and
//! withdrawals, the full price for packages.

use crate::error::{ReportError, ReportResult};
use chrono::{DateTime, Duration, Utc};
use refnet_core::{Amount, Asset};
use refnet_engine::{AssetConfig, OperationKind, OperationResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActivityKind {
    Deposit,
    Withdraw,
    Package,
}

impl From<OperationKind> for ActivityKind {
    fn from(kind: OperationKind) -> Self {
        match kind {
            OperationKind::Deposit => ActivityKind::Deposit,
            OperationKind::Withdraw => ActivityKind::Withdraw,
            OperationKind::BuyPackage => ActivityKind::Package,
        }
    }
}

/// Share of an operation's amount the platform keeps, in `[0, 1]`.
///
/// Unlike a fee rate this may be 1: package sales are booked in full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct EarningsRate(Decimal);

impl EarningsRate {
    pub const FULL: Self = Self(Decimal::ONE);

    pub fn new(value: Decimal) -> ReportResult<Self> {
        if value < Decimal::ZERO || value > Decimal::ONE {
            return Err(ReportError::InvalidEarningsRate(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for EarningsRate {
    type Error = ReportError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EarningsRate> for Decimal {
    fn from(rate: EarningsRate) -> Self {
        rate.0
    }
}

/// One booked operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub kind: ActivityKind,
    pub user: String,
    pub asset: Asset,
    pub amount: Amount,
    pub earnings_rate: EarningsRate,
    pub at: DateTime<Utc>,
}

impl Activity {
    /// Book an admitted engine result. Rejected results are not activity.
    pub fn from_result(
        result: &OperationResult,
        config: &AssetConfig,
        user: impl Into<String>,
        at: DateTime<Utc>,
    ) -> ReportResult<Self> {
        if !result.admissible {
            return Err(ReportError::Inadmissible(
                result.reason_text().unwrap_or("rejected").to_string(),
            ));
        }

        let kind = ActivityKind::from(result.kind);
        let earnings_rate = match kind {
            ActivityKind::Deposit => EarningsRate(config.deposit_fee_rate.value()),
            ActivityKind::Withdraw => EarningsRate(config.withdraw_fee_rate.value()),
            ActivityKind::Package => EarningsRate::FULL,
        };

        Ok(Self {
            kind,
            user: user.into(),
            asset: result.asset,
            amount: result.due,
            earnings_rate,
            at,
        })
    }

    pub fn earnings(&self) -> Amount {
        Amount::new_unchecked(self.amount.value() * self.earnings_rate.value())
    }
}

/// Reporting window, relative to a caller-supplied `now`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Period {
    /// Same UTC calendar day as `now`
    Today,
    /// Last 7 days
    Week,
    /// Last 30 days
    Month,
}

impl Period {
    pub fn contains(&self, at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        if at > now {
            return false;
        }
        match self {
            Period::Today => at.date_naive() == now.date_naive(),
            Period::Week => now - at < Duration::days(7),
            Period::Month => now - at < Duration::days(30),
        }
    }
}

/// Volume and platform earnings for one kind and asset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flow {
    pub volume: Amount,
    pub earnings: Amount,
}

impl Flow {
    fn add(&mut self, activity: &Activity) -> ReportResult<()> {
        let volume = self.volume.checked_add(&activity.amount);
        let earnings = self.earnings.checked_add(&activity.earnings());
        match (volume, earnings) {
            (Some(volume), Some(earnings)) => {
                self.volume = volume;
                self.earnings = earnings;
                Ok(())
            }
            _ => Err(overflow(activity, activity.kind.to_string())),
        }
    }
}

fn overflow(activity: &Activity, kind: String) -> ReportError {
    ReportError::Overflow {
        asset: activity.asset,
        kind,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsSummary {
    pub period: Period,
    pub deposits: BTreeMap<Asset, Flow>,
    pub withdraws: BTreeMap<Asset, Flow>,
    pub packages: BTreeMap<Asset, Flow>,
    /// Platform earnings across all kinds
    pub total: BTreeMap<Asset, Amount>,
}

impl EarningsSummary {
    pub fn flows(&self, kind: ActivityKind) -> &BTreeMap<Asset, Flow> {
        match kind {
            ActivityKind::Deposit => &self.deposits,
            ActivityKind::Withdraw => &self.withdraws,
            ActivityKind::Package => &self.packages,
        }
    }

    pub fn total_for(&self, asset: Asset) -> Amount {
        self.total.get(&asset).copied().unwrap_or_default()
    }
}

/// Aggregate the activity that falls inside `period`.
///
/// Fails with `Overflow` if a per-asset sum leaves the `Decimal` range.
pub fn summarize(
    activities: &[Activity],
    period: Period,
    now: DateTime<Utc>,
) -> ReportResult<EarningsSummary> {
    let mut summary = EarningsSummary {
        period,
        deposits: BTreeMap::new(),
        withdraws: BTreeMap::new(),
        packages: BTreeMap::new(),
        total: BTreeMap::new(),
    };

    for activity in activities.iter().filter(|a| period.contains(a.at, now)) {
        let flows = match activity.kind {
            ActivityKind::Deposit => &mut summary.deposits,
            ActivityKind::Withdraw => &mut summary.withdraws,
            ActivityKind::Package => &mut summary.packages,
        };
        flows.entry(activity.asset).or_default().add(activity)?;

        let total = summary.total.entry(activity.asset).or_default();
        *total = total
            .checked_add(&activity.earnings())
            .ok_or_else(|| overflow(activity, "total".to_string()))?;
    }

    Ok(summary)
}
