//! Withdrawal review queue
//!
//! Admitted withdrawals wait here until an admin approves or rejects them.
//! A ticket leaves `Pending` exactly once.

use crate::error::{ReportError, ReportResult};
use chrono::{DateTime, Utc};
use refnet_core::{Amount, Asset};
use refnet_engine::{Operation, OperationKind, OperationRequest, OperationResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TicketStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalTicket {
    pub id: u64,
    pub user: String,
    pub asset: Asset,
    pub amount: Amount,
    pub destination: String,
    pub fee: Amount,
    pub user_receives: Amount,
    pub status: TicketStatus,
    pub requested_at: DateTime<Utc>,
}

/// Transfer the admin must send after approval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub ticket_id: u64,
    pub destination: String,
    pub asset: Asset,
    pub amount: Amount,
}

#[derive(Debug, Default)]
pub struct WithdrawalQueue {
    next_id: u64,
    tickets: BTreeMap<u64, WithdrawalTicket>,
}

impl WithdrawalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an admitted withdrawal; returns the ticket id
    pub fn submit(
        &mut self,
        user: impl Into<String>,
        request: &OperationRequest,
        result: &OperationResult,
        requested_at: DateTime<Utc>,
    ) -> ReportResult<u64> {
        let Operation::Withdraw { destination } = &request.operation else {
            return Err(ReportError::Inadmissible(format!(
                "{} is not a withdrawal",
                request.operation.kind()
            )));
        };
        if result.kind != OperationKind::Withdraw || !result.admissible {
            return Err(ReportError::Inadmissible(
                result.reason_text().unwrap_or("not a withdrawal").to_string(),
            ));
        }
        if result.asset != request.asset {
            return Err(ReportError::Inadmissible(format!(
                "result is for {} but request is for {}",
                result.asset, request.asset
            )));
        }

        self.next_id += 1;
        let id = self.next_id;
        let ticket = WithdrawalTicket {
            id,
            user: user.into(),
            asset: result.asset,
            amount: result.due,
            destination: destination.trim().to_string(),
            fee: result.fee,
            user_receives: result.net,
            status: TicketStatus::Pending,
            requested_at,
        };

        tracing::info!(
            ticket = id,
            asset = %ticket.asset,
            amount = %ticket.amount,
            "Withdrawal queued"
        );
        self.tickets.insert(id, ticket);
        Ok(id)
    }

    pub fn get(&self, id: u64) -> Option<&WithdrawalTicket> {
        self.tickets.get(&id)
    }

    /// Pending tickets in submission order
    pub fn pending(&self) -> Vec<&WithdrawalTicket> {
        self.tickets
            .values()
            .filter(|t| t.status == TicketStatus::Pending)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    /// Approve a pending ticket and return the payout to send
    pub fn approve(&mut self, id: u64) -> ReportResult<Payout> {
        let ticket = self.resolve(id, TicketStatus::Approved)?;
        tracing::info!(ticket = id, receives = %ticket.user_receives, "Withdrawal approved");
        Ok(Payout {
            ticket_id: id,
            destination: ticket.destination.clone(),
            asset: ticket.asset,
            amount: ticket.user_receives,
        })
    }

    pub fn reject(&mut self, id: u64) -> ReportResult<()> {
        self.resolve(id, TicketStatus::Rejected)?;
        tracing::info!(ticket = id, "Withdrawal rejected");
        Ok(())
    }

    fn resolve(&mut self, id: u64, status: TicketStatus) -> ReportResult<&WithdrawalTicket> {
        let ticket = self
            .tickets
            .get_mut(&id)
            .ok_or(ReportError::TicketNotFound(id))?;
        if ticket.status != TicketStatus::Pending {
            return Err(ReportError::AlreadyResolved {
                id,
                status: ticket.status.to_string(),
            });
        }
        ticket.status = status;
        Ok(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use refnet_engine::{evaluate, AssetConfig};
    use rust_decimal_macros::dec;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 10, 15, 30, 0).unwrap()
    }

    fn submit_bnb(queue: &mut WithdrawalQueue, amount: &str) -> u64 {
        let config = AssetConfig::default_for(Asset::Bnb);
        let request = OperationRequest::withdraw(
            Asset::Bnb,
            amount,
            Amount::new(dec!(10)).unwrap(),
            "0x1234567890123456789012345678901234567890",
        );
        let result = evaluate(&request, &config);
        queue.submit("0x7a2f...9b3c", &request, &result, at()).unwrap()
    }

    #[test]
    fn test_submit_and_approve() {
        let mut queue = WithdrawalQueue::new();
        let id = submit_bnb(&mut queue, "2.5");

        let ticket = queue.get(id).unwrap();
        assert_eq!(ticket.fee.value(), dec!(0.125));
        assert_eq!(ticket.user_receives.value(), dec!(2.375));
        assert_eq!(queue.pending().len(), 1);

        let payout = queue.approve(id).unwrap();
        assert_eq!(payout.amount.value(), dec!(2.375));
        assert_eq!(payout.destination, "0x1234567890123456789012345678901234567890");
        assert!(queue.pending().is_empty());
        assert_eq!(queue.get(id).unwrap().status, TicketStatus::Approved);
    }

    #[test]
    fn test_resolve_only_once() {
        let mut queue = WithdrawalQueue::new();
        let first = submit_bnb(&mut queue, "1.0");
        let second = submit_bnb(&mut queue, "2.0");
        assert_eq!((first, second), (1, 2));

        queue.reject(first).unwrap();
        assert!(matches!(
            queue.approve(first),
            Err(ReportError::AlreadyResolved { id: 1, .. })
        ));
        assert_eq!(queue.approve(99), Err(ReportError::TicketNotFound(99)));

        let pending: Vec<u64> = queue.pending().iter().map(|t| t.id).collect();
        assert_eq!(pending, vec![2]);
    }

    #[test]
    fn test_rejected_result_not_queued() {
        let mut queue = WithdrawalQueue::new();
        let config = AssetConfig::default_for(Asset::Bnb);
        let request = OperationRequest::withdraw(Asset::Bnb, "50", Amount::ZERO, "0xabc");
        let result = evaluate(&request, &config);

        assert!(matches!(
            queue.submit("u", &request, &result, at()),
            Err(ReportError::Inadmissible(reason)) if reason == "insufficient balance"
        ));

        let deposit = OperationRequest::deposit(Asset::Bnb, "1", Amount::ZERO);
        let result = evaluate(&deposit, &config);
        assert!(queue.submit("u", &deposit, &result, at()).is_err());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_mismatched_request_and_result_not_queued() {
        let mut queue = WithdrawalQueue::new();
        let destination = "0x1234567890123456789012345678901234567890";
        let balance = Amount::new(dec!(10)).unwrap();

        let btc = OperationRequest::withdraw(Asset::Btc, "0.05", balance, destination);
        let btc_result = evaluate(&btc, &AssetConfig::default_for(Asset::Btc));
        assert!(btc_result.admissible);

        let bnb = OperationRequest::withdraw(Asset::Bnb, "2.5", balance, destination);
        assert!(matches!(
            queue.submit("u", &bnb, &btc_result, at()),
            Err(ReportError::Inadmissible(_))
        ));
        assert!(queue.is_empty());
    }
}
