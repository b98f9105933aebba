use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A holding recorded against a wallet. Negative amounts are debts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerAsset {
    pub asset_type: String,
    pub amount: i128,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTransaction {
    /// Unix seconds at which the entry was recorded.
    pub timestamp: u64,
    pub transaction_type: String,
    pub amount: i128,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub name: String,
    pub target_amount: i128,
    pub current_amount: i128,
    /// Unix seconds.
    pub deadline: u64,
}

impl Goal {
    /// Whole percent reached, clamped to 0..=100.
    pub fn percent_complete(&self) -> u8 {
        if self.target_amount <= 0 {
            return 100;
        }
        let pct = self.current_amount.max(0).saturating_mul(100) / self.target_amount;
        pct.min(100) as u8
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum FinanceError {
    #[error("finance book already initialized")]
    AlreadyInitialized,
    #[error("finance book not initialized")]
    NotInitialized,
    #[error("no goals found")]
    NoGoals,
    #[error("goal index {index} out of bounds ({len} goals)")]
    GoalOutOfBounds { index: usize, len: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Ledger {
    assets: Vec<LedgerAsset>,
    transactions: Vec<LedgerTransaction>,
    goals: Vec<Goal>,
}

/// Per-wallet assets, transactions and savings goals.
///
/// Entries are keyed by wallet address. Reads for an address that has never
/// written anything return empty lists rather than errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceBook {
    admin: Option<String>,
    ledgers: BTreeMap<String, Ledger>,
}

impl FinanceBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initialize(&mut self, admin: &str) -> Result<(), FinanceError> {
        if self.admin.is_some() {
            return Err(FinanceError::AlreadyInitialized);
        }
        debug!(admin, "finance book initialized");
        self.admin = Some(admin.to_string());
        Ok(())
    }

    pub fn is_admin(&self, address: &str) -> Result<bool, FinanceError> {
        self.admin
            .as_deref()
            .map(|admin| admin == address)
            .ok_or(FinanceError::NotInitialized)
    }

    pub fn add_asset(&mut self, owner: &str, asset_type: &str, amount: i128, description: &str) {
        self.ledger_mut(owner).assets.push(LedgerAsset {
            asset_type: asset_type.to_string(),
            amount,
            description: description.to_string(),
        });
    }

    pub fn assets(&self, owner: &str) -> &[LedgerAsset] {
        self.ledgers.get(owner).map(|l| l.assets.as_slice()).unwrap_or_default()
    }

    pub fn record_transaction(
        &mut self,
        owner: &str,
        transaction_type: &str,
        amount: i128,
        description: &str,
        timestamp: u64,
    ) {
        self.ledger_mut(owner).transactions.push(LedgerTransaction {
            timestamp,
            transaction_type: transaction_type.to_string(),
            amount,
            description: description.to_string(),
        });
    }

    pub fn transactions(&self, owner: &str) -> &[LedgerTransaction] {
        self.ledgers.get(owner).map(|l| l.transactions.as_slice()).unwrap_or_default()
    }

    pub fn create_goal(&mut self, owner: &str, name: &str, target_amount: i128, deadline: u64) {
        self.ledger_mut(owner).goals.push(Goal {
            name: name.to_string(),
            target_amount,
            current_amount: 0,
            deadline,
        });
    }

    pub fn goals(&self, owner: &str) -> &[Goal] {
        self.ledgers.get(owner).map(|l| l.goals.as_slice()).unwrap_or_default()
    }

    /// Add `amount` to the goal at `index`, returning the updated goal.
    pub fn update_goal_progress(
        &mut self,
        owner: &str,
        index: usize,
        amount: i128,
    ) -> Result<&Goal, FinanceError> {
        let goals = match self.ledgers.get_mut(owner) {
            Some(ledger) if !ledger.goals.is_empty() => &mut ledger.goals,
            _ => return Err(FinanceError::NoGoals),
        };
        let len = goals.len();
        let goal = goals
            .get_mut(index)
            .ok_or(FinanceError::GoalOutOfBounds { index, len })?;
        goal.current_amount += amount;
        debug!(owner, index, current = %goal.current_amount, "goal progress updated");
        Ok(&*goal)
    }

    /// Sum of all asset amounts, debts included.
    pub fn net_worth(&self, owner: &str) -> i128 {
        self.assets(owner).iter().map(|a| a.amount).sum()
    }

    fn ledger_mut(&mut self, owner: &str) -> &mut Ledger {
        self.ledgers.entry(owner.to_string()).or_default()
    }
}
