use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::account::KycStatus;

/// An identity or financial document a user has uploaded for KYC.
///
/// The hash points at the off-chain copy; nothing here verifies it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub ipfs_hash: String,
    pub status: KycStatus,
    pub uploaded_at: NaiveDate,
}

/// "8/10 verified, 2 pending".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentSummary {
    pub total: usize,
    pub verified: usize,
    pub pending: usize,
    pub rejected: usize,
}

impl DocumentSummary {
    pub fn of(documents: &[Document]) -> Self {
        documents.iter().fold(Self::default(), |mut acc, d| {
            acc.total += 1;
            match d.status {
                KycStatus::Verified => acc.verified += 1,
                KycStatus::Pending => acc.pending += 1,
                KycStatus::Rejected => acc.rejected += 1,
            }
            acc
        })
    }

    pub fn ratio_label(&self) -> String {
        format!("{}/{}", self.verified, self.total)
    }

    /// Overall KYC standing implied by the documents.
    ///
    /// Any rejection wins, then anything outstanding; an empty set is pending.
    pub fn overall(&self) -> KycStatus {
        if self.rejected > 0 {
            KycStatus::Rejected
        } else if self.pending > 0 || self.total == 0 {
            KycStatus::Pending
        } else {
            KycStatus::Verified
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskProfile {
    Conservative,
    #[default]
    Moderate,
    Aggressive,
}

impl RiskProfile {
    pub fn label(self) -> &'static str {
        match self {
            RiskProfile::Conservative => "Conservative",
            RiskProfile::Moderate => "Moderate",
            RiskProfile::Aggressive => "Aggressive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub kind: String,
    /// Whole dollars.
    pub value: u64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Liability {
    pub id: String,
    pub kind: String,
    pub amount: u64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialPassport {
    pub user_id: String,
    pub credit_score: u16,
    pub risk_profile: RiskProfile,
    pub assets: Vec<Asset>,
    pub liabilities: Vec<Liability>,
}

impl FinancialPassport {
    pub fn total_assets(&self) -> u64 {
        self.assets.iter().map(|a| a.value).sum()
    }

    pub fn total_liabilities(&self) -> u64 {
        self.liabilities.iter().map(|l| l.amount).sum()
    }

    /// Assets minus liabilities; negative when underwater.
    pub fn net_position(&self) -> i128 {
        self.total_assets() as i128 - self.total_liabilities() as i128
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, status: KycStatus) -> Document {
        Document {
            id: id.into(),
            name: format!("{id}.pdf"),
            kind: "Identity".into(),
            ipfs_hash: format!("Qm{id}"),
            status,
            uploaded_at: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        }
    }

    #[test]
    fn summary_counts_each_status() {
        let docs = vec![
            doc("a", KycStatus::Verified),
            doc("b", KycStatus::Verified),
            doc("c", KycStatus::Pending),
        ];
        let s = DocumentSummary::of(&docs);
        assert_eq!(s.ratio_label(), "2/3");
        assert_eq!(s.pending, 1);
        assert_eq!(s.overall(), KycStatus::Pending);
    }

    #[test]
    fn rejection_dominates_overall_status() {
        let docs = vec![doc("a", KycStatus::Verified), doc("b", KycStatus::Rejected)];
        assert_eq!(DocumentSummary::of(&docs).overall(), KycStatus::Rejected);
        assert_eq!(DocumentSummary::of(&[]).overall(), KycStatus::Pending);
        assert_eq!(
            DocumentSummary::of(&[doc("a", KycStatus::Verified)]).overall(),
            KycStatus::Verified
        );
    }

    #[test]
    fn net_position_can_go_negative() {
        let passport = FinancialPassport {
            user_id: "u1".into(),
            credit_score: 750,
            risk_profile: RiskProfile::Moderate,
            assets: vec![Asset {
                id: "1".into(),
                kind: "Savings".into(),
                value: 10_000,
                description: "Emergency fund".into(),
            }],
            liabilities: vec![Liability {
                id: "1".into(),
                kind: "Mortgage".into(),
                amount: 250_000,
                description: "Home loan".into(),
            }],
        };
        assert_eq!(passport.net_position(), -240_000);
    }
}
