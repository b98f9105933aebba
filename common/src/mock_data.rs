//! Canned records the dashboards render until a backend exists.

use chrono::{NaiveDate, NaiveTime};

use crate::account::{
    AccountTier, AdvisorRecord, ClientRecord, KycStatus, Person, RecordStatus, UserRecord,
};
use crate::address::WalletId;
use crate::conversation::{ChatRole, Participant};
use crate::dashboard::{
    format_usd_compact, Activity, ActivityStatus, ChangeKind, Meeting, Priority, StatCard,
    StatIcon,
};
use crate::finance::FinanceBook;
use crate::passport::{Document, DocumentSummary, RiskProfile};
use crate::profile::Profile;

pub const ADVISOR_ID: &str = "advisor-1";
pub const ADVISOR_NAME: &str = "Sarah Smith";
pub const USER_ID: &str = "user-1";

/// One testnet account per wallet the connector can switch to.
pub const DEMO_ADDRESSES: [(WalletId, &str); 3] = [
    (WalletId::Freighter, "GCKFBEIYV2U22IO2BJ4KVJOIP7XPWQGQFKKWXR6DOSJBV7STMAQSMTGG"),
    (WalletId::XBull, "GBXGQJWVLWOYHFLVTKWV5FGHA3LNYY2JQKM7OAJAUEQFU6LPCSEFVXON"),
    (WalletId::Albedo, "GDQNY3PBOJOKYZSRMK2S7LHHGWZIUISD4QORETLMXEWXBI7KFZZMKTL3"),
];

pub fn demo_address(wallet: WalletId) -> &'static str {
    DEMO_ADDRESSES
        .iter()
        .find(|(w, _)| *w == wallet)
        .map(|(_, a)| *a)
        .unwrap_or_default()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn at(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default()
}

fn person(id: &str, name: &str, email: &str, phone: &str, location: &str, status: RecordStatus) -> Person {
    Person {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        location: location.to_string(),
        status,
    }
}

pub fn profile() -> Profile {
    Profile {
        name: "Raveesh".into(),
        email: "raveesh.doe@example.com".into(),
        phone: "+1 (555) 123-4567".into(),
        address: "123 Main St, New York, NY 10001".into(),
        company: "Tech Solutions Inc.".into(),
        avatar_url: Some(
            "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?auto=format&fit=facearea&facepad=2&w=256&h=256&q=80".into(),
        ),
    }
}

pub fn documents() -> Vec<Document> {
    let entries: [(&str, &str, KycStatus, u32); 10] = [
        ("Passport", "Identity", KycStatus::Verified, 1),
        ("Driver License", "Identity", KycStatus::Verified, 1),
        ("Utility Bill", "Proof of Address", KycStatus::Verified, 2),
        ("Bank Statement", "Financial", KycStatus::Verified, 3),
        ("Tax Return 2023", "Financial", KycStatus::Verified, 4),
        ("Pay Slip", "Income", KycStatus::Verified, 5),
        ("Brokerage Statement", "Financial", KycStatus::Verified, 6),
        ("Lease Agreement", "Proof of Address", KycStatus::Verified, 7),
        ("Employment Letter", "Income", KycStatus::Pending, 9),
        ("Pension Statement", "Financial", KycStatus::Pending, 10),
    ];
    entries
        .iter()
        .enumerate()
        .map(|(i, (name, kind, status, d))| Document {
            id: format!("doc-{}", i + 1),
            name: (*name).to_string(),
            kind: (*kind).to_string(),
            ipfs_hash: format!("QmPassportDoc{:02}", i + 1),
            status: *status,
            uploaded_at: day(2024, 3, *d),
        })
        .collect()
}

pub fn risk_profile() -> RiskProfile {
    RiskProfile::Moderate
}

/// Stat row on the user dashboard. The document card reflects `documents`.
pub fn user_stats(documents: &[Document]) -> Vec<StatCard> {
    let summary = DocumentSummary::of(documents);
    let doc_change = if summary.pending > 0 {
        format!("{} pending", summary.pending)
    } else {
        "All verified".to_string()
    };
    vec![
        StatCard::new("Credit Score", "750", "+5", ChangeKind::Increase, StatIcon::Chart),
        StatCard {
            name: "Documents Verified".into(),
            value: summary.ratio_label(),
            change: doc_change,
            change_kind: ChangeKind::Neutral,
            icon: StatIcon::Document,
        },
        StatCard::new("Risk Profile", risk_profile().label(), "Updated", ChangeKind::Neutral, StatIcon::Alert),
        StatCard::new("Connected Advisors", "2", "+1", ChangeKind::Increase, StatIcon::Users),
    ]
}

pub fn user_activities() -> Vec<Activity> {
    vec![
        Activity { id: 1, subject: None, kind: "Document Upload".into(), date: day(2024, 3, 10), status: ActivityStatus::Pending },
        Activity { id: 2, subject: None, kind: "KYC Verification".into(), date: day(2024, 3, 9), status: ActivityStatus::Completed },
        Activity { id: 3, subject: None, kind: "Advisor Connection".into(), date: day(2024, 3, 8), status: ActivityStatus::Completed },
    ]
}

pub fn advisor_stats() -> Vec<StatCard> {
    vec![
        StatCard::new("Total Clients", "24", "+3", ChangeKind::Increase, StatIcon::Users),
        StatCard::new("Active Portfolios", "18", "2 pending", ChangeKind::Neutral, StatIcon::Portfolio),
        StatCard::new("AUM", format_usd_compact(2_400_000), "+12.5%", ChangeKind::Increase, StatIcon::Dollar),
        StatCard::new("Client Satisfaction", "4.8/5", "+0.2", ChangeKind::Increase, StatIcon::Star),
    ]
}

pub fn advisor_activities() -> Vec<Activity> {
    let entry = |id, client: &str, kind: &str, d, status| Activity {
        id,
        subject: Some(client.to_string()),
        kind: kind.to_string(),
        date: day(2024, 3, d),
        status,
    };
    vec![
        entry(1, "John Smith", "Portfolio Review", 15, ActivityStatus::Completed),
        entry(2, "Sarah Johnson", "Risk Assessment", 14, ActivityStatus::Pending),
        entry(3, "Michael Brown", "Investment Plan", 13, ActivityStatus::Completed),
    ]
}

pub fn meetings() -> Vec<Meeting> {
    let entry = |id, client: &str, kind: &str, d, time, priority| Meeting {
        id,
        client: client.to_string(),
        kind: kind.to_string(),
        date: day(2024, 3, d),
        time,
        priority,
    };
    vec![
        entry(1, "John Smith", "Quarterly Review", 20, at(10, 0), Priority::High),
        entry(2, "Sarah Johnson", "Initial Consultation", 22, at(14, 30), Priority::Medium),
        entry(3, "Michael Brown", "Portfolio Update", 25, at(11, 0), Priority::Low),
    ]
}

pub fn clients() -> Vec<ClientRecord> {
    let entry = |id: &str, name: &str, email: &str, location: &str, value, last: &str, status| ClientRecord {
        person: person(id, name, email, "+1 (555) 000-0000", location, status),
        portfolio_value: value,
        last_contact: last.to_string(),
    };
    vec![
        entry("client-1", "John Smith", "john.smith@example.com", "New York, NY", 250_000, "2 days ago", RecordStatus::Active),
        entry("client-2", "Sarah Johnson", "sarah.j@example.com", "Boston, MA", 180_000, "1 week ago", RecordStatus::Active),
        entry("client-3", "Michael Brown", "michael.b@example.com", "Chicago, IL", 320_000, "3 days ago", RecordStatus::Pending),
    ]
}

pub fn admin_stats() -> Vec<StatCard> {
    vec![
        StatCard::new("Total Users", "156", "+12", ChangeKind::Increase, StatIcon::Users),
        StatCard::new("Active Advisors", "24", "+3", ChangeKind::Increase, StatIcon::Shield),
        StatCard::new("Total AUM", format_usd_compact(12_400_000), "+8.5%", ChangeKind::Increase, StatIcon::Dollar),
        StatCard::new("Platform Revenue", format_usd_compact(124_000), "+15.2%", ChangeKind::Increase, StatIcon::Card),
    ]
}

pub fn advisors() -> Vec<AdvisorRecord> {
    let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    vec![
        AdvisorRecord {
            person: person(ADVISOR_ID, ADVISOR_NAME, "sarah.smith@example.com", "+1 (555) 123-4567", "New York, NY", RecordStatus::Active),
            experience_years: 8,
            clients: 24,
            aum: 2_400_000,
            rating: 4.8,
            specializations: strings(&["Wealth Management", "Retirement Planning"]),
            education: "MBA in Finance".into(),
            certifications: strings(&["CFA", "CFP"]),
        },
        AdvisorRecord {
            person: person("advisor-2", "Michael Johnson", "michael.j@example.com", "+1 (555) 234-5678", "San Francisco, CA", RecordStatus::Active),
            experience_years: 12,
            clients: 32,
            aum: 3_200_000,
            rating: 4.9,
            specializations: strings(&["Investment Management", "Tax Planning"]),
            education: "MS in Financial Engineering".into(),
            certifications: strings(&["CFA", "CPA"]),
        },
        AdvisorRecord {
            person: person("advisor-3", "Emily Brown", "emily.b@example.com", "+1 (555) 345-6789", "Chicago, IL", RecordStatus::Pending),
            experience_years: 5,
            clients: 18,
            aum: 1_800_000,
            rating: 4.7,
            specializations: strings(&["Estate Planning", "Risk Management"]),
            education: "BS in Finance".into(),
            certifications: strings(&["CFP"]),
        },
    ]
}

pub fn users() -> Vec<UserRecord> {
    let entry = |id: &str, name: &str, email: &str, phone: &str, location: &str, value, advisor: &str, status, login: &str, tier, kyc| UserRecord {
        person: person(id, name, email, phone, location, status),
        portfolio_value: value,
        advisor: Some(advisor.to_string()),
        last_login: login.to_string(),
        tier,
        kyc_status: kyc,
        documents: Vec::new(),
    };
    vec![
        entry("user-2", "John Doe", "john.doe@example.com", "+1 (555) 123-4567", "New York, NY", 250_000, "Sarah Smith", RecordStatus::Active, "2 hours ago", AccountTier::Premium, KycStatus::Verified),
        entry("user-3", "Jane Smith", "jane.smith@example.com", "+1 (555) 234-5678", "San Francisco, CA", 180_000, "Michael Johnson", RecordStatus::Active, "1 day ago", AccountTier::Standard, KycStatus::Pending),
        entry("user-4", "Robert Wilson", "robert.w@example.com", "+1 (555) 345-6789", "Chicago, IL", 320_000, "Emily Brown", RecordStatus::Inactive, "2 weeks ago", AccountTier::Premium, KycStatus::Rejected),
    ]
}

/// The signed-in user as a chat participant.
pub fn current_user() -> Participant {
    Participant::new(USER_ID, profile().name, ChatRole::User)
}

/// The advisor assigned to the signed-in user.
pub fn assigned_advisor() -> Participant {
    Participant::new(ADVISOR_ID, ADVISOR_NAME, ChatRole::Advisor)
}

/// Demo holdings for a freshly connected wallet. No-op if it already has any.
pub fn seed_ledger(book: &mut FinanceBook, owner: &str) {
    if !book.assets(owner).is_empty() {
        return;
    }
    book.add_asset(owner, "cash", 5_000, "Savings account");
    book.add_asset(owner, "stock", 10_000, "AAPL shares");
    book.add_asset(owner, "crypto", 3_000, "XLM holdings");
    book.add_asset(owner, "debt", -2_000, "Credit card");
    book.create_goal(owner, "Emergency Fund", 10_000, 1_735_689_600);
}
