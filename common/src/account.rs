use serde::{Deserialize, Serialize};

use crate::passport::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Advisor,
    Admin,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KycStatus {
    #[default]
    Pending,
    Verified,
    Rejected,
}

impl KycStatus {
    pub fn label(self) -> &'static str {
        match self {
            KycStatus::Pending => "pending",
            KycStatus::Verified => "verified",
            KycStatus::Rejected => "rejected",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            KycStatus::Pending => Tone::Caution,
            KycStatus::Verified => Tone::Positive,
            KycStatus::Rejected => Tone::Critical,
        }
    }
}

/// Lifecycle of a platform record as shown in the admin and advisor lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    #[default]
    Active,
    Pending,
    Inactive,
}

impl RecordStatus {
    pub fn label(self) -> &'static str {
        match self {
            RecordStatus::Active => "active",
            RecordStatus::Pending => "pending",
            RecordStatus::Inactive => "inactive",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            RecordStatus::Active => Tone::Positive,
            RecordStatus::Pending => Tone::Caution,
            RecordStatus::Inactive => Tone::Muted,
        }
    }
}

/// Colour family for a status badge. Views map this to their own classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Caution,
    Critical,
    Muted,
}

/// Fields every role shares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub status: RecordStatus,
}

impl Person {
    /// "Sarah Smith" → "SS". At most two letters.
    pub fn initials(&self) -> String {
        initials(&self.name)
    }
}

pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|w| w.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountTier {
    #[default]
    Standard,
    Premium,
}

impl AccountTier {
    pub fn label(self) -> &'static str {
        match self {
            AccountTier::Standard => "Standard",
            AccountTier::Premium => "Premium",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub person: Person,
    /// Whole dollars.
    pub portfolio_value: u64,
    pub advisor: Option<String>,
    pub last_login: String,
    pub tier: AccountTier,
    pub kyc_status: KycStatus,
    pub documents: Vec<Document>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorRecord {
    pub person: Person,
    pub experience_years: u32,
    pub clients: u32,
    /// Assets under management, whole dollars.
    pub aum: u64,
    pub rating: f32,
    pub specializations: Vec<String>,
    pub education: String,
    pub certifications: Vec<String>,
}

/// An advisor's view of one of their users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub person: Person,
    pub portfolio_value: u64,
    pub last_contact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Account {
    User(UserRecord),
    Advisor(AdvisorRecord),
    Client(ClientRecord),
    Admin(Person),
}

impl Account {
    pub fn person(&self) -> &Person {
        match self {
            Account::User(u) => &u.person,
            Account::Advisor(a) => &a.person,
            Account::Client(c) => &c.person,
            Account::Admin(p) => p,
        }
    }

    /// Clients are users seen from the advisor side.
    pub fn role(&self) -> Role {
        match self {
            Account::User(_) | Account::Client(_) => Role::User,
            Account::Advisor(_) => Role::Advisor,
            Account::Admin(_) => Role::Admin,
        }
    }

    pub fn status(&self) -> RecordStatus {
        self.person().status
    }
}

/// The filter buttons above each list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Pending,
}

impl StatusFilter {
    pub fn all() -> &'static [StatusFilter] {
        &[StatusFilter::All, StatusFilter::Active, StatusFilter::Pending]
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Active => "Active",
            StatusFilter::Pending => "Pending",
        }
    }

    pub fn admits(self, status: RecordStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => status == RecordStatus::Active,
            StatusFilter::Pending => status == RecordStatus::Pending,
        }
    }
}

/// Case-insensitive substring match on name, email or location.
pub fn matches_query(person: &Person, query: &str) -> bool {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return true;
    }
    [&person.name, &person.email, &person.location]
        .iter()
        .any(|field| field.to_lowercase().contains(&q))
}

/// Apply search box and status filter, keeping input order.
pub fn filter_people<'a, T>(
    records: &'a [T],
    person_of: impl Fn(&T) -> &Person,
    query: &str,
    filter: StatusFilter,
) -> Vec<&'a T> {
    records
        .iter()
        .filter(|r| {
            let p = person_of(*r);
            filter.admits(p.status) && matches_query(p, query)
        })
        .collect()
}

pub fn filter_accounts<'a>(
    records: &'a [Account],
    query: &str,
    filter: StatusFilter,
) -> Vec<&'a Account> {
    filter_people(records, Account::person, query, filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(name: &str, email: &str, location: &str, status: RecordStatus) -> Person {
        Person {
            id: name.to_lowercase().replace(' ', "-"),
            name: name.into(),
            email: email.into(),
            phone: "+1 (555) 000-0000".into(),
            location: location.into(),
            status,
        }
    }

    fn accounts() -> Vec<Account> {
        vec![
            Account::Admin(person("Ada Admin", "ada@example.com", "Boston, MA", RecordStatus::Active)),
            Account::Client(ClientRecord {
                person: person("John Smith", "john@example.com", "New York, NY", RecordStatus::Active),
                portfolio_value: 250_000,
                last_contact: "2 days ago".into(),
            }),
            Account::Client(ClientRecord {
                person: person("Michael Brown", "mb@example.com", "Chicago, IL", RecordStatus::Pending),
                portfolio_value: 320_000,
                last_contact: "3 days ago".into(),
            }),
        ]
    }

    #[test]
    fn initials_take_first_two_words() {
        assert_eq!(initials("Sarah Smith"), "SS");
        assert_eq!(initials("mary ann de vries"), "MA");
        assert_eq!(initials("Cher"), "C");
        assert_eq!(initials("   "), "");
    }

    #[test]
    fn status_filter_narrows_list() {
        let all = accounts();
        assert_eq!(filter_accounts(&all, "", StatusFilter::All).len(), 3);
        assert_eq!(filter_accounts(&all, "", StatusFilter::Active).len(), 2);
        let pending = filter_accounts(&all, "", StatusFilter::Pending);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].person().name, "Michael Brown");
    }

    #[test]
    fn query_matches_any_field_ignoring_case() {
        let all = accounts();
        assert_eq!(filter_accounts(&all, "SMITH", StatusFilter::All).len(), 1);
        assert_eq!(filter_accounts(&all, "chicago", StatusFilter::All).len(), 1);
        assert_eq!(filter_accounts(&all, "example.com", StatusFilter::Active).len(), 2);
        assert!(filter_accounts(&all, "nobody", StatusFilter::All).is_empty());
    }

    #[test]
    fn clients_report_user_role() {
        let all = accounts();
        assert_eq!(all[0].role(), Role::Admin);
        assert_eq!(all[1].role(), Role::User);
    }

    #[test]
    fn account_serializes_with_role_tag() {
        let json = serde_json::to_value(&accounts()[0]).unwrap();
        assert_eq!(json["role"], "admin");
        assert_eq!(json["status"], "active");
    }
}
