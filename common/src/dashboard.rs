use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::account::Tone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    Increase,
    Decrease,
    Neutral,
}

impl ChangeKind {
    pub fn tone(self) -> Tone {
        match self {
            ChangeKind::Increase => Tone::Positive,
            ChangeKind::Decrease => Tone::Critical,
            ChangeKind::Neutral => Tone::Muted,
        }
    }
}

/// Which glyph a stat card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatIcon {
    Chart,
    Document,
    Alert,
    Users,
    Portfolio,
    Dollar,
    Star,
    Shield,
    Card,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatCard {
    pub name: String,
    pub value: String,
    pub change: String,
    pub change_kind: ChangeKind,
    pub icon: StatIcon,
}

impl StatCard {
    pub fn new(
        name: &str,
        value: impl Into<String>,
        change: &str,
        change_kind: ChangeKind,
        icon: StatIcon,
    ) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
            change: change.to_string(),
            change_kind,
            icon,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityStatus {
    Completed,
    Pending,
}

impl ActivityStatus {
    pub fn label(self) -> &'static str {
        match self {
            ActivityStatus::Completed => "completed",
            ActivityStatus::Pending => "pending",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            ActivityStatus::Completed => Tone::Positive,
            ActivityStatus::Pending => Tone::Caution,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: u32,
    /// Client the activity concerns; `None` on the user's own feed.
    pub subject: Option<String>,
    pub kind: String,
    pub date: NaiveDate,
    pub status: ActivityStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            Priority::High => Tone::Critical,
            Priority::Medium => Tone::Caution,
            Priority::Low => Tone::Positive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: u32,
    pub client: String,
    pub kind: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub priority: Priority,
}

impl Meeting {
    /// "10:00 AM".
    pub fn time_label(&self) -> String {
        self.time.format("%-I:%M %p").to_string()
    }
}

/// Meetings sorted by date and time, soonest first.
pub fn upcoming(meetings: &[Meeting]) -> Vec<&Meeting> {
    let mut sorted: Vec<&Meeting> = meetings.iter().collect();
    sorted.sort_by_key(|m| (m.date, m.time));
    sorted
}

/// "$250,000".
pub fn format_usd(dollars: u64) -> String {
    let digits = dollars.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// "$2.4M", "$124K", "$950".
pub fn format_usd_compact(dollars: u64) -> String {
    const MILLION: u64 = 1_000_000;
    const THOUSAND: u64 = 1_000;
    if dollars >= MILLION {
        let tenths = (dollars + MILLION / 20) / (MILLION / 10);
        format_tenths(tenths, "M")
    } else if dollars >= THOUSAND {
        format!("${}K", (dollars + THOUSAND / 2) / THOUSAND)
    } else {
        format!("${dollars}")
    }
}

fn format_tenths(tenths: u64, suffix: &str) -> String {
    if tenths % 10 == 0 {
        format!("${}{suffix}", tenths / 10)
    } else {
        format!("${}.{}{suffix}", tenths / 10, tenths % 10)
    }
}
