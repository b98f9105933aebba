use serde::{Deserialize, Serialize};

/// The signed-in person's contact card on the Profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub company: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum ProfileError {
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// Editable copy of a profile. `validate` only checks required fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub company: String,
}

impl ProfileDraft {
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            address: profile.address.clone(),
            company: profile.company.clone(),
        }
    }

    /// Produce the updated profile, keeping the avatar from `base`.
    pub fn validate(&self, base: &Profile) -> Result<Profile, ProfileError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ProfileError::MissingField("name"));
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(ProfileError::MissingField("email"));
        }
        Ok(Profile {
            name: name.to_string(),
            email: email.to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            company: self.company.trim().to_string(),
            avatar_url: base.avatar_url.clone(),
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfileVisibility {
    #[default]
    Public,
    Private,
    ContactsOnly,
}

impl ProfileVisibility {
    pub fn all() -> &'static [ProfileVisibility] {
        &[
            ProfileVisibility::Public,
            ProfileVisibility::Private,
            ProfileVisibility::ContactsOnly,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            ProfileVisibility::Public => "Public",
            ProfileVisibility::Private => "Private",
            ProfileVisibility::ContactsOnly => "Contacts Only",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::all().iter().copied().find(|v| v.label() == label)
    }
}

/// Settings page toggles. Held in memory for the session only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub email_notifications: bool,
    pub dark_mode: bool,
    pub visibility: ProfileVisibility,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            email_notifications: true,
            dark_mode: false,
            visibility: ProfileVisibility::Public,
        }
    }
}
