use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Patient,
    Asha,
    Doctor,
    Admin,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Patient, Role::Asha, Role::Doctor, Role::Admin];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::Asha => "asha",
            Role::Doctor => "doctor",
            Role::Admin => "admin",
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            Role::Patient => "auth.role.patient",
            Role::Asha => "auth.role.asha",
            Role::Doctor => "auth.role.doctor",
            Role::Admin => "auth.role.admin",
        }
    }

    /// Capitalized role id, used for generated demo names ("Asha User")
    pub fn title(self) -> String {
        let id = self.as_str();
        let mut chars = id.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown role '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginMethod {
    #[default]
    Phone,
    Email,
}

impl LoginMethod {
    pub fn label_key(self) -> &'static str {
        match self {
            LoginMethod::Phone => "auth.method.phone",
            LoginMethod::Email => "auth.method.email",
        }
    }
}

/// Row of the mock user database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl UserRecord {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            role,
            phone: None,
            email: None,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn matches(&self, identifier: &str) -> bool {
        self.phone.as_deref() == Some(identifier)
            || self
                .email
                .as_deref()
                .is_some_and(|email| email.eq_ignore_ascii_case(identifier))
    }
}

/// Identity handed to the rest of the app after a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub session_id: Uuid,
    /// Store id when the user came from the mock database
    pub user_id: Option<Uuid>,
    pub name: String,
    pub role: Role,
    pub login_method: LoginMethod,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub authenticated_at: DateTime<Utc>,
}

impl AuthenticatedUser {
    pub fn new(name: impl Into<String>, role: Role, login_method: LoginMethod) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            user_id: None,
            name: name.into(),
            role,
            login_method,
            phone: None,
            email: None,
            authenticated_at: Utc::now(),
        }
    }

    pub fn from_record(record: &UserRecord, login_method: LoginMethod) -> Self {
        Self {
            user_id: Some(record.id),
            phone: record.phone.clone(),
            email: record.email.clone(),
            ..Self::new(record.name.clone(), record.role, login_method)
        }
    }
}
