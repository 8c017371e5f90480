//! Demo e-mail/password table
//!
//! Accounts come from an embedded YAML document. Passwords are replaced by
//! argon2 hashes as soon as the table is loaded.

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

use crate::{error::*, models::Role};

const EMBEDDED_ACCOUNTS: &str = include_str!("../resources/demo_accounts.yaml");

/// Decides whether an e-mail/password pair is valid for a role
pub trait CredentialPolicy: Send + Sync {
    /// Display name of the matching account
    fn verify(&self, role: Role, email: &str, password: &str) -> Result<Option<String>>;

    /// Display name for an admin who logged in by phone
    fn admin_phone_name(&self) -> String;
}

#[derive(Deserialize)]
struct AccountsDocument {
    #[serde(default)]
    accounts: HashMap<Role, Vec<AccountEntry>>,
    admin: AdminEntry,
}

#[derive(Deserialize)]
struct AccountEntry {
    email: String,
    password: String,
    name: String,
}

#[derive(Deserialize)]
struct AdminEntry {
    phone_name: String,
    emails: Vec<AdminEmail>,
    passwords: Vec<String>,
}

#[derive(Deserialize)]
struct AdminEmail {
    email: String,
    name: String,
}

struct HashedAccount {
    email: String,
    name: String,
    password_hash: String,
}

pub struct DemoCredentialPolicy {
    argon2: Argon2<'static>,
    accounts: HashMap<Role, Vec<HashedAccount>>,
    admin_emails: Vec<AdminEmail>,
    admin_password_hashes: Vec<String>,
    admin_phone_name: String,
}

impl DemoCredentialPolicy {
    pub fn embedded() -> Result<Self> {
        Self::from_yaml(EMBEDDED_ACCOUNTS)
    }

    pub fn from_yaml(document: &str) -> Result<Self> {
        let parsed: AccountsDocument = serde_yaml::from_str(document)
            .map_err(|e| IdentityError::Config(format!("demo accounts: {}", e)))?;

        // Lowest argon2 cost the crate allows
        let params = Params::new(Params::MIN_M_COST, Params::MIN_T_COST, Params::MIN_P_COST, None)
            .map_err(|e| IdentityError::Hashing(e.to_string()))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let mut accounts = HashMap::new();
        for (role, entries) in parsed.accounts {
            let hashed = entries
                .into_iter()
                .map(|entry| {
                    Ok(HashedAccount {
                        password_hash: hash_password(&argon2, &entry.password)?,
                        email: entry.email,
                        name: entry.name,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            accounts.insert(role, hashed);
        }

        let admin_password_hashes = parsed
            .admin
            .passwords
            .iter()
            .map(|password| hash_password(&argon2, password))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            roles = accounts.len(),
            admin_emails = parsed.admin.emails.len(),
            "Loaded demo accounts"
        );

        Ok(Self {
            argon2,
            accounts,
            admin_emails: parsed.admin.emails,
            admin_password_hashes,
            admin_phone_name: parsed.admin.phone_name,
        })
    }

    fn password_matches(&self, password: &str, hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(hash)?;
        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

fn hash_password(argon2: &Argon2<'_>, password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(argon2.hash_password(password.as_bytes(), &salt)?.to_string())
}

impl CredentialPolicy for DemoCredentialPolicy {
    fn verify(&self, role: Role, email: &str, password: &str) -> Result<Option<String>> {
        let email = email.trim();

        if role == Role::Admin {
            let Some(admin) = self
                .admin_emails
                .iter()
                .find(|admin| admin.email.eq_ignore_ascii_case(email))
            else {
                return Ok(None);
            };
            for hash in &self.admin_password_hashes {
                if self.password_matches(password, hash)? {
                    return Ok(Some(admin.name.clone()));
                }
            }
            return Ok(None);
        }

        let Some(account) = self
            .accounts
            .get(&role)
            .and_then(|entries| entries.iter().find(|a| a.email.eq_ignore_ascii_case(email)))
        else {
            return Ok(None);
        };

        if self.password_matches(password, &account.password_hash)? {
            Ok(Some(account.name.clone()))
        } else {
            Ok(None)
        }
    }

    fn admin_phone_name(&self) -> String {
        self.admin_phone_name.clone()
    }
}
