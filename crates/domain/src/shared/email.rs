use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

/// An email address that has passed a structural check. Delivery problems
/// still surface at send time, this only keeps obviously broken addresses
/// out of the records.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Email(String);

#[derive(Error, Debug)]
pub enum InvalidEmailError {
    #[error("Email address is malformed: {0}")]
    Malformed(String),
}

impl Email {
    pub fn new(email: String) -> Result<Self, InvalidEmailError> {
        let email = email.trim().to_string();
        if !Self::is_valid(&email) {
            return Err(InvalidEmailError::Malformed(email));
        }
        Ok(Self(email))
    }

    fn is_valid(email: &str) -> bool {
        let parts = email.split('@').collect::<Vec<_>>();
        if parts.len() != 2 {
            return false;
        }
        let (local, domain) = (parts[0], parts[1]);
        !local.is_empty()
            && !domain.is_empty()
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
            && !email.contains(char::is_whitespace)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn accepts_plausible_addresses() {
        assert!(Email::new("kari@salon.no".into()).is_ok());
        assert!(Email::new("  post@nord-frisor.example.com ".into()).is_ok());
        assert!(Email::new("a.b+c@d.e".into()).is_ok());
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(Email::new("".into()).is_err());
        assert!(Email::new("no-at-sign".into()).is_err());
        assert!(Email::new("@salon.no".into()).is_err());
        assert!(Email::new("kari@".into()).is_err());
        assert!(Email::new("kari@localhost".into()).is_err());
        assert!(Email::new("kari@.no".into()).is_err());
        assert!(Email::new("kari hansen@salon.no".into()).is_err());
    }
}
