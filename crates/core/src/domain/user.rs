// User Entity

use crate::error::{Error, Result};

const MIN_PASSWORD_LEN: usize = 8;

/// A registered author. `password` holds the salted digest once the
/// use case has run it through the hasher; it is never serialized out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub reputation: i64,
}

impl User {
    /// Build a new user, rejecting the first violated invariant.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        reputation: i64,
    ) -> Result<Self> {
        let user = Self {
            id: 0,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            password: password.into(),
            reputation,
        };
        user.validate()?;
        user.validate_password()?;
        Ok(user)
    }

    /// Apply a profile patch. Empty fields keep their current value.
    pub fn update_info(
        &mut self,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> Result<()> {
        if !first_name.is_empty() {
            self.first_name = first_name.to_owned();
        }
        if !last_name.is_empty() {
            self.last_name = last_name.to_owned();
        }
        if !email.is_empty() {
            self.email = email.to_owned();
        }
        self.validate()
    }

    /// Accept a new raw password. The caller hashes it afterwards.
    pub fn change_password(&mut self, password: &str) -> Result<()> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(Error::validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        self.password = password.to_owned();
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.first_name.trim().is_empty() {
            return Err(Error::validation("firstname must not be empty"));
        }
        if self.last_name.trim().is_empty() {
            return Err(Error::validation("lastname must not be empty"));
        }
        if !is_plausible_email(&self.email) {
            return Err(Error::validation(format!(
                "\"{}\" is not a valid email address",
                self.email
            )));
        }
        Ok(())
    }

    fn validate_password(&self) -> Result<()> {
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(Error::validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(())
    }
}

/// Structural email check; deliverability is not this layer's concern.
fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn valid_user() -> User {
        User::new("Ada", "Lovelace", "ada@example.org", "difference-engine", 0).unwrap()
    }

    #[test]
    fn new_accepts_a_valid_user() {
        let user = valid_user();
        assert_eq!(user.email, "ada@example.org");
        assert_eq!(user.id, 0);
    }

    #[test]
    fn first_violated_invariant_wins() {
        // Both name and email are bad; the name violation is reported.
        let err = User::new("", "Lovelace", "not-an-email", "difference-engine", 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.message().contains("firstname"));
    }

    #[test]
    fn rejects_malformed_email() {
        for email in ["plain", "@host.org", "a@nodot", "a@.org"] {
            let err = User::new("Ada", "Lovelace", email, "difference-engine", 0).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation, "email: {email}");
        }
    }

    #[test]
    fn rejects_short_password() {
        let err = User::new("Ada", "Lovelace", "ada@example.org", "short", 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.message().contains("password"));
    }

    #[test]
    fn update_info_keeps_fields_for_empty_patch_values() {
        let mut user = valid_user();
        user.update_info("", "", "ada@newhost.org").unwrap();
        assert_eq!(user.first_name, "Ada");
        assert_eq!(user.email, "ada@newhost.org");
    }

    #[test]
    fn update_info_revalidates() {
        let mut user = valid_user();
        let err = user.update_info("", "", "broken").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn change_password_enforces_minimum_length() {
        let mut user = valid_user();
        assert_eq!(
            user.change_password("1234567").unwrap_err().kind(),
            ErrorKind::Validation
        );
        user.change_password("12345678").unwrap();
        assert_eq!(user.password, "12345678");
    }
}
