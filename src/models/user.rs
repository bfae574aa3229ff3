use serde::{Deserialize, Serialize};

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// User plus the bearer token issued at login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
}

impl SignupRequest {
    /// Field-level checks; returns every problem found, in form order
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();
        if self.first_name.trim().is_empty() {
            problems.push("First name is required".to_string());
        }
        if self.last_name.trim().is_empty() {
            problems.push("Last name is required".to_string());
        }
        if !is_plausible_email(&self.email) {
            problems.push("Invalid email address".to_string());
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            problems.push(format!("Password must be at least {} characters", MIN_PASSWORD_LEN));
        }
        if self.password != self.confirm_password {
            problems.push("Passwords do not match".to_string());
        }
        if problems.is_empty() { Ok(()) } else { Err(problems) }
    }
}

/// `local@domain` with non-empty parts and no whitespace
pub fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SignupRequest {
        SignupRequest {
            email: "jane@example.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Roe".to_string(),
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_short_password_and_mismatch() {
        let mut req = request();
        req.password = "abc".to_string();
        let problems = req.validate().unwrap_err();
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("at least 6"));
        assert!(problems[1].contains("do not match"));
    }

    #[test]
    fn test_email_plausibility() {
        assert!(is_plausible_email("a@b"));
        assert!(!is_plausible_email("ab"));
        assert!(!is_plausible_email("@b"));
        assert!(!is_plausible_email("a@"));
        assert!(!is_plausible_email("a b@c"));
        assert!(!is_plausible_email("a@b@c"));
    }
}
