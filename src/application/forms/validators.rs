//! Field rules evaluated before a form may reach the network.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Field-level messages collected while validating a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.errors
            .iter()
            .filter(move |error| error.field == field)
            .map(|error| error.message.as_str())
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|error| error.field == field)
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    /// Required, non-blank text. Returns whether the value was present.
    pub fn required(&mut self, field: &'static str, value: &str) -> bool {
        if value.trim().is_empty() {
            self.push(field, "This field is required");
            return false;
        }
        true
    }

    pub fn required_min_len(&mut self, field: &'static str, value: &str, min: usize) {
        if self.required(field, value) && value.trim().chars().count() < min {
            self.push(field, format!("Must be at least {min} characters"));
        }
    }

    pub fn email(&mut self, field: &'static str, value: &str) {
        if self.required(field, value) && !looks_like_email(value.trim()) {
            self.push(field, "Enter a valid email address");
        }
    }

    pub fn digits(&mut self, field: &'static str, value: &str, len: usize) {
        let value = value.trim();
        if value.chars().count() != len || !value.chars().all(|ch| ch.is_ascii_digit()) {
            self.push(field, format!("Enter the {len}-digit code"));
        }
    }

    pub fn matches(&mut self, field: &'static str, value: &str, expected: &str) {
        if value != expected {
            self.push(field, "Passwords do not match");
        }
    }

    pub fn positive(&mut self, field: &'static str, value: f64) {
        if !value.is_finite() || value <= 0.0 {
            self.push(field, "Must be greater than zero");
        }
    }

    pub fn non_negative_count(&mut self, field: &'static str, value: i64) {
        if value < 0 || u32::try_from(value).is_err() {
            self.push(field, "Must be zero or more");
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.errors.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_blank_text() {
        let mut errors = ValidationErrors::new();
        errors.required("title", "   ");
        assert!(errors.has_field("title"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn min_len_only_applies_to_present_values() {
        let mut errors = ValidationErrors::new();
        errors.required_min_len("title", "", 3);
        errors.required_min_len("summary", "ab", 3);
        errors.required_min_len("ok", "abc", 3);
        assert_eq!(errors.for_field("title").count(), 1);
        assert_eq!(
            errors.for_field("summary").collect::<Vec<_>>(),
            vec!["Must be at least 3 characters"]
        );
        assert!(!errors.has_field("ok"));
    }

    #[test]
    fn email_shape() {
        for good in ["admin@gratiswag.com", "a.b@c.co"] {
            assert!(looks_like_email(good), "{good}");
        }
        for bad in ["admin", "@x.com", "a@b", "a@@b.com", "a b@c.com", "a@b."] {
            assert!(!looks_like_email(bad), "{bad}");
        }
    }

    #[test]
    fn otp_requires_exact_digits() {
        let mut errors = ValidationErrors::new();
        errors.digits("otp", "12345", 6);
        errors.digits("otp", "12345a", 6);
        assert_eq!(errors.len(), 2);

        let mut ok = ValidationErrors::new();
        ok.digits("otp", "123456", 6);
        assert!(ok.into_result().is_ok());
    }

    #[test]
    fn display_joins_messages() {
        let mut errors = ValidationErrors::new();
        errors.push("a", "one");
        errors.push("b", "two");
        assert_eq!(errors.to_string(), "a: one; b: two");
    }
}
