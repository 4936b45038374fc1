//! Job identity generation and validation
//!
//! A job identity is the Kubernetes resource name of one bot. It is built from
//! a fixed prefix and a random UUID, and must always be a valid DNS-1123 label.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Prefix used when none is configured
pub const DEFAULT_JOB_PREFIX: &str = "bot-job-";

/// Maximum length of a DNS-1123 label (also the limit for the `job-name` label)
pub const MAX_NAME_LEN: usize = 63;

/// Length of a hyphenated UUID
const TOKEN_LEN: usize = 36;

/// Unique name of a bot job within the namespace
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JobIdentity(String);

/// Rejected job name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("job name is empty")]
    Empty,

    #[error("job name is longer than 63 characters")]
    TooLong,

    #[error("job name contains invalid character {0:?}")]
    InvalidCharacter(char),

    #[error("job name must start and end with a lowercase letter or digit")]
    InvalidBoundary,
}

impl JobIdentity {
    /// Generates a fresh identity: sanitized prefix followed by a UUIDv4
    pub fn generate(prefix: &str) -> Self {
        let prefix = sanitize_prefix(prefix);
        JobIdentity(format!("{}{}", prefix, Uuid::new_v4().hyphenated()))
    }

    /// Validates an externally supplied job name
    pub fn parse(name: &str) -> Result<Self, IdentityError> {
        validate_name(name)?;
        Ok(JobIdentity(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for JobIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for JobIdentity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for JobIdentity {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_name(&value)?;
        Ok(JobIdentity(value))
    }
}

impl From<JobIdentity> for String {
    fn from(identity: JobIdentity) -> Self {
        identity.0
    }
}

/// Lowercases, replaces anything outside `[a-z0-9-]` with `-`, strips leading
/// hyphens and truncates so the full name stays within [`MAX_NAME_LEN`].
fn sanitize_prefix(prefix: &str) -> String {
    let cleaned: String = prefix
        .chars()
        .map(|c| c.to_ascii_lowercase())
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
                c
            } else {
                '-'
            }
        })
        .skip_while(|c| *c == '-')
        .take(MAX_NAME_LEN - TOKEN_LEN)
        .collect();

    if cleaned.is_empty() {
        DEFAULT_JOB_PREFIX.to_string()
    } else {
        cleaned
    }
}

fn validate_name(name: &str) -> Result<(), IdentityError> {
    if name.is_empty() {
        return Err(IdentityError::Empty);
    }
    if name.len() > MAX_NAME_LEN {
        return Err(IdentityError::TooLong);
    }
    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
    {
        return Err(IdentityError::InvalidCharacter(bad));
    }
    if name.starts_with('-') || name.ends_with('-') {
        return Err(IdentityError::InvalidBoundary);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_uses_prefix() {
        let id = JobIdentity::generate(DEFAULT_JOB_PREFIX);
        assert!(id.as_str().starts_with("bot-job-"));
        assert_eq!(id.as_str().len(), DEFAULT_JOB_PREFIX.len() + TOKEN_LEN);
        assert!(JobIdentity::parse(id.as_str()).is_ok());
    }

    #[test]
    fn test_generate_is_unique() {
        let ids: HashSet<JobIdentity> = (0..5000)
            .map(|_| JobIdentity::generate(DEFAULT_JOB_PREFIX))
            .collect();
        assert_eq!(ids.len(), 5000);
    }

    #[test]
    fn test_generate_sanitizes_prefix() {
        let id = JobIdentity::generate("--My_Bot.Job/");
        assert!(id.as_str().starts_with("my-bot-job-"));
        assert!(JobIdentity::parse(id.as_str()).is_ok());

        let id = JobIdentity::generate("???");
        assert!(id.as_str().starts_with(DEFAULT_JOB_PREFIX));
        assert!(JobIdentity::parse(id.as_str()).is_ok());
    }

    #[test]
    fn test_generate_truncates_long_prefix() {
        let id = JobIdentity::generate(&"a".repeat(100));
        assert_eq!(id.as_str().len(), MAX_NAME_LEN);
        assert!(JobIdentity::parse(id.as_str()).is_ok());
    }

    #[test]
    fn test_parse_rejects_invalid_names() {
        assert_eq!(JobIdentity::parse(""), Err(IdentityError::Empty));
        assert_eq!(
            JobIdentity::parse(&"a".repeat(64)),
            Err(IdentityError::TooLong)
        );
        assert_eq!(
            JobIdentity::parse("Bot-Job"),
            Err(IdentityError::InvalidCharacter('B'))
        );
        assert_eq!(
            JobIdentity::parse("bot_job"),
            Err(IdentityError::InvalidCharacter('_'))
        );
        assert_eq!(
            JobIdentity::parse("bot-job-"),
            Err(IdentityError::InvalidBoundary)
        );
    }

    #[test]
    fn test_serde_validates() {
        let id: JobIdentity = serde_json::from_str("\"bot-job-1\"").unwrap();
        assert_eq!(id.as_str(), "bot-job-1");
        assert!(serde_json::from_str::<JobIdentity>("\"BAD NAME\"").is_err());
    }
}
