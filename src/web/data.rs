//! Most of the structs in the `web` module and their implementations live here.
//! Includes structs that need to be validated, their parsing implementations and tests for those

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;
use validator::ValidateEmail;

// ###################################
// ->   STRUCTS
// ###################################
/// A stored signup record, exactly as it is returned to clients.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Signup {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Deserializable Signup request.
/// Can be Deserialized but can have invalid fields.
#[derive(Debug, Deserialize)]
pub struct DeserSignup {
    pub name: String,
    pub email: String,
}

impl DeserSignup {
    pub fn new(name: String, email: String) -> Self {
        Self { name, email }
    }
}

/// A signup request with all the fields validated.
#[derive(Debug, Clone)]
pub struct ValidSignup {
    pub email: ValidEmail,
    pub name: ValidName,
}

impl TryFrom<DeserSignup> for ValidSignup {
    type Error = DataParsingError;

    fn try_from(deser_signup: DeserSignup) -> Result<Self, Self::Error> {
        Ok(ValidSignup {
            email: ValidEmail::parse(deser_signup.email)?,
            name: ValidName::parse(deser_signup.name)?,
        })
    }
}

/// Validated email address
#[derive(Debug, Clone)]
pub struct ValidEmail(String);

impl AsRef<str> for ValidEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl ValidEmail {
    pub fn parse<S>(value: S) -> Result<Self, DataParsingError>
    where
        S: AsRef<str>,
    {
        let value = value.as_ref();

        if value.graphemes(true).count() > 256 {
            return Err(DataParsingError::EmailTooLong);
        }

        if value.validate_email() {
            Ok(ValidEmail(value.to_owned()))
        } else {
            Err(DataParsingError::EmailInvalid)
        }
    }
}

/// Validated signup name.
/// Free text, the only requirement is that it isn't empty.
#[derive(Debug, Clone)]
pub struct ValidName(String);

impl AsRef<str> for ValidName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl ValidName {
    pub fn parse<S>(value: S) -> Result<Self, DataParsingError>
    where
        S: AsRef<str>,
    {
        let value = value.as_ref();

        if value.trim().is_empty() {
            return Err(DataParsingError::SignupNameEmpty);
        }

        Ok(ValidName(value.to_owned()))
    }
}

/// Query parameters of the signup listing endpoint.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug, Serialize, thiserror::Error)]
pub enum DataParsingError {
    #[error("name must not be empty")]
    SignupNameEmpty,

    #[error("email is not a valid email address")]
    EmailInvalid,
    #[error("email is too long")]
    EmailTooLong,
}
