//! Basic authentication credentials

use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::HeaderValue;
use reqwest::RequestBuilder;

/// Report user credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Create credentials for a report user
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// `Basic <base64(user:password)>`
    pub fn header_value(&self) -> Result<HeaderValue> {
        let token = STANDARD.encode(format!("{}:{}", self.username, self.password));
        let mut value = HeaderValue::from_str(&format!("Basic {token}"))
            .map_err(|e| Error::invalid_value("user_password", e.to_string()))?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Attach the credentials to a request
    pub fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        Ok(req.header(reqwest::header::AUTHORIZATION, self.header_value()?))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}
