//! Authentication module
//!
//! The reporting API only accepts HTTP Basic credentials of a report user.
//! [`Credentials`] holds them and renders the `Authorization` header the
//! HTTP client attaches to every request.

mod credentials;

pub use credentials::Credentials;

#[cfg(test)]
mod tests;
