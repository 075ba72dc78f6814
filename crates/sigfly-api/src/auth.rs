use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Basic-auth credentials for the Sigfox backend.
///
/// Login and password are fixed for the lifetime of the client and sent
/// on every request. The password is held as a [`SecretString`] so it
/// never leaks through `Debug` output.
#[derive(Debug, Clone)]
pub struct Credentials {
    login: String,
    password: SecretString,
}

impl Credentials {
    /// Validate and store a login/password pair.
    ///
    /// Fails with [`Error::Configuration`] when either side is empty --
    /// blank credentials would only produce a confusing 401 later.
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Result<Self, Error> {
        let login = login.into();
        let password: SecretString = password.into().into();
        if login.is_empty() || password.expose_secret().is_empty() {
            return Err(Error::Configuration {
                message: "login and password must both be non-empty".into(),
            });
        }
        Ok(Self { login, password })
    }

    /// The API login (basic-auth username).
    pub fn login(&self) -> &str {
        &self.login
    }

    /// Expose the password for the basic-auth header.
    pub(crate) fn password(&self) -> &str {
        self.password.expose_secret()
    }
}
