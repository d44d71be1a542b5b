//! Credentials and the per-client session token store.

use std::{fmt, sync::RwLock};

#[derive(Clone, Default, Eq, PartialEq)]
pub struct SecretString(String);

impl SecretString {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Email/password pair exchanged for a session token by `POST /sessions`.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::new(password),
        }
    }

    pub(crate) fn form_pairs(&self) -> [(&'static str, String); 2] {
        [
            ("email", self.email.clone()),
            ("password", self.password.expose().to_owned()),
        ]
    }
}

/// Holds at most one session token for a client and all of its clones.
#[derive(Default)]
pub(crate) struct SessionToken {
    token: RwLock<Option<SecretString>>,
}

impl SessionToken {
    pub(crate) fn get(&self) -> Option<SecretString> {
        match self.token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub(crate) fn is_set(&self) -> bool {
        match self.token.read() {
            Ok(guard) => guard.is_some(),
            Err(poisoned) => poisoned.into_inner().is_some(),
        }
    }

    pub(crate) fn set(&self, token: Option<SecretString>) {
        #[cfg(feature = "tracing")]
        {
            if token.is_some() {
                tracing::debug!("storing session token");
            } else {
                tracing::debug!("clearing session token");
            }
        }

        let mut guard = match self.token.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = token;
    }

    pub(crate) fn clear(&self) {
        self.set(None);
    }
}

/// Name of the parameter carrying the session token on every call.
pub(crate) const TOKEN_PARAM: &str = "token";

/// Parameters whose values never appear in debug output.
pub(crate) const SECRET_PARAMS: [&str; 2] = [TOKEN_PARAM, "password"];

pub(crate) fn is_secret_param(key: &str) -> bool {
    SECRET_PARAMS.contains(&key)
}

/// Replace any caller-supplied `token` parameter with the stored one.
///
/// With no stored token the parameter is left out entirely.
pub(crate) fn inject_token(
    params: &[(String, String)],
    token: Option<&SecretString>,
) -> Vec<(String, String)> {
    let mut out: Vec<(String, String)> = params
        .iter()
        .filter(|(key, _)| key != TOKEN_PARAM)
        .cloned()
        .collect();
    if let Some(token) = token {
        out.push((TOKEN_PARAM.to_owned(), token.expose().to_owned()));
    }
    out
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionToken")
            .field("authenticated", &self.is_set())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_string_never_prints_value() {
        let secret = SecretString::new("abc123");
        assert_eq!(format!("{secret}"), "<redacted>");
        assert_eq!(format!("{secret:?}"), "<redacted>");
        assert_eq!(secret.expose(), "abc123");
    }

    #[test]
    fn credentials_debug_hides_password() {
        let creds = Credentials::new("seller@example.com", "hunter2");
        let debug = format!("{creds:?}");
        assert!(debug.contains("seller@example.com"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn inject_token_appends_stored_token_last() {
        let params = vec![
            ("name".to_owned(), "Widget".to_owned()),
            ("token".to_owned(), "stale".to_owned()),
            ("price".to_owned(), "500".to_owned()),
        ];
        let token = SecretString::new("fresh");
        let out = inject_token(&params, Some(&token));
        assert_eq!(
            out,
            vec![
                ("name".to_owned(), "Widget".to_owned()),
                ("price".to_owned(), "500".to_owned()),
                ("token".to_owned(), "fresh".to_owned()),
            ]
        );
    }

    #[test]
    fn inject_token_omits_parameter_without_session() {
        let params = vec![("token".to_owned(), "stale".to_owned())];
        assert!(inject_token(&params, None).is_empty());
    }

    #[test]
    fn session_token_overwrites_and_clears() {
        let store = SessionToken::default();
        assert!(!store.is_set());

        store.set(Some(SecretString::new("first")));
        store.set(Some(SecretString::new("second")));
        assert_eq!(store.get().as_ref().map(SecretString::expose), Some("second"));

        store.clear();
        assert!(store.get().is_none());
    }
}
