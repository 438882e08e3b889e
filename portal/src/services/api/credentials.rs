//! # Session Credentials
//!
//! The backend sets the access/refresh pair as cookies on login and renewal.
//! [`CredentialJar`] is the cookie store behind the HTTP client, so every request
//! carries whatever the backend last set and application code never handles a
//! token directly.

use parking_lot::RwLock;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::HeaderValue;
use reqwest::Url;

#[derive(Default)]
pub struct CredentialJar {
    jar: RwLock<Jar>,
}

impl CredentialJar {
    /// Drop every stored credential (logout).
    pub fn clear(&self) {
        *self.jar.write() = Jar::default();
        tracing::debug!("Session credentials cleared");
    }

    /// Whether any credential would be sent to `url`.
    pub fn has_credentials(&self, url: &Url) -> bool {
        self.jar.read().cookies(url).is_some()
    }

    /// Seed a credential, e.g. restored from a previous run.
    pub fn add_cookie_str(&self, cookie: &str, url: &Url) {
        self.jar.read().add_cookie_str(cookie, url);
    }
}

impl CookieStore for CredentialJar {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        self.jar.read().set_cookies(cookie_headers, url);
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        self.jar.read().cookies(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_drops_credentials() {
        let jar = CredentialJar::default();
        let url = Url::parse("https://api.example.com/wallet-info/").unwrap();

        jar.add_cookie_str("access_token=abc; Path=/", &url);
        assert!(jar.has_credentials(&url));
        assert_eq!(
            jar.cookies(&url).unwrap().to_str().unwrap(),
            "access_token=abc"
        );

        jar.clear();
        assert!(!jar.has_credentials(&url));
    }

    #[test]
    fn test_set_cookies_from_response_headers() {
        let jar = CredentialJar::default();
        let url = Url::parse("https://api.example.com/log-in/").unwrap();
        let headers = [
            HeaderValue::from_static("access_token=a1; Path=/"),
            HeaderValue::from_static("refresh_token=r1; Path=/"),
        ];

        jar.set_cookies(&mut headers.iter(), &url);

        let sent = jar
            .cookies(&Url::parse("https://api.example.com/exchange/").unwrap())
            .unwrap();
        let sent = sent.to_str().unwrap();
        assert!(sent.contains("access_token=a1"));
        assert!(sent.contains("refresh_token=r1"));
    }
}
