use std::collections::HashMap;

use crate::dns::Credentials;
use crate::error::{Error, Result};

pub const DEFAULT_TOKEN_PREFIX: &str = "CLOUDFLARE_TOKEN_";

/// Somewhere to look up credential variables by name.
pub trait CredentialSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvSource;

impl CredentialSource for EnvSource {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl CredentialSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Load a `.env` file from the working directory into the environment.
///
/// A missing file is fine; a file that exists but cannot be parsed is only
/// reported, since the variables may already be set by the caller.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
    }
}

/// Environment key holding the token for `domain`.
///
/// `my-site.example.com` with the default prefix becomes
/// `CLOUDFLARE_TOKEN_MY_SITE_EXAMPLE_COM`.
pub fn token_env_key(prefix: &str, domain: &str) -> String {
    let suffix: String = domain
        .chars()
        .map(|c| match c {
            '.' | '-' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect();

    format!("{}{}", prefix, suffix)
}

pub fn load_credentials(
    domain: &str,
    prefix: &str,
    source: &dyn CredentialSource,
) -> Result<Credentials> {
    let key = token_env_key(prefix, domain);

    let token = source
        .var(&key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            Error::configuration(format!(
                "API token not found for domain {} (set {})",
                domain, key
            ))
        })?;

    tracing::debug!("Using API token from {}", key);

    Ok(Credentials { api_token: token })
}
