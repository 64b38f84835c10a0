use std::sync::LazyLock;

use regex::Regex;

static DOMAIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A([a-zA-Z0-9-]+\.)+[a-zA-Z]{2,}\z").expect("domain pattern is valid")
});

/// Loose syntactic check on a zone name such as `example.com`.
pub fn validate_domain(domain: &str) -> bool {
    DOMAIN_PATTERN.is_match(domain)
}
