mod reconciler;

pub use reconciler::{Reconciler, RECORD_TYPE};

use crate::config::Settings;
use crate::dns::{Credentials, DnsProvider};
use crate::error::{Error, Result};
use crate::ip::{parse_ipv4, validate_domain};
use crate::report::{OutcomeLog, RunSummary};
use crate::secrets::{load_credentials, CredentialSource};

/// One invocation: point the A records of `domain` at `ip_address`.
#[derive(Debug, Clone)]
pub struct UpdateRequest {
    pub domain: String,
    pub ip_address: String,
}

/// Validate the request, resolve credentials, and reconcile the zone.
///
/// `connect` builds the provider client from the resolved credentials; it is
/// only called once the request is known to be valid, so input and
/// configuration errors never touch the network.
pub async fn run<P, F>(
    request: &UpdateRequest,
    settings: &Settings,
    source: &dyn CredentialSource,
    log: &OutcomeLog,
    connect: F,
) -> Result<RunSummary>
where
    P: DnsProvider,
    F: FnOnce(Credentials) -> Result<P>,
{
    let target = parse_ipv4(&request.ip_address)?;

    if !validate_domain(&request.domain) {
        return Err(Error::invalid_input(format!(
            "Invalid domain: {}",
            request.domain
        )));
    }

    let credentials = load_credentials(
        &request.domain,
        &settings.cloudflare.token_env_prefix,
        source,
    )?;

    let provider = connect(credentials)?;

    Reconciler::new(&provider, log)
        .reconcile(&request.domain, target)
        .await
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::HashMap;

    use async_trait::async_trait;

    use super::*;
    use crate::dns::{DnsRecord, Zone};

    /// Provider that must never be reached
    struct Unreachable;

    #[async_trait]
    impl DnsProvider for Unreachable {
        async fn get_zone(&self, _name: &str) -> Result<Zone> {
            panic!("get_zone called");
        }

        async fn list_records(&self, _zone_id: &str, _record_type: &str) -> Result<Vec<DnsRecord>> {
            panic!("list_records called");
        }

        async fn update_record(&self, _zone_id: &str, _record: &DnsRecord) -> Result<()> {
            panic!("update_record called");
        }

        fn provider_name(&self) -> &'static str {
            "unreachable"
        }
    }

    fn request(domain: &str, ip: &str) -> UpdateRequest {
        UpdateRequest {
            domain: domain.to_string(),
            ip_address: ip.to_string(),
        }
    }

    async fn run_without_network(
        request: &UpdateRequest,
        env: &HashMap<String, String>,
    ) -> (Result<RunSummary>, bool) {
        let dir = tempfile::tempdir().unwrap();
        let log = OutcomeLog::new(dir.path().join("update.log"));
        let connected = Cell::new(false);

        let result = run(request, &Settings::default(), env, &log, |_| {
            connected.set(true);
            Ok(Unreachable)
        })
        .await;

        (result, connected.get())
    }

    #[tokio::test]
    async fn test_invalid_ip_is_rejected_before_connecting() {
        let env = HashMap::from([(
            "CLOUDFLARE_TOKEN_EXAMPLE_COM".to_string(),
            "token".to_string(),
        )]);

        let (result, connected) = run_without_network(&request("example.com", "256.1.1.1"), &env).await;

        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert!(!connected);
    }

    #[tokio::test]
    async fn test_invalid_domain_is_rejected_before_connecting() {
        let env = HashMap::new();

        let (result, connected) = run_without_network(&request("not a domain", "203.0.113.9"), &env).await;

        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert!(!connected);
    }

    #[tokio::test]
    async fn test_missing_token_is_rejected_before_connecting() {
        let env = HashMap::from([(
            "CLOUDFLARE_TOKEN_OTHER_COM".to_string(),
            "token".to_string(),
        )]);

        let (result, connected) = run_without_network(&request("example.com", "203.0.113.9"), &env).await;

        assert!(matches!(result, Err(Error::Configuration(_))));
        assert!(!connected);
    }

    #[tokio::test]
    async fn test_connect_receives_resolved_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let log = OutcomeLog::new(dir.path().join("update.log"));
        let env = HashMap::from([(
            "CLOUDFLARE_TOKEN_EXAMPLE_COM".to_string(),
            "secret-token".to_string(),
        )]);

        let result = run(
            &request("example.com", "203.0.113.9"),
            &Settings::default(),
            &env,
            &log,
            |credentials| -> Result<Unreachable> {
                assert_eq!(credentials.api_token, "secret-token");
                Err(Error::configuration("stop here"))
            },
        )
        .await;

        assert!(matches!(result, Err(Error::Configuration(_))));
    }
}
