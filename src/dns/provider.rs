use std::fmt;
use std::net::Ipv4Addr;

use async_trait::async_trait;

use crate::error::Result;

#[derive(Clone)]
pub struct Credentials {
    pub api_token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_token", &"<REDACTED>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecord {
    pub id: String,
    pub name: String,
    pub record_type: String,
    pub content: String,
    pub proxied: bool,
    pub ttl: u32,
}

impl DnsRecord {
    /// Whether the record already resolves to `ip`.
    pub fn points_to(&self, ip: Ipv4Addr) -> bool {
        self.content == ip.to_string()
    }

    /// Copy of the record with only its content replaced.
    pub fn with_content(&self, ip: Ipv4Addr) -> Self {
        Self {
            content: ip.to_string(),
            ..self.clone()
        }
    }
}

#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Resolve the zone named `name`. Zero or several matches is an error.
    async fn get_zone(&self, name: &str) -> Result<Zone>;

    /// List all records of `record_type` in the zone
    async fn list_records(&self, zone_id: &str, record_type: &str) -> Result<Vec<DnsRecord>>;

    /// Replace a record. Everything but `content` is sent back unchanged.
    async fn update_record(&self, zone_id: &str, record: &DnsRecord) -> Result<()>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
