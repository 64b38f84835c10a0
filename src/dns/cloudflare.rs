use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::provider::{Credentials, DnsProvider, DnsRecord, Zone};
use crate::error::{Error, Result};

pub const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";
const PROVIDER_NAME: &str = "cloudflare";
const RECORDS_PER_PAGE: u32 = 100;
// Cloudflare's "automatic" TTL
const AUTO_TTL: u32 = 1;

pub struct CloudflareProvider {
    client: Client,
    credentials: Credentials,
    api_base: String,
}

impl fmt::Debug for CloudflareProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudflareProvider")
            .field("credentials", &self.credentials)
            .field("api_base", &self.api_base)
            .finish()
    }
}

/// Envelope wrapped around every Cloudflare v4 response
#[derive(Debug, Deserialize)]
struct CloudflareResponse<T> {
    success: bool,
    result: Option<T>,
    #[serde(default)]
    errors: Vec<CloudflareApiError>,
    result_info: Option<ResultInfo>,
}

#[derive(Debug, Deserialize)]
struct CloudflareApiError {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct ResultInfo {
    #[serde(default)]
    page: u32,
    #[serde(default)]
    total_pages: u32,
}

#[derive(Debug, Deserialize)]
struct CloudflareZone {
    id: String,
    name: String,
}

/// A record row as returned by the API. Every field is optional so that one
/// malformed row does not take the whole listing down with it.
#[derive(Debug, Deserialize)]
struct CloudflareRecord {
    id: Option<String>,
    name: Option<String>,
    #[serde(rename = "type")]
    record_type: Option<String>,
    content: Option<String>,
    proxied: Option<bool>,
    ttl: Option<u32>,
}

impl CloudflareRecord {
    fn into_record(self) -> Option<DnsRecord> {
        Some(DnsRecord {
            id: self.id?,
            name: self.name?,
            record_type: self.record_type?,
            content: self.content?,
            proxied: self.proxied.unwrap_or(false),
            ttl: self.ttl.unwrap_or(AUTO_TTL),
        })
    }
}

#[derive(Debug, Serialize)]
struct RecordUpdate<'a> {
    #[serde(rename = "type")]
    record_type: &'a str,
    name: &'a str,
    content: &'a str,
    proxied: bool,
    ttl: u32,
}

impl CloudflareProvider {
    pub fn new(credentials: Credentials, api_base: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            credentials,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    /// Send a request and unwrap the Cloudflare envelope.
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<(T, Option<ResultInfo>)> {
        let response = request
            .bearer_auth(&self.credentials.api_token)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!("Cloudflare API responded with {}", status);

        let envelope: CloudflareResponse<T> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => {
                return Err(Error::provider(
                    PROVIDER_NAME,
                    format!("Failed to parse API response: {}", e),
                ));
            }
            Err(_) => {
                return Err(Error::provider(
                    PROVIDER_NAME,
                    format!("API error ({}): {}", status, body.trim()),
                ));
            }
        };

        if !envelope.success || !status.is_success() {
            let message = envelope
                .errors
                .first()
                .map(|e| format!("{} ({})", e.message, e.code))
                .unwrap_or_else(|| "no error details".to_string());
            return Err(Error::provider(
                PROVIDER_NAME,
                format!("API error ({}): {}", status, message),
            ));
        }

        let result = envelope.result.ok_or_else(|| {
            Error::provider(PROVIDER_NAME, "API response is missing the result field")
        })?;

        Ok((result, envelope.result_info))
    }
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    async fn get_zone(&self, name: &str) -> Result<Zone> {
        tracing::debug!("Looking up zone {}", name);

        let request = self
            .client
            .get(self.url("/zones"))
            .query(&[("name", name)]);
        let (zones, _): (Vec<CloudflareZone>, _) = self.send(request).await?;

        if zones.len() != 1 {
            return Err(Error::not_found(format!(
                "Zone lookup returned {} results for {}",
                zones.len(),
                name
            )));
        }

        let zone = zones
            .into_iter()
            .next()
            .map(|z| Zone { id: z.id, name: z.name })
            .ok_or_else(|| Error::not_found(format!("Zone not found: {}", name)))?;

        tracing::debug!("Zone {} has id {}", zone.name, zone.id);
        Ok(zone)
    }

    async fn list_records(&self, zone_id: &str, record_type: &str) -> Result<Vec<DnsRecord>> {
        let url = self.url(&format!("/zones/{}/dns_records", zone_id));
        let mut records = Vec::new();
        let mut page = 1;

        loop {
            let request = self.client.get(&url).query(&[
                ("type", record_type.to_string()),
                ("page", page.to_string()),
                ("per_page", RECORDS_PER_PAGE.to_string()),
            ]);
            let (rows, info): (Vec<Value>, _) = self.send(request).await?;
            let row_count = rows.len();

            for row in rows {
                match serde_json::from_value::<CloudflareRecord>(row)
                    .ok()
                    .and_then(CloudflareRecord::into_record)
                {
                    Some(record) if record.record_type == record_type => records.push(record),
                    Some(record) => {
                        tracing::debug!(
                            "Skipping {} record {} in an {} listing",
                            record.record_type,
                            record.name,
                            record_type
                        );
                    }
                    None => tracing::warn!("Skipping malformed DNS record in zone {}", zone_id),
                }
            }

            match info {
                Some(info) if row_count > 0 && info.page.max(page) < info.total_pages => {
                    page = info.page.max(page) + 1;
                }
                _ => break,
            }
        }

        tracing::debug!("Zone {} has {} {} records", zone_id, records.len(), record_type);
        Ok(records)
    }

    async fn update_record(&self, zone_id: &str, record: &DnsRecord) -> Result<()> {
        let payload = RecordUpdate {
            record_type: &record.record_type,
            name: &record.name,
            content: &record.content,
            proxied: record.proxied,
            ttl: record.ttl,
        };

        let request = self
            .client
            .put(self.url(&format!("/zones/{}/dns_records/{}", zone_id, record.id)))
            .json(&payload);
        let _: (Value, _) = self.send(request).await?;

        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}
