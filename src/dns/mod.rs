mod cloudflare;
mod provider;

pub use cloudflare::{CloudflareProvider, CLOUDFLARE_API_BASE};
pub use provider::{Credentials, DnsProvider, DnsRecord, Zone};
