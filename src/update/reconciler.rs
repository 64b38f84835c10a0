use std::net::Ipv4Addr;

use tracing::{error, info};

use crate::dns::{DnsProvider, DnsRecord};
use crate::error::Result;
use crate::report::{LogEvent, OutcomeLog, RecordOutcome, RunSummary};

pub const RECORD_TYPE: &str = "A";

/// Points every A record of a zone at one address.
pub struct Reconciler<'a, P: ?Sized> {
    provider: &'a P,
    log: &'a OutcomeLog,
}

impl<'a, P: DnsProvider + ?Sized> Reconciler<'a, P> {
    pub fn new(provider: &'a P, log: &'a OutcomeLog) -> Self {
        Self { provider, log }
    }

    /// Resolve the zone for `domain`, then update each A record that does
    /// not already point at `target`.
    ///
    /// Zone and listing failures abort the run before anything is changed.
    /// A failed update only marks that record as failed.
    pub async fn reconcile(&self, domain: &str, target: Ipv4Addr) -> Result<RunSummary> {
        info!(
            "Updating A records of {} to {} via {}",
            domain,
            target,
            self.provider.provider_name()
        );
        self.log.append(&LogEvent::Started { domain });

        let zone = self.provider.get_zone(domain).await?;
        let records = self.provider.list_records(&zone.id, RECORD_TYPE).await?;
        info!("Zone {} has {} A records", zone.name, records.len());

        let mut summary = RunSummary::new(domain, target);
        for record in &records {
            let outcome = self.reconcile_record(&zone.id, record, target).await;
            summary.push(&record.name, outcome);
        }

        info!(
            "Finished {}: {} updated, {} unchanged, {} failed",
            domain,
            summary.updated(),
            summary.unchanged(),
            summary.failed()
        );
        self.log.append(&LogEvent::Completed {
            domain,
            changed: summary.has_changes(),
        });

        Ok(summary)
    }

    async fn reconcile_record(
        &self,
        zone_id: &str,
        record: &DnsRecord,
        target: Ipv4Addr,
    ) -> RecordOutcome {
        if record.points_to(target) {
            info!("DNS record {} already set to {}", record.name, target);
            self.log.append(&LogEvent::Unchanged {
                name: &record.name,
                ip: target,
            });
            return RecordOutcome::Unchanged;
        }

        info!("Updating {} from {} to {}", record.name, record.content, target);

        match self
            .provider
            .update_record(zone_id, &record.with_content(target))
            .await
        {
            Ok(()) => {
                info!("Successfully updated {} to {}", record.name, target);
                self.log.append(&LogEvent::Updated {
                    name: &record.name,
                    ip: target,
                });
                RecordOutcome::Updated
            }
            Err(e) => {
                let message = e.to_string();
                error!("Failed to update {}: {}", record.name, message);
                self.log.append(&LogEvent::Failed {
                    name: &record.name,
                    ip: target,
                    error: &message,
                });
                RecordOutcome::Failed(message)
            }
        }
    }
}
