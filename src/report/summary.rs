use std::net::Ipv4Addr;

/// What happened to a single record during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Unchanged,
    Updated,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordReport {
    pub name: String,
    pub outcome: RecordOutcome,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub domain: String,
    pub target: Ipv4Addr,
    pub records: Vec<RecordReport>,
}

impl RunSummary {
    pub fn new(domain: &str, target: Ipv4Addr) -> Self {
        Self {
            domain: domain.to_string(),
            target,
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, name: &str, outcome: RecordOutcome) {
        self.records.push(RecordReport {
            name: name.to_string(),
            outcome,
        });
    }

    pub fn updated(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::Updated))
    }

    pub fn unchanged(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::Unchanged))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::Failed(_)))
    }

    /// At least one record was moved to the target IP.
    pub fn has_changes(&self) -> bool {
        self.updated() > 0
    }

    fn count(&self, pred: impl Fn(&RecordOutcome) -> bool) -> usize {
        self.records.iter().filter(|r| pred(&r.outcome)).count()
    }
}
