//! Worker roster — static table of categories, roles, and counts

use serde::{Deserialize, Serialize};

/// Worker categories. The set is fixed at compile time.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkerCategory {
    Core,
    Dev,
    Research,
    Content,
    Marketing,
    Sales,
    Support,
    Analytics,
}

impl WorkerCategory {
    pub const ALL: [WorkerCategory; 8] = [
        WorkerCategory::Core,
        WorkerCategory::Dev,
        WorkerCategory::Research,
        WorkerCategory::Content,
        WorkerCategory::Marketing,
        WorkerCategory::Sales,
        WorkerCategory::Support,
        WorkerCategory::Analytics,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WorkerCategory::Core => "core",
            WorkerCategory::Dev => "dev",
            WorkerCategory::Research => "research",
            WorkerCategory::Content => "content",
            WorkerCategory::Marketing => "marketing",
            WorkerCategory::Sales => "sales",
            WorkerCategory::Support => "support",
            WorkerCategory::Analytics => "analytics",
        }
    }
}

impl std::fmt::Display for WorkerCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Worker activity status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkerStatus {
    Idle,
    Thinking,
    Working,
    Offline,
}

/// A single mock worker
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkerRecord {
    pub id: String,
    pub name: String,
    pub category: WorkerCategory,
    pub enabled: bool,
    pub status: WorkerStatus,
    pub cpu_usage: f64,
    pub ram_usage: f64,
}

/// Static roster table: (category, role label, count).
const ROSTER: &[(WorkerCategory, &str, usize)] = &[
    (WorkerCategory::Core, "Orchestrator", 2),
    (WorkerCategory::Core, "Scheduler", 2),
    (WorkerCategory::Dev, "Engineer", 4),
    (WorkerCategory::Dev, "Reviewer", 2),
    (WorkerCategory::Research, "Analyst", 3),
    (WorkerCategory::Content, "Writer", 3),
    (WorkerCategory::Marketing, "Strategist", 2),
    (WorkerCategory::Sales, "Closer", 2),
    (WorkerCategory::Support, "Responder", 3),
    (WorkerCategory::Analytics, "Modeler", 2),
];

/// Total roster size, fixed for the process lifetime.
pub const ROSTER_SIZE: usize = 25;

/// Build the full roster. Every worker starts disabled/offline; the
/// registry applies the initial preset on construction.
pub fn build_roster() -> Vec<WorkerRecord> {
    let mut workers = Vec::with_capacity(ROSTER_SIZE);
    for (category, role, count) in ROSTER {
        for n in 1..=*count {
            workers.push(WorkerRecord {
                id: format!("{}-{}-{}", category, role.to_lowercase(), n),
                name: format!("{} {}", role, n),
                category: *category,
                enabled: false,
                status: WorkerStatus::Offline,
                cpu_usage: 0.0,
                ram_usage: 0.0,
            });
        }
    }
    workers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_has_fixed_size() {
        assert_eq!(build_roster().len(), ROSTER_SIZE);
    }

    #[test]
    fn roster_ids_are_unique() {
        let workers = build_roster();
        let mut ids: Vec<&str> = workers.iter().map(|w| w.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), ROSTER_SIZE);
    }

    #[test]
    fn roster_covers_every_category() {
        let workers = build_roster();
        for category in WorkerCategory::ALL {
            assert!(workers.iter().any(|w| w.category == category), "{category}");
        }
    }

    #[test]
    fn roster_starts_offline() {
        for worker in build_roster() {
            assert!(!worker.enabled);
            assert_eq!(worker.status, WorkerStatus::Offline);
            assert_eq!(worker.cpu_usage, 0.0);
            assert_eq!(worker.ram_usage, 0.0);
        }
    }
}
