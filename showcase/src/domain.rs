use serde::{Deserialize, Serialize};

/// Cache key of the sample dataset served by the data endpoint
pub const SAMPLE_DATA_KEY: &str = "sample_data";

/// Name the cache backend reports under in readiness checks
pub const CACHE_CHECK: &str = "cache";

pub mod response {
    use super::{Dataset, Source};
    use std::collections::BTreeMap;

    #[derive(Clone, Debug, PartialEq)]
    pub struct DataResponse {
        pub data: Dataset,
        pub source: Source,
    }

    impl DataResponse {
        pub fn new(data: Dataset, source: Source) -> Self {
            Self { data, source }
        }
    }

    /// Outcome of probing every external dependency
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct HealthCheckResult {
        pub ready: bool,
        pub checks: BTreeMap<String, bool>,
    }

    impl HealthCheckResult {
        /// `ready` is the conjunction of all checks
        pub fn from_checks(checks: BTreeMap<String, bool>) -> Self {
            let ready = checks.values().all(|ok| *ok);
            Self { ready, checks }
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Liveness {
        pub alive: bool,
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct HealthStatus {
        pub status: &'static str,
        pub service: String,
        pub version: String,
    }
}

/// Where a served value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    Cache,
    Computed,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Cache => "cache",
            Source::Computed => "computed",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub name: String,
    pub value: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub items: Vec<Item>,
}

impl Dataset {
    /// The deterministic three-item sample dataset
    pub fn sample() -> Self {
        let items = (1..=3)
            .map(|id| Item {
                id,
                name: format!("Item {id}"),
                value: id * 100,
            })
            .collect();
        Self { items }
    }
}

/// Static metadata describing the running service
#[derive(Clone, Debug)]
pub struct ServiceInfo {
    pub name: String,
    pub display_name: String,
    pub version: String,
}

impl ServiceInfo {
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            version: version.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::response::HealthCheckResult;
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_sample_dataset_has_three_items() {
        let data = Dataset::sample();
        assert_eq!(data.items.len(), 3);
        assert_eq!(
            data.items[1],
            Item {
                id: 2,
                name: "Item 2".to_string(),
                value: 200
            }
        );
    }

    #[test]
    fn test_dataset_json_shape() {
        let json = serde_json::to_value(Dataset::sample()).unwrap();
        assert_eq!(json["items"][0]["name"], "Item 1");
        assert_eq!(json["items"][2]["value"], 300);
    }

    #[test]
    fn test_ready_is_conjunction_of_checks() {
        let mut checks = BTreeMap::new();
        checks.insert("cache".to_string(), true);
        assert!(HealthCheckResult::from_checks(checks.clone()).ready);

        checks.insert("db".to_string(), false);
        assert!(!HealthCheckResult::from_checks(checks).ready);
    }

    #[test]
    fn test_source_labels() {
        assert_eq!(Source::Cache.as_str(), "cache");
        assert_eq!(Source::Computed.as_str(), "computed");
    }
}
