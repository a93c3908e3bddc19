use crate::errors::StoreError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CounterId {
    Square,
    Circle,
}

impl CounterId {
    pub const ALL: [CounterId; 2] = [CounterId::Square, CounterId::Circle];

    pub fn as_str(self) -> &'static str {
        match self {
            CounterId::Square => "square",
            CounterId::Circle => "circle",
        }
    }
}

impl fmt::Display for CounterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CounterId {
    type Err = StoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "square" => Ok(CounterId::Square),
            "circle" => Ok(CounterId::Circle),
            other => Err(StoreError::UnknownId(other.to_string())),
        }
    }
}

/// Snapshot of both counters. This is also the on-disk format of the local store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Counts {
    #[serde(default)]
    pub square: u64,
    #[serde(default)]
    pub circle: u64,
}

impl Counts {
    pub fn get(&self, id: CounterId) -> u64 {
        match id {
            CounterId::Square => self.square,
            CounterId::Circle => self.circle,
        }
    }

    pub fn set(&mut self, id: CounterId, count: u64) {
        match id {
            CounterId::Square => self.square = count,
            CounterId::Circle => self.circle = count,
        }
    }
}

/// One row of the remote `clicks` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickRow {
    pub id: String,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreMode {
    Remote,
    Local,
}

#[derive(Debug, Deserialize)]
pub struct ClickRequest {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CounterResponse {
    pub id: CounterId,
    pub count: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CountsResponse {
    pub square: u64,
    pub circle: u64,
    pub mode: StoreMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_id_parses_known_names_only() {
        assert_eq!("square".parse::<CounterId>().unwrap(), CounterId::Square);
        assert_eq!("circle".parse::<CounterId>().unwrap(), CounterId::Circle);

        let err = "triangle".parse::<CounterId>().unwrap_err();
        assert!(matches!(err, StoreError::UnknownId(ref id) if id == "triangle"));
        assert!("Square".parse::<CounterId>().is_err());
    }

    #[test]
    fn counts_snapshot_tolerates_missing_and_extra_keys() {
        let counts: Counts = serde_json::from_str(r#"{"square": 4, "hexagon": 9}"#).unwrap();
        assert_eq!(counts, Counts { square: 4, circle: 0 });
    }
}
