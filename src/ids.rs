//! Strongly-typed record IDs. Backend ids are positive integers; prospects are
//! client-held and use UUIDs.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

fn validate_numeric(s: &str) -> Result<i64, String> {
    let n: i64 = s
        .trim()
        .parse()
        .map_err(|e| format!("Invalid id {:?}: {}", s, e))?;
    if n <= 0 {
        return Err(format!("Invalid id {}: must be positive", n));
    }
    Ok(n)
}

/// Agent ID (backend primary key).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(i64);

/// Task ID (backend primary key).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(i64);

/// Intervention ID, scoped to its task on the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InterventionId(i64);

/// Prospect ID (UUID, assigned client-side).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProspectId(Uuid);

macro_rules! numeric_id {
    ($name:ident) => {
        impl $name {
            pub fn new(n: i64) -> Result<Self, String> {
                if n <= 0 {
                    return Err(format!("Invalid id {}: must be positive", n));
                }
                Ok(Self(n))
            }

            pub fn parse(s: impl AsRef<str>) -> Result<Self, String> {
                Self::from_str(s.as_ref())
            }

            pub fn get(&self) -> i64 {
                self.0
            }
        }
        impl FromStr for $name {
            type Err = String;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(validate_numeric(s)?))
            }
        }
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
                ser.serialize_i64(self.0)
            }
        }
        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
                let n = i64::deserialize(de)?;
                Self::new(n).map_err(serde::de::Error::custom)
            }
        }
    };
}
numeric_id!(AgentId);
numeric_id!(TaskId);
numeric_id!(InterventionId);

impl ProspectId {
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(s: impl AsRef<str>) -> Result<Self, String> {
        Self::from_str(s.as_ref())
    }
}

impl FromStr for ProspectId {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

impl fmt::Display for ProspectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for ProspectId {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        ser.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ProspectId {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        let s = String::deserialize(de)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}
