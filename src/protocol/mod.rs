use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::models::{Profile, Reading};

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Malformed frame: {0}")]
    MalformedFrame(#[from] serde_json::Error),

    #[error("No sensor at index {index}")]
    UnknownSensor { index: usize },
}

/// One inbound state frame. Every field is independent and optional; an
/// absent field means "no change of that kind in this message".
///
/// `secondary_profile` is tri-state: the protocol distinguishes "key absent"
/// (unchanged) from "key present with null" (explicitly cleared), so it
/// decodes to a nested `Option` with a presence-preserving deserializer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ServerUpdate {
    #[serde(default)]
    pub sensors: Option<Vec<SensorSpec>>,
    #[serde(default)]
    pub values: Option<IndexMap<usize, ReadingSpec>>,
    #[serde(default)]
    pub thresholds: Option<IndexMap<usize, i32>>,
    #[serde(default)]
    pub profiles: Option<Vec<ProfileSpec>>,
    #[serde(default)]
    pub active_profile: Option<String>,
    #[serde(default, deserialize_with = "present_or_null")]
    pub secondary_profile: Option<Option<String>>,
}

fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SensorSpec {
    pub label: String,
    pub group: u32,
}

/// A `values` entry: a bare integer or a `[min, max]` pair. The server
/// doubles single readings into pairs on some deployments; both shapes are
/// accepted and a bare value normalizes to `min = max = value`.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum ReadingSpec {
    Single(u16),
    Pair(u16, u16),
}

impl ReadingSpec {
    pub fn normalized(self) -> Reading {
        match self {
            ReadingSpec::Single(value) => Reading::single(value),
            ReadingSpec::Pair(min, max) => Reading::new(min, max),
        }
    }
}

/// A `profiles` entry: the grouped shape, or a legacy bare name from the
/// pre-group protocol variant.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProfileSpec {
    Grouped { name: String, groups: Vec<u32> },
    Flat(String),
}

impl ProfileSpec {
    pub fn into_profile(self) -> Profile {
        match self {
            ProfileSpec::Grouped { name, groups } => Profile::new(name, groups),
            ProfileSpec::Flat(name) => Profile::ungrouped(name),
        }
    }
}

/// Outbound operator commands, one JSON object per frame. The external tag
/// reproduces the wire shape, e.g. `{"changeThreshold":{"id":3,"delta":-1}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ClientCommand {
    SetActiveProfile(String),
    SetSecondaryProfile(Option<String>),
    ChangeThreshold { id: usize, delta: i32 },
    SetThreshold { id: usize, threshold: i32 },
}

pub fn decode_update(frame: &str) -> Result<ServerUpdate, ProtocolError> {
    Ok(serde_json::from_str(frame)?)
}

pub fn encode_command(command: &ClientCommand) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(command)?)
}
