use std::str::FromStr;

use anyhow::{anyhow, Context};
use serde_json::Value;

use crate::codec::Reader;
use crate::{Beam, Correlation, Detection, DetectionData, JsonObject, Origin, Pick, Record, Validate};

/// Any top level detection message, chosen by its `"Type"`.
///
/// ```
/// use detectionio::{Message, Validate};
///
/// let text = r#"{"Type":"Pick","ID":"1","Phase":"P"}"#;
/// let message: Message = text.parse().unwrap();
/// assert_eq!(message.type_name(), "Pick");
/// assert!(!message.is_valid());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Origin(Origin),
    Detection(Detection),
    Pick(Pick),
    Beam(Beam),
    Correlation(Correlation),
}

impl Message {
    pub fn type_name(&self) -> &'static str {
        match self {
            Message::Origin(_) => Origin::TYPE,
            Message::Detection(_) => Detection::TYPE,
            Message::Pick(_) => Pick::TYPE,
            Message::Beam(_) => Beam::TYPE,
            Message::Correlation(_) => Correlation::TYPE,
        }
    }

    /// Message id, whatever its kind.
    pub fn id(&self) -> &str {
        match self {
            Message::Origin(m) => &m.id,
            Message::Detection(m) => &m.id,
            Message::Pick(m) => &m.id,
            Message::Beam(m) => &m.id,
            Message::Correlation(m) => &m.id,
        }
    }
}

impl JsonObject for Message {
    fn to_json(&self) -> Value {
        match self {
            Message::Origin(m) => m.to_json(),
            Message::Detection(m) => m.to_json(),
            Message::Pick(m) => m.to_json(),
            Message::Beam(m) => m.to_json(),
            Message::Correlation(m) => m.to_json(),
        }
    }

    /// A missing or unknown `"Type"` is an error here, unlike inside a
    /// container's `"Data"` array where such elements are skipped.
    fn from_json(json: &Value) -> anyhow::Result<Self> {
        let reader = Reader::new(json, "message")?;
        let type_name = reader
            .type_name()
            .ok_or_else(|| anyhow!("Message has no Type"))?;
        log::debug!("Reading {} message", type_name);
        let message = match type_name {
            Origin::TYPE => Message::Origin(Origin::from_json(json)?),
            Detection::TYPE => Message::Detection(Detection::from_json(json)?),
            Pick::TYPE => Message::Pick(Pick::from_json(json)?),
            Beam::TYPE => Message::Beam(Beam::from_json(json)?),
            Correlation::TYPE => Message::Correlation(Correlation::from_json(json)?),
            other => return Err(anyhow!("Unknown message Type \"{}\"", other)),
        };
        Ok(message)
    }
}

impl Validate for Message {
    fn validate(&self) -> Vec<String> {
        match self {
            Message::Origin(m) => m.validate(),
            Message::Detection(m) => m.validate(),
            Message::Pick(m) => m.validate(),
            Message::Beam(m) => m.validate(),
            Message::Correlation(m) => m.validate(),
        }
    }
}

impl FromStr for Message {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let json: Value = serde_json::from_str(s).context("Message is not valid JSON")?;
        Self::from_json(&json)
    }
}

impl From<DetectionData> for Message {
    fn from(value: DetectionData) -> Self {
        match value {
            DetectionData::Pick(pick) => Message::Pick(pick),
            DetectionData::Beam(beam) => Message::Beam(beam),
            DetectionData::Correlation(correlation) => Message::Correlation(correlation),
        }
    }
}

impl From<Origin> for Message {
    fn from(value: Origin) -> Self {
        Message::Origin(value)
    }
}

impl From<Detection> for Message {
    fn from(value: Detection) -> Self {
        Message::Detection(value)
    }
}

json_serde!(Message);
