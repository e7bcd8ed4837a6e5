//! The heterogeneous `"Data"` array of container records.
//!
//! On the wire the children of an origin or detection share one array and
//! are told apart by their own `"Type"`. In memory they are kept in one
//! sequence per kind, so re-encoding groups all picks, then all beams, then
//! all correlations. Order within a kind is preserved.

use anyhow::anyhow;
use serde_json::Value;

use crate::codec::kind_of;
use crate::{Beam, Correlation, JsonObject, Pick, Record, Validate, TYPE_KEY};

/// JSON key of the child array.
pub(crate) const DATA_KEY: &str = "Data";

/// One child record of a container.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionData {
    Pick(Pick),
    Beam(Beam),
    Correlation(Correlation),
}

impl DetectionData {
    pub fn type_name(&self) -> &'static str {
        match self {
            DetectionData::Pick(_) => Pick::TYPE,
            DetectionData::Beam(_) => Beam::TYPE,
            DetectionData::Correlation(_) => Correlation::TYPE,
        }
    }

    /// Decode one array element by its discriminator.
    ///
    /// `Ok(None)` means the element is not a known child record and should
    /// be skipped: not an object, no string `"Type"`, or an unknown type.
    pub fn dispatch(json: &Value) -> anyhow::Result<Option<Self>> {
        let type_name = match json.get(TYPE_KEY) {
            Some(Value::String(s)) => s.as_str(),
            Some(other) => {
                log::warn!("Skipping data element whose Type is {}", kind_of(other));
                return Ok(None);
            }
            None => {
                log::warn!("Skipping data element without Type ({})", kind_of(json));
                return Ok(None);
            }
        };
        log::trace!("Dispatching data element of type {}", type_name);
        let data = match type_name {
            Pick::TYPE => DetectionData::Pick(Pick::from_json(json)?),
            Beam::TYPE => DetectionData::Beam(Beam::from_json(json)?),
            Correlation::TYPE => DetectionData::Correlation(Correlation::from_json(json)?),
            other => {
                log::debug!("Skipping data element of unknown type {}", other);
                return Ok(None);
            }
        };
        Ok(Some(data))
    }
}

impl JsonObject for DetectionData {
    fn to_json(&self) -> Value {
        match self {
            DetectionData::Pick(pick) => pick.to_json(),
            DetectionData::Beam(beam) => beam.to_json(),
            DetectionData::Correlation(correlation) => correlation.to_json(),
        }
    }

    /// Unlike [`DetectionData::dispatch`], an element that is not a known
    /// child record is an error.
    fn from_json(json: &Value) -> anyhow::Result<Self> {
        Self::dispatch(json)?.ok_or_else(|| {
            anyhow!(
                "Not a Pick, Beam or Correlation: Type is {}",
                json.get(TYPE_KEY).map_or("missing".to_string(), Value::to_string)
            )
        })
    }
}

impl Validate for DetectionData {
    fn validate(&self) -> Vec<String> {
        match self {
            DetectionData::Pick(pick) => pick.validate(),
            DetectionData::Beam(beam) => beam.validate(),
            DetectionData::Correlation(correlation) => correlation.validate(),
        }
    }
}

impl From<Pick> for DetectionData {
    fn from(value: Pick) -> Self {
        DetectionData::Pick(value)
    }
}

impl From<Beam> for DetectionData {
    fn from(value: Beam) -> Self {
        DetectionData::Beam(value)
    }
}

impl From<Correlation> for DetectionData {
    fn from(value: Correlation) -> Self {
        DetectionData::Correlation(value)
    }
}

json_serde!(DetectionData);

/// Per-kind sequences decoded from, or encoded to, a `"Data"` array.
#[derive(Debug, Default)]
pub(crate) struct DataSets {
    pub picks: Vec<Pick>,
    pub beams: Vec<Beam>,
    pub correlations: Vec<Correlation>,
}

impl DataSets {
    pub fn push(&mut self, data: DetectionData) {
        match data {
            DetectionData::Pick(pick) => self.picks.push(pick),
            DetectionData::Beam(beam) => self.beams.push(beam),
            DetectionData::Correlation(correlation) => self.correlations.push(correlation),
        }
    }

    /// Decode every known element of `array`, skipping the rest.
    pub fn decode(array: &[Value]) -> anyhow::Result<Self> {
        let mut sets = Self::default();
        for (idx, element) in array.iter().enumerate() {
            match DetectionData::dispatch(element)
                .map_err(|e| e.context(format!("Invalid Data element {}", idx)))?
            {
                Some(data) => sets.push(data),
                None => log::debug!("Data element {} skipped", idx),
            }
        }
        log::debug!(
            "Decoded {} picks, {} beams, {} correlations from {} data elements",
            sets.picks.len(),
            sets.beams.len(),
            sets.correlations.len(),
            array.len()
        );
        Ok(sets)
    }
}

/// All picks, then all beams, then all correlations.
pub(crate) fn encode(picks: &[Pick], beams: &[Beam], correlations: &[Correlation]) -> Vec<Value> {
    picks
        .iter()
        .map(JsonObject::to_json)
        .chain(beams.iter().map(JsonObject::to_json))
        .chain(correlations.iter().map(JsonObject::to_json))
        .collect()
}
