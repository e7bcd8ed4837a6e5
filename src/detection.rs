use serde_json::Value;

use crate::codec::{Reader, Writer};
use crate::data::{self, DataSets, DATA_KEY};
use crate::types::{EventType, OriginType};
use crate::validation::{Defects, AZIMUTH, NON_NEGATIVE, RMS};
use crate::{
    Beam, Correlation, DetectionData, Hypocenter, JsonObject, Pick, Record, Source, Validate,
};

const ID_KEY: &str = "ID";
const SOURCE_KEY: &str = "Source";
const HYPOCENTER_KEY: &str = "Hypocenter";
const DETECTIONTYPE_KEY: &str = "DetectionType";
const EVENTTYPE_KEY: &str = "EventType";
const BAYES_KEY: &str = "Bayes";
const MINIMUMDISTANCE_KEY: &str = "MinimumDistance";
const RMS_KEY: &str = "RMS";
const GAP_KEY: &str = "Gap";

/// An event detection. Carries the same supporting data as an [`Origin`]
/// but holds its location as a nested [`Hypocenter`].
///
/// [`Origin`]: crate::Origin
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Detection {
    pub id: String,
    pub source: Source,
    pub hypocenter: Hypocenter,
    /// See [`OriginType`].
    pub detection_type: Option<String>,
    /// See [`EventType`].
    pub event_type: Option<String>,
    pub bayes: Option<f64>,
    pub minimum_distance: Option<f64>,
    pub rms: Option<f64>,
    pub gap: Option<f64>,
    pub pick_data: Vec<Pick>,
    pub beam_data: Vec<Beam>,
    pub correlation_data: Vec<Correlation>,
    /// `"Type"` as read, kept only when it is not [`Record::TYPE`].
    wire_type: Option<String>,
}

impl Detection {
    pub fn new(id: &str, source: Source, hypocenter: Hypocenter) -> Self {
        Self {
            id: id.to_string(),
            source,
            hypocenter,
            ..Default::default()
        }
    }

    /// Append a child record to the sequence of its kind.
    pub fn push_data<D: Into<DetectionData>>(&mut self, data: D) {
        match data.into() {
            DetectionData::Pick(pick) => self.pick_data.push(pick),
            DetectionData::Beam(beam) => self.beam_data.push(beam),
            DetectionData::Correlation(correlation) => self.correlation_data.push(correlation),
        }
    }

    /// Child records in wire order.
    pub fn data(&self) -> impl Iterator<Item = DetectionData> + '_ {
        self.pick_data
            .iter()
            .cloned()
            .map(DetectionData::from)
            .chain(self.beam_data.iter().cloned().map(DetectionData::from))
            .chain(self.correlation_data.iter().cloned().map(DetectionData::from))
    }

    pub fn data_len(&self) -> usize {
        self.pick_data.len() + self.beam_data.len() + self.correlation_data.len()
    }

    pub fn type_name(&self) -> &str {
        self.wire_type.as_deref().unwrap_or(Self::TYPE)
    }
}

impl Record for Detection {
    const TYPE: &'static str = "Detection";
}

impl JsonObject for Detection {
    fn to_json(&self) -> Value {
        Writer::record(self.type_name())
            .string(ID_KEY, &self.id)
            .object(SOURCE_KEY, &self.source)
            .object(HYPOCENTER_KEY, &self.hypocenter)
            .opt_string(DETECTIONTYPE_KEY, &self.detection_type)
            .opt_string(EVENTTYPE_KEY, &self.event_type)
            .number(BAYES_KEY, self.bayes)
            .number(MINIMUMDISTANCE_KEY, self.minimum_distance)
            .number(RMS_KEY, self.rms)
            .number(GAP_KEY, self.gap)
            .array(
                DATA_KEY,
                data::encode(&self.pick_data, &self.beam_data, &self.correlation_data),
            )
            .finish()
    }

    fn from_json(json: &Value) -> anyhow::Result<Self> {
        let reader = Reader::new(json, Self::TYPE)?;
        let wire_type = match reader.type_name() {
            Some(Self::TYPE) => None,
            Some(other) => {
                log::warn!("Reading a {} message as a detection", other);
                Some(other.to_string())
            }
            None => Some(String::new()),
        };
        let sets = match reader.array(DATA_KEY) {
            Some(array) => DataSets::decode(array)?,
            None => DataSets::default(),
        };
        Ok(Self {
            id: reader.required_string(ID_KEY),
            source: reader.object(SOURCE_KEY)?.unwrap_or_default(),
            hypocenter: reader.object(HYPOCENTER_KEY)?.unwrap_or_default(),
            detection_type: reader.string(DETECTIONTYPE_KEY),
            event_type: reader.string(EVENTTYPE_KEY),
            bayes: reader.number(BAYES_KEY),
            minimum_distance: reader.number(MINIMUMDISTANCE_KEY),
            rms: reader.number(RMS_KEY),
            gap: reader.number(GAP_KEY),
            pick_data: sets.picks,
            beam_data: sets.beams,
            correlation_data: sets.correlations,
            wire_type,
        })
    }
}

impl Validate for Detection {
    fn validate(&self) -> Vec<String> {
        let mut defects = Defects::new("detection");
        defects.discriminator(self.wire_type.as_deref(), Self::TYPE);
        defects.required_string(&self.id, "ID");
        defects.nested(&self.source, "Source");
        defects.nested(&self.hypocenter, "Hypocenter");
        defects.enumerated::<OriginType>(&self.detection_type, "DetectionType");
        defects.enumerated::<EventType>(&self.event_type, "EventType");
        defects.optional_number(self.bayes, "Bayes", NON_NEGATIVE);
        defects.optional_number(self.minimum_distance, "MinimumDistance", NON_NEGATIVE);
        defects.optional_number(self.rms, "RMS", RMS);
        defects.optional_number(self.gap, "Gap", AZIMUTH);
        defects.each(&self.pick_data, "pick");
        defects.each(&self.beam_data, "beam");
        defects.each(&self.correlation_data, "correlation");
        defects.finish()
    }
}

json_serde!(Detection);
