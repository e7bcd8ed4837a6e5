use serde_json::Value;

use crate::associated::association;
use crate::codec::{Reader, Writer};
use crate::types::{EventType, ThresholdType};
use crate::validation::{Defects, COEFFICIENT, MAGNITUDE};
use crate::{Associated, Hypocenter, JsonObject, Record, Site, Source, Validate};

const ID_KEY: &str = "ID";
const SITE_KEY: &str = "Site";
const SOURCE_KEY: &str = "Source";
const PHASE_KEY: &str = "Phase";
const TIME_KEY: &str = "Time";
const CORRELATION_KEY: &str = "Correlation";
const HYPOCENTER_KEY: &str = "Hypocenter";
const EVENTTYPE_KEY: &str = "EventType";
const MAGNITUDE_KEY: &str = "Magnitude";
const SNR_KEY: &str = "SNR";
const ZSCORE_KEY: &str = "ZScore";
const DETECTIONTHRESHOLD_KEY: &str = "DetectionThreshold";
const THRESHOLDTYPE_KEY: &str = "ThresholdType";
const ASSOCIATIONINFO_KEY: &str = "AssociationInfo";

/// A waveform correlation detection: a match of a template event on one
/// channel, carrying the template's hypocenter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Correlation {
    pub id: String,
    pub site: Site,
    pub source: Source,
    pub phase: String,
    /// Phase time, epoch seconds.
    pub time: Option<f64>,
    /// Correlation coefficient, in `[-1, 1]`.
    pub correlation: Option<f64>,
    pub hypocenter: Hypocenter,
    /// See [`EventType`].
    pub event_type: Option<String>,
    pub magnitude: Option<f64>,
    pub snr: Option<f64>,
    pub zscore: Option<f64>,
    pub detection_threshold: Option<f64>,
    /// See [`ThresholdType`].
    pub threshold_type: Option<String>,
    pub association_info: Option<Associated>,
}

impl Correlation {
    pub fn new(
        id: &str,
        site: Site,
        source: Source,
        phase: &str,
        time: f64,
        correlation: f64,
        hypocenter: Hypocenter,
    ) -> Self {
        Self {
            id: id.to_string(),
            site,
            source,
            phase: phase.to_string(),
            time: Some(time),
            correlation: Some(correlation),
            hypocenter,
            ..Default::default()
        }
    }
}

impl Record for Correlation {
    const TYPE: &'static str = "Correlation";
}

impl JsonObject for Correlation {
    fn to_json(&self) -> Value {
        let mut writer = Writer::record(Self::TYPE);
        writer
            .string(ID_KEY, &self.id)
            .object(SITE_KEY, &self.site)
            .object(SOURCE_KEY, &self.source)
            .string(PHASE_KEY, &self.phase)
            .time(TIME_KEY, self.time)
            .number(CORRELATION_KEY, self.correlation)
            .object(HYPOCENTER_KEY, &self.hypocenter)
            .opt_string(EVENTTYPE_KEY, &self.event_type)
            .number(MAGNITUDE_KEY, self.magnitude)
            .number(SNR_KEY, self.snr)
            .number(ZSCORE_KEY, self.zscore)
            .number(DETECTIONTHRESHOLD_KEY, self.detection_threshold)
            .opt_string(THRESHOLDTYPE_KEY, &self.threshold_type);
        if let Some(associated) = association(&self.association_info) {
            writer.object(ASSOCIATIONINFO_KEY, associated);
        }
        writer.finish()
    }

    fn from_json(json: &Value) -> anyhow::Result<Self> {
        let reader = Reader::new(json, Self::TYPE)?;
        Ok(Self {
            id: reader.required_string(ID_KEY),
            site: reader.object(SITE_KEY)?.unwrap_or_default(),
            source: reader.object(SOURCE_KEY)?.unwrap_or_default(),
            phase: reader.required_string(PHASE_KEY),
            time: reader.time(TIME_KEY)?,
            correlation: reader.number(CORRELATION_KEY),
            hypocenter: reader.object(HYPOCENTER_KEY)?.unwrap_or_default(),
            event_type: reader.string(EVENTTYPE_KEY),
            magnitude: reader.number(MAGNITUDE_KEY),
            snr: reader.number(SNR_KEY),
            zscore: reader.number(ZSCORE_KEY),
            detection_threshold: reader.number(DETECTIONTHRESHOLD_KEY),
            threshold_type: reader.string(THRESHOLDTYPE_KEY),
            association_info: reader.object(ASSOCIATIONINFO_KEY)?,
        })
    }
}

impl Validate for Correlation {
    fn validate(&self) -> Vec<String> {
        let mut defects = Defects::new("correlation");
        defects.required_string(&self.id, "ID");
        defects.nested(&self.site, "Site");
        defects.nested(&self.source, "Source");
        defects.required_string(&self.phase, "Phase");
        defects.required_time(self.time, "Time");
        defects.required_number(self.correlation, "Correlation", COEFFICIENT);
        defects.nested(&self.hypocenter, "Hypocenter");
        defects.enumerated::<EventType>(&self.event_type, "EventType");
        defects.optional_number(self.magnitude, "Magnitude", MAGNITUDE);
        defects.enumerated::<ThresholdType>(&self.threshold_type, "ThresholdType");
        if let Some(associated) = association(&self.association_info) {
            defects.nested(associated, "AssociationInfo");
        }
        defects.finish()
    }
}

json_serde!(Correlation);
