use serde_json::Value;

use crate::associated::association;
use crate::codec::{Reader, Writer};
use crate::types::{EventType, ThresholdType};
use crate::validation::{Defects, AZIMUTH, MAGNITUDE, NON_NEGATIVE};
use crate::{Associated, JsonObject, Record, Site, Source, Validate};

const ID_KEY: &str = "ID";
const SITE_KEY: &str = "Site";
const SOURCE_KEY: &str = "Source";
const TIME_KEY: &str = "Time";
const PHASE_KEY: &str = "Phase";
const BACKAZIMUTH_KEY: &str = "BackAzimuth";
const BACKAZIMUTHERROR_KEY: &str = "BackAzimuthError";
const SLOWNESS_KEY: &str = "Slowness";
const SLOWNESSERROR_KEY: &str = "SlownessError";
const POWERRATIO_KEY: &str = "PowerRatio";
const POWERRATIOERROR_KEY: &str = "PowerRatioError";
const EVENTTYPE_KEY: &str = "EventType";
const MAGNITUDE_KEY: &str = "Magnitude";
const SNR_KEY: &str = "SNR";
const ZSCORE_KEY: &str = "ZScore";
const DETECTIONTHRESHOLD_KEY: &str = "DetectionThreshold";
const THRESHOLDTYPE_KEY: &str = "ThresholdType";
const ASSOCIATIONINFO_KEY: &str = "AssociationInfo";

/// An array beam detection: the direction (back azimuth, degrees) and
/// horizontal slowness (s/deg) of a coherent arrival across an array.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Beam {
    pub id: String,
    pub site: Site,
    pub source: Source,
    /// Beam time, epoch seconds.
    pub time: Option<f64>,
    pub phase: String,
    pub back_azimuth: Option<f64>,
    pub back_azimuth_error: Option<f64>,
    pub slowness: Option<f64>,
    pub slowness_error: Option<f64>,
    pub power_ratio: Option<f64>,
    pub power_ratio_error: Option<f64>,
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

impl Beam {
    pub fn new(
        id: &str,
        site: Site,
        source: Source,
        phase: &str,
        time: f64,
        back_azimuth: f64,
        slowness: f64,
    ) -> Self {
        Self {
            id: id.to_string(),
            site,
            source,
            time: Some(time),
            phase: phase.to_string(),
            back_azimuth: Some(back_azimuth),
            slowness: Some(slowness),
            ..Default::default()
        }
    }
}

impl Record for Beam {
    const TYPE: &'static str = "Beam";
}

impl JsonObject for Beam {
    fn to_json(&self) -> Value {
        let mut writer = Writer::record(Self::TYPE);
        writer
            .string(ID_KEY, &self.id)
            .object(SITE_KEY, &self.site)
            .object(SOURCE_KEY, &self.source)
            .time(TIME_KEY, self.time)
            .string(PHASE_KEY, &self.phase)
            .number(BACKAZIMUTH_KEY, self.back_azimuth)
            .number(BACKAZIMUTHERROR_KEY, self.back_azimuth_error)
            .number(SLOWNESS_KEY, self.slowness)
            .number(SLOWNESSERROR_KEY, self.slowness_error)
            .number(POWERRATIO_KEY, self.power_ratio)
            .number(POWERRATIOERROR_KEY, self.power_ratio_error)
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
            time: reader.time(TIME_KEY)?,
            phase: reader.required_string(PHASE_KEY),
            back_azimuth: reader.number(BACKAZIMUTH_KEY),
            back_azimuth_error: reader.number(BACKAZIMUTHERROR_KEY),
            slowness: reader.number(SLOWNESS_KEY),
            slowness_error: reader.number(SLOWNESSERROR_KEY),
            power_ratio: reader.number(POWERRATIO_KEY),
            power_ratio_error: reader.number(POWERRATIOERROR_KEY),
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

impl Validate for Beam {
    fn validate(&self) -> Vec<String> {
        let mut defects = Defects::new("beam");
        defects.required_string(&self.id, "ID");
        defects.nested(&self.site, "Site");
        defects.nested(&self.source, "Source");
        defects.required_time(self.time, "Time");
        defects.required_string(&self.phase, "Phase");
        defects.required_number(self.back_azimuth, "BackAzimuth", AZIMUTH);
        defects.optional_number(self.back_azimuth_error, "BackAzimuthError", NON_NEGATIVE);
        defects.required_number(self.slowness, "Slowness", NON_NEGATIVE);
        defects.optional_number(self.slowness_error, "SlownessError", NON_NEGATIVE);
        defects.optional_number(self.power_ratio, "PowerRatio", NON_NEGATIVE);
        defects.optional_number(self.power_ratio_error, "PowerRatioError", NON_NEGATIVE);
        defects.enumerated::<EventType>(&self.event_type, "EventType");
        defects.optional_number(self.magnitude, "Magnitude", MAGNITUDE);
        defects.enumerated::<ThresholdType>(&self.threshold_type, "ThresholdType");
        if let Some(associated) = association(&self.association_info) {
            defects.nested(associated, "AssociationInfo");
        }
        defects.finish()
    }
}

json_serde!(Beam);

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn beam() -> Beam {
        Beam::new(
            "12GFH48776857",
            Site::new("BMN", "HHZ", "LB", "01"),
            Source::new("US", "TestAuthor"),
            "P",
            1500000000.0,
            2.65,
            1.44,
        )
    }

    #[test]
    fn minimal_json() {
        let json = beam().to_json();
        assert_eq!(json["Type"], "Beam");
        assert_eq!(json["BackAzimuth"], json!(2.65));
        assert_eq!(json["Slowness"], json!(1.44));
        assert!(json.get("PowerRatio").is_none());
        assert!(beam().is_valid());
    }

    #[test]
    fn full_round_trip() {
        let mut beam = beam();
        beam.back_azimuth_error = Some(3.8);
        beam.slowness_error = Some(0.4);
        beam.power_ratio = Some(12.18);
        beam.power_ratio_error = Some(0.557);
        beam.event_type = Some(EventType::Blast.into());
        beam.snr = Some(8.2);
        beam.association_info = Some(Associated::new("P", 12.4, 133.0, 0.3, 1.1));
        let parsed = Beam::from_json(&beam.to_json()).unwrap();
        assert_eq!(parsed, beam);
        assert!(parsed.is_valid());
    }

    #[test]
    fn defects() {
        let mut beam = beam();
        beam.back_azimuth = Some(361.0);
        beam.slowness = None;
        beam.power_ratio_error = Some(-1.0);
        beam.threshold_type = Some("average".to_string());
        assert_eq!(
            beam.validate(),
            vec![
                "Invalid BackAzimuth in beam class.",
                "No Slowness in beam class.",
                "Invalid PowerRatioError in beam class.",
                "Invalid ThresholdType in beam class.",
            ]
        );
    }
}
