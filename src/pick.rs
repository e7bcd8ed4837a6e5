use serde_json::Value;

use crate::associated::association;
use crate::codec::{Reader, Writer};
use crate::types::{EventType, Onset, Picker, Polarity, ThresholdType};
use crate::validation::{Defects, MAGNITUDE};
use crate::{Associated, JsonObject, Record, Site, Source, Validate};

const ID_KEY: &str = "ID";
const SITE_KEY: &str = "Site";
const SOURCE_KEY: &str = "Source";
const TIME_KEY: &str = "Time";
const PHASE_KEY: &str = "Phase";
const POLARITY_KEY: &str = "Polarity";
const ONSET_KEY: &str = "Onset";
const PICKER_KEY: &str = "Picker";
const EVENTTYPE_KEY: &str = "EventType";
const MAGNITUDE_KEY: &str = "Magnitude";
const SNR_KEY: &str = "SNR";
const ZSCORE_KEY: &str = "ZScore";
const DETECTIONTHRESHOLD_KEY: &str = "DetectionThreshold";
const THRESHOLDTYPE_KEY: &str = "ThresholdType";
const ASSOCIATIONINFO_KEY: &str = "AssociationInfo";

/// A seismic phase arrival picked on a single channel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pick {
    pub id: String,
    pub site: Site,
    pub source: Source,
    /// Arrival time, epoch seconds.
    pub time: Option<f64>,
    pub phase: String,
    /// See [`Polarity`].
    pub polarity: Option<String>,
    /// See [`Onset`].
    pub onset: Option<String>,
    /// See [`Picker`].
    pub picker: Option<String>,
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

impl Pick {
    pub fn new(id: &str, site: Site, source: Source, phase: &str, time: f64) -> Self {
        Self {
            id: id.to_string(),
            site,
            source,
            time: Some(time),
            phase: phase.to_string(),
            ..Default::default()
        }
    }
}

impl Record for Pick {
    const TYPE: &'static str = "Pick";
}

impl JsonObject for Pick {
    fn to_json(&self) -> Value {
        let mut writer = Writer::record(Self::TYPE);
        writer
            .string(ID_KEY, &self.id)
            .object(SITE_KEY, &self.site)
            .object(SOURCE_KEY, &self.source)
            .time(TIME_KEY, self.time)
            .string(PHASE_KEY, &self.phase)
            .opt_string(POLARITY_KEY, &self.polarity)
            .opt_string(ONSET_KEY, &self.onset)
            .opt_string(PICKER_KEY, &self.picker)
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
            polarity: reader.string(POLARITY_KEY),
            onset: reader.string(ONSET_KEY),
            picker: reader.string(PICKER_KEY),
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

impl Validate for Pick {
    fn validate(&self) -> Vec<String> {
        let mut defects = Defects::new("pick");
        defects.required_string(&self.id, "ID");
        defects.nested(&self.site, "Site");
        defects.nested(&self.source, "Source");
        defects.required_time(self.time, "Time");
        defects.required_string(&self.phase, "Phase");
        defects.enumerated::<Polarity>(&self.polarity, "Polarity");
        defects.enumerated::<Onset>(&self.onset, "Onset");
        defects.enumerated::<Picker>(&self.picker, "Picker");
        defects.enumerated::<EventType>(&self.event_type, "EventType");
        defects.optional_number(self.magnitude, "Magnitude", MAGNITUDE);
        defects.enumerated::<ThresholdType>(&self.threshold_type, "ThresholdType");
        if let Some(associated) = association(&self.association_info) {
            defects.nested(associated, "AssociationInfo");
        }
        defects.finish()
    }
}

json_serde!(Pick);

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn pick() -> Pick {
        Pick::new(
            "12GFH48776857",
            Site::new("BMN", "HHZ", "LB", "01"),
            Source::new("US", "TestAuthor"),
            "P",
            1500000000.0,
        )
    }

    #[test]
    fn minimal_json() {
        assert_eq!(
            pick().to_json(),
            json!({
                "Type": "Pick",
                "ID": "12GFH48776857",
                "Site": { "Station": "BMN", "Channel": "HHZ", "Network": "LB", "Location": "01" },
                "Source": { "AgencyID": "US", "Author": "TestAuthor" },
                "Time": "2017-07-14T02:40:00.000Z",
                "Phase": "P",
            })
        );
    }

    #[test]
    fn full_round_trip() {
        let mut pick = pick();
        pick.polarity = Some(Polarity::Up.into());
        pick.onset = Some(Onset::Questionable.into());
        pick.picker = Some(Picker::Manual.into());
        pick.event_type = Some(EventType::Earthquake.into());
        pick.magnitude = Some(2.14);
        pick.snr = Some(3.8);
        pick.zscore = Some(0.0);
        pick.detection_threshold = Some(1.5);
        pick.threshold_type = Some(ThresholdType::Minimum.into());
        pick.association_info = Some(Associated::new("P", 0.44, 0.42, -0.02, 0.08));
        let parsed = Pick::from_json(&pick.to_json()).unwrap();
        assert_eq!(parsed, pick);
        assert!(parsed.is_valid());
    }

    #[test]
    fn empty_association_is_dropped() {
        let mut pick = pick();
        pick.association_info = Some(Associated::default());
        assert!(pick.to_json().get("AssociationInfo").is_none());
        assert!(pick.is_valid());
    }

    #[test]
    fn defects() {
        let mut pick = pick();
        pick.phase.clear();
        pick.polarity = Some("sideways".to_string());
        pick.magnitude = Some(11.0);
        pick.association_info = Some(Associated {
            distance: Some(200.0),
            ..Default::default()
        });
        assert_eq!(
            pick.validate(),
            vec![
                "Empty Phase in pick class.",
                "Invalid Polarity in pick class.",
                "Invalid Magnitude in pick class.",
                "AssociationInfo object did not validate in pick class.",
            ]
        );
    }

    #[test]
    fn lenient_parse() {
        let pick = Pick::from_json(&json!({
            "Type": "Pick",
            "ID": 42,
            "Site": "BMN",
            "Phase": "S",
            "SNR": "loud",
        }))
        .unwrap();
        assert_eq!(pick.id, "");
        assert_eq!(pick.site, Site::default());
        assert_eq!(pick.snr, None);
        assert_eq!(
            pick.validate(),
            vec![
                "Empty ID in pick class.",
                "Site object did not validate in pick class.",
                "Source object did not validate in pick class.",
                "No Time in pick class.",
            ]
        );
    }

    #[test]
    fn bad_time_fails() {
        let err = Pick::from_json(&json!({ "Type": "Pick", "Time": "noon" })).unwrap_err();
        assert!(format!("{:#}", err).contains("Time"));
    }
}
