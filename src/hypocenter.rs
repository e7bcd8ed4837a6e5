use serde_json::Value;

use crate::codec::{Reader, Writer};
use crate::validation::{Defects, DEPTH, LATITUDE, LONGITUDE, NON_NEGATIVE};
use crate::{JsonObject, Validate};

const LATITUDE_KEY: &str = "Latitude";
const LONGITUDE_KEY: &str = "Longitude";
const TIME_KEY: &str = "Time";
const DEPTH_KEY: &str = "Depth";
const LATITUDEERROR_KEY: &str = "LatitudeError";
const LONGITUDEERROR_KEY: &str = "LongitudeError";
const TIMEERROR_KEY: &str = "TimeError";
const DEPTHERROR_KEY: &str = "DepthError";

/// An earthquake location: position in degrees, depth in kilometers and
/// origin time in epoch seconds, with optional one sigma errors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hypocenter {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub time: Option<f64>,
    pub depth: Option<f64>,
    pub latitude_error: Option<f64>,
    pub longitude_error: Option<f64>,
    pub time_error: Option<f64>,
    pub depth_error: Option<f64>,
}

impl Hypocenter {
    pub fn new(latitude: f64, longitude: f64, time: f64, depth: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
            time: Some(time),
            depth: Some(depth),
            ..Default::default()
        }
    }
}

impl JsonObject for Hypocenter {
    fn to_json(&self) -> Value {
        Writer::new()
            .number(LATITUDE_KEY, self.latitude)
            .number(LONGITUDE_KEY, self.longitude)
            .time(TIME_KEY, self.time)
            .number(DEPTH_KEY, self.depth)
            .number(LATITUDEERROR_KEY, self.latitude_error)
            .number(LONGITUDEERROR_KEY, self.longitude_error)
            .number(TIMEERROR_KEY, self.time_error)
            .number(DEPTHERROR_KEY, self.depth_error)
            .finish()
    }

    fn from_json(json: &Value) -> anyhow::Result<Self> {
        let reader = Reader::new(json, "hypocenter")?;
        Ok(Self {
            latitude: reader.number(LATITUDE_KEY),
            longitude: reader.number(LONGITUDE_KEY),
            time: reader.time(TIME_KEY)?,
            depth: reader.number(DEPTH_KEY),
            latitude_error: reader.number(LATITUDEERROR_KEY),
            longitude_error: reader.number(LONGITUDEERROR_KEY),
            time_error: reader.number(TIMEERROR_KEY),
            depth_error: reader.number(DEPTHERROR_KEY),
        })
    }
}

impl Validate for Hypocenter {
    fn validate(&self) -> Vec<String> {
        let mut defects = Defects::new("hypocenter");
        defects.required_number(self.latitude, "Latitude", LATITUDE);
        defects.required_number(self.longitude, "Longitude", LONGITUDE);
        defects.required_time(self.time, "Time");
        defects.required_number(self.depth, "Depth", DEPTH);
        defects.optional_number(self.latitude_error, "LatitudeError", NON_NEGATIVE);
        defects.optional_number(self.longitude_error, "LongitudeError", NON_NEGATIVE);
        defects.optional_number(self.time_error, "TimeError", NON_NEGATIVE);
        defects.optional_number(self.depth_error, "DepthError", NON_NEGATIVE);
        defects.finish()
    }
}

json_serde!(Hypocenter);

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn json() {
        let mut hypo = Hypocenter::new(40.3344, -121.44, 1500000000.0, 32.44);
        hypo.depth_error = Some(2.1);
        let json = hypo.to_json();
        assert_eq!(
            json,
            json!({
                "Latitude": 40.3344,
                "Longitude": -121.44,
                "Time": "2017-07-14T02:40:00.000Z",
                "Depth": 32.44,
                "DepthError": 2.1,
            })
        );
        assert_eq!(Hypocenter::from_json(&json).unwrap(), hypo);
        assert!(hypo.is_valid());
    }

    #[test]
    fn ranges() {
        let mut hypo = Hypocenter::new(91.0, -121.44, 1500000000.0, 32.44);
        hypo.latitude_error = Some(-1.0);
        assert_eq!(
            hypo.validate(),
            vec![
                "Invalid Latitude in hypocenter class.",
                "Invalid LatitudeError in hypocenter class."
            ]
        );
        assert_eq!(Hypocenter::default().validate().len(), 4);
    }
}
