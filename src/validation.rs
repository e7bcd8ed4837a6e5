use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::{codec::present, time, Validate};

pub(crate) const LATITUDE: RangeInclusive<f64> = -90.0..=90.0;
pub(crate) const LONGITUDE: RangeInclusive<f64> = -180.0..=180.0;
pub(crate) const DEPTH: RangeInclusive<f64> = -100.0..=1500.0;
pub(crate) const AZIMUTH: RangeInclusive<f64> = 0.0..=360.0;
pub(crate) const DISTANCE: RangeInclusive<f64> = 0.0..=180.0;
pub(crate) const MAGNITUDE: RangeInclusive<f64> = -2.0..=10.0;
pub(crate) const COEFFICIENT: RangeInclusive<f64> = -1.0..=1.0;
pub(crate) const RMS: RangeInclusive<f64> = -10000.0..=f64::INFINITY;
pub(crate) const NON_NEGATIVE: RangeInclusive<f64> = 0.0..=f64::INFINITY;

/// Collects the defects of one object, phrased as
/// `"<problem> in <class> class."`.
pub(crate) struct Defects {
    class: &'static str,
    list: Vec<String>,
}

impl Defects {
    pub fn new(class: &'static str) -> Self {
        Self {
            class,
            list: Vec::new(),
        }
    }

    pub fn push(&mut self, problem: &str) {
        self.list.push(format!("{} in {} class.", problem, self.class));
    }

    pub fn required_string(&mut self, value: &str, field: &str) {
        if value.is_empty() {
            self.push(&format!("Empty {}", field));
        }
    }

    pub fn required_number(&mut self, value: Option<f64>, field: &str, range: RangeInclusive<f64>) {
        match value.filter(|v| !v.is_nan()) {
            None => self.push(&format!("No {}", field)),
            Some(v) if !range.contains(&v) => self.push(&format!("Invalid {}", field)),
            Some(_) => {}
        }
    }

    pub fn optional_number(&mut self, value: Option<f64>, field: &str, range: RangeInclusive<f64>) {
        if let Some(v) = value.filter(|v| !v.is_nan()) {
            if !range.contains(&v) {
                self.push(&format!("Invalid {}", field));
            }
        }
    }

    /// Present, and encodes to a well-formed wire timestamp.
    pub fn required_time(&mut self, value: Option<f64>, field: &str) {
        let epoch = match value.filter(|v| !v.is_nan()) {
            Some(epoch) => epoch,
            None => return self.push(&format!("No {}", field)),
        };
        match time::round_trips(epoch) {
            Ok(true) => {}
            Ok(false) => self.push(&format!("{} did not validate", field)),
            Err(e) => self.push(&format!("{} did not validate ({})", field, e)),
        }
    }

    /// A discriminator read off the wire must match the record's own.
    /// `None` stands for a record built in memory.
    pub fn discriminator(&mut self, value: Option<&str>, expected: &str) {
        match value {
            None => {}
            Some("") => self.push("No Type"),
            Some(t) if t == expected => {}
            Some(_) => self.push(&format!("Non-{} type", self.class)),
        }
    }

    /// A non-empty value must name a member of `E`.
    pub fn enumerated<E: FromStr>(&mut self, value: &Option<String>, field: &str) {
        if let Some(text) = present(value) {
            if text.parse::<E>().is_err() {
                self.push(&format!("Invalid {}", field));
            }
        }
    }

    pub fn nested<T: Validate>(&mut self, value: &T, field: &str) {
        if !value.is_valid() {
            self.push(&format!("{} object did not validate", field));
        }
    }

    /// One defect per invalid element, naming only the element kind.
    pub fn each<T: Validate>(&mut self, values: &[T], kind: &str) {
        for value in values.iter().filter(|v| !v.is_valid()) {
            log::debug!("{} {} failed validation: {:?}", self.class, kind, value.validate());
            self.push(&format!("Invalid {}", kind));
        }
    }

    pub fn finish(self) -> Vec<String> {
        self.list
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::EventType;

    #[test]
    fn messages() {
        let mut defects = Defects::new("origin");
        defects.required_string("", "ID");
        defects.required_number(None, "Latitude", LATITUDE);
        defects.required_number(Some(f64::NAN), "Longitude", LONGITUDE);
        defects.required_number(Some(2000.0), "Depth", DEPTH);
        defects.optional_number(None, "Gap", AZIMUTH);
        defects.optional_number(Some(400.0), "Gap", AZIMUTH);
        defects.enumerated::<EventType>(&Some("meteor".to_string()), "EventType");
        defects.enumerated::<EventType>(&Some(String::new()), "EventType");
        defects.required_time(None, "Time");
        assert_eq!(
            defects.finish(),
            vec![
                "Empty ID in origin class.",
                "No Latitude in origin class.",
                "No Longitude in origin class.",
                "Invalid Depth in origin class.",
                "Invalid Gap in origin class.",
                "Invalid EventType in origin class.",
                "No Time in origin class.",
            ]
        );
    }

    #[test]
    fn time_out_of_wire_range() {
        let mut defects = Defects::new("pick");
        defects.required_time(Some(1500000000.0), "Time");
        assert!(defects.list.is_empty());
        // year 10000 has no four digit form
        defects.required_time(Some(253402300800.0), "Time");
        assert_eq!(defects.finish(), vec!["Time did not validate in pick class."]);
    }

    #[test]
    fn time_finer_than_a_millisecond() {
        let mut defects = Defects::new("hypocenter");
        defects.required_time(Some(1500000000.001), "Time");
        defects.required_time(Some(1500000000.0004), "Time");
        assert_eq!(defects.finish(), vec!["Time did not validate in hypocenter class."]);
    }

    #[test]
    fn discriminator() {
        let mut defects = Defects::new("origin");
        defects.discriminator(None, "Origin");
        defects.discriminator(Some("Origin"), "Origin");
        defects.discriminator(Some(""), "Origin");
        defects.discriminator(Some("Detection"), "Origin");
        assert_eq!(
            defects.finish(),
            vec!["No Type in origin class.", "Non-origin type in origin class."]
        );
    }
}
