use serde_json::Value;

use crate::codec::{Reader, Writer};
use crate::data::{self, DataSets, DATA_KEY};
use crate::types::{EventType, OriginType};
use crate::validation::{Defects, AZIMUTH, DEPTH, LATITUDE, LONGITUDE, NON_NEGATIVE, RMS};
use crate::{Beam, Correlation, DetectionData, JsonObject, Pick, Record, Source, Validate};

const ID_KEY: &str = "ID";
const SOURCE_KEY: &str = "Source";
const LATITUDE_KEY: &str = "Latitude";
const LONGITUDE_KEY: &str = "Longitude";
const TIME_KEY: &str = "Time";
const DEPTH_KEY: &str = "Depth";
const ORIGINTYPE_KEY: &str = "OriginType";
const EVENTTYPE_KEY: &str = "EventType";
const BAYES_KEY: &str = "Bayes";
const MINIMUMDISTANCE_KEY: &str = "MinimumDistance";
const RMS_KEY: &str = "RMS";
const GAP_KEY: &str = "Gap";

/// An earthquake origin: a location and origin time, together with the
/// picks, beams and correlations it was computed from.
///
/// ```
/// use detectionio::{JsonObject, Origin, Pick, Site, Source, Validate};
///
/// let mut origin = Origin::new("evid1", Source::new("US", "TestAuthor"), 35.0, -118.0, 1500000000.0, 10.0);
/// origin.pick_data.push(Pick::new(
///     "pick1",
///     Site::new("BMN", "HHZ", "LB", "01"),
///     Source::new("US", "TestAuthor"),
///     "P",
///     1500000005.0,
/// ));
/// let parsed = Origin::from_json(&origin.to_json()).unwrap();
/// assert_eq!(parsed, origin);
/// assert!(parsed.validate().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Origin {
    pub id: String,
    pub source: Source,
    /// Degrees, `[-90, 90]`.
    pub latitude: Option<f64>,
    /// Degrees, `[-180, 180]`.
    pub longitude: Option<f64>,
    /// Kilometers, `[-100, 1500]`.
    pub depth: Option<f64>,
    /// Origin time, epoch seconds.
    pub time: Option<f64>,
    /// See [`OriginType`].
    pub origin_type: Option<String>,
    /// See [`EventType`].
    pub event_type: Option<String>,
    pub bayes: Option<f64>,
    /// Degrees to the closest station.
    pub minimum_distance: Option<f64>,
    pub rms: Option<f64>,
    /// Largest azimuthal gap in station coverage, degrees.
    pub gap: Option<f64>,
    pub pick_data: Vec<Pick>,
    pub beam_data: Vec<Beam>,
    pub correlation_data: Vec<Correlation>,
    /// `"Type"` as read, kept only when it is not [`Record::TYPE`].
    wire_type: Option<String>,
}

impl Origin {
    pub fn new(
        id: &str,
        source: Source,
        latitude: f64,
        longitude: f64,
        time: f64,
        depth: f64,
    ) -> Self {
        Self {
            id: id.to_string(),
            source,
            latitude: Some(latitude),
            longitude: Some(longitude),
            depth: Some(depth),
            time: Some(time),
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

    /// `"Type"` this origin was read with, `"Origin"` unless parsed otherwise.
    pub fn type_name(&self) -> &str {
        self.wire_type.as_deref().unwrap_or(Self::TYPE)
    }
}

impl Record for Origin {
    const TYPE: &'static str = "Origin";
}

impl JsonObject for Origin {
    fn to_json(&self) -> Value {
        Writer::record(self.type_name())
            .string(ID_KEY, &self.id)
            .object(SOURCE_KEY, &self.source)
            .number(LATITUDE_KEY, self.latitude)
            .number(LONGITUDE_KEY, self.longitude)
            .number(DEPTH_KEY, self.depth)
            .time(TIME_KEY, self.time)
            .opt_string(ORIGINTYPE_KEY, &self.origin_type)
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
                log::warn!("Reading a {} message as an origin", other);
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
            latitude: reader.number(LATITUDE_KEY),
            longitude: reader.number(LONGITUDE_KEY),
            depth: reader.number(DEPTH_KEY),
            time: reader.time(TIME_KEY)?,
            origin_type: reader.string(ORIGINTYPE_KEY),
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

impl Validate for Origin {
    fn validate(&self) -> Vec<String> {
        let mut defects = Defects::new("origin");
        defects.discriminator(self.wire_type.as_deref(), Self::TYPE);
        defects.required_string(&self.id, "ID");
        defects.nested(&self.source, "Source");
        defects.required_number(self.latitude, "Latitude", LATITUDE);
        defects.required_number(self.longitude, "Longitude", LONGITUDE);
        defects.required_number(self.depth, "Depth", DEPTH);
        defects.required_time(self.time, "Time");
        defects.enumerated::<OriginType>(&self.origin_type, "OriginType");
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

json_serde!(Origin);
