use serde_json::Value;

use crate::codec::{Reader, Writer};
use crate::validation::{Defects, AZIMUTH, DISTANCE, NON_NEGATIVE};
use crate::{JsonObject, Validate};

const PHASE_KEY: &str = "Phase";
const DISTANCE_KEY: &str = "Distance";
const AZIMUTH_KEY: &str = "Azimuth";
const RESIDUAL_KEY: &str = "Residual";
const SIGMA_KEY: &str = "Sigma";

/// How a detection was associated with an event. Every field is optional;
/// a value with none of them set is treated as no association at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Associated {
    pub phase: Option<String>,
    /// Station to event distance in degrees.
    pub distance: Option<f64>,
    /// Event to station azimuth in degrees.
    pub azimuth: Option<f64>,
    /// Travel time residual in seconds.
    pub residual: Option<f64>,
    /// Standard deviations of the residual.
    pub sigma: Option<f64>,
}

impl Associated {
    pub fn new(phase: &str, distance: f64, azimuth: f64, residual: f64, sigma: f64) -> Self {
        Self {
            phase: crate::codec::optional(phase),
            distance: Some(distance),
            azimuth: Some(azimuth),
            residual: Some(residual),
            sigma: Some(sigma),
        }
    }

    pub fn is_empty(&self) -> bool {
        crate::codec::present(&self.phase).is_none()
            && [self.distance, self.azimuth, self.residual, self.sigma]
                .iter()
                .all(|v| v.map_or(true, f64::is_nan))
    }
}

impl JsonObject for Associated {
    fn to_json(&self) -> Value {
        Writer::new()
            .opt_string(PHASE_KEY, &self.phase)
            .number(DISTANCE_KEY, self.distance)
            .number(AZIMUTH_KEY, self.azimuth)
            .number(RESIDUAL_KEY, self.residual)
            .number(SIGMA_KEY, self.sigma)
            .finish()
    }

    fn from_json(json: &Value) -> anyhow::Result<Self> {
        let reader = Reader::new(json, "associated")?;
        Ok(Self {
            phase: reader.string(PHASE_KEY),
            distance: reader.number(DISTANCE_KEY),
            azimuth: reader.number(AZIMUTH_KEY),
            residual: reader.number(RESIDUAL_KEY),
            sigma: reader.number(SIGMA_KEY),
        })
    }
}

impl Validate for Associated {
    fn validate(&self) -> Vec<String> {
        let mut defects = Defects::new("associated");
        defects.optional_number(self.distance, "Distance", DISTANCE);
        defects.optional_number(self.azimuth, "Azimuth", AZIMUTH);
        defects.optional_number(self.sigma, "Sigma", NON_NEGATIVE);
        defects.finish()
    }
}

json_serde!(Associated);

/// Shared handling of the optional `AssociationInfo` member of detections.
pub(crate) fn association(value: &Option<Associated>) -> Option<&Associated> {
    value.as_ref().filter(|a| !a.is_empty())
}
