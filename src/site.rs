use serde_json::Value;

use crate::codec::{optional, Reader, Writer};
use crate::validation::Defects;
use crate::{JsonObject, Validate};

const STATION_KEY: &str = "Station";
const CHANNEL_KEY: &str = "Channel";
const NETWORK_KEY: &str = "Network";
const LOCATION_KEY: &str = "Location";

/// A recording site, in SEED naming. Station and network are required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Site {
    pub station: String,
    pub channel: Option<String>,
    pub network: String,
    pub location: Option<String>,
}

impl Site {
    /// Empty `channel` or `location` leaves that field absent.
    pub fn new(station: &str, channel: &str, network: &str, location: &str) -> Self {
        Self {
            station: station.to_string(),
            channel: optional(channel),
            network: network.to_string(),
            location: optional(location),
        }
    }

    /// `NET.STA.CHAN.LOC`, with `--` for a missing location.
    pub fn scnl(&self) -> String {
        format!(
            "{}.{}.{}.{}",
            self.network,
            self.station,
            self.channel.as_deref().filter(|c| !c.is_empty()).unwrap_or(""),
            self.location.as_deref().filter(|l| !l.is_empty()).unwrap_or("--")
        )
    }
}

impl JsonObject for Site {
    fn to_json(&self) -> Value {
        Writer::new()
            .string(STATION_KEY, &self.station)
            .opt_string(CHANNEL_KEY, &self.channel)
            .string(NETWORK_KEY, &self.network)
            .opt_string(LOCATION_KEY, &self.location)
            .finish()
    }

    fn from_json(json: &Value) -> anyhow::Result<Self> {
        let reader = Reader::new(json, "site")?;
        Ok(Self {
            station: reader.required_string(STATION_KEY),
            channel: reader.string(CHANNEL_KEY),
            network: reader.required_string(NETWORK_KEY),
            location: reader.string(LOCATION_KEY),
        })
    }
}

impl Validate for Site {
    fn validate(&self) -> Vec<String> {
        let mut defects = Defects::new("site");
        defects.required_string(&self.station, "Station");
        defects.required_string(&self.network, "Network");
        defects.finish()
    }
}

json_serde!(Site);
