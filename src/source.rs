use serde_json::Value;

use crate::codec::{Reader, Writer};
use crate::validation::Defects;
use crate::{JsonObject, Validate};

const AGENCYID_KEY: &str = "AgencyID";
const AUTHOR_KEY: &str = "Author";

/// Who produced a message: the agency and the author (program or analyst)
/// within it. Both are required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Source {
    pub agency_id: String,
    pub author: String,
}

impl Source {
    pub fn new(agency_id: &str, author: &str) -> Self {
        Self {
            agency_id: agency_id.to_string(),
            author: author.to_string(),
        }
    }
}

impl JsonObject for Source {
    fn to_json(&self) -> Value {
        Writer::new()
            .string(AGENCYID_KEY, &self.agency_id)
            .string(AUTHOR_KEY, &self.author)
            .finish()
    }

    fn from_json(json: &Value) -> anyhow::Result<Self> {
        let reader = Reader::new(json, "source")?;
        Ok(Self {
            agency_id: reader.required_string(AGENCYID_KEY),
            author: reader.required_string(AUTHOR_KEY),
        })
    }
}

impl Validate for Source {
    fn validate(&self) -> Vec<String> {
        let mut defects = Defects::new("source");
        defects.required_string(&self.agency_id, "AgencyID");
        defects.required_string(&self.author, "Author");
        defects.finish()
    }
}

json_serde!(Source);
