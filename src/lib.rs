#![deny(unsafe_code)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

use serde_json::Value;

pub use associated::Associated;
pub use beam::Beam;
pub use correlation::Correlation;
pub use data::DetectionData;
pub use detection::Detection;
pub use hypocenter::Hypocenter;
pub use message::Message;
pub use origin::Origin;
pub use pick::Pick;
pub use site::Site;
pub use source::Source;
pub use types::{EventType, Onset, OriginType, Picker, Polarity, ThresholdType};

#[macro_use]
mod codec;
mod validation;

mod associated;
mod hypocenter;
mod site;
mod source;

mod beam;
mod correlation;
mod pick;

mod data;
mod detection;
mod message;
mod origin;

pub mod time;
pub mod types;

/// JSON key holding the discriminator of every record.
pub const TYPE_KEY: &str = "Type";

/// Conversion between a value and its JSON object form.
///
/// Reading is lenient: a key is used only when it is present and holds the
/// expected JSON type, anything else leaves the field absent. The single
/// hard failure is a time string that cannot be decoded.
pub trait JsonObject: Sized {
    /// Build the JSON object for this value. Absent fields are left out.
    fn to_json(&self) -> Value;

    /// Read a value back from a JSON object.
    fn from_json(json: &Value) -> anyhow::Result<Self>;
}

/// Semantic checks, reported as human readable defects.
pub trait Validate {
    /// Every defect found, in field order. Empty means valid.
    fn validate(&self) -> Vec<String>;

    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

/// A top level message, identified on the wire by its `"Type"` key.
pub trait Record: JsonObject + Validate {
    /// Value of the `"Type"` key.
    const TYPE: &'static str;
}
