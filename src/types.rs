//! Closed value sets of the enumerated string fields.
//!
//! Records keep these fields as plain strings so that unknown values survive
//! parsing and show up in `validate()`. The enums here define what counts
//! as a known value, and are convenient when building messages:
//!
//! ```
//! use detectionio::{EventType, Origin};
//!
//! let mut origin = Origin::default();
//! origin.event_type = Some(EventType::Blast.into());
//! assert_eq!(origin.event_type.as_deref(), Some("blast"));
//! ```

use std::{fmt, str::FromStr};

use anyhow::anyhow;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

macro_rules! value_set {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every member, in schema order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The wire spelling.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = anyhow::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(anyhow!("Unknown {} \"{}\"", stringify!($name), s)),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                value.as_str().to_string()
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let text = String::deserialize(deserializer)?;
                text.parse().map_err(de::Error::custom)
            }
        }
    };
}

value_set! {
    /// Kind of seismic event.
    EventType {
        Earthquake => "earthquake",
        Blast => "blast",
    }
}

value_set! {
    /// Lifecycle stage of an origin or detection message.
    OriginType {
        New => "New",
        Update => "Update",
        Final => "Final",
        Retract => "Retract",
    }
}

value_set! {
    /// How a detection threshold is applied.
    ThresholdType {
        Minimum => "minimum",
        Maximum => "maximum",
    }
}

value_set! {
    /// First motion of a pick.
    Polarity {
        Up => "up",
        Down => "down",
    }
}

value_set! {
    /// Onset quality of a pick.
    Onset {
        Impulsive => "impulsive",
        Emergent => "emergent",
        Questionable => "questionable",
    }
}

value_set! {
    /// Picker that produced a pick.
    Picker {
        Manual => "manual",
        Raypicker => "raypicker",
        Filterpicker => "filterpicker",
        Earthworm => "earthworm",
        Other => "other",
    }
}
