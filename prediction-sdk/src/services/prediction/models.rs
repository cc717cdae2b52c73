//! Data models for the prediction service API

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Measurement fields the prediction service expects, in the order it reads them
pub const MEASUREMENT_FIELDS: [&str; 7] = [
    "N",
    "P",
    "K",
    "temperature",
    "humidity",
    "ph",
    "rainfall",
];

/// Failure message used when a reply carries neither an error nor a crop
pub const NO_CROP_MESSAGE: &str = "Prediction service returned no crop recommendation";

/// Field set submitted through the form, in submission order
///
/// Values stay as the submitted text. Lookups return the first occurrence of
/// a name. On the wire the measurement fields come first in canonical order,
/// followed by any extra fields, since the service reads values positionally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<(String, String)>")]
pub struct FormInput {
    fields: Vec<(String, String)>,
}

impl FormInput {
    /// Create an empty field set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// Builder-style append
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    /// Value of the first field with this name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether the user supplied a non-blank value for this field
    pub fn is_supplied(&self, name: &str) -> bool {
        self.get(name).map_or(false, |value| !value.trim().is_empty())
    }

    /// Iterate over fields in submission order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in wire order without duplicate names
    fn wire_fields(&self) -> Vec<(&str, &str)> {
        let mut out: Vec<(&str, &str)> = MEASUREMENT_FIELDS
            .iter()
            .filter_map(|name| self.get(name).map(|value| (*name, value)))
            .collect();

        for (name, value) in self.iter() {
            if !out.iter().any(|(seen, _)| *seen == name) {
                out.push((name, value));
            }
        }

        out
    }
}

impl From<Vec<(String, String)>> for FormInput {
    fn from(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormInput {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl Serialize for FormInput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = self.wire_fields();
        let mut map = serializer.serialize_map(Some(fields.len()))?;
        for (name, value) in fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Raw reply body of the prediction endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PredictionReply {
    #[serde(rename = "Crop", default)]
    pub crop: Option<String>,

    #[serde(rename = "Fertilizer", default)]
    pub fertilizer: Option<String>,

    /// AI-generated narrative about the crop
    #[serde(rename = "Gemini", default)]
    pub gemini: Option<String>,

    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

impl PredictionReply {
    /// Resolve the reply into exactly one outcome. A non-empty `Error` wins
    /// over any success fields sent alongside it.
    pub fn into_outcome(self) -> PredictionOutcome {
        if let Some(message) = non_blank(self.error) {
            return PredictionOutcome::Failure { message };
        }

        match non_blank(self.crop) {
            Some(crop) => PredictionOutcome::Success {
                crop,
                fertilizer: non_blank(self.fertilizer),
                narrative: non_blank(self.gemini),
            },
            None => PredictionOutcome::Failure {
                message: NO_CROP_MESSAGE.to_string(),
            },
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Interpreted result of a prediction call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictionOutcome {
    /// The service recommended a crop
    Success {
        crop: String,
        fertilizer: Option<String>,
        narrative: Option<String>,
    },
    /// The service answered but reported a logical error
    Failure { message: String },
}
