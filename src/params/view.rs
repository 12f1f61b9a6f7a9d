use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::{ParameterError, Result};

use super::set::serialize_number;
use super::{ParameterSet, MEASUREMENT_UNIT};

/// One row of the numeric input surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterField {
    pub name: String,
    pub label: String,
    /// Display value (raw × 10).
    pub value: f64,
    pub unit: &'static str,
}

/// What the UI renders for a parameter store.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterView {
    pub fields: Vec<ParameterField>,
    /// Pretty-printed [`ParameterDocument`].
    pub json: String,
}

impl ParameterView {
    /// `(label, display value, unit)` triples in parameter order.
    pub fn triples(&self) -> impl Iterator<Item = (&str, f64, &str)> {
        self.fields
            .iter()
            .map(|f| (f.label.as_str(), f.value, f.unit))
    }
}

/// The serializable description of a shape's parameters:
/// `{"template": .., <params in order>.., "measurement_unit": "mm"}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDocument {
    pub template: String,
    pub parameters: ParameterSet,
    pub measurement_unit: String,
}

impl ParameterDocument {
    /// Serializes with two-space indentation.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::Json`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ParameterError::Json(e).into())
    }

    /// Parses a document produced by [`ParameterDocument::to_json_pretty`].
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`] if the text is not a JSON object, if
    /// `template` is missing or not a string, if any parameter is not a
    /// number, or if the measurement unit is not millimetres.
    pub fn parse(json: &str) -> Result<Self> {
        let Value::Object(mut object) = serde_json::from_str::<Value>(json).map_err(ParameterError::Json)?
        else {
            return Err(ParameterError::Malformed("expected a JSON object".into()).into());
        };

        let template = match object.shift_remove("template") {
            Some(Value::String(name)) => name,
            _ => return Err(ParameterError::Malformed("missing template name".into()).into()),
        };
        let measurement_unit = match object.shift_remove("measurement_unit") {
            Some(Value::String(unit)) if unit == MEASUREMENT_UNIT => unit,
            Some(Value::String(unit)) => return Err(ParameterError::UnsupportedUnit(unit).into()),
            _ => return Err(ParameterError::Malformed("missing measurement_unit".into()).into()),
        };

        let mut parameters = ParameterSet::new();
        for (name, value) in object {
            let number = value
                .as_f64()
                .ok_or_else(|| ParameterError::Malformed(format!("parameter {name} is not a number")))?;
            parameters.insert(name, number);
        }

        Ok(Self {
            template,
            parameters,
            measurement_unit,
        })
    }
}

impl Serialize for ParameterDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.parameters.len() + 2))?;
        map.serialize_entry("template", &self.template)?;
        for (name, value) in self.parameters.iter() {
            serialize_number(&mut map, name, value)?;
        }
        map.serialize_entry("measurement_unit", &self.measurement_unit)?;
        map.end()
    }
}

/// Uppercases the first character of `name`.
pub(crate) fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
