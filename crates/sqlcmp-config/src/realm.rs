use serde::{Deserialize, Serialize};

///
/// RealmConfig
///
/// Authentication realm record: the validator to instantiate and the flat
/// property list handed to it.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RealmConfig {
    pub name: String,
    pub validator_class: String,
    #[serde(default, rename = "property")]
    pub properties: Vec<PropertyConfig>,
}

impl RealmConfig {
    #[must_use]
    pub fn new(name: impl Into<String>, validator_class: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            validator_class: validator_class.into(),
            properties: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push(PropertyConfig {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Value of the last property declared under `name`.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .rev()
            .find(|property| property.name == name)
            .map(|property| property.value.as_str())
    }
}

///
/// PropertyConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyConfig {
    pub name: String,
    pub value: String,
}
