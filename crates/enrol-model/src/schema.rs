//! Record schemas.
//!
//! A [`SchemaDefinition`] is the declarative JSON object an administrator
//! supplies (a minimal JSON-Schema "object" descriptor). It is checked once
//! and turned into a [`Schema`], which is what tables hold and validators
//! consume.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::fields;

/// Primitive type a declared property must hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    String,
    Integer,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "string" => Some(FieldType::String),
            "integer" => Some(FieldType::Integer),
            _ => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDefinition {
    #[serde(rename = "type")]
    pub kind: String,
}

impl PropertyDefinition {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }
}

/// Schema as written by hand, before it has been checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", default = "object_type")]
    pub kind: String,
    #[serde(default, with = "ordered_properties")]
    pub properties: Vec<(String, PropertyDefinition)>,
    #[serde(default)]
    pub required: Vec<String>,
}

fn object_type() -> String {
    "object".to_string()
}

/// A checked schema: declared property types plus the required field set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    title: Option<String>,
    description: Option<String>,
    properties: Vec<(String, FieldType)>,
    required: Vec<String>,
}

impl Schema {
    pub fn from_definition(definition: &SchemaDefinition) -> Result<Self, SchemaError> {
        if definition.kind != "object" {
            return Err(SchemaError::NotAnObject {
                found: definition.kind.clone(),
            });
        }
        let mut properties = Vec::with_capacity(definition.properties.len());
        let mut declared = BTreeSet::new();
        for (name, property) in &definition.properties {
            if !declared.insert(name.as_str()) {
                return Err(SchemaError::DuplicateProperty {
                    property: name.clone(),
                });
            }
            let field_type =
                FieldType::parse(&property.kind).ok_or_else(|| SchemaError::UnsupportedType {
                    property: name.clone(),
                    found: property.kind.clone(),
                })?;
            properties.push((name.clone(), field_type));
        }
        let mut seen = BTreeSet::new();
        for field in &definition.required {
            if !seen.insert(field.as_str()) {
                return Err(SchemaError::DuplicateRequired {
                    field: field.clone(),
                });
            }
            if !properties.iter().any(|(name, _)| name == field) {
                return Err(SchemaError::UndeclaredRequired {
                    field: field.clone(),
                });
            }
        }
        Ok(Self {
            title: definition.title.clone(),
            description: definition.description.clone(),
            properties,
            required: definition.required.clone(),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let definition: SchemaDefinition =
            serde_json::from_str(json).map_err(|error| SchemaError::Json {
                message: error.to_string(),
            })?;
        Self::from_definition(&definition)
    }

    /// The built-in schema for child registrations.
    pub fn registration() -> Self {
        let properties = fields::REQUIRED
            .iter()
            .map(|name| {
                let field_type = if *name == fields::AGE {
                    FieldType::Integer
                } else {
                    FieldType::String
                };
                ((*name).to_string(), field_type)
            })
            .collect();
        Self {
            title: Some("Record of children".to_string()),
            description: Some("This document records the details of a child".to_string()),
            properties,
            required: fields::REQUIRED.iter().map(|name| (*name).to_string()).collect(),
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn property(&self, name: &str) -> Option<FieldType> {
        self.properties
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, field_type)| *field_type)
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.property(name).is_some()
    }

    /// Declared properties in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, FieldType)> {
        self.properties
            .iter()
            .map(|(name, field_type)| (name.as_str(), *field_type))
    }

    pub fn property_names(&self) -> Vec<&str> {
        self.properties.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Declarative form of this schema, e.g. for printing.
    pub fn to_definition(&self) -> SchemaDefinition {
        SchemaDefinition {
            title: self.title.clone(),
            description: self.description.clone(),
            kind: object_type(),
            properties: self
                .properties
                .iter()
                .map(|(name, field_type)| {
                    (name.clone(), PropertyDefinition::new(field_type.as_str()))
                })
                .collect(),
            required: self.required.clone(),
        }
    }
}

/// (De)serializes `properties` as a JSON object while keeping document order.
mod ordered_properties {
    use std::fmt;

    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};

    use super::PropertyDefinition;

    pub fn serialize<S: Serializer>(
        properties: &[(String, PropertyDefinition)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(properties.len()))?;
        for (name, property) in properties {
            map.serialize_entry(name, property)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(String, PropertyDefinition)>, D::Error> {
        struct PropertiesVisitor;

        impl<'de> Visitor<'de> for PropertiesVisitor {
            type Value = Vec<(String, PropertyDefinition)>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of property name to definition")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut properties = Vec::new();
                while let Some((name, property)) =
                    access.next_entry::<String, PropertyDefinition>()?
                {
                    properties.push((name, property));
                }
                Ok(properties)
            }
        }

        deserializer.deserialize_map(PropertiesVisitor)
    }
}
