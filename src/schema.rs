//! Protocol description model: domains of types, commands, and events.
//!
//! Mirrors the JSON form of the protocol description (`{"domains": [...]}`).
//! A [`Type`] carries either a `type` kind or a `$ref` to another declaration;
//! commands and events are lowered to synthetic object types before emission
//! so the declaration emitter has a single code path.

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Root of a protocol description file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Protocol {
    pub version: Option<Version>,
    pub domains: Vec<Domain>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Version {
    pub major: String,
    pub minor: String,
}

/// A named grouping of related type, command, and event declarations.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Domain {
    pub domain: String,
    pub description: Option<String>,
    pub types: Vec<Type>,
    pub commands: Vec<Command>,
    pub events: Vec<Event>,
}

/// Primitive and composite kinds a type descriptor may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    String,
    Integer,
    Number,
    Boolean,
    Binary,
    Object,
    Array,
    Any,
}

/// One type descriptor: a top-level declaration (with `id`) or a field of an
/// object (with `name`). Exactly one of `kind` / `reference` is expected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Type {
    /// Declared name for top-level types.
    pub id: Option<String>,
    /// Field name when this descriptor is an object property.
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<Kind>,
    /// Reference to another declaration: `Name` or `Domain.Name`.
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    pub description: Option<String>,
    pub optional: bool,
    /// Object fields, in declaration order. Order is preserved verbatim in
    /// the emitted struct and in field-by-field serialization.
    pub properties: Option<Vec<Type>>,
    /// Element type for array kind.
    pub items: Option<Box<Type>>,
    /// Closed enumeration values, in declaration order.
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<String>>,
    /// Integer enums: assign power-of-two flags instead of sequential values.
    #[serde(rename = "enumBitMask")]
    pub enum_bitmask: bool,
    /// Hand-authored source appended verbatim after the generated code.
    pub extra: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Command {
    pub name: String,
    pub description: Option<String>,
    pub parameters: Vec<Type>,
    pub returns: Vec<Type>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Event {
    pub name: String,
    pub description: Option<String>,
    pub parameters: Vec<Type>,
}

impl Protocol {
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("failed to read protocol file {:?}: {}", path.as_ref(), e)
        })?;
        Ok(Self::from_json(&content)?)
    }
}

impl Type {
    /// Synthetic object type wrapping a command/event parameter list.
    fn synthetic(name: &str, description: Option<&str>, fields: &[Type]) -> Type {
        Type {
            id: Some(name.to_string()),
            kind: Some(Kind::Object),
            description: description.map(str::to_string),
            properties: Some(fields.to_vec()),
            ..Type::default()
        }
    }
}

impl Command {
    /// Object type for this command's parameters. Emitted with a `Params`
    /// name suffix.
    pub fn params_type(&self) -> Type {
        Type::synthetic(&self.name, self.description.as_deref(), &self.parameters)
    }

    /// Object type for this command's return values, if any. Emitted with a
    /// `Returns` name suffix.
    pub fn returns_type(&self) -> Option<Type> {
        if self.returns.is_empty() {
            return None;
        }
        Some(Type::synthetic(
            &self.name,
            self.description.as_deref(),
            &self.returns,
        ))
    }
}

impl Event {
    /// Object type for this event's parameters. Emitted with an `Event` name
    /// prefix.
    pub fn params_type(&self) -> Type {
        Type::synthetic(&self.name, self.description.as_deref(), &self.parameters)
    }
}

impl Domain {
    /// Output package name for this domain (lowercased domain name).
    pub fn package_name(&self) -> String {
        self.domain.to_ascii_lowercase()
    }

    pub fn find_type(&self, name: &str) -> Option<&Type> {
        self.types.iter().find(|t| t.id.as_deref() == Some(name))
    }
}
