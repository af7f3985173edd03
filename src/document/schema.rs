//! Field declarations

use odm_types::Value;

/// One declared field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub required: bool,
    pub default: Option<Value>,
}

/// Ordered field declarations for a document type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an optional field with no default.
    pub fn field(self, name: &str) -> Self {
        self.declare(name, false, None)
    }

    /// Declare a required field.
    pub fn required(self, name: &str) -> Self {
        self.declare(name, true, None)
    }

    /// Declare a field filled with `default` on construction.
    pub fn with_default(self, name: &str, default: impl Into<Value>) -> Self {
        self.declare(name, false, Some(default.into()))
    }

    /// Declare a field, replacing any earlier declaration of the same name.
    pub fn declare(mut self, name: &str, required: bool, default: Option<Value>) -> Self {
        let spec = FieldSpec {
            name: name.to_string(),
            required,
            default,
        };
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(existing) => *existing = spec,
            None => self.fields.push(spec),
        }
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}
