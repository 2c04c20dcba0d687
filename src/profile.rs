//! Applicant profiles replayed by the driver.
//!
//! A profile is a TOML file with a single `[fields]` table keyed by field name:
//!
//! ```toml
//! [fields]
//! full_name = "Ada Obi"
//! id_type = "passport"
//! pin = "1234"
//! agree_to_terms = true
//! ```

use std::path::Path;

use anyhow::{anyhow, bail, Context};
use ob_core::{FieldKey, FieldValue};

/// Field edits in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub fields: Vec<(FieldKey, FieldValue)>,
}

impl Profile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read profile: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid profile: {}", path.display()))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let document: toml::Value =
            toml::from_str(content).context("Failed to parse profile as TOML")?;
        let table = document
            .get("fields")
            .ok_or_else(|| anyhow!("missing [fields] table"))?
            .as_table()
            .ok_or_else(|| anyhow!("[fields] must be a table"))?;

        let mut fields = Vec::with_capacity(table.len());
        for (name, value) in table {
            let key: FieldKey = name.parse()?;
            let value = match value {
                toml::Value::String(text) => FieldValue::from(text.as_str()),
                toml::Value::Boolean(flag) => FieldValue::from(*flag),
                // Numbers are accepted for convenience and stored as text.
                toml::Value::Integer(number) => FieldValue::from(number.to_string()),
                other => bail!(
                    "field {name} must be a string, integer or boolean, got {}",
                    other.type_str()
                ),
            };
            fields.push((key, value));
        }
        fields.sort_by_key(|(key, _)| *key);

        Ok(Self { fields })
    }
}
