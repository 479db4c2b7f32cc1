use crate::error::{RelayError, Result};
use serde::{Deserialize, Serialize};

/// A user-submitted labeled example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRecord {
    pub query: String,
    pub label: String,
    pub language: Option<String>,
}

impl LabelRecord {
    /// Parse `query,label` or `query,label,language`.
    pub fn parse(data_point: &str) -> Result<Self> {
        let fields: Vec<&str> = data_point.split(',').collect();
        let (query, label, language) = match fields.as_slice() {
            [query, label] => (*query, *label, None),
            [query, label, language] => (*query, *label, Some(*language)),
            _ => {
                return Err(RelayError::InvalidRecord(format!(
                    "expected 2 or 3 comma separated fields, got {}",
                    fields.len()
                )))
            }
        };

        let record = LabelRecord {
            query: query.to_string(),
            label: label.to_string(),
            language: language.filter(|l| !l.is_empty()).map(str::to_string),
        };
        record.validate()?;
        Ok(record)
    }

    /// The on-disk format has no escaping, so tabs and line breaks are refused.
    pub fn validate(&self) -> Result<()> {
        if self.query.is_empty() || self.label.is_empty() {
            return Err(RelayError::InvalidRecord("query and label must be non-empty".to_string()));
        }
        let fields = [Some(&self.query), Some(&self.label), self.language.as_ref()];
        if fields
            .iter()
            .flatten()
            .any(|f| f.contains(['\t', '\n', '\r']))
        {
            return Err(RelayError::InvalidRecord("fields may not contain tabs or line breaks".to_string()));
        }
        Ok(())
    }

    /// One complete line: `query\tlabel\tlanguage\n`.
    pub fn to_line(&self) -> String {
        format!(
            "{}\t{}\t{}\n",
            self.query,
            self.label,
            self.language.as_deref().unwrap_or("")
        )
    }
}
