use std::error::Error;

use serde::Serialize;

use super::DescribeCmd;
use crate::commands::{Execute, fetch_groups};
use crate::types::TableGroup;

/// Tables of one schema, grouped and ordered the way they are rendered.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaDescription {
    pub schema: String,
    pub tables: Vec<TableGroup>,
}

/// Result of the describe command execution
#[derive(Debug, Default, Serialize)]
pub struct DescribeResult {
    pub schemas: Vec<SchemaDescription>,
}

impl Execute for DescribeCmd {
    type Output = DescribeResult;

    fn execute(self) -> Result<Self::Output, Box<dyn Error>> {
        let (settings, mut source) = self.source.open()?;

        let selected: Vec<&String> = match &self.schema {
            Some(name) => {
                let found = settings.schemas.iter().find(|s| *s == name);
                vec![found.ok_or_else(|| format!("Schema '{}' is not configured", name))?]
            }
            None => settings.schemas.iter().collect(),
        };

        let mut result = DescribeResult::default();
        for schema in selected {
            let tables = fetch_groups(&mut source, schema)?;
            result.schemas.push(SchemaDescription {
                schema: schema.clone(),
                tables,
            });
        }
        Ok(result)
    }
}
