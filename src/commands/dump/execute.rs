use std::error::Error;

use serde::Serialize;
use tracing::info;

use super::DumpCmd;
use crate::commands::Execute;
use crate::db::{MetadataDump, MetadataSource, write_dump};
use crate::grouping::group_by_table;
use crate::types::SchemaSummary;

/// Result of the dump command execution
#[derive(Debug, Serialize)]
pub struct DumpResult {
    pub output: String,
    pub schemas: Vec<SchemaSummary>,
}

impl Execute for DumpCmd {
    type Output = DumpResult;

    fn execute(self) -> Result<Self::Output, Box<dyn Error>> {
        let (settings, mut source) = self.source.open()?;

        let mut dump = MetadataDump::new();
        let mut schemas = Vec::with_capacity(settings.schemas.len());
        for schema in &settings.schemas {
            let rows = source.fetch_columns(schema)?;
            schemas.push(SchemaSummary::from_groups(schema, &group_by_table(rows.clone())));
            dump.insert(schema.clone(), rows);
        }

        write_dump(&self.output, &dump)?;
        info!(path = %self.output.display(), schemas = dump.len(), "saved metadata dump");

        Ok(DumpResult {
            output: self.output.display().to_string(),
            schemas,
        })
    }
}
