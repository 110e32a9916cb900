use std::error::Error;

use serde::Serialize;
use tracing::info;

use super::GenerateCmd;
use crate::commands::{Execute, fetch_groups};
use crate::db::MetadataSource;
use crate::layout::{Document, RenderContext, render_sheet, timestamp_now};
use crate::types::SchemaSummary;
use crate::workbook::save_document;

/// Result of the generate command execution
#[derive(Debug, Serialize)]
pub struct GenerateResult {
    pub output: String,
    pub schemas: Vec<SchemaSummary>,
}

impl Execute for GenerateCmd {
    type Output = GenerateResult;

    fn execute(self) -> Result<Self::Output, Box<dyn Error>> {
        let (settings, mut source) = self.source.open()?;
        let ctx = RenderContext::new(settings.palette, settings.labels.clone(), timestamp_now());

        let (document, schemas) = build_document(&mut source, &settings.schemas, &ctx)?;
        save_document(&document, &self.output)?;

        Ok(GenerateResult {
            output: self.output.display().to_string(),
            schemas,
        })
    }
}

/// Query, group and render every schema onto its own sheet, in list order.
///
/// Any failure aborts the whole document; no partial document is returned.
pub fn build_document(
    source: &mut impl MetadataSource,
    schemas: &[String],
    ctx: &RenderContext,
) -> Result<(Document, Vec<SchemaSummary>), Box<dyn Error>> {
    let mut document = Document::new();
    let mut summaries = Vec::with_capacity(schemas.len());

    for schema in schemas {
        let groups = fetch_groups(source, schema)?;
        let summary = SchemaSummary::from_groups(schema, &groups);
        info!(schema = %schema, tables = summary.tables, columns = summary.columns, "rendering schema");

        document.push_sheet(render_sheet(schema, &groups, ctx)?)?;
        summaries.push(summary);
    }

    Ok((document, summaries))
}
