//! Output formatting for generate command results.

use super::execute::GenerateResult;
use crate::output::{Outputable, format_summaries};

impl Outputable for GenerateResult {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Wrote {} ({} schema sheet(s))", self.output, self.schemas.len()));
        lines.push(String::new());
        lines.extend(format_summaries(&self.schemas));

        lines.join("\n")
    }
}
