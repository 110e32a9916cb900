//! Output formatting for dump command results.

use super::execute::DumpResult;
use crate::output::{Outputable, format_summaries};

impl Outputable for DumpResult {
    fn to_table(&self) -> String {
        let mut lines = vec![format!(
            "Saved metadata for {} schema(s) to {}",
            self.schemas.len(),
            self.output
        )];
        if !self.schemas.is_empty() {
            lines.push(String::new());
            lines.extend(format_summaries(&self.schemas));
        }
        lines.join("\n")
    }
}
