//! Output formatting tests for dump command.

#[cfg(test)]
mod tests {
    use super::super::DumpResult;
    use crate::types::SchemaSummary;
    use rstest::{fixture, rstest};

    const EMPTY_TABLE: &str = "Saved metadata for 0 schema(s) to metadata.json";

    const TABLE: &str = "\
Saved metadata for 1 schema(s) to metadata.json

  shop: 2 table(s), 5 column(s)";

    #[fixture]
    fn empty_result() -> DumpResult {
        DumpResult {
            output: "metadata.json".to_string(),
            schemas: vec![],
        }
    }

    #[fixture]
    fn result() -> DumpResult {
        DumpResult {
            output: "metadata.json".to_string(),
            schemas: vec![SchemaSummary {
                schema: "shop".to_string(),
                tables: 2,
                columns: 5,
            }],
        }
    }

    crate::output_table_test! {
        test_name: test_to_table_empty,
        fixture: empty_result,
        fixture_type: DumpResult,
        expected: EMPTY_TABLE,
    }

    crate::output_table_test! {
        test_name: test_to_table,
        fixture: result,
        fixture_type: DumpResult,
        expected: TABLE,
    }

    crate::output_table_contains_test! {
        test_name: test_format_toon_names_schema,
        fixture: result,
        fixture_type: DumpResult,
        format: Toon,
        contains: ["shop"],
    }
}
