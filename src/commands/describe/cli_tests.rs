//! CLI parsing tests for describe command using the test DSL.

#[cfg(test)]
mod tests {
    use crate::cli::Args;
    use clap::Parser;
    use rstest::rstest;
    use std::path::PathBuf;

    crate::cli_defaults_test! {
        command: "describe",
        variant: Describe,
        required_args: [],
        defaults: {
            source.settings: PathBuf::from("settings.json"),
            source.metadata: None,
            schema: None,
        },
    }

    crate::cli_option_test! {
        command: "describe",
        variant: Describe,
        test_name: test_with_schema,
        args: ["--schema", "shop"],
        field: schema,
        expected: Some("shop".to_string()),
    }

    crate::cli_option_test! {
        command: "describe",
        variant: Describe,
        test_name: test_with_short_settings,
        args: ["-s", "other.json"],
        field: source.settings,
        expected: PathBuf::from("other.json"),
    }

    crate::cli_error_test! {
        command: "describe",
        test_name: test_schema_requires_value,
        args: ["--schema"],
        message: "a value is required",
    }
}
