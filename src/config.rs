//! Settings file handling.
//!
//! Settings come either from a flat JSON file or from a settings workbook
//! (sheet `Settings`, values in column F). Both produce the same [`Settings`]:
//! connection parameters, the schema list and the two fill colors.

use std::fs;
use std::path::Path;

use calamine::{Data, Reader, Xlsx, open_workbook};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::{Color, Labels, Palette, SheetNameError, check_sheet_name, same_sheet_name};

/// Sheet of the settings workbook that holds the values.
const SETTINGS_SHEET: &str = "Settings";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Settings file not found: {path}")]
    NotFound { path: String },

    #[error("Failed to read settings file '{path}': {message}")]
    Unreadable { path: String, message: String },

    #[error("Invalid JSON in settings file '{path}': {message}")]
    InvalidJson { path: String, message: String },

    #[error("Unsupported settings file '{path}': expected .json, .xlsx or .xlsm")]
    UnsupportedFormat { path: String },

    #[error("Settings cell {cell} ({field}) is empty")]
    MissingCell { cell: &'static str, field: &'static str },

    #[error("No schema names configured")]
    EmptySchemaList,

    #[error("Schema '{name}' cannot be used as a sheet name: {source}")]
    InvalidSchemaName {
        name: String,
        #[source]
        source: SheetNameError,
    },

    #[error("Schema '{name}' is listed twice (as '{first}')")]
    DuplicateSchema { name: String, first: String },

    #[error("Invalid port '{value}'")]
    InvalidPort { value: String },

    #[error("Invalid {field}: {source}")]
    InvalidColor {
        field: &'static str,
        #[source]
        source: crate::layout::style::ColorParseError,
    },

    #[error("Unsupported label language '{value}' (expected 'ko' or 'en')")]
    UnsupportedLanguage { value: String },

    #[error("Unsupported database system '{system}' (supported: postgres, mysql)")]
    UnsupportedSystem { system: String },
}

/// Flat settings record as stored in the JSON settings file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsFile {
    pub system: String,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    /// Database to connect to. The server default is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    /// Comma-separated schema names.
    pub schemas: String,
    pub main_color: String,
    pub sub_color: String,
    /// Label language, `ko` (default) or `en`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Connection parameters for the metadata source.
#[derive(Clone)]
pub struct ConnectionSettings {
    pub system: String,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: Option<String>,
}

/// Database engines a live connection can be opened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseSystem {
    Postgres,
    Mysql,
}

impl ConnectionSettings {
    /// Engine named by the `system` setting, matched case-insensitively.
    pub fn database_system(&self) -> Result<DatabaseSystem, ConfigError> {
        match self.system.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(DatabaseSystem::Postgres),
            "mysql" | "mariadb" => Ok(DatabaseSystem::Mysql),
            _ => Err(ConfigError::UnsupportedSystem {
                system: self.system.clone(),
            }),
        }
    }
}

impl std::fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("system", &self.system)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .finish()
    }
}

/// Normalized settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub connection: ConnectionSettings,
    pub schemas: Vec<String>,
    pub palette: Palette,
    pub labels: Labels,
}

impl Settings {
    /// Load settings from a `.json` file or a settings workbook.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file doesn't exist or cannot be read
    /// - The JSON is invalid or a workbook cell is empty
    /// - The schema list is empty
    /// - A color, port or language value cannot be parsed
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let file = match extension.as_deref() {
            Some("json") => read_json(path)?,
            Some("xlsx") | Some("xlsm") => read_workbook(path)?,
            _ => {
                return Err(ConfigError::UnsupportedFormat {
                    path: path.display().to_string(),
                });
            }
        };

        file.into_settings()
    }
}

impl SettingsFile {
    /// Validate and normalize into [`Settings`].
    pub fn into_settings(self) -> Result<Settings, ConfigError> {
        let schemas = split_schemas(&self.schemas);
        if schemas.is_empty() {
            return Err(ConfigError::EmptySchemaList);
        }
        check_schema_names(&schemas)?;

        let palette = Palette {
            main: Color::parse(&self.main_color).map_err(|source| ConfigError::InvalidColor {
                field: "main_color",
                source,
            })?,
            sub: Color::parse(&self.sub_color).map_err(|source| ConfigError::InvalidColor {
                field: "sub_color",
                source,
            })?,
        };

        let labels = match self.language.as_deref().map(str::trim) {
            None | Some("") | Some("ko") => Labels::korean(),
            Some("en") => Labels::english(),
            Some(other) => {
                return Err(ConfigError::UnsupportedLanguage {
                    value: other.to_string(),
                });
            }
        };

        Ok(Settings {
            connection: ConnectionSettings {
                system: self.system,
                host: self.host,
                port: self.port,
                user: self.user,
                password: self.password,
                database: self.database.filter(|d| !d.trim().is_empty()),
            },
            schemas,
            palette,
            labels,
        })
    }
}

/// Split a comma-separated schema list, trimming names and dropping empty entries.
pub fn split_schemas(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Every schema becomes a sheet, so each name must be a valid, distinct sheet name.
fn check_schema_names(schemas: &[String]) -> Result<(), ConfigError> {
    for (index, name) in schemas.iter().enumerate() {
        check_sheet_name(name).map_err(|source| ConfigError::InvalidSchemaName {
            name: name.clone(),
            source,
        })?;
        if let Some(first) = schemas[..index].iter().find(|s| same_sheet_name(s, name)) {
            return Err(ConfigError::DuplicateSchema {
                name: name.clone(),
                first: first.clone(),
            });
        }
    }
    Ok(())
}

fn read_json(path: &Path) -> Result<SettingsFile, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    serde_json::from_str(&content).map_err(|e| ConfigError::InvalidJson {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Position of one value in the settings workbook.
struct SettingsCell {
    cell: &'static str,
    field: &'static str,
    row: u32,
    col: u32,
}

const fn column_f(cell: &'static str, field: &'static str, row: u32) -> SettingsCell {
    // Rows are 1-based as shown in the sheet, column F is index 5
    SettingsCell {
        cell,
        field,
        row: row - 1,
        col: 5,
    }
}

const SYSTEM_CELL: SettingsCell = column_f("F12", "system", 12);
const HOST_CELL: SettingsCell = column_f("F13", "host", 13);
const PORT_CELL: SettingsCell = column_f("F14", "port", 14);
const USER_CELL: SettingsCell = column_f("F15", "user", 15);
const PASSWORD_CELL: SettingsCell = column_f("F16", "password", 16);
const SCHEMAS_CELL: SettingsCell = column_f("F17", "schemas", 17);
const MAIN_COLOR_CELL: SettingsCell = column_f("F21", "main_color", 21);
const SUB_COLOR_CELL: SettingsCell = column_f("F22", "sub_color", 22);

fn read_workbook(path: &Path) -> Result<SettingsFile, ConfigError> {
    let unreadable = |message: String| ConfigError::Unreadable {
        path: path.display().to_string(),
        message,
    };

    let mut workbook = open_workbook::<Xlsx<_>, _>(path).map_err(|e| unreadable(e.to_string()))?;
    let range = workbook
        .worksheet_range(SETTINGS_SHEET)
        .map_err(|e| unreadable(format!("sheet '{}': {}", SETTINGS_SHEET, e)))?;

    let read = |cell: &SettingsCell| -> Result<String, ConfigError> {
        range
            .get_value((cell.row, cell.col))
            .and_then(cell_text)
            .ok_or(ConfigError::MissingCell {
                cell: cell.cell,
                field: cell.field,
            })
    };

    let port_text = read(&PORT_CELL)?;
    let port = port_text
        .parse::<u16>()
        .map_err(|_| ConfigError::InvalidPort { value: port_text })?;

    Ok(SettingsFile {
        system: read(&SYSTEM_CELL)?,
        host: read(&HOST_CELL)?,
        port,
        user: read(&USER_CELL)?,
        password: read(&PASSWORD_CELL)?,
        database: None,
        schemas: read(&SCHEMAS_CELL)?,
        main_color: read(&MAIN_COLOR_CELL)?,
        sub_color: read(&SUB_COLOR_CELL)?,
        language: None,
    })
}

/// Text of a workbook cell, `None` for empty cells.
fn cell_text(value: &Data) -> Option<String> {
    let text = match value {
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::DateTime(_) | Data::Error(_) | Data::Empty => return None,
    };
    (!text.is_empty()).then_some(text)
}
