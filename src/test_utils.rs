//! Shared test utilities for execute tests.
//!
//! Execute tests run commands end to end against a metadata dump, so every
//! helper here writes files into a temporary directory the caller keeps alive.

use std::fs;
use std::path::PathBuf;

use tempfile::{TempDir, tempdir};

use crate::commands::SourceArgs;
use crate::fixtures;

/// Settings naming the `shop` and `audit` schemas of the fixture dump.
pub const SHOP_SETTINGS: &str = r#"{
    "system": "postgres",
    "host": "localhost",
    "port": 5432,
    "user": "docs",
    "password": "secret",
    "schemas": "shop, audit",
    "main_color": "BDD7EE",
    "sub_color": "DDEBF7",
    "language": "en"
}"#;

/// A temporary directory holding `settings.json` and `metadata.json`.
pub struct Workspace {
    pub dir: TempDir,
    pub settings: PathBuf,
    pub metadata: PathBuf,
}

impl Workspace {
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn source_args(&self) -> SourceArgs {
        SourceArgs {
            settings: self.settings.clone(),
            metadata: Some(self.metadata.clone()),
        }
    }
}

/// Create a workspace with the given settings and the shop fixture dump.
pub fn workspace_with_settings(settings: &str) -> Workspace {
    let dir = tempdir().expect("Failed to create temp dir");
    let settings_path = dir.path().join("settings.json");
    let metadata_path = dir.path().join("metadata.json");
    fs::write(&settings_path, settings).expect("Failed to write settings");
    fs::write(&metadata_path, fixtures::SHOP_DUMP).expect("Failed to write metadata dump");
    Workspace {
        dir,
        settings: settings_path,
        metadata: metadata_path,
    }
}

/// The standard workspace: shop settings plus the shop fixture dump.
pub fn shop_workspace() -> Workspace {
    workspace_with_settings(SHOP_SETTINGS)
}
