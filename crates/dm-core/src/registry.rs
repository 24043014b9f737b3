//! Data migration registry
//!
//! Loads every descriptor in a directory up front. A descriptor pointing at a
//! CSV that does not exist rejects the whole batch before any data is applied.

use crate::descriptor::DataMigration;
use crate::error::{CoreError, CoreResult};
use std::path::Path;

/// All data migration descriptors of a project
#[derive(Debug, Clone, Default)]
pub struct Registry {
    migrations: Vec<DataMigration>,
}

impl Registry {
    /// Build a registry from descriptors already in memory
    pub fn from_migrations(migrations: Vec<DataMigration>) -> Self {
        Self { migrations }
    }

    /// Read every non-directory file in `dir` as a descriptor
    ///
    /// Files are read in name order. Fails if any file cannot be decoded or
    /// if any descriptor references a CSV that does not exist.
    pub fn load(dir: &Path) -> CoreResult<Self> {
        if !dir.is_dir() {
            return Err(CoreError::DirectoryNotFound {
                path: dir.display().to_string(),
            });
        }

        let entries = std::fs::read_dir(dir).map_err(|e| CoreError::IoWithPath {
            path: dir.display().to_string(),
            source: e,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !path.is_dir() {
                paths.push(path);
            }
        }
        paths.sort();

        let migrations = paths
            .iter()
            .map(|p| DataMigration::load(p))
            .collect::<CoreResult<Vec<_>>>()?;

        for migration in &migrations {
            if !migration.csv_path().exists() {
                return Err(CoreError::CsvNotFound {
                    csv_path: migration.csv_path.clone(),
                    descriptor: migration.label(),
                });
            }
        }

        log::debug!(
            "Loaded {} data migrations from {}",
            migrations.len(),
            dir.display()
        );
        Ok(Self { migrations })
    }

    /// Versions of all descriptors in ascending order
    ///
    /// Fails on a non-numeric version or on two descriptors sharing a version.
    pub fn sorted_versions(&self) -> CoreResult<Vec<u64>> {
        let mut versions = self
            .migrations
            .iter()
            .map(|m| m.version_number())
            .collect::<CoreResult<Vec<_>>>()?;
        versions.sort_unstable();

        if let Some(dup) = versions.windows(2).find(|w| w[0] == w[1]) {
            return Err(CoreError::DuplicateVersion { version: dup[0] });
        }
        Ok(versions)
    }

    /// Greatest known version, or `None` for an empty registry
    pub fn latest_version(&self) -> CoreResult<Option<u64>> {
        Ok(self.sorted_versions()?.last().copied())
    }

    /// Descriptor for `version`
    ///
    /// Descriptors whose version does not parse never match.
    pub fn by_version(&self, version: u64) -> Option<&DataMigration> {
        self.migrations
            .iter()
            .find(|m| m.version_number().is_ok_and(|v| v == version))
    }

    /// Iterate over the descriptors in load order
    pub fn iter(&self) -> impl Iterator<Item = &DataMigration> {
        self.migrations.iter()
    }

    /// Number of descriptors
    pub fn len(&self) -> usize {
        self.migrations.len()
    }

    /// Whether the registry holds no descriptors
    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
