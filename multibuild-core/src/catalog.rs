//! The fixed, ordered set of build command lines offered to the user.
//!
//! Each entry adds flags on top of the previous one: parallelism, skipped
//! tests, skipped javadoc, skipped source jars.

use crate::error::RepositoryError;

/// Ordered mapping from small integer keys to build command lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildCommandCatalog {
    entries: Vec<(u8, String)>,
}

impl BuildCommandCatalog {
    /// Build a catalog from `(key, command)` pairs, kept in the given order.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (u8, S)>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(k, c)| (k, c.into())).collect(),
        }
    }

    /// The first entry: a plain full build with no extra flags.
    pub fn default_command(&self) -> &str {
        self.entries
            .first()
            .map(|(_, cmd)| cmd.as_str())
            .unwrap_or_default()
    }

    pub fn get(&self, key: u8) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, cmd)| cmd.as_str())
    }

    /// Like [`get`](Self::get), but reports the valid keys on a miss.
    pub fn resolve(&self, key: u8) -> Result<&str, RepositoryError> {
        self.get(key).ok_or_else(|| RepositoryError::UnknownCatalogKey {
            key,
            valid: self
                .keys()
                .map(|k| k.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }

    pub fn contains(&self, command: &str) -> bool {
        self.entries.iter().any(|(_, cmd)| cmd == command)
    }

    pub fn keys(&self) -> impl Iterator<Item = u8> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> {
        self.entries.iter().map(|(k, cmd)| (*k, cmd.as_str()))
    }
}

impl Default for BuildCommandCatalog {
    fn default() -> Self {
        Self::new([
            (1, "mvn clean install"),
            (2, "mvn clean install -T 4"),
            (3, "mvn clean install -T 4 -DskipTests"),
            (
                4,
                "mvn clean install -T 4 -DskipTests -Dmaven.javadoc.skip=true",
            ),
            (
                5,
                "mvn clean install -T 4 -DskipTests -Dmaven.javadoc.skip=true -Dmaven.source.skip=true",
            ),
        ])
    }
}
