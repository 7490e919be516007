use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("dataset label cannot be empty")]
    EmptyLabel,

    #[error("dataset data file cannot be empty")]
    EmptyDataFile,

    #[error("dataset {0} is configured more than once")]
    DuplicateDataset(DatasetCategory),

    #[error("dataset {0} has no configuration")]
    MissingDataset(DatasetCategory),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown dataset: {0}")]
pub struct UnknownDatasetError(pub String);

//
// ─── DATASET CATEGORY ──────────────────────────────────────────────────────────
//

/// Top-level grouping of questions with its own source file and progress map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DatasetCategory {
    CProgramming,
    ZohoDsa,
    Lld,
    ZohoDocs,
    LogicalCoding,
}

impl DatasetCategory {
    /// Every dataset, in load/display order.
    pub const ALL: [DatasetCategory; 5] = [
        DatasetCategory::CProgramming,
        DatasetCategory::ZohoDsa,
        DatasetCategory::Lld,
        DatasetCategory::ZohoDocs,
        DatasetCategory::LogicalCoding,
    ];

    /// Stable identifier used in persisted progress and page routes.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DatasetCategory::CProgramming => "c-programming",
            DatasetCategory::ZohoDsa => "zoho-dsa",
            DatasetCategory::Lld => "lld",
            DatasetCategory::ZohoDocs => "zoho-docs",
            DatasetCategory::LogicalCoding => "logical-coding",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for DatasetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetCategory {
    type Err = UnknownDatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|cat| cat.as_str() == trimmed)
            .ok_or_else(|| UnknownDatasetError(trimmed.to_owned()))
    }
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Static facts about one dataset: display label, curated question count and
/// the relative path of its JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetConfig {
    label: String,
    total: u32,
    data_file: String,
}

impl DatasetConfig {
    /// Creates a validated dataset configuration.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::EmptyLabel` or `CatalogError::EmptyDataFile` when
    /// either string is blank.
    pub fn new(
        label: impl Into<String>,
        total: u32,
        data_file: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let label = label.into().trim().to_owned();
        let data_file = data_file.into().trim().to_owned();
        if label.is_empty() {
            return Err(CatalogError::EmptyLabel);
        }
        if data_file.is_empty() {
            return Err(CatalogError::EmptyDataFile);
        }
        Ok(Self {
            label,
            total,
            data_file,
        })
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Known number of curated questions in the dataset.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn data_file(&self) -> &str {
        &self.data_file
    }
}

/// Configuration for every `DatasetCategory`.
///
/// Construction fails unless each category is configured exactly once, so
/// lookups never miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetCatalog {
    configs: Vec<DatasetConfig>,
}

impl DatasetCatalog {
    /// Build a catalog from per-dataset configuration.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateDataset` if a dataset appears twice and
    /// `CatalogError::MissingDataset` if one is absent.
    pub fn new(
        entries: impl IntoIterator<Item = (DatasetCategory, DatasetConfig)>,
    ) -> Result<Self, CatalogError> {
        let mut slots: Vec<Option<DatasetConfig>> = vec![None; DatasetCategory::ALL.len()];
        for (category, config) in entries {
            let slot = &mut slots[category.index()];
            if slot.is_some() {
                return Err(CatalogError::DuplicateDataset(category));
            }
            *slot = Some(config);
        }

        let mut configs = Vec::with_capacity(slots.len());
        for (category, slot) in DatasetCategory::ALL.into_iter().zip(slots) {
            configs.push(slot.ok_or(CatalogError::MissingDataset(category))?);
        }
        Ok(Self { configs })
    }

    #[must_use]
    pub fn config(&self, category: DatasetCategory) -> &DatasetConfig {
        &self.configs[category.index()]
    }

    #[must_use]
    pub fn label(&self, category: DatasetCategory) -> &str {
        self.config(category).label()
    }

    #[must_use]
    pub fn total(&self, category: DatasetCategory) -> u32 {
        self.config(category).total()
    }

    #[must_use]
    pub fn data_file(&self, category: DatasetCategory) -> &str {
        self.config(category).data_file()
    }

    /// Datasets with their configuration, in `DatasetCategory::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (DatasetCategory, &DatasetConfig)> + '_ {
        DatasetCategory::ALL.into_iter().zip(self.configs.iter())
    }
}

impl Default for DatasetCatalog {
    /// The curated datasets shipped with the site.
    fn default() -> Self {
        let builtin = |label: &str, total: u32, data_file: &str| DatasetConfig {
            label: label.to_owned(),
            total,
            data_file: data_file.to_owned(),
        };
        Self {
            configs: vec![
                builtin("C Programming", 22, "data/c-questions.json"),
                builtin("Zoho DSA", 50, "data/dsa-questions.json"),
                builtin("Low Level Design", 18, "data/lld-questions.json"),
                builtin("Zoho-Docs Questions", 106, "data/zoho-docs.json"),
                builtin("Logical Coding", 30, "data/logical-coding.json"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_entries() -> Vec<(DatasetCategory, DatasetConfig)> {
        DatasetCategory::ALL
            .into_iter()
            .map(|cat| {
                (
                    cat,
                    DatasetConfig::new(cat.as_str(), 10, format!("data/{cat}.json")).unwrap(),
                )
            })
            .collect()
    }

    #[test]
    fn dataset_category_round_trips_through_str() {
        for cat in DatasetCategory::ALL {
            assert_eq!(cat.as_str().parse::<DatasetCategory>().unwrap(), cat);
        }
        assert!("frontend".parse::<DatasetCategory>().is_err());
    }

    #[test]
    fn dataset_category_serializes_kebab_case() {
        let json = serde_json::to_string(&DatasetCategory::CProgramming).unwrap();
        assert_eq!(json, "\"c-programming\"");
    }

    #[test]
    fn catalog_requires_every_dataset() {
        let mut entries = full_entries();
        entries.retain(|(cat, _)| *cat != DatasetCategory::Lld);
        assert_eq!(
            DatasetCatalog::new(entries),
            Err(CatalogError::MissingDataset(DatasetCategory::Lld))
        );
    }

    #[test]
    fn catalog_rejects_duplicates() {
        let mut entries = full_entries();
        entries.push(entries[0].clone());
        assert_eq!(
            DatasetCatalog::new(entries),
            Err(CatalogError::DuplicateDataset(DatasetCategory::CProgramming))
        );
    }

    #[test]
    fn catalog_lookups_follow_entries() {
        let catalog = DatasetCatalog::new(full_entries().into_iter().rev()).unwrap();
        assert_eq!(catalog.label(DatasetCategory::ZohoDocs), "zoho-docs");
        assert_eq!(catalog.data_file(DatasetCategory::Lld), "data/lld.json");
        let order: Vec<_> = catalog.iter().map(|(cat, _)| cat).collect();
        assert_eq!(order, DatasetCategory::ALL.to_vec());
    }

    #[test]
    fn config_rejects_blank_strings() {
        assert_eq!(
            DatasetConfig::new("  ", 1, "a.json"),
            Err(CatalogError::EmptyLabel)
        );
        assert_eq!(
            DatasetConfig::new("A", 1, ""),
            Err(CatalogError::EmptyDataFile)
        );
    }

    #[test]
    fn default_catalog_has_curated_totals() {
        let catalog = DatasetCatalog::default();
        assert_eq!(catalog.total(DatasetCategory::CProgramming), 22);
        assert_eq!(catalog.total(DatasetCategory::ZohoDsa), 50);
        assert_eq!(catalog.total(DatasetCategory::Lld), 18);
        assert_eq!(catalog.label(DatasetCategory::Lld), "Low Level Design");
    }
}
