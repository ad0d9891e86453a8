//! Formatter configuration.
//!
//! A configuration names the output (`db_name`, `base_folder`), the category
//! vocabulary, the admission thresholds, and the metadata copied verbatim
//! into the output document. It can be built in code or loaded from a YAML
//! or JSON file:
//!
//! ```yaml
//! db_name: boot_db
//! base_folder: out
//! categories:
//!   - {id: 1, name: shoe}
//!   - {id: 2, name: mug, supercategory: kitchen}
//! area_threshold: 25.0
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Mask2CocoError;
use crate::ir::{Category, DatasetInfo, License, LicenseId};
use crate::validation::ValidationThresholds;

/// What to do with a mask that does not fit its image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidMaskPolicy {
    /// Log a warning and skip the annotation.
    #[default]
    Skip,
    /// Abort the run with [`Mask2CocoError::InvalidMask`].
    Abort,
}

/// Configuration for one conversion run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormatterConfig {
    /// Base name of the output document, without `.json`.
    #[serde(default)]
    pub db_name: String,

    /// Root output directory.
    #[serde(default)]
    pub base_folder: PathBuf,

    /// Ordered category list; defines the name → id table.
    #[serde(default, alias = "object_category")]
    pub categories: Vec<Category>,

    #[serde(default = "default_area_threshold")]
    pub area_threshold: f64,

    #[serde(default = "default_min_box_size")]
    pub min_box_width: f64,

    #[serde(default = "default_min_box_size")]
    pub min_box_height: f64,

    #[serde(default)]
    pub info: DatasetInfo,

    #[serde(default = "default_licenses")]
    pub licenses: Vec<License>,

    /// License id written on every image record.
    #[serde(default = "default_image_license")]
    pub image_license: LicenseId,

    /// Fixed capture date for every image; the run's start time when unset.
    #[serde(default)]
    pub date_captured: Option<String>,

    #[serde(default)]
    pub invalid_mask_policy: InvalidMaskPolicy,

    /// Indent the output document.
    #[serde(default)]
    pub pretty: bool,
}

fn default_area_threshold() -> f64 {
    ValidationThresholds::default().area_threshold
}

fn default_min_box_size() -> f64 {
    ValidationThresholds::default().min_box_width
}

fn default_licenses() -> Vec<License> {
    vec![License::new(1u64, "")]
}

fn default_image_license() -> LicenseId {
    LicenseId::new(1)
}

impl Default for FormatterConfig {
    fn default() -> Self {
        let thresholds = ValidationThresholds::default();
        Self {
            db_name: String::new(),
            base_folder: PathBuf::new(),
            categories: Vec::new(),
            area_threshold: thresholds.area_threshold,
            min_box_width: thresholds.min_box_width,
            min_box_height: thresholds.min_box_height,
            info: DatasetInfo::default(),
            licenses: default_licenses(),
            image_license: default_image_license(),
            date_captured: None,
            invalid_mask_policy: InvalidMaskPolicy::default(),
            pretty: false,
        }
    }
}

impl FormatterConfig {
    /// Creates a configuration with default thresholds and metadata.
    pub fn new(
        db_name: impl Into<String>,
        base_folder: impl Into<PathBuf>,
        categories: Vec<Category>,
    ) -> Self {
        Self {
            db_name: db_name.into(),
            base_folder: base_folder.into(),
            categories,
            ..Default::default()
        }
    }

    /// Loads a configuration file; `.yaml`/`.yml` is parsed as YAML,
    /// anything else as JSON.
    ///
    /// Category entries lacking `name` or `id` fail here.
    pub fn load(path: &Path) -> Result<Self, Mask2CocoError> {
        let text = fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

        let parsed = if is_yaml {
            serde_yaml::from_str(&text).map_err(|e| e.to_string())
        } else {
            serde_json::from_str(&text).map_err(|e| e.to_string())
        };
        parsed.map_err(|message| Mask2CocoError::ConfigParse {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Fuzz-only entrypoint: parse YAML text and validate the result.
    #[cfg(feature = "fuzzing")]
    pub fn fuzz_parse_yaml(text: &str) -> Result<(), Mask2CocoError> {
        let config: Self = serde_yaml::from_str(text).map_err(|e| Mask2CocoError::ConfigParse {
            path: PathBuf::from("<fuzz>"),
            message: e.to_string(),
        })?;
        config.validate()
    }

    /// Checks required fields and value ranges.
    pub fn validate(&self) -> Result<(), Mask2CocoError> {
        if self.db_name.trim().is_empty() {
            return Err(Mask2CocoError::config("db_name must not be empty"));
        }
        if self.base_folder.as_os_str().is_empty() {
            return Err(Mask2CocoError::config("base_folder must not be empty"));
        }

        for (name, value) in [
            ("area_threshold", self.area_threshold),
            ("min_box_width", self.min_box_width),
            ("min_box_height", self.min_box_height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Mask2CocoError::config(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        let mut seen_ids = std::collections::HashSet::new();
        for category in &self.categories {
            if category.name.is_empty() {
                return Err(Mask2CocoError::config(format!(
                    "category {} has an empty name",
                    category.id
                )));
            }
            if !seen_ids.insert(category.id) {
                return Err(Mask2CocoError::config(format!(
                    "category id {} is used more than once",
                    category.id
                )));
            }
        }

        Ok(())
    }

    /// Thresholds used to admit annotations.
    pub fn thresholds(&self) -> ValidationThresholds {
        ValidationThresholds {
            area_threshold: self.area_threshold,
            min_box_width: self.min_box_width,
            min_box_height: self.min_box_height,
        }
    }

    /// `<base_folder>/images`
    pub fn image_folder_path(&self) -> PathBuf {
        self.base_folder.join("images")
    }

    /// `<base_folder>/<db_name>.json`
    pub fn json_file_path(&self) -> PathBuf {
        self.base_folder.join(format!("{}.json", self.db_name))
    }

    /// Creates the base and image folders if they do not exist.
    pub fn prepare_output_dirs(&self) -> Result<(), Mask2CocoError> {
        fs::create_dir_all(self.image_folder_path())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::CategoryId;

    fn sample() -> FormatterConfig {
        FormatterConfig::new("boot_db", "out", vec![Category::new(1u64, "shoe")])
    }

    #[test]
    fn test_defaults() {
        let config = sample();
        assert_eq!(config.area_threshold, 25.0);
        assert_eq!(config.min_box_width, 5.0);
        assert_eq!(config.min_box_height, 5.0);
        assert_eq!(config.licenses, vec![License::new(1u64, "")]);
        assert_eq!(config.image_license, LicenseId(1));
        assert_eq!(config.invalid_mask_policy, InvalidMaskPolicy::Skip);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_derived_paths() {
        let config = sample();
        assert_eq!(config.image_folder_path(), PathBuf::from("out/images"));
        assert_eq!(config.json_file_path(), PathBuf::from("out/boot_db.json"));
    }

    #[test]
    fn test_rejects_empty_db_name() {
        let mut config = sample();
        config.db_name = "  ".into();
        assert!(matches!(config.validate(), Err(Mask2CocoError::Config { .. })));
    }

    #[test]
    fn test_rejects_empty_base_folder() {
        let mut config = sample();
        config.base_folder = PathBuf::new();
        assert!(matches!(config.validate(), Err(Mask2CocoError::Config { .. })));
    }

    #[test]
    fn test_rejects_negative_threshold() {
        let mut config = sample();
        config.min_box_height = -1.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("min_box_height"));
    }

    #[test]
    fn test_rejects_duplicate_category_id() {
        let mut config = sample();
        config.categories.push(Category::new(1u64, "mug"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_yaml() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("config.yaml");
        fs::write(
            &path,
            "db_name: boot_db\nbase_folder: out\nobject_category:\n  - {id: 3, name: shoe}\narea_threshold: 10\ninvalid_mask_policy: abort\n",
        )
        .unwrap();

        let config = FormatterConfig::load(&path).expect("load yaml");
        assert_eq!(config.db_name, "boot_db");
        assert_eq!(config.categories[0].id, CategoryId(3));
        assert_eq!(config.area_threshold, 10.0);
        assert_eq!(config.min_box_width, 5.0);
        assert_eq!(config.invalid_mask_policy, InvalidMaskPolicy::Abort);
        assert_eq!(config.info.year, 2018);
    }

    #[test]
    fn test_load_json_category_missing_id_fails() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("config.json");
        fs::write(
            &path,
            r#"{"db_name": "x", "base_folder": "out", "categories": [{"name": "shoe"}]}"#,
        )
        .unwrap();

        let err = FormatterConfig::load(&path).unwrap_err();
        assert!(matches!(err, Mask2CocoError::ConfigParse { .. }));
    }

    #[test]
    fn test_prepare_output_dirs() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let config = FormatterConfig::new("db", temp.path().join("nested/out"), Vec::new());
        config.prepare_output_dirs().expect("create dirs");
        assert!(config.image_folder_path().is_dir());
    }
}
