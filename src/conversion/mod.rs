//! End-to-end conversion: source databases in, COCO dataset on disk out.
//!
//! The run validates the configuration, creates the output folders, walks
//! every database (writing one PNG per kept image), and only then writes the
//! JSON document. An aborted run can leave numbered images behind but never
//! a document that references missing images.

pub mod report;

pub use report::{ConversionCounts, ConversionReport};

use log::info;

use crate::aggregate::{AggregateOptions, DatasetAggregator};
use crate::config::FormatterConfig;
use crate::error::Mask2CocoError;
use crate::ir::io_coco_json::{assemble, write_coco_json};
use crate::ir::CategoryTable;
use crate::source::SourceDatabase;

/// Converts `databases`, in order, into the dataset described by `config`.
///
/// # Errors
/// Fails on an invalid configuration, on any filesystem error, and on an
/// invalid mask when the policy is to abort.
pub fn convert(
    config: &FormatterConfig,
    databases: &[&dyn SourceDatabase],
) -> Result<ConversionReport, Mask2CocoError> {
    config.validate()?;
    config.prepare_output_dirs()?;

    let categories = CategoryTable::from_categories(&config.categories);
    let started = utc_timestamp();
    let options = AggregateOptions {
        thresholds: config.thresholds(),
        image_license: config.image_license,
        date_captured: config
            .date_captured
            .clone()
            .unwrap_or_else(|| started.clone()),
        invalid_mask_policy: config.invalid_mask_policy,
    };

    info!(
        "Converting {} database(s) into {}",
        databases.len(),
        config.base_folder.display()
    );
    let mut aggregator = DatasetAggregator::new(&categories, config.image_folder_path(), options);
    aggregator.process_all(databases)?;
    let (images, annotations, counts) = aggregator.finish();

    let mut dataset_info = config.info.clone();
    if dataset_info.date_created.is_none() {
        dataset_info.date_created = Some(started);
    }
    let document = assemble(
        dataset_info,
        config.licenses.clone(),
        config.categories.clone(),
        images,
        annotations,
    );

    let json_path = config.json_file_path();
    write_coco_json(&json_path, &document, config.pretty)?;
    info!(
        "Wrote {} images and {} annotations to {}",
        document.images.len(),
        document.annotations.len(),
        json_path.display()
    );

    Ok(ConversionReport {
        json_path,
        image_dir: config.image_folder_path(),
        counts,
    })
}

/// Current UTC time as `YYYY-MM-DD HH:MM:SS.ffffff`.
fn utc_timestamp() -> String {
    chrono::Utc::now()
        .format("%Y-%m-%d %H:%M:%S%.6f")
        .to_string()
}
