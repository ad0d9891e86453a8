//! Data model for the COCO output document.
//!
//! Every record written to disk lives here: typed ids, integer bounding
//! boxes, flattened polygons, the image/annotation records, and the
//! category lookup table. Binary masks are also defined here since they
//! are the input every annotation is derived from.
//!
//! # Example
//!
//! ```
//! use mask2coco::ir::{BinaryMask, Category, CategoryTable, CategoryId};
//!
//! let table = CategoryTable::from_categories(&[Category::new(3u64, "shoe")]);
//! assert_eq!(table.lookup("shoe"), Some(CategoryId::new(3)));
//!
//! let mask = BinaryMask::from_fn(20, 20, |x, y| (5..15).contains(&x) && (5..15).contains(&y));
//! assert_eq!(mask.count_foreground(), 100);
//! ```

mod bbox;
mod category;
mod ids;
pub mod io_coco_json;
mod mask;
mod model;

pub use bbox::BBoxXYWH;
pub use category::CategoryTable;
pub use ids::{AnnotationId, CategoryId, ImageId, LicenseId};
pub use mask::BinaryMask;
pub use model::{
    Annotation, Category, DatasetDocument, DatasetInfo, ImageInfo, License, Polygon,
};
