//! Newtype IDs for the records of a COCO document.
//!
//! Image and annotation ids are allocated densely from zero by the
//! aggregator; category and license ids come from configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Creates a new id.
            #[inline]
            pub fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the underlying u64 value.
            #[inline]
            pub fn as_u64(&self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Identifier of a kept image; doubles as its output file stem.
    ImageId
);

define_id!(
    /// Identifier of an accepted annotation.
    AnnotationId
);

define_id!(
    /// Identifier of a configured object category.
    CategoryId
);

define_id!(
    /// Identifier of a license record.
    LicenseId
);

impl ImageId {
    /// File name of the persisted image artifact: zero-padded, five digits.
    pub fn file_name(&self) -> String {
        format!("{:05}.png", self.0)
    }
}
