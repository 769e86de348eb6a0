//! Column side-channel metadata: logical types, scales, precisions and byte widths.
mod column_metadata;
#[allow(clippy::module_name_repetitions)]
pub use column_metadata::{
    ColumnMetadata, BYTE_LENGTH_KEY, LOGICAL_TYPE_KEY, PRECISION_KEY, SCALE_KEY,
};

mod error;
pub use error::ColumnMetadataError;

mod logical_type;
pub use logical_type::{LogicalType, UnknownLogicalType};
