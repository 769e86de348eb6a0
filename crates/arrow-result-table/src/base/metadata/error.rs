use snafu::Snafu;

/// Errors raised while reading the side-channel metadata of a wire column.
#[derive(Snafu, Debug, PartialEq, Eq)]
pub enum ColumnMetadataError {
    /// The field carries no `logicalType` entry.
    #[snafu(display("column `{column}` has no logicalType metadata"))]
    MissingLogicalType {
        /// The column name
        column: String,
    },
    /// The `logicalType` entry names a type this library does not know.
    #[snafu(display("column `{column}` declares unknown logical type {tag:?}"))]
    UnknownLogicalType {
        /// The column name
        column: String,
        /// The unrecognized tag
        tag: String,
    },
    /// A numeric metadata entry does not hold an acceptable number.
    #[snafu(display("column `{column}` has invalid {key} metadata: {value:?}"))]
    InvalidValue {
        /// The column name
        column: String,
        /// The offending metadata key
        key: &'static str,
        /// The raw metadata value
        value: String,
    },
}
