use arrow::datatypes::DataType;

pub fn is_numeric_datatype(dtype: &DataType) -> bool {
    is_integer_datatype(dtype) || is_float_datatype(dtype) || is_decimal_datatype(dtype)
}

pub fn is_integer_datatype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

pub fn is_float_datatype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float16 | DataType::Float32 | DataType::Float64
    )
}

pub fn is_decimal_datatype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Decimal128(..) | DataType::Decimal256(..))
}

pub fn is_string_datatype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View
    )
}

/// Dates, times of day, and timestamps with or without a timezone
pub fn is_temporal_datatype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Date32
            | DataType::Date64
            | DataType::Timestamp(..)
            | DataType::Time32(_)
            | DataType::Time64(_)
    )
}
