//! Column names and pinned types for the yellow taxi trip records.

use datafusion::arrow::datatypes::{DataType, Field, Schema, TimeUnit};

pub const PICKUP: &str = "tpep_pickup_datetime";
pub const DROPOFF: &str = "tpep_dropoff_datetime";
pub const PASSENGER_COUNT: &str = "passenger_count";
pub const TRIP_DISTANCE: &str = "trip_distance";
pub const FARE_AMOUNT: &str = "fare_amount";
pub const TIP_AMOUNT: &str = "tip_amount";
pub const TOTAL_AMOUNT: &str = "total_amount";
pub const PAYMENT_TYPE: &str = "payment_type";

/// Derived: trip duration in minutes, rounded to two decimals.
pub const DURATION_MIN: &str = "duration_min";
/// Derived: hour of day of the pickup timestamp.
pub const PICKUP_HOUR: &str = "pickup_hour";

/// A selected column and the type it is cast to after loading.
#[derive(Debug, Clone, Copy)]
pub struct TripColumn {
    pub name: &'static str,
    pub kind: ColumnKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Timestamp,
    Integer,
    Float,
}

impl ColumnKind {
    pub fn data_type(self) -> DataType {
        match self {
            ColumnKind::Timestamp => DataType::Timestamp(TimeUnit::Second, None),
            ColumnKind::Integer => DataType::Int64,
            ColumnKind::Float => DataType::Float64,
        }
    }
}

/// The eight columns kept from the raw file, in output order.
pub const TRIP_COLUMNS: [TripColumn; 8] = [
    TripColumn {
        name: PICKUP,
        kind: ColumnKind::Timestamp,
    },
    TripColumn {
        name: DROPOFF,
        kind: ColumnKind::Timestamp,
    },
    TripColumn {
        name: PASSENGER_COUNT,
        kind: ColumnKind::Integer,
    },
    TripColumn {
        name: TRIP_DISTANCE,
        kind: ColumnKind::Float,
    },
    TripColumn {
        name: FARE_AMOUNT,
        kind: ColumnKind::Float,
    },
    TripColumn {
        name: TIP_AMOUNT,
        kind: ColumnKind::Float,
    },
    TripColumn {
        name: TOTAL_AMOUNT,
        kind: ColumnKind::Float,
    },
    TripColumn {
        name: PAYMENT_TYPE,
        kind: ColumnKind::Integer,
    },
];

/// Columns that identify the same trip beyond exact row equality.
pub const DEDUP_KEY: [&str; 5] = [PICKUP, DROPOFF, PASSENGER_COUNT, TRIP_DISTANCE, TOTAL_AMOUNT];

pub fn trip_column_names() -> Vec<&'static str> {
    TRIP_COLUMNS.iter().map(|c| c.name).collect()
}

/// Arrow schema of a projected trip dataset.
pub fn trip_schema() -> Schema {
    Schema::new(
        TRIP_COLUMNS
            .iter()
            .map(|c| Field::new(c.name, c.kind.data_type(), true))
            .collect::<Vec<_>>(),
    )
}

/// Integer and floating point columns, i.e. what descriptive statistics cover.
pub fn is_numeric(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float16
            | DataType::Float32
            | DataType::Float64
    )
}
