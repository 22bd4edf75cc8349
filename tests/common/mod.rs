#![allow(dead_code)]

use datafusion::arrow::array::{Array, AsArray};
use datafusion::arrow::datatypes::{Float64Type, Int32Type, Int64Type};
use datafusion::arrow::record_batch::RecordBatch;
use std::path::{Path, PathBuf};

pub const HEADER: &str = "VendorID,tpep_pickup_datetime,tpep_dropoff_datetime,passenger_count,\
trip_distance,pickup_longitude,pickup_latitude,RateCodeID,store_and_fwd_flag,dropoff_longitude,\
dropoff_latitude,payment_type,fare_amount,extra,mta_tax,tip_amount,tolls_amount,\
improvement_surcharge,total_amount";

pub struct Trip {
    pub vendor: u8,
    pub pickup: &'static str,
    pub dropoff: &'static str,
    pub passengers: &'static str,
    pub distance: &'static str,
    pub payment: &'static str,
    pub fare: &'static str,
    pub tip: &'static str,
    pub total: &'static str,
}

impl Trip {
    pub fn line(&self) -> String {
        format!(
            "{},{},{},{},{},-73.99,40.75,1,N,-73.97,40.78,{},{},1,0.5,{},0,0.3,{}",
            self.vendor,
            self.pickup,
            self.dropoff,
            self.passengers,
            self.distance,
            self.payment,
            self.fare,
            self.tip,
            self.total
        )
    }
}

const fn trip(
    vendor: u8,
    pickup: &'static str,
    dropoff: &'static str,
    passengers: &'static str,
    distance: &'static str,
    payment: &'static str,
    fare: &'static str,
    tip: &'static str,
    total: &'static str,
) -> Trip {
    Trip {
        vendor,
        pickup,
        dropoff,
        passengers,
        distance,
        payment,
        fare,
        tip,
        total,
    }
}

/// Twelve raw rows: four distinct valid trips, one exact duplicate once
/// projected (differs only in VendorID), one duplicate on the dedup key
/// (differs in payment type and tip), five rows each breaking exactly one
/// validity rule and one row without a passenger count.
#[rustfmt::skip]
pub fn sample_trips() -> Vec<Trip> {
    vec![
        trip(2, "2015-01-15 19:05:39", "2015-01-15 19:23:42", "1", "1.59", "1", "12.0", "3.25", "17.05"),
        trip(1, "2015-01-15 19:05:39", "2015-01-15 19:23:42", "1", "1.59", "1", "12.0", "3.25", "17.05"),
        trip(2, "2015-01-15 19:05:39", "2015-01-15 19:23:42", "1", "1.59", "2", "12.0", "0.0", "17.05"),
        trip(1, "2015-01-10 20:33:38", "2015-01-10 20:53:28", "1", "3.30", "1", "14.5", "2.0", "17.8"),
        trip(1, "2015-01-10 20:33:38", "2015-01-10 20:35:00", "2", "0.30", "2", "3.5", "0.0", "4.8"),
        trip(2, "2015-01-10 08:00:00", "2015-01-10 08:30:00", "2", "5.0", "2", "20.0", "0.0", "21.3"),
        trip(1, "2015-01-11 09:00:00", "2015-01-11 09:10:00", "0", "1.0", "1", "6.0", "1.0", "8.3"),
        trip(1, "2015-01-11 09:15:00", "2015-01-11 09:20:00", "1", "0.0", "1", "6.0", "1.0", "8.3"),
        trip(1, "2015-01-11 09:30:00", "2015-01-11 09:40:00", "1", "1.0", "1", "-2.5", "0.0", "3.0"),
        trip(1, "2015-01-11 09:45:00", "2015-01-11 09:50:00", "1", "1.0", "1", "0.0", "0.0", "0.0"),
        trip(1, "2015-01-11 10:00:00", "2015-01-11 10:10:00", "1", "1.0", "1", "5.0", "-1.0", "5.0"),
        trip(2, "2015-01-11 11:00:00", "2015-01-11 11:10:00", "", "1.0", "1", "5.0", "1.0", "6.3"),
    ]
}

pub fn write_csv(dir: &Path, name: &str, trips: &[Trip]) -> PathBuf {
    let mut body = String::from(HEADER);
    body.push('\n');
    for t in trips {
        body.push_str(&t.line());
        body.push('\n');
    }
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    path
}

pub fn total_rows(batches: &[RecordBatch]) -> usize {
    batches.iter().map(|b| b.num_rows()).sum()
}

pub fn f64_column(batches: &[RecordBatch], name: &str) -> Vec<Option<f64>> {
    let mut out = Vec::new();
    for batch in batches {
        let array = batch.column_by_name(name).unwrap().as_primitive::<Float64Type>();
        out.extend((0..array.len()).map(|i| array.is_valid(i).then(|| array.value(i))));
    }
    out
}

pub fn i64_column(batches: &[RecordBatch], name: &str) -> Vec<Option<i64>> {
    let mut out = Vec::new();
    for batch in batches {
        let array = batch.column_by_name(name).unwrap().as_primitive::<Int64Type>();
        out.extend((0..array.len()).map(|i| array.is_valid(i).then(|| array.value(i))));
    }
    out
}

pub fn i32_column(batches: &[RecordBatch], name: &str) -> Vec<Option<i32>> {
    let mut out = Vec::new();
    for batch in batches {
        let array = batch.column_by_name(name).unwrap().as_primitive::<Int32Type>();
        out.extend((0..array.len()).map(|i| array.is_valid(i).then(|| array.value(i))));
    }
    out
}
