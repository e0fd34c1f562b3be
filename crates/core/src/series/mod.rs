//! Dense day-indexed series.

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One value per consecutive calendar day, starting at `start`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySeries {
    start: NaiveDate,
    values: Vec<Decimal>,
}

impl DailySeries {
    pub fn new(start: NaiveDate, values: Vec<Decimal>) -> Self {
        Self { start, values }
    }

    /// `value` for every day of `[start, end]`; empty when `end < start`.
    pub fn filled(start: NaiveDate, end: NaiveDate, value: Decimal) -> Self {
        let len = if end < start {
            0
        } else {
            (end - start).num_days() as usize + 1
        };
        Self::new(start, vec![value; len])
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last covered day, `None` for an empty series.
    pub fn end(&self) -> Option<NaiveDate> {
        let len = self.values.len() as i64;
        (len > 0).then(|| self.start + Duration::days(len - 1))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value on `day`, or `None` outside the covered range.
    pub fn get(&self, day: NaiveDate) -> Option<Decimal> {
        if day < self.start {
            return None;
        }
        let offset = (day - self.start).num_days() as usize;
        self.values.get(offset).copied()
    }

    pub fn first_value(&self) -> Option<Decimal> {
        self.values.first().copied()
    }

    pub fn last_value(&self) -> Option<Decimal> {
        self.values.last().copied()
    }

    pub fn values(&self) -> &[Decimal] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, Decimal)> + '_ {
        self.start
            .iter_days()
            .zip(self.values.iter().copied())
    }

    /// Last observed value of every calendar year in the series.
    pub fn year_end_values(&self) -> BTreeMap<i32, Decimal> {
        let mut out = BTreeMap::new();
        for (day, value) in self.iter() {
            out.insert(day.year(), value);
        }
        out
    }
}
