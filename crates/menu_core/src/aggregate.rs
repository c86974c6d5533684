//! Read-only course grouping and price statistics.

use std::collections::HashMap;

use serde::Serialize;
use shared::domain::{Course, DishRecord};

use crate::collection::MenuCollection;

#[derive(Debug, Clone, PartialEq)]
pub struct CourseGroup {
    /// Normalized course shared by every dish in the group.
    pub course: Course,
    pub dishes: Vec<DishRecord>,
}

impl CourseGroup {
    pub fn label(&self) -> &str {
        self.course.label()
    }

    pub fn summary(&self) -> MenuSummary {
        summarize_records(&self.dishes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MenuSummary {
    pub count: usize,
    pub average_price: f64,
}

/// Groups in first-seen course order; dishes keep their relative order.
pub fn group_by_course(collection: &MenuCollection) -> Vec<CourseGroup> {
    let mut groups: Vec<CourseGroup> = Vec::new();
    let mut index: HashMap<Course, usize> = HashMap::new();

    for record in collection.iter() {
        let key = record.course.normalized();
        match index.get(&key) {
            Some(&slot) => groups[slot].dishes.push(record.clone()),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(CourseGroup {
                    course: key,
                    dishes: vec![record.clone()],
                });
            }
        }
    }

    groups
}

pub fn summarize(collection: &MenuCollection) -> MenuSummary {
    summarize_records(collection.list())
}

fn summarize_records(records: &[DishRecord]) -> MenuSummary {
    let count = records.len();
    if count == 0 {
        return MenuSummary {
            count,
            average_price: 0.0,
        };
    }
    let total: f64 = records.iter().map(|record| record.price).sum();
    let average_price = if total.is_finite() {
        total / count as f64
    } else {
        // Decoded prices near f64::MAX overflow the sum; a running mean does not.
        records
            .iter()
            .enumerate()
            .fold(0.0, |mean, (i, record)| mean + (record.price - mean) / (i + 1) as f64)
    };
    MenuSummary {
        count,
        average_price,
    }
}

pub fn filter_by_course<'a>(
    collection: &'a MenuCollection,
    course: &Course,
) -> Vec<&'a DishRecord> {
    let wanted = course.normalized();
    collection
        .iter()
        .filter(|record| record.course.normalized() == wanted)
        .collect()
}

/// Two-decimal rendering; the stored price is never rounded.
pub fn format_price(price: f64, currency_symbol: &str) -> String {
    format!("{currency_symbol} {price:.2}")
}

#[cfg(test)]
#[path = "tests/aggregate_tests.rs"]
mod tests;
