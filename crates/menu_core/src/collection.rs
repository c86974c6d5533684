use std::collections::HashSet;

use shared::{
    domain::{Course, DishId, DishInput, DishRecord},
    error::{DishField, MenuError, MenuResult},
};
use tracing::debug;

use crate::ids::IdGenerator;

const MAX_ID_ATTEMPTS: usize = 16;
/// Largest price accepted from the add form.
pub const MAX_PRICE: f64 = 1_000_000_000.0;

/// Ordered dish list owned by one screen visit.
///
/// Every operation returns a new collection and leaves `self` untouched, so
/// the caller keeps the pre-mutation snapshot until it chooses to drop it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuCollection {
    records: Vec<DishRecord>,
}

impl MenuCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection from already-serialized records, rejecting
    /// duplicate ids and records that could never have been added.
    pub fn from_records(records: Vec<DishRecord>) -> MenuResult<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            check_record(record).map_err(|reason| {
                MenuError::malformed(format!("record {index} ({}): {reason}", record.id))
            })?;
            if !seen.insert(&record.id) {
                return Err(MenuError::malformed(format!(
                    "record {index}: duplicate id '{}'",
                    record.id
                )));
            }
        }
        Ok(Self { records })
    }

    pub fn list(&self) -> &[DishRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &DishRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &DishId) -> Option<&DishRecord> {
        self.records.iter().find(|record| &record.id == id)
    }

    pub fn contains(&self, id: &DishId) -> bool {
        self.get(id).is_some()
    }

    /// Validates `input`, then appends a record with a fresh id.
    pub fn add(
        &self,
        input: &DishInput,
        ids: &mut dyn IdGenerator,
    ) -> MenuResult<(Self, DishRecord)> {
        let valid = validate(input)?;
        let id = self.fresh_id(ids)?;
        let record = DishRecord {
            id,
            name: valid.name,
            description: valid.description,
            course: valid.course,
            price: valid.price,
        };
        debug!(dish_id = %record.id, course = %record.course, "dish added");

        let mut records = self.records.clone();
        records.push(record.clone());
        Ok((Self { records }, record))
    }

    /// Removing an id that is not present yields an equal collection.
    pub fn remove(&self, id: &DishId) -> Self {
        Self {
            records: self
                .records
                .iter()
                .filter(|record| &record.id != id)
                .cloned()
                .collect(),
        }
    }

    pub fn clear(&self) -> Self {
        Self::new()
    }

    /// Appends a record created elsewhere unless its id is already present.
    pub fn append_once(&self, record: DishRecord) -> MenuResult<Self> {
        if self.contains(&record.id) {
            return Ok(self.clone());
        }
        check_record(&record).map_err(|reason| {
            MenuError::malformed(format!("record ({}): {reason}", record.id))
        })?;
        let mut records = self.records.clone();
        records.push(record);
        Ok(Self { records })
    }

    fn fresh_id(&self, ids: &mut dyn IdGenerator) -> MenuResult<DishId> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = ids.next_id();
            if !candidate.as_str().is_empty() && !self.contains(&candidate) {
                return Ok(candidate);
            }
        }
        Err(MenuError::IdentifierExhausted {
            attempts: MAX_ID_ATTEMPTS,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidDish {
    pub name: String,
    pub description: String,
    pub course: Course,
    pub price: f64,
}

/// Checks fields in form order and reports the first one that fails.
pub fn validate(input: &DishInput) -> MenuResult<ValidDish> {
    let name = required(DishField::Name, &input.name)?;
    let description = required(DishField::Description, &input.description)?;
    let course = required(DishField::Course, &input.course)?;
    let price = parse_price(&input.price)?;

    Ok(ValidDish {
        name: name.to_string(),
        description: description.to_string(),
        course: Course::from_label(course),
        price,
    })
}

pub fn parse_price(raw: &str) -> MenuResult<f64> {
    let raw = required(DishField::Price, raw)?;
    let price = raw
        .parse::<f64>()
        .map_err(|_| MenuError::validation(DishField::Price, format!("'{raw}' is not a number")))?;
    if !price.is_finite() {
        return Err(MenuError::validation(
            DishField::Price,
            "must be a finite number",
        ));
    }
    if price < 0.0 {
        return Err(MenuError::validation(DishField::Price, "must not be negative"));
    }
    if price > MAX_PRICE {
        return Err(MenuError::validation(
            DishField::Price,
            format!("must not exceed {MAX_PRICE}"),
        ));
    }
    Ok(price)
}

fn required(field: DishField, value: &str) -> MenuResult<&str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(MenuError::validation(field, "is required"));
    }
    Ok(value)
}

fn check_record(record: &DishRecord) -> Result<(), &'static str> {
    if record.id.as_str().is_empty() {
        return Err("empty id");
    }
    if record.name.trim().is_empty() {
        return Err("empty name");
    }
    if !record.price.is_finite() || record.price < 0.0 {
        return Err("price must be a non-negative number");
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/collection_tests.rs"]
mod tests;
