//! Identifier generation for newly created dishes.

use std::str::FromStr;

use shared::domain::DishId;
use uuid::Uuid;

pub trait IdGenerator {
    fn next_id(&mut self) -> DishId;
}

/// Random v4 UUIDs; collision-resistant across generators and processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> DishId {
        DishId::new(Uuid::new_v4().to_string())
    }
}

/// Monotonic counter scoped to one generator instance.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> DishId {
        let id = DishId::new(format!("dish-{}", self.next));
        self.next = self.next.saturating_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdStrategy {
    #[default]
    Uuid,
    Sequential,
}

impl IdStrategy {
    pub fn generator(self) -> Box<dyn IdGenerator> {
        match self {
            Self::Uuid => Box::new(UuidIds),
            Self::Sequential => Box::new(SequentialIds::new()),
        }
    }
}

impl FromStr for IdStrategy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.eq_ignore_ascii_case("uuid") {
            Ok(Self::Uuid)
        } else if value.eq_ignore_ascii_case("sequential") {
            Ok(Self::Sequential)
        } else {
            Err(format!("unknown id strategy '{value}'"))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn rapid_uuid_generation_does_not_collide() {
        let mut ids = UuidIds;
        let generated: HashSet<_> = (0..1_000).map(|_| ids.next_id()).collect();
        assert_eq!(generated.len(), 1_000);
    }

    #[test]
    fn sequential_ids_are_monotonic() {
        let mut ids = SequentialIds::starting_at(41);
        assert_eq!(ids.next_id().as_str(), "dish-41");
        assert_eq!(ids.next_id().as_str(), "dish-42");
    }

    #[test]
    fn parses_strategy_names() {
        assert_eq!("UUID".parse::<IdStrategy>(), Ok(IdStrategy::Uuid));
        assert_eq!(
            "sequential".parse::<IdStrategy>(),
            Ok(IdStrategy::Sequential)
        );
        assert!("timestamp".parse::<IdStrategy>().is_err());
    }
}
