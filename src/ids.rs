use std::cell::Cell;

/// Source of record identifiers, shaped `<prefix>_<suffix>`.
pub trait IdGenerator {
    fn next_id(&self, prefix: &str) -> String;
}

/// Production ids: prefix plus a lowercase ULID.
#[derive(Debug, Default, Clone, Copy)]
pub struct UlidIds;

impl IdGenerator for UlidIds {
    fn next_id(&self, prefix: &str) -> String {
        format!("{prefix}_{}", ulid::Ulid::new().to_string().to_lowercase())
    }
}

/// Deterministic ids for tests: `<prefix>_1`, `<prefix>_2`, ...
/// The counter is shared across prefixes.
#[derive(Debug, Default)]
pub struct SequentialIds {
    counter: Cell<u64>,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self, prefix: &str) -> String {
        let next = self.counter.get() + 1;
        self.counter.set(next);
        format!("{prefix}_{next}")
    }
}
