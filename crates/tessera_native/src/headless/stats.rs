//! Named counters for boundary calls

use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct CallStats {
    counters: HashMap<&'static str, usize>,
}

impl CallStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, verb: &'static str) {
        *self.counters.entry(verb).or_insert(0) += 1;
    }

    pub fn get(&self, verb: &str) -> usize {
        self.counters.get(verb).copied().unwrap_or(0)
    }

    pub fn reset_all(&mut self) {
        self.counters.clear();
    }

    pub fn total(&self) -> usize {
        self.counters.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_by_verb() {
        let mut stats = CallStats::new();
        stats.increment("has_component");
        stats.increment("has_component");
        stats.increment("get_field");

        assert_eq!(stats.get("has_component"), 2);
        assert_eq!(stats.get("get_field"), 1);
        assert_eq!(stats.get("set_field"), 0);
        assert_eq!(stats.total(), 3);

        stats.reset_all();
        assert_eq!(stats.total(), 0);
    }
}
