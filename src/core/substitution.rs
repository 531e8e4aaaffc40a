//! Substitution index: forward, reverse and transitive equivalence lookups
//!
//! Built fresh for every evaluation from the substitution rules that apply to
//! the student's reference year and programs.

use crate::core::models::SubstitutionRule;
use std::collections::{BTreeMap, BTreeSet};

/// Lookup structures derived from a list of substitution rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionIndex {
    /// original code -> substitute codes
    forward: BTreeMap<String, Vec<String>>,
    /// substitute code -> original codes
    reverse: BTreeMap<String, Vec<String>>,
    /// code -> every code it is transitively interchangeable with (itself included)
    groups: BTreeMap<String, BTreeSet<String>>,
}

fn push_unique(map: &mut BTreeMap<String, Vec<String>>, key: &str, value: &str) {
    let entry = map.entry(key.to_string()).or_default();
    if !entry.iter().any(|v| v == value) {
        entry.push(value.to_string());
    }
}

impl SubstitutionIndex {
    /// Build the index from pre-filtered rules
    ///
    /// Codes that appear together in a rule are merged into one equivalence
    /// group together with everything either code was already grouped with.
    #[must_use]
    pub fn build(rules: &[SubstitutionRule]) -> Self {
        let mut index = Self::default();

        for rule in rules {
            push_unique(&mut index.forward, &rule.original, &rule.substitute);
            push_unique(&mut index.reverse, &rule.substitute, &rule.original);

            let mut merged: BTreeSet<String> =
                [rule.original.clone(), rule.substitute.clone()].into_iter().collect();
            for code in [&rule.original, &rule.substitute] {
                if let Some(existing) = index.groups.get(code) {
                    merged.extend(existing.iter().cloned());
                }
            }
            for code in &merged {
                index.groups.insert(code.clone(), merged.clone());
            }
        }

        index
    }

    /// Whether no rule was indexed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Codes registered as substitutes for `original`
    #[must_use]
    pub fn substitutes_of(&self, original: &str) -> &[String] {
        self.forward.get(original).map_or(&[], Vec::as_slice)
    }

    /// Codes that `substitute` may stand in for
    #[must_use]
    pub fn originals_of(&self, substitute: &str) -> &[String] {
        self.reverse.get(substitute).map_or(&[], Vec::as_slice)
    }

    /// The equivalence group of `code`, always containing `code` itself
    #[must_use]
    pub fn equivalents_of(&self, code: &str) -> BTreeSet<String> {
        self.groups
            .get(code)
            .cloned()
            .unwrap_or_else(|| std::iter::once(code.to_string()).collect())
    }

    /// Whether two codes are interchangeable
    #[must_use]
    pub fn are_equivalent(&self, a: &str, b: &str) -> bool {
        a == b || self.groups.get(a).is_some_and(|g| g.contains(b))
    }

    /// Distinct equivalence groups
    #[must_use]
    pub fn groups(&self) -> Vec<BTreeSet<String>> {
        let distinct: BTreeSet<&BTreeSet<String>> = self.groups.values().collect();
        distinct.into_iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(original: &str, substitute: &str) -> SubstitutionRule {
        SubstitutionRule::new(original.to_string(), substitute.to_string(), 2010)
    }

    #[test]
    fn test_empty_rules() {
        let index = SubstitutionIndex::build(&[]);
        assert!(index.is_empty());
        assert!(index.substitutes_of("CS.101").is_empty());
        assert!(index.groups().is_empty());
        assert_eq!(index.equivalents_of("CS.101").len(), 1);
    }

    #[test]
    fn test_forward_and_reverse_dedup() {
        let index = SubstitutionIndex::build(&[
            rule("CS.101", "CS.102"),
            rule("CS.101", "CS.102"),
            rule("CS.101", "CS.103"),
        ]);

        assert_eq!(index.substitutes_of("CS.101"), ["CS.102", "CS.103"]);
        assert_eq!(index.originals_of("CS.102"), ["CS.101"]);
        assert!(index.originals_of("CS.101").is_empty());
    }

    #[test]
    fn test_transitive_groups() {
        let index = SubstitutionIndex::build(&[
            rule("A", "B"),
            rule("C", "D"),
            rule("B", "C"),
        ]);

        let groups = index.groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 4);
        assert!(index.are_equivalent("A", "D"));
        assert!(index.are_equivalent("D", "A"));
        assert!(!index.are_equivalent("A", "E"));
    }

    #[test]
    fn test_separate_groups_stay_separate() {
        let index = SubstitutionIndex::build(&[rule("A", "B"), rule("C", "D")]);

        assert_eq!(index.groups().len(), 2);
        assert!(!index.are_equivalent("A", "C"));
        assert_eq!(
            index.equivalents_of("B"),
            ["A".to_string(), "B".to_string()].into_iter().collect()
        );
    }
}
