use crate::family::{FamilyAggregator, PersonId};
use crate::input::Person;
use itertools::Itertools;
use log::info;
use std::collections::{HashMap, HashSet};

/// Summary of the input, for the log.
#[derive(Debug, PartialEq, Eq)]
pub struct Statistics {
    pub individuals: usize,
    pub distinct_ids: usize,
    pub with_known_parent: usize,
    pub families: usize,
    pub families_with_both_parents: usize,
    pub largest_family: usize,
    /// Parent IDs that have no row of their own, sorted.
    pub missing_parents: Vec<String>,
}

impl Statistics {
    pub fn gather(
        people: &[Person],
        ids: &HashMap<&str, PersonId>,
        families: &FamilyAggregator,
    ) -> Statistics {
        let mut missing = HashSet::new();
        for family in families.families() {
            for parent in [&family.parents.father, &family.parents.mother]
                .into_iter()
                .flatten()
            {
                if !ids.contains_key(parent.as_str()) {
                    missing.insert(parent.as_str());
                }
            }
        }
        Statistics {
            individuals: people.len(),
            distinct_ids: ids.len(),
            with_known_parent: people.iter().filter(|p| p.has_known_parent()).count(),
            families: families.len(),
            families_with_both_parents: families
                .families()
                .iter()
                .filter(|f| f.parents.father.is_some() && f.parents.mother.is_some())
                .count(),
            largest_family: families
                .families()
                .iter()
                .map(|f| f.children.len())
                .max()
                .unwrap_or(0),
            missing_parents: missing.into_iter().sorted().map(str::to_owned).collect_vec(),
        }
    }

    pub fn log(&self) {
        info!(target: "csv2gedcom", "individuals: {}", self.individuals);
        if self.distinct_ids != self.individuals {
            info!(target: "csv2gedcom", "distinct IDs: {}", self.distinct_ids);
        }
        info!(
            target: "csv2gedcom",
            "individuals with known parents: {}",
            self.with_known_parent
        );
        info!(
            target: "csv2gedcom",
            "families: {} ({} with both parents, largest has {} children)",
            self.families,
            self.families_with_both_parents,
            self.largest_family
        );
        if !self.missing_parents.is_empty() {
            info!(
                target: "csv2gedcom",
                "parents without a row: {}",
                self.missing_parents.join(", ")
            );
        }
    }
}
