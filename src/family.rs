//! Grouping people into families by their parents.

use crate::diagnostics::{Diagnostic, DiagnosticSink, Role};
use std::collections::HashMap;
use std::collections::hash_map::Entry::{Occupied, Vacant};
use std::io::{self, Write};

/// Internal 1-based ID of a person (`@I<n>@`).
pub type PersonId = usize;

/// Internal 1-based ID of a family (`@F<n>@`).
pub type FamilyId = usize;

/// External IDs of the parents of a family, exactly as given in the input.
///
/// An absent parent is `None`, which never compares equal to any given ID.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParentPair {
    pub father: Option<String>,
    pub mother: Option<String>,
}

impl ParentPair {
    pub fn new(father: Option<&str>, mother: Option<&str>) -> ParentPair {
        ParentPair {
            father: father.map(str::to_owned),
            mother: mother.map(str::to_owned),
        }
    }

    fn roles(&self) -> [(Role, &'static str, Option<&str>); 2] {
        [
            (Role::Father, "HUSB", self.father.as_deref()),
            (Role::Mother, "WIFE", self.mother.as_deref()),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Family {
    pub id: FamilyId,
    pub parents: ParentPair,
    /// Children in the order in which they were recorded.
    pub children: Vec<PersonId>,
}

/// All families discovered so far, in discovery order.
///
/// Usage is two-phase: first [FamilyAggregator::record_child] for every
/// child, then [FamilyAggregator::build_spouse_index] once. The spouse index
/// is not updated by later calls to `record_child`; doing so leaves it stale
/// and is not supported.
#[derive(Default)]
pub struct FamilyAggregator {
    families: Vec<Family>,
    by_parents: HashMap<ParentPair, usize>,
    spouses: HashMap<String, Vec<FamilyId>>,
}

impl FamilyAggregator {
    pub fn new() -> FamilyAggregator {
        Self::default()
    }

    /// Register `child` as a child of the given parents.
    ///
    /// The first child of a parent pair creates a new family with the next
    /// family ID; later children with exactly the same pair are appended to it.
    pub fn record_child(&mut self, father: Option<&str>, mother: Option<&str>, child: PersonId) {
        match self.by_parents.entry(ParentPair::new(father, mother)) {
            Occupied(e) => self.families[*e.get()].children.push(child),
            Vacant(e) => {
                let idx = self.families.len();
                self.families.push(Family {
                    id: idx + 1,
                    parents: e.key().clone(),
                    children: vec![child],
                });
                e.insert(idx);
            }
        }
    }

    /// Build the index from each parent to the families where they are a spouse.
    ///
    /// Precondition: all children have been recorded.
    pub fn build_spouse_index(&mut self) {
        let mut spouses: HashMap<String, Vec<FamilyId>> = HashMap::new();
        for family in &self.families {
            for (_, _, parent) in family.parents.roles() {
                if let Some(id) = parent {
                    spouses.entry(id.to_owned()).or_default().push(family.id);
                }
            }
        }
        self.spouses = spouses;
    }

    /// The family with exactly these parents, if any child was recorded for it.
    pub fn lookup_family(&self, father: Option<&str>, mother: Option<&str>) -> Option<&Family> {
        self.by_parents
            .get(&ParentPair::new(father, mother))
            .map(|&idx| &self.families[idx])
    }

    /// Families in which the person with this external ID is a parent, in discovery order.
    pub fn spouse_families(&self, id: &str) -> &[FamilyId] {
        self.spouses.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn families(&self) -> &[Family] {
        &self.families
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Write one `FAM` record per family, in discovery order.
    ///
    /// `ids` maps external person IDs to internal IDs. A parent whose
    /// external ID is not in `ids` is reported to `diagnostics` and its
    /// `HUSB`/`WIFE` line is left out.
    pub fn emit_family_records(
        &self,
        ids: &HashMap<&str, PersonId>,
        out: &mut dyn Write,
        diagnostics: &mut dyn DiagnosticSink,
    ) -> io::Result<()> {
        for family in &self.families {
            writeln!(out)?;
            writeln!(out, "0 @F{}@ FAM", family.id)?;
            for (role, tag, parent) in family.parents.roles() {
                let Some(parent) = parent else {
                    continue;
                };
                match ids.get(parent) {
                    Some(id) => writeln!(out, "1 {tag} @I{id}@")?,
                    None => diagnostics.report(Diagnostic::MissingParent {
                        id: parent.to_owned(),
                        role,
                    }),
                }
            }
            for child in &family.children {
                writeln!(out, "1 CHIL @I{child}@")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn emit(agg: &FamilyAggregator, ids: &HashMap<&str, PersonId>) -> (String, Vec<Diagnostic>) {
        let mut out: Vec<u8> = Vec::new();
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        agg.emit_family_records(ids, &mut out, &mut diagnostics)
            .unwrap();
        (String::from_utf8(out).unwrap(), diagnostics)
    }

    #[test]
    fn same_parents_same_family() {
        let mut agg = FamilyAggregator::new();
        agg.record_child(Some("1"), Some("2"), 3);
        agg.record_child(Some("1"), Some("5"), 4);
        agg.record_child(Some("1"), Some("2"), 6);
        agg.record_child(Some("1"), Some("2"), 5);
        assert_eq!(agg.len(), 2);
        let f = agg.lookup_family(Some("1"), Some("2")).unwrap();
        assert_eq!(f.id, 1);
        assert_eq!(f.children, [3, 6, 5]);
        let f = agg.lookup_family(Some("1"), Some("5")).unwrap();
        assert_eq!(f.id, 2);
        assert_eq!(f.children, [4]);
    }

    #[test]
    fn absent_side_is_part_of_key() {
        let mut agg = FamilyAggregator::new();
        agg.record_child(Some("1"), None, 3);
        agg.record_child(Some("1"), Some(""), 4);
        agg.record_child(None, Some("1"), 5);
        agg.record_child(Some("1"), None, 6);
        assert_eq!(agg.len(), 3);
        assert_eq!(agg.lookup_family(Some("1"), None).unwrap().children, [3, 6]);
        assert_eq!(agg.lookup_family(Some("1"), Some("")).unwrap().children, [4]);
        assert_eq!(agg.lookup_family(None, Some("1")).unwrap().children, [5]);
        assert!(agg.lookup_family(None, None).is_none());
        assert!(agg.lookup_family(Some("2"), None).is_none());
    }

    #[test]
    fn spouse_index() {
        let mut agg = FamilyAggregator::new();
        agg.record_child(Some("A"), Some("B"), 10);
        agg.record_child(Some("A"), Some("C"), 11);
        agg.record_child(None, Some("B"), 12);
        agg.record_child(Some("D"), Some("B"), 13);
        agg.build_spouse_index();
        assert_eq!(agg.spouse_families("A"), [1, 2]);
        assert_eq!(agg.spouse_families("B"), [1, 3, 4]);
        assert_eq!(agg.spouse_families("C"), [2]);
        assert_eq!(agg.spouse_families("D"), [4]);
        assert!(agg.spouse_families("E").is_empty());
        for family in agg.families() {
            for id in [&family.parents.father, &family.parents.mother]
                .into_iter()
                .flatten()
            {
                assert!(agg.spouse_families(id).contains(&family.id));
            }
        }
    }

    #[test]
    fn emit_records() {
        let mut agg = FamilyAggregator::new();
        agg.record_child(Some("a"), Some("b"), 3);
        agg.record_child(Some("a"), None, 4);
        agg.record_child(Some("a"), Some("b"), 5);
        agg.build_spouse_index();
        let ids = HashMap::from([("a", 1), ("b", 2)]);
        let (out, diagnostics) = emit(&agg, &ids);
        assert_eq!(
            out,
            "\n0 @F1@ FAM\n1 HUSB @I1@\n1 WIFE @I2@\n1 CHIL @I3@\n1 CHIL @I5@\n\
             \n0 @F2@ FAM\n1 HUSB @I1@\n1 CHIL @I4@\n"
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn emit_missing_parent() {
        let mut agg = FamilyAggregator::new();
        agg.record_child(Some("X"), Some("b"), 2);
        agg.record_child(None, Some("Y"), 3);
        agg.build_spouse_index();
        let ids = HashMap::from([("b", 1)]);
        let (out, diagnostics) = emit(&agg, &ids);
        assert_eq!(
            out,
            "\n0 @F1@ FAM\n1 WIFE @I1@\n1 CHIL @I2@\n\n0 @F2@ FAM\n1 CHIL @I3@\n"
        );
        assert_eq!(
            diagnostics,
            [
                Diagnostic::MissingParent {
                    id: "X".to_owned(),
                    role: Role::Father
                },
                Diagnostic::MissingParent {
                    id: "Y".to_owned(),
                    role: Role::Mother
                },
            ]
        );
    }
}
