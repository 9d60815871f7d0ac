//! Refactoring candidates found by unification.

use std::collections::BTreeSet;

use ottr_store::TemplateStore;

use crate::query::Query;

/// Pairs `(to_use, to_change)` where the body of `to_use` unifies into the
/// body of `to_change` and their parameters unify in some order.
///
/// Each pair can be passed to `ottr_expander::refactor`. Pairs are sorted
/// and listed once, however many unifiers they have.
pub fn find_refactorings(store: &TemplateStore) -> Vec<(String, String)> {
    let pairs: BTreeSet<(String, String)> = Query::unifies()
        .run(store)
        .map(|t| (t.iri("T1").to_string(), t.iri("T2").to_string()))
        .collect();
    tracing::debug!(candidates = pairs.len(), "searched for refactorings");
    pairs.into_iter().collect()
}

/// Pairs of distinct templates that unify into each other.
pub fn find_equal_templates(store: &TemplateStore) -> Vec<(String, String)> {
    let pairs: BTreeSet<(String, String)> = Query::equal()
        .run(store)
        .map(|t| (t.iri("T1").to_string(), t.iri("T2").to_string()))
        .collect();
    pairs.into_iter().collect()
}
