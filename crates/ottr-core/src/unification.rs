//! Unification of terms, argument lists and template bodies.
//!
//! Two flavours are provided:
//!
//! - [`Term::unify`] is symmetric and returns the unified term.
//! - [`unify_terms`] and friends are directed: only variables (and blank
//!   nodes, which may only map to blank nodes) of the left side are bound,
//!   producing a [`Substitution`] that rewrites the left side into the right.
//!
//! The unordered and body searches enumerate injective mappings by
//! backtracking. Template bodies are small, but the search is still capped at
//! [`SEARCH_LIMIT`] unification attempts.

use crate::argument::ArgumentList;
use crate::instance::Instance;
use crate::substitution::Substitution;
use crate::term::Term;

/// Maximum number of pairwise unification attempts in one search.
pub const SEARCH_LIMIT: usize = 100_000;

impl Term {
    /// Symmetric unification.
    ///
    /// A variable unifies with anything, ground terms only with equal terms,
    /// and lists element-wise when their lengths match.
    pub fn unify(&self, other: &Term) -> Option<Term> {
        match (self, other) {
            (Term::Variable(_), _) => Some(other.clone()),
            (_, Term::Variable(_)) => Some(self.clone()),
            (Term::List(a), Term::List(b)) => {
                if a.len() != b.len() {
                    return None;
                }
                a.iter()
                    .zip(b.iter())
                    .map(|(x, y)| x.unify(y))
                    .collect::<Option<Vec<_>>>()
                    .map(Term::List)
            }
            _ if self == other => Some(self.clone()),
            _ => None,
        }
    }
}

fn bind(subst: &mut Substitution, from: &Term, into: &Term) -> bool {
    match subst.get(from) {
        Some(existing) => existing == into,
        None => {
            subst.insert(from.clone(), into.clone());
            true
        }
    }
}

fn unify_into(from: &Term, into: &Term, subst: &mut Substitution) -> bool {
    match (from, into) {
        (Term::Variable(_), _) => bind(subst, from, into),
        (Term::Blank(_), Term::Blank(_)) => bind(subst, from, into),
        (Term::List(a), Term::List(b)) => {
            a.len() == b.len()
                && a.iter().zip(b.iter()).all(|(x, y)| unify_into(x, y, subst))
        }
        _ => from == into,
    }
}

/// Directed unifier making `from` equal to `into`.
pub fn unify_terms(from: &Term, into: &Term) -> Option<Substitution> {
    let mut subst = Substitution::new();
    unify_into(from, into, &mut subst).then_some(subst)
}

/// Extend `base` so that it also makes `from` equal to `into`.
pub fn unify_terms_with(from: &Term, into: &Term, base: &Substitution) -> Option<Substitution> {
    let mut subst = base.clone();
    unify_into(from, into, &mut subst).then_some(subst)
}

/// Position-wise directed unifier of two equally long term lists.
pub fn unify_term_lists(from: &[Term], into: &[Term]) -> Option<Substitution> {
    if from.len() != into.len() {
        return None;
    }
    let mut subst = Substitution::new();
    from.iter()
        .zip(into.iter())
        .all(|(a, b)| unify_into(a, b, &mut subst))
        .then_some(subst)
}

/// Every unifier pairing `from` with some permutation of `into`.
pub fn unify_term_lists_unordered(from: &[Term], into: &[Term]) -> Vec<Substitution> {
    if from.len() != into.len() {
        return Vec::new();
    }
    InjectiveSearch::new(from, into, |a: &Term, b: &Term, current| {
        unify_terms_with(a, b, current)
    })
    .run()
}

/// Directed unifier of two argument lists.
///
/// Besides the terms, the list expander and every expansion mark must agree.
pub fn unify_arguments(from: &ArgumentList, into: &ArgumentList) -> Option<Substitution> {
    unify_arguments_with(from, into, &Substitution::new())
}

fn unify_arguments_with(
    from: &ArgumentList,
    into: &ArgumentList,
    base: &Substitution,
) -> Option<Substitution> {
    if from.len() != into.len() || from.expander() != into.expander() {
        return None;
    }
    let mut subst = base.clone();
    for (a, b) in from.iter().zip(into.iter()) {
        if a.list_expander != b.list_expander || !unify_into(&a.term, &b.term, &mut subst) {
            return None;
        }
    }
    Some(subst)
}

/// Every unifier mapping the instances of `from` injectively onto instances
/// of `into` with the same template IRI.
///
/// Both bodies are searched in IRI order, then by their written form, so
/// unifiers come out in the same order whatever order the bodies were given in.
///
/// `from` must be non-empty and no larger than `into`.
pub fn unify_bodies(from: &[Instance], into: &[Instance]) -> Vec<Substitution> {
    if from.is_empty() || from.len() > into.len() {
        return Vec::new();
    }
    let mut from_sorted: Vec<&Instance> = from.iter().collect();
    from_sorted.sort_by_cached_key(|i| (i.iri().to_string(), i.to_string()));
    let mut into_sorted: Vec<&Instance> = into.iter().collect();
    into_sorted.sort_by_cached_key(|i| (i.iri().to_string(), i.to_string()));

    InjectiveSearch::new(&from_sorted, &into_sorted, |a: &&Instance, b: &&Instance, current| {
        if a.iri() != b.iri() {
            return None;
        }
        unify_arguments_with(a.arguments(), b.arguments(), current)
    })
    .run()
}

/// Backtracking search for injective mappings `from -> into`.
struct InjectiveSearch<'a, T, F> {
    from: &'a [T],
    into: &'a [T],
    unify: F,
    used: Vec<bool>,
    attempts: usize,
    found: Vec<Substitution>,
}

impl<'a, T, F> InjectiveSearch<'a, T, F>
where
    F: Fn(&T, &T, &Substitution) -> Option<Substitution>,
{
    fn new(from: &'a [T], into: &'a [T], unify: F) -> Self {
        Self {
            from,
            into,
            unify,
            used: vec![false; into.len()],
            attempts: 0,
            found: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Substitution> {
        self.search(0, Substitution::new());
        if self.attempts >= SEARCH_LIMIT {
            tracing::debug!(
                attempts = self.attempts,
                found = self.found.len(),
                "unification search stopped at limit"
            );
        }
        self.found
    }

    fn search(&mut self, index: usize, current: Substitution) {
        if index == self.from.len() {
            if !self.found.contains(&current) {
                self.found.push(current);
            }
            return;
        }
        for j in 0..self.into.len() {
            if self.attempts >= SEARCH_LIMIT {
                return;
            }
            if self.used[j] {
                continue;
            }
            self.attempts += 1;
            if let Some(next) = (self.unify)(&self.from[index], &self.into[j], &current) {
                self.used[j] = true;
                self.search(index + 1, next);
                self.used[j] = false;
            }
        }
    }
}
