//! Substitutions: maps from variables to terms.
//!
//! A [`Substitution`] rewrites terms, argument lists, instances and whole
//! template bodies homomorphically, recursing into lists. It is built either
//! from an instance's arguments and the callee's parameters (expansion) or
//! by unification (refactoring and queries).

use std::fmt;

use rustc_hash::FxHashMap;

use crate::argument::ArgumentList;
use crate::error::SubstitutionError;
use crate::instance::Instance;
use crate::parameter::ParameterList;
use crate::term::Term;

/// A finite map from variables (or blank nodes) to terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    map: FxHashMap<Term, Term>,
}

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair `args` with `params` position by position.
    ///
    /// A `none` argument at a parameter with a default is replaced by the
    /// default; a blank-node default gets a fresh blank node every time.
    ///
    /// # Errors
    /// Returns [`SubstitutionError::ArityMismatch`] if the lists differ in
    /// length.
    pub fn from_arguments(
        args: &ArgumentList,
        params: &ParameterList,
    ) -> Result<Self, SubstitutionError> {
        if args.len() != params.len() {
            return Err(SubstitutionError::ArityMismatch {
                expected: params.len(),
                got: args.len(),
            });
        }

        let mut map = FxHashMap::default();
        for (arg, param) in args.iter().zip(params.iter()) {
            let value = match (&arg.term, param.default_value()) {
                (Term::None, Some(Term::Blank(_))) => Term::fresh_blank(),
                (Term::None, Some(default)) => default.clone(),
                (term, _) => term.clone(),
            };
            map.insert(param.term(), value);
        }
        Ok(Self { map })
    }

    /// Bind `from` to `to`, returning the previous binding.
    pub fn insert(&mut self, from: Term, to: Term) -> Option<Term> {
        self.map.insert(from, to)
    }

    pub fn get(&self, from: &Term) -> Option<&Term> {
        self.map.get(from)
    }

    pub fn contains(&self, from: &Term) -> bool {
        self.map.contains_key(from)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Term, &Term)> {
        self.map.iter()
    }

    // ==========================================================================
    // Application
    // ==========================================================================

    /// Rewrite a term. Unmapped terms are kept as they are.
    pub fn apply(&self, term: &Term) -> Term {
        if let Some(mapped) = self.map.get(term) {
            return mapped.clone();
        }
        match term {
            Term::List(terms) => Term::List(terms.iter().map(|t| self.apply(t)).collect()),
            other => other.clone(),
        }
    }

    pub fn apply_arguments(&self, args: &ArgumentList) -> ArgumentList {
        args.map_terms(|term| self.apply(term))
    }

    pub fn apply_instance(&self, instance: &Instance) -> Instance {
        Instance::new(instance.iri(), self.apply_arguments(instance.arguments()))
    }

    /// Rewrite a template body.
    ///
    /// Blank nodes the substitution does not map are replaced by fresh
    /// blank nodes, consistently across the whole body, so two expansions of
    /// the same template never share blank nodes.
    pub fn apply_body(&self, body: &[Instance]) -> Vec<Instance> {
        let mut working = self.clone();
        body.iter()
            .map(|instance| {
                let args = instance
                    .arguments()
                    .map_terms(|term| working.apply_freshening(term));
                Instance::new(instance.iri(), args)
            })
            .collect()
    }

    fn apply_freshening(&mut self, term: &Term) -> Term {
        if let Some(mapped) = self.map.get(term) {
            return mapped.clone();
        }
        match term {
            Term::Blank(_) => {
                let fresh = Term::fresh_blank();
                self.map.insert(term.clone(), fresh.clone());
                fresh
            }
            Term::List(terms) => {
                Term::List(terms.iter().map(|t| self.apply_freshening(t)).collect())
            }
            other => other.clone(),
        }
    }

    // ==========================================================================
    // Merging
    // ==========================================================================

    /// Union of both maps.
    ///
    /// Returns `None` if the two substitutions bind a shared key to
    /// different terms.
    pub fn merge_with_unification(&self, other: &Substitution) -> Option<Substitution> {
        let mut merged = self.clone();
        for (from, to) in &other.map {
            match merged.map.get(from) {
                Some(existing) if existing != to => return None,
                Some(_) => {}
                None => {
                    merged.map.insert(from.clone(), to.clone());
                }
            }
        }
        Some(merged)
    }
}

impl FromIterator<(Term, Term)> for Substitution {
    fn from_iter<T: IntoIterator<Item = (Term, Term)>>(iter: T) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pairs: Vec<String> = self
            .map
            .iter()
            .map(|(from, to)| format!("{} -> {}", from, to))
            .collect();
        pairs.sort();
        write!(f, "{{{}}}", pairs.join(", "))
    }
}
