//! Instance arguments and list expansion.
//!
//! ## Components
//!
//! - [`Argument`]: a term plus a flag marking it for list expansion.
//! - [`ArgumentList`]: the arguments of one instance and its optional
//!   [`ListExpander`].
//! - [`ListExpander::expand`]: turns one argument list into many by
//!   iterating the marked list arguments.

use std::fmt;

use crate::term::Term;

/// Expansion modifier of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListExpander {
    /// One instance per combination of elements (cartesian product).
    Cross,
    /// Pair elements by index, stopping at the shortest list.
    ZipMin,
    /// Pair elements by index up to the longest list.
    ZipMax,
}

impl fmt::Display for ListExpander {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ListExpander::Cross => "cross",
            ListExpander::ZipMin => "zipMin",
            ListExpander::ZipMax => "zipMax",
        };
        f.write_str(s)
    }
}

/// One step of a list expansion.
///
/// Only [`ListExpander::ZipMax`] produces [`ExpansionStep::Exhausted`]: a
/// step where some marked list had no element left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpansionStep {
    Expanded(ArgumentList),
    Exhausted {
        /// Zero-based step index.
        step: usize,
        /// Argument positions whose list ran out.
        positions: Vec<usize>,
    },
}

impl ListExpander {
    /// Expand `args`, clearing the modifier and every expansion mark.
    ///
    /// A marked `none` behaves like a one-element list containing `none`.
    /// Marked arguments must already be lists or `none`; see
    /// [`ArgumentList::can_expand_lists`].
    pub fn expand(self, args: &ArgumentList) -> Vec<ExpansionStep> {
        match self {
            ListExpander::Cross => cross(args)
                .into_iter()
                .map(ExpansionStep::Expanded)
                .collect(),
            ListExpander::ZipMin => {
                let len = marked_lengths(args).min().unwrap_or(0);
                zip(args, len)
            }
            ListExpander::ZipMax => {
                let len = marked_lengths(args).max().unwrap_or(0);
                zip(args, len)
            }
        }
    }
}

fn marked_elements(term: &Term) -> &[Term] {
    match term {
        Term::List(terms) => terms,
        _ => std::slice::from_ref(term),
    }
}

fn marked_lengths(args: &ArgumentList) -> impl Iterator<Item = usize> + '_ {
    args.iter()
        .filter(|a| a.list_expander)
        .map(|a| marked_elements(&a.term).len())
}

fn cross(args: &ArgumentList) -> Vec<ArgumentList> {
    let mut expanded: Vec<Vec<Argument>> = vec![Vec::with_capacity(args.len())];
    for arg in args.iter() {
        if arg.list_expander {
            let elements = marked_elements(&arg.term);
            let mut next = Vec::with_capacity(expanded.len() * elements.len());
            for prefix in &expanded {
                for element in elements {
                    let mut row = prefix.clone();
                    row.push(Argument::new(element.clone()));
                    next.push(row);
                }
            }
            expanded = next;
        } else {
            for row in &mut expanded {
                row.push(arg.clone());
            }
        }
    }
    expanded.into_iter().map(ArgumentList::new).collect()
}

fn zip(args: &ArgumentList, len: usize) -> Vec<ExpansionStep> {
    (0..len)
        .map(|step| {
            let mut row = Vec::with_capacity(args.len());
            let mut exhausted = Vec::new();
            for (position, arg) in args.iter().enumerate() {
                if !arg.list_expander {
                    row.push(arg.clone());
                    continue;
                }
                let elements = marked_elements(&arg.term);
                match elements.get(step) {
                    Some(element) => row.push(Argument::new(element.clone())),
                    None if arg.term.is_none() => row.push(Argument::new(Term::None)),
                    None => exhausted.push(position),
                }
            }
            if exhausted.is_empty() {
                ExpansionStep::Expanded(ArgumentList::new(row))
            } else {
                ExpansionStep::Exhausted {
                    step,
                    positions: exhausted,
                }
            }
        })
        .collect()
}

// ============================================================================
// Arguments
// ============================================================================

/// A single argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Argument {
    pub term: Term,
    /// Marked for list expansion.
    pub list_expander: bool,
}

impl Argument {
    pub fn new(term: Term) -> Self {
        Self {
            term,
            list_expander: false,
        }
    }

    /// An argument marked for list expansion.
    pub fn expanded(term: Term) -> Self {
        Self {
            term,
            list_expander: true,
        }
    }
}

impl From<Term> for Argument {
    fn from(term: Term) -> Self {
        Argument::new(term)
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.list_expander {
            f.write_str("++")?;
        }
        write!(f, "{}", self.term)
    }
}

/// The arguments of an instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ArgumentList {
    arguments: Vec<Argument>,
    expander: Option<ListExpander>,
}

impl ArgumentList {
    pub fn new(arguments: Vec<Argument>) -> Self {
        Self {
            arguments,
            expander: None,
        }
    }

    /// Unmarked arguments from plain terms.
    pub fn from_terms(terms: impl IntoIterator<Item = Term>) -> Self {
        Self::new(terms.into_iter().map(Argument::new).collect())
    }

    pub fn with_expander(mut self, expander: ListExpander) -> Self {
        self.expander = Some(expander);
        self
    }

    pub fn expander(&self) -> Option<ListExpander> {
        self.expander
    }

    pub fn has_expander(&self) -> bool {
        self.expander.is_some()
    }

    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Argument> {
        self.arguments.get(index)
    }

    pub fn term(&self, index: usize) -> Option<&Term> {
        self.arguments.get(index).map(|a| &a.term)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Argument> {
        self.arguments.iter()
    }

    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.arguments.iter().map(|a| &a.term)
    }

    /// Whether the argument at `index` is marked for list expansion.
    pub fn has_list_expander_at(&self, index: usize) -> bool {
        self.arguments
            .get(index)
            .is_some_and(|a| a.list_expander)
    }

    /// Positions marked for list expansion.
    pub fn marked_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.arguments
            .iter()
            .enumerate()
            .filter(|(_, a)| a.list_expander)
            .map(|(i, _)| i)
    }

    /// Whether every marked argument is already a list or `none`.
    ///
    /// A variable or blank node in a marked position is only resolved once
    /// the enclosing template is instantiated.
    pub fn can_expand_lists(&self) -> bool {
        self.arguments
            .iter()
            .filter(|a| a.list_expander)
            .all(|a| a.term.is_list() || a.term.is_none())
    }

    /// Apply `f` to every term, keeping marks and the modifier.
    pub fn map_terms(&self, mut f: impl FnMut(&Term) -> Term) -> ArgumentList {
        ArgumentList {
            arguments: self
                .arguments
                .iter()
                .map(|a| Argument {
                    term: f(&a.term),
                    list_expander: a.list_expander,
                })
                .collect(),
            expander: self.expander,
        }
    }

    /// Expand the list modifier; `None` if the list has no modifier.
    pub fn expand_lists(&self) -> Option<Vec<ExpansionStep>> {
        self.expander.map(|expander| expander.expand(self))
    }
}

impl FromIterator<Argument> for ArgumentList {
    fn from_iter<T: IntoIterator<Item = Argument>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for ArgumentList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(expander) = self.expander {
            write!(f, "{} | ", expander)?;
        }
        f.write_str("(")?;
        for (i, arg) in self.arguments.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", arg)?;
        }
        f.write_str(")")
    }
}
