//! Template parameters.

use std::fmt;

use bitflags::bitflags;

use crate::term::{Term, Variable};
use crate::types::Type;

bitflags! {
    /// Modifiers on a template parameter.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ParameterFlags: u8 {
        /// The argument may be `none`.
        const OPTIONAL = 0x01;
        /// The argument may not be a blank node.
        const NON_BLANK = 0x02;
    }
}

/// A single template parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    variable: Variable,
    flags: ParameterFlags,
    default: Option<Term>,
}

impl Parameter {
    /// A mandatory parameter with no default.
    pub fn new(label: impl Into<String>, ty: Type) -> Self {
        Self {
            variable: Variable::new(label, ty),
            flags: ParameterFlags::empty(),
            default: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.flags |= ParameterFlags::OPTIONAL;
        self
    }

    pub fn non_blank(mut self) -> Self {
        self.flags |= ParameterFlags::NON_BLANK;
        self
    }

    pub fn with_flags(mut self, flags: ParameterFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_default(mut self, default: Term) -> Self {
        self.default = Some(default);
        self
    }

    pub fn variable(&self) -> &Variable {
        &self.variable
    }

    /// The parameter as a variable term.
    pub fn term(&self) -> Term {
        Term::Variable(self.variable.clone())
    }

    pub fn label(&self) -> &str {
        self.variable.label()
    }

    pub fn ty(&self) -> &Type {
        self.variable.ty()
    }

    pub fn flags(&self) -> ParameterFlags {
        self.flags
    }

    pub fn is_optional(&self) -> bool {
        self.flags.contains(ParameterFlags::OPTIONAL)
    }

    pub fn is_non_blank(&self) -> bool {
        self.flags.contains(ParameterFlags::NON_BLANK)
    }

    pub fn default_value(&self) -> Option<&Term> {
        self.default.as_ref()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Whether `none` is acceptable here without dropping the instance.
    pub fn accepts_none(&self) -> bool {
        self.is_optional() || self.has_default()
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_optional() {
            f.write_str("? ")?;
        }
        if self.is_non_blank() {
            f.write_str("! ")?;
        }
        write!(f, "{} ?{}", self.ty(), self.label())?;
        if let Some(default) = &self.default {
            write!(f, " = {}", default)?;
        }
        Ok(())
    }
}

/// An ordered, fixed-length list of parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ParameterList {
    parameters: Vec<Parameter>,
}

impl ParameterList {
    pub fn new(parameters: Vec<Parameter>) -> Self {
        Self { parameters }
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Parameter> {
        self.parameters.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.parameters.iter()
    }

    /// Position of the parameter bound to `variable`.
    pub fn index_of(&self, variable: &Variable) -> Option<usize> {
        self.parameters.iter().position(|p| p.variable() == variable)
    }

    /// Look a parameter up by its variable label.
    pub fn find(&self, label: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.label() == label)
    }

    /// Parameter variables as terms, in order.
    pub fn terms(&self) -> Vec<Term> {
        self.parameters.iter().map(Parameter::term).collect()
    }

    /// Same length and the same optional/non-blank flags at every position.
    ///
    /// Types and defaults are not compared.
    pub fn matches_structure(&self, other: &ParameterList) -> bool {
        self.len() == other.len()
            && self
                .parameters
                .iter()
                .zip(other.parameters.iter())
                .all(|(a, b)| a.flags() == b.flags())
    }
}

impl FromIterator<Parameter> for ParameterList {
    fn from_iter<T: IntoIterator<Item = Parameter>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ParameterList {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.parameters.iter()
    }
}

impl fmt::Display for ParameterList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, param) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", param)?;
        }
        f.write_str("]")
    }
}
