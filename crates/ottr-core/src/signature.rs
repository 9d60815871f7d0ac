//! Signatures, templates and store declarations.
//!
//! ## Components
//!
//! - [`Signature`]: name and parameters, optionally marked as a base template.
//! - [`Template`]: a signature with a body of instances.
//! - [`Declaration`]: what readers hand to the store.
//! - [`base_templates`]: the built-in OTTR base templates.

use std::fmt;

use crate::instance::Instance;
use crate::parameter::{Parameter, ParameterList};
use crate::term::Term;
use crate::types::Type;
use crate::vocab;

/// A template name with its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    iri: String,
    parameters: ParameterList,
    is_base: bool,
}

impl Signature {
    /// A plain signature (forward declaration).
    pub fn new(iri: impl Into<String>, parameters: ParameterList) -> Self {
        Self {
            iri: iri.into(),
            parameters,
            is_base: false,
        }
    }

    /// A base template: a primitive that expansion never looks into.
    pub fn base(iri: impl Into<String>, parameters: ParameterList) -> Self {
        Self {
            iri: iri.into(),
            parameters,
            is_base: true,
        }
    }

    pub fn iri(&self) -> &str {
        &self.iri
    }

    pub fn parameters(&self) -> &ParameterList {
        &self.parameters
    }

    pub fn is_base(&self) -> bool {
        self.is_base
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", vocab::compact(&self.iri), self.parameters)?;
        if self.is_base {
            f.write_str(" :: BASE")?;
        }
        Ok(())
    }
}

/// A signature together with its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    signature: Signature,
    body: Vec<Instance>,
}

impl Template {
    /// Build a template.
    ///
    /// Body variables whose label matches a parameter take the parameter's
    /// declared type. Duplicate body instances are dropped; the body is a set.
    pub fn new(
        iri: impl Into<String>,
        parameters: ParameterList,
        body: impl IntoIterator<Item = Instance>,
    ) -> Self {
        let signature = Signature::new(iri, parameters);
        let mut instances: Vec<Instance> = Vec::new();
        for instance in body {
            let args = instance
                .arguments()
                .map_terms(|term| retype(term, signature.parameters()));
            let instance = Instance::new(instance.iri(), args);
            if !instances.contains(&instance) {
                instances.push(instance);
            }
        }
        Self {
            signature,
            body: instances,
        }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn into_parts(self) -> (Signature, Vec<Instance>) {
        (self.signature, self.body)
    }

    pub fn iri(&self) -> &str {
        self.signature.iri()
    }

    pub fn parameters(&self) -> &ParameterList {
        self.signature.parameters()
    }

    pub fn body(&self) -> &[Instance] {
        &self.body
    }
}

fn retype(term: &Term, parameters: &ParameterList) -> Term {
    match term {
        Term::Variable(var) => match parameters.find(var.label()) {
            Some(param) => param.term(),
            None => term.clone(),
        },
        Term::List(terms) => Term::List(terms.iter().map(|t| retype(t, parameters)).collect()),
        other => other.clone(),
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} :: {{", self.signature)?;
        for (i, instance) in self.body.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, " {}", instance)?;
        }
        f.write_str(" }")
    }
}

/// Anything a reader can add to a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// A signature or base template.
    Signature(Signature),
    /// A full definition.
    Template(Template),
}

impl Declaration {
    pub fn iri(&self) -> &str {
        match self {
            Declaration::Signature(sig) => sig.iri(),
            Declaration::Template(template) => template.iri(),
        }
    }
}

impl From<Signature> for Declaration {
    fn from(sig: Signature) -> Self {
        Declaration::Signature(sig)
    }
}

impl From<Template> for Declaration {
    fn from(template: Template) -> Self {
        Declaration::Template(template)
    }
}

/// The built-in base templates `ottr:Triple` and `ottr:NullableTriple`.
pub fn base_templates() -> Vec<Signature> {
    let triple = ParameterList::new(vec![
        Parameter::new("subject", Type::iri()),
        Parameter::new("predicate", Type::iri()).non_blank(),
        Parameter::new("object", Type::top()),
    ]);
    let nullable = ParameterList::new(vec![
        Parameter::new("subject", Type::iri()).optional(),
        Parameter::new("predicate", Type::iri()).optional().non_blank(),
        Parameter::new("object", Type::top()).optional(),
    ]);
    vec![
        Signature::base(vocab::base::TRIPLE, triple),
        Signature::base(vocab::base::NULLABLE_TRIPLE, nullable),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_variables_take_parameter_types() {
        let params = ParameterList::new(vec![Parameter::new("x", Type::iri())]);
        let template = Template::new(
            "http://e.com/T",
            params,
            [Instance::triple(
                Term::var("x"),
                Term::iri("http://e.com/p"),
                Term::list([Term::var("x"), Term::var("free")]),
            )],
        );
        let args = template.body()[0].arguments();
        assert_eq!(args.term(0).unwrap().ty(), Type::iri());
        let inner = args.term(2).unwrap().as_list().unwrap();
        assert_eq!(inner[0].ty(), Type::iri());
        assert_eq!(inner[1].ty(), Type::top());
    }

    #[test]
    fn body_is_a_set() {
        let ins = Instance::triple(Term::iri("a"), Term::iri("p"), Term::iri("b"));
        let template = Template::new(
            "http://e.com/T",
            ParameterList::default(),
            [ins.clone(), ins],
        );
        assert_eq!(template.body().len(), 1);
    }

    #[test]
    fn triple_base_template_shape() {
        let bases = base_templates();
        let triple = &bases[0];
        assert!(triple.is_base());
        assert_eq!(triple.parameters().len(), 3);
        assert!(triple.parameters().get(1).unwrap().is_non_blank());
        assert!(bases[1].parameters().iter().all(Parameter::is_optional));
    }
}
