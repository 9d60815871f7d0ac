//! OTTR template expansion.
//!
//! Reasonable Ontology Templates describe RDF patterns as named,
//! parameterised templates. This crate ties the workspace together:
//!
//! ## Components
//!
//! - [`core`]: terms, types, parameters, instances, templates and
//!   unification.
//! - [`store`]: the template store and its dependency graph.
//! - [`expander`]: lazy instance expansion, store expansion and
//!   refactoring.
//! - [`query`]: relational queries, well-formedness checks and
//!   refactoring search.
//! - [`OttrError`]: one error type over all of the above.
//!
//! Most programs only need the [`prelude`].
//!
//! # Example
//!
//! ```
//! use ottr::prelude::*;
//!
//! let mut store = TemplateStore::with_base_templates();
//! let params: ParameterList = [Parameter::new("x", Type::iri())].into_iter().collect();
//! store.add_template(Template::new(
//!     "http://example.com/Person",
//!     params,
//!     [Instance::triple(
//!         Term::var("x"),
//!         Term::iri("http://www.w3.org/1999/02/22-rdf-syntax-ns#type"),
//!         Term::iri("http://example.com/Person"),
//!     )],
//! ));
//! assert!(!check_templates(&store).has_errors());
//!
//! let output = Expander::new(&store).expand_instances([Instance::from_terms(
//!     "http://example.com/Person",
//!     [Term::iri("http://example.com/ann")],
//! )]);
//! assert_eq!(output.instances.len(), 1);
//! assert!(output.instances[0].is_triple());
//! ```

mod error;

pub use error::{OttrError, OttrResult};

pub use ottr_core as core;
pub use ottr_expander as expander;
pub use ottr_query as query;
pub use ottr_store as store;

pub mod prelude {
    pub use crate::error::{OttrError, OttrResult};

    pub use ottr_core::{
        Argument, ArgumentList, Instance, ListExpander, Message, Messages, Parameter,
        ParameterFlags, ParameterList, Severity, Signature, Substitution, Template, Term, Type,
        Variable,
    };
    pub use ottr_expander::{Expander, ExpanderConfig, ExpansionError, RefactorError, refactor};
    pub use ottr_query::{Query, check_templates, find_equal_templates, find_refactorings};
    pub use ottr_store::{ReaderError, StoreConfig, StoreError, TemplateReader, TemplateStore};
}
