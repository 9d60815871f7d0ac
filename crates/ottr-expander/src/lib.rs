//! Expansion of OTTR template instances.
//!
//! ## Components
//!
//! - [`Expander`]: expands top-level instances lazily
//!   ([`Expander::expand_instance`]) or whole stores
//!   ([`Expander::expand_all`], [`Expander::expand_vocabulary`]).
//! - [`ExpanderConfig`]: argument checking, iteration bound, fetching.
//! - [`refactor`]: rewrite one template to instantiate another.
//!
//! # Example
//!
//! ```
//! use ottr_core::{Instance, Parameter, ParameterList, Template, Term, Type};
//! use ottr_expander::Expander;
//! use ottr_store::TemplateStore;
//!
//! let mut store = TemplateStore::with_base_templates();
//! let params: ParameterList = [Parameter::new("x", Type::top())].into_iter().collect();
//! store.add_template(Template::new(
//!     "http://example.com/Thing",
//!     params,
//!     [Instance::triple(
//!         Term::var("x"),
//!         Term::iri("http://www.w3.org/1999/02/22-rdf-syntax-ns#type"),
//!         Term::iri("http://example.com/Thing"),
//!     )],
//! ));
//!
//! let output = Expander::new(&store).expand_instances([Instance::from_terms(
//!     "http://example.com/Thing",
//!     [Term::iri("http://example.com/a")],
//! )]);
//! assert_eq!(output.instances.len(), 1);
//! assert!(output.messages.is_empty());
//! ```

mod config;
mod error;
mod expander;
mod refactor;

pub use config::{DEFAULT_MAX_ITERATIONS, ExpanderConfig};
pub use error::{ExpansionError, RefactorError};
pub use expander::{Expander, Expansion, ExpansionOutput, StoreExpansion};
pub use refactor::refactor;
