//! Relational queries and static checks over OTTR template stores.
//!
//! ## Components
//!
//! - [`Tuple`] / [`Value`]: immutable variable bindings.
//! - [`QueryEngine`]: base relations over a [`TemplateStore`](ottr_store::TemplateStore).
//! - [`Query`]: composable relations with `and`, `or`, `not` and `distinct`,
//!   plus the predefined [`Query::unifies`] and [`Query::equal`].
//! - [`Check`] and [`library`]: well-formedness checks producing
//!   [`Messages`](ottr_core::Messages).
//! - [`find_refactorings`]: refactoring candidates found by unification.
//!
//! # Example
//!
//! ```
//! use ottr_core::{Instance, Parameter, ParameterList, Template, Term, Type};
//! use ottr_query::check_templates;
//! use ottr_store::TemplateStore;
//!
//! let mut store = TemplateStore::with_base_templates();
//! let params: ParameterList = [Parameter::new("x", Type::iri()), Parameter::new("unused", Type::top())]
//!     .into_iter()
//!     .collect();
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
//! let messages = check_templates(&store);
//! assert_eq!(messages.warning_count(), 1);
//! assert!(!messages.has_errors());
//! ```

mod checks;
mod engine;
mod query;
mod refactoring;
mod tuple;
mod value;

pub use checks::{Check, check_templates, check_templates_for, library};
pub use engine::{QueryEngine, Tuples};
pub use query::Query;
pub use refactoring::{find_equal_templates, find_refactorings};
pub use tuple::Tuple;
pub use value::Value;
