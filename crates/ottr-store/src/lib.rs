//! Template store for OTTR.
//!
//! ## Components
//!
//! - [`TemplateStore`]: signatures, base templates and definitions in a
//!   dependency graph, with forward and reverse lookups.
//! - [`TopologicalOrder`]: dependency ordering used by full expansion.
//! - [`TemplateReader`]: collaborator that loads templates on demand, driven
//!   by [`TemplateStore::fetch_missing_dependencies`].
//! - [`StoreConfig`]: fetch loop settings.
//!
//! # Example
//!
//! ```
//! use ottr_core::{Instance, Parameter, ParameterList, Template, Term, Type};
//! use ottr_store::TemplateStore;
//!
//! let mut store = TemplateStore::with_base_templates();
//! let params: ParameterList = [Parameter::new("x", Type::top())].into_iter().collect();
//! let template = Template::new(
//!     "http://example.com/Thing",
//!     params,
//!     [Instance::triple(
//!         Term::var("x"),
//!         Term::iri("http://www.w3.org/1999/02/22-rdf-syntax-ns#type"),
//!         Term::iri("http://example.com/Thing"),
//!     )],
//! );
//!
//! assert!(store.add_template(template));
//! assert!(store.missing_dependencies().is_empty());
//! ```

mod config;
mod error;
mod fetch;
mod order;
mod store;

pub use config::{DEFAULT_MAX_FETCH_ROUNDS, StoreConfig};
pub use error::{ReaderError, StoreError};
pub use fetch::{NoReader, TemplateReader};
pub use order::TopologicalOrder;
pub use store::{NodeKind, TemplateNode, TemplateStore};
