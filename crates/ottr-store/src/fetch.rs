//! Fetching missing templates.
//!
//! A store typically starts with the templates a user wrote, whose bodies
//! reference templates from libraries. [`TemplateStore::fetch_missing_dependencies`]
//! resolves those references until nothing is missing or nothing more can be
//! found:
//!
//! 1. a registered standard library store is consulted first,
//! 2. then the [`TemplateReader`] collaborator.
//!
//! IRIs that cannot be resolved are remembered as failed and are never
//! retried by the same store.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use ottr_core::{Message, Messages};

use crate::error::ReaderError;
use crate::store::{NodeKind, TemplateStore};

/// Source of template definitions, typically backed by files or the web.
///
/// Implementations add whatever they parse for `iri` to `store`; adding
/// more than the requested template is allowed.
pub trait TemplateReader {
    fn populate_template_store(
        &mut self,
        store: &mut TemplateStore,
        iri: &str,
    ) -> Result<(), ReaderError>;
}

impl<F> TemplateReader for F
where
    F: FnMut(&mut TemplateStore, &str) -> Result<(), ReaderError>,
{
    fn populate_template_store(
        &mut self,
        store: &mut TemplateStore,
        iri: &str,
    ) -> Result<(), ReaderError> {
        self(store, iri)
    }
}

/// A reader that never finds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReader;

impl TemplateReader for NoReader {
    fn populate_template_store(
        &mut self,
        _store: &mut TemplateStore,
        iri: &str,
    ) -> Result<(), ReaderError> {
        Err(ReaderError::NotFound {
            iri: iri.to_string(),
        })
    }
}

impl TemplateStore {
    /// Register a read-only store consulted before the reader.
    pub fn register_standard_library(&mut self, library: Arc<TemplateStore>) {
        self.standard_library = Some(library);
    }

    pub fn standard_library(&self) -> Option<&TemplateStore> {
        self.standard_library.as_deref()
    }

    /// IRIs that failed to fetch.
    pub fn failed_iris(&self) -> &FxHashSet<String> {
        &self.failed
    }

    /// Resolve every missing dependency, repeating until a fixpoint.
    ///
    /// Each round fetches the current missing set (minus IRIs that already
    /// failed). The loop stops when nothing is missing, when the missing
    /// set no longer changes, or after
    /// [`max_fetch_rounds`](crate::StoreConfig::max_fetch_rounds).
    ///
    /// Reader errors never abort the loop; they are reported as warnings in
    /// the returned messages, together with anything adds recorded while
    /// fetching.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn fetch_missing_dependencies(&mut self, reader: &mut dyn TemplateReader) -> Messages {
        let earlier = self.take_messages();
        let mut messages = Messages::new();
        let max_rounds = self.config().max_fetch_rounds();

        let mut missing = self.unfetched();
        let mut rounds = 0;
        let mut settled = missing.is_empty();
        while !settled && rounds < max_rounds {
            rounds += 1;
            tracing::debug!(round = rounds, missing = missing.len(), "fetch round");
            self.fetch_each(&missing, reader, &mut messages);

            let next = self.unfetched();
            settled = next.is_empty() || next == missing;
            missing = next;
        }

        if !settled {
            tracing::warn!(rounds, missing = missing.len(), "fetch round limit reached");
            messages.push(Message::warning(format!(
                "Stopped fetching after {} rounds with {} templates still missing",
                rounds,
                missing.len()
            )));
        }

        let produced = std::mem::replace(&mut self.messages, earlier);
        messages.append(produced);
        messages
    }

    /// Fetch a given set of IRIs once, without following new references.
    pub fn fetch_dependencies(
        &mut self,
        iris: &[&str],
        reader: &mut dyn TemplateReader,
    ) -> Messages {
        let mut wanted: Vec<String> = iris
            .iter()
            .filter(|iri| !self.is_resolved(iri) && !self.failed.contains(**iri))
            .map(|iri| iri.to_string())
            .collect();
        wanted.sort();
        wanted.dedup();

        let mut messages = Messages::new();
        self.fetch_each(&wanted, reader, &mut messages);
        messages
    }

    fn fetch_each(
        &mut self,
        iris: &[String],
        reader: &mut dyn TemplateReader,
        messages: &mut Messages,
    ) {
        for iri in iris {
            tracing::debug!(iri = %iri, "fetching template");
            if self.fetch_from_library(iri) {
                messages.push(Message::info(format!(
                    "Fetched template {} from the standard library",
                    iri
                )));
                continue;
            }

            let failure = match reader.populate_template_store(self, iri) {
                Ok(()) if self.is_resolved(iri) => None,
                Ok(()) => Some(format!("reader did not provide a definition for {}", iri)),
                Err(err) => Some(err.to_string()),
            };

            match failure {
                None => {
                    messages.push(Message::info(format!("Fetched template {}", iri)));
                }
                Some(reason) => {
                    tracing::warn!(iri = %iri, reason = %reason, "failed to fetch template");
                    messages.push(Message::warning(format!(
                        "Failed to fetch template {}: {}",
                        iri, reason
                    )));
                    self.failed.insert(iri.clone());
                }
            }
        }
    }

    fn fetch_from_library(&mut self, iri: &str) -> bool {
        if !self.config().fetch_from_standard_library() {
            return false;
        }
        let Some(library) = self.standard_library.clone() else {
            return false;
        };
        match library.kind(iri) {
            Some(NodeKind::Definition) => match library.get_template(iri) {
                Ok(template) => self.add_template(template),
                Err(_) => false,
            },
            Some(NodeKind::Base) => match library.get_signature(iri) {
                Ok(signature) => self.add_base(signature),
                Err(_) => false,
            },
            _ => false,
        }
    }

    fn is_resolved(&self, iri: &str) -> bool {
        matches!(self.kind(iri), Some(NodeKind::Definition | NodeKind::Base))
    }

    /// Missing IRIs that have not failed yet, sorted.
    fn unfetched(&self) -> Vec<String> {
        let mut missing: Vec<String> = self
            .missing_dependencies()
            .into_iter()
            .filter(|iri| !self.failed.contains(iri))
            .collect();
        missing.sort();
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ottr_core::{Instance, Parameter, ParameterList, Severity, Template, Term, Type};

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn one_param() -> ParameterList {
        [Parameter::new("x", Type::top())].into_iter().collect()
    }

    fn calls(iri: &str, callee: &str) -> Template {
        Template::new(
            iri,
            one_param(),
            [Instance::from_terms(callee, [Term::var("x")])],
        )
    }

    fn leaf(iri: &str) -> Template {
        Template::new(
            iri,
            one_param(),
            [Instance::triple(
                Term::var("x"),
                Term::iri("ex:p"),
                Term::iri("ex:o"),
            )],
        )
    }

    #[test]
    fn fetches_transitively() {
        init_tracing();
        let mut store = TemplateStore::with_base_templates();
        store.add_template(calls("ex:A", "ex:B"));

        let mut reader = |store: &mut TemplateStore, iri: &str| -> Result<(), ReaderError> {
            match iri {
                "ex:B" => {
                    store.add_template(calls("ex:B", "ex:C"));
                    Ok(())
                }
                "ex:C" => {
                    store.add_template(leaf("ex:C"));
                    Ok(())
                }
                other => Err(ReaderError::NotFound {
                    iri: other.to_string(),
                }),
            }
        };

        let messages = store.fetch_missing_dependencies(&mut reader);
        assert!(store.missing_dependencies().is_empty());
        assert_eq!(messages.count(Severity::Info), 2);
        assert!(!messages.has_errors());
    }

    #[test]
    fn failures_are_not_retried() {
        init_tracing();
        let mut store = TemplateStore::with_base_templates();
        store.add_template(calls("ex:A", "ex:Gone"));

        let mut attempts = 0;
        let mut reader = |_: &mut TemplateStore, iri: &str| -> Result<(), ReaderError> {
            attempts += 1;
            Err(ReaderError::NotFound {
                iri: iri.to_string(),
            })
        };

        let messages = store.fetch_missing_dependencies(&mut reader);
        assert_eq!(messages.warning_count(), 1);
        assert!(store.failed_iris().contains("ex:Gone"));

        store.fetch_missing_dependencies(&mut reader);
        assert_eq!(attempts, 1);
        assert!(store.missing_dependencies().contains("ex:Gone"));
    }

    #[test]
    fn reader_without_definition_is_a_failure() {
        let mut store = TemplateStore::new();
        store.add_template(calls("ex:A", "ex:B"));
        let mut reader = |_: &mut TemplateStore, _: &str| -> Result<(), ReaderError> { Ok(()) };

        let messages = store.fetch_missing_dependencies(&mut reader);
        assert_eq!(messages.warning_count(), 1);
        assert!(store.failed_iris().contains("ex:B"));
    }

    #[test]
    fn standard_library_consulted_first() {
        let mut library = TemplateStore::with_base_templates();
        library.add_template(leaf("ex:Lib"));

        let mut store = TemplateStore::new();
        store.register_standard_library(Arc::new(library));
        store.add_template(calls("ex:A", "ex:Lib"));

        let messages = store.fetch_missing_dependencies(&mut NoReader);
        assert!(store.contains_definition_of("ex:Lib"));
        assert!(store.contains_base(ottr_core::vocab::base::TRIPLE));
        assert!(store.missing_dependencies().is_empty());
        assert_eq!(messages.warning_count(), 0);
    }

    #[test]
    fn round_limit_reported() {
        let config = crate::StoreConfig::new().with_max_fetch_rounds(1);
        let mut store = TemplateStore::with_config(config);
        store.add_base_templates();
        store.add_template(calls("ex:A", "ex:B"));

        let mut reader = |store: &mut TemplateStore, iri: &str| -> Result<(), ReaderError> {
            if iri == "ex:B" {
                store.add_template(calls("ex:B", "ex:C"));
            }
            Ok(())
        };

        let messages = store.fetch_missing_dependencies(&mut reader);
        assert!(store.missing_dependencies().contains("ex:C"));
        assert!(
            messages
                .iter()
                .any(|m| m.text.contains("Stopped fetching after 1 rounds"))
        );
    }

    #[test]
    fn fixpoint_in_last_round_is_not_a_limit() {
        let config = crate::StoreConfig::new().with_max_fetch_rounds(2);
        let mut store = TemplateStore::with_config(config);
        store.add_base_templates();
        store.add_template(calls("ex:A", "ex:B"));

        let mut reader = |store: &mut TemplateStore, iri: &str| -> Result<(), ReaderError> {
            match iri {
                "ex:B" => store.add_template(calls("ex:B", "ex:C")),
                _ => store.add_template(leaf(iri)),
            };
            Ok(())
        };

        let messages = store.fetch_missing_dependencies(&mut reader);
        assert!(store.missing_dependencies().is_empty());
        assert_eq!(messages.count(Severity::Info), 2);
        assert!(!messages.iter().any(|m| m.text.contains("Stopped fetching")));
    }

    #[test]
    fn fetch_dependencies_is_single_pass() {
        let mut store = TemplateStore::new();
        let mut reader = |store: &mut TemplateStore, iri: &str| -> Result<(), ReaderError> {
            store.add_template(calls(iri, "ex:Next"));
            Ok(())
        };
        let messages = store.fetch_dependencies(&["ex:A"], &mut reader);
        assert_eq!(messages.count(Severity::Info), 1);
        assert!(store.contains_definition_of("ex:A"));
        assert!(store.missing_dependencies().contains("ex:Next"));
    }
}
