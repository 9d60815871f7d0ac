//! TemplateStore - keyed repository of signatures and template definitions.
//!
//! # Storage Model
//!
//! The store is a dependency graph (`petgraph::StableDiGraph`):
//!
//! - **Nodes**: one [`TemplateNode`] per IRI, in one of four [`NodeKind`]s.
//!   Templates that are referenced but never added exist as
//!   [`NodeKind::Undefined`] nodes.
//! - **Edges**: one per body instance, from the template to the callee,
//!   weighted with the instance's [`ArgumentList`].
//!
//! The reverse index ("which templates use this one") is the graph's
//! incoming adjacency, so it stays current on every add and remove.
//!
//! # Thread Safety
//!
//! The store is a single-writer structure scoped to one run: populate it,
//! then expand and check. Nothing inside guards against concurrent
//! mutation; callers sharing a store across threads must wrap it in their
//! own synchronization.

use std::fmt;
use std::sync::Arc;

use petgraph::Direction;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use rustc_hash::{FxHashMap, FxHashSet};

use ottr_core::{
    ArgumentList, Declaration, Instance, Message, Messages, ParameterList, Signature, Template,
    Term, base_templates,
};

use crate::config::StoreConfig;
use crate::error::StoreError;

/// The state of a store entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Referenced from some body but never added.
    Undefined,
    /// Only a signature is known.
    Signature,
    /// A base template; never expanded.
    Base,
    /// A full definition with a (possibly empty) body.
    Definition,
}

/// A node of the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateNode {
    iri: String,
    kind: NodeKind,
    parameters: Option<ParameterList>,
}

impl TemplateNode {
    fn undefined(iri: &str) -> Self {
        Self {
            iri: iri.to_string(),
            kind: NodeKind::Undefined,
            parameters: None,
        }
    }

    pub fn iri(&self) -> &str {
        &self.iri
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Parameters; `None` for undefined nodes.
    pub fn parameters(&self) -> Option<&ParameterList> {
        self.parameters.as_ref()
    }

    pub fn is_undefined(&self) -> bool {
        self.kind == NodeKind::Undefined
    }

    pub fn is_signature(&self) -> bool {
        self.kind == NodeKind::Signature
    }

    pub fn is_base(&self) -> bool {
        self.kind == NodeKind::Base
    }

    pub fn is_definition(&self) -> bool {
        self.kind == NodeKind::Definition
    }

    /// The node as a signature, if anything beyond the IRI is known.
    pub fn signature(&self) -> Option<Signature> {
        let params = self.parameters.clone()?;
        Some(match self.kind {
            NodeKind::Base => Signature::base(&self.iri, params),
            _ => Signature::new(&self.iri, params),
        })
    }
}

/// Keyed repository of signatures and template definitions.
pub struct TemplateStore {
    // === PRIMARY: dependency graph ===
    graph: StableDiGraph<TemplateNode, ArgumentList>,

    /// IRI -> node handle.
    index: FxHashMap<String, NodeIndex>,

    /// `ottr:Triple` predicate IRI -> templates whose body uses it.
    predicate_index: FxHashMap<String, FxHashSet<String>>,

    // === Fetching ===
    /// IRIs that failed to fetch; never retried.
    pub(crate) failed: FxHashSet<String>,

    /// Consulted before the reader when fetching.
    pub(crate) standard_library: Option<Arc<TemplateStore>>,

    /// Warnings and infos from adds.
    pub(crate) messages: Messages,

    config: StoreConfig,
}

impl TemplateStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            graph: StableDiGraph::new(),
            index: FxHashMap::default(),
            predicate_index: FxHashMap::default(),
            failed: FxHashSet::default(),
            standard_library: None,
            messages: Messages::new(),
            config,
        }
    }

    /// Create a store holding the OTTR base templates.
    pub fn with_base_templates() -> Self {
        let mut store = Self::new();
        store.add_base_templates();
        store
    }

    /// Add `ottr:Triple` and `ottr:NullableTriple`.
    pub fn add_base_templates(&mut self) {
        for base in base_templates() {
            self.add_base(base);
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // ==========================================================================
    // Node access
    // ==========================================================================

    /// Handle of the node for `iri`, if one exists (including undefined).
    pub fn node_index(&self, iri: &str) -> Option<NodeIndex> {
        self.index.get(iri).copied()
    }

    pub fn node(&self, iri: &str) -> Option<&TemplateNode> {
        self.node_index(iri).and_then(|idx| self.graph.node_weight(idx))
    }

    pub fn node_at(&self, idx: NodeIndex) -> Option<&TemplateNode> {
        self.graph.node_weight(idx)
    }

    pub fn kind(&self, iri: &str) -> Option<NodeKind> {
        self.node(iri).map(TemplateNode::kind)
    }

    /// The underlying dependency graph.
    pub fn graph(&self) -> &StableDiGraph<TemplateNode, ArgumentList> {
        &self.graph
    }

    fn ensure_node(&mut self, iri: &str) -> NodeIndex {
        if let Some(idx) = self.index.get(iri) {
            return *idx;
        }
        let idx = self.graph.add_node(TemplateNode::undefined(iri));
        self.index.insert(iri.to_string(), idx);
        idx
    }

    fn node_mut(&mut self, idx: NodeIndex) -> &mut TemplateNode {
        &mut self.graph[idx]
    }

    // ==========================================================================
    // Registration
    // ==========================================================================

    /// Add a reader's declaration, dispatching on its kind.
    pub fn accept(&mut self, declaration: Declaration) -> bool {
        match declaration {
            Declaration::Signature(sig) if sig.is_base() => self.add_base(sig),
            Declaration::Signature(sig) => self.add_signature(sig),
            Declaration::Template(template) => self.add_template(template),
        }
    }

    /// Add a base template.
    ///
    /// Rejected if the IRI is already defined, or declared with a
    /// structurally different parameter list.
    pub fn add_base(&mut self, signature: Signature) -> bool {
        let iri = signature.iri().to_string();
        if let Some(node) = self.node(&iri) {
            if node.is_definition() {
                self.reject(&iri, "is already defined as a template");
                return false;
            }
            if let Some(existing) = node.parameters() {
                if !existing.matches_structure(signature.parameters()) {
                    self.reject(&iri, "is already in the store with different parameters");
                    return false;
                }
            }
        }

        let idx = self.ensure_node(&iri);
        let node = self.node_mut(idx);
        node.kind = NodeKind::Base;
        node.parameters = Some(signature.parameters().clone());
        tracing::debug!(iri = %iri, "added base template");
        true
    }

    /// Add a signature (forward declaration).
    ///
    /// Only succeeds for IRIs that are unknown or merely referenced; a base
    /// signature is delegated to [`add_base`](Self::add_base).
    pub fn add_signature(&mut self, signature: Signature) -> bool {
        if signature.is_base() {
            return self.add_base(signature);
        }
        let iri = signature.iri().to_string();
        match self.kind(&iri) {
            None | Some(NodeKind::Undefined) => {
                let idx = self.ensure_node(&iri);
                let node = self.node_mut(idx);
                node.kind = NodeKind::Signature;
                node.parameters = Some(signature.parameters().clone());
                tracing::debug!(iri = %iri, "added signature");
                true
            }
            Some(_) => {
                tracing::info!(iri = %iri, "signature already exists");
                self.messages
                    .push(Message::info(format!("Signature {} already exists", iri)));
                false
            }
        }
    }

    /// Add a template definition.
    ///
    /// Rejected (returning `false`, recording a WARNING, leaving the store
    /// unchanged) when the IRI is already defined or is a base template, or
    /// when an existing signature has a structurally different parameter
    /// list.
    pub fn add_template(&mut self, template: Template) -> bool {
        let iri = template.iri().to_string();
        if let Some(node) = self.node(&iri) {
            match node.kind() {
                NodeKind::Definition => {
                    self.reject(&iri, "is already defined, nothing will be added");
                    return false;
                }
                NodeKind::Base => {
                    self.reject(&iri, "is a base template and cannot be given a body");
                    return false;
                }
                NodeKind::Signature => {
                    let matches = node
                        .parameters()
                        .is_some_and(|p| p.matches_structure(template.parameters()));
                    if !matches {
                        let existing = node
                            .parameters()
                            .map(ToString::to_string)
                            .unwrap_or_default();
                        self.reject(
                            &iri,
                            &format!(
                                "has parameters that differ from its signature: {} | {}",
                                existing,
                                template.parameters()
                            ),
                        );
                        return false;
                    }
                }
                NodeKind::Undefined => {}
            }
        }

        let (signature, body) = template.into_parts();
        let idx = self.ensure_node(&iri);
        {
            let node = self.node_mut(idx);
            node.kind = NodeKind::Definition;
            node.parameters = Some(signature.parameters().clone());
        }
        for instance in body {
            self.add_body_instance(idx, instance);
        }
        tracing::debug!(
            iri = %iri,
            dependencies = self.graph.edges(idx).count(),
            "added template"
        );
        true
    }

    fn add_body_instance(&mut self, from: NodeIndex, instance: Instance) {
        if let Some(Term::Iri(predicate)) = instance.triple_predicate() {
            let caller = self.graph[from].iri.clone();
            self.predicate_index
                .entry(predicate.clone())
                .or_default()
                .insert(caller);
        }
        let to = self.ensure_node(instance.iri());
        self.graph.add_edge(from, to, instance.into_arguments());
    }

    fn reject(&mut self, iri: &str, reason: &str) {
        tracing::warn!(iri = %iri, "{}", reason);
        self.messages
            .push(Message::warning(format!("Template {} {}", iri, reason)));
    }

    /// Remove a template's definition.
    ///
    /// Its body is dropped. The node stays as undefined while other
    /// templates still reference it and disappears otherwise. Returns
    /// `false` if nothing was known about `iri`.
    pub fn remove_template(&mut self, iri: &str) -> bool {
        let Some(idx) = self.node_index(iri) else {
            return false;
        };
        if self.graph[idx].is_undefined() {
            return false;
        }

        let outgoing: Vec<EdgeIndex> = self.graph.edges(idx).map(|e| e.id()).collect();
        for edge in outgoing {
            self.graph.remove_edge(edge);
        }
        for users in self.predicate_index.values_mut() {
            users.remove(iri);
        }
        self.predicate_index.retain(|_, users| !users.is_empty());

        let referenced = self
            .graph
            .neighbors_directed(idx, Direction::Incoming)
            .next()
            .is_some();
        if referenced {
            let node = self.node_mut(idx);
            node.kind = NodeKind::Undefined;
            node.parameters = None;
        } else {
            self.graph.remove_node(idx);
            self.index.remove(iri);
        }
        self.prune_orphans();
        tracing::debug!(iri = %iri, "removed template");
        true
    }

    /// Drop undefined nodes that nothing references any more.
    fn prune_orphans(&mut self) {
        let orphans: Vec<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|idx| {
                self.graph[*idx].is_undefined()
                    && self
                        .graph
                        .neighbors_directed(*idx, Direction::Incoming)
                        .next()
                        .is_none()
            })
            .collect();
        for idx in orphans {
            if let Some(node) = self.graph.remove_node(idx) {
                self.index.remove(&node.iri);
            }
        }
    }

    /// Replace one body instance of `iri` with another set of instances.
    ///
    /// Used by refactoring. Instances of `remove` not present in the body
    /// are ignored.
    pub fn rewrite_body(&mut self, iri: &str, remove: &[Instance], add: Vec<Instance>) -> bool {
        let Some(idx) = self.node_index(iri) else {
            return false;
        };
        if !self.graph[idx].is_definition() {
            return false;
        }
        let doomed: Vec<EdgeIndex> = self
            .graph
            .edges(idx)
            .filter(|e| {
                let callee = &self.graph[e.target()].iri;
                remove
                    .iter()
                    .any(|ins| ins.iri() == callee && ins.arguments() == e.weight())
            })
            .map(|e| e.id())
            .collect();
        for edge in doomed {
            self.graph.remove_edge(edge);
        }
        for instance in add {
            if !self.body_contains(idx, &instance) {
                self.add_body_instance(idx, instance);
            }
        }
        self.rebuild_predicate_index(iri);
        self.prune_orphans();
        true
    }

    fn body_contains(&self, idx: NodeIndex, instance: &Instance) -> bool {
        self.graph.edges(idx).any(|e| {
            self.graph[e.target()].iri == instance.iri() && e.weight() == instance.arguments()
        })
    }

    fn rebuild_predicate_index(&mut self, iri: &str) {
        for users in self.predicate_index.values_mut() {
            users.remove(iri);
        }
        if let Some(body) = self.body(iri) {
            for instance in body {
                if let Some(Term::Iri(predicate)) = instance.triple_predicate() {
                    self.predicate_index
                        .entry(predicate.clone())
                        .or_default()
                        .insert(iri.to_string());
                }
            }
        }
        self.predicate_index.retain(|_, users| !users.is_empty());
    }

    // ==========================================================================
    // Queries
    // ==========================================================================

    /// Whether a signature, base template or definition is known for `iri`.
    pub fn contains(&self, iri: &str) -> bool {
        self.kind(iri).is_some_and(|k| k != NodeKind::Undefined)
    }

    pub fn contains_signature(&self, iri: &str) -> bool {
        self.contains(iri)
    }

    pub fn contains_base(&self, iri: &str) -> bool {
        self.kind(iri) == Some(NodeKind::Base)
    }

    pub fn contains_definition_of(&self, iri: &str) -> bool {
        self.kind(iri) == Some(NodeKind::Definition)
    }

    /// Parameters of any known signature.
    pub fn parameters(&self, iri: &str) -> Option<&ParameterList> {
        self.node(iri).and_then(TemplateNode::parameters)
    }

    /// The body of a definition, ordered by edge index.
    pub fn body(&self, iri: &str) -> Option<Vec<Instance>> {
        let idx = self.node_index(iri)?;
        if !self.graph[idx].is_definition() {
            return None;
        }
        Some(self.body_at(idx))
    }

    fn body_at(&self, idx: NodeIndex) -> Vec<Instance> {
        let mut edges: Vec<_> = self.graph.edges(idx).collect();
        edges.sort_by_key(|e| e.id());
        edges
            .into_iter()
            .map(|e| Instance::new(self.graph[e.target()].iri.clone(), e.weight().clone()))
            .collect()
    }

    /// Look up a definition.
    ///
    /// # Errors
    /// [`StoreError::MissingTemplate`] if `iri` is absent or has no body.
    pub fn get_template(&self, iri: &str) -> Result<Template, StoreError> {
        let missing = || StoreError::MissingTemplate {
            iri: iri.to_string(),
        };
        let node = self.node(iri).ok_or_else(missing)?;
        if !node.is_definition() {
            return Err(missing());
        }
        let params = node.parameters().cloned().ok_or_else(missing)?;
        let body = self.body(iri).ok_or_else(missing)?;
        Ok(Template::new(iri, params, body))
    }

    /// Look up any known signature, including base templates and definitions.
    ///
    /// # Errors
    /// [`StoreError::MissingSignature`] if nothing beyond a reference is known.
    pub fn get_signature(&self, iri: &str) -> Result<Signature, StoreError> {
        self.node(iri)
            .and_then(TemplateNode::signature)
            .ok_or_else(|| StoreError::MissingSignature {
                iri: iri.to_string(),
            })
    }

    /// IRIs of the templates instantiated in the body of `iri`.
    ///
    /// # Errors
    /// [`StoreError::MissingTemplate`] if `iri` has no definition.
    pub fn dependencies(&self, iri: &str) -> Result<FxHashSet<String>, StoreError> {
        let idx = self
            .node_index(iri)
            .filter(|idx| self.graph[*idx].is_definition())
            .ok_or_else(|| StoreError::MissingTemplate {
                iri: iri.to_string(),
            })?;
        Ok(self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .map(|n| self.graph[n].iri.clone())
            .collect())
    }

    /// IRIs of the templates whose body instantiates `iri`.
    pub fn depends_on(&self, iri: &str) -> FxHashSet<String> {
        self.node_index(iri)
            .map(|idx| {
                self.graph
                    .neighbors_directed(idx, Direction::Incoming)
                    .map(|n| self.graph[n].iri.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// IRIs that are referenced or declared but have no definition.
    ///
    /// Base templates are never missing.
    pub fn missing_dependencies(&self) -> FxHashSet<String> {
        self.graph
            .node_weights()
            .filter(|n| matches!(n.kind, NodeKind::Undefined | NodeKind::Signature))
            .map(|n| n.iri.clone())
            .collect()
    }

    /// Templates whose body contains an `ottr:Triple` with this predicate.
    pub fn templates_using_predicate(&self, predicate: &str) -> FxHashSet<String> {
        self.predicate_index
            .get(predicate)
            .cloned()
            .unwrap_or_default()
    }

    // ==========================================================================
    // Iteration
    // ==========================================================================

    /// Every node, including undefined ones.
    pub fn nodes(&self) -> impl Iterator<Item = &TemplateNode> {
        self.graph.node_weights()
    }

    /// IRIs with a known signature.
    pub fn iris(&self) -> impl Iterator<Item = &str> {
        self.nodes()
            .filter(|n| !n.is_undefined())
            .map(TemplateNode::iri)
    }

    /// IRIs of definitions.
    pub fn template_iris(&self) -> impl Iterator<Item = &str> {
        self.nodes()
            .filter(|n| n.is_definition())
            .map(TemplateNode::iri)
    }

    pub fn base_iris(&self) -> impl Iterator<Item = &str> {
        self.nodes().filter(|n| n.is_base()).map(TemplateNode::iri)
    }

    /// Every definition, materialized.
    pub fn templates(&self) -> impl Iterator<Item = Template> + '_ {
        self.template_iris()
            .filter_map(|iri| self.get_template(iri).ok())
    }

    /// Every known signature.
    pub fn signatures(&self) -> impl Iterator<Item = Signature> + '_ {
        self.nodes().filter_map(TemplateNode::signature)
    }

    /// Number of known signatures (excluding undefined references).
    pub fn len(&self) -> usize {
        self.iris().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn template_count(&self) -> usize {
        self.template_iris().count()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    // ==========================================================================
    // Messages
    // ==========================================================================

    /// Messages recorded by adds since the last [`take_messages`](Self::take_messages).
    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    pub fn take_messages(&mut self) -> Messages {
        std::mem::take(&mut self.messages)
    }
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TemplateStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateStore")
            .field("nodes", &self.graph.node_count())
            .field("dependencies", &self.graph.edge_count())
            .field("templates", &self.template_count())
            .field("failed", &self.failed.len())
            .field("has_standard_library", &self.standard_library.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ottr_core::{Parameter, Type, vocab};

    const T1: &str = "http://example.com/T1";
    const T2: &str = "http://example.com/T2";

    fn params(labels: &[&str]) -> ParameterList {
        labels
            .iter()
            .map(|l| Parameter::new(*l, Type::top()))
            .collect()
    }

    fn triple_template(iri: &str, labels: &[&str]) -> Template {
        Template::new(
            iri,
            params(labels),
            [Instance::triple(
                Term::var(labels[0]),
                Term::iri("http://example.com/p"),
                Term::var(labels[labels.len() - 1]),
            )],
        )
    }

    #[test]
    fn new_store_is_empty() {
        let store = TemplateStore::new();
        assert!(store.is_empty());
        assert_eq!(store.node_count(), 0);
    }

    #[test]
    fn base_templates_registered() {
        let store = TemplateStore::with_base_templates();
        assert!(store.contains_base(vocab::base::TRIPLE));
        assert!(store.contains_base(vocab::base::NULLABLE_TRIPLE));
        assert!(!store.contains_definition_of(vocab::base::TRIPLE));
        assert!(store.missing_dependencies().is_empty());
    }

    #[test]
    fn add_template_tracks_dependencies() {
        let mut store = TemplateStore::with_base_templates();
        assert!(store.add_template(triple_template(T1, &["a", "b"])));

        assert!(store.contains_definition_of(T1));
        let deps = store.dependencies(T1).unwrap();
        assert!(deps.contains(vocab::base::TRIPLE));
        assert!(store.depends_on(vocab::base::TRIPLE).contains(T1));
        assert_eq!(
            store
                .templates_using_predicate("http://example.com/p")
                .len(),
            1
        );
    }

    #[test]
    fn undefined_references_are_missing() {
        let mut store = TemplateStore::with_base_templates();
        let template = Template::new(
            T2,
            params(&["x"]),
            [Instance::from_terms(T1, [Term::var("x")])],
        );
        assert!(store.add_template(template));

        assert_eq!(store.kind(T1), Some(NodeKind::Undefined));
        assert!(!store.contains(T1));
        assert!(store.missing_dependencies().contains(T1));
        assert!(store.depends_on(T1).contains(T2));
    }

    #[test]
    fn signature_then_matching_template() {
        let mut store = TemplateStore::with_base_templates();
        assert!(store.add_signature(Signature::new(T1, params(&["a", "b"]))));
        assert!(store.missing_dependencies().contains(T1));

        assert!(store.add_template(triple_template(T1, &["x", "y"])));
        assert!(store.contains_definition_of(T1));
        assert!(!store.missing_dependencies().contains(T1));
    }

    #[test]
    fn template_with_different_parameters_rejected() {
        let mut store = TemplateStore::with_base_templates();
        store.add_signature(Signature::new(T1, params(&["a", "b"])));

        let rejected = Template::new(
            T1,
            ParameterList::new(vec![
                Parameter::new("a", Type::top()),
                Parameter::new("b", Type::top()).optional(),
            ]),
            [],
        );
        assert!(!store.add_template(rejected));
        assert_eq!(store.kind(T1), Some(NodeKind::Signature));
        assert_eq!(store.messages().warning_count(), 1);

        assert!(!store.add_template(triple_template(T1, &["a"])));
        assert_eq!(store.messages().warning_count(), 2);
        assert_eq!(store.parameters(T1).unwrap().len(), 2);
    }

    #[test]
    fn second_definition_rejected() {
        let mut store = TemplateStore::with_base_templates();
        assert!(store.add_template(triple_template(T1, &["a", "b"])));
        assert!(!store.add_template(triple_template(T1, &["a", "b"])));
        assert_eq!(store.body(T1).unwrap().len(), 1);
    }

    #[test]
    fn duplicate_signature_rejected() {
        let mut store = TemplateStore::new();
        assert!(store.add_signature(Signature::new(T1, params(&["a"]))));
        assert!(!store.add_signature(Signature::new(T1, params(&["a"]))));
        assert_eq!(store.messages().len(), 1);
    }

    #[test]
    fn accept_dispatches() {
        let mut store = TemplateStore::new();
        assert!(store.accept(Declaration::Signature(Signature::base(
            T2,
            params(&["a"])
        ))));
        assert!(store.accept(triple_template(T1, &["a", "b"]).into()));
        assert!(store.contains_base(T2));
        assert!(store.contains_definition_of(T1));
    }

    #[test]
    fn get_template_errors() {
        let mut store = TemplateStore::with_base_templates();
        store.add_signature(Signature::new(T1, params(&["a"])));

        match store.get_template(T1).unwrap_err() {
            StoreError::MissingTemplate { iri } => assert_eq!(iri, T1),
            e => panic!("Expected MissingTemplate error, got {:?}", e),
        }
        assert!(store.get_template(vocab::base::TRIPLE).is_err());
        assert!(store.get_signature(vocab::base::TRIPLE).unwrap().is_base());
        assert!(matches!(
            store.get_signature(T2),
            Err(StoreError::MissingSignature { .. })
        ));
    }

    #[test]
    fn get_template_round_trips_body() {
        let mut store = TemplateStore::with_base_templates();
        let template = triple_template(T1, &["a", "b"]);
        store.add_template(template.clone());
        assert_eq!(store.get_template(T1).unwrap(), template);
    }

    #[test]
    fn remove_keeps_referenced_node_undefined() {
        let mut store = TemplateStore::with_base_templates();
        store.add_template(triple_template(T1, &["a", "b"]));
        store.add_template(Template::new(
            T2,
            params(&["x", "y"]),
            [Instance::from_terms(T1, [Term::var("x"), Term::var("y")])],
        ));

        assert!(store.remove_template(T1));
        assert_eq!(store.kind(T1), Some(NodeKind::Undefined));
        assert!(store.depends_on(vocab::base::TRIPLE).is_empty());
        assert!(
            store
                .templates_using_predicate("http://example.com/p")
                .is_empty()
        );

        assert!(store.remove_template(T2));
        assert_eq!(store.kind(T2), None);
        assert_eq!(store.kind(T1), None);
        assert!(!store.remove_template(T2));
    }

    #[test]
    fn rewrite_body_replaces_instances() {
        let mut store = TemplateStore::with_base_templates();
        let template = triple_template(T1, &["a", "b"]);
        let old = template.body()[0].clone();
        store.add_template(template);

        let new = Instance::from_terms(T2, [Term::var("a")]);
        assert!(store.rewrite_body(T1, &[old], vec![new.clone()]));
        assert_eq!(store.body(T1).unwrap(), vec![new]);
        assert!(store.depends_on(T2).contains(T1));
    }
}
