//! Static checks over a template store.
//!
//! A [`Check`] pairs a [`Query`] with a function turning each result tuple
//! into a [`Message`]. The checks shipped with the crate live in
//! [`library`]; [`check_templates`] runs all of them.

use std::fmt;

use ottr_core::{Message, Messages, Type};
use ottr_store::TemplateStore;

use crate::query::Query;
use crate::tuple::Tuple;

/// A query whose every result is a diagnostic.
#[derive(Clone)]
pub struct Check {
    name: &'static str,
    query: Query,
    to_message: fn(&Tuple) -> Message,
}

impl Check {
    pub fn new(name: &'static str, query: Query, to_message: fn(&Tuple) -> Message) -> Self {
        Self {
            name,
            query,
            to_message,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Run the query from the empty tuple; one message per distinct result.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn check(&self, store: &TemplateStore) -> Messages {
        let mut messages = Messages::new();
        for tuple in self.query.run(store) {
            messages.push_unique((self.to_message)(&tuple));
        }
        tracing::debug!(check = self.name, found = messages.len(), "ran check");
        messages
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Check").field("name", &self.name).finish()
    }
}

/// Run every check in [`library::all`].
pub fn check_templates(store: &TemplateStore) -> Messages {
    check_templates_for(store, &library::all())
}

/// Run `checks` and collect their messages, without duplicates.
pub fn check_templates_for(store: &TemplateStore, checks: &[Check]) -> Messages {
    let mut messages = Messages::new();
    for check in checks {
        for message in check.check(store) {
            messages.push_unique(message);
        }
    }
    tracing::info!(
        checks = checks.len(),
        templates = store.template_count(),
        errors = messages.error_count(),
        warnings = messages.warning_count(),
        "checked templates"
    );
    messages
}

/// The built-in checks.
pub mod library {
    use super::*;

    // ==========================================================================
    // Missing information
    // ==========================================================================

    /// A body instantiates a template the store knows nothing about.
    pub fn undefined_template() -> Check {
        Check::new(
            "undefined-template",
            Query::template("Temp")
                .and(Query::body_instance("Temp", "Ins"))
                .and(Query::instance_iri("Ins", "Temp2"))
                .and(Query::is_undefined("Temp2")),
            |t| {
                Message::error(format!(
                    "Undefined template used in {}: the body instantiates {}, which has no signature or definition",
                    t.show("Temp"),
                    t.show("Temp2")
                ))
            },
        )
    }

    // ==========================================================================
    // Arity and flags
    // ==========================================================================

    pub fn wrong_number_of_arguments() -> Check {
        Check::new(
            "wrong-number-of-arguments",
            Query::template("Temp")
                .and(Query::body_instance("Temp", "Ins"))
                .and(Query::instance_iri("Ins", "Temp2"))
                .and(Query::arguments("Ins", "Args"))
                .and(Query::length("Args", "Len1"))
                .and(Query::parameters("Temp2", "Params"))
                .and(Query::length("Params", "Len2"))
                .and(Query::not_equals("Len1", "Len2")),
            |t| {
                Message::error(format!(
                    "Wrong number of arguments in instance {} of template {}: {} arguments given, but {} expects {} {}",
                    t.show("Ins"),
                    t.show("Temp"),
                    t.show("Len1"),
                    t.show("Temp2"),
                    t.show("Len2"),
                    t.show("Params")
                ))
            },
        )
    }

    /// A parameter that may be blank is passed to a non-blank parameter.
    pub fn inconsistent_non_blank_flags() -> Check {
        Check::new(
            "inconsistent-non-blank-flags",
            Query::template("Temp1")
                .and(Query::parameters("Temp1", "Params1"))
                .and(Query::index("Params1", "Index1", "Val"))
                .and(Query::not(Query::is_non_blank("Params1", "Index1")))
                .and(Query::body_instance("Temp1", "Ins"))
                .and(Query::argument_index("Ins", "Index2", "Val"))
                .and(Query::instance_iri("Ins", "Temp2"))
                .and(Query::parameters("Temp2", "Params2"))
                .and(Query::is_non_blank("Params2", "Index2")),
            |t| {
                Message::error(format!(
                    "Inconsistent non-blank flags in template {}: parameter {} is not non-blank, but is passed as arg no. {} to {}, whose parameter is non-blank",
                    t.show("Temp1"),
                    t.show("Val"),
                    t.show_position("Index2"),
                    t.show("Temp2")
                ))
            },
        )
    }

    pub fn cyclic_dependency() -> Check {
        Check::new(
            "cyclic-dependency",
            Query::template("Temp").and(Query::depends_transitive("Temp", "Temp")),
            |t| {
                Message::error(format!(
                    "Cyclic dependency in template {}: it transitively instantiates itself",
                    t.show("Temp")
                ))
            },
        )
    }

    // ==========================================================================
    // Parameters
    // ==========================================================================

    pub fn unused_parameter() -> Check {
        Check::new(
            "unused-parameter",
            Query::template("Temp")
                .and(Query::body("Temp", "Body"))
                .and(Query::parameter_index("Temp", "Index", "Val"))
                .and(Query::not(
                    Query::instance("Body", "Ins")
                        .and(Query::argument_index("Ins", "Index2", "Arg"))
                        .and(Query::has_occurrence_at("Arg", "Val", "Lvl")),
                )),
            |t| {
                Message::warning(format!(
                    "Unused parameter in template {}: parameter {} (arg no. {}) does not occur in the body",
                    t.show("Temp"),
                    t.show("Val"),
                    t.show_position("Index")
                ))
            },
        )
    }

    pub fn duplicate_parameter() -> Check {
        Check::new(
            "duplicate-parameter",
            Query::template("Temp")
                .and(Query::parameters("Temp", "Params"))
                .and(Query::index("Params", "Index1", "Val"))
                .and(Query::index("Params", "Index2", "Val"))
                .and(Query::not_equals("Index1", "Index2"))
                .and(Query::remove_symmetry("Index1", "Index2")),
            |t| {
                Message::error(format!(
                    "Duplicate parameter in template {}: {} occurs as arg no. {} and arg no. {}",
                    t.show("Temp"),
                    t.show("Val"),
                    t.show_position("Index1"),
                    t.show_position("Index2")
                ))
            },
        )
    }

    /// A body variable that is not a parameter of the template.
    pub fn undefined_parameter() -> Check {
        Check::new(
            "undefined-parameter",
            Query::template("Temp")
                .and(Query::body_instance("Temp", "Ins"))
                .and(Query::argument_index("Ins", "Index", "Arg"))
                .and(Query::has_occurrence_at("Arg", "Val", "Lvl"))
                .and(Query::is_variable("Val"))
                .and(Query::not(Query::parameter_index("Temp", "Index2", "Val"))),
            |t| {
                Message::error(format!(
                    "Undefined parameter in template {}: variable {} is used in instance {} but is not a parameter",
                    t.show("Temp"),
                    t.show("Val"),
                    t.show("Ins")
                ))
            },
        )
    }

    // ==========================================================================
    // Types
    // ==========================================================================

    /// The same term is passed to parameters of incomparable types.
    ///
    /// Basic types form a tree, so pairwise comparability of every use
    /// means a single most specific type exists.
    pub fn conflicting_parameter_types() -> Check {
        Check::new(
            "conflicting-parameter-types",
            Query::template("Temp")
                .and(Query::body_instance("Temp", "Ins1"))
                .and(Query::body_instance("Temp", "Ins2"))
                .and(Query::remove_symmetry("Ins1", "Ins2"))
                .and(Query::argument_index("Ins1", "Index1", "Arg1"))
                .and(Query::has_occurrence_at("Arg1", "Val", "Lvl1"))
                .and(Query::is_not_none("Val"))
                .and(Query::argument_index("Ins2", "Index2", "Arg2"))
                .and(Query::has_occurrence_at("Arg2", "Val", "Lvl2"))
                .and(Query::used_as_type("Ins1", "Index1", "Lvl1", "Type1"))
                .and(Query::used_as_type("Ins2", "Index2", "Lvl2", "Type2"))
                .and(Query::not(Query::is_sub_type_of("Type1", "Type2")))
                .and(Query::not(Query::is_sub_type_of("Type2", "Type1"))),
            |t| {
                Message::error(format!(
                    "Type error in template {}: {} is passed to incompatible parameter types, {} in instance {} (arg no. {}) and {} in instance {} (arg no. {})",
                    t.show("Temp"),
                    t.show("Val"),
                    t.show("Type1"),
                    t.show("Ins1"),
                    t.show_position("Index1"),
                    t.show("Type2"),
                    t.show("Ins2"),
                    t.show_position("Index2")
                ))
            },
        )
    }

    /// A constant whose own type cannot be used where it is passed.
    pub fn conflicting_intrinsic_type() -> Check {
        Check::new(
            "conflicting-intrinsic-type",
            Query::template("Temp")
                .and(Query::body_instance("Temp", "Ins"))
                .and(Query::argument_index("Ins", "Index", "Arg"))
                .and(Query::has_occurrence_at("Arg", "Val", "Lvl"))
                .and(Query::not(Query::is_variable("Val")))
                .and(Query::type_of("Val", "Intrinsic"))
                .and(Query::used_as_type("Ins", "Index", "Lvl", "UsedAs"))
                .and(Query::not(Query::is_compatible_with("Intrinsic", "UsedAs"))),
            |t| {
                Message::error(format!(
                    "Type error in template {}: {} has type {}, incompatible with parameter type {} in instance {} (arg no. {})",
                    t.show("Temp"),
                    t.show("Val"),
                    t.show("Intrinsic"),
                    t.show("UsedAs"),
                    t.show("Ins"),
                    t.show_position("Index")
                ))
            },
        )
    }

    // ==========================================================================
    // List expanders
    // ==========================================================================

    pub fn modifier_without_marked_argument() -> Check {
        Check::new(
            "modifier-without-marked-argument",
            Query::template("Temp")
                .and(Query::body_instance("Temp", "Ins"))
                .and(Query::has_expansion_modifier("Ins"))
                .and(Query::not(
                    Query::arguments("Ins", "Args").and(Query::has_list_expander("Args", "Index")),
                )),
            |t| {
                Message::error(format!(
                    "Template {} has instance {} with a list expander but no argument marked for expansion",
                    t.show("Temp"),
                    t.show("Ins")
                ))
            },
        )
    }

    pub fn marked_argument_without_modifier() -> Check {
        Check::new(
            "marked-argument-without-modifier",
            Query::template("Temp")
                .and(Query::body_instance("Temp", "Ins"))
                .and(Query::not(Query::has_expansion_modifier("Ins")))
                .and(Query::arguments("Ins", "Args"))
                .and(Query::has_list_expander("Args", "Index")),
            |t| {
                Message::error(format!(
                    "Template {} has instance {} with arg no. {} marked for expansion but no list expander",
                    t.show("Temp"),
                    t.show("Ins"),
                    t.show_position("Index")
                ))
            },
        )
    }

    pub fn list_expander_on_non_list() -> Check {
        Check::new(
            "list-expander-on-non-list",
            Query::template("Temp")
                .and(Query::body_instance("Temp", "Ins"))
                .and(Query::has_expansion_modifier("Ins"))
                .and(Query::arguments("Ins", "Args"))
                .and(Query::has_list_expander("Args", "Index"))
                .and(Query::index("Args", "Index", "Val"))
                .and(Query::type_of("Val", "Type"))
                .and(Query::bind("ListType", Type::list(Type::top())))
                .and(Query::not(Query::is_sub_type_of("Type", "ListType"))),
            |t| {
                Message::error(format!(
                    "Template {} has instance {} with a list expander on non-list argument {} (arg no. {})",
                    t.show("Temp"),
                    t.show("Ins"),
                    t.show("Val"),
                    t.show_position("Index")
                ))
            },
        )
    }

    // ==========================================================================
    // Groupings
    // ==========================================================================

    /// Checks that fail when definitions are missing.
    pub fn fails_on_missing_information() -> Vec<Check> {
        vec![undefined_template()]
    }

    /// Checks that only fail on a concrete inconsistency.
    pub fn fails_on_error() -> Vec<Check> {
        vec![
            inconsistent_non_blank_flags(),
            wrong_number_of_arguments(),
            cyclic_dependency(),
            unused_parameter(),
            duplicate_parameter(),
            undefined_parameter(),
            conflicting_parameter_types(),
            conflicting_intrinsic_type(),
            modifier_without_marked_argument(),
            marked_argument_without_modifier(),
            list_expander_on_non_list(),
        ]
    }

    pub fn all() -> Vec<Check> {
        let mut checks = fails_on_missing_information();
        checks.extend(fails_on_error());
        checks
    }
}
