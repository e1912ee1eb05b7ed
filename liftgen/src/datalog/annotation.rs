//! This module defines annotation generators,
//! which attach metadata to every primitive rule created by the rule splitter.
//!
//! Any closure or function of type `FnMut(RuleTemplate, &Task) -> A`
//! can be used as an annotation generator for annotations of type `A`.
//! The splitter never inspects the annotations it attaches.

use crate::{datalog::rules::RuleTemplate, task::Task};

/// Annotation generator for rules that do not need annotations
pub fn no_annotation(_template: RuleTemplate, _task: &Task) {}

/// Annotation generator that labels each rule with the name of its action schema
///
/// Rules that do not originate from an action schema are labelled with `None`.
pub fn schema_name_annotation(template: RuleTemplate, task: &Task) -> Option<String> {
    let index = template.schema_index()?;
    task.action_schema(index)
        .ok()
        .map(|schema| schema.name().to_string())
}
