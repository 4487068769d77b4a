//! Raw taxonomy payloads and their validation.
//!
//! Strings are trimmed before they are checked. Fields the kind does not
//! define are dropped. Every problem is collected into one
//! [`FieldErrors`] keyed by path, e.g. `options[1].points[0].label`.

use std::collections::HashSet;

use serde::Deserialize;

use super::rules::FieldRule;
use super::{DocumentMutation, OptionPoint, TaxonomyDraft, TaxonomyKind, TaxonomyOption};
use crate::crypto::generate_object_id;
use crate::validators::is_object_id;
use crate::{AdminError, FieldErrors};

/// Message for malformed path identifiers.
pub const INVALID_ID_MESSAGE: &str = "Invalid document ID or option ID";

/// Create payload. Sectioned kinds may send `sections` for `options`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaxonomyInput {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "sections")]
    pub options: Option<Vec<OptionInput>>,
}

/// One option (or section). Sectioned kinds may send `subtitle` for `label`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptionInput {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    #[serde(alias = "subtitle")]
    pub label: Option<String>,
    pub description: Option<String>,
    pub value: Option<String>,
    pub points: Option<Vec<PointInput>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PointInput {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub label: Option<String>,
}

/// Update payload: either an option patch (`optionId` plus option fields)
/// or a top-level patch of `title`, `description` and `options`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomyPatch {
    pub option_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "sections")]
    pub options: Option<Vec<OptionInput>>,
    #[serde(alias = "subtitle")]
    pub label: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdPolicy {
    /// Ignore client ids and generate fresh ones.
    Generate,
    /// Keep valid client ids, generate missing ones, reject duplicates.
    Keep,
}

impl TaxonomyInput {
    pub fn validate(self, kind: TaxonomyKind) -> Result<TaxonomyDraft, FieldErrors> {
        let rules = kind.rules();
        let mut errors = FieldErrors::new();

        let title = checked(rules.title, self.title, "title", &mut errors);
        let description = checked(rules.description, self.description, "description", &mut errors);
        let options = match self.options {
            Some(list) if !list.is_empty() => {
                validate_options(kind, list, IdPolicy::Generate, "options", &mut errors)
            }
            _ => {
                errors.add("options", "At least one option is required");
                Vec::new()
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(TaxonomyDraft {
            title: title.unwrap_or_default(),
            description,
            options,
        })
    }
}

impl TaxonomyPatch {
    pub fn into_mutation(mut self, kind: TaxonomyKind) -> Result<DocumentMutation, AdminError> {
        match self.option_id.take() {
            Some(option_id) => option_mutation(kind, option_id, self),
            None if self.title.is_some() || self.description.is_some() || self.options.is_some() => {
                field_mutation(kind, self)
            }
            None => Err(AdminError::invalid("body", "Invalid request body")),
        }
    }
}

/// Options appended through add-option; client ids are ignored.
pub fn validate_new_options(
    kind: TaxonomyKind,
    inputs: Vec<OptionInput>,
) -> Result<Vec<TaxonomyOption>, FieldErrors> {
    let mut errors = FieldErrors::new();
    if inputs.is_empty() {
        errors.add("options", "At least one option is required");
        return Err(errors);
    }

    let options = validate_options(kind, inputs, IdPolicy::Generate, "options", &mut errors);
    if errors.is_empty() {
        Ok(options)
    } else {
        Err(errors)
    }
}

fn option_mutation(
    kind: TaxonomyKind,
    option_id: String,
    patch: TaxonomyPatch,
) -> Result<DocumentMutation, AdminError> {
    let rules = kind.rules();
    let mut errors = FieldErrors::new();

    if patch.title.is_some() {
        errors.add("title", "Cannot be combined with optionId");
    }
    if patch.options.is_some() {
        errors.add("options", "Cannot be combined with optionId");
    }
    if !is_object_id(&option_id) {
        errors.add("optionId", INVALID_ID_MESSAGE);
    }

    let label = patch
        .label
        .and_then(|v| checked(rules.option_label, Some(v), "label", &mut errors));
    let description = provided(
        rules.option_description,
        patch.description,
        "description",
        &mut errors,
    );
    let value = provided(rules.option_value, patch.value, "value", &mut errors);

    errors.into_result()?;

    if label.is_none() && description.is_none() && value.is_none() {
        return Err(AdminError::invalid("body", "No option fields to update"));
    }

    Ok(DocumentMutation::SetOption {
        option_id,
        label,
        description,
        value: value.flatten(),
    })
}

fn field_mutation(kind: TaxonomyKind, patch: TaxonomyPatch) -> Result<DocumentMutation, AdminError> {
    let rules = kind.rules();
    let mut errors = FieldErrors::new();

    let title = patch
        .title
        .and_then(|v| checked(rules.title, Some(v), "title", &mut errors));
    let description = provided(rules.description, patch.description, "description", &mut errors);
    let options = match patch.options {
        Some(list) if list.is_empty() => {
            errors.add("options", "At least one option is required");
            None
        }
        Some(list) => Some(validate_options(kind, list, IdPolicy::Keep, "options", &mut errors)),
        None => None,
    };

    errors.into_result()?;

    Ok(DocumentMutation::SetFields {
        title,
        description,
        options,
    })
}

/// Trims, checks and returns a value for `rule`. Empty optional values
/// become `None`; absent fields are dropped.
fn checked(
    rule: FieldRule,
    value: Option<String>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<String> {
    if !rule.accepts() {
        return None;
    }

    let value = value
        .map(|v| v.trim().to_owned())
        .filter(|v| rule.is_required() || !v.is_empty());
    errors.check(field, rule.check(value.as_deref()));
    value
}

/// Like [`checked`] for patches: `None` when the field was not sent,
/// `Some(None)` when an optional field is cleared.
fn provided(
    rule: FieldRule,
    value: Option<String>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<Option<String>> {
    if !rule.accepts() {
        return None;
    }
    value.map(|v| checked(rule, Some(v), field, errors))
}

fn resolve_id(
    policy: IdPolicy,
    id: Option<String>,
    field: &str,
    seen: &mut HashSet<String>,
    errors: &mut FieldErrors,
) -> String {
    let id = match (policy, id) {
        (IdPolicy::Keep, Some(id)) => {
            if !is_object_id(&id) {
                errors.add(field, INVALID_ID_MESSAGE);
            }
            id
        }
        _ => generate_object_id(),
    };

    if !seen.insert(id.clone()) {
        errors.add(field, "Duplicate id");
    }
    id
}

fn validate_options(
    kind: TaxonomyKind,
    inputs: Vec<OptionInput>,
    policy: IdPolicy,
    prefix: &str,
    errors: &mut FieldErrors,
) -> Vec<TaxonomyOption> {
    let rules = kind.rules();
    let mut seen = HashSet::new();

    inputs
        .into_iter()
        .enumerate()
        .map(|(i, input)| {
            let path = format!("{prefix}[{i}]");
            let id = resolve_id(policy, input.id, &format!("{path}._id"), &mut seen, errors);
            let label = checked(rules.option_label, input.label, &format!("{path}.label"), errors);
            let description = checked(
                rules.option_description,
                input.description,
                &format!("{path}.description"),
                errors,
            );
            let value = checked(rules.option_value, input.value, &format!("{path}.value"), errors);

            let points = match rules.points {
                Some(points_rule) => {
                    let label_rule = FieldRule::Required {
                        min: 1,
                        max: points_rule.label_max,
                    };
                    match input.points {
                        Some(points) if !points.is_empty() => {
                            let mut seen_points = HashSet::new();
                            points
                                .into_iter()
                                .enumerate()
                                .map(|(j, point)| {
                                    let point_path = format!("{path}.points[{j}]");
                                    OptionPoint {
                                        id: resolve_id(
                                            policy,
                                            point.id,
                                            &format!("{point_path}._id"),
                                            &mut seen_points,
                                            errors,
                                        ),
                                        label: checked(
                                            label_rule,
                                            point.label,
                                            &format!("{point_path}.label"),
                                            errors,
                                        )
                                        .unwrap_or_default(),
                                    }
                                })
                                .collect()
                        }
                        _ => {
                            errors.add(format!("{path}.points"), "At least one point is required");
                            Vec::new()
                        }
                    }
                }
                None => Vec::new(),
            };

            TaxonomyOption {
                id,
                label: label.unwrap_or_default(),
                description,
                value,
                points,
            }
        })
        .collect()
}
