//! Onboarding taxonomies.
//!
//! Each [`TaxonomyKind`] is a document type holding a title, an optional
//! description and an ordered list of options. Per-kind field bounds live in
//! [`rules`]; [`input`] turns raw payloads into validated documents and
//! [`DocumentMutation`]s, which [`apply_mutation`] performs identically for
//! every storage backend.

mod document;
pub mod input;
mod kind;
mod mutation;
pub mod rules;

pub use document::{OptionPoint, TaxonomyDocument, TaxonomyDraft, TaxonomyOption};
pub use input::{validate_new_options, OptionInput, PointInput, TaxonomyInput, TaxonomyPatch};
pub use kind::TaxonomyKind;
pub use mutation::{apply_mutation, DocumentMutation};
pub use rules::{FieldRule, KindRules};
