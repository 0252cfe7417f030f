//! Authoring-fault taxonomy for node definitions.

use thiserror::Error;

use crate::slot::Binding;
use crate::types::SlotValueType;

pub type Result<T> = std::result::Result<T, DefinitionError>;

/// Faults in a node's registered definition.
///
/// These are authoring bugs, not runtime data issues: none are retried, and
/// each aborts the offending node's slot derivation or codegen contribution
/// while leaving the rest of the graph alone.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// The descriptor cannot produce source text (no body template).
    #[error("function `{function}` has no usable entry point: {reason}")]
    InvalidEntryPoint { function: String, reason: String },

    #[error("parameter `{parameter}` of `{function}` carries no slot metadata")]
    MissingSlotMetadata { function: String, parameter: String },

    #[error("slot id {id} appears more than once on `{function}`")]
    DuplicateSlotId { function: String, id: u32 },

    #[error("parameter `{parameter}` of type {ty:?} cannot carry binding {binding:?}")]
    UnsupportedParameterType {
        parameter: String,
        ty: SlotValueType,
        binding: Binding,
    },

    #[error("parameter `{parameter}` names no recognizable binding")]
    UnknownBinding { parameter: String },

    #[error("body template of `{function}` failed: {message}")]
    TemplateInvocation { function: String, message: String },
}
