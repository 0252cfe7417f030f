//! Entry-point descriptors: the ahead-of-time signature table node kinds
//! register in place of runtime reflection.

use std::collections::HashSet;

use crate::error::DefinitionError;
use crate::slot::{Binding, SlotDirection};
use crate::types::SlotValueType;

/// Body template invoked at emission time to obtain the function body text.
///
/// The returned text may use the placeholders `{precision}` and
/// `{slot<id>dimension}`; see [`crate::emitter::substitute_body`] for the
/// substitution contract.
pub type BodyTemplate = Box<dyn Fn() -> anyhow::Result<String> + Send + Sync>;

/// Slot metadata attached to one parameter.
#[derive(Clone, Copy, Debug)]
pub struct SlotAnnotation {
    pub id: u32,
    pub binding: Binding,
    pub hidden: bool,
    pub default_value: Option<[f32; 4]>,
}

/// One parameter of an entry point.
pub struct Parameter {
    pub name: String,
    pub ty: SlotValueType,
    /// Passed by out-reference: the function writes it, so it becomes an
    /// output slot.
    pub out: bool,
    pub annotation: Option<SlotAnnotation>,
}

/// A validated (parameter, annotation) pair ready for the slot factory.
pub struct SlotSpec<'a> {
    pub parameter: &'a Parameter,
    pub annotation: SlotAnnotation,
    pub direction: SlotDirection,
}

/// A function-like reference whose signature a node's slots derive from and
/// whose invocation yields the shader body template.
///
/// Stateless descriptors produce one shared function definition per
/// (name, precision); all others are suffixed per node instance.
pub struct FunctionDescriptor {
    name: String,
    stateless: bool,
    params: Vec<Parameter>,
    template: Option<BodyTemplate>,
}

impl FunctionDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        FunctionDescriptor {
            name: name.into(),
            stateless: false,
            params: Vec::new(),
            template: None,
        }
    }

    /// Mark the entry point as a pure shared computation: its emitted
    /// function carries no per-node suffix.
    pub fn stateless(mut self) -> Self {
        self.stateless = true;
        self
    }

    /// Append a raw parameter. The `input`/`output` helpers below are the
    /// usual way in; this exists for signatures assembled programmatically.
    pub fn param(mut self, parameter: Parameter) -> Self {
        self.params.push(parameter);
        self
    }

    pub fn input(self, id: u32, name: &str, ty: SlotValueType) -> Self {
        self.push(id, name, ty, false, Binding::None, false, None)
    }

    pub fn input_default(self, id: u32, name: &str, ty: SlotValueType, default: [f32; 4]) -> Self {
        self.push(id, name, ty, false, Binding::None, false, Some(default))
    }

    pub fn hidden_input(self, id: u32, name: &str, ty: SlotValueType) -> Self {
        self.push(id, name, ty, false, Binding::None, true, None)
    }

    pub fn bound_input(self, id: u32, name: &str, ty: SlotValueType, binding: Binding) -> Self {
        self.push(id, name, ty, false, binding, false, None)
    }

    pub fn output(self, id: u32, name: &str, ty: SlotValueType) -> Self {
        self.push(id, name, ty, true, Binding::None, false, None)
    }

    pub fn body<F>(mut self, template: F) -> Self
    where
        F: Fn() -> anyhow::Result<String> + Send + Sync + 'static,
    {
        self.template = Some(Box::new(template));
        self
    }

    fn push(
        mut self,
        id: u32,
        name: &str,
        ty: SlotValueType,
        out: bool,
        binding: Binding,
        hidden: bool,
        default_value: Option<[f32; 4]>,
    ) -> Self {
        self.params.push(Parameter {
            name: name.to_string(),
            ty,
            out,
            annotation: Some(SlotAnnotation {
                id,
                binding,
                hidden,
                default_value,
            }),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_stateless(&self) -> bool {
        self.stateless
    }

    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    /// Validate the signature and produce one slot spec per parameter, in
    /// declaration order.
    ///
    /// Fails with `InvalidEntryPoint` when no body template is registered,
    /// `MissingSlotMetadata` when a parameter carries no annotation, and
    /// `DuplicateSlotId` when two parameters share an id.
    pub fn introspect(&self) -> Result<Vec<SlotSpec<'_>>, DefinitionError> {
        if self.template.is_none() {
            return Err(DefinitionError::InvalidEntryPoint {
                function: self.name.clone(),
                reason: "no body template registered".to_string(),
            });
        }

        let mut specs = Vec::with_capacity(self.params.len());
        for parameter in &self.params {
            let annotation =
                parameter
                    .annotation
                    .ok_or_else(|| DefinitionError::MissingSlotMetadata {
                        function: self.name.clone(),
                        parameter: parameter.name.clone(),
                    })?;
            let direction = if parameter.out {
                SlotDirection::Output
            } else {
                SlotDirection::Input
            };
            specs.push(SlotSpec {
                parameter,
                annotation,
                direction,
            });
        }

        let mut seen = HashSet::new();
        for spec in &specs {
            if !seen.insert(spec.annotation.id) {
                return Err(DefinitionError::DuplicateSlotId {
                    function: self.name.clone(),
                    id: spec.annotation.id,
                });
            }
        }

        Ok(specs)
    }

    /// Invoke the body template to obtain the raw (unsubstituted) body text.
    pub fn invoke_template(&self) -> Result<String, DefinitionError> {
        let template =
            self.template
                .as_ref()
                .ok_or_else(|| DefinitionError::InvalidEntryPoint {
                    function: self.name.clone(),
                    reason: "no body template registered".to_string(),
                })?;
        template().map_err(|e| DefinitionError::TemplateInvocation {
            function: self.name.clone(),
            message: format!("{e:#}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_param_descriptor() -> FunctionDescriptor {
        FunctionDescriptor::new("Example")
            .stateless()
            .input(0, "A", SlotValueType::Vector1)
            .output(1, "Out", SlotValueType::Vector1)
            .body(|| Ok("{ Out = A; }".to_string()))
    }

    #[test]
    fn test_introspection_preserves_declaration_order() {
        let descriptor = FunctionDescriptor::new("Ordered")
            .input(4, "D", SlotValueType::Vector2)
            .input(2, "B", SlotValueType::Vector1)
            .output(7, "Out", SlotValueType::Vector4)
            .body(|| Ok(String::new()));

        let specs = descriptor.introspect().unwrap();
        let ids: Vec<u32> = specs.iter().map(|s| s.annotation.id).collect();
        assert_eq!(ids, vec![4, 2, 7]);
        assert_eq!(specs[0].direction, SlotDirection::Input);
        assert_eq!(specs[2].direction, SlotDirection::Output);
    }

    #[test]
    fn test_missing_template_is_invalid_entry_point() {
        let descriptor = FunctionDescriptor::new("NoBody").input(0, "A", SlotValueType::Vector1);
        assert!(matches!(
            descriptor.introspect(),
            Err(DefinitionError::InvalidEntryPoint { .. })
        ));
    }

    #[test]
    fn test_missing_annotation_is_reported() {
        let descriptor = two_param_descriptor().param(Parameter {
            name: "Bare".to_string(),
            ty: SlotValueType::Vector1,
            out: false,
            annotation: None,
        });
        match descriptor.introspect() {
            Err(DefinitionError::MissingSlotMetadata { parameter, .. }) => {
                assert_eq!(parameter, "Bare");
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected MissingSlotMetadata"),
        }
    }

    #[test]
    fn test_duplicate_slot_id_is_rejected() {
        let descriptor = two_param_descriptor().input(0, "Again", SlotValueType::Vector1);
        assert!(matches!(
            descriptor.introspect(),
            Err(DefinitionError::DuplicateSlotId { id: 0, .. })
        ));
    }

    #[test]
    fn test_template_failure_surfaces_as_invocation_error() {
        let descriptor = FunctionDescriptor::new("Broken")
            .body(|| anyhow::bail!("authoring bug"));
        match descriptor.invoke_template() {
            Err(DefinitionError::TemplateInvocation { message, .. }) => {
                assert!(message.contains("authoring bug"));
            }
            other => panic!("expected TemplateInvocation, got {other:?}"),
        }
    }
}
