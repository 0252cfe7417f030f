//! Materializes slots from validated parameter specs.

use crate::descriptor::SlotSpec;
use crate::error::DefinitionError;
use crate::slot::{Binding, CoordinateSpace, Slot, SlotDirection, SlotKind, UvChannel};
use crate::types::SlotValueType;

/// Create the slot for one entry-point parameter.
///
/// Parameters with no binding, and all outputs, become generic typed slots.
/// Everything else dispatches to a specialized bound slot kind that carries
/// its own coordinate space or UV channel and answers capability queries
/// accordingly.
pub fn create_slot(spec: &SlotSpec<'_>) -> Result<Slot, DefinitionError> {
    let parameter = spec.parameter;
    let annotation = spec.annotation;

    let kind = if annotation.binding == Binding::None || spec.direction == SlotDirection::Output {
        SlotKind::Value(parameter.ty)
    } else {
        bound_slot_kind(&parameter.name, parameter.ty, annotation.binding)?
    };

    Ok(Slot::new(
        annotation.id,
        parameter.name.clone(),
        parameter.name.clone(),
        spec.direction,
        kind,
        annotation.hidden,
        annotation.default_value.unwrap_or([0.0; 4]),
    ))
}

fn bound_slot_kind(
    parameter: &str,
    ty: SlotValueType,
    binding: Binding,
) -> Result<SlotKind, DefinitionError> {
    // Opaque resource parameters cannot stand in for geometric quantities.
    if matches!(
        ty,
        SlotValueType::Texture2D
            | SlotValueType::SamplerState
            | SlotValueType::Gradient
            | SlotValueType::Matrix4
    ) {
        return Err(DefinitionError::UnsupportedParameterType {
            parameter: parameter.to_string(),
            ty,
            binding,
        });
    }

    Ok(match binding {
        Binding::ObjectSpaceNormal => SlotKind::Normal(CoordinateSpace::Object),
        Binding::ObjectSpaceTangent => SlotKind::Tangent(CoordinateSpace::Object),
        Binding::ObjectSpaceBitangent => SlotKind::Bitangent(CoordinateSpace::Object),
        Binding::ObjectSpacePosition => SlotKind::Position(CoordinateSpace::Object),
        Binding::ViewSpaceNormal => SlotKind::Normal(CoordinateSpace::View),
        Binding::ViewSpaceTangent => SlotKind::Tangent(CoordinateSpace::View),
        Binding::ViewSpaceBitangent => SlotKind::Bitangent(CoordinateSpace::View),
        Binding::ViewSpacePosition => SlotKind::Position(CoordinateSpace::View),
        Binding::WorldSpaceNormal => SlotKind::Normal(CoordinateSpace::World),
        Binding::WorldSpaceTangent => SlotKind::Tangent(CoordinateSpace::World),
        Binding::WorldSpaceBitangent => SlotKind::Bitangent(CoordinateSpace::World),
        Binding::WorldSpacePosition => SlotKind::Position(CoordinateSpace::World),
        Binding::TangentSpaceNormal => SlotKind::Normal(CoordinateSpace::Tangent),
        Binding::TangentSpaceTangent => SlotKind::Tangent(CoordinateSpace::Tangent),
        Binding::TangentSpaceBitangent => SlotKind::Bitangent(CoordinateSpace::Tangent),
        Binding::TangentSpacePosition => SlotKind::Position(CoordinateSpace::Tangent),
        Binding::MeshUv0 => SlotKind::MeshUv(UvChannel::Uv0),
        Binding::MeshUv1 => SlotKind::MeshUv(UvChannel::Uv1),
        Binding::MeshUv2 => SlotKind::MeshUv(UvChannel::Uv2),
        Binding::MeshUv3 => SlotKind::MeshUv(UvChannel::Uv3),
        Binding::ScreenPosition => SlotKind::ScreenPosition,
        Binding::ObjectSpaceViewDirection => SlotKind::ViewDirection(CoordinateSpace::Object),
        Binding::ViewSpaceViewDirection => SlotKind::ViewDirection(CoordinateSpace::View),
        Binding::WorldSpaceViewDirection => SlotKind::ViewDirection(CoordinateSpace::World),
        Binding::TangentSpaceViewDirection => SlotKind::ViewDirection(CoordinateSpace::Tangent),
        Binding::VertexColor => SlotKind::VertexColor,
        Binding::None => {
            return Err(DefinitionError::UnknownBinding {
                parameter: parameter.to_string(),
            });
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{FunctionDescriptor, SlotAnnotation};
    use crate::types::ConcreteSlotValueType;

    fn specs_for(descriptor: &FunctionDescriptor) -> Vec<Slot> {
        descriptor
            .introspect()
            .unwrap()
            .iter()
            .map(|s| create_slot(s).unwrap())
            .collect()
    }

    #[test]
    fn test_generic_type_mapping_table() {
        let descriptor = FunctionDescriptor::new("Types")
            .input(0, "S", SlotValueType::Vector1)
            .input(1, "V2", SlotValueType::Vector2)
            .input(2, "V3", SlotValueType::Vector3)
            .input(3, "V4", SlotValueType::Vector4)
            .input(4, "Tex", SlotValueType::Texture2D)
            .input(5, "Samp", SlotValueType::SamplerState)
            .input(6, "Grad", SlotValueType::Gradient)
            .input(7, "Dyn", SlotValueType::Dynamic)
            .input(8, "Mat", SlotValueType::Matrix4)
            .body(|| Ok(String::new()));

        let slots = specs_for(&descriptor);
        for (slot, expected) in slots.iter().zip([
            SlotValueType::Vector1,
            SlotValueType::Vector2,
            SlotValueType::Vector3,
            SlotValueType::Vector4,
            SlotValueType::Texture2D,
            SlotValueType::SamplerState,
            SlotValueType::Gradient,
            SlotValueType::Dynamic,
            SlotValueType::Matrix4,
        ]) {
            assert_eq!(slot.kind, SlotKind::Value(expected));
        }
    }

    #[test]
    fn test_bound_output_takes_the_generic_path() {
        // The out flag wins over the binding: outputs are never bound.
        let descriptor = FunctionDescriptor::new("OutBound").param(crate::descriptor::Parameter {
            name: "Out".to_string(),
            ty: SlotValueType::Vector3,
            out: true,
            annotation: Some(SlotAnnotation {
                id: 0,
                binding: Binding::WorldSpaceNormal,
                hidden: false,
                default_value: None,
            }),
        });
        let descriptor = descriptor.body(|| Ok(String::new()));

        let slots = specs_for(&descriptor);
        assert_eq!(slots[0].kind, SlotKind::Value(SlotValueType::Vector3));
        assert!(slots[0].is_output());
    }

    #[test]
    fn test_bound_dispatch_covers_each_family() {
        let cases = [
            (
                Binding::ObjectSpaceNormal,
                SlotKind::Normal(CoordinateSpace::Object),
            ),
            (
                Binding::ViewSpaceTangent,
                SlotKind::Tangent(CoordinateSpace::View),
            ),
            (
                Binding::WorldSpaceBitangent,
                SlotKind::Bitangent(CoordinateSpace::World),
            ),
            (
                Binding::TangentSpacePosition,
                SlotKind::Position(CoordinateSpace::Tangent),
            ),
            (
                Binding::WorldSpaceViewDirection,
                SlotKind::ViewDirection(CoordinateSpace::World),
            ),
            (Binding::MeshUv3, SlotKind::MeshUv(UvChannel::Uv3)),
            (Binding::ScreenPosition, SlotKind::ScreenPosition),
            (Binding::VertexColor, SlotKind::VertexColor),
        ];

        for (binding, expected) in cases {
            let ty = expected.value_type();
            let descriptor = FunctionDescriptor::new("Bound")
                .bound_input(0, "In", ty, binding)
                .body(|| Ok(String::new()));
            let slots = specs_for(&descriptor);
            assert_eq!(slots[0].kind, expected, "binding {binding:?}");
            assert_eq!(slots[0].value_type(), ty);
        }
    }

    #[test]
    fn test_bound_resource_parameter_is_unsupported() {
        let descriptor = FunctionDescriptor::new("Bad")
            .bound_input(0, "Tex", SlotValueType::Texture2D, Binding::WorldSpaceNormal)
            .body(|| Ok(String::new()));
        let spec = descriptor.introspect().unwrap();
        match create_slot(&spec[0]) {
            Err(DefinitionError::UnsupportedParameterType { ty, .. }) => {
                assert_eq!(ty, SlotValueType::Texture2D);
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected UnsupportedParameterType"),
        }
    }

    #[test]
    fn test_defaults_and_hidden_flag_carry_through() {
        let descriptor = FunctionDescriptor::new("Defaults")
            .input_default(0, "B", SlotValueType::Vector4, [1.0, 2.0, 3.0, 4.0])
            .hidden_input(1, "H", SlotValueType::Vector1)
            .body(|| Ok(String::new()));
        let slots = specs_for(&descriptor);
        assert_eq!(slots[0].default_value, [1.0, 2.0, 3.0, 4.0]);
        assert!(!slots[0].hidden);
        assert!(slots[1].hidden);
        assert_eq!(
            slots[1].concrete_value_type(),
            ConcreteSlotValueType::Vector1
        );
    }
}
