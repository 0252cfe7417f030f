//! Nodes over implicit geometric inputs.

use crate::descriptor::FunctionDescriptor;
use crate::slot::Binding;
use crate::types::SlotValueType;

pub fn fresnel() -> FunctionDescriptor {
    FunctionDescriptor::new("Fresnel")
        .stateless()
        .bound_input(0, "Normal", SlotValueType::Vector3, Binding::WorldSpaceNormal)
        .bound_input(
            1,
            "ViewDir",
            SlotValueType::Vector3,
            Binding::WorldSpaceViewDirection,
        )
        .input_default(2, "Power", SlotValueType::Vector1, [1.0, 0.0, 0.0, 0.0])
        .output(3, "Out", SlotValueType::Vector1)
        .body(|| {
            Ok(r#"
{
    Out = pow(1.0 - saturate(dot(normalize(Normal), normalize(ViewDir))), Power);
}
"#
            .to_string())
        })
}
