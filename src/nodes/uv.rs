//! UV manipulation nodes.

use crate::descriptor::FunctionDescriptor;
use crate::slot::Binding;
use crate::types::SlotValueType;

pub fn rotate_uv() -> FunctionDescriptor {
    FunctionDescriptor::new("RotateUV")
        .stateless()
        .bound_input(0, "UV", SlotValueType::Vector2, Binding::MeshUv0)
        .input_default(1, "Center", SlotValueType::Vector2, [0.5, 0.5, 0.0, 0.0])
        .input(2, "Rotation", SlotValueType::Vector1)
        .output(3, "Out", SlotValueType::Vector2)
        .body(|| {
            Ok(r#"
{
    UV -= Center;
    {precision} s = sin(Rotation);
    {precision} c = cos(Rotation);
    {precision}2x2 rMatrix = {precision}2x2(c, -s, s, c);
    Out = mul(UV, rMatrix) + Center;
}
"#
            .to_string())
        })
}

pub fn tiling_and_offset() -> FunctionDescriptor {
    FunctionDescriptor::new("TilingAndOffset")
        .stateless()
        .bound_input(0, "UV", SlotValueType::Vector2, Binding::MeshUv0)
        .input_default(1, "Tiling", SlotValueType::Vector2, [1.0, 1.0, 0.0, 0.0])
        .input_default(2, "Offset", SlotValueType::Vector2, [0.0, 0.0, 0.0, 0.0])
        .output(3, "Out", SlotValueType::Vector2)
        .body(|| {
            Ok(r#"
{
    Out = UV * Tiling + Offset;
}
"#
            .to_string())
        })
}
