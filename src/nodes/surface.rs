//! Screen-space, vertex-color, and blend nodes.

use crate::descriptor::FunctionDescriptor;
use crate::slot::Binding;
use crate::types::SlotValueType;

pub fn dither() -> FunctionDescriptor {
    FunctionDescriptor::new("Dither")
        .stateless()
        .input(0, "In", SlotValueType::Dynamic)
        .bound_input(
            1,
            "ScreenPosition",
            SlotValueType::Vector4,
            Binding::ScreenPosition,
        )
        .output(2, "Out", SlotValueType::Dynamic)
        .body(|| {
            Ok(r#"
{
    {precision}2 uv = ScreenPosition.xy / max(ScreenPosition.w, 0.0001);
    {precision} dither = frac(dot(uv, {precision}2(171.0, 231.0)) / 71.0);
    Out = In - dither;
}
"#
            .to_string())
        })
}

pub fn vertex_color_tint() -> FunctionDescriptor {
    FunctionDescriptor::new("VertexColorTint")
        .stateless()
        .bound_input(0, "Color", SlotValueType::Vector4, Binding::VertexColor)
        .input_default(1, "Tint", SlotValueType::Vector4, [1.0, 1.0, 1.0, 1.0])
        .output(2, "Out", SlotValueType::Vector4)
        .body(|| {
            Ok(r#"
{
    Out = Color * Tint;
}
"#
            .to_string())
        })
}

pub fn blend_soft_light() -> FunctionDescriptor {
    FunctionDescriptor::new("BlendSoftLight")
        .stateless()
        .input(0, "Base", SlotValueType::Dynamic)
        .input(1, "Blend", SlotValueType::Dynamic)
        .output(2, "Out", SlotValueType::Dynamic)
        .body(|| {
            Ok(r#"
{
    {precision}{slot2dimension} result1 = 2.0 * Base * Blend + Base * Base * (1.0 - 2.0 * Blend);
    {precision}{slot2dimension} result2 = sqrt(Base) * (2.0 * Blend - 1.0) + 2.0 * Base * (1.0 - Blend);
    {precision}{slot2dimension} zeroOrOne = step(0.5, Blend);
    Out = result2 * zeroOrOne + (1.0 - zeroOrOne) * result1;
}
"#
            .to_string())
        })
}
