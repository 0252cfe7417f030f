//! Texture and gradient sampling nodes.

use crate::descriptor::FunctionDescriptor;
use crate::slot::Binding;
use crate::types::SlotValueType;

pub fn sample_texture2d() -> FunctionDescriptor {
    FunctionDescriptor::new("SampleTexture2D")
        .stateless()
        .input(0, "Texture", SlotValueType::Texture2D)
        .input(1, "Sampler", SlotValueType::SamplerState)
        .bound_input(2, "UV", SlotValueType::Vector2, Binding::MeshUv0)
        .output(3, "RGBA", SlotValueType::Vector4)
        .body(|| {
            Ok(r#"
{
    RGBA = Texture.Sample(Sampler, UV);
}
"#
            .to_string())
        })
}

pub fn sample_gradient() -> FunctionDescriptor {
    FunctionDescriptor::new("SampleGradient")
        .stateless()
        .input(0, "Gradient", SlotValueType::Gradient)
        .input_default(1, "Time", SlotValueType::Vector1, [0.5, 0.0, 0.0, 0.0])
        .output(2, "Out", SlotValueType::Vector4)
        .body(|| {
            Ok(r#"
{
    {precision}3 color = Gradient.colors[0].rgb;
    for (int c = 1; c < Gradient.colorsLength; c++)
    {
        {precision} pos = saturate((Time - Gradient.colors[c - 1].w) / (Gradient.colors[c].w - Gradient.colors[c - 1].w));
        color = lerp(color, Gradient.colors[c].rgb, pos);
    }
    {precision} alpha = Gradient.alphas[0].x;
    for (int a = 1; a < Gradient.alphasLength; a++)
    {
        {precision} pos = saturate((Time - Gradient.alphas[a - 1].y) / (Gradient.alphas[a].y - Gradient.alphas[a - 1].y));
        alpha = lerp(alpha, Gradient.alphas[a].x, pos);
    }
    Out = {precision}4(color, alpha);
}
"#
            .to_string())
        })
}
