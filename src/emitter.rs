//! Call-site and function-definition generation.

use crate::error::DefinitionError;
use crate::node::ShaderNode;
use crate::slot::Slot;
use crate::types::{fmt_float, ConcreteSlotValueType, GenerationMode, Precision};

/// Append-only sink for generated shader text.
///
/// Chunks are joined with newlines when the source is assembled; the
/// emitter never reads the buffer back.
#[derive(Debug, Default)]
pub struct ShaderChunkBuffer {
    chunks: Vec<String>,
}

impl ShaderChunkBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_chunk(&mut self, chunk: impl Into<String>) {
        self.chunks.push(chunk.into());
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    pub fn source(&self) -> String {
        self.chunks.join("\n")
    }
}

/// Resolves the shading-language text for a node's input slot: a wired
/// connection's variable name, a bound interpolator, or a literal default.
///
/// Implemented by the graph pipeline; closures work for tests and
/// standalone emission.
pub trait SlotValueSource {
    fn slot_value(&self, node: &ShaderNode, slot: &Slot, mode: GenerationMode) -> String;
}

impl<F> SlotValueSource for F
where
    F: Fn(&ShaderNode, &Slot, GenerationMode) -> String,
{
    fn slot_value(&self, node: &ShaderNode, slot: &Slot, mode: GenerationMode) -> String {
        self(node, slot, mode)
    }
}

/// Function name for a node's entry point: base name, per-node suffix for
/// stateful descriptors, then the precision token.
pub fn function_name(node: &ShaderNode, precision: Precision) -> String {
    let descriptor = node.descriptor();
    if descriptor.is_stateless() {
        format!("{}_{}", descriptor.name(), precision.token())
    } else {
        format!(
            "{}_{}_{}",
            descriptor.name(),
            node.instance_token(),
            precision.token()
        )
    }
}

/// Emit the call-site block for a node: one typed local declaration per
/// output slot, then the call statement with arguments in ascending
/// slot-id order.
pub fn generate_node_code(
    node: &ShaderNode,
    values: &dyn SlotValueSource,
    precision: Precision,
    mode: GenerationMode,
    out: &mut ShaderChunkBuffer,
) {
    for slot in node.output_slots() {
        out.add_chunk(format!(
            "{} {};",
            slot.concrete_value_type().type_name(precision),
            node.variable_name(slot)
        ));
    }

    let args: Vec<String> = node
        .slots()
        .map(|slot| {
            if slot.is_input() {
                values.slot_value(node, slot, mode)
            } else {
                node.variable_name(slot)
            }
        })
        .collect();

    out.add_chunk(format!(
        "{}({});",
        function_name(node, precision),
        args.join(", ")
    ));
}

/// Emit the standalone function definition for a node: a `void` header with
/// `out`-qualified output parameters, followed by the substituted body
/// template.
pub fn generate_node_function(
    node: &ShaderNode,
    precision: Precision,
    out: &mut ShaderChunkBuffer,
) -> Result<(), DefinitionError> {
    let header = function_header(node, precision);
    let body = node.descriptor().invoke_template()?;
    out.add_chunk(format!("{header}{}", substitute_body(&body, node, precision)));
    Ok(())
}

fn function_header(node: &ShaderNode, precision: Precision) -> String {
    let params: Vec<String> = node
        .slots()
        .map(|slot| {
            let qualifier = if slot.is_output() { "out " } else { "" };
            format!(
                "{qualifier}{} {}",
                slot.concrete_value_type().type_name(precision),
                slot.shader_name
            )
        })
        .collect();
    format!(
        "void {}({})",
        function_name(node, precision),
        params.join(", ")
    )
}

/// Substitute the documented placeholders into a body template.
///
/// The placeholder grammar is a stable contract with entry-point authors:
/// `{precision}` becomes the active precision token, and `{slot<id>dimension}`
/// becomes the resolved dimension text of the slot with that id (`1`..`4`,
/// or `4x4` for matrices). Unknown placeholders pass through untouched.
pub fn substitute_body(template: &str, node: &ShaderNode, precision: Precision) -> String {
    let mut body = template.replace("{precision}", precision.token());
    for slot in node.slots() {
        if let Some(dimension) = slot.concrete_value_type().dimension() {
            body = body.replace(&format!("{{slot{}dimension}}", slot.id), dimension);
        }
    }
    body
}

/// Literal text for an unwired input slot under the given precision.
///
/// Opaque resource types have no literal form and return `None`; the
/// pipeline falls back to a node-scoped uniform reference for those.
pub fn default_literal(slot: &Slot, precision: Precision) -> Option<String> {
    let v = slot.default_value;
    let p = precision.token();
    Some(match slot.concrete_value_type() {
        ConcreteSlotValueType::Vector1 => fmt_float(v[0]),
        ConcreteSlotValueType::Vector2 => {
            format!("{p}2({}, {})", fmt_float(v[0]), fmt_float(v[1]))
        }
        ConcreteSlotValueType::Vector3 => format!(
            "{p}3({}, {}, {})",
            fmt_float(v[0]),
            fmt_float(v[1]),
            fmt_float(v[2])
        ),
        ConcreteSlotValueType::Vector4 => format!(
            "{p}4({}, {}, {}, {})",
            fmt_float(v[0]),
            fmt_float(v[1]),
            fmt_float(v[2]),
            fmt_float(v[3])
        ),
        ConcreteSlotValueType::Matrix4 => format!(
            "{p}4x4(1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0)"
        ),
        ConcreteSlotValueType::Texture2D
        | ConcreteSlotValueType::SamplerState
        | ConcreteSlotValueType::Gradient => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::FunctionDescriptor;
    use crate::types::SlotValueType;

    fn defaults_source() -> impl SlotValueSource {
        |node: &ShaderNode, slot: &Slot, _mode: GenerationMode| {
            default_literal(slot, Precision::Float)
                .unwrap_or_else(|| node.variable_name(slot))
        }
    }

    fn divide_node(id: u64, stateless: bool) -> ShaderNode {
        let mut descriptor = FunctionDescriptor::new("Divide")
            .input_default(0, "A", SlotValueType::Dynamic, [1.0, 1.0, 1.0, 1.0])
            .input_default(1, "B", SlotValueType::Dynamic, [1.0, 1.0, 1.0, 1.0])
            .output(2, "Out", SlotValueType::Dynamic)
            .body(|| {
                Ok(r#"
{
    Out = A / B;
}
"#
                .to_string())
            });
        if stateless {
            descriptor = descriptor.stateless();
        }
        let mut node = ShaderNode::new(id, descriptor).unwrap();
        node.resolve_dynamic_slots(crate::types::ConcreteSlotValueType::Vector1);
        node
    }

    #[test]
    fn test_call_site_declares_outputs_before_the_call() {
        let node = divide_node(5, false);
        let mut out = ShaderChunkBuffer::new();
        generate_node_code(
            &node,
            &defaults_source(),
            Precision::Float,
            GenerationMode::Preview,
            &mut out,
        );

        assert_eq!(out.chunks()[0], "float _Node5_Out;");
        assert_eq!(
            out.chunks()[1],
            "Divide_Node5_float(1.0, 1.0, _Node5_Out);"
        );
    }

    #[test]
    fn test_stateless_functions_carry_no_instance_suffix() {
        let node = divide_node(5, true);
        assert_eq!(function_name(&node, Precision::Float), "Divide_float");
        assert_eq!(function_name(&node, Precision::Half), "Divide_half");
    }

    #[test]
    fn test_function_definition_header_and_body() {
        let node = divide_node(5, false);
        let mut out = ShaderChunkBuffer::new();
        generate_node_function(&node, Precision::Float, &mut out).unwrap();

        let text = out.source();
        assert!(text.starts_with(
            "void Divide_Node5_float(float A, float B, out float Out)"
        ));
        assert!(text.contains("{\n    Out = A / B;\n}"));
    }

    #[test]
    fn test_half_precision_flows_into_types_and_name() {
        let node = divide_node(2, false);
        let mut out = ShaderChunkBuffer::new();
        generate_node_function(&node, Precision::Half, &mut out).unwrap();
        assert!(out
            .source()
            .starts_with("void Divide_Node2_half(half A, half B, out half Out)"));
    }

    #[test]
    fn test_body_placeholder_substitution() {
        let descriptor = FunctionDescriptor::new("Scale")
            .stateless()
            .input(0, "In", SlotValueType::Vector3)
            .output(1, "Out", SlotValueType::Vector3)
            .body(|| {
                Ok("\n{\n    {precision}{slot0dimension} scaled = In * 2.0;\n    Out = scaled;\n}\n"
                    .to_string())
            });
        let node = ShaderNode::new(1, descriptor).unwrap();
        let mut out = ShaderChunkBuffer::new();
        generate_node_function(&node, Precision::Half, &mut out).unwrap();
        assert!(out.source().contains("half3 scaled = In * 2.0;"));
    }

    #[test]
    fn test_failing_template_aborts_function_generation() {
        let descriptor = FunctionDescriptor::new("Broken")
            .output(0, "Out", SlotValueType::Vector1)
            .body(|| anyhow::bail!("template blew up"));
        let node = ShaderNode::new(1, descriptor).unwrap();
        let mut out = ShaderChunkBuffer::new();
        let err = generate_node_function(&node, Precision::Float, &mut out).unwrap_err();
        assert!(matches!(err, DefinitionError::TemplateInvocation { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn test_default_literals_per_type() {
        let node = divide_node(1, true);
        let a = node.slot(0).unwrap();
        assert_eq!(default_literal(a, Precision::Float).as_deref(), Some("1.0"));

        let descriptor = FunctionDescriptor::new("Lit")
            .input_default(0, "V3", SlotValueType::Vector3, [0.5, 1.0, 0.0, 0.0])
            .input(1, "Tex", SlotValueType::Texture2D)
            .body(|| Ok(String::new()));
        let node = ShaderNode::new(1, descriptor).unwrap();
        assert_eq!(
            default_literal(node.slot(0).unwrap(), Precision::Half).as_deref(),
            Some("half3(0.5, 1.0, 0.0)")
        );
        assert_eq!(default_literal(node.slot(1).unwrap(), Precision::Float), None);
    }
}
