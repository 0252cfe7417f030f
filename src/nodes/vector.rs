//! Vector and matrix operation nodes.

use crate::descriptor::FunctionDescriptor;
use crate::types::SlotValueType;

pub fn normalize() -> FunctionDescriptor {
    FunctionDescriptor::new("Normalize")
        .stateless()
        .input(0, "In", SlotValueType::Dynamic)
        .output(1, "Out", SlotValueType::Dynamic)
        .body(|| {
            Ok(r#"
{
    Out = normalize(In);
}
"#
            .to_string())
        })
}

pub fn dot_product() -> FunctionDescriptor {
    FunctionDescriptor::new("DotProduct")
        .stateless()
        .input(0, "A", SlotValueType::Dynamic)
        .input(1, "B", SlotValueType::Dynamic)
        .output(2, "Out", SlotValueType::Vector1)
        .body(|| {
            Ok(r#"
{
    Out = dot(A, B);
}
"#
            .to_string())
        })
}

pub fn cross_product() -> FunctionDescriptor {
    FunctionDescriptor::new("CrossProduct")
        .stateless()
        .input(0, "A", SlotValueType::Vector3)
        .input(1, "B", SlotValueType::Vector3)
        .output(2, "Out", SlotValueType::Vector3)
        .body(|| {
            Ok(r#"
{
    Out = cross(A, B);
}
"#
            .to_string())
        })
}

pub fn transform_direction() -> FunctionDescriptor {
    FunctionDescriptor::new("TransformDirection")
        .stateless()
        .input(0, "Matrix", SlotValueType::Matrix4)
        .input_default(1, "Dir", SlotValueType::Vector3, [0.0, 0.0, 1.0, 0.0])
        .output(2, "Out", SlotValueType::Vector3)
        .body(|| {
            Ok(r#"
{
    Out = mul(({precision}3x3)Matrix, Dir);
}
"#
            .to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::ShaderNode;
    use crate::types::ConcreteSlotValueType;

    #[test]
    fn test_dot_output_is_scalar_regardless_of_inputs() {
        let node = ShaderNode::new(1, dot_product()).unwrap();
        assert_eq!(
            node.slot(2).unwrap().concrete_value_type(),
            ConcreteSlotValueType::Vector1
        );
    }

    #[test]
    fn test_transform_direction_takes_a_matrix() {
        let node = ShaderNode::new(1, transform_direction()).unwrap();
        assert_eq!(node.slot(0).unwrap().value_type(), SlotValueType::Matrix4);
    }
}
