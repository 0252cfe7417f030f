//! Basic math nodes over dynamically sized vectors.

use crate::descriptor::FunctionDescriptor;
use crate::types::SlotValueType;

pub fn add() -> FunctionDescriptor {
    binary("Add", "Out = A + B;")
}

pub fn subtract() -> FunctionDescriptor {
    binary("Subtract", "Out = A - B;")
}

pub fn multiply() -> FunctionDescriptor {
    binary("Multiply", "Out = A * B;")
}

pub fn divide() -> FunctionDescriptor {
    FunctionDescriptor::new("Divide")
        .stateless()
        .input(0, "A", SlotValueType::Dynamic)
        .input_default(1, "B", SlotValueType::Dynamic, [1.0, 1.0, 1.0, 1.0])
        .output(2, "Out", SlotValueType::Dynamic)
        .body(|| {
            Ok(r#"
{
    Out = A / B;
}
"#
            .to_string())
        })
}

pub fn power() -> FunctionDescriptor {
    FunctionDescriptor::new("Power")
        .stateless()
        .input(0, "A", SlotValueType::Dynamic)
        .input_default(1, "B", SlotValueType::Dynamic, [2.0, 2.0, 2.0, 2.0])
        .output(2, "Out", SlotValueType::Dynamic)
        .body(|| {
            Ok(r#"
{
    Out = pow(A, B);
}
"#
            .to_string())
        })
}

pub fn lerp() -> FunctionDescriptor {
    FunctionDescriptor::new("Lerp")
        .stateless()
        .input(0, "A", SlotValueType::Dynamic)
        .input(1, "B", SlotValueType::Dynamic)
        .input(2, "T", SlotValueType::Dynamic)
        .output(3, "Out", SlotValueType::Dynamic)
        .body(|| {
            Ok(r#"
{
    Out = lerp(A, B, T);
}
"#
            .to_string())
        })
}

pub fn remap() -> FunctionDescriptor {
    FunctionDescriptor::new("Remap")
        .stateless()
        .input(0, "In", SlotValueType::Dynamic)
        .input_default(1, "InMinMax", SlotValueType::Vector2, [-1.0, 1.0, 0.0, 0.0])
        .input_default(2, "OutMinMax", SlotValueType::Vector2, [0.0, 1.0, 0.0, 0.0])
        .output(3, "Out", SlotValueType::Dynamic)
        .body(|| {
            Ok(r#"
{
    Out = OutMinMax.x + (In - InMinMax.x) * (OutMinMax.y - OutMinMax.x) / (InMinMax.y - InMinMax.x);
}
"#
            .to_string())
        })
}

fn binary(name: &str, statement: &'static str) -> FunctionDescriptor {
    FunctionDescriptor::new(name)
        .stateless()
        .input(0, "A", SlotValueType::Dynamic)
        .input(1, "B", SlotValueType::Dynamic)
        .output(2, "Out", SlotValueType::Dynamic)
        .body(move || Ok(format!("\n{{\n    {statement}\n}}\n")))
}
