//! Core value and precision types shared across the compiler.

use std::fmt;

/// Numeric precision substituted into generated type names and body templates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Precision {
    #[default]
    Float,
    Half,
}

impl Precision {
    /// Token spliced into type names (`float3`) and `{precision}` placeholders.
    pub fn token(self) -> &'static str {
        match self {
            Precision::Float => "float",
            Precision::Half => "half",
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Whether code is generated for an interactive preview or the final shader.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerationMode {
    Preview,
    Final,
}

impl GenerationMode {
    pub fn is_preview(self) -> bool {
        matches!(self, GenerationMode::Preview)
    }
}

/// Declared value type of a slot, fixed when the slot is derived from its
/// entry-point parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotValueType {
    Vector1,
    Vector2,
    Vector3,
    Vector4,
    Texture2D,
    SamplerState,
    Gradient,
    Matrix4,
    /// Vector whose dimension is resolved by the surrounding graph.
    Dynamic,
}

impl SlotValueType {
    /// Concrete type assumed before graph inference has run.
    pub fn default_concrete(self) -> ConcreteSlotValueType {
        match self {
            SlotValueType::Vector1 => ConcreteSlotValueType::Vector1,
            SlotValueType::Vector2 => ConcreteSlotValueType::Vector2,
            SlotValueType::Vector3 => ConcreteSlotValueType::Vector3,
            SlotValueType::Vector4 => ConcreteSlotValueType::Vector4,
            SlotValueType::Texture2D => ConcreteSlotValueType::Texture2D,
            SlotValueType::SamplerState => ConcreteSlotValueType::SamplerState,
            SlotValueType::Gradient => ConcreteSlotValueType::Gradient,
            SlotValueType::Matrix4 => ConcreteSlotValueType::Matrix4,
            SlotValueType::Dynamic => ConcreteSlotValueType::Vector4,
        }
    }
}

/// Fully resolved value type used during emission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConcreteSlotValueType {
    Vector1,
    Vector2,
    Vector3,
    Vector4,
    Texture2D,
    SamplerState,
    Gradient,
    Matrix4,
}

impl ConcreteSlotValueType {
    /// Type name under the given precision (`float`, `half3`, `float4x4`).
    pub fn type_name(self, precision: Precision) -> String {
        match self {
            ConcreteSlotValueType::Vector1 => precision.token().to_string(),
            ConcreteSlotValueType::Vector2 => format!("{}2", precision.token()),
            ConcreteSlotValueType::Vector3 => format!("{}3", precision.token()),
            ConcreteSlotValueType::Vector4 => format!("{}4", precision.token()),
            ConcreteSlotValueType::Matrix4 => format!("{}4x4", precision.token()),
            ConcreteSlotValueType::Texture2D => "Texture2D".to_string(),
            ConcreteSlotValueType::SamplerState => "SamplerState".to_string(),
            ConcreteSlotValueType::Gradient => "Gradient".to_string(),
        }
    }

    /// Text substituted for `{slot<id>dimension}` placeholders. Opaque
    /// resource types have no dimension and are skipped by substitution.
    pub fn dimension(self) -> Option<&'static str> {
        match self {
            ConcreteSlotValueType::Vector1 => Some("1"),
            ConcreteSlotValueType::Vector2 => Some("2"),
            ConcreteSlotValueType::Vector3 => Some("3"),
            ConcreteSlotValueType::Vector4 => Some("4"),
            ConcreteSlotValueType::Matrix4 => Some("4x4"),
            ConcreteSlotValueType::Texture2D
            | ConcreteSlotValueType::SamplerState
            | ConcreteSlotValueType::Gradient => None,
        }
    }

    /// Component count for vector types.
    pub fn vector_dimension(self) -> Option<u8> {
        match self {
            ConcreteSlotValueType::Vector1 => Some(1),
            ConcreteSlotValueType::Vector2 => Some(2),
            ConcreteSlotValueType::Vector3 => Some(3),
            ConcreteSlotValueType::Vector4 => Some(4),
            _ => None,
        }
    }

    /// Vector type with the given component count (clamped to 1..=4).
    pub fn vector_of(dimension: u8) -> ConcreteSlotValueType {
        match dimension {
            0 | 1 => ConcreteSlotValueType::Vector1,
            2 => ConcreteSlotValueType::Vector2,
            3 => ConcreteSlotValueType::Vector3,
            _ => ConcreteSlotValueType::Vector4,
        }
    }
}

/// Format a float for shader source, keeping a decimal point so the literal
/// stays floating-point typed.
pub fn fmt_float(v: f32) -> String {
    if !v.is_finite() {
        return "0.0".to_string();
    }
    if v == v.trunc() {
        format!("{v:.1}")
    } else {
        let s = format!("{v:.9}");
        let s = s.trim_end_matches('0');
        if s.ends_with('.') {
            format!("{s}0")
        } else {
            s.to_string()
        }
    }
}
