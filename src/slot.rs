//! Slot model: bindings, coordinate spaces, and per-slot capability queries.

use std::ops::{BitOr, BitOrAssign};

use crate::types::{ConcreteSlotValueType, SlotValueType};

/// Geometric frame a bound quantity is expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoordinateSpace {
    Object,
    View,
    World,
    Tangent,
}

impl CoordinateSpace {
    pub fn mask(self) -> SpaceMask {
        match self {
            CoordinateSpace::Object => SpaceMask::OBJECT,
            CoordinateSpace::View => SpaceMask::VIEW,
            CoordinateSpace::World => SpaceMask::WORLD,
            CoordinateSpace::Tangent => SpaceMask::TANGENT,
        }
    }

    /// Lower-case token used in generated interpolator names.
    pub fn token(self) -> &'static str {
        match self {
            CoordinateSpace::Object => "object",
            CoordinateSpace::View => "view",
            CoordinateSpace::World => "world",
            CoordinateSpace::Tangent => "tangent",
        }
    }
}

/// Bitmask of coordinate spaces a geometric quantity is needed in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpaceMask(u8);

impl SpaceMask {
    pub const NONE: SpaceMask = SpaceMask(0);
    pub const OBJECT: SpaceMask = SpaceMask(1 << 0);
    pub const VIEW: SpaceMask = SpaceMask(1 << 1);
    pub const WORLD: SpaceMask = SpaceMask(1 << 2);
    pub const TANGENT: SpaceMask = SpaceMask(1 << 3);

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, space: CoordinateSpace) -> bool {
        self.0 & space.mask().0 != 0
    }
}

impl BitOr for SpaceMask {
    type Output = SpaceMask;

    fn bitor(self, rhs: SpaceMask) -> SpaceMask {
        SpaceMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for SpaceMask {
    fn bitor_assign(&mut self, rhs: SpaceMask) {
        self.0 |= rhs.0;
    }
}

/// Mesh UV channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UvChannel {
    Uv0,
    Uv1,
    Uv2,
    Uv3,
}

impl UvChannel {
    pub const ALL: [UvChannel; 4] = [
        UvChannel::Uv0,
        UvChannel::Uv1,
        UvChannel::Uv2,
        UvChannel::Uv3,
    ];

    pub fn index(self) -> usize {
        match self {
            UvChannel::Uv0 => 0,
            UvChannel::Uv1 => 1,
            UvChannel::Uv2 => 2,
            UvChannel::Uv3 => 3,
        }
    }
}

/// Implicit semantic source for a slot, bypassing explicit wiring.
///
/// Closed enumeration; immutable once a slot has been created from it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Binding {
    #[default]
    None,
    ObjectSpaceNormal,
    ObjectSpaceTangent,
    ObjectSpaceBitangent,
    ObjectSpacePosition,
    ViewSpaceNormal,
    ViewSpaceTangent,
    ViewSpaceBitangent,
    ViewSpacePosition,
    WorldSpaceNormal,
    WorldSpaceTangent,
    WorldSpaceBitangent,
    WorldSpacePosition,
    TangentSpaceNormal,
    TangentSpaceTangent,
    TangentSpaceBitangent,
    TangentSpacePosition,
    MeshUv0,
    MeshUv1,
    MeshUv2,
    MeshUv3,
    ScreenPosition,
    ObjectSpaceViewDirection,
    ViewSpaceViewDirection,
    WorldSpaceViewDirection,
    TangentSpaceViewDirection,
    VertexColor,
}

/// Input or output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotDirection {
    Input,
    Output,
}

/// What a slot is: a plain typed value, or one of the specialized bound
/// kinds that carries its own coordinate space or UV channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotKind {
    Value(SlotValueType),
    Normal(CoordinateSpace),
    Tangent(CoordinateSpace),
    Bitangent(CoordinateSpace),
    Position(CoordinateSpace),
    ViewDirection(CoordinateSpace),
    MeshUv(UvChannel),
    ScreenPosition,
    VertexColor,
}

impl SlotKind {
    /// Declared value type implied by the kind.
    pub fn value_type(self) -> SlotValueType {
        match self {
            SlotKind::Value(ty) => ty,
            SlotKind::Normal(_)
            | SlotKind::Tangent(_)
            | SlotKind::Bitangent(_)
            | SlotKind::Position(_)
            | SlotKind::ViewDirection(_) => SlotValueType::Vector3,
            SlotKind::MeshUv(_) => SlotValueType::Vector2,
            SlotKind::ScreenPosition | SlotKind::VertexColor => SlotValueType::Vector4,
        }
    }

    /// Interpolator variable the surrounding pipeline generates for a bound
    /// slot. `None` for plain value slots, which are wired or defaulted.
    pub fn bound_variable(self) -> Option<String> {
        match self {
            SlotKind::Value(_) => None,
            SlotKind::Normal(space) => Some(format!("IN.{}SpaceNormal", space.token())),
            SlotKind::Tangent(space) => Some(format!("IN.{}SpaceTangent", space.token())),
            SlotKind::Bitangent(space) => Some(format!("IN.{}SpaceBitangent", space.token())),
            SlotKind::Position(space) => Some(format!("IN.{}SpacePosition", space.token())),
            SlotKind::ViewDirection(space) => {
                Some(format!("IN.{}SpaceViewDirection", space.token()))
            }
            SlotKind::MeshUv(channel) => Some(format!("IN.uv{}.xy", channel.index())),
            SlotKind::ScreenPosition => Some("IN.screenPosition".to_string()),
            SlotKind::VertexColor => Some("IN.vertexColor".to_string()),
        }
    }
}

/// A typed port on a node, derived from one entry-point parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct Slot {
    pub id: u32,
    pub display_name: String,
    /// Name the slot has inside generated shader code.
    pub shader_name: String,
    pub direction: SlotDirection,
    pub kind: SlotKind,
    /// Hidden slots stay out of any UI but still participate in codegen.
    pub hidden: bool,
    /// Used when the slot is neither wired nor bound.
    pub default_value: [f32; 4],
    concrete: Option<ConcreteSlotValueType>,
}

impl Slot {
    pub fn new(
        id: u32,
        display_name: impl Into<String>,
        shader_name: impl Into<String>,
        direction: SlotDirection,
        kind: SlotKind,
        hidden: bool,
        default_value: [f32; 4],
    ) -> Self {
        Slot {
            id,
            display_name: display_name.into(),
            shader_name: shader_name.into(),
            direction,
            kind,
            hidden,
            default_value,
            concrete: None,
        }
    }

    pub fn is_input(&self) -> bool {
        self.direction == SlotDirection::Input
    }

    pub fn is_output(&self) -> bool {
        self.direction == SlotDirection::Output
    }

    pub fn value_type(&self) -> SlotValueType {
        self.kind.value_type()
    }

    /// Resolved type used during emission. Dynamic slots report their
    /// inferred dimension, or Vector4 before inference has run.
    pub fn concrete_value_type(&self) -> ConcreteSlotValueType {
        self.concrete
            .unwrap_or_else(|| self.value_type().default_concrete())
    }

    /// Pin a dynamic slot to a concrete type. Slots with a fixed declared
    /// type ignore this.
    pub fn resolve_dynamic(&mut self, concrete: ConcreteSlotValueType) {
        if self.value_type() == SlotValueType::Dynamic {
            self.concrete = Some(concrete);
        }
    }

    pub fn requires_normal(&self) -> SpaceMask {
        match self.kind {
            SlotKind::Normal(space) => space.mask(),
            _ => SpaceMask::NONE,
        }
    }

    pub fn requires_tangent(&self) -> SpaceMask {
        match self.kind {
            SlotKind::Tangent(space) => space.mask(),
            _ => SpaceMask::NONE,
        }
    }

    pub fn requires_bitangent(&self) -> SpaceMask {
        match self.kind {
            SlotKind::Bitangent(space) => space.mask(),
            _ => SpaceMask::NONE,
        }
    }

    pub fn requires_position(&self) -> SpaceMask {
        match self.kind {
            SlotKind::Position(space) => space.mask(),
            _ => SpaceMask::NONE,
        }
    }

    pub fn requires_view_direction(&self) -> SpaceMask {
        match self.kind {
            SlotKind::ViewDirection(space) => space.mask(),
            _ => SpaceMask::NONE,
        }
    }

    pub fn requires_mesh_uv(&self, channel: UvChannel) -> bool {
        matches!(self.kind, SlotKind::MeshUv(c) if c == channel)
    }

    pub fn requires_screen_position(&self) -> bool {
        matches!(self.kind, SlotKind::ScreenPosition)
    }

    pub fn requires_vertex_color(&self) -> bool {
        matches!(self.kind, SlotKind::VertexColor)
    }
}
