//! Shader nodes: slot ownership, derivation, and requirement aggregation.

use std::collections::BTreeMap;

use crate::descriptor::FunctionDescriptor;
use crate::error::DefinitionError;
use crate::factory;
use crate::slot::{Slot, SpaceMask, UvChannel};
use crate::types::ConcreteSlotValueType;

/// A computation node owning the slots derived from its entry point.
///
/// The persisted `id` keys generated variable names and the per-node
/// function suffix, so regenerating the same graph reproduces identical
/// source. Slots live in a `BTreeMap` keyed by slot id: every view iterates
/// in ascending id order, which call-site and header emission depend on.
pub struct ShaderNode {
    id: u64,
    descriptor: FunctionDescriptor,
    slots: BTreeMap<u32, Slot>,
}

impl ShaderNode {
    /// Build a node and derive its slots. All-or-nothing: any definition
    /// fault leaves no node behind.
    pub fn new(id: u64, descriptor: FunctionDescriptor) -> Result<Self, DefinitionError> {
        let slots = Self::derive_from(&descriptor, &BTreeMap::new())?;
        Ok(ShaderNode {
            id,
            descriptor,
            slots,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn descriptor(&self) -> &FunctionDescriptor {
        &self.descriptor
    }

    /// Token identifying this node instance inside generated symbols.
    pub fn instance_token(&self) -> String {
        format!("Node{}", self.id)
    }

    /// Shader-facing variable name for one of this node's slots.
    pub fn variable_name(&self, slot: &Slot) -> String {
        format!("_{}_{}", self.instance_token(), slot.shader_name)
    }

    /// Re-derive the slot set from the current descriptor. Idempotent for an
    /// unchanged signature.
    pub fn rederive_slots(&mut self) -> Result<(), DefinitionError> {
        let next = Self::derive_from(&self.descriptor, &self.slots)?;
        self.slots = next;
        Ok(())
    }

    /// Swap in a new entry point and re-derive the slot set wholesale. Slots
    /// whose id, kind, and direction survive keep their current default
    /// value; everything else is pruned with the old set. The previous slots
    /// are left untouched if derivation fails.
    pub fn replace_descriptor(
        &mut self,
        descriptor: FunctionDescriptor,
    ) -> Result<(), DefinitionError> {
        let next = Self::derive_from(&descriptor, &self.slots)?;
        self.descriptor = descriptor;
        self.slots = next;
        Ok(())
    }

    fn derive_from(
        descriptor: &FunctionDescriptor,
        previous: &BTreeMap<u32, Slot>,
    ) -> Result<BTreeMap<u32, Slot>, DefinitionError> {
        let specs = descriptor.introspect()?;
        let mut next = BTreeMap::new();
        for spec in &specs {
            let mut slot = factory::create_slot(spec)?;
            if let Some(existing) = previous.get(&slot.id) {
                if existing.kind == slot.kind
                    && existing.direction == slot.direction
                    && existing.shader_name == slot.shader_name
                {
                    slot.default_value = existing.default_value;
                }
            }
            next.insert(slot.id, slot);
        }
        Ok(next)
    }

    /// All slots in ascending id order.
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.values()
    }

    pub fn input_slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.values().filter(|s| s.is_input())
    }

    pub fn output_slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.values().filter(|s| s.is_output())
    }

    pub fn slot(&self, id: u32) -> Option<&Slot> {
        self.slots.get(&id)
    }

    pub fn input_slot_by_name(&self, shader_name: &str) -> Option<&Slot> {
        self.input_slots().find(|s| s.shader_name == shader_name)
    }

    /// Override an input slot's default value. Returns false when the id
    /// names no input slot.
    pub fn set_default_value(&mut self, slot_id: u32, value: [f32; 4]) -> bool {
        match self.slots.get_mut(&slot_id) {
            Some(slot) if slot.is_input() => {
                slot.default_value = value;
                true
            }
            _ => false,
        }
    }

    /// Pin every dynamic slot to `concrete`.
    pub fn resolve_dynamic_slots(&mut self, concrete: ConcreteSlotValueType) {
        for slot in self.slots.values_mut() {
            slot.resolve_dynamic(concrete);
        }
    }

    pub fn requires_normal(&self) -> SpaceMask {
        self.input_slots()
            .fold(SpaceMask::NONE, |mask, s| mask | s.requires_normal())
    }

    pub fn requires_tangent(&self) -> SpaceMask {
        self.input_slots()
            .fold(SpaceMask::NONE, |mask, s| mask | s.requires_tangent())
    }

    pub fn requires_bitangent(&self) -> SpaceMask {
        self.input_slots()
            .fold(SpaceMask::NONE, |mask, s| mask | s.requires_bitangent())
    }

    pub fn requires_position(&self) -> SpaceMask {
        self.input_slots()
            .fold(SpaceMask::NONE, |mask, s| mask | s.requires_position())
    }

    pub fn requires_view_direction(&self) -> SpaceMask {
        self.input_slots()
            .fold(SpaceMask::NONE, |mask, s| mask | s.requires_view_direction())
    }

    pub fn requires_mesh_uv(&self, channel: UvChannel) -> bool {
        self.input_slots().any(|s| s.requires_mesh_uv(channel))
    }

    pub fn requires_screen_position(&self) -> bool {
        self.input_slots().any(|s| s.requires_screen_position())
    }

    pub fn requires_vertex_color(&self) -> bool {
        self.input_slots().any(|s| s.requires_vertex_color())
    }
}
