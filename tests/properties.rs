use proptest::prelude::*;

use node_shader_compiler::{
    generate_node_code, Binding, FunctionDescriptor, GenerationMode, Precision, ShaderChunkBuffer,
    ShaderNode, SlotValueType, SpaceMask,
};

fn inputs_only_descriptor(ids: &[u32]) -> FunctionDescriptor {
    let mut descriptor = FunctionDescriptor::new("Probe").stateless();
    for &id in ids {
        descriptor = descriptor.input(id, &format!("P{id}"), SlotValueType::Vector1);
    }
    descriptor.body(|| Ok(String::new()))
}

/// Pool of bound inputs used by the aggregation properties.
const BOUND_POOL: [Binding; 8] = [
    Binding::ObjectSpaceNormal,
    Binding::ViewSpaceNormal,
    Binding::WorldSpaceNormal,
    Binding::TangentSpaceNormal,
    Binding::WorldSpaceTangent,
    Binding::WorldSpacePosition,
    Binding::ObjectSpaceViewDirection,
    Binding::None,
];

fn bound_descriptor(picks: &[usize]) -> FunctionDescriptor {
    let mut descriptor = FunctionDescriptor::new("Req").stateless();
    for (i, &pick) in picks.iter().enumerate() {
        let id = i as u32;
        let name = format!("P{id}");
        let binding = BOUND_POOL[pick % BOUND_POOL.len()];
        descriptor = if binding == Binding::None {
            descriptor.input(id, &name, SlotValueType::Vector1)
        } else {
            descriptor.bound_input(id, &name, SlotValueType::Vector3, binding)
        };
    }
    descriptor.body(|| Ok(String::new()))
}

fn masks_of(node: &ShaderNode) -> [SpaceMask; 5] {
    [
        node.requires_normal(),
        node.requires_tangent(),
        node.requires_bitangent(),
        node.requires_position(),
        node.requires_view_direction(),
    ]
}

proptest! {
    #[test]
    fn call_arguments_ascend_by_slot_id(
        ids in prop::collection::btree_set(any::<u8>(), 1..8).prop_map(|set| {
            set.into_iter().map(u32::from).collect::<Vec<u32>>()
        }).prop_shuffle()
    ) {
        let node = ShaderNode::new(1, inputs_only_descriptor(&ids)).unwrap();
        let mut out = ShaderChunkBuffer::new();
        let source = |_: &ShaderNode, slot: &node_shader_compiler::Slot, _: GenerationMode| {
            format!("v{}", slot.id)
        };
        generate_node_code(&node, &source, Precision::Float, GenerationMode::Final, &mut out);

        let call = out.source();
        let inner = call
            .split_once('(')
            .and_then(|(_, rest)| rest.rsplit_once(')'))
            .map(|(args, _)| args)
            .unwrap_or("");
        let arg_ids: Vec<u32> = inner
            .split(", ")
            .filter(|s| !s.is_empty())
            .map(|s| s.trim_start_matches('v').parse().unwrap())
            .collect();

        prop_assert_eq!(arg_ids.len(), ids.len());
        prop_assert!(arg_ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn requirement_aggregation_is_order_independent(
        picks in prop::collection::vec(0usize..BOUND_POOL.len(), 0..7)
    ) {
        let forward = ShaderNode::new(1, bound_descriptor(&picks)).unwrap();
        let reversed_picks: Vec<usize> = picks.iter().rev().copied().collect();
        let reversed = ShaderNode::new(1, bound_descriptor(&reversed_picks)).unwrap();

        prop_assert_eq!(masks_of(&forward), masks_of(&reversed));
        // Recomputation is stable.
        prop_assert_eq!(masks_of(&forward), masks_of(&forward));
    }

    #[test]
    fn rederivation_of_an_unchanged_signature_is_idempotent(
        picks in prop::collection::vec(0usize..BOUND_POOL.len(), 0..7)
    ) {
        let mut node = ShaderNode::new(1, bound_descriptor(&picks)).unwrap();
        let before: Vec<_> = node.slots().cloned().collect();
        node.rederive_slots().unwrap();
        let after: Vec<_> = node.slots().cloned().collect();
        prop_assert_eq!(before, after);
    }
}
