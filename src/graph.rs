//! Graph documents and the whole-graph compilation pipeline.
//!
//! A graph document is the serde-level description of node instances and
//! connections. Compilation instantiates each node from the kind registry,
//! infers dynamic vector dimensions along connections, and drives the
//! emitter once per node in dependency order. A failing node aborts only
//! its own contribution; failures are collected per node rather than
//! aborting the whole compile.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use anyhow::{anyhow, bail, Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::emitter::{self, ShaderChunkBuffer, SlotValueSource};
use crate::node::ShaderNode;
use crate::registry::NodeKindRegistry;
use crate::slot::Slot;
use crate::types::{ConcreteSlotValueType, GenerationMode, Precision, SlotValueType};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GraphDoc {
    pub version: String,
    #[serde(default)]
    pub nodes: Vec<NodeInstance>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NodeInstance {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: String,
    /// Per-slot default overrides keyed by shader-facing slot name.
    #[serde(default)]
    pub defaults: HashMap<String, [f32; 4]>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Connection {
    pub from: Endpoint,
    pub to: Endpoint,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Endpoint {
    #[serde(rename = "nodeId")]
    pub node_id: u64,
    #[serde(rename = "slotId")]
    pub slot_id: u32,
}

pub fn load_graph_from_path(path: impl AsRef<std::path::Path>) -> Result<GraphDoc> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read graph json at {}", path.display()))?;
    parse_graph(&text)
}

pub fn parse_graph(text: &str) -> Result<GraphDoc> {
    serde_json::from_str(text).context("failed to parse graph json")
}

/// Connection feeding `slot_id` on `node_id`, if any.
pub fn incoming_connection(
    connections: &[Connection],
    node_id: u64,
    slot_id: u32,
) -> Option<&Connection> {
    connections
        .iter()
        .find(|c| c.to.node_id == node_id && c.to.slot_id == slot_id)
}

/// One node that failed to contribute, with the fault that stopped it.
#[derive(Debug)]
pub struct NodeFailure {
    pub node_id: u64,
    pub kind: String,
    pub error: anyhow::Error,
}

/// Result of compiling a whole graph document.
pub struct CompiledGraph {
    /// Deduplicated function definitions, dependency-ordered.
    pub functions: String,
    /// Call-site statements, dependency-ordered.
    pub body: String,
    /// Nodes that aborted their own contribution.
    pub failures: Vec<NodeFailure>,
    /// Successfully instantiated nodes, for requirement queries.
    pub nodes: BTreeMap<u64, ShaderNode>,
}

/// Compile a graph document into function definitions plus call-site code.
///
/// Document-level faults (duplicate ids, cycles) fail the whole compile;
/// per-node faults (unknown kind, definition errors, failing templates) are
/// collected into the failure list while the rest of the graph emits.
pub fn compile_graph(
    doc: &GraphDoc,
    registry: &NodeKindRegistry,
    precision: Precision,
    mode: GenerationMode,
) -> Result<CompiledGraph> {
    let mut ids = HashSet::new();
    for instance in &doc.nodes {
        if !ids.insert(instance.id) {
            bail!("duplicate node id {} in graph document", instance.id);
        }
    }

    let mut failures: Vec<NodeFailure> = Vec::new();
    let mut nodes: BTreeMap<u64, ShaderNode> = BTreeMap::new();

    for instance in &doc.nodes {
        let Some(descriptor) = registry.descriptor(&instance.kind) else {
            failures.push(NodeFailure {
                node_id: instance.id,
                kind: instance.kind.clone(),
                error: anyhow!("unknown node kind `{}`", instance.kind),
            });
            continue;
        };
        match ShaderNode::new(instance.id, descriptor) {
            Ok(mut node) => {
                for (name, value) in &instance.defaults {
                    match node.input_slot_by_name(name).map(|s| s.id) {
                        Some(slot_id) => {
                            node.set_default_value(slot_id, *value);
                        }
                        None => warn!(
                            "node {}: no input slot named `{name}` for default override",
                            instance.id
                        ),
                    }
                }
                nodes.insert(instance.id, node);
            }
            Err(e) => failures.push(NodeFailure {
                node_id: instance.id,
                kind: instance.kind.clone(),
                error: e.into(),
            }),
        }
    }

    let order = dependency_order(&nodes, &doc.connections)?;
    resolve_dynamic_dimensions(&mut nodes, &order, &doc.connections);

    let values = GraphValueSource {
        connections: &doc.connections,
        nodes: &nodes,
        precision,
    };
    let mut functions = ShaderChunkBuffer::new();
    let mut body = ShaderChunkBuffer::new();
    let mut emitted: HashSet<String> = HashSet::new();

    for id in &order {
        let Some(node) = nodes.get(id) else { continue };
        // Dedup by name plus resolved parameter types: two nodes sharing a
        // stateless entry point but resolving to different dimensions are
        // distinct overloads and both get a definition.
        let name = emitter::function_name(node, precision);
        let signature: Vec<String> = node
            .slots()
            .map(|s| s.concrete_value_type().type_name(precision))
            .collect();
        let key = format!("{name}({})", signature.join(","));
        if emitted.insert(key.clone()) {
            if let Err(e) = emitter::generate_node_function(node, precision, &mut functions) {
                warn!("node {id}: function generation failed: {e}");
                emitted.remove(&key);
                failures.push(NodeFailure {
                    node_id: *id,
                    kind: kind_of(doc, *id),
                    error: e.into(),
                });
                continue;
            }
        } else {
            debug!("function `{name}` already emitted; reusing it for node {id}");
        }
        emitter::generate_node_code(node, &values, precision, mode, &mut body);
    }

    Ok(CompiledGraph {
        functions: functions.source(),
        body: body.source(),
        failures,
        nodes,
    })
}

fn kind_of(doc: &GraphDoc, node_id: u64) -> String {
    doc.nodes
        .iter()
        .find(|n| n.id == node_id)
        .map(|n| n.kind.clone())
        .unwrap_or_default()
}

/// Topological order over the instantiated nodes, ascending-id stable.
/// Connections touching uninstantiated nodes do not constrain the order.
fn dependency_order(
    nodes: &BTreeMap<u64, ShaderNode>,
    connections: &[Connection],
) -> Result<Vec<u64>> {
    let mut indegree: BTreeMap<u64, usize> = nodes.keys().map(|&id| (id, 0)).collect();
    let mut downstream: BTreeMap<u64, Vec<u64>> = BTreeMap::new();
    let mut edges: HashSet<(u64, u64)> = HashSet::new();

    for c in connections {
        if !nodes.contains_key(&c.from.node_id) || !nodes.contains_key(&c.to.node_id) {
            continue;
        }
        if c.from.node_id == c.to.node_id {
            bail!("graph contains a cycle involving node {}", c.to.node_id);
        }
        if edges.insert((c.from.node_id, c.to.node_id)) {
            if let Some(d) = indegree.get_mut(&c.to.node_id) {
                *d += 1;
            }
            downstream
                .entry(c.from.node_id)
                .or_default()
                .push(c.to.node_id);
        }
    }

    let mut ready: BTreeSet<u64> = indegree
        .iter()
        .filter(|(_, &d)| d == 0)
        .map(|(&id, _)| id)
        .collect();
    let mut order = Vec::with_capacity(nodes.len());

    while let Some(&id) = ready.iter().next() {
        ready.remove(&id);
        order.push(id);
        for &next in downstream.get(&id).into_iter().flatten() {
            if let Some(d) = indegree.get_mut(&next) {
                *d -= 1;
                if *d == 0 {
                    ready.insert(next);
                }
            }
        }
    }

    if order.len() < nodes.len() {
        let stuck = indegree
            .iter()
            .find(|(_, &d)| d > 0)
            .map(|(&id, _)| id)
            .unwrap_or_default();
        bail!("graph contains a cycle involving node {stuck}");
    }
    Ok(order)
}

/// Resolve each node's dynamic slots to the largest vector dimension among
/// its wired dynamic inputs. Nodes with nothing wired keep the Vector4
/// default. Runs in dependency order so upstream types are already final.
fn resolve_dynamic_dimensions(
    nodes: &mut BTreeMap<u64, ShaderNode>,
    order: &[u64],
    connections: &[Connection],
) {
    for id in order {
        let mut inferred: Option<u8> = None;
        if let Some(node) = nodes.get(id) {
            for conn in connections.iter().filter(|c| c.to.node_id == *id) {
                let Some(slot) = node.slot(conn.to.slot_id) else {
                    warn!(
                        "node {id}: connection targets unknown slot {}",
                        conn.to.slot_id
                    );
                    continue;
                };
                if !slot.is_input() || slot.value_type() != SlotValueType::Dynamic {
                    continue;
                }
                let upstream_dimension = nodes
                    .get(&conn.from.node_id)
                    .and_then(|up| up.slot(conn.from.slot_id))
                    .and_then(|s| s.concrete_value_type().vector_dimension());
                if let Some(d) = upstream_dimension {
                    inferred = Some(inferred.map_or(d, |current| current.max(d)));
                }
            }
        }
        if let Some(d) = inferred {
            let concrete = ConcreteSlotValueType::vector_of(d);
            if let Some(node) = nodes.get_mut(id) {
                node.resolve_dynamic_slots(concrete);
                debug!("node {id}: dynamic slots resolved to {concrete:?}");
            }
        }
    }
}

/// Production value resolution: a wired connection wins, then the slot's
/// bound interpolator, then its default literal. Unwired resource inputs
/// fall back to a node-scoped uniform reference.
struct GraphValueSource<'a> {
    connections: &'a [Connection],
    nodes: &'a BTreeMap<u64, ShaderNode>,
    precision: Precision,
}

impl SlotValueSource for GraphValueSource<'_> {
    fn slot_value(&self, node: &ShaderNode, slot: &Slot, _mode: GenerationMode) -> String {
        if let Some(conn) = incoming_connection(self.connections, node.id(), slot.id) {
            if let Some(upstream) = self.nodes.get(&conn.from.node_id) {
                if let Some(out_slot) = upstream.slot(conn.from.slot_id) {
                    return upstream.variable_name(out_slot);
                }
            }
            warn!(
                "node {}: connection into slot {} references a missing source; using default",
                node.id(),
                slot.id
            );
        }
        if let Some(bound) = slot.kind.bound_variable() {
            return bound;
        }
        emitter::default_literal(slot, self.precision)
            .unwrap_or_else(|| node.variable_name(slot))
    }
}
