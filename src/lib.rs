//! Node-to-shader-source compiler.
//!
//! Takes a typed, descriptor-described graph of computation nodes and emits
//! shading-language source: one function definition per entry point plus a
//! call-site statement block, with correct parameter typing, coordinate-space
//! dependency propagation, and deterministic naming.
//!
//! This crate is organized into several modules:
//! - `types`: precision, generation mode, and slot value types
//! - `error`: the closed authoring-fault taxonomy
//! - `slot`: slot model, bindings, and capability queries
//! - `descriptor`: entry-point descriptors and signature introspection
//! - `factory`: slot materialization from parameter specs
//! - `node`: slot ownership, derivation, and requirement aggregation
//! - `emitter`: call-site and function-definition generation
//! - `registry`: the node-kind descriptor table
//! - `nodes`: built-in node descriptors
//! - `graph`: graph documents and the whole-graph pipeline
//!
//! The main entry points are:
//! - `graph::compile_graph`: compile a whole graph document
//! - `emitter::generate_node_code` / `emitter::generate_node_function`:
//!   drive emission for a single node

pub mod descriptor;
pub mod emitter;
pub mod error;
pub mod factory;
pub mod graph;
pub mod node;
pub mod nodes;
pub mod registry;
pub mod slot;
pub mod types;

pub use descriptor::{FunctionDescriptor, Parameter, SlotAnnotation};
pub use emitter::{
    generate_node_code, generate_node_function, ShaderChunkBuffer, SlotValueSource,
};
pub use error::DefinitionError;
pub use graph::{
    compile_graph, load_graph_from_path, parse_graph, CompiledGraph, GraphDoc, NodeFailure,
};
pub use node::ShaderNode;
pub use registry::NodeKindRegistry;
pub use slot::{
    Binding, CoordinateSpace, Slot, SlotDirection, SlotKind, SpaceMask, UvChannel,
};
pub use types::{ConcreteSlotValueType, GenerationMode, Precision, SlotValueType};
