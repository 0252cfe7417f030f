//! Node-kind registry: the ahead-of-time descriptor table.

use std::collections::HashMap;

use log::debug;

use crate::descriptor::FunctionDescriptor;
use crate::nodes;

/// Constructor for a node kind's entry-point descriptor.
pub type DescriptorFn = fn() -> FunctionDescriptor;

/// Maps kind names onto descriptor constructors. Populated explicitly at
/// startup; the graph pipeline consults it when instantiating nodes.
#[derive(Default)]
pub struct NodeKindRegistry {
    kinds: HashMap<String, DescriptorFn>,
}

impl NodeKindRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the built-in node set.
    pub fn with_builtin_nodes() -> Self {
        let mut registry = Self::new();
        registry.register("Add", nodes::math::add);
        registry.register("Subtract", nodes::math::subtract);
        registry.register("Multiply", nodes::math::multiply);
        registry.register("Divide", nodes::math::divide);
        registry.register("Power", nodes::math::power);
        registry.register("Lerp", nodes::math::lerp);
        registry.register("Remap", nodes::math::remap);
        registry.register("Normalize", nodes::vector::normalize);
        registry.register("DotProduct", nodes::vector::dot_product);
        registry.register("CrossProduct", nodes::vector::cross_product);
        registry.register("TransformDirection", nodes::vector::transform_direction);
        registry.register("SampleTexture2D", nodes::texture::sample_texture2d);
        registry.register("SampleGradient", nodes::texture::sample_gradient);
        registry.register("Fresnel", nodes::geometry::fresnel);
        registry.register("RotateUV", nodes::uv::rotate_uv);
        registry.register("TilingAndOffset", nodes::uv::tiling_and_offset);
        registry.register("Dither", nodes::surface::dither);
        registry.register("VertexColorTint", nodes::surface::vertex_color_tint);
        registry.register("BlendSoftLight", nodes::surface::blend_soft_light);
        registry
    }

    /// Register a kind. The last registration for a name wins.
    pub fn register(&mut self, kind: impl Into<String>, descriptor: DescriptorFn) {
        let kind = kind.into();
        if self.kinds.insert(kind.clone(), descriptor).is_some() {
            debug!("node kind `{kind}` re-registered");
        }
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.kinds.contains_key(kind)
    }

    /// Build a fresh descriptor for the kind.
    pub fn descriptor(&self, kind: &str) -> Option<FunctionDescriptor> {
        self.kinds.get(kind).map(|constructor| constructor())
    }

    /// Registered kind names, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.kinds.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_kinds_are_registered() {
        let registry = NodeKindRegistry::with_builtin_nodes();
        for kind in ["Divide", "Fresnel", "SampleTexture2D", "Dither"] {
            assert!(registry.contains(kind), "missing builtin {kind}");
        }
        assert!(!registry.contains("NoSuchNode"));
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = NodeKindRegistry::new();
        registry.register("Divide", crate::nodes::math::divide);
        registry.register("Divide", crate::nodes::math::multiply);
        let descriptor = registry.descriptor("Divide").unwrap();
        assert_eq!(descriptor.name(), "Multiply");
    }
}
