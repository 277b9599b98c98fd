//! Registry of the effects a plugin bundle exposes

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::definition::{EffectDefinition, TileEffectRuntime};
use crate::params::Parameter;

/// Effects by type, plus a category index in registration order
#[derive(Default)]
pub struct PluginRegistry {
    effects: HashMap<String, Arc<dyn EffectDefinition>>,
    categories: HashMap<String, Vec<String>>,
    category_order: Vec<String>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an effect definition
    ///
    /// Registering a type twice replaces the earlier definition.
    pub fn register(&mut self, definition: impl EffectDefinition + 'static) {
        let effect_type = definition.effect_type().to_string();
        let category = definition.category().to_string();

        if let Some(previous) = self.effects.get(&effect_type) {
            let old_category = previous.category().to_string();
            if let Some(types) = self.categories.get_mut(&old_category) {
                types.retain(|t| t != &effect_type);
            }
        }

        let types = self.categories.entry(category.clone()).or_insert_with(|| {
            self.category_order.push(category.clone());
            Vec::new()
        });
        types.push(effect_type.clone());

        debug!(effect_type = %effect_type, category = %category, "Registered effect");
        self.effects.insert(effect_type, Arc::new(definition));
    }

    /// Get an effect definition by type
    pub fn get(&self, effect_type: &str) -> Option<Arc<dyn EffectDefinition>> {
        self.effects.get(effect_type).cloned()
    }

    pub fn contains(&self, effect_type: &str) -> bool {
        self.effects.contains_key(effect_type)
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Category names in registration order
    pub fn categories(&self) -> &[String] {
        &self.category_order
    }

    /// Effect types in a category, in registration order
    pub fn effects_in_category(&self, category: &str) -> Option<&[String]> {
        self.categories.get(category).map(|v| v.as_slice())
    }

    pub fn default_parameters(&self, effect_type: &str) -> Option<Vec<Parameter>> {
        self.get(effect_type).map(|def| def.default_parameters())
    }

    /// Create a GPU runtime for an effect
    pub fn create_gpu_runtime(
        &self,
        effect_type: &str,
        device: &wgpu::Device,
        output_format: wgpu::TextureFormat,
    ) -> Option<Box<dyn TileEffectRuntime>> {
        self.get(effect_type)
            .and_then(|def| def.create_gpu_runtime(device, output_format))
    }

    /// Case-insensitive match on type, display name or category
    pub fn search(&self, query: &str) -> Vec<Arc<dyn EffectDefinition>> {
        let query = query.to_lowercase();
        let mut results: Vec<_> = self
            .effects
            .values()
            .filter(|def| {
                def.display_name().to_lowercase().contains(&query)
                    || def.effect_type().to_lowercase().contains(&query)
                    || def.category().to_lowercase().contains(&query)
            })
            .cloned()
            .collect();
        results.sort_by_key(|def| def.effect_type());
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::{ControlBinding, FxMaskDefinition};

    struct MockEffect {
        effect_type: &'static str,
        display_name: &'static str,
        category: &'static str,
    }

    impl EffectDefinition for MockEffect {
        fn effect_type(&self) -> &'static str {
            self.effect_type
        }

        fn display_name(&self) -> &'static str {
            self.display_name
        }

        fn category(&self) -> &'static str {
            self.category
        }

        fn default_parameters(&self) -> Vec<Parameter> {
            vec![]
        }

        fn control_bindings(&self) -> Vec<ControlBinding> {
            vec![]
        }

        fn create_gpu_runtime(
            &self,
            _device: &wgpu::Device,
            _output_format: wgpu::TextureFormat,
        ) -> Option<Box<dyn TileEffectRuntime>> {
            None
        }
    }

    fn mock(effect_type: &'static str, display_name: &'static str, category: &'static str) -> MockEffect {
        MockEffect {
            effect_type,
            display_name,
            category,
        }
    }

    #[test]
    fn test_registry_new() {
        let registry = PluginRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_registry_register() {
        let mut registry = PluginRegistry::new();
        registry.register(FxMaskDefinition::default());

        assert_eq!(registry.len(), 1);
        assert!(registry.contains(FxMaskDefinition::EFFECT_TYPE));
        assert_eq!(
            registry.default_parameters(FxMaskDefinition::EFFECT_TYPE).map(|p| p.len()),
            Some(6)
        );
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_registry_categories() {
        let mut registry = PluginRegistry::new();
        registry.register(mock("rect_mask", "Rectangle Mask", "Mask"));
        registry.register(mock("ellipse_mask", "Ellipse Mask", "Mask"));
        registry.register(mock("brightness", "Brightness", "Color"));

        assert_eq!(registry.categories(), &["Mask".to_string(), "Color".to_string()]);
        assert_eq!(registry.effects_in_category("Mask").unwrap().len(), 2);
        assert_eq!(registry.effects_in_category("Color").unwrap().len(), 1);
        assert!(registry.effects_in_category("Blur").is_none());
    }

    #[test]
    fn test_reregister_replaces() {
        let mut registry = PluginRegistry::new();
        registry.register(mock("rect_mask", "Rectangle Mask", "Mask"));
        registry.register(mock("rect_mask", "Rect", "Mask"));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.effects_in_category("Mask").unwrap(), &["rect_mask".to_string()]);
        assert_eq!(registry.get("rect_mask").unwrap().display_name(), "Rect");
    }

    #[test]
    fn test_registry_search() {
        let mut registry = PluginRegistry::new();
        registry.register(mock("rect_mask", "Rectangle Mask", "Mask"));
        registry.register(mock("ellipse_mask", "Ellipse Mask", "Mask"));
        registry.register(mock("brightness", "Brightness", "Color"));

        assert_eq!(registry.search("MASK").len(), 2);
        let results = registry.search("bright");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].effect_type(), "brightness");
    }
}
