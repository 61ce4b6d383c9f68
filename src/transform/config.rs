//! Configuration for the transform pass

/// What the root rule does when a template has more than one top-level node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MultiRootPolicy {
    /// Render only the first top-level node
    #[default]
    FirstOnly,
    /// Return an array of every top-level node
    Array,
}

/// Configuration options for the transform rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOptions {
    /// Runtime function that builds a virtual node
    pub builder: String,

    /// Name of the generated render function
    pub render_function: String,

    pub multi_root: MultiRootPolicy,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            builder: "h".to_string(),
            render_function: "render".to_string(),
            multi_root: MultiRootPolicy::FirstOnly,
        }
    }
}

impl TransformOptions {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the builder function called for each element
    pub fn with_builder(mut self, builder: impl Into<String>) -> Self {
        self.builder = builder.into();
        self
    }

    /// Set the render function name
    pub fn with_render_function(mut self, name: impl Into<String>) -> Self {
        self.render_function = name.into();
        self
    }

    /// Set the multi-root policy
    pub fn with_multi_root(mut self, policy: MultiRootPolicy) -> Self {
        self.multi_root = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let options = TransformOptions::default();
        assert_eq!(options.builder, "h");
        assert_eq!(options.render_function, "render");
        assert_eq!(options.multi_root, MultiRootPolicy::FirstOnly);
    }

    #[test]
    fn test_builder_pattern() {
        let options = TransformOptions::new()
            .with_builder("createVNode")
            .with_render_function("renderApp")
            .with_multi_root(MultiRootPolicy::Array);

        assert_eq!(options.builder, "createVNode");
        assert_eq!(options.render_function, "renderApp");
        assert_eq!(options.multi_root, MultiRootPolicy::Array);
    }
}
