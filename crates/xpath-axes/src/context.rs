use std::collections::HashMap;

pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// How an output buffer arranges the nodes it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BufferOrdering {
    /// Keep the buffer sorted by [`NodeCursor::compare_position`](crate::NodeCursor::compare_position).
    /// Falls back to `Insertion` as soon as two nodes cannot be ordered.
    #[default]
    Document,
    /// Keep nodes in the order the axis walk discovered them.
    Insertion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalOptions {
    /// Reposition the ancestor-walking cursor with `move_to` instead of cloning
    /// a fresh one for every context node. Results are identical either way.
    pub reuse_cursor: bool,
    pub ordering: BufferOrdering,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self { reuse_cursor: true, ordering: BufferOrdering::Document }
    }
}

#[derive(Debug, Clone)]
pub struct NamespaceBindings {
    pub by_prefix: HashMap<String, String>,
}

impl Default for NamespaceBindings {
    fn default() -> Self {
        let mut by_prefix = HashMap::new();
        by_prefix.insert("xml".to_string(), XML_NS.to_string());
        Self { by_prefix }
    }
}

impl NamespaceBindings {
    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.by_prefix.get(prefix).map(String::as_str)
    }
}

/// Per-evaluation settings shared by every stage of a pipeline.
#[derive(Debug, Clone, Default)]
pub struct EvalContext {
    pub options: EvalOptions,
    pub namespaces: NamespaceBindings,
}

impl EvalContext {
    pub fn builder() -> EvalContextBuilder {
        EvalContextBuilder::new()
    }
}

#[derive(Debug, Default)]
pub struct EvalContextBuilder {
    ctx: EvalContext,
}

impl EvalContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_namespace(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        self.ctx.namespaces.by_prefix.insert(prefix.into(), uri.into());
        self
    }

    pub fn with_options(mut self, options: EvalOptions) -> Self {
        self.ctx.options = options;
        self
    }

    pub fn with_cursor_reuse(mut self, enabled: bool) -> Self {
        self.ctx.options.reuse_cursor = enabled;
        self
    }

    pub fn with_ordering(mut self, ordering: BufferOrdering) -> Self {
        self.ctx.options.ordering = ordering;
        self
    }

    pub fn build(self) -> EvalContext {
        self.ctx
    }
}
