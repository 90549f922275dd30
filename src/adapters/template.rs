use crate::domain::ports::{CapabilityError, TemplateRenderer};
use minijinja::{Environment, UndefinedBehavior};
use serde_json::Value;

/// Jinja-compatible renderer. Undefined variables render empty and chain
/// through attribute access, so a template renders against `{}`.
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Chainable);
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, template: &str, context: &Value) -> Result<String, CapabilityError> {
        self.env
            .render_str(template, context)
            .map_err(|e| CapabilityError(e.to_string()))
    }
}
