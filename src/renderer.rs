//! Template renderer and rendering functionality for craft.
//! Wraps MiniJinja with configurable delimiters and multi-part composition.
use crate::error::{Error, Result};
use cruet::Inflector;
use minijinja::syntax::SyntaxConfig;
use minijinja::{Environment, UndefinedBehavior};

/// Variable delimiters used in a template.
///
/// Block and comment delimiters are derived from them: the first character
/// of `start` followed by `%` (or `#`), and `%` (or `#`) followed by the last
/// character of `end`. The default `{{ }}` pair therefore yields the usual
/// `{% %}` and `{# #}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    pub start: String,
    pub end: String,
}

impl Delimiters {
    pub fn new<S: Into<String>>(start: S, end: S) -> Self {
        Self { start: start.into(), end: end.into() }
    }

    /// `<< >>`, for files whose own syntax already uses braces
    /// (GitHub workflows, Helm templates).
    pub fn chevron() -> Self {
        Self::new("<<", ">>")
    }

    fn syntax(&self) -> Result<SyntaxConfig> {
        let open = self.start.chars().next().ok_or_else(|| {
            Error::TemplateError("start delimiter must not be empty".to_string())
        })?;
        let close = self
            .end
            .chars()
            .last()
            .ok_or_else(|| Error::TemplateError("end delimiter must not be empty".to_string()))?;

        SyntaxConfig::builder()
            .variable_delimiters(self.start.clone(), self.end.clone())
            .block_delimiters(format!("{open}%"), format!("%{close}"))
            .comment_delimiters(format!("{open}#"), format!("#{close}"))
            .build()
            .map_err(Error::MinijinjaError)
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self::new("{{", "}}")
    }
}

/// A named template source.
#[derive(Debug, Clone)]
pub struct Part {
    pub name: String,
    pub source: String,
}

/// Trait for template rendering engines.
pub trait TemplateRenderer: Send + Sync {
    /// Renders a template string with the given context.
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        let part = Part { name: "template".to_string(), source: template.to_string() };
        self.render_parts(std::slice::from_ref(&part), &Delimiters::default(), context)
    }

    /// Renders the first part, the others being available to it by name
    /// (e.g. through `include`).
    fn render_parts(
        &self,
        parts: &[Part],
        delimiters: &Delimiters,
        context: &serde_json::Value,
    ) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
#[derive(Debug, Default)]
pub struct MiniJinjaRenderer;

impl MiniJinjaRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// # Errors
    /// * `Error::TemplateError` if no part is given or delimiters are empty
    /// * `Error::MinijinjaError` if a part fails to parse or render
    fn render_parts(
        &self,
        parts: &[Part],
        delimiters: &Delimiters,
        context: &serde_json::Value,
    ) -> Result<String> {
        let primary = parts
            .first()
            .ok_or_else(|| Error::TemplateError("no template to render".to_string()))?;

        let mut env = Environment::new();
        env.set_syntax(delimiters.syntax()?);
        env.set_keep_trailing_newline(true);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_undefined_behavior(UndefinedBehavior::Chainable);
        env.add_filter("kebabcase", |value: String| value.to_kebab_case());
        env.add_filter("snakecase", |value: String| value.to_snake_case());
        env.add_filter("pascalcase", |value: String| value.to_pascal_case());

        for part in parts {
            env.add_template(&part.name, &part.source)?;
        }

        let tmpl = env.get_template(&primary.name)?;
        tmpl.render(context).map_err(Error::MinijinjaError)
    }
}
