//! Role-bound prompt templates with named placeholders.
//!
//! Two placeholder syntaxes are supported:
//!
//! - [`TemplateFormat::FString`] (default): `{name}`, with `{{` and `}}`
//!   standing for literal braces.
//! - [`TemplateFormat::Jinja2`]: `{{ name }}` and the rest of the minijinja
//!   language. Every variable the template references is required, including
//!   ones only tested with `is defined`.
//!
//! Templates are validated when declared, so malformed syntax surfaces before
//! any values are supplied.

use crate::{
    engine::PromptEngine,
    error::{PromptError, Result},
    message::{Conversation, Message, Role},
    values::PromptValues,
};
use tracing::debug;

/// Placeholder syntax of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemplateFormat {
    /// `{name}` placeholders.
    #[default]
    FString,
    /// minijinja `{{ name }}` expressions.
    Jinja2,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// An immutable template bound to a conversational role.
///
/// # Examples
///
/// ```
/// use promptchat_pm::{PromptTemplate, PromptValues, Role};
///
/// let tmpl = PromptTemplate::declare(
///     Role::User,
///     "Necesito un articulo para vehiculos con motor {peticion_tipo_motor}",
/// )?;
/// assert_eq!(tmpl.input_variables(), ["peticion_tipo_motor"]);
///
/// let values = PromptValues::new().with("peticion_tipo_motor", "Hibrido enchufable");
/// let msg = tmpl.format(&values)?;
/// assert_eq!(
///     msg.content(),
///     "Necesito un articulo para vehiculos con motor Hibrido enchufable"
/// );
/// # Ok::<(), promptchat_pm::PromptError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    role: Role,
    source: String,
    format: TemplateFormat,
    variables: Vec<String>,
    segments: Vec<Segment>,
}

impl PromptTemplate {
    /// Declares a `{name}` template for `role`.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::EmptyTemplate`] for an empty source, or
    /// [`PromptError::MalformedTemplate`] for unbalanced delimiters and
    /// invalid placeholder names.
    pub fn declare(role: Role, source: impl Into<String>) -> Result<Self> {
        Self::declare_with_format(role, source, TemplateFormat::FString)
    }

    /// Declares a template for `role` using the given placeholder syntax.
    ///
    /// Jinja2 variables are collected from the whole template, so a guard such
    /// as `{% if x is defined %}` still makes `x` a required value.
    ///
    /// # Errors
    ///
    /// Same as [`PromptTemplate::declare`]; for Jinja2 templates any syntax
    /// error reported by the engine is a [`PromptError::MalformedTemplate`].
    pub fn declare_with_format(
        role: Role,
        source: impl Into<String>,
        format: TemplateFormat,
    ) -> Result<Self> {
        let source = source.into();
        if source.is_empty() {
            return Err(PromptError::EmptyTemplate(role));
        }

        let (segments, variables) = match format {
            TemplateFormat::FString => {
                let segments = parse_fstring(&source)?;
                let variables = placeholder_names(&segments);
                (segments, variables)
            }
            TemplateFormat::Jinja2 => (Vec::new(), jinja_variables(&source)?),
        };

        debug!(%role, ?variables, "declared prompt template");

        Ok(Self {
            role,
            source,
            format,
            variables,
            segments,
        })
    }

    /// Role of the message this template produces.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Raw template source.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Names of the placeholders this template requires.
    ///
    /// `{name}` templates list names in order of first appearance; Jinja2
    /// templates list them sorted by name.
    pub fn input_variables(&self) -> &[String] {
        &self.variables
    }

    /// Substitutes every placeholder and returns the resulting message.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::MissingValue`] naming the first required
    /// placeholder absent from `values`.
    pub fn format(&self, values: &PromptValues) -> Result<Message> {
        if let Some(name) = self.variables.iter().find(|name| !values.contains(name)) {
            return Err(PromptError::MissingValue {
                name: name.clone(),
                role: self.role,
            });
        }

        let content = match self.format {
            TemplateFormat::FString => {
                let mut out = String::with_capacity(self.source.len());
                for segment in &self.segments {
                    match segment {
                        Segment::Literal(text) => out.push_str(text),
                        Segment::Placeholder(name) => {
                            // presence checked above
                            out.push_str(values.get(name).unwrap_or_default());
                        }
                    }
                }
                out
            }
            TemplateFormat::Jinja2 => jinja_env()
                .render_str(&self.source, values)
                .map_err(|e| PromptError::TemplateRenderError(format!("{}: {e}", self.role)))?,
        };

        Ok(Message::new(self.role, content))
    }
}

impl PromptEngine for PromptTemplate {
    fn input_variables(&self) -> &[String] {
        PromptTemplate::input_variables(self)
    }

    fn format_messages(&self, values: &PromptValues) -> Result<Conversation> {
        Ok(Conversation::new(vec![self.format(values)?]))
    }
}

fn parse_fstring(source: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = source.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '{' => {
                if chars.next_if(|&(_, next)| next == '{').is_some() {
                    literal.push('{');
                    continue;
                }

                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((inner, '{')) => {
                            return Err(PromptError::malformed(
                                inner,
                                "'{' inside placeholder",
                            ));
                        }
                        Some((_, ch)) => name.push(ch),
                        None => return Err(PromptError::malformed(pos, "unclosed '{'")),
                    }
                }

                if name.is_empty() {
                    return Err(PromptError::malformed(pos, "empty placeholder '{}'"));
                }
                if !is_identifier(&name) {
                    return Err(PromptError::malformed(
                        pos,
                        format!("invalid placeholder name '{name}'"),
                    ));
                }

                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Placeholder(name));
            }
            '}' => {
                if chars.next_if(|&(_, next)| next == '}').is_some() {
                    literal.push('}');
                    continue;
                }
                return Err(PromptError::malformed(pos, "single '}' encountered"));
            }
            _ => literal.push(c),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

fn placeholder_names(segments: &[Segment]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for segment in segments {
        if let Segment::Placeholder(name) = segment
            && !names.contains(name)
        {
            names.push(name.clone());
        }
    }
    names
}

fn jinja_env() -> minijinja::Environment<'static> {
    let mut env = minijinja::Environment::new();
    env.set_undefined_behavior(minijinja::UndefinedBehavior::Strict);
    env
}

fn jinja_variables(source: &str) -> Result<Vec<String>> {
    let env = jinja_env();
    let tmpl = env.template_from_str(source).map_err(|e| {
        let position = e.range().map(|r| r.start).unwrap_or_default();
        PromptError::malformed(position, e.to_string())
    })?;

    let mut names: Vec<String> = tmpl.undeclared_variables(false).into_iter().collect();
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYSTEM: &str = "Eres una IA especializada en coches de tipo {tipo_coches} \
                          y generar articulos que se leen en {tiempo_lectura}.";

    #[test]
    fn test_declare_extracts_variables_in_order() {
        let tmpl = PromptTemplate::declare(Role::System, SYSTEM).unwrap();
        assert_eq!(tmpl.input_variables(), ["tipo_coches", "tiempo_lectura"]);
        assert_eq!(tmpl.role(), Role::System);
    }

    #[test]
    fn test_declare_deduplicates_variables() {
        let tmpl = PromptTemplate::declare(Role::User, "{a} {b} {a}").unwrap();
        assert_eq!(tmpl.input_variables(), ["a", "b"]);
    }

    #[test]
    fn test_declare_without_placeholders() {
        let tmpl = PromptTemplate::declare(Role::System, "Be concise.").unwrap();
        assert!(tmpl.input_variables().is_empty());
        let msg = tmpl.format(&PromptValues::new()).unwrap();
        assert_eq!(msg.content(), "Be concise.");
    }

    #[test]
    fn test_declare_empty_fails() {
        let err = PromptTemplate::declare(Role::User, "").unwrap_err();
        assert_eq!(err, PromptError::EmptyTemplate(Role::User));
    }

    #[test]
    fn test_declare_unclosed_brace_fails() {
        let err = PromptTemplate::declare(Role::User, "hola {nombre").unwrap_err();
        match err {
            PromptError::MalformedTemplate { position, .. } => assert_eq!(position, 5),
            other => panic!("expected MalformedTemplate, got {other:?}"),
        }
    }

    #[test]
    fn test_declare_single_closing_brace_fails() {
        let err = PromptTemplate::declare(Role::User, "hola } adios").unwrap_err();
        match err {
            PromptError::MalformedTemplate { position, reason } => {
                assert_eq!(position, 5);
                assert!(reason.contains("single '}'"));
            }
            other => panic!("expected MalformedTemplate, got {other:?}"),
        }
    }

    #[test]
    fn test_declare_empty_placeholder_fails() {
        assert!(matches!(
            PromptTemplate::declare(Role::User, "x {} y"),
            Err(PromptError::MalformedTemplate { .. })
        ));
    }

    #[test]
    fn test_declare_nested_brace_fails() {
        assert!(matches!(
            PromptTemplate::declare(Role::User, "{a{b}}"),
            Err(PromptError::MalformedTemplate { position: 2, .. })
        ));
    }

    #[test]
    fn test_declare_invalid_name_fails() {
        for source in ["{1abc}", "{a b}", "{a.b}", "{a:>10}"] {
            assert!(
                matches!(
                    PromptTemplate::declare(Role::User, source),
                    Err(PromptError::MalformedTemplate { .. })
                ),
                "{source} should be rejected"
            );
        }
    }

    #[test]
    fn test_escaped_braces_are_literal() {
        let tmpl = PromptTemplate::declare(Role::User, "{{literal}} {value}").unwrap();
        assert_eq!(tmpl.input_variables(), ["value"]);
        let msg = tmpl.format(&PromptValues::new().with("value", "x")).unwrap();
        assert_eq!(msg.content(), "{literal} x");
    }

    #[test]
    fn test_format_system_scenario() {
        let tmpl = PromptTemplate::declare(Role::System, SYSTEM).unwrap();
        let values = PromptValues::new()
            .with("tipo_coches", "japoneses")
            .with("tiempo_lectura", "10 min");
        let msg = tmpl.format(&values).unwrap();
        assert_eq!(
            msg.content(),
            "Eres una IA especializada en coches de tipo japoneses y generar articulos que se leen en 10 min."
        );
        assert_eq!(msg.role(), Role::System);
    }

    #[test]
    fn test_format_missing_value_names_placeholder() {
        let tmpl = PromptTemplate::declare(Role::System, SYSTEM).unwrap();
        let values = PromptValues::new().with("tipo_coches", "japoneses");
        let err = tmpl.format(&values).unwrap_err();
        assert_eq!(
            err,
            PromptError::MissingValue {
                name: "tiempo_lectura".to_string(),
                role: Role::System,
            }
        );
    }

    #[test]
    fn test_format_value_is_not_reinterpreted() {
        let tmpl = PromptTemplate::declare(Role::User, "{a}").unwrap();
        let msg = tmpl
            .format(&PromptValues::new().with("a", "{b}").with("b", "nope"))
            .unwrap();
        assert_eq!(msg.content(), "{b}");
    }

    #[test]
    fn test_format_unicode_literals() {
        let tmpl = PromptTemplate::declare(Role::User, "¿Qué tal {nombre}? 🚗").unwrap();
        let msg = tmpl.format(&PromptValues::new().with("nombre", "Ana")).unwrap();
        assert_eq!(msg.content(), "¿Qué tal Ana? 🚗");
    }

    #[test]
    fn test_jinja_template() {
        let tmpl = PromptTemplate::declare_with_format(
            Role::User,
            "Motor {{ motor }} para {{ lector }}",
            TemplateFormat::Jinja2,
        )
        .unwrap();
        assert_eq!(tmpl.input_variables(), ["lector", "motor"]);
        let msg = tmpl
            .format(&PromptValues::new().with("motor", "diesel").with("lector", "Ana"))
            .unwrap();
        assert_eq!(msg.content(), "Motor diesel para Ana");
    }

    #[test]
    fn test_jinja_syntax_error_fails_at_declaration() {
        let result = PromptTemplate::declare_with_format(
            Role::User,
            "Motor {{ motor ",
            TemplateFormat::Jinja2,
        );
        assert!(matches!(result, Err(PromptError::MalformedTemplate { .. })));
    }

    #[test]
    fn test_jinja_missing_value() {
        let tmpl =
            PromptTemplate::declare_with_format(Role::User, "{{ motor }}", TemplateFormat::Jinja2)
                .unwrap();
        assert!(matches!(
            tmpl.format(&PromptValues::new()),
            Err(PromptError::MissingValue { ref name, .. }) if name == "motor"
        ));
    }

    #[test]
    fn test_jinja_is_defined_guard_still_requires_value() {
        let tmpl = PromptTemplate::declare_with_format(
            Role::System,
            "{% if lector is defined %}Para {{ lector }}{% endif %}",
            TemplateFormat::Jinja2,
        )
        .unwrap();
        assert_eq!(tmpl.input_variables(), ["lector"]);
        assert!(matches!(
            tmpl.format(&PromptValues::new()),
            Err(PromptError::MissingValue { ref name, role: Role::System }) if name == "lector"
        ));
        let msg = tmpl.format(&PromptValues::new().with("lector", "Ana")).unwrap();
        assert_eq!(msg.content(), "Para Ana");
    }
}
