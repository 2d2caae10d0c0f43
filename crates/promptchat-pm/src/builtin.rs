//! Built-in templates for the car article assistant.
//!
//! The system template fixes the assistant's specialty and target reading
//! time; the user template states which engine type the article covers.

use crate::{
    chat::ChatPrompt, error::Result, message::Role, template::PromptTemplate,
    values::PromptValues,
};

/// System-role template.
pub const SYSTEM_TEMPLATE: &str = "Eres una IA especializada en coches de tipo {tipo_coches} \
                                   y generar articulos que se leen en {tiempo_lectura}.";

/// User-role template.
pub const USER_TEMPLATE: &str =
    "Necesito un articulo para vehiculos con motor {peticion_tipo_motor}";

/// Declares the system and user templates as one chat prompt.
///
/// # Errors
///
/// Only fails if the constant templates are malformed.
///
/// # Examples
///
/// ```
/// use promptchat_pm::{builtin, PromptEngine};
///
/// let prompt = builtin::car_article_prompt()?;
/// assert_eq!(
///     prompt.input_variables(),
///     ["tipo_coches", "tiempo_lectura", "peticion_tipo_motor"]
/// );
/// # Ok::<(), promptchat_pm::PromptError>(())
/// ```
pub fn car_article_prompt() -> Result<ChatPrompt> {
    Ok(ChatPrompt::from_messages(vec![
        PromptTemplate::declare(Role::System, SYSTEM_TEMPLATE)?,
        PromptTemplate::declare(Role::User, USER_TEMPLATE)?,
    ]))
}

/// Values used when the caller supplies none.
pub fn default_values() -> PromptValues {
    PromptValues::new()
        .with("peticion_tipo_motor", "Hibrido enchufable")
        .with("tiempo_lectura", "10 min")
        .with("tipo_coches", "japoneses")
}
