// File: src/messages.rs
// Purpose: Error message catalog with placeholder templating

use serde::Deserialize;
use std::collections::HashMap;

/// Every kind of validation failure the rule engine can report.
///
/// Deserializes from the snake_case key names used in catalog overrides
/// (`is_required`, `min_length`, ...), so a full or partial catalog can be
/// loaded straight from JSON or TOML configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKey {
    IsRequired,
    IsTypeMoney,
    IsTypeCheckbox,
    IsTypeRadio,
    IsTypeFile,
    MinLength,
    MaxLength,
    Min,
    Max,
    FieldsNotMatch,
    InvalidEmail,
    InvalidPhone,
    InvalidDate,
    InvalidUrl,
    CustomValidation,
}

/// Mapping from failure kind to a user-facing template string.
///
/// Templates may carry `{placeholder}` tokens (`{minLength}`, `{maxLength}`,
/// `{min}`, `{max}`) that are substituted at validation time. Built-in
/// defaults are Spanish; callers can override the catalog in full or per key.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    templates: HashMap<MessageKey, String>,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        let defaults = [
            (MessageKey::IsRequired, "Este campo es requerido"),
            (MessageKey::IsTypeMoney, "El formato de dinero no es válido"),
            (MessageKey::IsTypeCheckbox, "Debe marcar la casilla"),
            (MessageKey::IsTypeRadio, "Debe seleccionar una opción"),
            (MessageKey::IsTypeFile, "Debe seleccionar un archivo"),
            (
                MessageKey::MinLength,
                "Debe contener al menos {minLength} caracteres",
            ),
            (
                MessageKey::MaxLength,
                "Debe contener máximo {maxLength} caracteres",
            ),
            (MessageKey::Min, "El valor mínimo es {min}"),
            (MessageKey::Max, "El valor máximo es {max}"),
            (MessageKey::FieldsNotMatch, "Los campos no coinciden"),
            (MessageKey::InvalidEmail, "El correo electrónico no es válido"),
            (MessageKey::InvalidPhone, "El teléfono no es válido"),
            (MessageKey::InvalidDate, "La fecha no es válida"),
            (MessageKey::InvalidUrl, "La URL no es válida"),
            (MessageKey::CustomValidation, "El valor no es válido"),
        ];
        Self {
            templates: defaults
                .into_iter()
                .map(|(key, template)| (key, template.to_string()))
                .collect(),
        }
    }
}

impl MessageCatalog {
    /// Built-in defaults with the given keys replaced
    pub fn with_overrides(overrides: HashMap<MessageKey, String>) -> Self {
        let mut catalog = Self::default();
        catalog.templates.extend(overrides);
        catalog
    }

    /// Raw template for one failure kind
    pub fn template(&self, key: MessageKey) -> &str {
        // Every key has a default, so the lookup cannot miss
        self.templates
            .get(&key)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Template with `{placeholder}` tokens substituted
    pub fn render(&self, key: MessageKey, substitutions: &[(&str, String)]) -> String {
        let mut message = self.template(key).to_string();
        for (placeholder, value) in substitutions {
            message = message.replace(&format!("{{{placeholder}}}"), value);
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_placeholders() {
        let catalog = MessageCatalog::default();
        assert_eq!(
            catalog.render(MessageKey::MinLength, &[("minLength", "8".to_string())]),
            "Debe contener al menos 8 caracteres"
        );
    }

    #[test]
    fn render_without_placeholders_is_verbatim() {
        let catalog = MessageCatalog::default();
        assert_eq!(
            catalog.render(MessageKey::FieldsNotMatch, &[]),
            "Los campos no coinciden"
        );
    }

    #[test]
    fn overrides_replace_only_named_keys() {
        let mut overrides = HashMap::new();
        overrides.insert(MessageKey::IsRequired, "Required field".to_string());
        let catalog = MessageCatalog::with_overrides(overrides);
        assert_eq!(catalog.template(MessageKey::IsRequired), "Required field");
        assert_eq!(
            catalog.template(MessageKey::InvalidEmail),
            "El correo electrónico no es válido"
        );
    }

    #[test]
    fn keys_deserialize_from_snake_case_names() {
        let overrides: HashMap<MessageKey, String> = serde_json::from_str(
            r#"{"is_required": "Requerido", "fields_not_match": "No coinciden"}"#,
        )
        .unwrap();
        let catalog = MessageCatalog::with_overrides(overrides);
        assert_eq!(catalog.template(MessageKey::IsRequired), "Requerido");
        assert_eq!(catalog.template(MessageKey::FieldsNotMatch), "No coinciden");
    }
}
