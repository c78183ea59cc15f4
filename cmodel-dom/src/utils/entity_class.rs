//! The entity class-name micro format.
//!
//! Entity wrappers carry their metadata as class tokens:
//!
//! ```text
//! classes  := token (WS token)*
//! token    := "_Entity" | "_EId_" id | "_EType_" type | "_EReadonly_" ("0" | "1") | other
//! ```
//!
//! Unknown tokens are preserved by the caller; this module only reads and writes the tokens it
//! owns. A later `_EId_`/`_EType_` token wins over an earlier one.

pub const ENTITY_INFO_NAME: &str = "_Entity";
pub const ENTITY_ID_PREFIX: &str = "_EId_";
pub const ENTITY_TYPE_PREFIX: &str = "_EType_";
pub const ENTITY_READONLY_PREFIX: &str = "_EReadonly_";

/// One class token, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityToken<'a> {
    Marker,
    Id(&'a str),
    Type(&'a str),
    Readonly(bool),
    Other(&'a str),
}

impl<'a> EntityToken<'a> {
    pub fn parse(token: &'a str) -> Self {
        if token == ENTITY_INFO_NAME {
            EntityToken::Marker
        } else if let Some(id) = token.strip_prefix(ENTITY_ID_PREFIX) {
            EntityToken::Id(id)
        } else if let Some(entity_type) = token.strip_prefix(ENTITY_TYPE_PREFIX) {
            EntityToken::Type(entity_type)
        } else if let Some(flag) = token.strip_prefix(ENTITY_READONLY_PREFIX) {
            match flag {
                "1" => EntityToken::Readonly(true),
                "0" => EntityToken::Readonly(false),
                _ => EntityToken::Other(token),
            }
        } else {
            EntityToken::Other(token)
        }
    }

    /// Whether this token is owned by the entity micro format.
    pub fn is_entity_token(&self) -> bool {
        !matches!(self, EntityToken::Other(_))
    }
}

/// Entity metadata decoded from a class attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityClassInfo {
    pub is_entity: bool,
    pub id: Option<String>,
    pub entity_type: Option<String>,
    pub is_readonly: Option<bool>,
}

/// Decode the entity tokens of a class attribute value.
pub fn parse_entity_class<'a>(classes: impl IntoIterator<Item = &'a str>) -> EntityClassInfo {
    let mut info = EntityClassInfo::default();
    for token in classes {
        match EntityToken::parse(token) {
            EntityToken::Marker => info.is_entity = true,
            EntityToken::Id(id) => info.id = Some(id.to_string()),
            EntityToken::Type(entity_type) => info.entity_type = Some(entity_type.to_string()),
            EntityToken::Readonly(readonly) => info.is_readonly = Some(readonly),
            EntityToken::Other(_) => {}
        }
    }
    info
}

/// Encode entity metadata as class tokens, marker first.
pub fn generate_entity_class_names(
    id: Option<&str>,
    entity_type: Option<&str>,
    is_readonly: bool,
) -> Vec<String> {
    let mut tokens = vec![ENTITY_INFO_NAME.to_string()];
    if let Some(entity_type) = entity_type.filter(|t| !t.is_empty()) {
        tokens.push(format!("{ENTITY_TYPE_PREFIX}{entity_type}"));
    }
    if let Some(id) = id.filter(|id| !id.is_empty()) {
        tokens.push(format!("{ENTITY_ID_PREFIX}{id}"));
    }
    tokens.push(format!(
        "{ENTITY_READONLY_PREFIX}{}",
        if is_readonly { "1" } else { "0" }
    ));
    tokens
}

/// Replace the entity tokens of `existing` with freshly generated ones, keeping other classes.
pub fn merge_entity_class_names(existing: &str, generated: &[String]) -> String {
    let mut tokens: Vec<&str> = existing
        .split_whitespace()
        .filter(|token| !EntityToken::parse(token).is_entity_token())
        .collect();
    tokens.extend(generated.iter().map(String::as_str));
    tokens.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokens() {
        let info = parse_entity_class("_Entity _EId_A _EType_B _EReadonly_1".split_whitespace());
        assert_eq!(
            info,
            EntityClassInfo {
                is_entity: true,
                id: Some("A".to_string()),
                entity_type: Some("B".to_string()),
                is_readonly: Some(true),
            }
        );
    }

    #[test]
    fn test_unknown_readonly_flag_is_other() {
        assert_eq!(
            EntityToken::parse("_EReadonly_yes"),
            EntityToken::Other("_EReadonly_yes")
        );
    }

    #[test]
    fn test_generate_and_merge() {
        let generated = generate_entity_class_names(Some("A"), Some("B"), false);
        assert_eq!(generated, ["_Entity", "_EType_B", "_EId_A", "_EReadonly_0"]);
        assert_eq!(
            merge_entity_class_names("widget _EId_old _Entity", &generated),
            "widget _Entity _EType_B _EId_A _EReadonly_0"
        );
    }
}
