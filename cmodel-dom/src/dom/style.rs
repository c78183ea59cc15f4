//! Inline style declarations
//!
//! A small CSSOM stand-in for `element.style`: the `style` attribute is tokenized with `cssparser`
//! into an ordered declaration list, keeping each value's source text. Reading a longhand
//! (`margin-top`, `border-left-color`, ...) resolves through whichever shorthand declared it last,
//! and writing a longhand first expands any shorthand that covers it, so reads after writes always
//! agree.

use cssparser::{Delimiter, ParseError, Parser, ParserInput, Token};

const SIDES: [&str; 4] = ["top", "right", "bottom", "left"];
const CORNERS: [&str; 4] = ["top-left", "top-right", "bottom-right", "bottom-left"];
const BORDER_PARTS: [&str; 3] = ["width", "style", "color"];
const BORDER_STYLES: [&str; 10] = [
    "none", "hidden", "dotted", "dashed", "solid", "double", "groove", "ridge", "inset", "outset",
];

/// Ordered list of `property: value` pairs from a `style` attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleDeclaration {
    declarations: Vec<(String, String)>,
}

impl StyleDeclaration {
    /// Parse `style` attribute text. Malformed declarations are skipped.
    pub fn parse(css: &str) -> Self {
        let mut style = StyleDeclaration::default();
        let mut input = ParserInput::new(css);
        let mut parser = Parser::new(&mut input);

        while !parser.is_exhausted() {
            let declaration: Result<(String, String), ParseError<()>> = parser
                .parse_until_after(Delimiter::Semicolon, |input| {
                    let name = input.expect_ident()?.to_ascii_lowercase();
                    input.expect_colon()?;
                    let start = input.position();
                    while input.next().is_ok() {}
                    Ok((name, input.slice_from(start).trim().to_string()))
                });
            if let Ok((name, value)) = declaration {
                if value.is_empty() {
                    continue;
                }
                style.declarations.retain(|(existing, _)| *existing != name);
                style.declarations.push((name, value));
            }
        }
        style
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Serialize back to `style` attribute text.
    pub fn to_css(&self) -> String {
        self.declarations
            .iter()
            .map(|(name, value)| format!("{name}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Value of `property`, resolving longhands through shorthands.
    pub fn get(&self, property: &str) -> Option<String> {
        let property = property.to_ascii_lowercase();

        if let Some(side) = property
            .strip_prefix("border-")
            .filter(|side| SIDES.contains(side))
        {
            let parts: Vec<String> = BORDER_PARTS
                .iter()
                .filter_map(|part| self.get(&format!("border-{side}-{part}")))
                .collect();
            return if parts.is_empty() {
                None
            } else {
                Some(parts.join(" "))
            };
        }

        for (name, value) in self.declarations.iter().rev() {
            if *name == property {
                return Some(value.clone());
            }
            if let Some(component) = longhand_component(name, value, &property) {
                return Some(component);
            }
        }
        None
    }

    /// Set `property`. An empty value removes it.
    pub fn set(&mut self, property: &str, value: &str) {
        let property = property.to_ascii_lowercase();
        let value = value.trim();

        for shorthand in covering_shorthands(&property) {
            self.expand(&shorthand);
        }
        for longhand in all_longhands(&property) {
            self.declarations.retain(|(name, _)| *name != longhand);
        }

        if value.is_empty() {
            self.declarations.retain(|(name, _)| *name != property);
        } else if let Some(slot) = self
            .declarations
            .iter_mut()
            .find(|(name, _)| *name == property)
        {
            slot.1 = value.to_string();
        } else {
            self.declarations.push((property, value.to_string()));
        }
    }

    /// Replace a shorthand declaration by its longhands, in place.
    fn expand(&mut self, shorthand: &str) {
        let Some(position) = self
            .declarations
            .iter()
            .position(|(name, _)| name == shorthand)
        else {
            return;
        };

        let value = self.declarations[position].1.clone();
        if shorthand == "background" && split_tokens(&value).len() != 1 {
            // Images and positions have no longhand here; the new longhand simply wins by order.
            return;
        }

        let replacements: Vec<(String, String)> = direct_longhands(shorthand)
            .into_iter()
            .filter_map(|longhand| {
                longhand_component(shorthand, &value, &longhand).map(|v| (longhand, v))
            })
            .collect();

        self.declarations.remove(position);
        for (offset, declaration) in replacements.into_iter().enumerate() {
            self.declarations.retain(|(name, _)| *name != declaration.0);
            let at = (position + offset).min(self.declarations.len());
            self.declarations.insert(at, declaration);
        }
    }
}

/// Component of `property` contributed by the declaration `shorthand: value`, if it covers it.
fn longhand_component(shorthand: &str, value: &str, property: &str) -> Option<String> {
    match shorthand {
        "margin" | "padding" => {
            let side = property.strip_prefix(shorthand)?.strip_prefix('-')?;
            box_component(value, side_index(side)?)
        }
        "border" => {
            let rest = property.strip_prefix("border-")?;
            if SIDES.contains(&rest) {
                return Some(value.to_string());
            }
            let (side, part) = rest.split_once('-')?;
            side_index(side)?;
            border_token(value, part)
        }
        "border-radius" => {
            let corner = property.strip_prefix("border-")?.strip_suffix("-radius")?;
            let index = CORNERS.iter().position(|c| *c == corner)?;
            let horizontal = value.split('/').next().unwrap_or(value);
            box_component(horizontal, index)
        }
        "background" => {
            if property != "background-color" {
                return None;
            }
            let tokens = split_tokens(value);
            match tokens.as_slice() {
                [only] if !only.starts_with("url(") => Some(only.clone()),
                _ => None,
            }
        }
        _ => {
            let rest = shorthand.strip_prefix("border-")?;
            if SIDES.contains(&rest) {
                let part = property.strip_prefix(shorthand)?.strip_prefix('-')?;
                return border_token(value, part);
            }
            if BORDER_PARTS.contains(&rest) {
                let (side, part) = property.strip_prefix("border-")?.split_once('-')?;
                if part != rest {
                    return None;
                }
                return box_component(value, side_index(side)?);
            }
            None
        }
    }
}

/// Shorthands whose declarations may hold a component of `property`, outermost first.
fn covering_shorthands(property: &str) -> Vec<String> {
    let mut result = Vec::new();
    for prefix in ["margin", "padding"] {
        if let Some(side) = property
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix('-'))
        {
            if side_index(side).is_some() {
                result.push(prefix.to_string());
            }
        }
    }

    if property == "background-color" {
        result.push("background".to_string());
    }

    if let Some(rest) = property.strip_prefix("border-") {
        if let Some(corner) = rest.strip_suffix("-radius") {
            if CORNERS.contains(&corner) {
                result.push("border-radius".to_string());
            }
        } else if SIDES.contains(&rest) || BORDER_PARTS.contains(&rest) {
            result.push("border".to_string());
        } else if let Some((side, part)) = rest.split_once('-') {
            if side_index(side).is_some() && BORDER_PARTS.contains(&part) {
                result.push("border".to_string());
                result.push(format!("border-{side}"));
                result.push(format!("border-{part}"));
            }
        }
    }
    result
}

fn direct_longhands(shorthand: &str) -> Vec<String> {
    match shorthand {
        "margin" | "padding" => SIDES.iter().map(|s| format!("{shorthand}-{s}")).collect(),
        "border" => SIDES.iter().map(|s| format!("border-{s}")).collect(),
        "border-radius" => CORNERS.iter().map(|c| format!("border-{c}-radius")).collect(),
        "background" => vec!["background-color".to_string()],
        _ => match shorthand.strip_prefix("border-") {
            Some(side) if SIDES.contains(&side) => BORDER_PARTS
                .iter()
                .map(|p| format!("border-{side}-{p}"))
                .collect(),
            Some(part) if BORDER_PARTS.contains(&part) => SIDES
                .iter()
                .map(|s| format!("border-{s}-{part}"))
                .collect(),
            _ => Vec::new(),
        },
    }
}

/// Every longhand a shorthand overwrites, transitively.
fn all_longhands(shorthand: &str) -> Vec<String> {
    let mut result = Vec::new();
    for longhand in direct_longhands(shorthand) {
        result.extend(all_longhands(&longhand));
        result.push(longhand);
    }
    if shorthand == "border" {
        result.extend(BORDER_PARTS.iter().map(|p| format!("border-{p}")));
    }
    result
}

fn side_index(side: &str) -> Option<usize> {
    SIDES.iter().position(|s| *s == side)
}

/// Pick the value for box position `index` (top/right/bottom/left) out of a 1-4 value list.
fn box_component(value: &str, index: usize) -> Option<String> {
    let parts = split_tokens(value);
    let pick = match parts.len() {
        1 => 0,
        2 => [0, 1, 0, 1][index],
        3 => [0, 1, 2, 1][index],
        4 => index,
        _ => return None,
    };
    parts.get(pick).cloned()
}

fn border_token(value: &str, part: &str) -> Option<String> {
    let tokens = split_tokens(value);
    match part {
        "width" => tokens.into_iter().find(|t| is_border_width(t)),
        "style" => tokens.into_iter().find(|t| BORDER_STYLES.contains(&t.as_str())),
        "color" => tokens
            .into_iter()
            .find(|t| !is_border_width(t) && !BORDER_STYLES.contains(&t.as_str())),
        _ => None,
    }
}

fn is_border_width(token: &str) -> bool {
    matches!(token, "thin" | "medium" | "thick")
        || token
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit() || c == '.')
}

/// Component values of a property value, as source text (`rgb(1, 2, 3)` stays one component).
pub(crate) fn split_tokens(value: &str) -> Vec<String> {
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    let mut tokens = Vec::new();

    loop {
        parser.skip_whitespace();
        let start = parser.position();
        let opens_block = match parser.next() {
            Ok(token) => matches!(
                token,
                Token::Function(_)
                    | Token::ParenthesisBlock
                    | Token::SquareBracketBlock
                    | Token::CurlyBracketBlock
            ),
            Err(_) => break,
        };
        if opens_block {
            let _: Result<(), ParseError<()>> = parser.parse_nested_block(|block| {
                while block.next().is_ok() {}
                Ok(())
            });
        }
        tokens.push(parser.slice_from(start).trim().to_string());
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_serialize() {
        let style = StyleDeclaration::parse("color: red; margin-top:1px;;bad");
        assert_eq!(style.to_css(), "color: red; margin-top: 1px;");
    }

    #[test]
    fn test_margin_shorthand_read() {
        let style = StyleDeclaration::parse("margin: 1px 2px 3px");
        assert_eq!(style.get("margin-top").as_deref(), Some("1px"));
        assert_eq!(style.get("margin-right").as_deref(), Some("2px"));
        assert_eq!(style.get("margin-bottom").as_deref(), Some("3px"));
        assert_eq!(style.get("margin-left").as_deref(), Some("2px"));
    }

    #[test]
    fn test_later_longhand_wins() {
        let style = StyleDeclaration::parse("margin: 1px; margin-left: 5px");
        assert_eq!(style.get("margin-left").as_deref(), Some("5px"));
        assert_eq!(style.get("margin-top").as_deref(), Some("1px"));
    }

    #[test]
    fn test_set_longhand_expands_shorthand() {
        let mut style = StyleDeclaration::parse("margin: 1px");
        style.set("margin-top", "");
        assert_eq!(style.get("margin-top"), None);
        assert_eq!(style.get("margin-left").as_deref(), Some("1px"));
    }

    #[test]
    fn test_border_side_composition() {
        let style = StyleDeclaration::parse("border: 1px solid rgb(0, 0, 0)");
        assert_eq!(style.get("border-top").as_deref(), Some("1px solid rgb(0, 0, 0)"));
        assert_eq!(style.get("border-left-color").as_deref(), Some("rgb(0, 0, 0)"));

        let style = StyleDeclaration::parse("border-top-width: 2px; border-top-style: dashed");
        assert_eq!(style.get("border-top").as_deref(), Some("2px dashed"));

        let style = StyleDeclaration::parse("border: none");
        assert_eq!(style.get("border-right").as_deref(), Some("none"));
    }

    #[test]
    fn test_border_radius_corners() {
        let style = StyleDeclaration::parse("border-radius: 1px 2px");
        assert_eq!(style.get("border-top-left-radius").as_deref(), Some("1px"));
        assert_eq!(style.get("border-top-right-radius").as_deref(), Some("2px"));
        assert_eq!(style.get("border-bottom-right-radius").as_deref(), Some("1px"));
    }

    #[test]
    fn test_setting_shorthand_clears_longhands() {
        let mut style = StyleDeclaration::parse("border-top-width: 2px");
        style.set("border", "1px solid red");
        assert_eq!(style.get("border-top").as_deref(), Some("1px solid red"));
    }

    #[test]
    fn test_background_color_from_background() {
        let style = StyleDeclaration::parse("background: #fff");
        assert_eq!(style.get("background-color").as_deref(), Some("#fff"));
        let style = StyleDeclaration::parse("background: url(a.png) no-repeat");
        assert_eq!(style.get("background-color"), None);
    }

    #[test]
    fn test_components_keep_functions_whole() {
        assert_eq!(
            split_tokens("1px solid rgb(0, 0, 0)"),
            ["1px", "solid", "rgb(0, 0, 0)"]
        );
        assert_eq!(
            split_tokens("  var(--a, calc(1px + 2px))  none "),
            ["var(--a, calc(1px + 2px))", "none"]
        );
        assert!(split_tokens("").is_empty());
    }

    #[test]
    fn test_declaration_values_keep_source_text() {
        let style = StyleDeclaration::parse("COLOR: #336699; color: var(--darkColor_red, red)");
        assert_eq!(style.get("color").as_deref(), Some("var(--darkColor_red, red)"));
        let style = StyleDeclaration::parse("margin-left: 15pt; :bad; 7: x; width: ");
        assert_eq!(style.to_css(), "margin-left: 15pt;");
    }

    #[test]
    fn test_semicolon_inside_quotes() {
        let style = StyleDeclaration::parse("font-family: \"a;b\", serif; color: blue");
        assert_eq!(style.get("font-family").as_deref(), Some("\"a;b\", serif"));
        assert_eq!(style.get("color").as_deref(), Some("blue"));
    }
}
