//! # Ingredient Parser
//!
//! This module turns one free-text ingredient requirement into a
//! [`ParsedIngredient`] (quantity, unit, name). It never fails: text without
//! a detectable quantity becomes one piece of the whole text.
//!
//! ## Rules
//!
//! Rules are tried in a fixed order and the first one that structurally
//! matches wins:
//!
//! 1. **Prefix**: `2 lbs chicken breast`, `1/2 cup sugar`, `2 Chicken Breasts`
//! 2. **Parenthetical**: `Chicken Breast (4 oz, sliced)`
//! 3. **Inline**: `Chicken Breast 4 oz cut`
//! 4. **Bare**: `Salt`
//!
//! Quantities may be integers, decimals, fractions (`1/2`), mixed numbers
//! (`2 1/4`), ranges (`2-3`, midpoint used) or vulgar fractions (`1½`).
//! A malformed quantity such as `1/0` counts as `1.0`.
//!
//! ## Usage
//!
//! ```rust
//! use pantry_reconcile::ingredient_parser::parse_ingredient;
//!
//! let parsed = parse_ingredient("2 lbs chicken breast");
//! assert_eq!(parsed.as_triple(), (2.0, "lb", "chicken breast"));
//!
//! let parsed = parse_ingredient("Salt");
//! assert_eq!(parsed.as_triple(), (1.0, "pcs", "Salt"));
//! ```

use crate::ingredient_model::{ParseRule, ParsedIngredient};
use crate::measurement_patterns::{
    vulgar_fraction_value, BULLET_REGEX, INLINE_REGEX, MIXED_REGEX, PARENTHETICAL_REGEX,
    PREFIX_REGEX, RANGE_REGEX, UNIT_WORDS_REGEX, VULGAR_REGEX,
};
use crate::unit_table::Unit;
use tracing::{debug, trace};

/// Quantity used when a quantity token cannot be read
pub const DEFAULT_QUANTITY: f64 = 1.0;

/// A parse rule: returns `Some` only when the text has the rule's shape
type RuleFn = fn(&str) -> Option<ParsedIngredient>;

/// Structural rules in precedence order; [`ParseRule::Bare`] is the fallback
const RULES: [(ParseRule, RuleFn); 3] = [
    (ParseRule::Prefix, parse_prefix),
    (ParseRule::Parenthetical, parse_parenthetical),
    (ParseRule::Inline, parse_inline),
];

/// Parse a single ingredient requirement
pub fn parse_ingredient(text: &str) -> ParsedIngredient {
    let text = text.trim();

    let parsed = RULES
        .iter()
        .find_map(|(rule, parse)| {
            let parsed = parse(text);
            if parsed.is_none() {
                trace!(rule = ?rule, text, "Rule did not match");
            }
            parsed
        })
        .unwrap_or_else(|| ParsedIngredient::bare(text));

    debug!(
        text,
        rule = ?parsed.rule,
        quantity = parsed.quantity,
        unit = %parsed.unit,
        name = %parsed.name,
        "Parsed ingredient"
    );
    parsed
}

/// Parse every non-blank line of an ingredient block, in order
///
/// Leading list markers (`-`, `*`, `•`, `1.`, `2)`) are removed first.
pub fn parse_ingredient_list(text: &str) -> Vec<ParsedIngredient> {
    text.lines()
        .map(|line| BULLET_REGEX.replace(line, ""))
        .filter(|line| !line.trim().is_empty())
        .map(|line| parse_ingredient(&line))
        .collect()
}

/// Rule 1: `<number> <unit-token> <rest>` at the start of the text
///
/// A first word that is not a known unit belongs to the name and the unit
/// defaults to pieces ("2 Chicken Breasts" is two pieces of "Chicken
/// Breasts"). A size note in parentheses right after the number is skipped
/// ("2 (14 oz) cans tomatoes"). A known unit with nothing after it does not
/// match.
pub fn parse_prefix(text: &str) -> Option<ParsedIngredient> {
    let captures = PREFIX_REGEX.captures(text.trim())?;
    let quantity = parse_quantity(&captures["qty"]);
    let rest = skip_size_note(captures.name("rest").map_or("", |m| m.as_str()).trim());
    if rest.is_empty() {
        return None;
    }

    match leading_unit(rest) {
        Some((unit, remainder)) => {
            let name = clean_name(remainder);
            if name.is_empty() {
                return None;
            }
            Some(ParsedIngredient::new(quantity, unit, name, ParseRule::Prefix))
        }
        None => {
            let name = clean_name(rest);
            if name.is_empty() {
                return None;
            }
            Some(ParsedIngredient::new(quantity, Unit::Pieces, name, ParseRule::Prefix))
        }
    }
}

/// Rule 2: `<name>(<number> <unit-token> ...)`
///
/// Anything after the unit inside the parenthesis (", sliced") is ignored.
pub fn parse_parenthetical(text: &str) -> Option<ParsedIngredient> {
    let captures = PARENTHETICAL_REGEX.captures(text.trim())?;
    let name = captures["name"].trim();
    if name.is_empty() {
        return None;
    }

    let quantity = parse_quantity(&captures["qty"]);
    let unit = captures
        .name("rest")
        .and_then(|rest| leading_unit(rest.as_str()))
        .map_or(Unit::Pieces, |(unit, _)| unit);

    Some(ParsedIngredient::new(
        quantity,
        unit,
        name,
        ParseRule::Parenthetical,
    ))
}

/// Rule 3: the first `<number> <unit-token>` anywhere in the text
///
/// The whole text stays the name.
pub fn parse_inline(text: &str) -> Option<ParsedIngredient> {
    let text = text.trim();
    let captures = INLINE_REGEX.captures(text)?;
    let quantity = parse_quantity(&captures["qty"]);
    let unit = captures
        .name("rest")
        .and_then(|rest| leading_unit(rest.as_str()))
        .map_or(Unit::Pieces, |(unit, _)| unit);

    Some(ParsedIngredient::new(
        quantity,
        unit,
        text,
        ParseRule::Inline,
    ))
}

/// Read a quantity token
///
/// Unreadable, infinite or negative values give [`DEFAULT_QUANTITY`].
pub fn parse_quantity(token: &str) -> f64 {
    let token = token.trim();

    let value = if let Some(captures) = RANGE_REGEX.captures(token) {
        let low = captures["low"].parse::<f64>().ok();
        let high = captures["high"].parse::<f64>().ok();
        low.zip(high).map(|(low, high)| (low + high) / 2.0)
    } else if let Some(captures) = MIXED_REGEX.captures(token) {
        let whole = captures["whole"].parse::<f64>().ok();
        whole.zip(parse_fraction(&captures["num"], &captures["den"]))
            .map(|(whole, fraction)| whole + fraction)
    } else if let Some(captures) = VULGAR_REGEX.captures(token) {
        let whole = match &captures["whole"] {
            "" => Some(0.0),
            digits => digits.parse::<f64>().ok(),
        };
        let fraction = captures["frac"].chars().next().and_then(vulgar_fraction_value);
        whole.zip(fraction).map(|(whole, fraction)| whole + fraction)
    } else if let Some((numerator, denominator)) = token.split_once('/') {
        parse_fraction(numerator, denominator)
    } else {
        token.parse::<f64>().ok()
    };

    match value {
        Some(amount) if amount.is_finite() && amount >= 0.0 => amount,
        _ => {
            debug!(token, "Malformed quantity, using default");
            DEFAULT_QUANTITY
        }
    }
}

fn parse_fraction(numerator: &str, denominator: &str) -> Option<f64> {
    let numerator = numerator.trim().parse::<f64>().ok()?;
    let denominator = denominator.trim().parse::<f64>().ok()?;
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator)
}

/// Longest known unit spelling (one to three words) at the start of `text`
///
/// Returns the unit and whatever follows it.
fn leading_unit(text: &str) -> Option<(Unit, &str)> {
    let captures = UNIT_WORDS_REGEX.captures(text)?;

    ["w3", "w2", "w1"]
        .iter()
        .filter_map(|group| captures.name(group))
        .find_map(|word| {
            let candidate = &text[..word.end()];
            Unit::lookup(candidate).map(|unit| (unit, &text[word.end()..]))
        })
}

/// Drop a package-size note such as "(14 oz)" directly after the count
fn skip_size_note(text: &str) -> &str {
    text.strip_prefix('(')
        .and_then(|inner| inner.split_once(')'))
        .map_or(text, |(_, after)| after.trim_start())
}

/// Strip leading separators and stray symbols ("%", "-", ",") from a name
fn clean_name(raw: &str) -> &str {
    raw.trim_start_matches(|c: char| !c.is_alphanumeric()).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_ingredient() {
        let result = parse_ingredient("2 cups flour");
        assert_eq!(result.as_triple(), (2.0, "cup", "flour"));
        assert_eq!(result.rule, ParseRule::Prefix);
    }

    #[test]
    fn test_parse_fraction_ingredient() {
        let result = parse_ingredient("1/2 cup sugar");
        assert_eq!(result.as_triple(), (0.5, "cup", "sugar"));

        let result = parse_ingredient("2 1/4 cups butter");
        assert_eq!(result.as_triple(), (2.25, "cup", "butter"));
    }

    #[test]
    fn test_parse_range_uses_midpoint() {
        let result = parse_ingredient("2-3 tbsp olive oil");
        assert_eq!(result.as_triple(), (2.5, "tbsp", "olive oil"));
    }

    #[test]
    fn test_unknown_first_word_belongs_to_name() {
        let result = parse_ingredient("2 Chicken Breasts");
        assert_eq!(result.as_triple(), (2.0, "pcs", "Chicken Breasts"));

        let result = parse_ingredient("3 eggs");
        assert_eq!(result.as_triple(), (3.0, "pcs", "eggs"));
    }

    #[test]
    fn test_multi_word_units() {
        let result = parse_ingredient("4 fl oz heavy cream");
        assert_eq!(result.as_triple(), (4.0, "fl oz", "heavy cream"));

        let result = parse_ingredient("2 cuillères à soupe huile d'olive");
        assert_eq!(result.as_triple(), (2.0, "tbsp", "huile d'olive"));
    }

    #[test]
    fn test_unit_glued_to_number() {
        let result = parse_ingredient("500g butter");
        assert_eq!(result.as_triple(), (500.0, "g", "butter"));
    }

    #[test]
    fn test_parse_quantity_forms() {
        assert_eq!(parse_quantity("2.5"), 2.5);
        assert_eq!(parse_quantity("1/4"), 0.25);
        assert_eq!(parse_quantity("1 1/2"), 1.5);
        assert_eq!(parse_quantity("2-3"), 2.5);
        assert_eq!(parse_quantity("¾"), 0.75);
        assert_eq!(parse_quantity("2½"), 2.5);
    }

    #[test]
    fn test_malformed_quantities_default_to_one() {
        assert_eq!(parse_quantity("1/0"), 1.0);
        assert_eq!(parse_quantity("1/2/3"), 1.0);
        assert_eq!(parse_quantity("1.2.3"), 1.0);
        assert_eq!(parse_quantity(""), 1.0);
    }

    #[test]
    fn test_unit_only_prefix_falls_through() {
        assert!(parse_prefix("2 lbs").is_none());
        let result = parse_ingredient("2 lbs");
        assert_eq!(result.as_triple(), (2.0, "lb", "2 lbs"));
        assert_eq!(result.rule, ParseRule::Inline);
    }

    #[test]
    fn test_parenthetical_without_unit() {
        let result = parse_parenthetical("Eggs (3)").unwrap();
        assert_eq!(result.as_triple(), (3.0, "pcs", "Eggs"));
    }

    #[test]
    fn test_parse_list_strips_markers() {
        let list = parse_ingredient_list("- 2 cups flour\n\n• 1 tbsp salt\n3) pepper\n");
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].as_triple(), (2.0, "cup", "flour"));
        assert_eq!(list[1].as_triple(), (1.0, "tbsp", "salt"));
        assert_eq!(list[2].as_triple(), (1.0, "pcs", "pepper"));
    }

    #[test]
    fn test_prefix_names_drop_leading_symbols() {
        assert_eq!(parse_ingredient("2% milk").as_triple(), (2.0, "pcs", "milk"));
        assert_eq!(
            parse_ingredient("2-inch piece ginger").as_triple(),
            (2.0, "pcs", "inch piece ginger")
        );
        assert_eq!(
            parse_ingredient("2 cups, sifted flour").as_triple(),
            (2.0, "cup", "sifted flour")
        );
    }

    #[test]
    fn test_size_note_after_count_is_skipped() {
        assert_eq!(
            parse_ingredient("2 (14 oz) cans tomatoes").as_triple(),
            (2.0, "can", "tomatoes")
        );
        assert_eq!(
            parse_ingredient("3 (large) eggs").as_triple(),
            (3.0, "pcs", "eggs")
        );
    }

    #[test]
    fn test_blank_input() {
        let result = parse_ingredient("   ");
        assert_eq!(result.as_triple(), (1.0, "pcs", ""));
        assert_eq!(result.rule, ParseRule::Bare);
    }
}
