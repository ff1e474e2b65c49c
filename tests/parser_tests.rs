#[cfg(test)]
mod tests {
    use pantry_reconcile::ingredient_model::ParseRule;
    use pantry_reconcile::ingredient_parser::{
        parse_inline, parse_ingredient, parse_ingredient_list, parse_parenthetical, parse_prefix,
    };

    #[test]
    fn test_prefix_rule() {
        let parsed = parse_ingredient("2 lbs chicken breast");
        assert_eq!(parsed.as_triple(), (2.0, "lb", "chicken breast"));
        assert_eq!(parsed.rule, ParseRule::Prefix);

        let parsed = parse_ingredient("1.5 kg rice");
        assert_eq!(parsed.as_triple(), (1.5, "kg", "rice"));

        let parsed = parse_ingredient("1/2 cup sugar");
        assert_eq!(parsed.as_triple(), (0.5, "cup", "sugar"));
    }

    #[test]
    fn test_parenthetical_rule() {
        let parsed = parse_ingredient("Chicken Breast (4 oz, sliced)");
        assert_eq!(parsed.quantity, 4.0);
        assert_eq!(parsed.unit.canonical_key(), "oz");
        assert!(parsed.name.to_lowercase().contains("chicken breast"));
        assert_eq!(parsed.rule, ParseRule::Parenthetical);
    }

    #[test]
    fn test_inline_rule() {
        let parsed = parse_ingredient("Chicken Breast 4 oz cut");
        assert_eq!(parsed.as_triple(), (4.0, "oz", "Chicken Breast 4 oz cut"));
        assert_eq!(parsed.rule, ParseRule::Inline);
    }

    #[test]
    fn test_bare_fallback() {
        let parsed = parse_ingredient("Salt");
        assert_eq!(parsed.as_triple(), (1.0, "pcs", "Salt"));
        assert_eq!(parsed.rule, ParseRule::Bare);

        let parsed = parse_ingredient("  freshly ground black pepper ");
        assert_eq!(parsed.as_triple(), (1.0, "pcs", "freshly ground black pepper"));
    }

    #[test]
    fn test_rules_are_independent_functions() {
        assert!(parse_prefix("Salt").is_none());
        assert!(parse_parenthetical("2 cups flour").is_none());
        assert!(parse_inline("Salt and pepper").is_none());

        let parsed = parse_prefix("3 cloves garlic").unwrap();
        assert_eq!(parsed.as_triple(), (3.0, "clove", "garlic"));
    }

    #[test]
    fn test_prefix_wins_over_later_rules() {
        let parsed = parse_ingredient("2 cups flour (sifted 1 time)");
        assert_eq!(parsed.rule, ParseRule::Prefix);
        assert_eq!(parsed.unit.canonical_key(), "cup");
    }

    #[test]
    fn test_malformed_quantity_defaults_to_one() {
        let parsed = parse_ingredient("1/0 cup milk");
        assert_eq!(parsed.as_triple(), (1.0, "cup", "milk"));
    }

    #[test]
    fn test_quantity_is_never_negative() {
        for text in ["-2 cups flour", "Flour -3 kg", "0 g salt", "2.5.1 kg rice"] {
            let parsed = parse_ingredient(text);
            assert!(
                parsed.quantity.is_finite() && parsed.quantity >= 0.0,
                "'{}' parsed to {}",
                text,
                parsed.quantity
            );
        }
    }

    #[test]
    fn test_unicode_fractions() {
        let parsed = parse_ingredient("1½ cups milk");
        assert_eq!(parsed.as_triple(), (1.5, "cup", "milk"));

        let parsed = parse_ingredient("¼ tsp salt");
        assert_eq!(parsed.as_triple(), (0.25, "tsp", "salt"));
    }

    #[test]
    fn test_parse_ingredient_list() {
        let text = "Ingredients:\n1. 2 cups flour\n2. 3 eggs\n\n* Salt\n";
        let parsed = parse_ingredient_list(text);

        assert_eq!(parsed.len(), 4);
        assert_eq!(parsed[0].as_triple(), (1.0, "pcs", "Ingredients:"));
        assert_eq!(parsed[1].as_triple(), (2.0, "cup", "flour"));
        assert_eq!(parsed[2].as_triple(), (3.0, "pcs", "eggs"));
        assert_eq!(parsed[3].as_triple(), (1.0, "pcs", "Salt"));
    }
}
