#[cfg(test)]
mod tests {
    use pantry_reconcile::config::MatchConfig;
    use pantry_reconcile::deduction::{
        apply_deduction, reconcile_and_deduct, reconcile_and_deduct_with_config, summarize,
    };
    use pantry_reconcile::deduction_errors::DeductionError;
    use pantry_reconcile::ingredient_model::{InventoryRecord, RequirementOutcome};
    use pantry_reconcile::ingredient_parser::parse_ingredient;

    #[test]
    fn test_exact_unit_deduction() {
        let mut inventory = vec![InventoryRecord::new("Chicken Breast", 2.0, "lb")];

        let outcomes = reconcile_and_deduct(&["2 lbs Chicken Breast"], &mut inventory, 1).unwrap();

        let deduction = outcomes[0].deduction().unwrap();
        assert_eq!(deduction.applied_amount, 2.0);
        assert!(!deduction.used_fallback);
        assert_eq!(deduction.resulting_quantity, 0.0);
        assert_eq!(inventory[0].quantity, 0.0);
    }

    #[test]
    fn test_cross_family_uses_fallback() {
        let mut inventory = vec![InventoryRecord::new("Rice", 1.0, "kg")];

        let outcomes = reconcile_and_deduct(&["1 cup rice"], &mut inventory, 2).unwrap();

        let deduction = outcomes[0].deduction().unwrap();
        assert_eq!(deduction.applied_amount, 2.0);
        assert!(deduction.used_fallback);
        assert_eq!(deduction.resulting_quantity, 0.0);
        assert_eq!(inventory[0].quantity, 0.0);
    }

    #[test]
    fn test_conversion_scales_by_servings() {
        let mut inventory = vec![InventoryRecord::new("Flour", 2.0, "kg")];

        let outcomes = reconcile_and_deduct(&["250 g flour"], &mut inventory, 3).unwrap();

        let deduction = outcomes[0].deduction().unwrap();
        assert!((deduction.applied_amount - 0.75).abs() < 1e-9);
        assert!(!deduction.used_fallback);
        assert!((inventory[0].quantity - 1.25).abs() < 1e-9);
    }

    #[test]
    fn test_quantity_never_goes_negative() {
        let mut inventory = vec![
            InventoryRecord::new("Rice", 1.0, "kg"),
            InventoryRecord::new("Eggs", 2.0, "pcs"),
        ];
        let requirements = ["10 kg rice", "12 eggs", "3 eggs"];

        let outcomes = reconcile_and_deduct(&requirements, &mut inventory, 4).unwrap();

        assert_eq!(outcomes.len(), 3);
        for record in &inventory {
            assert_eq!(record.quantity, 0.0, "{}", record);
        }
    }

    #[test]
    fn test_fallback_trigger() {
        let parsed = parse_ingredient("2 cloves garlic");
        let mut record = InventoryRecord::new("Garlic", 100.0, "g");

        let outcome = apply_deduction(&mut record, &parsed, 3);

        assert!(outcome.used_fallback);
        assert_eq!(outcome.applied_amount, 3.0);
        assert_eq!(record.quantity, 97.0);
    }

    #[test]
    fn test_unknown_record_unit_uses_fallback() {
        let mut inventory = vec![InventoryRecord::new("Spinach", 5.0, "handful")];

        let outcomes = reconcile_and_deduct(&["200 g spinach"], &mut inventory, 1).unwrap();

        assert!(outcomes[0].deduction().unwrap().used_fallback);
        assert_eq!(inventory[0].quantity, 4.0);
    }

    #[test]
    fn test_unmatched_requirement_is_skipped() {
        let mut inventory = vec![InventoryRecord::new("Rice", 1.0, "kg")];

        let outcomes = reconcile_and_deduct(&["2 tsp saffron"], &mut inventory, 1).unwrap();

        assert!(outcomes[0].is_skipped());
        assert_eq!(outcomes[0].requirement(), "2 tsp saffron");
        assert_eq!(outcomes[0].parsed().name, "saffron");
        assert_eq!(inventory[0].quantity, 1.0);
    }

    #[test]
    fn test_empty_inputs() {
        let mut inventory: Vec<InventoryRecord> = Vec::new();
        let outcomes = reconcile_and_deduct(&["1 cup rice"], &mut inventory, 1).unwrap();
        assert!(outcomes[0].is_skipped());

        let mut inventory = vec![InventoryRecord::new("Rice", 1.0, "kg")];
        let none: [&str; 0] = [];
        let outcomes = reconcile_and_deduct(&none, &mut inventory, 1).unwrap();
        assert!(outcomes.is_empty());
        assert_eq!(inventory[0].quantity, 1.0);
    }

    #[test]
    fn test_later_requirements_see_earlier_deductions() {
        let mut inventory = vec![InventoryRecord::new("Rice", 1.0, "kg")];

        let outcomes =
            reconcile_and_deduct(&["500 g rice", "300 g rice"], &mut inventory, 1).unwrap();

        let first = outcomes[0].deduction().unwrap();
        let second = outcomes[1].deduction().unwrap();
        assert!((first.resulting_quantity - 0.5).abs() < 1e-9);
        assert!((second.resulting_quantity - 0.2).abs() < 1e-9);
        assert!((inventory[0].quantity - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_one_record_per_requirement() {
        let mut inventory = vec![
            InventoryRecord::new("Chicken Breast", 4.0, "lb"),
            InventoryRecord::new("Chicken Thighs", 4.0, "lb"),
        ];

        reconcile_and_deduct(&["1 lb chicken breast"], &mut inventory, 1).unwrap();

        assert_eq!(inventory[0].quantity, 3.0);
        assert_eq!(inventory[1].quantity, 4.0);
    }

    #[test]
    fn test_outcome_records_match_details() {
        let mut inventory = vec![InventoryRecord::new("Organic Bananas", 6.0, "pcs")];

        let outcomes = reconcile_and_deduct(&["2 bananas"], &mut inventory, 1).unwrap();

        match &outcomes[0] {
            RequirementOutcome::Deducted {
                record_name,
                score,
                outcome,
                ..
            } => {
                assert_eq!(record_name, "Organic Bananas");
                assert!(*score >= 0.45);
                assert_eq!(outcome.applied_amount, 2.0);
                assert!(!outcome.used_fallback);
            }
            other => panic!("expected a deduction, got {:?}", other),
        }
        assert_eq!(inventory[0].quantity, 4.0);
    }

    #[test]
    fn test_zero_servings_rejected_without_mutation() {
        let mut inventory = vec![InventoryRecord::new("Rice", 1.0, "kg")];

        let result = reconcile_and_deduct(&["1 cup rice"], &mut inventory, 0);

        assert_eq!(result, Err(DeductionError::InvalidServings(0)));
        assert_eq!(inventory[0].quantity, 1.0);
    }

    #[test]
    fn test_invalid_record_rejects_whole_call() {
        let mut inventory = vec![
            InventoryRecord::new("Rice", 1.0, "kg"),
            InventoryRecord::new("Flour", -2.0, "kg"),
        ];

        let result = reconcile_and_deduct(&["1 kg rice"], &mut inventory, 1);

        assert!(matches!(
            result,
            Err(DeductionError::InvalidInventoryQuantity { ref name, .. }) if name == "Flour"
        ));
        assert_eq!(inventory[0].quantity, 1.0);
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let mut inventory = vec![InventoryRecord::new("Rice", 1.0, "kg")];
        let config = MatchConfig {
            min_score: 1.5,
            ..Default::default()
        };

        let result = reconcile_and_deduct_with_config(&["1 kg rice"], &mut inventory, 1, &config);

        assert!(matches!(result, Err(DeductionError::InvalidThreshold { .. })));
        assert_eq!(inventory[0].quantity, 1.0);
    }

    #[test]
    fn test_strict_threshold_skips_partial_names() {
        let mut inventory = vec![InventoryRecord::new("Basmati Rice", 1.0, "kg")];
        let config = MatchConfig {
            min_score: 1.0,
            ..Default::default()
        };

        let outcomes =
            reconcile_and_deduct_with_config(&["500 g rice"], &mut inventory, 1, &config).unwrap();

        assert!(outcomes[0].is_skipped());
        assert_eq!(inventory[0].quantity, 1.0);
    }

    fn name_match_with_threshold(token_threshold: f64) -> bool {
        let mut inventory = vec![InventoryRecord::new("Bananas", 6.0, "pcs")];
        let config = MatchConfig {
            token_threshold,
            ..Default::default()
        };

        let outcomes =
            reconcile_and_deduct_with_config(&["2 banana"], &mut inventory, 1, &config).unwrap();

        assert_eq!(inventory[0].quantity, 4.0);
        match &outcomes[0] {
            RequirementOutcome::Deducted { name_match, .. } => *name_match,
            other => panic!("expected a deduction, got {:?}", other),
        }
    }

    #[test]
    fn test_token_threshold_controls_name_match_flag() {
        assert!(name_match_with_threshold(0.45));
        assert!(!name_match_with_threshold(1.0));
    }

    #[test]
    fn test_shared_word_always_sets_name_match() {
        let mut inventory = vec![InventoryRecord::new("Basmati Rice", 1.0, "kg")];
        let config = MatchConfig {
            token_threshold: 1.0,
            ..Default::default()
        };

        let outcomes =
            reconcile_and_deduct_with_config(&["100 g rice"], &mut inventory, 1, &config).unwrap();

        assert!(matches!(
            outcomes[0],
            RequirementOutcome::Deducted { name_match: true, .. }
        ));
    }

    #[test]
    fn test_summary_counts() {
        let mut inventory = vec![
            InventoryRecord::new("Rice", 1.0, "kg"),
            InventoryRecord::new("Milk", 1.0, "l"),
        ];
        let requirements = ["1 cup rice", "250 ml milk", "saffron"];

        let outcomes = reconcile_and_deduct(&requirements, &mut inventory, 1).unwrap();
        let summary = summarize(&outcomes);

        assert_eq!(summary.converted, 1);
        assert_eq!(summary.fallback, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.total(), 3);
    }
}
