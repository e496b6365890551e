//! Tests for tile references and rule set validation

#[cfg(test)]
mod tests {
    use tilecollapse::AlgorithmError;
    use tilecollapse::catalog::rules::{NeighborRule, RuleSet, TileRef, TileRule};
    use tilecollapse::catalog::symmetry::Symmetry;
    use tilecollapse::spatial::tiles::PixelBlock;

    fn tile(name: &str, size: usize, weight: f64) -> TileRule {
        TileRule {
            name: name.to_string(),
            symmetry: Symmetry::X,
            weight,
            pixels: PixelBlock::filled(size, [1, 2, 3, 255]),
        }
    }

    fn pair(left: &str, right: &str) -> NeighborRule {
        NeighborRule {
            left: TileRef::parse(left).unwrap(),
            right: TileRef::parse(right).unwrap(),
        }
    }

    // Tests references with and without an explicit rotation
    // Verified by defaulting the rotation to one
    #[test]
    fn test_tile_ref_parse() {
        assert_eq!(
            TileRef::parse("corner 3").unwrap(),
            TileRef {
                name: "corner".to_string(),
                rotation: 3
            }
        );
        assert_eq!(TileRef::parse("  grass ").unwrap().rotation, 0);
    }

    // Tests malformed references are rejected
    // Verified by ignoring tokens after the rotation
    #[test]
    fn test_tile_ref_parse_errors() {
        for text in ["", "   ", "corner x", "corner -1", "corner 1 2"] {
            let error = TileRef::parse(text).unwrap_err();
            assert!(
                matches!(error, AlgorithmError::MalformedRules { .. }),
                "'{text}' should be malformed"
            );
        }
    }

    // Tests a consistent rule set validates and finds its tiles
    // Verified by searching names from the end
    #[test]
    fn test_valid_rule_set() {
        let rules = RuleSet {
            tiles: vec![tile("grass", 3, 1.0), tile("water", 3, 0.5)],
            neighbors: vec![pair("grass", "water 1")],
        };
        assert!(rules.validate().is_ok());
        assert_eq!(rules.position("water"), Some(1));
        assert_eq!(rules.position("sand"), None);
    }

    // Tests an empty rule set is rejected
    // Verified by accepting rule sets without tiles
    #[test]
    fn test_empty_rule_set() {
        assert!(matches!(
            RuleSet::default().validate(),
            Err(AlgorithmError::MalformedRules { .. })
        ));
    }

    // Tests duplicate names and unusable weights are rejected
    // Verified by skipping the uniqueness check
    #[test]
    fn test_duplicate_and_weight_errors() {
        let duplicate = RuleSet {
            tiles: vec![tile("grass", 2, 1.0), tile("grass", 2, 1.0)],
            neighbors: Vec::new(),
        };
        assert!(matches!(
            duplicate.validate(),
            Err(AlgorithmError::MalformedRules { .. })
        ));

        for weight in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let rules = RuleSet {
                tiles: vec![tile("grass", 2, weight)],
                neighbors: Vec::new(),
            };
            assert!(matches!(
                rules.validate(),
                Err(AlgorithmError::InvalidParameter { .. })
            ));
        }
    }

    // Tests tile images of different sizes are rejected
    // Verified by comparing each tile with its predecessor only
    #[test]
    fn test_inconsistent_tile_sizes() {
        let rules = RuleSet {
            tiles: vec![tile("a", 3, 1.0), tile("b", 3, 1.0), tile("c", 4, 1.0)],
            neighbors: Vec::new(),
        };
        let error = rules.validate().unwrap_err();
        assert!(matches!(
            error,
            AlgorithmError::InconsistentTileSize {
                expected: 3,
                found: 4,
                ..
            }
        ));
    }

    // Tests neighbor rules must name declared tiles
    // Verified by checking only the left side of each pair
    #[test]
    fn test_unknown_neighbor_name() {
        let rules = RuleSet {
            tiles: vec![tile("grass", 2, 1.0)],
            neighbors: vec![pair("grass", "lava")],
        };
        assert!(matches!(
            rules.validate(),
            Err(AlgorithmError::MalformedRules { .. })
        ));
    }
}
