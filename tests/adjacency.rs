//! Validates adjacency derivation, weights and shape checking

use tileweave::WeaveError;
use tileweave::analysis::adjacency::AdjacencyModel;
use tileweave::spatial::grid::SampleGrid;
use tileweave::spatial::nav::Direction;
use tileweave::spatial::tiles::TileValue;

const A: TileValue = TileValue::Single(0);
const B: TileValue = TileValue::Single(1);
const C: TileValue = TileValue::Single(2);

#[test]
fn test_invalid_shape_is_rejected_before_derivation() {
    match AdjacencyModel::derive(&[A; 7], 3) {
        Err(WeaveError::InvalidShape { length, width }) => {
            assert_eq!(length, 7);
            assert_eq!(width, 3);
        }
        other => panic!("expected shape error, got {other:?}"),
    }

    assert!(AdjacencyModel::derive(&[A, B], 0).is_err());
    assert!(AdjacencyModel::derive(&[], 4).is_err());
    assert!(SampleGrid::new(vec![A, B, C], 2).is_err());
}

#[test]
fn test_single_cell_sample_has_no_rules() {
    let model = AdjacencyModel::derive(&[A], 1).unwrap();

    assert_eq!(model.tile_count(), 1);
    assert_eq!(model.weight(0), 1);
    for direction in Direction::ALL {
        assert!(model.allowed(0, direction).unwrap().is_empty());
        assert!(!model.allows(A, direction, A));
    }
}

#[test]
fn test_two_tile_row_learns_one_ordered_pair() {
    let model = AdjacencyModel::derive(&[A, B], 2).unwrap();

    assert_eq!(model.tile_count(), 2);
    assert_eq!(model.weights(), &[1, 1]);

    assert!(model.allows(A, Direction::East, B));
    assert!(model.allows(B, Direction::West, A));
    assert!(!model.allows(B, Direction::East, A));
    assert!(!model.allows(A, Direction::West, B));
    assert!(!model.allows(A, Direction::North, B));
    assert!(!model.allows(A, Direction::South, B));
}

#[test]
fn test_self_adjacency_is_learned_when_present() {
    let model = AdjacencyModel::derive(&[A, A], 2).unwrap();
    assert!(model.allows(A, Direction::East, A));
    assert!(model.allows(A, Direction::West, A));
    assert!(!model.allows(A, Direction::North, A));
}

#[test]
fn test_relation_is_symmetric_under_inversion() {
    let sample = [A, B, C, B, A, B, C, B, A];
    let model = AdjacencyModel::derive(&sample, 3).unwrap();

    for &left in model.tiles() {
        for &right in model.tiles() {
            for direction in Direction::ALL {
                assert_eq!(
                    model.allows(left, direction, right),
                    model.allows(right, direction.inverse(), left),
                    "asymmetry for {left} {direction:?} {right}"
                );
            }
        }
    }
}

#[test]
fn test_duplicate_pairs_collapse_into_a_set() {
    // The A->east->B pair occurs twice; the rule set records it once and
    // equality with a single-occurrence derivation still holds per pair
    let model = AdjacencyModel::derive(&[A, B, A, B], 4).unwrap();
    assert!(model.allows(A, Direction::East, B));
    assert!(model.allows(B, Direction::East, A));
    assert_eq!(model.weights(), &[2, 2]);
}

#[test]
fn test_weights_count_occurrences() {
    let model = AdjacencyModel::derive(&[A, A, B, A], 2).unwrap();
    assert_eq!(model.index_of(A), Some(0));
    assert_eq!(model.index_of(B), Some(1));
    assert_eq!(model.weight(0), 3);
    assert_eq!(model.weight(1), 1);
    assert_eq!(model.weight(2), 0);
}

#[test]
fn test_rederivation_is_idempotent() {
    let sample = [A, B, C, B, A, B, C, B, A];
    let first = AdjacencyModel::derive(&sample, 3).unwrap();
    let second = AdjacencyModel::derive(&sample, 3).unwrap();

    assert_eq!(first.tiles(), second.tiles());
    assert_eq!(first.weights(), second.weights());
    for tile in 0..first.tile_count() {
        for direction in Direction::ALL {
            assert_eq!(
                first.allowed(tile, direction),
                second.allowed(tile, direction)
            );
        }
    }
}

#[test]
fn test_composite_and_empty_are_opaque_tokens() {
    let pair = TileValue::composite(2, 3);
    let sample = [TileValue::Empty, pair, TileValue::Empty, pair];
    let model = AdjacencyModel::derive(&sample, 2).unwrap();

    assert_eq!(model.tile_count(), 2);
    assert_eq!(model.weights(), &[2, 2]);
    assert!(model.allows(TileValue::Empty, Direction::East, pair));
    assert!(model.allows(pair, Direction::West, TileValue::Empty));
    // Composites match only themselves, never their layers
    assert!(!model.allows(TileValue::Empty, Direction::East, TileValue::Single(2)));
    assert_eq!(model.index_of(TileValue::Single(3)), None);
}

#[test]
fn test_equal_layers_normalize_to_single() {
    assert_eq!(TileValue::composite(5, 5), TileValue::Single(5));
    assert_ne!(TileValue::composite(5, 6), TileValue::Single(5));
    assert_eq!(TileValue::composite(5, 6).base_layer(), Some(5));
    assert_eq!(TileValue::Empty.base_layer(), None);
}
