mod common;

use assert_matches::assert_matches;
use common::{aggregate_row, aggregates, catalog};
use ge_price_report::items::{BowConversion, SaplingSeed, StaffConversion, BOWSTRING_ID, NATURE_RUNE_ID};
use ge_price_report::strategy::{
    evaluate_arbitrage, evaluate_conversion, ConversionSpec, PriceRange, StrategyError, StrategyKind,
    Verdict,
};
use rust_decimal_macros::dec;

const FIRE_STAFF: StaffConversion = StaffConversion { battlestaff_id: 1393, orb_id: 569 };
const MAGIC_SAPLING: SaplingSeed = SaplingSeed { sapling_id: 5503, seed_id: 5290 };

#[test]
fn test_battlestaff_dont_buy() {
    let catalog = catalog(&[(1393, "Fire battlestaff", Some(1000.0))]);
    let aggregates = aggregates(vec![
        aggregate_row(NATURE_RUNE_ID, "Nature rune", Some(150), Some(140), Some(150.0)),
        aggregate_row(569, "Fire orb", Some(200), Some(190), Some(160.0)),
    ]);

    let result =
        evaluate_conversion(&catalog, &aggregates, &ConversionSpec::battlestaff(&FIRE_STAFF)).unwrap();

    assert_eq!(result.kind, StrategyKind::Conversion);
    assert_eq!(result.name, "Fire orb");
    assert_eq!(result.profit, 1000.0 - (150.0 + 7000.0) - 200.0);
    assert_eq!(result.verdict, Some(Verdict::DontBuy));
    assert_eq!(result.price_range, None);
    assert_eq!(result.discount, Some(dec!(1.25)));
}

#[test]
fn test_battlestaff_buy_carries_price_range() {
    let catalog = catalog(&[(1393, "Fire battlestaff", Some(9300.0))]);
    let aggregates = aggregates(vec![
        aggregate_row(NATURE_RUNE_ID, "Nature rune", Some(150), Some(140), Some(150.0)),
        aggregate_row(569, "Fire orb", Some(1100), Some(1050), Some(1100.0)),
    ]);

    let result =
        evaluate_conversion(&catalog, &aggregates, &ConversionSpec::battlestaff(&FIRE_STAFF)).unwrap();

    assert_eq!(result.profit, 1050.0);
    assert_eq!(result.verdict, Some(Verdict::Buy));
    assert_eq!(result.price_range, Some(PriceRange { low: Some(1050), high: Some(1100) }));
    assert_eq!(result.discount, Some(dec!(1)));
}

#[test]
fn test_bow_conversion_profit() {
    let bow = BowConversion { bow_id: 855, log_id: 1515 };
    let catalog = catalog(&[(855, "Yew longbow", Some(768.0))]);
    let aggregates = aggregates(vec![
        aggregate_row(NATURE_RUNE_ID, "Nature rune", Some(150), None, Some(150.0)),
        aggregate_row(1515, "Yew logs", Some(300), None, Some(290.0)),
        aggregate_row(BOWSTRING_ID, "Bow string", Some(120), Some(110), Some(120.0)),
    ]);

    let result = evaluate_conversion(&catalog, &aggregates, &ConversionSpec::bow(&bow)).unwrap();
    assert_eq!(result.item_id, BOWSTRING_ID);
    assert_eq!(result.profit, 768.0 - (150.0 + 300.0) - 120.0);
    assert_eq!(result.verdict, Some(Verdict::Buy));
}

#[test]
fn test_conversion_missing_input_is_typed_error() {
    let catalog = catalog(&[(1393, "Fire battlestaff", Some(1000.0))]);
    let aggregates = aggregates(vec![aggregate_row(569, "Fire orb", Some(200), None, None)]);

    let err = evaluate_conversion(&catalog, &aggregates, &ConversionSpec::battlestaff(&FIRE_STAFF))
        .unwrap_err();
    assert_matches!(
        err,
        StrategyError::MissingData { item_id, evaluator: StrategyKind::Conversion } if item_id == NATURE_RUNE_ID
    );
}

#[test]
fn test_conversion_missing_target_in_catalog() {
    let aggregates = aggregates(vec![
        aggregate_row(NATURE_RUNE_ID, "Nature rune", Some(150), None, None),
        aggregate_row(569, "Fire orb", Some(200), None, None),
    ]);

    let err = evaluate_conversion(&catalog(&[]), &aggregates, &ConversionSpec::battlestaff(&FIRE_STAFF))
        .unwrap_err();
    assert_matches!(err, StrategyError::MissingCatalogEntry { item_id: 1393, .. });
}

#[test]
fn test_conversion_null_subject_price() {
    let catalog = catalog(&[(1393, "Fire battlestaff", Some(1000.0))]);
    let aggregates = aggregates(vec![
        aggregate_row(NATURE_RUNE_ID, "Nature rune", Some(150), None, None),
        aggregate_row(569, "Fire orb", None, Some(190), Some(200.0)),
    ]);

    let err = evaluate_conversion(&catalog, &aggregates, &ConversionSpec::battlestaff(&FIRE_STAFF))
        .unwrap_err();
    assert_matches!(err, StrategyError::MissingPrice { item_id: 569, .. });
}

#[test]
fn test_arbitrage_uses_price_floors() {
    let aggregates = aggregates(vec![
        aggregate_row(5503, "Magic sapling", Some(100), Some(90), Some(95.0)),
        aggregate_row(5290, "Magic seed", Some(12), Some(10), Some(11.5)),
    ]);

    let result = evaluate_arbitrage(&aggregates, 5503, &[MAGIC_SAPLING]).unwrap();
    assert_eq!(result.kind, StrategyKind::Arbitrage);
    assert_eq!(result.profit, 80.0);
    assert_eq!(result.verdict, None);
    assert_eq!(result.discount, None);
}

#[test]
fn test_arbitrage_missing_precursor() {
    let aggregates = aggregates(vec![aggregate_row(5503, "Magic sapling", Some(100), Some(90), None)]);

    let err = evaluate_arbitrage(&aggregates, 5503, &[MAGIC_SAPLING]).unwrap_err();
    assert_eq!(err.item_id(), 5290);
    assert_eq!(err.evaluator(), StrategyKind::Arbitrage);
}

#[test]
fn test_arbitrage_unmapped_item() {
    let aggregates = aggregates(vec![]);
    let err = evaluate_arbitrage(&aggregates, 1, &[MAGIC_SAPLING]).unwrap_err();
    assert_matches!(err, StrategyError::UnmappedItem { item_id: 1, .. });
}
