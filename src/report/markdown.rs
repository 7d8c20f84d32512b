use crate::strategy::{EvaluationOutcome, StrategyKind, StrategyResult};

/// 區塊之間的分隔線
pub const DIVIDER: &str = "\n***\n";

fn render_conversion(result: &StrategyResult) -> String {
    let verdict = result
        .verdict
        .map_or_else(String::new, |verdict| verdict.to_string());
    let range = result
        .price_range
        .map_or_else(String::new, |range| format!(" {range}"));
    let discount = result
        .discount
        .map_or_else(|| "n/a".to_string(), |discount| discount.to_string());

    format!(
        "### {}: \n***{}***{}.  **Profit**: *{}* **Value**: *{}x against historical median*",
        result.name, verdict, range, result.profit, discount
    )
}

fn render_arbitrage(result: &StrategyResult) -> String {
    format!("### {}: \n**Profit**: *{}* ", result.name, result.profit)
}

/// 單一評估的 Markdown 區塊，失敗的評估顯示為 Unavailable
pub fn render_outcome(outcome: &EvaluationOutcome) -> String {
    match &outcome.result {
        Ok(result) => match result.kind {
            StrategyKind::Conversion => render_conversion(result),
            StrategyKind::Arbitrage => render_arbitrage(result),
        },
        Err(e) => format!("### {}: \n*Unavailable: {}*", outcome.label, e),
    }
}

/// 完整文件：開頭一條分隔線，每個區塊之後再接一條
pub fn render_document(outcomes: &[EvaluationOutcome]) -> String {
    let mut document = String::from(DIVIDER);
    for outcome in outcomes {
        document.push_str(&render_outcome(outcome));
        document.push('\n');
        document.push_str(DIVIDER);
    }
    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{PriceRange, StrategyError, Verdict};
    use rust_decimal_macros::dec;

    fn conversion(profit: f64, verdict: Verdict, range: Option<PriceRange>) -> EvaluationOutcome {
        EvaluationOutcome {
            label: "Fire orb".into(),
            result: Ok(StrategyResult {
                item_id: 569,
                name: "Fire orb".into(),
                kind: StrategyKind::Conversion,
                profit,
                discount: Some(dec!(1.5)),
                verdict: Some(verdict),
                price_range: range,
            }),
        }
    }

    #[test]
    fn test_render_buy_block() {
        let outcome = conversion(
            -6350.0 + 7000.0,
            Verdict::Buy,
            Some(PriceRange { low: Some(1180), high: Some(1200) }),
        );
        assert_eq!(
            render_outcome(&outcome),
            "### Fire orb: \n***Buy*** between 1180 and 1200.  **Profit**: *650* **Value**: *1.5x against historical median*"
        );
    }

    #[test]
    fn test_render_dont_buy_block_has_no_range() {
        let outcome = conversion(-6350.0, Verdict::DontBuy, None);
        assert_eq!(
            render_outcome(&outcome),
            "### Fire orb: \n***Don't Buy***.  **Profit**: *-6350* **Value**: *1.5x against historical median*"
        );
    }

    #[test]
    fn test_render_arbitrage_block() {
        let outcome = EvaluationOutcome {
            label: "Magic sapling".into(),
            result: Ok(StrategyResult {
                item_id: 5503,
                name: "Magic sapling".into(),
                kind: StrategyKind::Arbitrage,
                profit: 12500.0,
                discount: None,
                verdict: None,
                price_range: None,
            }),
        };
        assert_eq!(render_outcome(&outcome), "### Magic sapling: \n**Profit**: *12500* ");
    }

    #[test]
    fn test_render_failed_block() {
        let outcome = EvaluationOutcome {
            label: "item 5502".into(),
            result: Err(StrategyError::MissingData {
                item_id: 5289,
                evaluator: StrategyKind::Arbitrage,
            }),
        };
        let block = render_outcome(&outcome);
        assert!(block.starts_with("### item 5502: \n*Unavailable: "));
        assert!(block.contains("5289"));
    }

    #[test]
    fn test_render_document_dividers() {
        let outcomes = vec![conversion(1.0, Verdict::Buy, None), conversion(-1.0, Verdict::DontBuy, None)];
        let document = render_document(&outcomes);
        assert!(document.starts_with(DIVIDER));
        assert!(document.ends_with(DIVIDER));
        assert_eq!(document.matches("***\n").count(), 3);
    }
}
