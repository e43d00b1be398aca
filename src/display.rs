use rust_decimal::Decimal;

use crate::pools::{PairSnapshot, SwapCandidate};
use crate::router::SwapQuote;

const RULE_WIDTH: usize = 67;

/// One line of the prices section: "A price in B"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRateRow {
    pub label: String,
    pub value: String,
}

/// Both directions of a quote's compounded rate
pub fn price_rate_rows(quote: &SwapQuote, source_display: &str, destination_display: &str) -> [PriceRateRow; 2] {
    [
        PriceRateRow {
            label: format!("{} price in {}", source_display, destination_display),
            value: format_amount(quote.rates.forward_rate),
        },
        PriceRateRow {
            label: format!("{} price in {}", destination_display, source_display),
            value: format_amount(quote.rates.backward_rate),
        },
    ]
}

/// Fixed 8-decimal rendering used for every price and amount
pub fn format_amount(value: Decimal) -> String {
    format!("{:.8}", value)
}

fn rule() {
    println!("\x1b[1;36m{}\x1b[0m", "═".repeat(RULE_WIDTH));
}

fn header(title: &str, snapshot: &PairSnapshot) {
    rule();
    println!(
        "\x1b[1;36m  {} | {} pairs | snapshot {}\x1b[0m",
        title,
        snapshot.pairs.len(),
        snapshot.captured_at.format("%Y-%m-%d %H:%M:%S")
    );
    rule();
    println!();
}

/// Displays a token selector listing
pub fn display_candidates(title: &str, snapshot: &PairSnapshot, candidates: &[SwapCandidate]) {
    header(title, snapshot);

    if candidates.is_empty() {
        println!("\x1b[1;31m  No tokens available.\x1b[0m");
        println!();
        return;
    }

    println!(
        "  \x1b[1m{:<12} │ {:<12} │ {:>24}\x1b[0m",
        "Token ID", "Symbol", "Available"
    );
    println!("  {}", "─".repeat(12 + 3 + 12 + 3 + 24));

    for candidate in candidates {
        println!(
            "  {:<12} │ {:<12} │ {:>24}",
            candidate.token_id,
            candidate.token.display_symbol,
            format_amount(candidate.available)
        );
    }
    println!();
}

/// Displays a route without pricing
pub fn display_route(snapshot: &PairSnapshot, source: &str, destination: &str, path: &[String]) {
    header("Route", snapshot);

    if path.is_empty() {
        println!(
            "\x1b[1;31m  No route from {} to {}. Swap unavailable.\x1b[0m",
            source, destination
        );
    } else {
        println!("  \x1b[1m{}\x1b[0m", path.join(" → "));
        println!("  Hops: {}", path.len().saturating_sub(1));
    }
    println!();
}

/// Displays a priced quote
pub fn display_quote(
    snapshot: &PairSnapshot,
    quote: &SwapQuote,
    rows: &[PriceRateRow],
    minimum_received: Decimal,
    slippage_tolerance: Decimal,
) {
    header("Composite Swap", snapshot);

    if quote.path.is_empty() {
        println!(
            "\x1b[1;31m  No route from {} to {}. Swap unavailable.\x1b[0m",
            quote.source, quote.destination
        );
        println!();
        return;
    }

    println!("  Route:  \x1b[1m{}\x1b[0m", quote.path.join(" → "));
    println!("  Pairs:  {}", quote.pair_ids.join(", "));
    println!();

    println!("\x1b[1;36m  PRICES\x1b[0m");
    for row in rows {
        println!("  {:<32} {:>24}", row.label, row.value);
    }
    println!();

    println!("  {:<32} {:>24}", "Amount in", format_amount(quote.input_amount));
    println!(
        "  {:<32} {:>24}",
        "Estimated to receive",
        format_amount(quote.rates.estimated_output)
    );
    println!(
        "  {:<32} {:>24}",
        format!("Minimum received ({}% slip)", (slippage_tolerance * Decimal::ONE_HUNDRED).normalize()),
        format_amount(minimum_received)
    );
    println!();

    let status = if quote.can_submit() {
        "\x1b[1;32m✓ Ready to submit\x1b[0m"
    } else {
        "\x1b[1;31m✗ Cannot submit swap\x1b[0m"
    };
    println!("  {}", status);
    rule();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::PriceRates;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec!(900)), "900.00000000");
        assert_eq!(format_amount(dec!(0.1)), "0.10000000");
    }

    #[test]
    fn test_price_rate_rows() {
        let quote = SwapQuote {
            source: "BTC".to_string(),
            destination: "DFI".to_string(),
            path: vec!["BTC".to_string(), "DFI".to_string()],
            pair_ids: vec!["5".to_string()],
            input_amount: dec!(100),
            rates: PriceRates {
                forward_rate: dec!(10),
                backward_rate: dec!(0.1),
                estimated_output: dec!(900),
            },
        };

        let rows = price_rate_rows(&quote, "dBTC", "DFI");
        assert_eq!(rows[0].label, "dBTC price in DFI");
        assert_eq!(rows[0].value, "10.00000000");
        assert_eq!(rows[1].label, "DFI price in dBTC");
        assert_eq!(rows[1].value, "0.10000000");
    }
}
