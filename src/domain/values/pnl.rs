use crate::domain::values::direction::Direction;

/// Realized profit/loss of a closed trade.
///
/// `(exit − entry) × quantity`, negated for shorts, minus commission.
/// Callers are responsible for rejecting non-finite inputs first.
pub fn calculate_pnl(
    entry_price: f64,
    exit_price: f64,
    quantity: f64,
    direction: Direction,
    commission: f64,
) -> f64 {
    round8((exit_price - entry_price) * quantity * direction.sign() - commission)
}

/// Rounds to 8 fractional digits, the precision the ledger stores.
pub fn round8(v: f64) -> f64 {
    (v * 1e8).round() / 1e8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_trade_with_commission() {
        let pnl = calculate_pnl(178.50, 182.30, 100.0, Direction::Long, 2.0);
        assert_eq!(pnl, 378.00);
    }

    #[test]
    fn short_trade_inverts_the_move() {
        let pnl = calculate_pnl(178.50, 182.30, 100.0, Direction::Short, 2.0);
        assert_eq!(pnl, -382.00);
    }

    #[test]
    fn missing_commission_is_zero() {
        let pnl = calculate_pnl(10.0, 12.5, 4.0, Direction::Long, 0.0);
        assert_eq!(pnl, 10.0);
    }

    #[test]
    fn result_is_rounded_to_eight_digits() {
        // 0.1 + 0.2 style float noise must not leak into the ledger
        let pnl = calculate_pnl(0.1, 0.3, 1.0, Direction::Long, 0.0);
        assert_eq!(pnl, 0.2);
        assert_eq!(round8(0.123456789), 0.12345679);
    }
}
