use crate::domain::pipeline::coercer::CandidateTrade;

/// Checks a coerced candidate for completeness. Every rule is evaluated
/// independently so one row can report all of its defects at once; an empty
/// list means the row is valid.
pub fn validate(candidate: &CandidateTrade) -> Vec<String> {
    let mut errors = Vec::new();
    if candidate.symbol.is_empty() {
        errors.push("missing symbol".to_string());
    }
    if !candidate.entry_price.is_finite() {
        errors.push("invalid entry_price".to_string());
    }
    if !candidate.exit_price.is_finite() {
        errors.push("invalid exit_price".to_string());
    }
    if !candidate.quantity.is_finite() || candidate.quantity <= 0.0 {
        errors.push("invalid quantity".to_string());
    }
    errors
}
