use crate::domain::error::DomainError;
use crate::domain::ports::trade_repository::{TradeFilter, TradeRepository};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct TradeStats {
    pub total_trades: usize,
    pub total_pnl: f64,
    pub winning_trades: usize,
    pub losing_trades: usize,
    /// Percentage of winners, one decimal.
    pub win_rate: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    /// Gross wins over gross losses; None with no losing trades.
    pub profit_factor: Option<f64>,
    /// Average win over average loss; None with no losing trades.
    pub r_multiple: Option<f64>,
}

pub struct StatsUseCase {
    repo: Arc<dyn TradeRepository>,
}

impl StatsUseCase {
    pub fn new(repo: Arc<dyn TradeRepository>) -> Self {
        Self { repo }
    }

    pub fn summary(&self) -> Result<TradeStats, DomainError> {
        let trades = self.repo.list_trades(&TradeFilter::default())?;

        let total_pnl: f64 = trades.iter().map(|t| t.pnl).sum();
        let wins: Vec<f64> = trades.iter().map(|t| t.pnl).filter(|p| *p > 0.0).collect();
        let losses: Vec<f64> = trades.iter().map(|t| t.pnl).filter(|p| *p < 0.0).collect();

        let total_wins: f64 = wins.iter().sum();
        let total_losses: f64 = losses.iter().sum::<f64>().abs();
        let avg_win = if wins.is_empty() { 0.0 } else { total_wins / wins.len() as f64 };
        let avg_loss = if losses.is_empty() { 0.0 } else { total_losses / losses.len() as f64 };
        let win_rate = if trades.is_empty() {
            0.0
        } else {
            wins.len() as f64 / trades.len() as f64 * 100.0
        };

        Ok(TradeStats {
            total_trades: trades.len(),
            total_pnl: round2(total_pnl),
            winning_trades: wins.len(),
            losing_trades: losses.len(),
            win_rate: round1(win_rate),
            avg_win: round2(avg_win),
            avg_loss: round2(avg_loss),
            profit_factor: (total_losses > 0.0).then(|| round2(total_wins / total_losses)),
            r_multiple: (avg_loss > 0.0).then(|| round2(avg_win / avg_loss)),
        })
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
