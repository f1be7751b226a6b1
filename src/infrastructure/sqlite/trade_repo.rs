use crate::domain::entities::trade::Trade;
use crate::domain::error::DomainError;
use crate::domain::ports::trade_repository::{TradeFilter, TradeRepository};
use crate::domain::values::asset_class::AssetClass;
use crate::domain::values::direction::Direction;
use chrono::DateTime;
use rusqlite::{params, Connection};
use std::sync::Mutex;

const TRADE_COLUMNS: &str = "id, symbol, asset_type, direction, entry_price, exit_price, quantity, \
     entry_date, exit_date, stop_loss, take_profit, commission, strategy, notes, \
     market_conditions, pnl, broker, broker_trade_id, created_at";

pub struct SqliteTradeRepo {
    conn: Mutex<Connection>,
}

impl SqliteTradeRepo {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn row_to_trade(row: &rusqlite::Row) -> Result<Trade, rusqlite::Error> {
        let asset_str: String = row.get(2)?;
        let dir_str: String = row.get(3)?;
        let created_str: String = row.get(18)?;

        Ok(Trade {
            id: row.get(0)?,
            symbol: row.get(1)?,
            asset_type: AssetClass::from_loose(Some(&asset_str)),
            direction: dir_str.parse().unwrap_or_else(|_| {
                log::warn!("invalid direction '{dir_str}' in ledger row, defaulting to long");
                Direction::Long
            }),
            entry_price: row.get(4)?,
            exit_price: row.get(5)?,
            quantity: row.get(6)?,
            entry_date: row.get(7)?,
            exit_date: row.get(8)?,
            stop_loss: row.get(9)?,
            take_profit: row.get(10)?,
            commission: row.get(11)?,
            strategy: row.get(12)?,
            notes: row.get(13)?,
            market_conditions: row.get(14)?,
            pnl: row.get(15)?,
            broker: row.get(16)?,
            broker_trade_id: row.get(17)?,
            created_at: DateTime::parse_from_rfc3339(&created_str)
                .map(|dt| dt.with_timezone(&chrono::Utc))
                .unwrap_or_else(|_| chrono::Utc::now()),
        })
    }
}

impl TradeRepository for SqliteTradeRepo {
    fn insert_batch(&self, trades: &[Trade]) -> Result<usize, DomainError> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::Database(format!("Failed to begin batch: {e}")))?;

        let mut inserted = 0;
        {
            let mut stmt = tx
                .prepare(&format!(
                    "INSERT OR IGNORE INTO trades ({TRADE_COLUMNS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)"
                ))
                .map_err(|e| DomainError::Database(e.to_string()))?;
            for trade in trades {
                inserted += stmt
                    .execute(params![
                        trade.id,
                        trade.symbol,
                        trade.asset_type.to_string(),
                        trade.direction.to_string(),
                        trade.entry_price,
                        trade.exit_price,
                        trade.quantity,
                        trade.entry_date,
                        trade.exit_date,
                        trade.stop_loss,
                        trade.take_profit,
                        trade.commission,
                        trade.strategy,
                        trade.notes,
                        trade.market_conditions,
                        trade.pnl,
                        trade.broker,
                        trade.broker_trade_id,
                        trade.created_at.to_rfc3339(),
                    ])
                    .map_err(|e| DomainError::Database(format!("Failed to insert trade: {e}")))?;
            }
        }
        tx.commit()
            .map_err(|e| DomainError::Database(format!("Failed to commit batch: {e}")))?;
        Ok(inserted)
    }

    fn get_trade(&self, id: &str) -> Result<Option<Trade>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare(&format!("SELECT {TRADE_COLUMNS} FROM trades WHERE id = ?1"))
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut rows = stmt
            .query_map(params![id], Self::row_to_trade)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        Ok(rows.next().and_then(|r| r.ok()))
    }

    fn list_trades(&self, filter: &TradeFilter) -> Result<Vec<Trade>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut sql = format!("SELECT {TRADE_COLUMNS} FROM trades WHERE 1=1");
        let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(asset) = &filter.asset_type {
            sql.push_str(&format!(" AND asset_type = ?{}", param_values.len() + 1));
            param_values.push(Box::new(asset.to_string()));
        }
        if let Some(direction) = &filter.direction {
            sql.push_str(&format!(" AND direction = ?{}", param_values.len() + 1));
            param_values.push(Box::new(direction.to_string()));
        }
        sql.push_str(" ORDER BY created_at DESC");
        if let Some(limit) = filter.limit {
            sql.push_str(&format!(" LIMIT ?{}", param_values.len() + 1));
            param_values.push(Box::new(limit as i64));
        }
        if let Some(offset) = filter.offset {
            sql.push_str(&format!(" OFFSET ?{}", param_values.len() + 1));
            param_values.push(Box::new(offset as i64));
        }

        let params_refs: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let trades = stmt
            .query_map(params_refs.as_slice(), Self::row_to_trade)
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(trades)
    }

    fn update_trade(&self, trade: &Trade) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = conn
            .execute(
                "UPDATE trades SET
                     symbol = ?1, asset_type = ?2, direction = ?3, entry_price = ?4,
                     exit_price = ?5, quantity = ?6, entry_date = ?7, exit_date = ?8,
                     stop_loss = ?9, take_profit = ?10, commission = ?11, strategy = ?12,
                     notes = ?13, market_conditions = ?14, pnl = ?15
                 WHERE id = ?16",
                params![
                    trade.symbol,
                    trade.asset_type.to_string(),
                    trade.direction.to_string(),
                    trade.entry_price,
                    trade.exit_price,
                    trade.quantity,
                    trade.entry_date,
                    trade.exit_date,
                    trade.stop_loss,
                    trade.take_profit,
                    trade.commission,
                    trade.strategy,
                    trade.notes,
                    trade.market_conditions,
                    trade.pnl,
                    trade.id,
                ],
            )
            .map_err(|e| DomainError::Database(format!("Failed to update trade: {e}")))?;
        if rows == 0 {
            return Err(DomainError::NotFound(format!("Trade not found: {}", trade.id)));
        }
        Ok(())
    }

    fn delete_trade(&self, id: &str) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = conn
            .execute("DELETE FROM trades WHERE id = ?1", params![id])
            .map_err(|e| DomainError::Database(format!("Failed to delete trade: {e}")))?;
        if rows == 0 {
            return Err(DomainError::NotFound(format!("Trade not found: {id}")));
        }
        Ok(())
    }
}
