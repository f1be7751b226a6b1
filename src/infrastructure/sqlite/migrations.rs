use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), String> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS trades (
            id                TEXT PRIMARY KEY,
            symbol            TEXT NOT NULL,
            asset_type        TEXT NOT NULL DEFAULT 'stock',
            direction         TEXT NOT NULL DEFAULT 'long',
            entry_price       REAL NOT NULL,
            exit_price        REAL NOT NULL,
            quantity          REAL NOT NULL,
            entry_date        TEXT,
            exit_date         TEXT,
            stop_loss         REAL,
            take_profit       REAL,
            commission        REAL NOT NULL DEFAULT 0,
            strategy          TEXT,
            notes             TEXT,
            market_conditions TEXT,
            pnl               REAL NOT NULL,
            broker            TEXT NOT NULL DEFAULT 'manual',
            broker_trade_id   TEXT,
            created_at        TEXT NOT NULL
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_trades_broker_ref
            ON trades(broker, broker_trade_id)
            WHERE broker_trade_id IS NOT NULL;

        CREATE INDEX IF NOT EXISTS idx_trades_symbol ON trades(symbol);
        CREATE INDEX IF NOT EXISTS idx_trades_created ON trades(created_at);
        ",
    )
    .map_err(|e| format!("Migration failed: {e}"))
}
