pub mod brokers;
pub mod csv;
pub mod sqlite;
