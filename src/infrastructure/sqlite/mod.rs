pub mod migrations;
pub mod trade_repo;
