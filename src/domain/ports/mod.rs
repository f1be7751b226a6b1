pub mod trade_repository;
