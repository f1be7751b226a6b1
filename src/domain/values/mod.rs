pub mod asset_class;
pub mod direction;
pub mod pnl;
