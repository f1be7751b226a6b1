pub mod import_batch;
pub mod preview_import;
pub mod stats;
pub mod sync_broker;
pub mod trades;
