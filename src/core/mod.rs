pub mod errors;
pub mod fleet_manager;
pub mod utils;
