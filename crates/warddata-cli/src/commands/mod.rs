pub mod listing;
pub mod patient;
