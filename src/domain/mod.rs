pub mod app_state;
pub mod catalogue;
pub mod entities;
pub mod history;
pub mod spot_match;
pub mod valuation;
