pub mod analyst;
pub mod metalprice;
