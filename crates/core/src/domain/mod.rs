pub mod contract;
pub mod recommendation;
pub mod stock;
