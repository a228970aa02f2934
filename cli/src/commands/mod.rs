pub mod audit;
pub mod info;
