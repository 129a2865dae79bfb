pub mod runner;
pub mod fetcher;
pub mod moac_fetcher;
