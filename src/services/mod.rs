pub mod cas_scraper;

pub use cas_scraper::CasScraper;
