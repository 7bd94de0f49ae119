pub mod exporter;
pub mod jobstreet_scraper;
pub mod normalize;
pub mod payload;

pub use exporter::*;
pub use jobstreet_scraper::*;
pub use normalize::*;
pub use payload::*;
