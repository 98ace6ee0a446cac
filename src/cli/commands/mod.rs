pub mod image;
pub mod run;
pub mod scrape;
pub mod text;
