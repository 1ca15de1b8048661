pub mod config;
pub mod contracts;
pub mod data;
pub mod pdf_reader;
pub mod web_page_reader;
