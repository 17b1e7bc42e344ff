pub mod card;
pub mod config;
pub mod report;
pub mod rules;
