pub mod calculator;
pub mod config;
pub mod form;
pub mod input;
pub mod output;
pub mod parser;
