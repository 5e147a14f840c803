pub mod cli;
pub mod presenter;
