pub mod process;
pub mod rules;
