pub mod access;
pub mod design;
pub mod generate;
pub mod market;
pub mod prompts;
pub mod report;
pub mod status;
