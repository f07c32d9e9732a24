pub mod engine;
pub mod outcome;
pub mod puzzle;
pub mod rule;
pub mod rules;
pub mod stats;
