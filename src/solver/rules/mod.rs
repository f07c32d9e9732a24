pub mod delta_comparison;
pub mod either_or;
pub mod mutually_exclusive;
pub mod neither_nor;
pub mod pairs;
