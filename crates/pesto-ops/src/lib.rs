pub mod emit;
pub mod ops_resolve;
