pub mod contemplation;
pub mod lance_base;
pub mod pricing;
