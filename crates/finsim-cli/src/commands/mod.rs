pub mod compare;
pub mod consortium;
pub mod loan;
