pub mod simulation;
pub mod verdict;
