pub mod average;
pub mod plant;
pub mod provider;
pub mod solver;
pub mod week;
