//! Property-based tests for reconciliation convergence

mod convergence;
