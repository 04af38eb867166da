//! Allocation-heavy vector workloads, run once per global allocator.

pub mod churn;
pub mod nested;
pub mod threads;
