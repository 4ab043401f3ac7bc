//! Property-based tests

mod aggregate_proptest;
