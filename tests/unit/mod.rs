//! Integration tests for the option-delta-hedger library.

mod hedger_tests;
mod optimizer_tests;
