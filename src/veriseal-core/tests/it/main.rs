//! Consolidated integration tests for veriseal-core.
//!
//! One external test binary instead of many; see
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod gate_enforcement;
mod wire_contract;
