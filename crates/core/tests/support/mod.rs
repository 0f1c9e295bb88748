//! Shared test helpers for `informado-core` integration tests.
//!
//! In-memory mocks for every session port so the service can be exercised
//! without HTTP or storage backends.

pub mod mocks;
