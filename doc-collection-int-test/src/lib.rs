//! Shared harness of the doc-collection integration tests.

pub mod test_util;
