//! Property-based tests for permission lookup and name resolution.
