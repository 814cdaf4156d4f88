//! Property-based tests for extraction and reconstruction.
