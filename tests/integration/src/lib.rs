//! End-to-end tests for the in-memory origin private file system.
