//! Integration tests for dataset version creation.

mod config_test;
mod version_test;
