//! Endpoint tests.

mod output_tests;
