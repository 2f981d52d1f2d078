//! Log tests

mod writer_tests;
