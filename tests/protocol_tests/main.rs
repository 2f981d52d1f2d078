//! Protocol and dispatcher tests

mod dispatcher_tests;
