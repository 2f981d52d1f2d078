//! Index tests
