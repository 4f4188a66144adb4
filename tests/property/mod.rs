//! Property-based tests for document handling and backup rotation

mod history;
mod preservation;
mod retention;
mod roundtrip;
