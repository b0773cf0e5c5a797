//! Study Buddy - study plans, flashcards and quizzes generated by an LLM.
//!
//! Model output is free text that usually, but not always, contains the
//! requested JSON. Every response runs through a recovery pipeline that
//! extracts, repairs, validates, and as a last resort synthesizes a
//! placeholder, so callers always receive a schema-valid object unless the
//! provider call itself failed.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
