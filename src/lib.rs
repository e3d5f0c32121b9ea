//! Economic News Digest Library
//!
//! Loads the daily economic news summary and finance tips, keeps short-lived
//! and on-disk copies of them, and answers finance questions from a keyword
//! index or a remote RAG API.

pub mod app;
pub mod cache;
pub mod cli;
pub mod clock;
pub mod config;
pub mod connectivity;
pub mod data;
pub mod knowledge;
pub mod loader;
pub mod render;
pub mod storage;
