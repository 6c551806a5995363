//! Unit tests for the sentiment dispatch core.

mod lexicon;
mod retry;
