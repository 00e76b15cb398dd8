//! End-to-end tests: real server on 127.0.0.1:0, requests via reqwest.

mod common;
mod init_logging;

mod dreams;
mod journal;
mod state;
