//! HTTP-level integration tests for the Warden API.

mod helpers;

mod auth_test;
mod file_test;
mod session_test;
