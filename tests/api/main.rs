//! tests/api/main.rs

mod access_control;
mod helpers;
mod logout;
