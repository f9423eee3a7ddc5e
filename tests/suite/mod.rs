//! Integration test suite modules

mod config;
mod inventory;
mod persistence;
