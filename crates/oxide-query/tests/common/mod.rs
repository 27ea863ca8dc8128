//! Shared helpers for the integration suites.
#![allow(dead_code)]

use oxide_query::dialect::{new_context, ContextOptions};
use oxide_query::Context;

pub fn pg() -> Box<dyn Context> {
    new_context(&ContextOptions::new("pg")).unwrap()
}

pub fn mysql() -> Box<dyn Context> {
    new_context(&ContextOptions::new("mysql")).unwrap()
}

pub fn sqlite() -> Box<dyn Context> {
    new_context(&ContextOptions::new("sqlite")).unwrap()
}

pub fn sqlite_at(version: &str) -> Box<dyn Context> {
    new_context(&ContextOptions::new("sqlite").version(version)).unwrap()
}
