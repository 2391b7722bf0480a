//! Singleton Pattern
//!
//! Two independent accessor calls return the same instance.
//!
//! Run with: cargo run --example singleton

use statecraft::config::Settings;
use statecraft::output::{Console, Emitter};
use statecraft::singleton::{Singleton, UniqueId};
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    let emitter = Settings::from_env().emitter(Arc::new(Console))?;

    let s1 = UniqueId::global();
    let s2 = UniqueId::global();

    if Arc::ptr_eq(&s1, &s2) {
        emitter.emit("Singleton works, both variables contain the same instance.");
        println!();
        emitter.emit(s1.label());
    } else {
        emitter.emit("Singleton failed, variables contain different instances.");
    }

    Ok(())
}
