//! Proxy Pattern
//!
//! The same client code runs first against a real subject and then
//! against a proxy that checks access and logs each forwarded request.
//!
//! Run with: cargo run --example proxy

use statecraft::config::Settings;
use statecraft::output::{Console, Emitter};
use statecraft::proxy::{client_code, Proxy, RealSubject};
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    let emitter = Settings::from_env().emitter(Arc::new(Console))?;

    emitter.emit("Client: Executing the client code with a real subject:");
    let real_subject = RealSubject::new(emitter.clone());
    client_code(&real_subject);

    println!();

    emitter.emit("Client: Executing the same client code with a proxy:");
    let proxy = Proxy::new(real_subject, emitter.clone());
    client_code(&proxy);

    println!();
    Ok(())
}
