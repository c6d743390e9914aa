use serde_json::Value;
use std::io::{self, Write};

/// Pretty JSON on stdout, written straight to the locked handle.
pub fn print_json(value: &Value) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = serde_json::to_writer_pretty(&mut out, value)
        .map_err(io::Error::from)
        .and_then(|()| writeln!(out));
    if let Err(e) = written {
        eprintln!("JSON output error: {e}");
    }
}
