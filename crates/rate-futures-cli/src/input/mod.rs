use serde::de::DeserializeOwned;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

/// Load a typed input from `--input <file>` or, failing that, JSON piped on
/// stdin. An interactive or empty stdin counts as no input.
pub fn load<T: DeserializeOwned>(
    path: Option<&str>,
    command: &str,
) -> Result<T, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return read_json(path);
    }

    let mut piped = String::new();
    if !atty::is(atty::Stream::Stdin) {
        io::stdin().read_to_string(&mut piped)?;
    }
    parse_piped(&piped, command)
}

fn parse_piped<T: DeserializeOwned>(
    raw: &str,
    command: &str,
) -> Result<T, Box<dyn std::error::Error>> {
    match raw.trim() {
        "" => Err(format!("--input <file.json> or stdin required for {command}").into()),
        body => serde_json::from_str(body)
            .map_err(|e| format!("Failed to parse stdin for {command}: {e}").into()),
    }
}

/// Deserialise a JSON file, naming the file in any error.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let file = resolve_path(path)?;
    let contents = fs::read_to_string(&file)
        .map_err(|e| format!("Failed to read '{}': {e}", file.display()))?;
    serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {e}", file.display()).into())
}

/// Absolute path to an existing regular file; relative paths are taken from
/// the working directory.
pub fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let file = std::env::current_dir()?.join(path);
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }
    if !file.is_file() {
        return Err(format!("Not a file: {}", file.display()).into());
    }
    Ok(file)
}
