use std::io::{self, BufRead, Write};

use url::Url;

use crate::config::{Config, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::error::{ReqresError, Result};

pub fn run() -> Result<()> {
    let config_path = Config::config_path()?;
    let stdin = io::stdin();
    let mut input = stdin.lock();

    if config_path.exists() {
        let answer = prompt(
            &mut input,
            &format!(
                "Config file already exists at {}. Overwrite? [y/N] ",
                config_path.display()
            ),
        )?;

        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("reqres CLI Configuration");
    println!("========================\n");

    let base_url = prompt(&mut input, &format!("API base URL [{DEFAULT_BASE_URL}]: "))?;
    let timeout = prompt(
        &mut input,
        &format!("Request timeout in seconds [{DEFAULT_TIMEOUT_SECS}]: "),
    )?;

    let config_content = render_config(&base_url, &timeout)?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ReqresError::ConfigRead {
            path: config_path.clone(),
            source: e,
        })?;
    }

    std::fs::write(&config_path, config_content).map_err(|e| ReqresError::ConfigRead {
        path: config_path.clone(),
        source: e,
    })?;

    println!("\nConfig saved to {}", config_path.display());
    println!("You can now use 'reqres' commands!");

    Ok(())
}

fn prompt(input: &mut impl BufRead, message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Blank answers keep the defaults and are left out of the file.
fn render_config(base_url: &str, timeout: &str) -> Result<String> {
    let mut content = String::new();

    if !base_url.is_empty() {
        Url::parse(base_url).map_err(|e| ReqresError::InvalidBaseUrl {
            url: base_url.to_string(),
            source: e,
        })?;
        content.push_str(&format!("base_url = {}\n", toml_string(base_url)));
    }

    if !timeout.is_empty() {
        match timeout.parse::<u64>() {
            Ok(secs) => content.push_str(&format!("timeout_secs = {secs}\n")),
            Err(_) => eprintln!("Ignoring invalid timeout '{timeout}', keeping the default"),
        }
    }

    Ok(content)
}

fn toml_string(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
