//! Interactive stdin prompts for options not given as flags.

use std::io::{self, Write};

use anyhow::Result;

#[cfg(test)]
mod tests;

fn read_reply(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Prompt for a free-form value. Returns the trimmed reply, which may be
/// empty; the caller decides whether empty is acceptable.
pub fn line(message: &str) -> Result<String> {
    read_reply(&format!("{}: ", message))
}

/// Prompt for a value with a default shown in brackets.
pub fn line_with_default(message: &str, default: &str) -> Result<String> {
    let reply = read_reply(&format!("{} [{}]: ", message, default))?;
    Ok(apply_default(&reply, default))
}

/// Yes/no prompt. The default answer is shown uppercase, the way the
/// `[Y/n]` convention reads.
pub fn confirm(message: &str, default: bool) -> Result<bool> {
    let hint = if default { "[Y/n]" } else { "[y/N]" };
    let reply = read_reply(&format!("{} {} ", message, hint))?;
    Ok(parse_confirm(&reply, default))
}

fn apply_default(reply: &str, default: &str) -> String {
    if reply.is_empty() {
        default.to_string()
    } else {
        reply.to_string()
    }
}

fn parse_confirm(reply: &str, default: bool) -> bool {
    match reply.to_ascii_lowercase().as_str() {
        "y" | "yes" => true,
        "n" | "no" => false,
        "" => default,
        _ => false,
    }
}
