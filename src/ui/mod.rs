//! Everything git-gate shows the user.
//!
//! [`formatter`] renders and prints the tagged output lines; this module adds
//! the one interactive question git-gate ever asks, before replacing a hook
//! it did not write.

use std::io::{self, BufRead, Write};

use anyhow::Result;

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_error, display_status, display_success, display_suggestions,
    display_title, PREFIX,
};

/// Ask a yes/no question on the terminal; only "y" or "yes" count as yes.
///
/// An empty answer, or end of input when stdin is not a terminal, is a no,
/// so hooks never block waiting for input they cannot get.
pub fn confirm_action(prompt: &str) -> Result<bool> {
    let stdin = io::stdin();
    confirm_from(prompt, &mut stdin.lock(), &mut io::stdout())
}

/// [`confirm_action`] over arbitrary streams
pub fn confirm_from<R: BufRead, W: Write>(prompt: &str, input: &mut R, output: &mut W) -> Result<bool> {
    write!(output, "{} {} (y/N): ", PREFIX, prompt)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    let response = answer.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn answer(text: &str) -> bool {
        let mut input = Cursor::new(text.as_bytes().to_vec());
        let mut output = Vec::new();
        confirm_from("Overwrite hook?", &mut input, &mut output).unwrap()
    }

    #[test]
    fn test_confirm_accepts_yes() {
        assert!(answer("y\n"));
        assert!(answer("YES\n"));
    }

    #[test]
    fn test_confirm_defaults_to_no() {
        assert!(!answer("\n"));
        assert!(!answer("n\n"));
        assert!(!answer(""));
    }

    #[test]
    fn test_confirm_writes_prompt() {
        let mut input = Cursor::new(b"n\n".to_vec());
        let mut output = Vec::new();
        confirm_from("Overwrite hook?", &mut input, &mut output).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "[git-gate] Overwrite hook? (y/N): "
        );
    }
}
