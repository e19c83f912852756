use std::io;

/// Prompt for a password without echoing it back to the terminal
pub fn prompt_password(prompt: &str) -> io::Result<String> {
    println!("{}", prompt);
    rpassword::read_password()
}
