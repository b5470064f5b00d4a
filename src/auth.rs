use anyhow::{Result, bail};
use std::io::{self, BufRead, IsTerminal};
use zeroize::Zeroizing;

pub const PASSWORD_ENV: &str = "DJHASH_PASSWORD";

/// Reads the password to hash or check.
///
/// Sources, in order: `DJHASH_PASSWORD`, one line of piped stdin, then an
/// interactive prompt. With `confirm`, the prompt asks twice.
pub fn read_password(confirm: bool) -> Result<Zeroizing<String>> {
    //  DJHASH_PASSWORD="hunter2" djhash make
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    //  printf "%s" "hunter2" | djhash check 'pbkdf2_sha256$...'
    if !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().lock().read_line(&mut buf)?;
        trim_newline(&mut buf);

        if !buf.is_empty() {
            return Ok(buf);
        }
        bail!("No password provided");
    }

    let pw = Zeroizing::new(rpassword::prompt_password("Password: ")?);
    if pw.is_empty() {
        bail!("password cannot be empty");
    }

    if confirm {
        let again = Zeroizing::new(rpassword::prompt_password("Confirm password: ")?);
        if *pw != *again {
            bail!("passwords do not match");
        }
    }

    Ok(pw)
}

fn trim_newline(s: &mut String) {
    while s.ends_with('\n') || s.ends_with('\r') {
        s.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::trim_newline;

    #[test]
    fn trims_trailing_line_endings_only() {
        let mut s = String::from(" pw \r\n");
        trim_newline(&mut s);
        assert_eq!(s, " pw ");
    }
}
