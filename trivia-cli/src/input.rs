use std::io::Write;

pub fn read_stdin<P>(prompt: P) -> std::io::Result<String>
where
    P: AsRef<str>
{
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut buffer = String::new();

    stdout.write_all(prompt.as_ref().as_bytes())?;
    stdout.flush()?;

    stdin.read_line(&mut buffer)?;

    Ok(buffer)
}

pub fn read_stdin_trimmed<P>(prompt: P) -> std::io::Result<String>
where
    P: AsRef<str>
{
    let given = read_stdin(prompt)?;

    Ok(given.trim().to_owned())
}

/// prompts until a non empty value is given
pub fn read_required<P>(prompt: P) -> std::io::Result<String>
where
    P: AsRef<str>
{
    loop {
        let given = read_stdin_trimmed(prompt.as_ref())?;

        if !given.is_empty() {
            return Ok(given);
        }
    }
}

pub fn read_password() -> std::io::Result<String> {
    rpassword::prompt_password("password: ")
}
