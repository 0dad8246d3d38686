//! Interactive stdin prompts

use std::io::{self, BufRead, Write};

use keywallet::keystore::Keystore;

/// Read one trimmed line, treating a closed stream as an error
///
/// Without this the retry loops below would spin forever on a closed stdin,
/// e.g. when the binary is run non-interactively.
fn read_trimmed(reader: &mut impl BufRead) -> io::Result<String> {
    let mut input = String::new();
    if reader.read_line(&mut input)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input stream closed",
        ));
    }
    Ok(input.trim().to_string())
}

/// Prompt for a single line of input
pub fn line(label: &str) -> io::Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    read_trimmed(&mut io::stdin().lock())
}

/// Prompt for a password twice until both entries match
pub fn password_repeated(label: &str) -> io::Result<String> {
    loop {
        let first = line(label)?;
        if first.is_empty() {
            println!("Password cannot be empty.");
            continue;
        }
        let second = line(&format!("repeat {}", label))?;
        if first == second {
            return Ok(first);
        }
        println!("Passwords do not match, try again.");
    }
}

/// Ask a yes/no question, defaulting to no
pub fn confirm(question: &str) -> io::Result<bool> {
    let answer = line(&format!("{} (y/N)", question))?;
    Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
}

/// Prompt for a seed name until one not already in the keystore is given
pub fn unique_seed_name(store: &Keystore) -> io::Result<String> {
    loop {
        let name = line("seed name")?;
        if name.is_empty() {
            println!("Seed name cannot be empty.");
            continue;
        }
        if store.has(&name) {
            println!("Seed {:?} already exists, pick another name.", name);
            continue;
        }
        return Ok(name);
    }
}
