//! Line-oriented interactive session.
//!
//! One mapping lives for the whole session, the way a page keeps its key
//! until it is reloaded. Each input line is one command:
//!
//! ```text
//! enc <text>    encode text
//! dec <text>    decode text
//! key           show the current key
//! shuffle       generate a new key
//! stats         show session metrics
//! help          list commands
//! quit          end the session (also: exit, EOF)
//! ```

use shuffle_cipher_core::CipherSession;
use std::io::{self, BufRead, Write};

const HELP: &str = "\
commands:
  enc <text>   encode text
  dec <text>   decode text
  key          show the current key
  shuffle      generate a new key
  stats        show session metrics
  help         list commands
  quit         end the session
";

/// Interactive loop over a reader and a writer.
pub struct Repl<'a, R, W> {
    session: &'a mut CipherSession,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Repl<'a, R, W> {
    /// Create a loop driving `session`.
    pub fn new(session: &'a mut CipherSession, input: R, output: W) -> Self {
        Self {
            session,
            input,
            output,
        }
    }

    /// Run until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "shuffle-cipher session (seed {}), type 'help'",
            self.session.seed()
        )?;

        let mut line = String::new();
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            let line = line.trim_end_matches(['\n', '\r']);

            let (command, argument) = match line.split_once(' ') {
                Some((command, argument)) => (command, argument),
                None => (line, ""),
            };

            match command.trim() {
                "" => {}
                "enc" | "encrypt" => {
                    let out = self.session.encrypt(argument);
                    if !out.is_clean() {
                        writeln!(self.output, "({} character(s) skipped)", out.dropped())?;
                    }
                    writeln!(self.output, "{}", out.text)?;
                }
                "dec" | "decrypt" => {
                    let out = self.session.decrypt(argument.trim());
                    if !out.is_clean() {
                        writeln!(self.output, "({} position(s) unmatched)", out.unmatched())?;
                    }
                    writeln!(self.output, "{}", out.text)?;
                }
                "key" => {
                    let key = match self.session.render_key() {
                        Some(key) => key,
                        None => self.session.initialize_cipher(),
                    };
                    write!(self.output, "{key}")?;
                }
                "shuffle" => {
                    let key = self.session.reshuffle();
                    writeln!(self.output, "new key generated")?;
                    write!(self.output, "{key}")?;
                }
                "stats" => write!(self.output, "{}", self.session.metrics().summary())?,
                "help" => write!(self.output, "{HELP}")?,
                "quit" | "exit" => break,
                other => writeln!(self.output, "unknown command: {other} (try 'help')")?,
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_script(seed: u64, script: &str) -> String {
        let mut session = CipherSession::with_seed(seed);
        session.initialize_cipher();

        let mut output = Vec::new();
        Repl::new(&mut session, Cursor::new(script), &mut output)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_encrypt_then_decrypt() {
        let mut session = CipherSession::with_seed(4);
        session.initialize_cipher();
        let secret = session.encrypt_text("hello there");

        let output = run_script(4, &format!("dec {secret}\nquit\n"));
        assert!(output.contains("HELLO THERE"));
    }

    #[test]
    fn test_enc_reports_skipped() {
        let output = run_script(4, "enc hi 2 you\n");
        assert!(output.contains("(1 character(s) skipped)"));
    }

    #[test]
    fn test_key_and_shuffle() {
        let output = run_script(4, "key\nshuffle\n");
        assert_eq!(output.matches("Letter => Code").count(), 2);
        assert!(output.contains("new key generated"));
    }

    #[test]
    fn test_unknown_command() {
        let output = run_script(4, "frobnicate\n");
        assert!(output.contains("unknown command: frobnicate"));
    }

    #[test]
    fn test_stops_at_quit() {
        let output = run_script(4, "quit\nkey\n");
        assert!(!output.contains("Letter => Code"));
    }

    #[test]
    fn test_eof_ends_session() {
        let output = run_script(4, "help");
        assert!(output.contains("commands:"));
    }
}
