//! thcc-drv - Compiler driver.
//!
//! The `thcc` binary: parses the command line, reads each input file, runs
//! the lex→parse pipeline, and prints every diagnostic the front-end
//! recorded as `file:line:col: message` on stderr.
//!
//! ```text
//! argv  →  Config  →  [read file → tokenize → parse → report]  →  exit code
//! ```
//!
//! Inputs must carry a case-insensitive `.hc` extension; anything else is an
//! unrecognized argument. `--dump-tokens` prints the token stream of each
//! input before parsing, one token per line. `-o/--output` is accepted and
//! recorded for interface compatibility with later pipeline stages.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use thcc_lex::{Token, TokenKind};
use thcc_par::Parser;
use thcc_util::Handler;

/// Parsed command-line configuration.
#[derive(Debug, Default)]
pub struct Config {
    /// Output path from `-o/--output`; reserved for later pipeline stages.
    pub out_file: Option<PathBuf>,
    /// Input files, each ending in `.hc` (case-insensitive).
    pub in_files: Vec<PathBuf>,
    /// `-h/--help` was given.
    pub show_help: bool,
    /// `--dump-tokens` was given.
    pub dump_tokens: bool,
}

/// The help text printed for `-h/--help` and empty invocations.
pub fn help_text() -> String {
    let mut text = String::new();
    text.push_str("thcc - Tiny HolyC compiler front-end.\n");
    text.push_str("Usage: thcc <file(s).hc>\n");
    text.push_str(" -o, --output <path>: The path to place the final binary at\n");
    text.push_str(" --dump-tokens: Print the token stream of each input file\n");
    text.push_str(" -h, --help: Show this menu\n");
    text
}

/// Parses command-line arguments (program name excluded).
///
/// Unrecognized arguments and missing option values are errors; the caller
/// exits with status 1.
pub fn parse_args(args: &[String]) -> Result<Config> {
    let mut config = Config::default();

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        match arg.as_str() {
            "-h" | "--help" => {
                config.show_help = true;
                return Ok(config);
            },
            "-o" | "--output" => {
                let value = args
                    .get(i + 1)
                    .with_context(|| format!("expected argument to '{}'", arg))?;
                config.out_file = Some(PathBuf::from(value));
                i += 1;
            },
            "--dump-tokens" => config.dump_tokens = true,
            other => {
                if !has_hc_extension(other) {
                    bail!("unrecognized argument '{}'", other);
                }
                config.in_files.push(PathBuf::from(other));
            },
        }
        i += 1;
    }

    Ok(config)
}

/// Returns true if the argument ends in `.hc`, compared case-insensitively.
fn has_hc_extension(arg: &str) -> bool {
    let bytes = arg.as_bytes();
    bytes.len() >= 3 && bytes[bytes.len() - 3..].eq_ignore_ascii_case(b".hc")
}

/// Runs the driver with a parsed configuration, returning the exit code.
pub fn run(config: &Config) -> Result<i32> {
    if config.show_help || config.in_files.is_empty() {
        print!("{}", help_text());
        return Ok(0);
    }

    let mut failed = false;
    for path in &config.in_files {
        let source = fs::read_to_string(path)
            .with_context(|| format!("couldn't open input file '{}'", path.display()))?;
        if !compile_file(&path.display().to_string(), &source, config.dump_tokens) {
            failed = true;
        }
    }

    Ok(if failed { 1 } else { 0 })
}

/// Entry point shared by `main` and the tests: argv in, exit code out.
pub fn run_cli(args: &[String]) -> Result<i32> {
    let config = parse_args(args)?;
    run(&config)
}

/// Lexes and parses one input, printing its diagnostics to stderr.
///
/// Returns true if the front-end recorded no errors.
fn compile_file(name: &str, source: &str, dump_tokens: bool) -> bool {
    let handler = Handler::new(name);

    if let Ok(tokens) = thcc_lex::tokenize(source, &handler) {
        if dump_tokens {
            print!("{}", render_token_dump(&tokens));
        }
        let mut parser = Parser::new(tokens, &handler);
        let _ast = parser.parse();
    }

    for line in handler.rendered() {
        eprintln!("{}", line);
    }
    !handler.has_errors()
}

/// Renders the debug token dump, one token per line, sentinel excluded.
pub fn render_token_dump(tokens: &[Token]) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    for (i, token) in tokens.iter().enumerate() {
        if token.is(TokenKind::Eof) {
            break;
        }
        let _ = writeln!(
            out,
            "{} type='{}' value='{}' line={} column={} index={}",
            i,
            token.kind,
            token.text(),
            token.span.line,
            token.span.column,
            token.span.start,
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args_help() {
        let config = parse_args(&args(&["-h"])).unwrap();
        assert!(config.show_help);
        let config = parse_args(&args(&["--help"])).unwrap();
        assert!(config.show_help);
    }

    #[test]
    fn test_parse_args_inputs_and_output() {
        let config = parse_args(&args(&["main.hc", "-o", "out", "lib.HC"])).unwrap();
        assert_eq!(config.in_files.len(), 2);
        assert_eq!(config.out_file, Some(PathBuf::from("out")));
        assert!(!config.dump_tokens);
    }

    #[test]
    fn test_parse_args_rejects_unknown() {
        assert!(parse_args(&args(&["main.c"])).is_err());
        assert!(parse_args(&args(&["--wat"])).is_err());
        assert!(parse_args(&args(&["hc"])).is_err());
    }

    #[test]
    fn test_parse_args_missing_output_value() {
        let err = parse_args(&args(&["-o"])).unwrap_err();
        assert!(err.to_string().contains("expected argument to '-o'"));
    }

    #[test]
    fn test_hc_extension() {
        assert!(has_hc_extension("a.hc"));
        assert!(has_hc_extension("a.HC"));
        assert!(has_hc_extension("a.Hc"));
        assert!(!has_hc_extension("a.h"));
        assert!(!has_hc_extension("hc"));
        assert!(!has_hc_extension("a.hcc"));
    }

    #[test]
    fn test_token_dump_format() {
        let handler = Handler::new("dump.hc");
        let tokens = thcc_lex::tokenize("x = 1;", &handler).unwrap();
        let dump = render_token_dump(&tokens);
        let lines: Vec<_> = dump.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "0 type='IDENTIFIER' value='x' line=1 column=1 index=0");
        assert_eq!(lines[1], "1 type='ASSIGN' value='' line=1 column=3 index=2");
    }

    #[test]
    fn test_compile_reports_errors() {
        assert!(compile_file("ok.hc", "x = 1;", false));
        assert!(!compile_file("bad.hc", "x = ;", false));
        assert!(!compile_file("bad.hc", "\"unterminated", false));
    }
}
