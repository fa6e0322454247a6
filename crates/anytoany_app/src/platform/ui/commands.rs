use std::path::PathBuf;

pub const HELP_TEXT: &str = "\
Commands:
  select <file>...   pick files (replaces the current selection)
  drop <file>...     same as select
  format <name>      choose the target format
  formats            list available formats
  submit             convert the selected files
  clear              clear the selection
  status             show the current state
  help               show this help
  quit               exit (waits for a running conversion)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select(Vec<PathBuf>),
    Format(String),
    Formats,
    Submit,
    Clear,
    Status,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

/// Parses one input line. Arguments may be wrapped in double quotes to keep
/// spaces.
pub fn parse_command(line: &str) -> Command {
    let args = match split_args(line) {
        Ok(args) => args,
        Err(reason) => return Command::Invalid(reason),
    };
    let Some((verb, rest)) = args.split_first() else {
        return Command::Empty;
    };

    match verb.to_ascii_lowercase().as_str() {
        "select" | "drop" | "open" => {
            if rest.is_empty() {
                Command::Invalid(format!("usage: {verb} <file>..."))
            } else {
                Command::Select(rest.iter().map(PathBuf::from).collect())
            }
        }
        "format" => match rest {
            [format] => Command::Format(format.clone()),
            _ => Command::Invalid("usage: format <name>".to_string()),
        },
        "formats" => Command::Formats,
        "submit" | "convert" => Command::Submit,
        "clear" => Command::Clear,
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Invalid(format!("unknown command '{other}' (try 'help')")),
    }
}

fn split_args(line: &str) -> Result<Vec<String>, String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    args.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }
    if in_quotes {
        return Err("unterminated quote".to_string());
    }
    if has_token {
        args.push(current);
    }
    Ok(args)
}
