//! Parsing of the line commands typed at the prompt.

/// City chosen by list position (1-based) or by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CityRef {
    Index(usize),
    Name(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Show(CityRef),
    Add(String),
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Empty;
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_lowercase().as_str() {
            "list" | "ls" => Command::List,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            // Blank names are passed through so the board can report them
            "add" | "+" => Command::Add(rest.to_string()),
            "show" if !rest.is_empty() => Command::Show(city_ref(rest)),
            _ if rest.is_empty() && line.parse::<usize>().is_ok() => Command::Show(city_ref(line)),
            _ => Command::Unknown(line.to_string()),
        }
    }
}

fn city_ref(arg: &str) -> CityRef {
    match arg.parse::<usize>() {
        Ok(index) => CityRef::Index(index),
        Err(_) => CityRef::Name(arg.to_string()),
    }
}

pub const HELP: &str = "\
Commands:
  list              show the tracked cities
  show <name|#>     show the forecast for a city (a bare number works too)
  add <name>        add a city and show its forecast
  help              this text
  quit              leave";
