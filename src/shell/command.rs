//! Tokenizing UnderWorld command lines.

/// A parsed shell command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand<'a> {
    /// Blank input.
    Empty,
    Exit,
    List,
    Pwd,
    ChangeDir(&'a str),
    Download {
        url: &'a str,
        filename: Option<&'a str>,
    },
    /// `download` without a URL.
    DownloadUsage,
    Git(Vec<&'a str>),
    Run(&'a str),
    Unknown(&'a str),
}

/// Split `line` on whitespace and classify it.
///
/// Extra tokens after the ones a command uses are ignored, and `cd` or
/// `run` without an argument are unknown commands.
pub fn parse(line: &str) -> ShellCommand<'_> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, rest)) = tokens.split_first() else {
        return ShellCommand::Empty;
    };

    match (head, rest) {
        ("exit", _) => ShellCommand::Exit,
        ("ls", _) => ShellCommand::List,
        ("pwd", _) => ShellCommand::Pwd,
        ("cd", [dir, ..]) => ShellCommand::ChangeDir(*dir),
        ("download", []) => ShellCommand::DownloadUsage,
        ("download", [url, rest @ ..]) => ShellCommand::Download {
            url: *url,
            filename: rest.first().copied(),
        },
        ("git", args) => ShellCommand::Git(args.to_vec()),
        ("run", [program, ..]) => ShellCommand::Run(*program),
        _ => ShellCommand::Unknown(head),
    }
}

/// File name for a download whose name was not given: the last segment
/// of the URL path, or `fallback` if that segment is empty.
pub fn filename_from_url<'a>(url: &'a str, fallback: &'a str) -> &'a str {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let without_query = without_scheme.split(['?', '#']).next().unwrap_or("");
    let path = without_query
        .find('/')
        .map_or("", |i| &without_query[i..]);

    match path.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment,
        _ => fallback,
    }
}
