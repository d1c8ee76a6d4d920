//! Nom-based IRC line parser.
//!
//! A pure, stateless transform of one terminator-stripped raw line into
//! its prefix, command, and ordered parameters. Decomposing a user
//! prefix into nick/user/host is dispatch's job, not the parser's; see
//! [`crate::source::Source`].

use nom::{
    bytes::complete::take_while1,
    character::complete::{char, space0},
    combinator::opt,
    sequence::preceded,
    IResult,
};

use crate::error::ParseError;

type NomResult<'a, O> = IResult<&'a str, O>;

/// Parse the actor prefix (the part after `:` and before the first space).
fn parse_source(input: &str) -> NomResult<'_, &str> {
    preceded(char(':'), take_while1(|c| c != ' '))(input)
}

/// Parse the command token (everything up to the next whitespace).
fn parse_command(input: &str) -> NomResult<'_, &str> {
    take_while1(|c: char| !c.is_whitespace())(input)
}

/// One parsed protocol line, borrowing from the raw input.
///
/// Line format:
/// ```text
/// [:prefix] <command> [middles...] [:trailing]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    /// Actor prefix (without the leading `:`), if present. Names either
    /// a server or a `nick!user@host` identity.
    pub source: Option<&'a str>,
    /// The command token. Never empty.
    pub command: &'a str,
    /// Ordered parameters. The trailing parameter, if any, is last and
    /// may contain embedded spaces and colons.
    pub params: Vec<&'a str>,
}

impl<'a> Line<'a> {
    /// Parse one raw line into a `Line`.
    ///
    /// Trailing `\r`/`\n` terminators are tolerated and stripped. A
    /// colon introduces the trailing parameter only at the start of a
    /// parameter, so colons embedded in middles or in the trailing text
    /// pass through verbatim.
    pub fn parse(raw: &'a str) -> Result<Self, ParseError> {
        let trimmed = raw.trim_end_matches(['\r', '\n']);
        if trimmed.trim_start().is_empty() {
            return Err(ParseError::Empty);
        }

        let (rest, source) =
            opt(parse_source)(trimmed).map_err(|_: nom::Err<_>| ParseError::Empty)?;
        let (rest, _) =
            space0::<_, nom::error::Error<&str>>(rest).map_err(|_| ParseError::MissingCommand)?;
        let (rest, command) = parse_command(rest).map_err(|_| ParseError::MissingCommand)?;

        let mut params: Vec<&str> = Vec::new();
        let mut rest = rest;
        while let Some(after_space) = rest.strip_prefix(' ') {
            rest = after_space.trim_start_matches(' ');
            if rest.is_empty() {
                break;
            }
            if let Some(trailing) = rest.strip_prefix(':') {
                params.push(trailing);
                break;
            }
            match rest.find(' ') {
                Some(end) => {
                    params.push(&rest[..end]);
                    rest = &rest[end..];
                }
                None => {
                    params.push(rest);
                    break;
                }
            }
        }

        Ok(Line {
            source,
            command,
            params,
        })
    }

    /// The trailing or last parameter, if any.
    pub fn last_param(&self) -> Option<&'a str> {
        self.params.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_with_prefix() {
        let line = Line::parse(":irc.example.com 001 nick :Welcome").unwrap();
        assert_eq!(line.source, Some("irc.example.com"));
        assert_eq!(line.command, "001");
        assert_eq!(line.params, vec!["nick", "Welcome"]);
    }

    #[test]
    fn test_parse_ping() {
        let line = Line::parse("PING :abc123").unwrap();
        assert_eq!(line.source, None);
        assert_eq!(line.command, "PING");
        assert_eq!(line.params, vec!["abc123"]);
    }

    #[test]
    fn test_parse_privmsg_with_user_prefix() {
        let line = Line::parse(":nick!user@host PRIVMSG #chan :hello world").unwrap();
        assert_eq!(line.source, Some("nick!user@host"));
        assert_eq!(line.command, "PRIVMSG");
        assert_eq!(line.params, vec!["#chan", "hello world"]);
    }

    #[test]
    fn test_parse_join_no_trailing() {
        let line = Line::parse("JOIN #chan").unwrap();
        assert_eq!(line.source, None);
        assert_eq!(line.command, "JOIN");
        assert_eq!(line.params, vec!["#chan"]);
    }

    #[test]
    fn test_parse_bare_command() {
        let line = Line::parse("AWAY").unwrap();
        assert_eq!(line.command, "AWAY");
        assert!(line.params.is_empty());
    }

    #[test]
    fn test_parse_multiple_middles() {
        let line = Line::parse("USER guest 0 * :Real Name").unwrap();
        assert_eq!(line.command, "USER");
        assert_eq!(line.params, vec!["guest", "0", "*", "Real Name"]);
    }

    #[test]
    fn test_parse_empty_trailing() {
        let line = Line::parse("PRIVMSG #chan :").unwrap();
        assert_eq!(line.params, vec!["#chan", ""]);
    }

    #[test]
    fn test_parse_trailing_keeps_colons_and_spaces() {
        let line = Line::parse(":srv 332 me #chan :topic: a b :c").unwrap();
        assert_eq!(line.params, vec!["me", "#chan", "topic: a b :c"]);
    }

    #[test]
    fn test_parse_with_crlf() {
        let line = Line::parse("PING :server\r\n").unwrap();
        assert_eq!(line.command, "PING");
        assert_eq!(line.params, vec!["server"]);
    }

    #[test]
    fn test_parse_run_of_spaces() {
        let line = Line::parse("MODE  #chan   +o  nick").unwrap();
        assert_eq!(line.params, vec!["#chan", "+o", "nick"]);
    }

    #[test]
    fn test_parse_empty_line_fails() {
        assert_eq!(Line::parse(""), Err(ParseError::Empty));
        assert_eq!(Line::parse("\r\n"), Err(ParseError::Empty));
        assert_eq!(Line::parse("   "), Err(ParseError::Empty));
    }

    #[test]
    fn test_parse_prefix_without_command_fails() {
        assert_eq!(Line::parse(":irc.example.com"), Err(ParseError::MissingCommand));
        assert_eq!(Line::parse(":irc.example.com "), Err(ParseError::MissingCommand));
    }

    #[test]
    fn test_last_param() {
        let line = Line::parse("PART #chan :bye now").unwrap();
        assert_eq!(line.last_param(), Some("bye now"));
        let line = Line::parse("AWAY").unwrap();
        assert_eq!(line.last_param(), None);
    }
}
