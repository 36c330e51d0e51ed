use super::{CommandError, Marker, ParsedCommand};

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ',' | '.' | '_' | '+' | ':' | '@' | '%' | '/' | '-')
}

fn is_command_char(c: char) -> bool {
    is_word_char(c) || c == '?'
}

/// Split a trailing `**`/`***` off a token. `***` wins over `**`.
fn split_marker(token: &str) -> (&str, Option<Marker>) {
    if let Some(rest) = token.strip_suffix(Marker::Ignore.as_str()) {
        (rest, Some(Marker::Ignore))
    } else if let Some(rest) = token.strip_suffix(Marker::Break.as_str()) {
        (rest, Some(Marker::Break))
    } else {
        (token, None)
    }
}

/// Validate a raw command line and split it into command token, arguments
/// and an optional trailing marker.
///
/// Tokens are separated by spaces. The command token may use letters, digits,
/// `? , . _ + : @ % / -`; arguments the same set without `?`. A `**` or `***`
/// is only accepted at the very end of the line, either glued to the last
/// argument or on its own.
pub fn tokenize(raw: &str) -> Result<ParsedCommand, CommandError> {
    if raw.chars().any(|c| c != ' ' && (c.is_control() || !c.is_ascii())) {
        return Err(CommandError::InvalidInput);
    }

    let mut tokens: Vec<&str> = raw.split(' ').filter(|t| !t.is_empty()).collect();
    if tokens.is_empty() {
        return Err(CommandError::InvalidInput);
    }

    let mut marker = None;
    if tokens.len() > 1 {
        let last = tokens.len() - 1;
        let (rest, found) = split_marker(tokens[last]);
        marker = found;
        if rest.is_empty() {
            tokens.pop();
        } else {
            tokens[last] = rest;
        }
    }

    let token = tokens[0];
    if !token.chars().all(is_command_char) {
        return Err(CommandError::InvalidInput);
    }

    let args = &tokens[1..];
    if !args.iter().all(|arg| arg.chars().all(is_word_char)) {
        return Err(CommandError::InvalidInput);
    }

    Ok(ParsedCommand {
        token: token.to_string(),
        args: args.iter().map(|arg| arg.to_string()).collect(),
        marker,
    })
}
