use std::{fmt, iter::Peekable, str::CharIndices};

/// One argument of a command line.
///
/// `raw` keeps the surrounding quotes of a quoted argument; [`value`]
/// strips them.
///
/// [`value`]: CommandToken::value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandToken {
    raw: String,
    quoted: bool,
}

impl CommandToken {
    /// Unquoted argument. `raw` must not contain spaces to survive a re-parse.
    pub fn plain(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            quoted: false,
        }
    }

    /// Argument wrapped in double quotes, e.g. a path with spaces.
    pub fn quoted(value: &str) -> Self {
        Self {
            raw: format!("\"{value}\""),
            quoted: true,
        }
    }

    #[inline]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[inline]
    pub fn is_quoted(&self) -> bool {
        self.quoted
    }

    /// Argument text without surrounding quotes.
    pub fn value(&self) -> &str {
        if !self.quoted {
            return &self.raw;
        }
        let inner = &self.raw[1..];
        // An unterminated quote runs to the end of input and has no closing mark.
        inner.strip_suffix('"').unwrap_or(inner)
    }

    /// Exact match on either the unquoted value or the quoted literal.
    #[inline]
    fn matches(&self, name: &str) -> bool {
        self.value() == name || self.raw == name
    }
}

/// A command line split into arguments.
///
/// Arguments are separated by runs of spaces. An argument starting with `"`
/// extends to the next `"` (no escapes; an unterminated quote takes the rest
/// of the input). Rendering joins arguments with a single space, so original
/// spacing is not preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    tokens: Vec<CommandToken>,
}

struct Scanner<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    fn next_token(&mut self) -> Option<CommandToken> {
        // Skip separators.
        while let Some(&(_, ' ')) = self.chars.peek() {
            self.chars.next();
        }

        let (start, first) = self.chars.next()?;
        let mut end = start + first.len_utf8();

        if first == '"' {
            for (i, c) in self.chars.by_ref() {
                end = i + c.len_utf8();
                if c == '"' {
                    break;
                }
            }
            return Some(CommandToken {
                raw: self.input[start..end].to_owned(),
                quoted: true,
            });
        }

        while let Some(&(i, c)) = self.chars.peek() {
            if c == ' ' {
                break;
            }
            end = i + c.len_utf8();
            self.chars.next();
        }

        Some(CommandToken::plain(&self.input[start..end]))
    }
}

impl CommandLine {
    pub fn parse(command_line: &str) -> Self {
        let mut scanner = Scanner::new(command_line);
        let mut tokens = Vec::with_capacity(16);
        while let Some(token) = scanner.next_token() {
            tokens.push(token);
        }
        Self { tokens }
    }

    /// Normalise whitespace: trim and collapse separator runs to one space.
    pub fn clean(command_line: &str) -> String {
        Self::parse(command_line).render()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(&token.raw);
        }
        out
    }

    #[inline]
    pub fn tokens(&self) -> &[CommandToken] {
        &self.tokens
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    // retrieval

    pub fn first(&self) -> Option<&str> {
        self.tokens.first().map(CommandToken::value)
    }

    pub fn last(&self) -> Option<&str> {
        self.tokens.last().map(CommandToken::value)
    }

    pub fn nth(&self, n: usize) -> Option<&str> {
        self.tokens.get(n).map(CommandToken::value)
    }

    /// Value of the argument right after the first occurrence of `name`.
    pub fn token_after(&self, name: &str) -> Option<&str> {
        let idx = self.index_of(name)?;
        self.nth(idx + 1)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.tokens.iter().position(|t| t.matches(name))
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    // removal; each returns false when nothing was removed

    /// Remove the first occurrence of `name`.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.index_of(name) {
            Some(idx) => {
                self.tokens.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Remove `name` together with the argument that follows it.
    ///
    /// Leaves the command line untouched when either one is missing.
    pub fn remove_with_following(&mut self, name: &str) -> bool {
        match self.index_of(name) {
            Some(idx) if idx + 1 < self.tokens.len() => {
                self.tokens.drain(idx..=idx + 1);
                true
            }
            _ => false,
        }
    }

    pub fn remove_at(&mut self, n: usize) -> bool {
        if n < self.tokens.len() {
            self.tokens.remove(n);
            true
        } else {
            false
        }
    }

    pub fn remove_first(&mut self) -> bool {
        self.remove_at(0)
    }

    pub fn remove_last(&mut self) -> bool {
        self.tokens.pop().is_some()
    }

    // insertion

    pub fn push(&mut self, token: CommandToken) {
        self.tokens.push(token);
    }

    /// Insert before position `n`; `n == len()` appends. Out of range is refused.
    pub fn insert(&mut self, n: usize, token: CommandToken) -> bool {
        if n <= self.tokens.len() {
            self.tokens.insert(n, token);
            true
        } else {
            false
        }
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
#[path = "tokenizer_tests.rs"]
mod tests;
