//! Position scanning over raw command line text.
//!
//! Unlike [`CommandLine`](super::CommandLine) nothing here re-tokenizes:
//! edits cut byte ranges out of the original string and leave the
//! surrounding whitespace exactly as it was.

/// Byte offsets of one `arg value` expression inside a command line.
///
/// `value_begin..value_end` excludes the quotes of a quoted value;
/// `expression_end` is the first byte after the value including its closing
/// quote. Spaces after the expression are not part of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgBounds {
    pub arg_begin: usize,
    pub arg_end: usize,
    pub value_begin: usize,
    pub value_end: usize,
    pub expression_end: usize,
}

impl ArgBounds {
    #[inline]
    pub fn has_value(&self) -> bool {
        self.value_end > self.value_begin
    }

    pub fn value<'a>(&self, command_line: &'a str) -> &'a str {
        &command_line[self.value_begin..self.value_end]
    }
}

/// Locate the first literal occurrence of `arg` and the value following it.
///
/// Spaces between the argument and its value are skipped. A value opening
/// with `"` runs to the next `"` (or the end of input); any other value runs
/// to the next space. An argument at the very end yields an empty value.
pub fn find_bounds(command_line: &str, arg: &str) -> Option<ArgBounds> {
    if arg.is_empty() {
        return None;
    }
    let arg_begin = command_line.find(arg)?;
    let arg_end = arg_begin + arg.len();
    let bytes = command_line.as_bytes();

    let mut value_begin = arg_end;
    while bytes.get(value_begin) == Some(&b' ') {
        value_begin += 1;
    }

    let (value_begin, value_end, expression_end) = if bytes.get(value_begin) == Some(&b'"') {
        let inner = value_begin + 1;
        match nth_index_of(command_line, '"', value_begin, 1) {
            Some(close) => (inner, close, close + 1),
            None => (inner, command_line.len(), command_line.len()),
        }
    } else {
        let end = command_line[value_begin..]
            .find(' ')
            .map_or(command_line.len(), |i| value_begin + i);
        (value_begin, end, end)
    };

    Some(ArgBounds {
        arg_begin,
        arg_end,
        value_begin,
        value_end,
        expression_end,
    })
}

/// Cut each named argument and its value out of `command_line`.
///
/// Names are processed in order against the already edited text; names that
/// do not occur are skipped. Whitespace on either side of a removed
/// expression stays, so `-f -i "x" -g` minus `-i` is `-f  -g`.
pub fn remove_arg_and_value(command_line: &str, args: &[&str]) -> String {
    let mut out = command_line.to_owned();
    for arg in args {
        if let Some(b) = find_bounds(&out, arg) {
            out.replace_range(b.arg_begin..b.expression_end, "");
        }
    }
    out
}

/// Value following the first occurrence of `arg`, quotes removed.
///
/// `None` when the argument is absent or has nothing after it.
pub fn arg_value(command_line: &str, arg: &str) -> Option<String> {
    let bounds = find_bounds(command_line, arg)?;
    bounds
        .has_value()
        .then(|| bounds.value(command_line).to_owned())
}

/// Byte index of the `nth` occurrence of `needle` strictly after `from`.
///
/// Useful to find a matching closing quote: `nth_index_of(s, '"', open, 1)`.
pub fn nth_index_of(input: &str, needle: char, from: usize, nth: usize) -> Option<usize> {
    let mut idx = from;
    for _ in 0..nth {
        let start = idx + input.get(idx..)?.chars().next()?.len_utf8();
        idx = start + input[start..].find(needle)?;
    }
    Some(idx)
}

#[cfg(test)]
#[path = "scanner_tests.rs"]
mod tests;
