use super::{Instruction, LineNumber, Program};
use tracing::warn;

/// Tokenize source text. Lines without a leading line number, or that
/// do not look like an instruction, are dropped.
pub fn tokenize(s: &str) -> Program {
    Program::new(s.lines().filter_map(lex_line))
}

/// Split a parameter list on commas that are not inside a quoted run.
/// Quotes and escapes are kept verbatim, fields are trimmed and empty
/// fields are dropped.
pub fn split_params(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut split = vec![];
    let mut build = String::new();
    let mut i = 0;
    while i < chars.len() {
        match quoted_len(&chars[i..]) {
            Some(len) => {
                build.extend(&chars[i..i + len]);
                i += len;
            }
            None => {
                build.push(chars[i]);
                i += 1;
                if chars[i - 1] == ',' {
                    build.pop();
                    split.push(std::mem::take(&mut build));
                }
            }
        }
    }
    split.push(build);
    split
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Length of a complete double-quoted run at the start of `chars`,
/// where `""` stands for one embedded quote.
fn quoted_len(chars: &[char]) -> Option<usize> {
    if chars.first() != Some(&'"') {
        return None;
    }
    let mut i = 1;
    while i < chars.len() {
        if chars[i] == '"' {
            if chars.get(i + 1) == Some(&'"') {
                i += 2;
                continue;
            }
            return Some(i + 1);
        }
        i += 1;
    }
    None
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn lex_line(s: &str) -> Option<Instruction> {
    let s = s.trim_start();
    let digits = s.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let line_number = match s[..digits].parse::<LineNumber>() {
        Ok(n) => n,
        Err(_) => {
            warn!(line = &s[..digits], "line number out of range");
            return None;
        }
    };
    let rest = s[digits..].trim_start();
    let rest = match comment_start(rest) {
        Some(idx) => rest[..idx].trim_end(),
        None => rest,
    };
    let mnemonic_len: usize = rest
        .chars()
        .take_while(|c| is_word_char(*c))
        .map(|c| c.len_utf8())
        .sum();
    if mnemonic_len == 0 {
        return None;
    }
    let mnemonic = &rest[..mnemonic_len];
    let after = &rest[mnemonic_len..];
    let params = match after.chars().next() {
        None => vec![],
        Some(c) if c.is_whitespace() => split_params(after),
        Some(_) => return None,
    };
    let instruction = Instruction::new(line_number, mnemonic, params);
    if instruction.opcode().is_none() {
        warn!(line = line_number, mnemonic, "unknown instruction");
    }
    Some(instruction)
}

/// Byte offset of a trailing `REM ` comment. The marker must begin the
/// text or follow whitespace.
fn comment_start(s: &str) -> Option<usize> {
    let mut prev_whitespace = true;
    for (idx, ch) in s.char_indices() {
        if prev_whitespace && s[idx..].starts_with("REM ") {
            return Some(idx);
        }
        prev_whitespace = ch.is_whitespace();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_quoted_comma() {
        assert_eq!(split_params(r#""a,b",c"#), vec![r#""a,b""#, "c"]);
    }

    #[test]
    fn test_split_trims_and_drops_empty() {
        assert_eq!(split_params(" 1 , ,2,"), vec!["1", "2"]);
        assert!(split_params("").is_empty());
    }

    #[test]
    fn test_split_doubled_quote() {
        assert_eq!(
            split_params(r#""say ""hi, there""", 3"#),
            vec![r#""say ""hi, there""""#, "3"]
        );
    }

    #[test]
    fn test_split_unterminated_quote() {
        assert_eq!(split_params(r#""a,b"#), vec![r#""a"#, "b"]);
    }

    #[test]
    fn test_lex_line_with_comment() {
        let i = lex_line("  10 PUSH 1, 2 REM push two").unwrap();
        assert_eq!(i.line_number(), 10);
        assert_eq!(i.mnemonic(), "PUSH");
        assert_eq!(i.params(), &["1", "2"]);
    }

    #[test]
    fn test_lex_line_drops_noise() {
        assert!(lex_line("").is_none());
        assert!(lex_line("PUSH 1").is_none());
        assert!(lex_line("10 REM only a comment").is_none());
        assert!(lex_line("10 PUSH,1").is_none());
    }

    #[test]
    fn test_lex_line_no_space_after_number() {
        let i = lex_line("20ADD").unwrap();
        assert_eq!(i.line_number(), 20);
        assert_eq!(i.mnemonic(), "ADD");
        assert!(i.params().is_empty());
    }

    #[test]
    fn test_rem_inside_word_is_not_comment() {
        let i = lex_line("10 PUSH \"LOREM IPSUM\"").unwrap();
        assert_eq!(i.params(), &["\"LOREM IPSUM\""]);
    }

    #[test]
    fn test_tokenize_orders_lines() {
        let p = tokenize("30 PRINT\r\n10 PUSH 2,3\n\nstray text\n20 ADD\n");
        let lines: Vec<_> = p.line_numbers().collect();
        assert_eq!(lines, vec![10, 20, 30]);
    }

    #[test]
    fn test_tokenize_keeps_unknown_mnemonic() {
        let p = tokenize("10 FROB 1\n20 EXIT");
        let first = p.get(0).unwrap();
        assert_eq!(first.mnemonic(), "FROB");
        assert_eq!(first.opcode(), None);
        assert_eq!(p.len(), 2);
    }
}
