//! Replacement template expansion.
//!
//! Placeholders follow the usual replace-with-pattern conventions rather than
//! the `regex` crate's own `$name` syntax, so `$1a` means group 1 followed by
//! `a`:
//!
//! | Placeholder | Inserts                                   |
//! |-------------|-------------------------------------------|
//! | `$$`        | a literal `$`                             |
//! | `$&`        | the whole match                           |
//! | `` $` ``    | the text before the match                 |
//! | `$'`        | the text after the match                  |
//! | `$n`, `$nn` | capture group `n` (1-99), empty if unset  |
//! | `$<name>`   | named capture group, empty if unset       |
//!
//! Anything else after `$` is copied literally.

use regex::Captures;

pub(crate) fn expand(template: &str, caps: &Captures<'_>, haystack: &str) -> String {
    let whole = caps.get(0).map_or(0..0, |m| m.range());
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(idx) = rest.find('$') {
        out.push_str(&rest[..idx]);
        let after = &rest[idx + 1..];
        let consumed = match after.as_bytes().first() {
            Some(b'$') => {
                out.push('$');
                1
            }
            Some(b'&') => {
                out.push_str(&haystack[whole.clone()]);
                1
            }
            Some(b'`') => {
                out.push_str(&haystack[..whole.start]);
                1
            }
            Some(b'\'') => {
                out.push_str(&haystack[whole.end..]);
                1
            }
            Some(b'<') => match after.find('>') {
                Some(close) => {
                    if let Some(m) = caps.name(&after[1..close]) {
                        out.push_str(m.as_str());
                    }
                    close + 1
                }
                None => {
                    out.push('$');
                    0
                }
            },
            Some(&d) if d.is_ascii_digit() => {
                let one = (d - b'0') as usize;
                let two = after
                    .as_bytes()
                    .get(1)
                    .filter(|b| b.is_ascii_digit())
                    .map(|&b| one * 10 + (b - b'0') as usize);
                match two {
                    Some(n) if n >= 1 && n < caps.len() => {
                        push_group(&mut out, caps, n);
                        2
                    }
                    _ if one >= 1 && one < caps.len() => {
                        push_group(&mut out, caps, one);
                        1
                    }
                    _ => {
                        out.push('$');
                        0
                    }
                }
            }
            _ => {
                out.push('$');
                0
            }
        };
        rest = &after[consumed..];
    }

    out.push_str(rest);
    out
}

fn push_group(out: &mut String, caps: &Captures<'_>, index: usize) {
    if let Some(m) = caps.get(index) {
        out.push_str(m.as_str());
    }
}
