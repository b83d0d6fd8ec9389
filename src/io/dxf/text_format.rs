//! Removal of TEXT/MTEXT inline formatting.
//!
//! MTEXT values carry rich-text switches (`\P`, `{\fArial|b0;...}`,
//! `\H2.5x;`, ...) and both TEXT and MTEXT carry `%%` control codes. A
//! callout such as `20 {\C1;%%c}12` must read as `20 Ø12` before the
//! annotation recognizers see it.

/// Strip formatting and decode control codes, collapsing whitespace runs.
pub fn clean_text(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '\\' => i = clean_escape(&chars, i + 1, &mut out),
            '{' | '}' => i += 1,
            '%' if chars.get(i + 1) == Some(&'%') => {
                i = clean_control_code(&chars, i + 2, &mut out)
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Handle the MTEXT switch starting at `i` (just after the backslash).
/// Returns the index of the first character after the switch.
fn clean_escape(chars: &[char], i: usize, out: &mut String) -> usize {
    let Some(&switch) = chars.get(i) else {
        return i;
    };
    match switch {
        // paragraph, column and wrap breaks, non-breaking space
        'P' | 'X' | 'N' | '~' => {
            out.push(' ');
            i + 1
        }
        '\\' | '{' | '}' => {
            out.push(switch);
            i + 1
        }
        'L' | 'l' | 'O' | 'o' | 'K' | 'k' => i + 1,
        'A' | 'C' | 'c' | 'F' | 'f' | 'H' | 'Q' | 'T' | 'W' | 'p' => skip_argument(chars, i + 1),
        'S' => {
            let end = skip_argument(chars, i + 1);
            let stop = if chars.get(end - 1) == Some(&';') { end - 1 } else { end };
            for &c in &chars[i + 1..stop] {
                out.push(if c == '^' || c == '#' { '/' } else { c });
            }
            end
        }
        'U' if chars.get(i + 1) == Some(&'+') => match decode_hex(chars, i + 2, 4) {
            Some(c) => {
                out.push(c);
                i + 6
            }
            None => i + 1,
        },
        // \M+nXXXX double-byte shape codes carry no usable text
        'M' if chars.get(i + 1) == Some(&'+') => (i + 7).min(chars.len()),
        other => {
            out.push(other);
            i + 1
        }
    }
}

/// Skip a `;`-terminated switch argument; an unterminated one runs to the end.
fn skip_argument(chars: &[char], from: usize) -> usize {
    chars[from.min(chars.len())..]
        .iter()
        .position(|&c| c == ';')
        .map_or(chars.len(), |p| from + p + 1)
}

fn decode_hex(chars: &[char], from: usize, len: usize) -> Option<char> {
    let digits: String = chars.get(from..from + len)?.iter().collect();
    u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32)
}

/// Handle the `%%` control code whose selector starts at `i`.
fn clean_control_code(chars: &[char], i: usize, out: &mut String) -> usize {
    match chars.get(i).copied() {
        Some('c' | 'C') => {
            out.push('Ø');
            i + 1
        }
        Some('d' | 'D') => {
            out.push('°');
            i + 1
        }
        Some('p' | 'P') => {
            out.push('±');
            i + 1
        }
        Some('%') => {
            out.push('%');
            i + 1
        }
        // %%nnn: character by decimal code
        Some(c) if c.is_ascii_digit() => {
            let digits: String = chars[i..]
                .iter()
                .take(3)
                .take_while(|c| c.is_ascii_digit())
                .collect();
            if let Some(ch) = digits.parse::<u32>().ok().and_then(char::from_u32) {
                out.push(ch);
            }
            i + digits.len()
        }
        // %%o / %%u overline and underline toggles
        Some(_) => i + 1,
        None => i,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(clean_text("20 Ø12 L=340"), "20 Ø12 L=340");
    }

    #[test]
    fn test_paragraph_breaks_become_spaces() {
        assert_eq!(clean_text("S101\\P20Ø12"), "S101 20Ø12");
        assert_eq!(clean_text("a\\~b"), "a b");
    }

    #[test]
    fn test_formatting_groups_removed() {
        assert_eq!(clean_text("{\\fArial|b1|i0;20 Ø}12"), "20 Ø12");
        assert_eq!(clean_text("{\\H2.5x;\\C1;14} adet Q16"), "14 adet Q16");
        assert_eq!(clean_text("\\LØ8/15\\l"), "Ø8/15");
    }

    #[test]
    fn test_escaped_literals_kept() {
        assert_eq!(clean_text("a\\{b\\}c\\\\d"), "a{b}c\\d");
    }

    #[test]
    fn test_stacked_fraction() {
        assert_eq!(clean_text("Ø\\S8^15;"), "Ø8/15");
        assert_eq!(clean_text("\\S1#2;"), "1/2");
    }

    #[test]
    fn test_control_codes() {
        assert_eq!(clean_text("20%%c12"), "20Ø12");
        assert_eq!(clean_text("20%%C12"), "20Ø12");
        assert_eq!(clean_text("%%216 8/15"), "Ø 8/15");
        assert_eq!(clean_text("90%%d %%p5 100%%%"), "90° ±5 100%");
        assert_eq!(clean_text("%%uS101%%u"), "S101");
    }

    #[test]
    fn test_unicode_escape() {
        assert_eq!(clean_text("\\U+22058/15"), "∅8/15");
        assert_eq!(clean_text("\\U+00D812"), "Ø12");
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(clean_text("  20\n\tØ12  "), "20 Ø12");
    }

    #[test]
    fn test_unterminated_switch() {
        assert_eq!(clean_text("Ø12\\H2.5"), "Ø12");
        assert_eq!(clean_text("trailing\\"), "trailing");
    }
}
