//! Field splitting for case rows.
//!
//! A comma separates fields only outside quoted strings and outside `{...}`
//! and `[...]` literals, so JSON strings, arrays and objects may contain
//! commas of their own.

/// Split a row into raw (untrimmed) field slices.
pub fn split_fields(line: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;
    let mut braces = 0i32;
    let mut brackets = 0i32;

    for (i, c) in line.char_indices() {
        if in_quotes {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_quotes = false;
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            '{' => braces += 1,
            '}' => braces -= 1,
            '[' => brackets += 1,
            ']' => brackets -= 1,
            ',' if braces == 0 && brackets == 0 => {
                fields.push(&line[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    fields.push(&line[start..]);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_fields() {
        assert_eq!(split_fields("1, 2 ,3"), vec!["1", " 2 ", "3"]);
        assert_eq!(split_fields(""), vec![""]);
        assert_eq!(split_fields(",,"), vec!["", "", ""]);
    }

    #[test]
    fn test_quoted_comma() {
        assert_eq!(split_fields(r#""x,y",5"#), vec![r#""x,y""#, "5"]);
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        assert_eq!(
            split_fields(r#""say \"hi, there\"",1"#),
            vec![r#""say \"hi, there\"""#, "1"]
        );
    }

    #[test]
    fn test_nested_literals() {
        assert_eq!(split_fields("[1,2,3],5"), vec!["[1,2,3]", "5"]);
        assert_eq!(
            split_fields(r#"{"a":[1,2],"b":{"c":3}},true"#),
            vec![r#"{"a":[1,2],"b":{"c":3}}"#, "true"]
        );
    }

    #[test]
    fn test_brackets_inside_strings_ignored() {
        assert_eq!(split_fields(r#""[",1"#), vec![r#""[""#, "1"]);
        assert_eq!(split_fields(r#""}",1"#), vec![r#""}""#, "1"]);
    }

    #[test]
    fn test_unbalanced_bracket_swallows_commas() {
        assert_eq!(split_fields("[1,2,3"), vec!["[1,2,3"]);
        assert_eq!(split_fields("],1"), vec!["],1"]);
    }
}
