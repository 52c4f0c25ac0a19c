//! Harvesting glyph class definitions from feature source.
//!
//! Hand-written feature files may already declare kerning classes; those
//! declarations are the only piece of feature syntax this crate interprets.
//! Everything else (rules, blocks, includes) is skipped unvalidated.

use crate::error::FeaParseError;
use crate::Name;

/// Extract `@name = [member ..];` definitions from feature source.
///
/// Returned class names keep their `@` prefix, members keep definition
/// order. A class *reference* (an `@name` not followed by `=`) is skipped,
/// as are comments and quoted strings; a definition that starts and then
/// goes wrong is a hard error.
pub(crate) fn parse_class_definitions(
    text: &str,
) -> Result<Vec<(Name, Vec<Name>)>, FeaParseError> {
    let bytes = text.as_bytes();
    let mut definitions = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        match bytes[pos] {
            b'#' => {
                while pos < bytes.len() && bytes[pos] != b'\n' {
                    pos += 1;
                }
            }
            b'"' => {
                pos += 1;
                while pos < bytes.len() && bytes[pos] != b'"' {
                    pos += 1;
                }
                if pos == bytes.len() {
                    return Err(FeaParseError::UnterminatedString);
                }
                pos += 1;
            }
            b'@' => {
                let ident_start = pos + 1;
                let mut ident_end = ident_start;
                while ident_end < bytes.len() && is_ident_byte(bytes[ident_end]) {
                    ident_end += 1;
                }
                let mut lookahead = ident_end;
                while lookahead < bytes.len() && bytes[lookahead].is_ascii_whitespace() {
                    lookahead += 1;
                }
                if lookahead < bytes.len() && bytes[lookahead] == b'=' {
                    if ident_end == ident_start {
                        return Err(FeaParseError::EmptyClassName);
                    }
                    let class_name = &text[pos..ident_end];
                    let (members, next) = parse_member_list(text, lookahead + 1, class_name)?;
                    definitions.push((Name::new_raw(class_name), members));
                    pos = next;
                } else {
                    pos = ident_end.max(pos + 1);
                }
            }
            _ => pos += 1,
        }
    }
    Ok(definitions)
}

fn is_ident_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'.' || byte == b'_'
}

fn parse_member_list(
    text: &str,
    mut pos: usize,
    class_name: &str,
) -> Result<(Vec<Name>, usize), FeaParseError> {
    let bytes = text.as_bytes();
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    if pos == bytes.len() || bytes[pos] != b'[' {
        return Err(FeaParseError::MissingMemberList(class_name.into()));
    }
    pos += 1;

    let mut members = Vec::new();
    loop {
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if pos == bytes.len() {
            return Err(FeaParseError::UnterminatedMemberList(class_name.into()));
        }
        if bytes[pos] == b']' {
            pos += 1;
            break;
        }
        let start = pos;
        while pos < bytes.len()
            && !bytes[pos].is_ascii_whitespace()
            && bytes[pos] != b']'
            && bytes[pos] != b';'
        {
            pos += 1;
        }
        if pos == start {
            // a stray ';' before the list was closed
            return Err(FeaParseError::UnterminatedMemberList(class_name.into()));
        }
        let member = Name::new(&text[start..pos])
            .map_err(|source| FeaParseError::InvalidMember(class_name.into(), source))?;
        members.push(member);
    }

    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    if pos == bytes.len() || bytes[pos] != b';' {
        return Err(FeaParseError::MissingSemicolon(class_name.into()));
    }
    Ok((members, pos + 1))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(text: &str) -> Vec<(Name, Vec<Name>)> {
        parse_class_definitions(text).unwrap()
    }

    #[test]
    fn simple_definitions() {
        let defs = parse("@MMK_L_A = [A Aacute Agrave];\n@MMK_R_O = [O Q];\n");
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].0, "@MMK_L_A");
        assert_eq!(defs[0].1, vec!["A", "Aacute", "Agrave"]);
        assert_eq!(defs[1].0, "@MMK_R_O");
        assert_eq!(defs[1].1, vec!["O", "Q"]);
    }

    #[test]
    fn multiline_member_list() {
        let defs = parse("@MMK_L_A = [\n    A\n    Aacute\n];\n");
        assert_eq!(defs[0].1, vec!["A", "Aacute"]);
    }

    #[test]
    fn references_and_other_syntax_skipped() {
        let text = "\
feature kern {
    pos @MMK_L_A @MMK_R_O -40;
} kern;
@MMK_L_B = [B];
";
        let defs = parse(text);
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].0, "@MMK_L_B");
    }

    #[test]
    fn comments_and_strings_skipped() {
        let text = "\
# @MMK_L_A = [not a definition
feature name {
    name \"@MMK_L_B = [not one either\";
} name;
@MMK_L_C = [C];
";
        let defs = parse(text);
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].0, "@MMK_L_C");
    }

    #[test]
    fn malformed_definitions_are_errors() {
        assert!(matches!(
            parse_class_definitions("@MMK_L_A = B;"),
            Err(FeaParseError::MissingMemberList(_))
        ));
        assert!(matches!(
            parse_class_definitions("@MMK_L_A = [A B"),
            Err(FeaParseError::UnterminatedMemberList(_))
        ));
        assert!(matches!(
            parse_class_definitions("@MMK_L_A = [A; B]"),
            Err(FeaParseError::UnterminatedMemberList(_))
        ));
        assert!(matches!(
            parse_class_definitions("@MMK_L_A = [A B]"),
            Err(FeaParseError::MissingSemicolon(_))
        ));
        assert!(matches!(
            parse_class_definitions("@ = [A];"),
            Err(FeaParseError::EmptyClassName)
        ));
        assert!(matches!(
            parse_class_definitions("name \"never closed"),
            Err(FeaParseError::UnterminatedString)
        ));
    }

    #[test]
    fn non_kerning_definitions_still_returned() {
        // role filtering happens in the class registry, not here
        let defs = parse("@FIGURES = [zero one two];");
        assert_eq!(defs[0].0, "@FIGURES");
    }
}
