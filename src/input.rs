use crate::error::LoadError;
use crate::models::EquationSet;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Parse an equation set from JSON or line-oriented text.
///
/// JSON input is an object mapping names to expressions. Text input has one
/// `NAME = expression` per line; blank lines and `#` comments are skipped.
/// A name defined twice is rejected in both formats.
pub fn parse_equations(text: &str) -> Result<EquationSet, LoadError> {
    if text.trim_start().starts_with('{') {
        parse_json(text)
    } else {
        parse_lines(text)
    }
}

/// Load an equation set from `path`, or from stdin when `path` is `-`.
pub fn load_equations(path: &Path) -> Result<EquationSet, LoadError> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(path)?
    };

    let equations = parse_equations(&text)?;
    tracing::debug!(path = %path.display(), equations = equations.len(), "equations loaded");
    Ok(equations)
}

/// Names are the spellings a variable token can take: uppercase ASCII letters.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_uppercase())
}

fn parse_lines(text: &str) -> Result<EquationSet, LoadError> {
    let mut equations = EquationSet::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((name, expression)) = trimmed.split_once('=') else {
            return Err(LoadError::Syntax {
                line,
                content: trimmed.to_string(),
            });
        };
        let (name, expression) = (name.trim(), expression.trim());

        if !is_valid_name(name) {
            return Err(LoadError::InvalidName {
                line,
                name: name.to_string(),
            });
        }
        if expression.is_empty() {
            return Err(LoadError::EmptyExpression {
                line,
                name: name.to_string(),
            });
        }
        if equations
            .insert(name.to_string(), expression.to_string())
            .is_some()
        {
            return Err(LoadError::DuplicateEquation {
                line,
                name: name.to_string(),
            });
        }
    }

    Ok(equations)
}

fn parse_json(text: &str) -> Result<EquationSet, LoadError> {
    let EquationPairs(pairs) = serde_json::from_str(text)?;

    let mut equations = EquationSet::new();
    for (name, expression) in pairs {
        if !is_valid_name(&name) {
            return Err(LoadError::InvalidKey(name));
        }
        if equations.contains_key(&name) {
            return Err(LoadError::DuplicateKey(name));
        }
        equations.insert(name, expression);
    }
    Ok(equations)
}

/// Object entries in document order, repeated keys included
struct EquationPairs(Vec<(String, String)>);

impl<'de> Deserialize<'de> for EquationPairs {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PairsVisitor;

        impl<'de> Visitor<'de> for PairsVisitor {
            type Value = EquationPairs;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping equation names to expressions")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, String>()? {
                    pairs.push(entry);
                }
                Ok(EquationPairs(pairs))
            }
        }

        deserializer.deserialize_map(PairsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_lines() {
        let text = "\
# canonical sample
A = B+2
B = C+5

C = 1
D = A+B
";
        let equations = parse_equations(text).unwrap();
        assert_eq!(equations.len(), 4);
        assert_eq!(equations["A"], "B+2");
        assert_eq!(equations["D"], "A+B");
    }

    #[test]
    fn test_expression_may_contain_equals() {
        let equations = parse_equations("A = B == C").unwrap();
        assert_eq!(equations["A"], "B == C");
    }

    #[test]
    fn test_parse_json() {
        let equations = parse_equations(r#"{"A": "B+1", "B": "2"}"#).unwrap();
        assert_eq!(equations["A"], "B+1");
        assert_eq!(equations["B"], "2");
    }

    #[test]
    fn test_json_value_must_be_string() {
        let result = parse_equations(r#"{"A": 1}"#);
        assert!(matches!(result, Err(LoadError::Json(_))));
    }

    #[test]
    fn test_json_duplicate_key() {
        let result = parse_equations(r#"{"A": "1", "A": "B+2"}"#);
        assert!(matches!(
            result,
            Err(LoadError::DuplicateKey(ref name)) if name == "A"
        ));
    }

    #[test]
    fn test_json_trailing_text() {
        let result = parse_equations(r#"{"A": "1"} trailing"#);
        assert!(matches!(result, Err(LoadError::Json(_))));
    }

    #[test]
    fn test_missing_equals() {
        let result = parse_equations("A = 1\nB 2");
        assert!(matches!(result, Err(LoadError::Syntax { line: 2, .. })));
    }

    #[test]
    fn test_invalid_name() {
        for text in ["a = 1", "A1 = 2", " = 3", "A_B = 4"] {
            assert!(
                matches!(parse_equations(text), Err(LoadError::InvalidName { line: 1, .. })),
                "{text}"
            );
        }
        assert!(matches!(
            parse_equations(r#"{"x": "1"}"#),
            Err(LoadError::InvalidKey(ref name)) if name == "x"
        ));
    }

    #[test]
    fn test_duplicate_name() {
        let result = parse_equations("A = 1\nA = 2");
        assert!(matches!(
            result,
            Err(LoadError::DuplicateEquation { line: 2, ref name }) if name == "A"
        ));
    }

    #[test]
    fn test_empty_expression() {
        let result = parse_equations("A =   ");
        assert!(matches!(result, Err(LoadError::EmptyExpression { line: 1, .. })));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "A = B+1").unwrap();
        writeln!(file, "B = 2").unwrap();

        let equations = load_equations(file.path()).unwrap();
        assert_eq!(equations.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_equations(Path::new("/definitely/not/here.eq"));
        assert!(matches!(result, Err(LoadError::Io(_))));
    }

    #[test]
    fn test_is_valid_name() {
        assert!(is_valid_name("ABC"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("Abc"));
    }
}
