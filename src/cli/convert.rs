//! Batch conversion of MeX expressions

use std::io::BufRead;

use serde_json::json;

use super::CliError;
use crate::{error::MexError, transpiler::Transpiler};

/// Outcome of converting one expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertRecord {
    pub input: String,
    pub result: Result<String, MexError>,
}

impl ConvertRecord {
    /// `{"input","latex"}` on success, `{"input","error":{"message","span"}}`
    /// on failure.
    pub fn to_json(&self) -> serde_json::Value {
        match &self.result {
            Ok(latex) => json!({
                "input": self.input,
                "latex": latex,
            }),
            Err(err) => {
                let span = err
                    .span()
                    .map(|s| json!({ "start": s.start, "end": s.end }));
                json!({
                    "input": self.input,
                    "error": {
                        "message": err.message(),
                        "span": span,
                    },
                })
            }
        }
    }
}

/// Converts every input through one transpiler, so repeats hit its cache.
pub fn convert_all<I, S>(transpiler: &Transpiler, inputs: I) -> Vec<ConvertRecord>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    inputs
        .into_iter()
        .map(|input| {
            let input = input.into();
            let result = transpiler.transpile(&input);
            ConvertRecord { input, result }
        })
        .collect()
}

/// One expression per non-blank line.
pub fn read_expressions(reader: impl BufRead) -> Result<Vec<String>, CliError> {
    let mut expressions = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if !line.trim().is_empty() {
            expressions.push(line);
        }
    }
    if expressions.is_empty() {
        return Err(CliError::NoInput);
    }
    Ok(expressions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Span;

    #[test]
    fn test_repeated_lines_hit_cache() {
        let transpiler = Transpiler::new();
        let records = convert_all(&transpiler, ["x^2", "alpha", "x^2"]);

        assert_eq!(records.len(), 3);
        assert_eq!(records[2].result, Ok("x^{2}".to_string()));
        assert_eq!(transpiler.stats().hits, 1);
    }

    #[test]
    fn test_json_shapes() {
        let transpiler = Transpiler::new();
        let records = convert_all(&transpiler, ["1/2", "l{{x"]);

        assert_eq!(
            records[0].to_json(),
            json!({"input": "1/2", "latex": "\\frac{1}{2}"})
        );

        let error = records[1].to_json();
        assert_eq!(error["error"]["message"], "Unclosed range mode: l{{");
        let span = Span::new(0, 4);
        assert_eq!(error["error"]["span"]["start"], span.start);
        assert_eq!(error["error"]["span"]["end"], span.end);
    }

    #[test]
    fn test_read_expressions_skips_blank_lines() {
        let input = "a+b\n\n   \nsqrt(x)\n";
        let lines = read_expressions(input.as_bytes()).unwrap();
        assert_eq!(lines, vec!["a+b", "sqrt(x)"]);

        assert!(matches!(
            read_expressions("\n\n".as_bytes()),
            Err(CliError::NoInput)
        ));
    }
}
