mod pipeline;
mod pull;

use quickcheck::{Arbitrary, Gen};

use crate::{ParseError, ParseEvent, ParserOptions, PushParser};

/// Parses a whole document in one feed and returns every event.
pub(crate) fn parse(doc: &[u8]) -> Result<Vec<ParseEvent>, ParseError> {
    parse_with(doc, ParserOptions::default())
}

pub(crate) fn parse_with(
    doc: &[u8],
    options: ParserOptions,
) -> Result<Vec<ParseEvent>, ParseError> {
    let mut parser = PushParser::new(Vec::new(), options);
    parser.feed(doc)?;
    parser.close()?;
    Ok(parser.into_sink())
}

/// A generator-friendly JSON value, rendered to text through `serde_json`
/// so string escaping is always correct.
#[derive(Debug, Clone)]
pub(crate) enum ArbJson {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(Vec<ArbJson>),
    Object(Vec<(String, ArbJson)>),
}

impl ArbJson {
    fn gen_depth(g: &mut Gen, depth: usize) -> Self {
        let scalar_only = depth == 0;
        match u8::arbitrary(g) % if scalar_only { 5 } else { 7 } {
            0 => ArbJson::Null,
            1 => ArbJson::Bool(bool::arbitrary(g)),
            2 => ArbJson::Int(i64::arbitrary(g)),
            3 => {
                let f = f64::arbitrary(g);
                ArbJson::Float(if f.is_finite() { f } else { 0.0 })
            }
            4 => ArbJson::Str(String::arbitrary(g)),
            5 => {
                let len = usize::arbitrary(g) % 4;
                ArbJson::Array((0..len).map(|_| Self::gen_depth(g, depth - 1)).collect())
            }
            _ => {
                let len = usize::arbitrary(g) % 4;
                ArbJson::Object(
                    (0..len)
                        .map(|_| (String::arbitrary(g), Self::gen_depth(g, depth - 1)))
                        .collect(),
                )
            }
        }
    }

    fn to_serde(&self) -> serde_json::Value {
        match self {
            ArbJson::Null => serde_json::Value::Null,
            ArbJson::Bool(b) => serde_json::Value::Bool(*b),
            ArbJson::Int(i) => serde_json::Value::from(*i),
            ArbJson::Float(f) => {
                serde_json::Number::from_f64(*f).map_or(serde_json::Value::Null, Into::into)
            }
            ArbJson::Str(s) => serde_json::Value::from(s.clone()),
            ArbJson::Array(items) => {
                serde_json::Value::Array(items.iter().map(ArbJson::to_serde).collect())
            }
            ArbJson::Object(members) => serde_json::Value::Object(
                members
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_serde()))
                    .collect(),
            ),
        }
    }

    pub(crate) fn render(&self) -> String {
        self.to_serde().to_string()
    }
}

impl Arbitrary for ArbJson {
    fn arbitrary(g: &mut Gen) -> Self {
        Self::gen_depth(g, 3)
    }
}
