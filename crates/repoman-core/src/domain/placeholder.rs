//! Placeholder substitution for license templates.
//!
//! The placeholder set is closed: `{year}` and `{name}`. Anything else in
//! braces is an error rather than being silently passed through.
//!
//! | Token    | Meaning                      |
//! |----------|------------------------------|
//! | `{year}` | current calendar year        |
//! | `{name}` | author / organization name   |
//! | `{{`     | literal `{`                  |
//! | `}}`     | literal `}`                  |

use std::fmt;

use thiserror::Error;

/// Recognized placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Year,
    Name,
}

impl Placeholder {
    pub const ALL: [Placeholder; 2] = [Placeholder::Year, Placeholder::Name];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Name => "name",
        }
    }

    fn parse(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == token)
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.as_str())
    }
}

/// Values substituted into a template body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionValues {
    pub year: i32,
    pub name: String,
}

impl SubstitutionValues {
    pub fn new(year: i32, name: impl Into<String>) -> Self {
        Self {
            year,
            name: name.into(),
        }
    }

    fn value_of(&self, placeholder: Placeholder) -> String {
        match placeholder {
            Placeholder::Year => self.year.to_string(),
            Placeholder::Name => self.name.clone(),
        }
    }
}

/// The offending token of a malformed template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized placeholder '{token}'")]
pub struct MalformedPlaceholder {
    pub token: String,
}

impl MalformedPlaceholder {
    fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

/// Resolve every placeholder in `body`.
///
/// Fails on the first unknown `{token}`, an unclosed `{`, or a lone `}`.
pub fn substitute(body: &str, values: &SubstitutionValues) -> Result<String, MalformedPlaceholder> {
    let mut out = String::with_capacity(body.len() + values.name.len());
    let mut chars = body.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        match c {
            '{' if chars.peek().map(|&(_, n)| n) == Some('{') => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let rest = &body[start + 1..];
                let Some(len) = rest.find('}') else {
                    return Err(MalformedPlaceholder::new(&body[start..]));
                };
                let token = &rest[..len];
                let placeholder = Placeholder::parse(token)
                    .ok_or_else(|| MalformedPlaceholder::new(format!("{{{token}}}")))?;
                out.push_str(&values.value_of(placeholder));

                // Skip the token and its closing brace.
                for _ in 0..token.chars().count() + 1 {
                    chars.next();
                }
            }
            '}' if chars.peek().map(|&(_, n)| n) == Some('}') => {
                chars.next();
                out.push('}');
            }
            '}' => return Err(MalformedPlaceholder::new("}")),
            other => out.push(other),
        }
    }

    Ok(out)
}
