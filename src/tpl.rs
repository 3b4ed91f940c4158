use crate::error::Error;
use crate::result::Result;
use std::collections::HashMap;

/// Template processor for output names containing `$VARIABLE` or `${VARIABLE}`
pub struct Tpl {
    variables: HashMap<String, String>,
}

impl Tpl {
    pub fn new() -> Self {
        Self {
            variables: HashMap::new(),
        }
    }

    /// Register a variable with its value
    pub fn register<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.variables.insert(key.into(), value.into());
    }

    /// Resolve every variable reference in `input`.
    ///
    /// A `$` not followed by an identifier is kept as is. Referencing a
    /// variable that was never registered is an error.
    pub fn parse(&self, input: &str) -> Result<String> {
        let mut result = String::with_capacity(input.len());
        let mut chars = input.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '$' {
                result.push(c);
                continue;
            }

            let braced = chars.peek() == Some(&'{');
            if braced {
                chars.next();
            }

            let mut key = String::new();
            while let Some(&next) = chars.peek() {
                if next.is_ascii_uppercase() || next.is_ascii_digit() || next == '_' {
                    key.push(next);
                    chars.next();
                } else {
                    break;
                }
            }

            if braced {
                if chars.next_if_eq(&'}').is_none() {
                    return Err(Error::custom(format!("Unterminated variable in '{}'", input)));
                }
            } else if key.is_empty() {
                result.push('$');
                continue;
            }

            let value = self
                .variables
                .get(&key)
                .ok_or_else(|| Error::UnknownVariable(key.clone()))?;
            result.push_str(value);
        }

        Ok(result)
    }
}

impl Default for Tpl {
    fn default() -> Self {
        Self::new()
    }
}
