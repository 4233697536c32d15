//! Built-in validators.
//!
//! | name | aliases | result |
//! |---|---|---|
//! | `required` | | value unchanged; fails when empty |
//! | `fallback(default)` | `default` | `default` when value is empty |
//! | `enum(a,b,..)` | `options` | value unchanged; must be one of the options |
//! | `number` | | normalized numeric string |
//! | `boolean` | | `true` or `false` |
//! | `trim` | | value without surrounding whitespace |

use crate::constants::{FALSE_LITERALS, TRUE_LITERALS};
use crate::error::ValidationError;

/// The fixed set of validators shipped with the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltIn {
    Required,
    Fallback,
    Enum,
    Number,
    Boolean,
    Trim,
}

impl BuiltIn {
    /// Every name (including legacy aliases) a built-in answers to.
    pub const NAMES: &'static [(&'static str, BuiltIn)] = &[
        ("required", BuiltIn::Required),
        ("fallback", BuiltIn::Fallback),
        ("default", BuiltIn::Fallback),
        ("enum", BuiltIn::Enum),
        ("options", BuiltIn::Enum),
        ("number", BuiltIn::Number),
        ("boolean", BuiltIn::Boolean),
        ("trim", BuiltIn::Trim),
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|&(_, builtin)| builtin)
    }

    pub(crate) fn call(
        self,
        name: &str,
        key: &str,
        value: &str,
        args: &[String],
    ) -> Result<String, ValidationError> {
        match self {
            BuiltIn::Required => required(name, key, value),
            BuiltIn::Fallback => fallback(name, key, value, args),
            BuiltIn::Enum => one_of(name, key, value, args),
            BuiltIn::Number => number(name, key, value),
            BuiltIn::Boolean => boolean(name, key, value),
            BuiltIn::Trim => Ok(value.trim().to_string()),
        }
    }
}

fn required(name: &str, key: &str, value: &str) -> Result<String, ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new(
            name,
            key,
            format!("value for {key} cannot be empty"),
        ));
    }
    Ok(value.to_string())
}

fn fallback(
    name: &str,
    key: &str,
    value: &str,
    args: &[String],
) -> Result<String, ValidationError> {
    let Some(default) = args.first() else {
        return Err(ValidationError::new(
            name,
            key,
            format!("no default value was provided for key {key}"),
        ));
    };
    if value.is_empty() {
        return Ok(default.clone());
    }
    Ok(value.to_string())
}

fn one_of(
    name: &str,
    key: &str,
    value: &str,
    options: &[String],
) -> Result<String, ValidationError> {
    if options.is_empty() {
        return Err(ValidationError::new(
            name,
            key,
            format!("no options were provided for key {key}"),
        ));
    }
    if value.is_empty() {
        return Err(ValidationError::new(
            name,
            key,
            format!("missing value for key {key}"),
        ));
    }
    if !options.iter().any(|option| option == value) {
        return Err(ValidationError::new(
            name,
            key,
            format!(
                "invalid value for key {key}. Should be one of these values: {}. Value provided is {value}",
                options.join(", ")
            ),
        ));
    }
    Ok(value.to_string())
}

fn number(name: &str, key: &str, value: &str) -> Result<String, ValidationError> {
    normalize_number(value).ok_or_else(|| {
        ValidationError::new(
            name,
            key,
            format!("invalid value for {key}. Should be numeric: {value}"),
        )
    })
}

fn boolean(name: &str, key: &str, value: &str) -> Result<String, ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new(
            name,
            key,
            format!("empty value cannot be processed as boolean for key {key}"),
        ));
    }
    let lower = value.to_ascii_lowercase();
    if TRUE_LITERALS.contains(&lower.as_str()) {
        Ok("true".to_string())
    } else if FALSE_LITERALS.contains(&lower.as_str()) {
        Ok("false".to_string())
    } else {
        Err(ValidationError::new(
            name,
            key,
            format!("invalid value for {key}. Should be boolean: {value}"),
        ))
    }
}

/// Decimal literal: optional sign, digits with optional fraction, optional exponent.
fn is_numeric_literal(s: &str) -> bool {
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());

    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(idx) => (&unsigned[..idx], Some(&unsigned[idx + 1..])),
        None => (unsigned, None),
    };
    let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    if (int.is_empty() && frac.is_empty()) || !all_digits(int) || !all_digits(frac) {
        return false;
    }
    match exponent {
        None => true,
        Some(exp) => {
            let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            !exp.is_empty() && all_digits(exp)
        }
    }
}

fn normalize_number(value: &str) -> Option<String> {
    if !is_numeric_literal(value) {
        return None;
    }
    if let Ok(int) = value.parse::<i64>() {
        return Some(int.to_string());
    }
    let float: f64 = value.parse().ok()?;
    float.is_finite().then(|| float.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, value: &str, args: &[&str]) -> Result<String, ValidationError> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        BuiltIn::from_name(name)
            .expect("known built-in")
            .call(name, "KEY", value, &args)
    }

    #[test]
    fn test_required() {
        assert_eq!(call("required", "x", &[]).unwrap(), "x");
        let err = call("required", "", &[]).unwrap_err();
        assert_eq!(err.validator, "required");
        assert_eq!(err.to_string(), "[required]: value for KEY cannot be empty");
    }

    #[test]
    fn test_fallback() {
        assert_eq!(call("fallback", "", &["dev"]).unwrap(), "dev");
        assert_eq!(call("fallback", "prod", &["dev"]).unwrap(), "prod");
        assert!(call("fallback", "", &[]).is_err());
        assert!(call("fallback", "prod", &[]).is_err());
    }

    #[test]
    fn test_default_alias_reports_its_own_name() {
        let err = call("default", "", &[]).unwrap_err();
        assert_eq!(err.validator, "default");
    }

    #[test]
    fn test_enum() {
        assert_eq!(call("enum", "dev", &["dev", "prod"]).unwrap(), "dev");
        assert!(call("enum", "", &["dev", "prod"]).is_err());
        assert!(call("enum", "dev", &[]).is_err());

        let err = call("enum", "qa", &["dev", "prod"]).unwrap_err();
        assert!(err.message.contains("dev, prod"));
        assert!(err.message.contains("Value provided is qa"));
    }

    #[test]
    fn test_number() {
        assert_eq!(call("number", "42", &[]).unwrap(), "42");
        assert_eq!(call("number", "-7", &[]).unwrap(), "-7");
        assert_eq!(call("number", "+5", &[]).unwrap(), "5");
        assert_eq!(call("number", "042", &[]).unwrap(), "42");
        assert_eq!(call("number", "1.50", &[]).unwrap(), "1.5");
        assert_eq!(call("number", "1e3", &[]).unwrap(), "1000");
        assert_eq!(call("number", ".5", &[]).unwrap(), "0.5");
    }

    #[test]
    fn test_number_rejects_non_numeric() {
        for value in ["abc", "", " 42", "4 2", "1e", "e3", ".", "inf", "NaN", "0x10", "1e999"] {
            assert!(call("number", value, &[]).is_err(), "{value:?} should fail");
        }
    }

    #[test]
    fn test_boolean() {
        for value in ["true", "TRUE", "1", "yes", "On"] {
            assert_eq!(call("boolean", value, &[]).unwrap(), "true");
        }
        for value in ["false", "0", "No", "off"] {
            assert_eq!(call("boolean", value, &[]).unwrap(), "false");
        }
        assert!(call("boolean", "", &[]).is_err());
        assert!(call("boolean", "maybe", &[]).is_err());
    }

    #[test]
    fn test_trim() {
        assert_eq!(call("trim", "  padded\t", &[]).unwrap(), "padded");
        assert_eq!(call("trim", "   ", &[]).unwrap(), "");
    }
}
