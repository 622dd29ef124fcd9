//! Number type

use super::expected;
use crate::descriptor::{TypeDescriptor, Validation};
use crate::value::Value;

/// Finite number with optional inclusive bounds.
///
/// Numeric strings are coerced into numbers; anything else is left for
/// validation to reject.
#[derive(Debug, Clone, Default)]
pub struct NumberType {
    min: Option<f64>,
    max: Option<f64>,
    integer: bool,
}

impl NumberType {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inclusive lower bound
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Inclusive upper bound
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Reject numbers with a fractional part
    pub fn integer(mut self) -> Self {
        self.integer = true;
        self
    }
}

impl TypeDescriptor for NumberType {
    fn name(&self) -> &str {
        if self.integer {
            "integer"
        } else {
            "number"
        }
    }

    fn validate(&self, value: &Value) -> Validation {
        let n = match value {
            Value::Number(n) => *n,
            other => return Validation::invalid(expected("a number", other)),
        };

        if !n.is_finite() {
            return Validation::invalid("must be a finite number");
        }

        let mut validation = Validation::valid();
        if self.integer && n.fract() != 0.0 {
            validation.merge(Validation::invalid("must be an integer"));
        }
        if let Some(min) = self.min {
            if n < min {
                validation.merge(Validation::invalid(format!(
                    "must be greater than or equal to {}",
                    min
                )));
            }
        }
        if let Some(max) = self.max {
            if n > max {
                validation.merge(Validation::invalid(format!(
                    "must be less than or equal to {}",
                    max
                )));
            }
        }
        validation
    }

    fn coerce(&self, value: Value) -> Value {
        match value {
            Value::String(s) => match s.trim().parse::<f64>() {
                Ok(n) => Value::Number(n),
                Err(_) => Value::String(s),
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_bounds() {
        let ty = NumberType::new().min(0.0).max(150.0);
        assert!(ty.validate(&Value::from(0)).is_valid());
        assert!(ty.validate(&Value::from(150)).is_valid());
        assert_eq!(
            ty.validate(&Value::from(-1)).errors(),
            &["must be greater than or equal to 0"]
        );
        assert_eq!(
            ty.validate(&Value::from(151)).errors(),
            &["must be less than or equal to 150"]
        );
    }

    #[test]
    fn test_number_integer_flag() {
        let ty = NumberType::new().integer();
        assert_eq!(ty.name(), "integer");
        assert!(ty.validate(&Value::from(3)).is_valid());
        assert_eq!(ty.validate(&Value::from(3.5)).errors(), &["must be an integer"]);
    }

    #[test]
    fn test_number_rejects_non_finite() {
        let validation = NumberType::new().validate(&Value::Number(f64::INFINITY));
        assert_eq!(validation.errors(), &["must be a finite number"]);
    }

    #[test]
    fn test_number_coerces_numeric_strings() {
        let ty = NumberType::new();
        assert_eq!(ty.coerce(Value::from(" 42 ")), Value::Number(42.0));
        assert_eq!(ty.coerce(Value::from("abc")), Value::from("abc"));
        assert_eq!(ty.coerce(Value::Null), Value::Null);
    }

    #[test]
    fn test_number_coercion_is_idempotent() {
        let ty = NumberType::new();
        for raw in [Value::from("7.5"), Value::from(7.5), Value::from("x"), Value::Null] {
            let once = ty.coerce(raw);
            let twice = ty.coerce(once.clone());
            assert_eq!(once, twice);
            assert_eq!(ty.validate(&once), ty.validate(&twice));
        }
    }
}
