use std::fmt::Write;
use std::str::FromStr;

use num_format::{CustomFormat, Grouping, ToFormattedString};
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;

use crate::error::RunError;

const MAX_PRECISION: u32 = 28;

/// Display convention for monetary amounts: `1 234,50 €` by default.
#[derive(Debug, Clone)]
pub struct MoneyFormat {
    symbol: String,
    thousands: String,
    decimal: String,
    precision: u32,
    grouping: CustomFormat,
}

impl MoneyFormat {
    pub fn new(
        symbol: &str,
        thousands: &str,
        decimal: &str,
        precision: u32,
    ) -> Result<Self, RunError> {
        if precision > MAX_PRECISION {
            return Err(RunError::Precision { precision });
        }

        let grouping = CustomFormat::builder()
            .grouping(Grouping::Standard)
            .separator(thousands)
            .build()?;

        Ok(Self {
            symbol: symbol.to_string(),
            thousands: thousands.to_string(),
            decimal: decimal.to_string(),
            precision,
            grouping,
        })
    }

    pub fn format(&self, amount: Decimal) -> String {
        let value = amount.round_dp_with_strategy(
            self.precision,
            RoundingStrategy::MidpointAwayFromZero,
        );
        // Scale is at most the precision; missing digits are padded below
        let scale = value.scale();
        let divisor = 10u128.pow(scale);
        let mantissa = value.mantissa();
        let magnitude = mantissa.unsigned_abs();

        let mut buf = String::new();
        if mantissa < 0 {
            buf.push('-');
        }
        buf.push_str(&(magnitude / divisor).to_formatted_string(&self.grouping));
        if self.precision > 0 {
            let digits = if scale > 0 {
                format!("{:0width$}", magnitude % divisor, width = scale as usize)
            } else {
                String::new()
            };
            // Writing to a String cannot fail
            let _ = write!(
                buf,
                "{}{:0<width$}",
                self.decimal,
                digits,
                width = self.precision as usize
            );
        }
        let _ = write!(buf, " {}", self.symbol);
        buf
    }

    /// Reads back a string produced by [`MoneyFormat::format`].
    pub fn parse(&self, text: &str) -> Option<Decimal> {
        let numeral = text.trim().strip_suffix(self.symbol.as_str())?.trim_end();
        let mut plain = numeral.to_string();
        if !self.thousands.is_empty() {
            plain = plain.replace(self.thousands.as_str(), "");
        }
        if self.decimal != "." {
            plain = plain.replace(self.decimal.as_str(), ".");
        }
        Decimal::from_str(&plain).ok()
    }
}

impl Default for MoneyFormat {
    fn default() -> Self {
        Self::new("€", " ", ",", 2).expect("Default money format is valid")
    }
}

/// Decimal value of a JSON number, `None` for every other JSON value.
pub fn decimal_from_json(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => {
            let text = number.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .ok()
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn default_format() {
        let money = MoneyFormat::default();
        assert_eq!(money.format(dec!(30)), "30,00 €");
        assert_eq!(money.format(dec!(1234.5)), "1 234,50 €");
        assert_eq!(money.format(dec!(1234567.891)), "1 234 567,89 €");
        assert_eq!(money.format(Decimal::ZERO), "0,00 €");
    }

    #[test]
    fn rounds_half_up() {
        let money = MoneyFormat::default();
        assert_eq!(money.format(dec!(0.005)), "0,01 €");
        assert_eq!(money.format(dec!(2.675)), "2,68 €");
        assert_eq!(money.format(dec!(2.674)), "2,67 €");
        assert_eq!(money.format(dec!(-2.675)), "-2,68 €");
    }

    #[test]
    fn negative_amounts() {
        let money = MoneyFormat::default();
        assert_eq!(money.format(dec!(-1234.5)), "-1 234,50 €");
        assert_eq!(money.format(dec!(-0.001)), "0,00 €");
    }

    #[test]
    fn largest_amounts() {
        let money = MoneyFormat::default();
        assert_eq!(
            money.format(Decimal::MAX),
            "79 228 162 514 264 337 593 543 950 335,00 €"
        );
        assert_eq!(
            money.format(Decimal::MIN),
            "-79 228 162 514 264 337 593 543 950 335,00 €"
        );

        let amount = decimal_from_json(&json!(5e27)).unwrap();
        assert_eq!(
            money.format(amount),
            "5 000 000 000 000 000 000 000 000 000,00 €"
        );
    }

    #[test]
    fn full_precision() -> Result<(), RunError> {
        let money = MoneyFormat::new("€", " ", ",", 28)?;
        assert_eq!(
            money.format(dec!(1.5)),
            "1,5000000000000000000000000000 €"
        );
        Ok(())
    }

    #[test]
    fn custom_format() -> Result<(), RunError> {
        let money = MoneyFormat::new("USD", ",", ".", 3)?;
        assert_eq!(money.format(dec!(9876543.21)), "9,876,543.210 USD");

        let whole = MoneyFormat::new("¥", ".", ",", 0)?;
        assert_eq!(whole.format(dec!(1500.5)), "1.501 ¥");
        Ok(())
    }

    #[test]
    fn invalid_format() {
        assert!(matches!(
            MoneyFormat::new("€", " ", ",", 29),
            Err(RunError::Precision { precision: 29 })
        ));
        assert!(matches!(
            MoneyFormat::new("€", "separator too long", ",", 2),
            Err(RunError::Format { .. })
        ));
    }

    #[test]
    fn parse() {
        let money = MoneyFormat::default();
        assert_eq!(money.parse("1 234,50 €"), Some(dec!(1234.50)));
        assert_eq!(money.parse("-0,99 €"), Some(dec!(-0.99)));
        assert_eq!(money.parse("1 234,50 $"), None);
        assert_eq!(money.parse("abc €"), None);
    }

    #[test]
    fn json_numbers() {
        assert_eq!(decimal_from_json(&json!(20)), Some(dec!(20)));
        assert_eq!(decimal_from_json(&json!(-5.5)), Some(dec!(-5.5)));
        assert_eq!(decimal_from_json(&json!(1e3)), Some(dec!(1000)));
        assert_eq!(decimal_from_json(&json!("20")), None);
        assert_eq!(decimal_from_json(&Value::Null), None);
    }
}
