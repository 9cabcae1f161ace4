//! Conversions of raw CSV fields into typed values.
//!
//! Every function takes the trimmed field text and fails with a
//! [`CommonError`] naming the offending value, so callers can attach
//! the file, line and column.

use std::str::FromStr;

use chrono::NaiveDate;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::error::CommonError;
use crate::error::Result;

pub fn date(v: &str) -> Result<NaiveDate> {
    let v = v.trim();
    if v.is_empty() {
        return Err(CommonError::MissingValue);
    }

    if v.contains('T') {
        return NaiveDateTime::parse_from_str(v, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|dt| dt.date())
            .map_err(|_| CommonError::InvalidDate(v.to_string()));
    }

    NaiveDate::parse_from_str(v, "%Y-%m-%d").map_err(|_| CommonError::InvalidDate(v.to_string()))
}

pub fn opt_date(v: &str) -> Result<Option<NaiveDate>> {
    if v.trim().is_empty() {
        return Ok(None);
    }

    date(v).map(Some)
}

pub fn decimal(v: &str) -> Result<Decimal> {
    let v = v.trim();
    if v.is_empty() {
        return Err(CommonError::MissingValue);
    }

    Decimal::from_str(v).map_err(|_| CommonError::InvalidDecimal(v.to_string()))
}

pub fn opt_decimal(v: &str) -> Result<Option<Decimal>> {
    if v.trim().is_empty() {
        return Ok(None);
    }

    decimal(v).map(Some)
}

pub fn int(v: &str) -> Result<i32> {
    let v = v.trim();
    if v.is_empty() {
        return Err(CommonError::MissingValue);
    }

    i32::from_str(v).map_err(|_| CommonError::InvalidInteger(v.to_string()))
}

pub fn boolean(v: &str) -> Result<bool> {
    match v.trim().to_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" | "" => Ok(false),
        _ => Err(CommonError::InvalidBoolean(v.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn dates() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        assert_eq!(date("2025-01-31").unwrap(), d);
        assert_eq!(date(" 2025-01-31 ").unwrap(), d);
        assert_eq!(date("2025-01-31T10:30:00").unwrap(), d);
        assert!(matches!(date("2025-02-30"), Err(CommonError::InvalidDate(_))));
        assert!(matches!(date("31/01/2025"), Err(CommonError::InvalidDate(_))));
        assert!(matches!(date(""), Err(CommonError::MissingValue)));
        assert_eq!(opt_date("").unwrap(), None);
        assert!(opt_date("not a date").is_err());
    }

    #[test]
    fn numbers() {
        assert_eq!(decimal("132.99").unwrap(), Decimal::new(13299, 2));
        assert!(matches!(decimal("1,5"), Err(CommonError::InvalidDecimal(_))));
        assert_eq!(opt_decimal(" ").unwrap(), None);
        assert_eq!(int("14").unwrap(), 14);
        assert!(matches!(int("1.5"), Err(CommonError::InvalidInteger(_))));
    }

    #[test]
    fn booleans() {
        assert!(boolean("True").unwrap());
        assert!(boolean("1").unwrap());
        assert!(!boolean("FALSE").unwrap());
        assert!(!boolean("").unwrap());
        assert!(boolean("maybe").is_err());
    }
}
