use crate::utils::error::{Result, ShopError};
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

pub const MAX_NAME_LEN: usize = 32;
pub const MAX_ADDRESS_LEN: usize = 256;
pub const MAX_VIN_LEN: usize = 16;
pub const MAX_MAKE_LEN: usize = 32;
pub const MAX_MODEL_LEN: usize = 32;
pub const MIN_MANUFACTURE_YEAR: i64 = 1970;
pub const MAX_EXPERIENCE_YEARS: i64 = 100;

lazy_static! {
    // 只接受 ASCII 數字；regex 的 \d 會匹配其他文字的數字
    static ref PHONE_RE: Regex = Regex::new(r"^([0-9]{3})-([0-9]{3})-([0-9]{4})$").unwrap();
    // M/D/YYYY：月、日各 1-2 位數，年份 4 位數
    static ref DATE_SHAPE_RE: Regex = Regex::new(r"^[0-9]{1,2}/[0-9]{1,2}/[0-9]{4}$").unwrap();
}

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// First or last name: 1-32 characters once trimmed, no embedded spaces.
/// Composite names use a hyphen.
pub fn validate_name(field_name: &str, input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ShopError::invalid_input(field_name, input, "Name cannot be empty"));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(ShopError::invalid_input(
            field_name,
            input,
            format!("Name must be at most {} characters", MAX_NAME_LEN),
        ));
    }
    if input.contains(' ') {
        return Err(ShopError::invalid_input(
            field_name,
            input,
            "Name cannot contain spaces, use a hyphen for composite names",
        ));
    }
    Ok(trimmed.to_string())
}

/// Accepts `DDD-DDD-DDDD` and returns it in storage shape `(DDD)DDD-DDDD`.
pub fn validate_phone(field_name: &str, input: &str) -> Result<String> {
    match PHONE_RE.captures(input) {
        Some(caps) => Ok(format!("({}){}-{}", &caps[1], &caps[2], &caps[3])),
        None => Err(ShopError::invalid_input(
            field_name,
            input,
            "Phone number must look like ###-###-####",
        )),
    }
}

pub fn validate_bounded(field_name: &str, input: &str, max_len: usize) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.chars().count() > max_len {
        return Err(ShopError::invalid_input(
            field_name,
            input,
            format!("Value must be at most {} characters", max_len),
        ));
    }
    Ok(trimmed.to_string())
}

/// Same as [`validate_bounded`] but also refuses blank input.
pub fn validate_required(field_name: &str, input: &str, max_len: usize) -> Result<String> {
    let value = validate_bounded(field_name, input, max_len)?;
    if value.is_empty() {
        return Err(ShopError::invalid_input(
            field_name,
            input,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(value)
}

pub fn validate_integer(field_name: &str, input: &str) -> Result<i64> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| ShopError::invalid_input(field_name, input, "Invalid characters, expected a whole number"))
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ShopError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_manufacture_year(field_name: &str, input: &str) -> Result<i64> {
    let year = validate_integer(field_name, input)?;
    if year < MIN_MANUFACTURE_YEAR {
        return Err(ShopError::invalid_input(
            field_name,
            input,
            format!("Year must be {} or later", MIN_MANUFACTURE_YEAR),
        ));
    }
    Ok(year)
}

pub fn validate_experience(field_name: &str, input: &str) -> Result<i64> {
    let years = validate_integer(field_name, input)?;
    if !(0..MAX_EXPERIENCE_YEARS).contains(&years) {
        return Err(ShopError::invalid_input(
            field_name,
            input,
            format!("Experience must be between 0 and {}", MAX_EXPERIENCE_YEARS - 1),
        ));
    }
    Ok(years)
}

pub fn validate_non_negative(field_name: &str, input: &str) -> Result<i64> {
    let value = validate_integer(field_name, input)?;
    if value < 0 {
        return Err(ShopError::invalid_input(field_name, input, "Value cannot be negative"));
    }
    Ok(value)
}

pub fn validate_binary_choice(field_name: &str, input: &str) -> Result<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" => Ok(true),
        "n" => Ok(false),
        _ => Err(ShopError::invalid_input(field_name, input, "Please enter 'y' or 'n'")),
    }
}

pub fn validate_menu_selection(field_name: &str, input: &str, max_valid: usize) -> Result<usize> {
    let reason = format!("Please choose a number between 1 and {}", max_valid);
    let choice = input
        .trim()
        .parse::<usize>()
        .map_err(|_| ShopError::invalid_input(field_name, input, reason.clone()))?;
    if choice < 1 || choice > max_valid {
        return Err(ShopError::invalid_input(field_name, input, reason));
    }
    Ok(choice)
}

/// Calendar date written `M/D/YYYY`.
///
/// The shape is checked before the calendar so that inputs such as `03//2024`
/// or `3/15/24` never reach chrono's more lenient parser. Month lengths and
/// leap years follow the Gregorian calendar.
///
/// `DATE_SHAPE_RE` alone restricts the input to ASCII digits; keep it that way
/// when editing the pattern.
pub fn validate_date(field_name: &str, input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    if !DATE_SHAPE_RE.is_match(trimmed) {
        return Err(ShopError::invalid_input(
            field_name,
            input,
            "Date must be written M/D/YYYY",
        ));
    }
    NaiveDate::parse_from_str(trimmed, "%m/%d/%Y").map_err(|_| {
        ShopError::invalid_input(field_name, input, "No such day in the calendar")
    })
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ShopError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ShopError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    if Path::new(path).is_file() {
        return Err(ShopError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path points to a file, expected a directory".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ShopError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("fname", "Ana").unwrap(), "Ana");
        assert_eq!(validate_name("lname", "Garcia-Lopez").unwrap(), "Garcia-Lopez");
        assert_eq!(validate_name("fname", &"a".repeat(32)).unwrap().len(), 32);
        assert!(validate_name("fname", &"a".repeat(33)).is_err());
        assert!(validate_name("fname", "").is_err());
        assert!(validate_name("fname", "\t").is_err());
        assert!(validate_name("lname", "Van Buren").is_err());
        assert!(validate_name("lname", " Smith").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert_eq!(validate_phone("phone", "951-555-0123").unwrap(), "(951)555-0123");
        assert!(validate_phone("phone", "9515550123").is_err());
        assert!(validate_phone("phone", "951-555-012").is_err());
        assert!(validate_phone("phone", "951-555-01234").is_err());
        assert!(validate_phone("phone", "(951)555-0123").is_err());
        assert!(validate_phone("phone", "abc-def-ghij").is_err());
        assert!(validate_phone("phone", "٩٥١-٥٥٥-٠١٢٣").is_err());
    }

    #[test]
    fn test_validate_bounded_and_required() {
        assert_eq!(validate_bounded("address", "  12 Main St  ", 256).unwrap(), "12 Main St");
        assert_eq!(validate_bounded("address", "", 256).unwrap(), "");
        assert!(validate_bounded("vin", "12345678901234567", MAX_VIN_LEN).is_err());
        assert!(validate_required("vin", "   ", MAX_VIN_LEN).is_err());
        assert_eq!(validate_required("vin", "1HGCM82633A0042", MAX_VIN_LEN).unwrap(), "1HGCM82633A0042");
    }

    #[test]
    fn test_validate_manufacture_year() {
        assert_eq!(validate_manufacture_year("year", "1970").unwrap(), 1970);
        assert_eq!(validate_manufacture_year("year", "2024").unwrap(), 2024);
        assert!(validate_manufacture_year("year", "1969").is_err());
        assert!(validate_manufacture_year("year", "nineteen").is_err());
        assert!(validate_manufacture_year("year", "").is_err());
    }

    #[test]
    fn test_validate_experience() {
        assert_eq!(validate_experience("experience", "0").unwrap(), 0);
        assert_eq!(validate_experience("experience", "99").unwrap(), 99);
        assert!(validate_experience("experience", "100").is_err());
        assert!(validate_experience("experience", "-1").is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert_eq!(validate_non_negative("odometer", "0").unwrap(), 0);
        assert_eq!(validate_non_negative("bill", " 250 ").unwrap(), 250);
        assert!(validate_non_negative("bill", "-5").is_err());
        assert!(validate_non_negative("bill", "12.50").is_err());
    }

    #[test]
    fn test_validate_binary_choice() {
        assert!(validate_binary_choice("answer", "y").unwrap());
        assert!(validate_binary_choice("answer", "Y").unwrap());
        assert!(!validate_binary_choice("answer", "n").unwrap());
        assert!(!validate_binary_choice("answer", "N").unwrap());
        assert!(validate_binary_choice("answer", "yes").is_err());
        assert!(validate_binary_choice("answer", "").is_err());
    }

    #[test]
    fn test_validate_menu_selection() {
        assert_eq!(validate_menu_selection("choice", "1", 5).unwrap(), 1);
        assert_eq!(validate_menu_selection("choice", "5", 5).unwrap(), 5);
        assert!(validate_menu_selection("choice", "0", 5).is_err());
        assert!(validate_menu_selection("choice", "6", 5).is_err());
        assert!(validate_menu_selection("choice", "two", 5).is_err());
        assert!(validate_menu_selection("choice", "-1", 5).is_err());
    }

    #[test]
    fn test_validate_date() {
        assert_eq!(
            validate_date("date", "3/15/2024").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
        assert_eq!(
            validate_date("date", "12/31/1999").unwrap(),
            NaiveDate::from_ymd_opt(1999, 12, 31).unwrap()
        );
        assert!(validate_date("date", "03/05/2024").is_ok());
        assert!(validate_date("date", "13/40/2024").is_err());
        assert!(validate_date("date", "03//2024").is_err());
        assert!(validate_date("date", "4/31/2024").is_err());
        assert!(validate_date("date", "3/15/24").is_err());
        assert!(validate_date("date", "3/15/2024/1").is_err());
        assert!(validate_date("date", "3-15-2024").is_err());
        assert!(validate_date("date", "").is_err());
    }

    #[test]
    fn test_validate_date_rejects_non_ascii_digits_by_shape() {
        let err = validate_date("date", "٣/١٥/٢٠٢٤").unwrap_err();
        assert_eq!(err.user_friendly_message(), "Date must be written M/D/YYYY");
    }

    #[test]
    fn test_validate_date_uses_real_leap_years() {
        assert!(validate_date("date", "2/29/2024").is_ok());
        assert!(validate_date("date", "2/29/2023").is_err());
        assert!(validate_date("date", "2/29/1900").is_err());
        assert!(validate_date("date", "2/29/2000").is_ok());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("database.busy_timeout_ms", 5000u64, 1, 600_000).is_ok());
        assert!(matches!(
            validate_range("database.busy_timeout_ms", 0u64, 1, 600_000),
            Err(ShopError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("database.data_dir", "./data").is_ok());
        assert!(validate_path("database.data_dir", "").is_err());
        assert!(validate_path("database.data_dir", "a\0b").is_err());
    }
}
