//! The validated daily fitness entry.
//!
//! A `FitnessEntry` can only be obtained through [`FitnessEntry::new`],
//! which checks every field, so any live value satisfies:
//! - date is non-blank and stored trimmed
//! - heart rate is positive
//! - steps and calories are non-negative
//! - sleep hours lie within 0..=24
//! - weight is positive and finite

use crate::{Error, Result};
use std::fmt;

/// Column names of the CSV log, in field order
pub const CSV_COLUMNS: [&str; 6] = ["Date", "HeartRate", "Steps", "Calories", "Sleep", "Weight"];

/// Header line written as the first line of every CSV log
pub const CSV_HEADER: &str = "Date,HeartRate,Steps,Calories,Sleep,Weight";

/// One fitness observation for one date
#[derive(Clone, Debug, PartialEq)]
pub struct FitnessEntry {
    date: String,
    heart_rate: i32,
    steps: i32,
    calories: i32,
    sleep_hours: f64,
    weight: f64,
}

impl FitnessEntry {
    /// Build a validated entry
    ///
    /// Fields are checked in declaration order and the first violation is
    /// returned as [`Error::Validation`] naming the field.
    pub fn new(
        date: &str,
        heart_rate: i32,
        steps: i32,
        calories: i32,
        sleep_hours: f64,
        weight: f64,
    ) -> Result<Self> {
        let date = date.trim();
        if date.is_empty() {
            return Err(Error::validation("date", "date cannot be blank"));
        }
        if heart_rate <= 0 {
            return Err(Error::validation(
                "heart_rate",
                format!("heart rate must be positive, got {}", heart_rate),
            ));
        }
        if steps < 0 {
            return Err(Error::validation(
                "steps",
                format!("steps cannot be negative, got {}", steps),
            ));
        }
        if calories < 0 {
            return Err(Error::validation(
                "calories",
                format!("calories cannot be negative, got {}", calories),
            ));
        }
        // Written as a range check so NaN is rejected too
        if !(0.0..=24.0).contains(&sleep_hours) {
            return Err(Error::validation(
                "sleep_hours",
                format!("sleep must be between 0 and 24 hours, got {}", sleep_hours),
            ));
        }
        if !(weight > 0.0 && weight.is_finite()) {
            return Err(Error::validation(
                "weight",
                format!("weight must be positive, got {}", weight),
            ));
        }

        Ok(Self {
            date: date.to_string(),
            heart_rate,
            steps,
            calories,
            sleep_hours,
            weight,
        })
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn heart_rate(&self) -> i32 {
        self.heart_rate
    }

    pub fn steps(&self) -> i32 {
        self.steps
    }

    pub fn calories(&self) -> i32 {
        self.calories
    }

    pub fn sleep_hours(&self) -> f64 {
        self.sleep_hours
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// The six CSV fields, rendered in column order
    ///
    /// Sleep and weight carry exactly one decimal digit.
    pub fn csv_fields(&self) -> [String; 6] {
        [
            self.date.clone(),
            self.heart_rate.to_string(),
            self.steps.to_string(),
            self.calories.to_string(),
            format!("{:.1}", self.sleep_hours),
            format!("{:.1}", self.weight),
        ]
    }

    /// Render this entry as one CSV line (no trailing newline)
    pub fn to_csv_line(&self) -> String {
        self.csv_fields().join(",")
    }

    /// The CSV header line
    pub fn csv_header() -> &'static str {
        CSV_HEADER
    }
}

impl fmt::Display for FitnessEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | HR: {} | Steps: {} | Calories: {} | Sleep: {:.1}h | Weight: {:.1}kg",
            self.date, self.heart_rate, self.steps, self.calories, self.sleep_hours, self.weight
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FitnessEntry {
        FitnessEntry::new("2024-01-01", 70, 7500, 400, 8.0, 71.0).unwrap()
    }

    fn field_of(result: Result<FitnessEntry>) -> &'static str {
        result.unwrap_err().field().expect("expected a validation error")
    }

    #[test]
    fn test_valid_entry_accessors() {
        let entry = sample();
        assert_eq!(entry.date(), "2024-01-01");
        assert_eq!(entry.heart_rate(), 70);
        assert_eq!(entry.steps(), 7500);
        assert_eq!(entry.calories(), 400);
        assert_eq!(entry.sleep_hours(), 8.0);
        assert_eq!(entry.weight(), 71.0);
    }

    #[test]
    fn test_date_is_trimmed() {
        let entry = FitnessEntry::new("  2024-01-01\t", 70, 7500, 400, 8.0, 71.0).unwrap();
        assert_eq!(entry.date(), "2024-01-01");
    }

    #[test]
    fn test_blank_date_rejected() {
        assert_eq!(field_of(FitnessEntry::new("", 70, 0, 0, 8.0, 71.0)), "date");
        assert_eq!(field_of(FitnessEntry::new("   ", 70, 0, 0, 8.0, 71.0)), "date");
    }

    #[test]
    fn test_heart_rate_must_be_positive() {
        assert_eq!(field_of(FitnessEntry::new("d", 0, 0, 0, 8.0, 71.0)), "heart_rate");
        assert_eq!(field_of(FitnessEntry::new("d", -5, 0, 0, 8.0, 71.0)), "heart_rate");
    }

    #[test]
    fn test_negative_steps_and_calories_rejected() {
        assert_eq!(field_of(FitnessEntry::new("d", 70, -1, 0, 8.0, 71.0)), "steps");
        assert_eq!(field_of(FitnessEntry::new("d", 70, 0, -1, 8.0, 71.0)), "calories");
        // Zero is allowed for both
        assert!(FitnessEntry::new("d", 70, 0, 0, 8.0, 71.0).is_ok());
    }

    #[test]
    fn test_sleep_bounds() {
        assert!(FitnessEntry::new("d", 70, 0, 0, 0.0, 71.0).is_ok());
        assert!(FitnessEntry::new("d", 70, 0, 0, 24.0, 71.0).is_ok());
        assert_eq!(field_of(FitnessEntry::new("d", 70, 0, 0, -0.1, 71.0)), "sleep_hours");
        assert_eq!(field_of(FitnessEntry::new("d", 70, 0, 0, 24.1, 71.0)), "sleep_hours");
        assert_eq!(field_of(FitnessEntry::new("d", 70, 0, 0, f64::NAN, 71.0)), "sleep_hours");
    }

    #[test]
    fn test_weight_must_be_positive() {
        assert_eq!(field_of(FitnessEntry::new("d", 70, 0, 0, 8.0, 0.0)), "weight");
        assert_eq!(field_of(FitnessEntry::new("d", 70, 0, 0, 8.0, -70.0)), "weight");
        assert_eq!(field_of(FitnessEntry::new("d", 70, 0, 0, 8.0, f64::NAN)), "weight");
        assert_eq!(field_of(FitnessEntry::new("d", 70, 0, 0, 8.0, f64::INFINITY)), "weight");
    }

    #[test]
    fn test_first_violation_wins() {
        // Every field is invalid; date is checked first
        assert_eq!(field_of(FitnessEntry::new(" ", 0, -1, -1, 30.0, 0.0)), "date");
        assert_eq!(field_of(FitnessEntry::new("d", 0, -1, -1, 30.0, 0.0)), "heart_rate");
        assert_eq!(field_of(FitnessEntry::new("d", 70, 0, 0, 30.0, 0.0)), "sleep_hours");
    }

    #[test]
    fn test_validation_message_names_field() {
        let err = FitnessEntry::new("d", 70, 0, 0, 8.0, -1.0).unwrap_err();
        assert!(err.to_string().contains("weight"));
    }

    #[test]
    fn test_display_format() {
        let entry = FitnessEntry::new("2024-01-02", 73, 8200, 435, 7.5, 70.9).unwrap();
        assert_eq!(
            entry.to_string(),
            "2024-01-02 | HR: 73 | Steps: 8200 | Calories: 435 | Sleep: 7.5h | Weight: 70.9kg"
        );
    }

    #[test]
    fn test_csv_line_format() {
        assert_eq!(sample().to_csv_line(), "2024-01-01,70,7500,400,8.0,71.0");

        let entry = FitnessEntry::new("2024-01-03", 61, 0, 0, 6.0, 68.04).unwrap();
        assert_eq!(entry.to_csv_line(), "2024-01-03,61,0,0,6.0,68.0");
    }

    #[test]
    fn test_csv_header() {
        assert_eq!(
            FitnessEntry::csv_header(),
            "Date,HeartRate,Steps,Calories,Sleep,Weight"
        );
        assert_eq!(CSV_COLUMNS.join(","), CSV_HEADER);
    }
}
