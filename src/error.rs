use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("\"{input}\" is not one of: {expected}")]
    InvalidSelection { input: String, expected: String },

    #[error("No data file for {city} (looked for {})", .path.display())]
    MissingDataFile { city: String, path: PathBuf },

    #[error("Failed to read {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{}: missing required column \"{column}\"", .path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("{}, row {row}: invalid timestamp \"{input}\" (expected YYYY-MM-DD HH:MM[:SS])", .path.display())]
    InvalidTimestamp {
        path: PathBuf,
        row: u64,
        input: String,
    },

    #[error("{}, row {row}: invalid {column} \"{input}\"", .path.display())]
    InvalidField {
        path: PathBuf,
        row: u64,
        column: String,
        input: String,
    },

    #[error("No matching trips to aggregate")]
    InsufficientData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_selection_display() {
        let e = AppError::InvalidSelection {
            input: "boston".to_string(),
            expected: "chicago, new york city, washington".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "\"boston\" is not one of: chicago, new york city, washington"
        );
    }

    #[test]
    fn missing_data_file_display() {
        let e = AppError::MissingDataFile {
            city: "chicago".to_string(),
            path: PathBuf::from("/data/chicago.csv"),
        };
        assert_eq!(
            e.to_string(),
            "No data file for chicago (looked for /data/chicago.csv)"
        );
    }

    #[test]
    fn invalid_timestamp_display() {
        let e = AppError::InvalidTimestamp {
            path: PathBuf::from("chicago.csv"),
            row: 17,
            input: "not-a-date".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "chicago.csv, row 17: invalid timestamp \"not-a-date\" (expected YYYY-MM-DD HH:MM[:SS])"
        );
    }

    #[test]
    fn invalid_field_display() {
        let e = AppError::InvalidField {
            path: PathBuf::from("chicago.csv"),
            row: 3,
            column: "Trip Duration".to_string(),
            input: "-5".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "chicago.csv, row 3: invalid Trip Duration \"-5\""
        );
    }

    #[test]
    fn missing_column_display() {
        let e = AppError::MissingColumn {
            path: PathBuf::from("w.csv"),
            column: "Start Time".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "w.csv: missing required column \"Start Time\""
        );
    }

    #[test]
    fn insufficient_data_display() {
        assert_eq!(
            AppError::InsufficientData.to_string(),
            "No matching trips to aggregate"
        );
    }
}
