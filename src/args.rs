//! Command line argument parsing for the backlight controller

use crate::brightness::AdjustmentRequest;
use clap::Parser;
use std::time::Duration;

/// Backlight brightness control
///
/// Changes the brightness of a sysfs backlight device by a number of
/// percentage points of its maximum.
#[derive(Parser, Debug)]
#[command(name = "backlight-ctl")]
#[command(about = "Adjust display backlight brightness")]
#[command(version)]
pub struct Args {
    /// Time in milliseconds to change brightness to the given value
    #[arg(short, long, value_name = "MS", allow_negative_numbers = true, value_parser = parse_time)]
    pub time: Option<Duration>,

    /// Backlight device name under /sys/class/backlight
    #[arg(short, long, value_name = "NAME")]
    pub device: Option<String>,

    /// Compute the new brightness without writing it
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Increase verbosity (can be used multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Percentage points to add (negative to dim), or "max"
    #[arg(value_name = "VALUE", allow_negative_numbers = true, value_parser = parse_request)]
    pub value: AdjustmentRequest,
}

/// Milliseconds; the sign is dropped.
fn parse_time(s: &str) -> Result<Duration, String> {
    s.trim()
        .parse::<i64>()
        .map(|ms| Duration::from_millis(ms.unsigned_abs()))
        .map_err(|_| format!("invalid time {:?}: expected milliseconds", s))
}

fn parse_request(s: &str) -> Result<AdjustmentRequest, String> {
    s.parse::<AdjustmentRequest>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_positive_and_negative_values() {
        let args = Args::try_parse_from(["backlight-ctl", "10"]).unwrap();
        assert_eq!(args.value.delta_percent, 10);
        assert!(args.time.is_none());

        let args = Args::try_parse_from(["backlight-ctl", "-25"]).unwrap();
        assert_eq!(args.value.delta_percent, -25);
    }

    #[test]
    fn test_max_keyword() {
        let args = Args::try_parse_from(["backlight-ctl", "MAX"]).unwrap();
        assert_eq!(args.value, AdjustmentRequest::MAX);
    }

    #[test]
    fn test_time_takes_absolute_value() {
        let args = Args::try_parse_from(["backlight-ctl", "-t", "-250", "5"]).unwrap();
        assert_eq!(args.time, Some(Duration::from_millis(250)));

        let args = Args::try_parse_from(["backlight-ctl", "--time", "1000", "-5"]).unwrap();
        assert_eq!(args.time, Some(Duration::from_millis(1000)));
        assert_eq!(args.value.delta_percent, -5);
    }

    #[test]
    fn test_non_numeric_input_is_rejected() {
        let err = Args::try_parse_from(["backlight-ctl", "bright"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);

        let err = Args::try_parse_from(["backlight-ctl", "-t", "soon", "5"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_usage_errors() {
        let err = Args::try_parse_from(["backlight-ctl"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let err = Args::try_parse_from(["backlight-ctl", "--fade", "5"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);

        let err = Args::try_parse_from(["backlight-ctl", "5", "-t"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_help_is_an_error_kind() {
        let err = Args::try_parse_from(["backlight-ctl", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_device_and_flags() {
        let args =
            Args::try_parse_from(["backlight-ctl", "-vv", "-n", "-d", "amdgpu_bl0", "max"]).unwrap();
        assert_eq!(args.verbose, 2);
        assert!(args.dry_run);
        assert_eq!(args.device.as_deref(), Some("amdgpu_bl0"));
    }
}
