//! The `classify` command.

use clap::Args;
use feedexposure::exposure::classify;

use crate::error::CliError;

#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// Visible fraction of the item, 0.0 to 1.0
    #[arg(allow_negative_numbers = true)]
    pub ratio: f32,
}

/// Print the stage a ratio classifies to.
pub fn run(args: ClassifyArgs) -> Result<(), CliError> {
    println!("{}", describe(args.ratio)?);
    Ok(())
}

fn describe(ratio: f32) -> Result<String, CliError> {
    if ratio.is_nan() {
        return Err(CliError::InvalidArgument(
            "ratio must be a number".to_string(),
        ));
    }
    Ok(format!("{:.3} -> {}", ratio, classify(ratio)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_stages() {
        assert_eq!(describe(0.0).unwrap(), "0.000 -> EXIT");
        assert_eq!(describe(0.25).unwrap(), "0.250 -> ENTER");
        assert_eq!(describe(0.5).unwrap(), "0.500 -> HALF");
        assert_eq!(describe(1.0).unwrap(), "1.000 -> FULL");
        assert_eq!(describe(-2.0).unwrap(), "-2.000 -> EXIT");
    }

    #[test]
    fn test_describe_rejects_nan() {
        assert!(matches!(
            describe(f32::NAN),
            Err(CliError::InvalidArgument(_))
        ));
    }
}
