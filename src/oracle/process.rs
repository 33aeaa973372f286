use std::path::PathBuf;
use std::process::Command;

use super::contract::MoveOracle;
use crate::error::OracleError;

/// Runs a local solver executable as `program <history> <depth>` and reads
/// the suggested column from its stdout.
pub struct ProcessOracle {
    program: PathBuf,
}

impl ProcessOracle {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        ProcessOracle {
            program: program.into(),
        }
    }
}

impl MoveOracle for ProcessOracle {
    fn suggest(&self, history: &str, depth: u32) -> Result<String, OracleError> {
        let output = Command::new(&self.program)
            .arg(history)
            .arg(depth.to_string())
            .output()
            .map_err(|e| {
                OracleError::Unavailable(format!("running {}: {e}", self.program.display()))
            })?;

        if !output.status.success() {
            return Err(OracleError::Unavailable(format!(
                "{} exited with {}",
                self.program.display(),
                output.status
            )));
        }

        String::from_utf8(output.stdout).map_err(|e| {
            OracleError::Unavailable(format!("{} wrote non-UTF-8 output: {e}", self.program.display()))
        })
    }

    fn name(&self) -> &str {
        "process"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_unavailable() {
        let oracle = ProcessOracle::new("/nonexistent/connect-four-solver");
        assert!(matches!(
            oracle.suggest("33", 10),
            Err(OracleError::Unavailable(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_arguments_are_history_then_depth() {
        let oracle = ProcessOracle::new("echo");
        assert_eq!(oracle.suggest("3344", 12).unwrap(), "3344 12\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_program_is_unavailable() {
        let oracle = ProcessOracle::new("false");
        assert!(matches!(
            oracle.suggest("", 10),
            Err(OracleError::Unavailable(_))
        ));
    }
}
