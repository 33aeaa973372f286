use crate::error::OracleError;
use crate::game::COLS;

/// Something that can suggest the next column for a position.
///
/// `history` is the encoded move history (one digit per ply, see
/// [`MoveHistory`](crate::game::MoveHistory)) and `depth` the search depth the
/// solver should use. The answer is the raw column identifier as the service
/// sent it, surrounding whitespace included. Implementations block; callers
/// run them on a worker thread.
pub trait MoveOracle: Send + Sync {
    fn suggest(&self, history: &str, depth: u32) -> Result<String, OracleError>;

    /// Short name for logs.
    fn name(&self) -> &str;
}

/// Turn an oracle answer into a board column.
pub fn parse_column(raw: &str) -> Result<usize, OracleError> {
    let trimmed = raw.trim();
    match trimmed.parse::<usize>() {
        Ok(col) if col < COLS => Ok(col),
        _ => Err(OracleError::InvalidSuggestion {
            suggestion: trimmed.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_column("4\n"), Ok(4));
        assert_eq!(parse_column("  0 \r\n"), Ok(0));
        assert_eq!(parse_column("6"), Ok(6));
    }

    #[test]
    fn test_parse_rejects_off_board_column() {
        assert_eq!(
            parse_column("7\n"),
            Err(OracleError::InvalidSuggestion {
                suggestion: "7".to_string()
            })
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for raw in ["", "   ", "-1", "three", "3 4", "2.0"] {
            assert!(parse_column(raw).is_err(), "accepted {raw:?}");
        }
    }
}
