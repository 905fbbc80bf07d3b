//! Splitting bulk remaining-account lists into transaction-sized chunks.

use solana_sdk::instruction::Instruction;
use tracing::debug;

use crate::error::SdkError;

/// Instructions meant to share one transaction.
pub type InstructionGroup = Vec<Instruction>;

/// Splits `items` into consecutive chunks of at most `limit` elements.
///
/// Concatenating the chunks reproduces `items` exactly. Every chunk but the
/// last holds exactly `limit` elements. An empty input yields no chunks.
///
/// # Errors
///
/// Returns `SdkError::InvalidInput` if `limit` is zero.
pub fn split<T: Clone>(items: &[T], limit: usize) -> Result<Vec<Vec<T>>, SdkError> {
    if limit == 0 {
        return Err(SdkError::InvalidInput(
            "batch limit must be positive".to_string(),
        ));
    }
    let chunks: Vec<Vec<T>> = items.chunks(limit).map(<[T]>::to_vec).collect();
    debug!(
        items = items.len(),
        limit,
        chunks = chunks.len(),
        "split remaining accounts"
    );
    Ok(chunks)
}

/// Builds one instruction per chunk of `items`.
///
/// # Errors
///
/// Returns `SdkError::InvalidInput` if `limit` is zero, or the first error
/// of `build`.
pub fn build_batched<T, F>(
    items: &[T],
    limit: usize,
    mut build: F,
) -> Result<Vec<Instruction>, SdkError>
where
    T: Clone,
    F: FnMut(&[T]) -> Result<Instruction, SdkError>,
{
    split(items, limit)?
        .iter()
        .map(|chunk| build(chunk))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_exact_and_remainder() {
        let items: Vec<u32> = (0..45).collect();
        let chunks = split(&items, 20).expect("split");
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 20);
        assert_eq!(chunks[1].len(), 20);
        assert_eq!(chunks[2].len(), 5);
        assert_eq!(chunks.concat(), items);
    }

    #[test]
    fn test_split_empty() {
        let items: Vec<u32> = Vec::new();
        assert!(split(&items, 12).expect("split").is_empty());
    }

    #[test]
    fn test_split_zero_limit() {
        assert!(matches!(split(&[1, 2, 3], 0), Err(SdkError::InvalidInput(_))));
    }

    #[test]
    fn test_build_batched_propagates_error() {
        let result = build_batched(&[1, 2, 3], 2, |_| {
            Err(SdkError::InvalidInput("boom".to_string()))
        });
        assert!(result.is_err());
    }
}
