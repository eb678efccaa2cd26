//! Sliding-window text chunker.
//!
//! Chunks are the embedding granule: fixed-size character windows with a
//! fixed overlap, so consecutive chunks share context across the boundary.

pub const DEFAULT_CHUNK_SIZE: usize = 500;
pub const DEFAULT_CHUNK_OVERLAP: usize = 50;

/// Splits `text` into overlapping windows of `size` characters.
///
/// Windows are laid over character offsets (not bytes, matching the source
/// documents' unicode text): window `i` spans `[i, min(i + size, len))` and
/// the start advances by `size - overlap`. The final window is emitted even
/// when shorter than `size`, and iteration stops once a window reaches the
/// end of the text. Empty input yields no chunks.
///
/// Requires `0 < overlap < size`.
pub fn chunk_text(text: &str, size: usize, overlap: usize) -> Vec<String> {
    debug_assert!(overlap > 0 && overlap < size, "require 0 < overlap < size");

    let chars: Vec<char> = text.chars().collect();
    let total = chars.len();
    let mut chunks = Vec::new();

    let step = size.saturating_sub(overlap).max(1);
    let mut start = 0;
    while start < total {
        let end = (start + size).min(total);
        chunks.push(chars[start..end].iter().collect());
        if end == total {
            break;
        }
        start += step;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_yields_no_chunks() {
        assert!(chunk_text("", 500, 50).is_empty());
    }

    #[test]
    fn test_short_text_single_chunk() {
        let text = "x".repeat(10);
        assert_eq!(chunk_text(&text, 500, 50), vec![text]);
    }

    #[test]
    fn test_exact_size_single_chunk() {
        let text = "y".repeat(500);
        let chunks = chunk_text(&text, 500, 50);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].len(), 500);
    }

    #[test]
    fn test_consecutive_chunks_share_overlap() {
        let text: String = ('a'..='z').cycle().take(1200).collect();
        let chunks = chunk_text(&text, 500, 50);

        assert_eq!(chunks.len(), 3);
        for pair in chunks.windows(2) {
            let tail: String = pair[0].chars().skip(pair[0].chars().count() - 50).collect();
            let head: String = pair[1].chars().take(50).collect();
            assert_eq!(tail, head);
        }
    }

    #[test]
    fn test_windows_cover_whole_text() {
        let text: String = ('0'..='9').cycle().take(1337).collect();
        let size = 500;
        let overlap = 50;
        let chunks = chunk_text(&text, size, overlap);

        // Dropping each chunk's leading overlap (after the first) and
        // concatenating must reconstruct the input exactly.
        let mut rebuilt = chunks[0].clone();
        for chunk in &chunks[1..] {
            rebuilt.extend(chunk.chars().skip(overlap));
        }
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_final_partial_window_not_skipped() {
        // 500 + 450 steps: second window is [450, 950), third is [900, 1000)
        let text = "z".repeat(1000);
        let chunks = chunk_text(&text, 500, 50);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2].len(), 100);
    }

    #[test]
    fn test_multibyte_text_chunks_on_chars() {
        let text = "é".repeat(600);
        let chunks = chunk_text(&text, 500, 50);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), 500);
        assert_eq!(chunks[1].chars().count(), 150);
    }
}
