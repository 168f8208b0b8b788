/// Reading speed used for the estimate.
pub const WORDS_PER_MINUTE: usize = 200;

/// Estimate reading time as `"N min read"`, rounding up and never below one
/// minute.
pub fn estimate_read_time(content: &str) -> String {
    let words = content.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{minutes} min read")
}
