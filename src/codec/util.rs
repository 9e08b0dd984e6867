/// Strips the surrounding whitespace left behind by line-based input.
pub fn trim_line(input: &[u8]) -> &[u8] {
    input.trim_ascii()
}

/// Position of the first byte not accepted by `allowed`.
pub fn first_invalid(input: &[u8], allowed: impl Fn(u8) -> bool) -> Option<usize> {
    input.iter().position(|&b| !allowed(b))
}
