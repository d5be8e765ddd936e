/// checks that the given string contains no control or whitespace characters
/// and, if provided, is no longer than `max_chars`
pub fn check_control_whitespace<G>(
    given: G,
    max_chars: Option<usize>
) -> bool
where
    G: AsRef<str>
{
    let given_ref = given.as_ref();
    let mut char_count = 0;

    for ch in given_ref.chars() {
        if ch.is_control() || ch.is_whitespace() {
            return false;
        }

        char_count += 1;

        if let Some(max_chars) = max_chars {
            if char_count > max_chars {
                return false;
            }
        }
    }

    true
}
