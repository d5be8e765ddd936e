use email_address::EmailAddress;

use crate::validation::check_control_whitespace;

pub const MIN_USERNAME_CHARS: usize = 3;
pub const MAX_USERNAME_CHARS: usize = 32;

pub fn username_valid(given: &str) -> bool {
    given.chars().count() >= MIN_USERNAME_CHARS &&
        check_control_whitespace(given, Some(MAX_USERNAME_CHARS))
}

pub fn email_valid(given: &str) -> bool {
    EmailAddress::is_valid(given)
}
