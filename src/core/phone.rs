//! Domestic-only phone policy with a premium-rate prefix denylist.

use crate::domain::model::PhoneNumber;
use crate::utils::error::{IntakeError, Result};

pub const MSG_NON_DOMESTIC: &str = "Not a german number";
pub const MSG_DISALLOWED: &str = "This phone number is not allowed";

const INTERNATIONAL_PREFIX: &str = "00";
const COUNTRY_PREFIX: &str = "0049";

/// Premium and special-rate prefixes, compared against the 4-char window.
pub const DENIED_PREFIXES: [&str; 6] = ["0137", "0700", "0900", "0180", "0190", "1180"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneClass {
    Domestic,
    NonDomestic,
    Premium { prefix: String },
}

/// Char-based substring, clamped to the string length.
fn window(chars: &[char], start: usize, end: usize) -> String {
    let end = end.min(chars.len());
    let start = start.min(end);
    chars[start..end].iter().collect()
}

/// The 4-char window used for the denylist. `0049` numbers are folded to
/// `"0" + chars[4..7]`; the stored number is never rewritten.
pub fn prefix_window(phone: &PhoneNumber) -> String {
    let chars: Vec<char> = phone.as_str().chars().collect();
    let first_four = window(&chars, 0, 4);

    if first_four == COUNTRY_PREFIX {
        format!("0{}", window(&chars, 4, 7))
    } else {
        first_four
    }
}

pub fn classify(phone: &PhoneNumber) -> PhoneClass {
    let chars: Vec<char> = phone.as_str().chars().collect();
    let first_two = window(&chars, 0, 2);
    let first_four = window(&chars, 0, 4);

    if first_two == INTERNATIONAL_PREFIX && first_four != COUNTRY_PREFIX {
        return PhoneClass::NonDomestic;
    }

    let prefix = prefix_window(phone);
    if DENIED_PREFIXES.contains(&prefix.as_str()) {
        PhoneClass::Premium { prefix }
    } else {
        PhoneClass::Domestic
    }
}

pub fn ensure_allowed(phone: &PhoneNumber) -> Result<()> {
    match classify(phone) {
        PhoneClass::Domestic => Ok(()),
        PhoneClass::NonDomestic => Err(IntakeError::validation(MSG_NON_DOMESTIC)),
        PhoneClass::Premium { prefix } => {
            tracing::debug!("Rejected premium-rate prefix {}", prefix);
            Err(IntakeError::validation(MSG_DISALLOWED))
        }
    }
}
