//! Verification-code generation.
//!
//! Codes come from the operating system's CSPRNG. SMS codes are numeric to
//! survive voice readout and constrained sender templates; email codes use a
//! larger alphanumeric alphabet.

use rand::rngs::OsRng;
use rand::Rng;

use super::traits::Channel;

/// Length of every generated verification code
pub const CODE_LENGTH: usize = 6;

// 0/O and 1/I are excluded to keep codes unambiguous when read back.
const EMAIL_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Generates a fresh code appropriate for the delivery channel
pub fn code_for(channel: Channel) -> String {
    match channel {
        Channel::Sms => numeric_code(),
        Channel::Email => alphanumeric_code(),
    }
}

fn numeric_code() -> String {
    let mut rng = OsRng;
    (0..CODE_LENGTH)
        .map(|_| char::from(b'0' + rng.gen_range(0..10)))
        .collect()
}

fn alphanumeric_code() -> String {
    let mut rng = OsRng;
    (0..CODE_LENGTH)
        .map(|_| char::from(EMAIL_ALPHABET[rng.gen_range(0..EMAIL_ALPHABET.len())]))
        .collect()
}
