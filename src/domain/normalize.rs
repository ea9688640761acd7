//! Customer field normalization for gateway requests.
//!
//! Both functions are pure and idempotent: feeding their own output back in
//! yields the same value.

/// Strip everything but ASCII digits from a CPF/CNPJ document number.
pub fn normalize_document(document: &str) -> String {
    document.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Normalize a Brazilian phone number to `+<country><number>`.
///
/// Non-digits are stripped first. Numbers already carrying the `55` country
/// code get a `+` prefix only; anything else is assumed local and gets
/// `+55`.
pub fn normalize_phone(phone: &str) -> String {
    let cleaned: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if cleaned.starts_with("55") {
        format!("+{}", cleaned)
    } else {
        format!("+55{}", cleaned)
    }
}
