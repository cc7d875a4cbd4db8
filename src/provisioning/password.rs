use rand::distributions::Alphanumeric;
use rand::Rng;

/// Random password drawn uniformly from `[A-Za-z0-9]`.
pub fn generate_secure_password(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_length_and_alphabet() {
        let password = generate_secure_password(32);
        assert_eq!(password.len(), 32);
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_passwords_differ() {
        assert_ne!(generate_secure_password(32), generate_secure_password(32));
    }

    #[test]
    fn test_empty_password() {
        assert!(generate_secure_password(0).is_empty());
    }
}
