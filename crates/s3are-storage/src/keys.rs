//! Object key encoding and decoding.
//!
//! Key format: `{transaction_id}_{consumer}_{user_name}.{file_extension}`.

use s3are_core::AppError;
use uuid::Uuid;

/// Separator between the identity segments of an object key.
pub const KEY_DELIMITER: char = '_';

/// Longest object key S3 accepts, in bytes.
pub const MAX_OBJECT_KEY_LEN: usize = 1024;

/// Build the storage object key for a transaction.
///
/// `consumer` and `user_name` may not be empty or contain the delimiter or a `/`;
/// the extension must be ASCII alphanumeric (a leading `.` is ignored). The
/// encoded key may not exceed [`MAX_OBJECT_KEY_LEN`] bytes.
pub fn encode_object_key(
    transaction_id: Uuid,
    consumer: &str,
    user_name: &str,
    file_extension: &str,
) -> Result<String, AppError> {
    check_segment("consumer", consumer)?;
    check_segment("userName", user_name)?;

    let extension = file_extension.trim_start_matches('.');
    if extension.is_empty() || !extension.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::InvalidInput(format!(
            "fileExtension must be alphanumeric, got '{}'",
            file_extension
        )));
    }

    let key = format!(
        "{}{d}{}{d}{}.{}",
        transaction_id,
        consumer,
        user_name,
        extension,
        d = KEY_DELIMITER
    );
    if key.len() > MAX_OBJECT_KEY_LEN {
        return Err(AppError::InvalidInput(format!(
            "object key would be {} bytes, the limit is {}",
            key.len(),
            MAX_OBJECT_KEY_LEN
        )));
    }
    Ok(key)
}

/// Recover the transaction id from an object key produced by [`encode_object_key`].
pub fn decode_transaction_id(object_key: &str) -> Result<Uuid, AppError> {
    let (leading, _) = object_key.split_once(KEY_DELIMITER).ok_or_else(|| {
        AppError::MalformedKey(format!(
            "object key '{}' contains no '{}' delimiter",
            object_key, KEY_DELIMITER
        ))
    })?;

    Uuid::parse_str(leading).map_err(|_| {
        AppError::MalformedKey(format!(
            "object key '{}' does not start with a transaction id",
            object_key
        ))
    })
}

fn check_segment(field: &str, value: &str) -> Result<(), AppError> {
    if value.is_empty() {
        return Err(AppError::InvalidInput(format!("{} must not be empty", field)));
    }
    if value.contains(KEY_DELIMITER) || value.contains('/') {
        return Err(AppError::InvalidInput(format!(
            "{} must not contain '{}' or '/'",
            field, KEY_DELIMITER
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "550e8400-e29b-41d4-a716-446655440000";

    #[test]
    fn test_encode_matches_wire_format() {
        let id = Uuid::parse_str(ID).unwrap();
        let key = encode_object_key(id, "alice", "bob", "pdf").unwrap();
        assert_eq!(key, format!("{}_alice_bob.pdf", ID));

        let dotted = encode_object_key(id, "alice", "bob", ".pdf").unwrap();
        assert_eq!(dotted, key);
    }

    #[test]
    fn test_decode_recovers_encoded_id() {
        for (consumer, user) in [("alice", "bob"), ("svc.api", "j.doe"), ("x", "y-z")] {
            let id = Uuid::new_v4();
            let key = encode_object_key(id, consumer, user, "bin").unwrap();
            assert_eq!(decode_transaction_id(&key).unwrap(), id);
        }
    }

    #[test]
    fn test_encode_rejects_delimiter_in_identity() {
        let id = Uuid::new_v4();
        assert!(matches!(
            encode_object_key(id, "ali_ce", "bob", "pdf"),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            encode_object_key(id, "alice", "bob_by", "pdf"),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            encode_object_key(id, "alice", "../bob", "pdf"),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            encode_object_key(id, "", "bob", "pdf"),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_encode_rejects_bad_extension() {
        let id = Uuid::new_v4();
        for ext in ["", ".", "tar.gz", "p/df", "p_df"] {
            assert!(
                matches!(
                    encode_object_key(id, "alice", "bob", ext),
                    Err(AppError::InvalidInput(_))
                ),
                "extension {:?} should be rejected",
                ext
            );
        }
    }

    #[test]
    fn test_encode_enforces_key_length_limit() {
        let id = Uuid::new_v4();
        let user = "b".repeat(255);

        let oversized = encode_object_key(id, &"a".repeat(800), &user, "pdf");
        assert!(matches!(oversized, Err(AppError::InvalidInput(_))));

        // 36-byte id, two delimiters and ".pdf" leave 982 bytes of identity.
        let at_limit = encode_object_key(id, &"a".repeat(727), &user, "pdf").unwrap();
        assert_eq!(at_limit.len(), MAX_OBJECT_KEY_LEN);
        assert!(matches!(
            encode_object_key(id, &"a".repeat(728), &user, "pdf"),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_decode_without_delimiter_is_malformed() {
        assert!(matches!(
            decode_transaction_id(ID),
            Err(AppError::MalformedKey(_))
        ));
        assert!(matches!(
            decode_transaction_id(""),
            Err(AppError::MalformedKey(_))
        ));
    }

    #[test]
    fn test_decode_with_invalid_leading_segment_is_malformed() {
        assert!(matches!(
            decode_transaction_id("not-a-uuid_alice_bob.pdf"),
            Err(AppError::MalformedKey(_))
        ));
        assert!(matches!(
            decode_transaction_id("_alice_bob.pdf"),
            Err(AppError::MalformedKey(_))
        ));
    }
}
