//! 密码哈希
//!
//! 存储格式为 `十六进制盐:十六进制派生密钥`，PBKDF2-HMAC-SHA512，1000 次迭代，64 字节密钥。
//! 盐以其十六进制字符串的字节参与派生，与已有数据保持兼容。

use std::num::NonZeroU32;

use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};

use crate::errors::{EduSystemError, Result};

static PBKDF2_ALGORITHM: pbkdf2::Algorithm = pbkdf2::PBKDF2_HMAC_SHA512;

const PBKDF2_ITERATIONS: NonZeroU32 = match NonZeroU32::new(1000) {
    Some(n) => n,
    None => panic!("PBKDF2 iterations must be non-zero"),
};

const SALT_LEN: usize = 16;
const KEY_LEN: usize = 64;

/// 哈希密码
pub fn hash_password(password: &str) -> Result<String> {
    let mut salt_bytes = [0u8; SALT_LEN];
    SystemRandom::new()
        .fill(&mut salt_bytes)
        .map_err(|_| EduSystemError::crypto("无法生成随机盐"))?;
    let salt = hex::encode(salt_bytes);

    Ok(hash_with_salt(password, &salt))
}

fn hash_with_salt(password: &str, salt: &str) -> String {
    let mut key = [0u8; KEY_LEN];
    pbkdf2::derive(
        PBKDF2_ALGORITHM,
        PBKDF2_ITERATIONS,
        salt.as_bytes(),
        password.as_bytes(),
        &mut key,
    );
    format!("{salt}:{}", hex::encode(key))
}

/// 验证密码
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt, key_hex)) = stored.split_once(':') else {
        return false;
    };
    let Ok(key) = hex::decode(key_hex) else {
        return false;
    };
    if key.len() != KEY_LEN {
        return false;
    }

    pbkdf2::verify(
        PBKDF2_ALGORITHM,
        PBKDF2_ITERATIONS,
        salt.as_bytes(),
        password.as_bytes(),
        &key,
    )
    .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN_SALT: &str = "0123456789abcdef0123456789abcdef";
    const KNOWN_KEY: &str = "b359e3a32fe324be8ff7c1f9d65aa72a05523d6de2708ebaa3563ea1bfd839b8cf419fcf3c076d2aabb4016ce840a237c7be0ec8f2fdf5ad1b367c1db673d19d";

    #[test]
    fn test_known_vector() {
        assert_eq!(
            hash_with_salt("adminpassword", KNOWN_SALT),
            format!("{KNOWN_SALT}:{KNOWN_KEY}")
        );
        assert!(verify_password(
            "adminpassword",
            &format!("{KNOWN_SALT}:{KNOWN_KEY}")
        ));
    }

    #[test]
    fn test_hash_and_verify() {
        let stored = hash_password("S3cure-pass").unwrap();
        let (salt, key) = stored.split_once(':').unwrap();
        assert_eq!(salt.len(), SALT_LEN * 2);
        assert_eq!(key.len(), KEY_LEN * 2);

        assert!(verify_password("S3cure-pass", &stored));
        assert!(!verify_password("s3cure-pass", &stored));
    }

    #[test]
    fn test_salts_differ() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash_rejected() {
        assert!(!verify_password("pw", "no-separator"));
        assert!(!verify_password("pw", "abcd:not-hex"));
        assert!(!verify_password("pw", "abcd:abcd"));
    }
}
