//! Signed session cookies.
//!
//! The codec authenticates a single string value (the signed-in email)
//! under a field name with HMAC-SHA256. Values are signed, not encrypted:
//! the cookie is tamper-evident, not secret.
//!
//! Token format: `base64url(value) "." base64url(hmac(name "." base64url(value)))`.

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use rand::{rngs::OsRng, RngCore};
use sha2::Sha256;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

const SECRET_LEN: usize = 32;

/// Encodes and decodes signed cookie values with a symmetric secret.
pub struct SessionCodec {
    key: Vec<u8>,
}

impl SessionCodec {
    pub fn new(key: Vec<u8>) -> Self {
        Self { key }
    }

    /// Produces an opaque token authenticating `value` under `name`.
    pub fn encode(&self, name: &str, value: &str) -> String {
        let payload = URL_SAFE_NO_PAD.encode(value.as_bytes());
        let mac = self.sign(name, &payload);
        format!("{payload}.{}", URL_SAFE_NO_PAD.encode(mac))
    }

    /// Recovers the value from a token, failing on any forgery, corruption,
    /// or field-name mismatch.
    pub fn decode(&self, name: &str, token: &str) -> Result<String, AppError> {
        let (payload, sig) = token.split_once('.').ok_or(AppError::Authentication)?;
        let sig = URL_SAFE_NO_PAD
            .decode(sig)
            .map_err(|_| AppError::Authentication)?;

        let mut mac = HmacSha256::new_from_slice(&self.key)
            .expect("HMAC can take key of any size");
        mac.update(name.as_bytes());
        mac.update(b".");
        mac.update(payload.as_bytes());
        mac.verify_slice(&sig).map_err(|_| AppError::Authentication)?;

        let value = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| AppError::Authentication)?;
        String::from_utf8(value).map_err(|_| AppError::Authentication)
    }

    fn sign(&self, name: &str, payload: &str) -> [u8; 32] {
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .expect("HMAC can take key of any size");
        mac.update(name.as_bytes());
        mac.update(b".");
        mac.update(payload.as_bytes());
        mac.finalize().into_bytes().into()
    }
}

/// Reads the session secret from `path`, generating and persisting a fresh
/// one on first start. Any other I/O failure is fatal to startup.
pub fn load_or_generate_secret(path: &Path) -> io::Result<Vec<u8>> {
    match fs::read(path) {
        Ok(key) => Ok(key),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            let mut key = vec![0u8; SECRET_LEN];
            OsRng.fill_bytes(&mut key);

            let mut options = fs::OpenOptions::new();
            options.write(true).create_new(true);
            #[cfg(unix)]
            {
                use std::os::unix::fs::OpenOptionsExt;
                // Secret is readable by the owning process only.
                options.mode(0o600);
            }
            options.open(path)?.write_all(&key)?;
            Ok(key)
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> SessionCodec {
        SessionCodec::new(b"test-secret-key-32-bytes-long!!!".to_vec())
    }

    #[test]
    fn round_trip() {
        let codec = codec();
        for value in ["a@b.com", "", "émile@exämple.com", "a.b=c;d"] {
            let token = codec.encode("email", value);
            assert_eq!(codec.decode("email", &token).unwrap(), value);
        }
    }

    #[test]
    fn reject_tampered_token() {
        let codec = codec();
        let token = codec.encode("email", "a@b.com");

        for i in 0..token.len() {
            let mut bytes = token.clone().into_bytes();
            if bytes[i] == b'.' {
                continue;
            }
            bytes[i] ^= 0x01;
            let mutated = String::from_utf8(bytes).unwrap();
            assert!(
                codec.decode("email", &mutated).is_err(),
                "accepted token mutated at byte {i}"
            );
        }
    }

    #[test]
    fn reject_wrong_key() {
        let token = codec().encode("email", "a@b.com");
        let other = SessionCodec::new(b"a-different-secret-key-entirely!".to_vec());
        assert!(other.decode("email", &token).is_err());
    }

    #[test]
    fn reject_wrong_field_name() {
        let codec = codec();
        let token = codec.encode("email", "a@b.com");
        assert!(codec.decode("user", &token).is_err());
    }

    #[test]
    fn reject_malformed_tokens() {
        let codec = codec();
        for token in ["", "no-dot", "!!!.!!!", "YQ.", ".YQ"] {
            assert!(codec.decode("email", token).is_err(), "accepted {token:?}");
        }
    }

    #[test]
    fn secret_generated_once_and_reused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".secret");

        let first = load_or_generate_secret(&path).unwrap();
        assert_eq!(first.len(), SECRET_LEN);

        let second = load_or_generate_secret(&path).unwrap();
        assert_eq!(first, second);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }
}
