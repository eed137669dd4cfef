//! Huella de contenido `algoritmo:hex`.
//!
//! Un hex de 32 caracteres sin prefijo se interpreta como MD5: es la forma
//! en que se publican los hashes de los datasets de referencia.
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

use md5::Md5;
use sha2::{Digest, Sha256};

use crate::error::CacheError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Md5,
    Sha256,
    Blake3,
}

impl HashAlgorithm {
    pub fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Blake3 => "blake3",
        }
    }

    fn hex_len(self) -> usize {
        match self {
            HashAlgorithm::Md5 => 32,
            HashAlgorithm::Sha256 | HashAlgorithm::Blake3 => 64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    algorithm: HashAlgorithm,
    hex: String,
}

impl Fingerprint {
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    pub fn hex(&self) -> &str {
        &self.hex
    }

    /// Calcula la huella de `path` leyendo el archivo en bloques.
    pub fn of_file(algorithm: HashAlgorithm, path: &Path) -> io::Result<Fingerprint> {
        let mut file = File::open(path)?;
        let hex = match algorithm {
            HashAlgorithm::Md5 => digest_reader::<Md5>(&mut file)?,
            HashAlgorithm::Sha256 => digest_reader::<Sha256>(&mut file)?,
            HashAlgorithm::Blake3 => {
                let mut h = blake3::Hasher::new();
                io::copy(&mut file, &mut h)?;
                h.finalize().to_hex().to_string()
            }
        };
        Ok(Fingerprint { algorithm, hex })
    }

    /// `true` si el archivo existe y su contenido tiene esta huella.
    pub fn matches_file(&self, path: &Path) -> bool {
        match Fingerprint::of_file(self.algorithm, path) {
            Ok(actual) => actual == *self,
            Err(_) => false,
        }
    }
}

fn digest_reader<D: Digest>(reader: &mut impl Read) -> io::Result<String> {
    let mut hasher = D::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize().iter().map(|b| format!("{b:02x}")).collect())
}

impl FromStr for Fingerprint {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (algorithm, hex) = match s.split_once(':') {
            Some(("md5", hex)) => (HashAlgorithm::Md5, hex),
            Some(("sha256", hex)) => (HashAlgorithm::Sha256, hex),
            Some(("blake3", hex)) => (HashAlgorithm::Blake3, hex),
            Some(_) => return Err(CacheError::InvalidFingerprint(s.to_string())),
            None => (HashAlgorithm::Md5, s),
        };
        if hex.len() != algorithm.hex_len() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CacheError::InvalidFingerprint(s.to_string()));
        }
        Ok(Fingerprint { algorithm, hex: hex.to_ascii_lowercase() })
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm.name(), self.hex)
    }
}
