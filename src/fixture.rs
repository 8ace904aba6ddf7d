//! Flat binary sample dumps.
//!
//! An artifact is the sequence's samples as consecutive little-endian IEEE-754
//! binary64 pairs, real part first. There is no header, length prefix or
//! padding, so a sequence of `n` samples is exactly `16 * n` bytes. Working
//! precision is narrowed to `f64` here and nowhere else.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::num::{Complex, Complex64, Float};

/// Bytes per serialized sample.
pub const SAMPLE_BYTES: usize = 16;

/// Which side of the transform an artifact holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Time-domain source sequence.
    Input,
    /// Forward transform of the input.
    Output,
}

impl Role {
    /// Extension used in artifact names.
    pub fn tag(self) -> &'static str {
        match self {
            Role::Input => "in",
            Role::Output => "out",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Errors raised while writing or reading artifacts.
#[derive(Debug)]
pub enum FixtureError {
    /// Creating, writing, renaming or reading the file failed.
    Io { path: PathBuf, source: io::Error },
    /// The byte count is not a whole number of samples.
    Truncated { len: usize },
    /// The artifact does not hold the expected number of samples.
    LengthMismatch {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },
    /// `n` samples would not fit in an addressable byte count.
    TooLong { n: usize },
}

impl core::fmt::Display for FixtureError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FixtureError::Io { path, source } => {
                write!(f, "{}: {}", path.display(), source)
            }
            FixtureError::Truncated { len } => {
                write!(f, "{len} bytes is not a multiple of {SAMPLE_BYTES}")
            }
            FixtureError::LengthMismatch {
                path,
                expected,
                actual,
            } => write!(
                f,
                "{}: expected {expected} bytes, found {actual}",
                path.display()
            ),
            FixtureError::TooLong { n } => {
                write!(f, "{n} samples exceed the addressable artifact size")
            }
        }
    }
}

impl std::error::Error for FixtureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FixtureError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// A written artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureArtifact {
    pub n: usize,
    pub role: Role,
    pub path: PathBuf,
    /// BLAKE3 hash of the file contents.
    pub digest: blake3::Hash,
}

/// File name for the artifact of a length-`n` case, e.g. `fftw.8.out`.
pub fn artifact_name(n: usize, role: Role) -> String {
    format!("fftw.{n}.{role}")
}

/// Serialize `seq`, narrowing each component to `f64`.
pub fn encode<T: Float>(seq: &[Complex<T>]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(seq.len() * SAMPLE_BYTES);
    for c in seq {
        let c = c.to_f64();
        bytes.extend_from_slice(&c.re.to_le_bytes());
        bytes.extend_from_slice(&c.im.to_le_bytes());
    }
    bytes
}

/// Parse an artifact's bytes back into samples.
pub fn decode(bytes: &[u8]) -> Result<Vec<Complex64>, FixtureError> {
    if bytes.len() % SAMPLE_BYTES != 0 {
        return Err(FixtureError::Truncated { len: bytes.len() });
    }
    let read_f64 = |b: &[u8]| {
        let mut word = [0u8; 8];
        word.copy_from_slice(b);
        f64::from_le_bytes(word)
    };
    Ok(bytes
        .chunks_exact(SAMPLE_BYTES)
        .map(|chunk| Complex64::new(read_f64(&chunk[..8]), read_f64(&chunk[8..])))
        .collect())
}

/// Write `seq` as the `role` artifact for its length into `dir`.
///
/// The bytes go to a hidden sibling file first and are renamed into place
/// after they are synced, so a failed write never leaves a short artifact
/// under the final name.
pub fn write_artifact<T: Float>(
    dir: &Path,
    role: Role,
    seq: &[Complex<T>],
) -> Result<FixtureArtifact, FixtureError> {
    let n = seq.len();
    let name = artifact_name(n, role);
    let path = dir.join(&name);
    let partial = dir.join(format!(".{name}.partial"));
    let bytes = encode(seq);

    let written = File::create(&partial).and_then(|mut file| {
        file.write_all(&bytes)?;
        file.sync_all()
    });
    if let Err(source) = written {
        let _ = fs::remove_file(&partial);
        return Err(FixtureError::Io {
            path: partial,
            source,
        });
    }
    if let Err(source) = fs::rename(&partial, &path) {
        let _ = fs::remove_file(&partial);
        return Err(FixtureError::Io { path, source });
    }

    let digest = blake3::hash(&bytes);
    debug!(
        "wrote {} ({} bytes, blake3 {})",
        path.display(),
        bytes.len(),
        digest.to_hex()
    );
    Ok(FixtureArtifact {
        n,
        role,
        path,
        digest,
    })
}

/// Read the `role` artifact of a length-`n` case from `dir`.
///
/// The file must hold exactly `n` samples.
pub fn read_artifact(dir: &Path, n: usize, role: Role) -> Result<Vec<Complex64>, FixtureError> {
    let expected = n
        .checked_mul(SAMPLE_BYTES)
        .ok_or(FixtureError::TooLong { n })?;
    let path = dir.join(artifact_name(n, role));
    let bytes = fs::read(&path).map_err(|source| FixtureError::Io {
        path: path.clone(),
        source,
    })?;
    if bytes.len() != expected {
        return Err(FixtureError::LengthMismatch {
            path,
            expected,
            actual: bytes.len(),
        });
    }
    decode(&bytes)
}

/// Both sides of one case, as a DFT under test would consume them.
#[derive(Debug, Clone, PartialEq)]
pub struct FixturePair {
    pub input: Vec<Complex64>,
    pub output: Vec<Complex64>,
}

impl FixturePair {
    /// Read both artifacts of the length-`n` case from `dir`.
    pub fn load(dir: &Path, n: usize) -> Result<Self, FixtureError> {
        Ok(Self {
            input: read_artifact(dir, n, Role::Input)?,
            output: read_artifact(dir, n, Role::Output)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::num::{ComplexWide, Wide};
    use tempfile::tempdir;

    #[test]
    fn names_embed_size_and_role() {
        assert_eq!(artifact_name(8, Role::Input), "fftw.8.in");
        assert_eq!(artifact_name(120120, Role::Output), "fftw.120120.out");
    }

    #[test]
    fn encoding_layout() {
        let seq = [Complex64::new(1.0, -2.0), Complex64::new(0.5, 0.25)];
        let bytes = encode(&seq);
        assert_eq!(bytes.len(), 32);
        assert_eq!(&bytes[0..8], &1.0f64.to_le_bytes());
        assert_eq!(&bytes[8..16], &(-2.0f64).to_le_bytes());
        assert_eq!(&bytes[16..24], &0.5f64.to_le_bytes());
        assert_eq!(&bytes[24..32], &0.25f64.to_le_bytes());
        assert!(encode::<f64>(&[]).is_empty());
    }

    #[test]
    fn wide_values_are_narrowed() {
        let third = Wide::ONE / Wide::from(3.0);
        let bytes = encode(&[ComplexWide::new(third, -third)]);
        let back = decode(&bytes).unwrap();
        assert_eq!(back, vec![Complex64::new(1.0 / 3.0, -1.0 / 3.0)]);
    }

    #[test]
    fn decode_rejects_partial_samples() {
        assert!(matches!(
            decode(&[0u8; 17]),
            Err(FixtureError::Truncated { len: 17 })
        ));
    }

    #[test]
    fn write_then_read() {
        let dir = tempdir().unwrap();
        let seq = [Complex64::new(0.125, -0.375); 3];
        let artifact = write_artifact(dir.path(), Role::Output, &seq).unwrap();
        assert_eq!(artifact.path, dir.path().join("fftw.3.out"));
        assert_eq!(fs::metadata(&artifact.path).unwrap().len(), 48);
        assert_eq!(artifact.digest, blake3::hash(&encode(&seq)));
        assert!(!dir.path().join(".fftw.3.out.partial").exists());

        let back = read_artifact(dir.path(), 3, Role::Output).unwrap();
        assert_eq!(back, seq.to_vec());
    }

    #[test]
    fn read_checks_expected_length() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("fftw.2.in"), [0u8; 16]).unwrap();
        let err = read_artifact(dir.path(), 2, Role::Input).unwrap_err();
        assert!(matches!(
            err,
            FixtureError::LengthMismatch {
                expected: 32,
                actual: 16,
                ..
            }
        ));
    }

    #[test]
    fn read_rejects_unaddressable_lengths() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(artifact_name(usize::MAX, Role::Input)), [0u8; 16]).unwrap();
        let err = read_artifact(dir.path(), usize::MAX, Role::Input).unwrap_err();
        assert!(matches!(err, FixtureError::TooLong { n: usize::MAX }));

        // A wrapped product must not let an empty file through.
        let n = usize::MAX / SAMPLE_BYTES + 1;
        fs::write(dir.path().join(artifact_name(n, Role::Input)), b"").unwrap();
        assert!(matches!(
            FixturePair::load(dir.path(), n),
            Err(FixtureError::TooLong { .. })
        ));
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = write_artifact(&missing, Role::Input, &[Complex64::zero()]).unwrap_err();
        assert!(matches!(err, FixtureError::Io { .. }));
        assert!(!missing.join("fftw.1.in").exists());
        assert!(err.to_string().contains(".fftw.1.in.partial"));
    }
}
