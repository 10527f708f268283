use std::fs::File;
use std::io;
use std::path::Path;

/// BLAKE3 digest of a file's full content, as lowercase hex.
pub fn content_hash(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = blake3::Hasher::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(hasher.finalize().to_hex().to_string())
}

pub fn hash_data(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_file_hash_matches_data_hash() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.bin");
        let data = vec![0xAAu8; 70_000];
        fs::write(&path, &data).unwrap();

        let hash = content_hash(&path).unwrap();
        assert_eq!(hash, hash_data(&data));
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        assert!(content_hash(&dir.path().join("missing")).is_err());
    }
}
