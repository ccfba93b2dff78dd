//! Signature image upload: file on disk → `data:` URL stored on the employee.

use std::path::Path;

use anyhow::Context;
use base64::Engine as _;

/// Read `path` and encode it as `data:<mime>;base64,<payload>`.
pub fn load_signature(path: &Path) -> anyhow::Result<String> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("cannot read signature image {}", path.display()))?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(format!("data:{};base64,{}", mime.essence_str(), payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_becomes_data_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ttd.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let url = load_signature(&path).unwrap();
        assert_eq!(url, "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_signature(&dir.path().join("nope.png")).is_err());
    }
}
