use thiserror::Error;

/// Placeholder words compiled into the template image. The patcher replaces
/// each with the per-tag bytes; if a placeholder is absent the patch leaves
/// the image untouched and the programmer would flash stale values, so the
/// template must come from a build that still carries all three.
pub const ID_PLACEHOLDER: [u8; 4] = [0xBA, 0xDA, 0xBA, 0xAB];
pub const SLOPE_PLACEHOLDER: [u8; 4] = [0xCA, 0xDA, 0xCA, 0xAC];
pub const OFFSET_PLACEHOLDER: [u8; 4] = [0xDA, 0xDA, 0xDA, 0xAD];

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("expected 8 hex digits, got {got:?}")]
    BadWord { got: String },
}

/// Hex rendering of a tag id, as embedded in the image.
pub fn id_word(index: u32) -> String {
    format!("{index:08x}")
}

/// Normalises the float helper's stdout into an 8-hex-digit word.
pub fn parse_word(stdout: &str) -> Result<String, PatchError> {
    let word = stdout.trim();
    if word.len() == 8 && word.bytes().all(|b| b.is_ascii_hexdigit()) {
        Ok(word.to_ascii_lowercase())
    } else {
        Err(PatchError::BadWord {
            got: stdout.to_string(),
        })
    }
}

/// Patch expression substituting the id placeholder with the tag id.
pub fn id_substitution(index: u32) -> String {
    expression(&ID_PLACEHOLDER, &id_word(index))
}

/// Patch expression substituting `key` with a validated 8-hex-digit word.
pub fn word_substitution(key: &[u8; 4], word: &str) -> Result<String, PatchError> {
    let word = parse_word(word)?;
    Ok(expression(key, &word))
}

fn expression(key: &[u8; 4], word: &str) -> String {
    format!("s/{}/{}/", key_escape(key), le_escape(word))
}

fn key_escape(key: &[u8; 4]) -> String {
    let mut out = String::with_capacity(16);
    for b in key {
        out.push_str(&format!("\\x{b:02x}"));
    }
    out
}

/// The word is big-endian hex; the target stores words least-significant
/// byte first, so the byte pairs go into the expression in reverse.
fn le_escape(word: &str) -> String {
    let mut out = String::with_capacity(16);
    for i in (0..4).rev() {
        out.push_str("\\x");
        out.push_str(&word[2 * i..2 * i + 2]);
    }
    out
}
