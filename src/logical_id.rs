use crate::error::{Error, Result};

const HASH_LEN: usize = 8;
const MAX_HUMAN_LEN: usize = 255 - HASH_LEN;

/// path components that are left out of the human readable portion
/// of a logical id. they still contribute to the hash.
const HIDDEN_COMPONENTS: &[&str] = &["Resource", "Default"];

pub fn validate_construct_id(id: &str) -> Result<()> {
    if id.is_empty() || id.contains('/') {
        return Err(Error::InvalidId(id.to_string()));
    }
    Ok(())
}

/// creates a cloudformation logical id out of a construct path.
/// eg: `["testing", "testing-assets-bucket", "Resource"]` becomes
/// `testingtestingassetsbucketXXXXXXXX` where the suffix is a hash
/// of the full path. Logical ids can only be alphanumeric, so
/// everything else gets stripped from the human portion.
pub fn logical_id(path: &[&str]) -> Result<String> {
    if path.is_empty() {
        return Err(Error::InvalidId(String::new()));
    }
    for component in path {
        validate_construct_id(component)?;
    }

    let mut human: String = path.iter()
        .filter(|c| !HIDDEN_COMPONENTS.contains(c))
        .flat_map(|c| c.chars())
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    human.truncate(MAX_HUMAN_LEN);

    let hash = adler::adler32_slice(path.join("/").as_bytes());
    Ok(format!("{human}{hash:0width$X}", width = HASH_LEN))
}

/// joins `parts` with `-` into a physical resource name of at most `max_len`
/// characters. A name that is too long is cut and gets the hash of the full
/// name appended, so names that only differ past the cut stay distinct.
pub fn physical_name(parts: &[&str], max_len: usize) -> String {
    let full = parts.join("-");
    if full.len() <= max_len {
        return full;
    }
    let hash = format!("{:0width$X}", adler::adler32_slice(full.as_bytes()), width = HASH_LEN);
    let mut cut = max_len.saturating_sub(HASH_LEN);
    while !full.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}{hash}", &full[..cut])
}
