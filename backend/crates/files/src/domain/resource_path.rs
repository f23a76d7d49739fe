//! Resource Path Value Object
//!
//! A caller-supplied path that has been proven to stay below the resource
//! root lexically: relative, no `.`/`..` segments, no backslashes, drive
//! prefixes or NUL, and none of those hidden behind percent-encoding.
//! Every decoded layer is checked, but the name itself is kept as given:
//! `a%41.txt` names a file called `a%41.txt`, not `aA.txt`.
//! Symlink escapes can only be caught against the filesystem; see
//! `infra::fs`.

use std::fmt;
use std::path::{Component, Path};

use crate::error::{ResourceError, ResourceResult};

/// Maximum accepted length in bytes (after decoding)
const MAX_PATH_LEN: usize = 1024;

/// Percent-decoding passes before giving up; each layer is re-checked
const MAX_DECODE_PASSES: usize = 4;

#[derive(Clone, PartialEq, Eq)]
pub struct ResourcePath(String);

impl ResourcePath {
    pub fn parse(raw: &str) -> ResourceResult<Self> {
        let mut current = raw.to_string();

        for _ in 0..MAX_DECODE_PASSES {
            check_lexical(&current)?;

            let decoded = urlencoding::decode(&current)
                .map_err(|_| ResourceError::InvalidPath)?
                .into_owned();
            if decoded == current {
                return Ok(Self(raw.to_string()));
            }
            current = decoded;
        }

        // Still changing after several passes: nobody needs that many layers
        Err(ResourceError::InvalidPath)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }
}

fn check_lexical(candidate: &str) -> ResourceResult<()> {
    let rejected = candidate.is_empty()
        || candidate.len() > MAX_PATH_LEN
        || candidate.starts_with('/')
        || candidate.contains(['\\', '\0', ':'])
        || candidate.chars().any(char::is_control)
        || candidate
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..")
        || !Path::new(candidate)
            .components()
            .all(|c| matches!(c, Component::Normal(_)));

    if rejected {
        Err(ResourceError::InvalidPath)
    } else {
        Ok(())
    }
}

impl fmt::Debug for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ResourcePath").field(&self.0).finish()
    }
}
