// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::os_environment::Environment;
use log::trace;

/// Windows path limit, in UTF-16 units.
pub const MAX_PATH: usize = 260;

const PERCENT: u16 = b'%' as u16;
const QUOTE: u16 = b'"' as u16;
const SEMICOLON: u16 = b';' as u16;

/// A write would have grown the buffer past [`MAX_PATH`]. The buffer is left
/// untouched; paths are never silently truncated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityError;

impl std::fmt::Display for CapacityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "path exceeds the {} unit limit", MAX_PATH)
    }
}

impl std::error::Error for CapacityError {}

/// Fixed-capacity UTF-16 path buffer.
///
/// Mirrors the fixed `MAX_PATH` buffers the Windows path APIs expect: every
/// write checks the remaining capacity up front and fails with
/// [`CapacityError`] instead of truncating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativePathBuf {
    buf: [u16; MAX_PATH],
    len: usize,
}

impl NativePathBuf {
    pub fn new() -> Self {
        NativePathBuf {
            buf: [0; MAX_PATH],
            len: 0,
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CapacityError> {
        let mut path = NativePathBuf::new();
        let wide: Vec<u16> = s.encode_utf16().collect();
        path.push_wide(&wide)?;
        Ok(path)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        MAX_PATH
    }

    pub fn as_wide(&self) -> &[u16] {
        &self.buf[..self.len]
    }

    pub fn last(&self) -> Option<u16> {
        if self.len == 0 {
            None
        } else {
            Some(self.buf[self.len - 1])
        }
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Shrinks the buffer to `len` units. A no-op when the buffer is already
    /// shorter.
    pub fn truncate(&mut self, len: usize) {
        if len < self.len {
            self.len = len;
        }
    }

    pub fn push(&mut self, unit: u16) -> Result<(), CapacityError> {
        if self.len + 1 > MAX_PATH {
            return Err(CapacityError);
        }
        self.buf[self.len] = unit;
        self.len += 1;
        Ok(())
    }

    /// Appends a known-length suffix. The remaining capacity is checked
    /// before anything is written, so a failed push leaves no partial suffix
    /// behind.
    pub fn push_wide(&mut self, suffix: &[u16]) -> Result<(), CapacityError> {
        if self.len + suffix.len() > MAX_PATH {
            return Err(CapacityError);
        }
        self.buf[self.len..self.len + suffix.len()].copy_from_slice(suffix);
        self.len += suffix.len();
        Ok(())
    }

    pub fn push_str(&mut self, suffix: &str) -> Result<(), CapacityError> {
        let wide: Vec<u16> = suffix.encode_utf16().collect();
        self.push_wide(&wide)
    }
}

impl Default for NativePathBuf {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies the next entry of a PATH-style list into `buf` and returns the
/// rest of the list, or `None` once the cursor can make no more progress.
///
/// A leading `"` switches the terminator from `;` to the closing quote, so
/// quoted entries may contain semicolons. At most `MAX_PATH - 2` units are
/// copied, leaving room for a trailing separator; a longer entry is silently
/// cut at that boundary and the walk carries on from where the copy stopped.
pub fn walk_path_list<'a>(cursor: &'a [u16], buf: &mut NativePathBuf) -> Option<&'a [u16]> {
    buf.clear();

    if cursor.is_empty() {
        return None;
    }

    let mut i = 0;
    let term = if cursor[0] == QUOTE {
        i += 1;
        QUOTE
    } else {
        SEMICOLON
    };

    while i < cursor.len() && cursor[i] != term && buf.len() < MAX_PATH - 2 {
        // cannot fail below the boundary checked above
        let _ = buf.push(cursor[i]);
        i += 1;
    }

    while i < cursor.len() && (cursor[i] == term || cursor[i] == SEMICOLON) {
        i += 1;
    }

    Some(&cursor[i..])
}

/// Expands `%VAR%` references in `template` against `environment`.
///
/// Follows the `ExpandEnvironmentStringsW` contract: a reference to an
/// undefined variable is left in the output verbatim, so callers detect
/// "does not resolve" by a leading `%` rather than by a hard error. Returns
/// `None` when the expansion is empty or exceeds [`MAX_PATH`].
pub fn expand_template(
    environment: &dyn Environment,
    template: &[u16],
) -> Option<NativePathBuf> {
    let mut dest = NativePathBuf::new();

    let mut i = 0;
    while i < template.len() {
        if template[i] == PERCENT {
            if let Some(end) = template[i + 1..].iter().position(|&u| u == PERCENT) {
                let name = String::from_utf16(&template[i + 1..i + 1 + end]).ok()?;
                match environment.get_env_var(&name) {
                    Some(value) => {
                        let wide: Vec<u16> = value.encode_utf16().collect();
                        if dest.push_wide(&wide).is_err() {
                            trace!("expansion of %{}% exceeds the path limit", name);
                            return None;
                        }
                    }
                    // undefined variables stay in place
                    None => dest.push_wide(&template[i..i + end + 2]).ok()?,
                }
                i += end + 2;
                continue;
            }
        }
        dest.push(template[i]).ok()?;
        i += 1;
    }

    if dest.is_empty() {
        return None;
    }
    Some(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MockEnvironment {
        env_vars: HashMap<String, String>,
    }

    impl MockEnvironment {
        fn new() -> Self {
            Self {
                env_vars: HashMap::new(),
            }
        }

        fn with_env_var(mut self, key: &str, value: &str) -> Self {
            self.env_vars.insert(key.to_string(), value.to_string());
            self
        }
    }

    impl Environment for MockEnvironment {
        fn get_env_var(&self, key: &str) -> Option<String> {
            self.env_vars.get(key).cloned()
        }
    }

    fn wide(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    fn to_string(buf: &NativePathBuf) -> String {
        String::from_utf16(buf.as_wide()).unwrap()
    }

    #[test]
    fn push_fails_at_capacity_and_leaves_buffer_unchanged() {
        let mut buf = NativePathBuf::new();
        for _ in 0..MAX_PATH {
            buf.push(b'a' as u16).unwrap();
        }
        assert_eq!(buf.len(), MAX_PATH);
        assert_eq!(buf.push(b'b' as u16), Err(CapacityError));
        assert_eq!(buf.len(), MAX_PATH);
        assert!(buf.as_wide().iter().all(|&u| u == b'a' as u16));
    }

    #[test]
    fn push_wide_is_all_or_nothing() {
        let mut buf = NativePathBuf::from_str(&"x".repeat(MAX_PATH - 3)).unwrap();
        assert_eq!(buf.push_wide(&wide("abcd")), Err(CapacityError));
        assert_eq!(buf.len(), MAX_PATH - 3);

        buf.push_wide(&wide("abc")).unwrap();
        assert_eq!(buf.len(), MAX_PATH);
    }

    #[test]
    fn truncate_only_shrinks() {
        let mut buf = NativePathBuf::from_str("abcdef").unwrap();
        buf.truncate(100);
        assert_eq!(buf.len(), 6);
        buf.truncate(2);
        assert_eq!(to_string(&buf), "ab");
    }

    #[test]
    fn walk_splits_on_semicolons() {
        let path = wide(r"C:\one;C:\two;C:\three");
        let mut buf = NativePathBuf::new();
        let mut entries = vec![];
        let mut cursor: &[u16] = &path;
        while let Some(rest) = walk_path_list(cursor, &mut buf) {
            entries.push(to_string(&buf));
            cursor = rest;
        }
        assert_eq!(entries, vec![r"C:\one", r"C:\two", r"C:\three"]);
    }

    #[test]
    fn walk_respects_quoted_entries() {
        let path = wide("\"C:\\has;semi\";C:\\plain");
        let mut buf = NativePathBuf::new();

        let rest = walk_path_list(&path, &mut buf).unwrap();
        assert_eq!(to_string(&buf), r"C:\has;semi");

        let rest = walk_path_list(rest, &mut buf).unwrap();
        assert_eq!(to_string(&buf), r"C:\plain");

        assert!(walk_path_list(rest, &mut buf).is_none());
    }

    #[test]
    fn walk_skips_separator_runs() {
        let path = wide(r"C:\one;;;C:\two");
        let mut buf = NativePathBuf::new();

        let rest = walk_path_list(&path, &mut buf).unwrap();
        assert_eq!(to_string(&buf), r"C:\one");

        walk_path_list(rest, &mut buf).unwrap();
        assert_eq!(to_string(&buf), r"C:\two");
    }

    #[test]
    fn walk_returns_none_on_empty_input() {
        let mut buf = NativePathBuf::new();
        assert!(walk_path_list(&[], &mut buf).is_none());
    }

    #[test]
    fn walk_truncates_oversized_entries_at_the_boundary() {
        let entry = "a".repeat(MAX_PATH + 40);
        let path = wide(&entry);
        let mut buf = NativePathBuf::new();

        let rest = walk_path_list(&path, &mut buf).unwrap();
        assert_eq!(buf.len(), MAX_PATH - 2);

        // the remainder of the oversized entry is picked up by the next call
        let rest = walk_path_list(rest, &mut buf).unwrap();
        assert_eq!(buf.len(), 42);
        assert!(walk_path_list(rest, &mut buf).is_none());
    }

    #[test]
    fn walk_entry_exactly_at_the_boundary() {
        let entry = "b".repeat(MAX_PATH - 2);
        let path = wide(&format!("{};C:\\next", entry));
        let mut buf = NativePathBuf::new();

        let rest = walk_path_list(&path, &mut buf).unwrap();
        assert_eq!(buf.len(), MAX_PATH - 2);

        walk_path_list(rest, &mut buf).unwrap();
        assert_eq!(to_string(&buf), r"C:\next");
    }

    #[test]
    fn expand_resolves_defined_variables() {
        let env = MockEnvironment::new().with_env_var("HOME", r"C:\Users\me");
        let expanded = expand_template(&env, &wide(r"%HOME%\git")).unwrap();
        assert_eq!(to_string(&expanded), r"C:\Users\me\git");
    }

    #[test]
    fn expand_concatenates_adjacent_variables() {
        let env = MockEnvironment::new()
            .with_env_var("HOMEDRIVE", "C:")
            .with_env_var("HOMEPATH", r"\Users\me");
        let expanded = expand_template(&env, &wide(r"%HOMEDRIVE%%HOMEPATH%\")).unwrap();
        assert_eq!(to_string(&expanded), r"C:\Users\me\");
    }

    #[test]
    fn expand_leaves_undefined_variables_in_place() {
        let env = MockEnvironment::new();
        let expanded = expand_template(&env, &wide(r"%DOES_NOT_EXIST%\git")).unwrap();
        assert_eq!(to_string(&expanded), r"%DOES_NOT_EXIST%\git");
        assert_eq!(expanded.as_wide()[0], b'%' as u16);
    }

    #[test]
    fn expand_fails_on_empty_template() {
        let env = MockEnvironment::new();
        assert!(expand_template(&env, &[]).is_none());
    }

    #[test]
    fn expand_fails_when_the_result_exceeds_the_path_limit() {
        let env = MockEnvironment::new().with_env_var("BIG", &"v".repeat(MAX_PATH));
        assert!(expand_template(&env, &wide(r"%BIG%\git")).is_none());
    }

    #[test]
    fn expand_passes_unpaired_percent_through() {
        let env = MockEnvironment::new();
        let expanded = expand_template(&env, &wide(r"C:\100%")).unwrap();
        assert_eq!(to_string(&expanded), r"C:\100%");
    }
}
