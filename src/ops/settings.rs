//! Editor settings merge (`.vscode/settings.json`).
//!
//! The settings document belongs to the editor and the user. Only two keys
//! are touched: the `*.ino` file association is ensured, and the
//! configuration-provider override is removed (while it is set the editor
//! ignores `c_cpp_properties.json`).
//!
//! Edits are made in place on the original text, the way `toml_edit` edits a
//! manifest: every byte outside the two managed members is left as it was,
//! so number spelling, indentation and key order all survive. New members
//! copy the separators and indentation of their neighbours.

use std::path::Path;

use serde_json::{Map, Value};

use crate::ops::errors::ConfigureError;

/// Key holding glob-to-language associations.
pub const FILE_ASSOCIATIONS_KEY: &str = "files.associations";

/// Sketch file glob.
pub const SKETCH_GLOB: &str = "*.ino";

/// Language sketches are analyzed as.
pub const SKETCH_LANGUAGE: &str = "cpp";

/// Setting that makes the editor ignore the descriptor.
pub const CONFIGURATION_PROVIDER_KEY: &str = "C_Cpp.default.configurationProvider";

/// Indentation used when the document gives nothing to copy.
const DEFAULT_INDENT: &str = "    ";

/// A parsed settings document.
pub type Settings = Map<String, Value>;

/// Result of merging into a settings file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsUpdate {
    /// The full new file contents.
    pub text: String,
    /// Whether `text` differs from what was on disk.
    pub changed: bool,
}

/// Parse settings text. Blank text is an empty document.
pub fn parse_settings(text: &str, path: &Path) -> Result<Settings, ConfigureError> {
    if text.trim().is_empty() {
        return Ok(Settings::new());
    }

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(malformed(
            path,
            format!("expected a JSON object, found {}", json_kind(&other)),
        )),
        Err(e) => Err(malformed(path, e.to_string())),
    }
}

fn malformed(path: &Path, message: String) -> ConfigureError {
    ConfigureError::MalformedSettings {
        path: path.to_path_buf(),
        message,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Apply the two managed keys to the current settings text.
///
/// `existing` is `None` when there is no settings file yet.
pub fn merge_settings(existing: Option<&str>, path: &Path) -> Result<SettingsUpdate, ConfigureError> {
    let original = existing.unwrap_or_default();
    parse_settings(original, path)?;

    let mut text = if original.trim().is_empty() {
        "{}\n".to_string()
    } else {
        original.to_string()
    };

    let structure = || malformed(path, "could not locate the top-level object".to_string());
    let top = top_level(&text).ok_or_else(structure)?;
    let style = Style::detect(&text, &top);

    while let Some(i) = top_level(&text)
        .ok_or_else(structure)?
        .members
        .iter()
        .position(|m| m.key == CONFIGURATION_PROVIDER_KEY)
    {
        let top = top_level(&text).ok_or_else(structure)?;
        remove_member(&mut text, &top, i);
        tracing::info!(
            "removed `{}` so the generated configuration is used",
            CONFIGURATION_PROVIDER_KEY
        );
    }

    let top = top_level(&text).ok_or_else(structure)?;
    let association = style.object(1, &quote(SKETCH_GLOB), &quote(SKETCH_LANGUAGE));

    match top.members.iter().rposition(|m| m.key == FILE_ASSOCIATIONS_KEY) {
        None => insert_member(&mut text, &top, &quote(FILE_ASSOCIATIONS_KEY), &association, &style, 0),
        Some(i) => {
            let member = top.members[i].clone();
            if text.as_bytes().get(member.value_start) == Some(&b'{') {
                let globs = scan_object(&text, member.value_start).ok_or_else(structure)?;
                match globs.members.iter().rposition(|m| m.key == SKETCH_GLOB) {
                    Some(j) => {
                        let glob = &globs.members[j];
                        let current: Option<Value> =
                            serde_json::from_str(&text[glob.value_start..glob.value_end]).ok();
                        if current.as_ref().and_then(Value::as_str) != Some(SKETCH_LANGUAGE) {
                            text.replace_range(glob.value_start..glob.value_end, &quote(SKETCH_LANGUAGE));
                        }
                    }
                    None => insert_member(
                        &mut text,
                        &globs,
                        &quote(SKETCH_GLOB),
                        &quote(SKETCH_LANGUAGE),
                        &style,
                        1,
                    ),
                }
            } else {
                tracing::warn!("replacing non-object `{}` setting", FILE_ASSOCIATIONS_KEY);
                text.replace_range(member.value_start..member.value_end, &association);
            }
        }
    }

    let changed = text != original;
    Ok(SettingsUpdate { text, changed })
}

fn quote(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

/// Byte offsets of one `"key": value` member.
#[derive(Debug, Clone)]
struct Member {
    key: String,
    /// Opening quote of the key.
    key_start: usize,
    /// Just past the key's closing quote.
    key_end: usize,
    value_start: usize,
    value_end: usize,
}

/// Byte offsets of an object and its members.
#[derive(Debug)]
struct ObjectSpan {
    open: usize,
    close: usize,
    members: Vec<Member>,
}

/// Layout conventions copied from the document.
#[derive(Debug)]
struct Style {
    indent: String,
    newline: &'static str,
    multiline: bool,
}

impl Style {
    fn detect(text: &str, top: &ObjectSpan) -> Self {
        let newline = if text.contains("\r\n") { "\r\n" } else { "\n" };
        let lead = top.members.first().map(|m| leading(text, m));

        let multiline = lead.map_or(true, |l| l.contains('\n'));
        let indent = lead
            .and_then(|l| l.rsplit('\n').next())
            .filter(|i| !i.is_empty())
            .unwrap_or(DEFAULT_INDENT)
            .to_string();

        Style {
            indent,
            newline,
            multiline,
        }
    }

    /// A one-member object nested at `depth`.
    fn object(&self, depth: usize, key: &str, value: &str) -> String {
        if self.multiline {
            format!(
                "{{{nl}{inner}{key}: {value}{nl}{outer}}}",
                nl = self.newline,
                inner = self.indent.repeat(depth + 1),
                outer = self.indent.repeat(depth),
            )
        } else {
            format!("{{{}: {}}}", key, value)
        }
    }
}

/// Whitespace between a member and whatever precedes it.
fn leading<'a>(text: &'a str, member: &Member) -> &'a str {
    let before = &text[..member.key_start];
    let trimmed = before.trim_end_matches([' ', '\t', '\r', '\n']);
    &before[trimmed.len()..]
}

fn remove_member(text: &mut String, object: &ObjectSpan, i: usize) {
    let member = &object.members[i];
    let range = if let Some(next) = object.members.get(i + 1) {
        member.key_start..next.key_start
    } else if i > 0 {
        object.members[i - 1].value_end..member.value_end
    } else {
        object.open + 1..object.close
    };
    text.replace_range(range, "");
}

/// Append a member to an object nested at `depth`.
fn insert_member(text: &mut String, object: &ObjectSpan, key: &str, value: &str, style: &Style, depth: usize) {
    match object.members.last() {
        Some(last) => {
            let lead = match leading(text, last) {
                "" => " ".to_string(),
                lead => lead.to_string(),
            };
            let colon = text[last.key_end..last.value_start].to_string();
            text.insert_str(last.value_end, &format!(",{}{}{}{}", lead, key, colon, value));
        }
        None => {
            let replacement = style.object(depth, key, value);
            text.replace_range(object.open..=object.close, &replacement);
        }
    }
}

fn top_level(text: &str) -> Option<ObjectSpan> {
    let open = text.len() - text.trim_start().len();
    scan_object(text, open)
}

/// Locate the members of the object starting at `open`.
///
/// The text has already been validated as JSON, so this only tracks
/// structure.
fn scan_object(text: &str, open: usize) -> Option<ObjectSpan> {
    let mut s = Scanner {
        bytes: text.as_bytes(),
        pos: open,
    };
    s.expect(b'{')?;
    s.skip_ws();

    let mut members = Vec::new();
    if s.peek()? == b'}' {
        return Some(ObjectSpan {
            open,
            close: s.pos,
            members,
        });
    }

    loop {
        s.skip_ws();
        let key_start = s.pos;
        s.string()?;
        let key_end = s.pos;
        let key: String = serde_json::from_str(&text[key_start..key_end]).ok()?;

        s.skip_ws();
        s.expect(b':')?;
        s.skip_ws();
        let value_start = s.pos;
        s.value()?;
        members.push(Member {
            key,
            key_start,
            key_end,
            value_start,
            value_end: s.pos,
        });

        s.skip_ws();
        match s.peek()? {
            b',' => s.pos += 1,
            b'}' => {
                return Some(ObjectSpan {
                    open,
                    close: s.pos,
                    members,
                })
            }
            _ => return None,
        }
    }
}

struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Scanner<'_> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn expect(&mut self, byte: u8) -> Option<()> {
        (self.peek()? == byte).then(|| self.pos += 1)
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    fn string(&mut self) -> Option<()> {
        self.expect(b'"')?;
        loop {
            match self.peek()? {
                b'\\' => self.pos += 2,
                b'"' => {
                    self.pos += 1;
                    return Some(());
                }
                _ => self.pos += 1,
            }
        }
    }

    fn value(&mut self) -> Option<()> {
        match self.peek()? {
            b'"' => self.string(),
            b'{' | b'[' => {
                let mut depth = 0usize;
                loop {
                    match self.peek()? {
                        b'"' => {
                            self.string()?;
                            continue;
                        }
                        b'{' | b'[' => depth += 1,
                        b'}' | b']' => {
                            depth -= 1;
                            if depth == 0 {
                                self.pos += 1;
                                return Some(());
                            }
                        }
                        _ => {}
                    }
                    self.pos += 1;
                }
            }
            _ => {
                while matches!(self.peek(), Some(b) if !matches!(b, b',' | b'}' | b']' | b' ' | b'\t' | b'\n' | b'\r'))
                {
                    self.pos += 1;
                }
                Some(())
            }
        }
    }
}
