//! Character-level diff between a snapshot and the live target

use serde::Serialize;
use similar::{ChangeTag, TextDiff};

/// Kind of a diff part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffTag {
    Equal,
    Delete,
    Insert,
}

impl From<ChangeTag> for DiffTag {
    fn from(tag: ChangeTag) -> Self {
        match tag {
            ChangeTag::Equal => Self::Equal,
            ChangeTag::Delete => Self::Delete,
            ChangeTag::Insert => Self::Insert,
        }
    }
}

/// A run of consecutive characters sharing one tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffPart {
    pub tag: DiffTag,
    pub text: String,
}

/// What changed between the last applied content and the file on disk.
///
/// Deletions are text present in the snapshot but gone from the target;
/// insertions were added to the target since the last apply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CharDiff {
    pub parts: Vec<DiffPart>,
}

impl CharDiff {
    pub fn compute(snapshot: &str, target: &str) -> Self {
        let text_diff = TextDiff::from_chars(snapshot, target);

        let mut parts: Vec<DiffPart> = Vec::new();
        for change in text_diff.iter_all_changes() {
            let tag = DiffTag::from(change.tag());
            match parts.last_mut() {
                Some(last) if last.tag == tag => last.text.push_str(change.value()),
                _ => parts.push(DiffPart {
                    tag,
                    text: change.value().to_string(),
                }),
            }
        }

        Self { parts }
    }

    /// True when snapshot and target are identical.
    pub fn is_empty(&self) -> bool {
        self.parts.iter().all(|part| part.tag == DiffTag::Equal)
    }
}

/// `[-deleted-]{+inserted+}` markup, unchanged text as-is.
impl std::fmt::Display for CharDiff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for part in &self.parts {
            match part.tag {
                DiffTag::Equal => write!(f, "{}", part.text)?,
                DiffTag::Delete => write!(f, "[-{}-]", part.text)?,
                DiffTag::Insert => write!(f, "{{+{}+}}", part.text)?,
            }
        }
        Ok(())
    }
}
