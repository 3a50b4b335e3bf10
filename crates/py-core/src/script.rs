//! Character-level Unicode script classification.

use unicode_script::{Script, UnicodeScript};

/// Check the Unicode `Script=Han` property. This is the script table, not a
/// block range, so it also covers the extension planes, compatibility
/// ideographs, CJK radicals, and marks such as 々 and 〇.
pub fn is_han(c: char) -> bool {
    c.script() == Script::Han
}
