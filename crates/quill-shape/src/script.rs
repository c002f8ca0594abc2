//! Script itemization: splitting text into maximal same-script runs.

use std::ops::Range;

use crate::glyph::Script;
use crate::library::HbLibrary;

/// A maximal run of text sharing one script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRun {
    /// Byte range in the source text.
    pub range: Range<usize>,
    pub script: Script,
}

/// Splits `text` into runs by Unicode script.
///
/// Common and inherited codepoints extend the run in progress, and a
/// leading stretch of them adopts the first concrete script that
/// follows, so punctuation and combining marks never start a run of
/// their own.
pub fn itemize_scripts(lib: &HbLibrary, text: &str) -> Vec<ScriptRun> {
    let funcs = unsafe { (lib.hb_unicode_funcs_get_default)() };
    itemize_with(text, |ch| {
        Script::from_raw(unsafe { (lib.hb_unicode_script)(funcs, ch as u32) })
    })
}

fn itemize_with(text: &str, mut classify: impl FnMut(char) -> Script) -> Vec<ScriptRun> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut runs = Vec::new();
    let mut start = 0;
    let mut current = Script::INVALID;
    for (offset, ch) in text.char_indices() {
        let script = classify(ch);
        if offset == 0 || current == Script::INHERITED || current == Script::COMMON {
            current = script;
        } else if script != current && script != Script::INHERITED && script != Script::COMMON {
            runs.push(ScriptRun {
                range: start..offset,
                script: current,
            });
            current = script;
            start = offset;
        }
    }
    runs.push(ScriptRun {
        range: start..text.len(),
        script: current,
    });
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(ch: char) -> Script {
        match ch {
            'a'..='z' | 'A'..='Z' => Script::LATIN,
            'α'..='ω' => Script::GREEK,
            '\u{0300}'..='\u{036F}' => Script::INHERITED,
            _ => Script::COMMON,
        }
    }

    #[test]
    fn empty_text_has_no_runs() {
        assert!(itemize_with("", classify).is_empty());
    }

    #[test]
    fn single_script_is_one_run() {
        let runs = itemize_with("abc", classify);
        assert_eq!(
            runs,
            vec![ScriptRun {
                range: 0..3,
                script: Script::LATIN
            }]
        );
    }

    #[test]
    fn common_codepoints_extend_the_current_run() {
        let runs = itemize_with("ab cd", classify);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].range, 0..5);
        assert_eq!(runs[0].script, Script::LATIN);
    }

    #[test]
    fn leading_common_adopts_the_first_concrete_script() {
        let runs = itemize_with("  ab", classify);
        assert_eq!(
            runs,
            vec![ScriptRun {
                range: 0..4,
                script: Script::LATIN
            }]
        );
    }

    #[test]
    fn script_change_splits_runs_at_the_boundary() {
        let text = "abαβ";
        let runs = itemize_with(text, classify);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].range, 0..2);
        assert_eq!(runs[0].script, Script::LATIN);
        assert_eq!(runs[1].range, 2..text.len());
        assert_eq!(runs[1].script, Script::GREEK);
        assert_eq!(&text[runs[1].range.clone()], "αβ");
    }

    #[test]
    fn inherited_marks_stay_with_their_base() {
        // a + combining acute + greek alpha: the mark joins the latin run.
        let text = "a\u{0301}α";
        let runs = itemize_with(text, classify);
        assert_eq!(runs.len(), 2);
        assert_eq!(&text[runs[0].range.clone()], "a\u{0301}");
        assert_eq!(runs[0].script, Script::LATIN);
        assert_eq!(runs[1].script, Script::GREEK);
    }

    #[test]
    fn all_common_text_is_one_common_run() {
        let runs = itemize_with("123 456", classify);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].script, Script::COMMON);
    }
}
