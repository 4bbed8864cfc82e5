/*!
 * Alignment reconciliation for parallel line arrays.
 *
 * The pair-array shapes produce pre-aligned pairs by construction, so the
 * primary extraction path does not need this. It exists to defend the legacy
 * parallel-array fallback shape and the merge path's own fallback shape
 * against drift: trailing empty artifacts and blank rows.
 */

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Reconcile two parallel line arrays that are expected to be aligned.
///
/// When lengths differ, the longer array's tail beyond the shorter length is
/// truncated only if every element in it is blank; truncating non-blank
/// trailing content would silently drop real data, so a genuine mismatch is
/// returned untouched for the caller to reject. When lengths agree, rows that
/// are blank on both sides are dropped, preserving the relative order of the
/// surviving rows.
pub fn reconcile(english: Vec<String>, chinese: Vec<String>) -> (Vec<String>, Vec<String>) {
    if english.len() != chinese.len() {
        let shorter = english.len().min(chinese.len());
        let tail_blank = english[shorter..]
            .iter()
            .chain(chinese[shorter..].iter())
            .all(|line| is_blank(line));

        if !tail_blank {
            return (english, chinese);
        }

        let mut english = english;
        let mut chinese = chinese;
        english.truncate(shorter);
        chinese.truncate(shorter);
        return reconcile(english, chinese);
    }

    let (mut english_out, mut chinese_out) = (Vec::new(), Vec::new());
    for (en, zh) in english.into_iter().zip(chinese) {
        if is_blank(&en) && is_blank(&zh) {
            continue;
        }
        english_out.push(en);
        chinese_out.push(zh);
    }

    (english_out, chinese_out)
}
