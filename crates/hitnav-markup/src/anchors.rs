//! Anchor insertion over highlighted backend fragments.

/// Markers the backend wraps matched substrings in.
pub const HIGHLIGHT_PRE: &str = "<span style='background:yellow'>";
pub const HIGHLIGHT_POST: &str = "</span>";

/// Stable prefix for anchor names; anchor N on a page is
/// `{ANCHOR_PREFIX}{N}`, so a viewer can jump straight to hit N.
pub const ANCHOR_PREFIX: &str = "hitnav_match_";

/// Insert a numbered `<a name=...>` anchor immediately before every
/// highlight-start marker in `fragment`, counting matches as it goes.
///
/// The scan offset always advances past both the inserted anchor and the
/// marker itself, so inserted text is never rescanned and anchors never
/// nest. The returned count is the page's true hit count.
pub fn insert_anchors(fragment: &str, prefix: &str) -> (String, u32) {
    let mut buf = String::from(fragment);
    let mut search_offset = 0;
    let mut count: u32 = 0;
    while let Some(found) = buf[search_offset..].find(HIGHLIGHT_PRE) {
        let index = search_offset + found;
        count += 1;
        let anchor = format!("<a name='{}{}'></a>", prefix, count);
        buf.insert_str(index, &anchor);
        search_offset = index + anchor.len() + HIGHLIGHT_PRE.len();
    }
    (buf, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mark(text: &str) -> String {
        format!("{}{}{}", HIGHLIGHT_PRE, text, HIGHLIGHT_POST)
    }

    #[test]
    fn counts_match_markers() {
        let fragment = format!("alpha {} beta {} gamma {}", mark("one"), mark("two"), mark("three"));
        let (out, count) = insert_anchors(&fragment, ANCHOR_PREFIX);
        assert_eq!(count, 3);
        for n in 1..=3 {
            assert!(out.contains(&format!("<a name='{}{}'></a>{}", ANCHOR_PREFIX, n, HIGHLIGHT_PRE)));
        }
    }

    #[test]
    fn anchors_are_numbered_in_text_order() {
        let fragment = format!("{} and {}", mark("first"), mark("second"));
        let (out, _) = insert_anchors(&fragment, ANCHOR_PREFIX);
        let first = out.find("hitnav_match_1").expect("anchor 1");
        let second = out.find("hitnav_match_2").expect("anchor 2");
        assert!(first < second);
    }

    #[test]
    fn no_markers_leaves_text_untouched() {
        let (out, count) = insert_anchors("nothing highlighted here", ANCHOR_PREFIX);
        assert_eq!(count, 0);
        assert_eq!(out, "nothing highlighted here");
    }

    #[test]
    fn rerun_on_same_raw_fragment_is_identical() {
        let fragment = format!("{} mid {}", mark("a"), mark("b"));
        let first = insert_anchors(&fragment, ANCHOR_PREFIX);
        let second = insert_anchors(&fragment, ANCHOR_PREFIX);
        assert_eq!(first, second);
    }

    #[test]
    fn adjacent_markers_each_get_an_anchor() {
        let fragment = format!("{}{}", mark("x"), mark("y"));
        let (out, count) = insert_anchors(&fragment, ANCHOR_PREFIX);
        assert_eq!(count, 2);
        assert_eq!(out.matches("<a name='").count(), 2);
    }
}
