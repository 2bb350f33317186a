//! Small markdown formatting primitives shared by the table and
//! coverage generators.

/// Take the first `max` characters, with no ellipsis.
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Take the first `max` characters and append `...` when anything was
/// cut off.
pub fn truncate_with_ellipsis(text: &str, max: usize) -> String {
    let mut out = truncate_chars(text, max);
    if text.chars().count() > max {
        out.push_str("...");
    }
    out
}

/// Turn a kebab-case key into a heading label: hyphens become spaces
/// and every letter run is capitalized (`official-cli` to
/// `Official Cli`, `ci-cd-friendly` to `Ci Cd Friendly`). Non-letter
/// characters pass through, so `N/A` stays `N/A`.
pub fn title_case_kebab(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_was_letter = false;
    for c in value.chars() {
        if c == '-' {
            out.push(' ');
            prev_was_letter = false;
        } else if c.is_alphabetic() {
            if prev_was_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_was_letter = true;
        } else {
            out.push(c);
            prev_was_letter = false;
        }
    }
    out
}

/// Group digits in threes: `1234567` renders as `1,234,567`.
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && i % 3 == offset {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// An inline markdown link.
pub fn link(text: &str, url: &str) -> String {
    format!("[{text}]({url})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn truncation_is_character_based() {
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo");
        assert_eq!(truncate_chars("short", 80), "short");
        assert_eq!(truncate_with_ellipsis("exactly-ten", 11), "exactly-ten");
        assert_eq!(truncate_with_ellipsis("exactly-ten-plus", 11), "exactly-ten...");
    }

    #[test]
    fn title_case_handles_kebab_and_passthrough() {
        assert_eq!(title_case_kebab("official-cli"), "Official Cli");
        assert_eq!(title_case_kebab("ci-cd-friendly"), "Ci Cd Friendly");
        assert_eq!(title_case_kebab("active-development"), "Active Development");
        assert_eq!(title_case_kebab("oauth2"), "Oauth2");
        assert_eq!(title_case_kebab("N/A"), "N/A");
        assert_eq!(title_case_kebab("unknown"), "Unknown");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1234567), "1,234,567");
        assert_eq!(format_thousands(45210), "45,210");
    }

    #[test]
    fn links_render_inline() {
        assert_eq!(link("tool", "https://x.test/r"), "[tool](https://x.test/r)");
        assert_eq!(link("Unknown", "#"), "[Unknown](#)");
    }

    proptest! {
        #[test]
        fn truncate_never_exceeds_limit(text in "\\PC{0,200}", max in 0usize..120) {
            prop_assert!(truncate_chars(&text, max).chars().count() <= max);
        }

        #[test]
        fn ellipsis_only_when_cut(text in "\\PC{0,200}", max in 0usize..120) {
            let out = truncate_with_ellipsis(&text, max);
            if text.chars().count() <= max {
                prop_assert_eq!(out, text);
            } else {
                prop_assert!(out.ends_with("..."));
            }
        }

        #[test]
        fn thousands_round_trips(n in proptest::num::u64::ANY) {
            let formatted = format_thousands(n);
            let stripped: String = formatted.chars().filter(|c| *c != ',').collect();
            prop_assert_eq!(stripped, n.to_string());
        }
    }
}
