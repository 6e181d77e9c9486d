/// Parsed display name: an optional leading squad tag and the tag-free base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameTag<'a> {
    pub tag: Option<&'a str>,
    pub base: &'a str,
}

/// Split a leading `[TAG]` prefix off a display name. The first closing
/// bracket ends the tag; whitespace after it is not part of the base. A name
/// without the prefix parses as untagged, including the empty string.
pub fn parse(raw: &str) -> NameTag<'_> {
    let untagged = NameTag {
        tag: None,
        base: raw,
    };
    let Some(rest) = raw.strip_prefix('[') else {
        return untagged;
    };
    let Some(end) = rest.find(']') else {
        return untagged;
    };
    NameTag {
        tag: Some(&rest[..end]),
        base: rest[end + 1..].trim_start(),
    }
}

/// Tag-free base name, the canonical key for profile navigation. A stale or
/// changed tag still resolves to the same profile.
pub fn strip_tag(raw: &str) -> &str {
    parse(raw).base
}

/// Render a display name with the site's default capitalization policy:
/// an explicit squad capitalizes the base, an embedded tag leaves it as-is.
pub fn format_display(raw: &str, squad: Option<&str>) -> String {
    format_display_with(raw, squad, squad.is_some())
}

/// Render `[TAG] Name`. An explicit squad overrides any tag embedded in
/// `raw`; without one the embedded tag is reused. Tags are uppercased either
/// way.
pub fn format_display_with(raw: &str, squad: Option<&str>, capitalize_base: bool) -> String {
    let parsed = parse(raw);
    let base = if capitalize_base {
        capitalized(parsed.base)
    } else {
        parsed.base.to_string()
    };
    match squad.or(parsed.tag) {
        Some(tag) => format!("[{}] {}", tag.to_uppercase(), base),
        None => base,
    }
}

fn capitalized(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Canonicalize a raw roster nickname into a lookup name and a squad guess.
///
/// The squad comes from the first `[...]` group anywhere in the nickname,
/// falling back to a dot-separated prefix (`3. Ivanov`) and then to the
/// first word of a multi-word name. The lookup name is the last token left
/// after removing tags and dots, lowercased.
pub fn extract_name_and_squad(nickname: &str) -> (String, Option<String>) {
    let squad = match first_bracket_group(nickname) {
        Some(tag) => Some(tag.to_uppercase()),
        None => {
            if let Some((prefix, _)) = nickname.split_once('.') {
                Some(prefix.trim().to_uppercase())
            } else {
                let mut parts = nickname.split_whitespace();
                let first = parts.next();
                if parts.next().is_some() {
                    first.map(str::to_uppercase)
                } else {
                    None
                }
            }
        }
    };

    let cleaned = strip_bracket_groups(nickname).replace('.', " ");
    let name = cleaned
        .split_whitespace()
        .next_back()
        .unwrap_or("")
        .to_lowercase();

    (name, squad.filter(|s| !s.is_empty()))
}

fn first_bracket_group(raw: &str) -> Option<&str> {
    let start = raw.find('[')?;
    let end = raw[start + 1..].find(']')?;
    Some(&raw[start + 1..start + 1 + end])
}

fn strip_bracket_groups(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find('[') {
        let Some(end) = rest[start + 1..].find(']') else {
            break;
        };
        out.push_str(&rest[..start]);
        out.push(' ');
        rest = &rest[start + 1 + end + 1..];
    }
    out.push_str(rest);
    out
}
