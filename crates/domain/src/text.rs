//! Small text utilities shared by prompt rendering, templates, and content rules.

/// Returns the trimmed value, or `None` for absent or blank input.
pub(crate) fn clean(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Truncates to at most `max_chars` characters, preferring a word boundary.
pub(crate) fn clip_chars(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_owned();
    }

    let cut: String = value.chars().take(max_chars).collect();
    let clipped = match cut.rfind(char::is_whitespace) {
        Some(index) if cut[..index].chars().count() > max_chars / 2 => &cut[..index],
        _ => cut.as_str(),
    };

    clipped
        .trim_end_matches(|character: char| {
            character.is_whitespace() || matches!(character, ',' | ';' | ':' | '-')
        })
        .to_owned()
}

/// Upper-cases the first letter of every word and lower-cases the rest.
pub(crate) fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut characters = word.chars();
            match characters.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(characters.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Replaces every case-insensitive occurrence of `needle`.
///
/// Matching folds each character with [`char::to_lowercase`], the same folding
/// `str::to_lowercase` applies, so `TAS\u{212A}` (Kelvin sign) matches `task`.
/// `needle` must already be lowercase. The replacement keeps the capitalization
/// of the matched text: `Task` becomes `Event`, `TASK` becomes `EVENT`.
pub(crate) fn replace_ignore_case(text: &str, needle: &str, replacement: &str) -> String {
    if needle.is_empty() {
        return text.to_owned();
    }

    let mut output = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(character) = rest.chars().next() {
        match folded_prefix_len(rest, needle) {
            Some(matched_len) => {
                output.push_str(&match_case(&rest[..matched_len], replacement));
                rest = &rest[matched_len..];
            }
            None => {
                output.push(character);
                rest = &rest[character.len_utf8()..];
            }
        }
    }

    output
}

/// Byte length of the prefix of `text` whose lowercase form is exactly `needle`.
fn folded_prefix_len(text: &str, needle: &str) -> Option<usize> {
    let mut expected = needle.chars();

    for (offset, character) in text.char_indices() {
        for folded in character.to_lowercase() {
            if expected.next() != Some(folded) {
                return None;
            }
        }
        if expected.as_str().is_empty() {
            return Some(offset + character.len_utf8());
        }
    }

    None
}

fn match_case(matched: &str, replacement: &str) -> String {
    let all_upper = matched.chars().count() > 1 && matched.chars().all(char::is_uppercase);
    if all_upper {
        return replacement.to_uppercase();
    }

    match matched.chars().next() {
        Some(first) if first.is_uppercase() => {
            let mut characters = replacement.chars();
            characters
                .next()
                .map(|first| first.to_uppercase().collect::<String>() + characters.as_str())
                .unwrap_or_default()
        }
        _ => replacement.to_owned(),
    }
}

/// Maps text to a stable bucket by summing its UTF-16 code units.
pub(crate) fn stable_index(input: &str, modulo: usize) -> usize {
    if modulo == 0 {
        return 0;
    }

    let sum: u64 = input.encode_utf16().map(u64::from).sum();
    usize::try_from(sum % modulo as u64).unwrap_or(0)
}
