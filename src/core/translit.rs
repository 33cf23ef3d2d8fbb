// src/core/translit.rs
//! Closest-ASCII transliteration of Latin (with diacritics), Cyrillic and
//! Greek text, plus the script predicates the resolver uses to decide when
//! a name needs transliterating before lookup.

/// Transliterates `text` to ASCII.
///
/// ASCII passes through untouched. Known letters are replaced by their
/// Latin approximation, keeping an initial capital ("Ж" -> "Zh"). Non-ASCII
/// whitespace becomes a space. Anything else is dropped.
pub fn transliterate(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for c in text.chars() {
        if c.is_ascii() {
            result.push(c);
            continue;
        }

        let lower = c.to_lowercase().next().unwrap_or(c);
        match fold_char(lower) {
            Some(ascii) if c.is_uppercase() => {
                let mut chars = ascii.chars();
                if let Some(first) = chars.next() {
                    result.push(first.to_ascii_uppercase());
                    result.push_str(chars.as_str());
                }
            }
            Some(ascii) => result.push_str(ascii),
            None if c.is_whitespace() => result.push(' '),
            None => {}
        }
    }

    result
}

/// True if every letter of `text` is Cyrillic (and there is at least one).
/// Whitespace and ASCII punctuation are ignored.
pub fn only_cyrillic_chars(text: &str) -> bool {
    only_script(text, is_cyrillic)
}

/// True if every letter of `text` is Greek (and there is at least one).
/// Whitespace and ASCII punctuation are ignored.
pub fn only_greek_chars(text: &str) -> bool {
    only_script(text, is_greek)
}

fn only_script(text: &str, in_script: fn(char) -> bool) -> bool {
    let mut seen = false;
    for c in text.chars() {
        if c.is_whitespace() || c.is_ascii_punctuation() {
            continue;
        }
        if !in_script(c) {
            return false;
        }
        seen = true;
    }
    seen
}

fn is_cyrillic(c: char) -> bool {
    matches!(c, '\u{0400}'..='\u{052F}')
}

fn is_greek(c: char) -> bool {
    matches!(c, '\u{0370}'..='\u{03FF}' | '\u{1F00}'..='\u{1FFF}')
}

/// Lowercase letter -> ASCII approximation.
fn fold_char(c: char) -> Option<&'static str> {
    fold_latin(c).or_else(|| fold_cyrillic(c)).or_else(|| fold_greek(c))
}

fn fold_latin(c: char) -> Option<&'static str> {
    let ascii = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' | 'ǎ' => "a",
        'æ' => "ae",
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => "c",
        'ď' | 'đ' | 'ð' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => "e",
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => "g",
        'ĥ' | 'ħ' => "h",
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' | 'ǐ' => "i",
        'ĳ' => "ij",
        'ĵ' => "j",
        'ķ' => "k",
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => "l",
        'ñ' | 'ń' | 'ņ' | 'ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' | 'ǒ' => "o",
        'œ' => "oe",
        'ŕ' | 'ŗ' | 'ř' => "r",
        'ś' | 'ŝ' | 'ş' | 'š' | 'ș' => "s",
        'ß' => "ss",
        'ţ' | 'ť' | 'ŧ' | 'ț' => "t",
        'þ' => "th",
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' | 'ǔ' => "u",
        'ŵ' => "w",
        'ý' | 'ÿ' | 'ŷ' => "y",
        'ź' | 'ż' | 'ž' => "z",
        _ => return None,
    };
    Some(ascii)
}

fn fold_cyrillic(c: char) -> Option<&'static str> {
    let ascii = match c {
        'а' => "a", 'б' => "b", 'в' => "v", 'г' => "g", 'ґ' => "g",
        'д' => "d", 'ђ' => "dj", 'е' => "e", 'ё' => "io", 'є' => "ie",
        'ж' => "zh", 'з' => "z", 'и' => "i", 'і' => "i", 'ї' => "i",
        'й' => "i", 'ј' => "j", 'к' => "k", 'л' => "l", 'љ' => "lj",
        'м' => "m", 'н' => "n", 'њ' => "nj", 'о' => "o", 'п' => "p",
        'р' => "r", 'с' => "s", 'т' => "t", 'ћ' => "c", 'у' => "u",
        'ў' => "u", 'ф' => "f", 'х' => "kh", 'ц' => "ts", 'ч' => "ch",
        'џ' => "dz", 'ш' => "sh", 'щ' => "shch", 'ы' => "y", 'э' => "e",
        'ю' => "iu", 'я' => "ia", 'ѓ' => "g", 'ќ' => "k", 'ѕ' => "dz",
        // Hard and soft signs have no sound of their own in a name.
        'ъ' | 'ь' => "",
        _ => return None,
    };
    Some(ascii)
}

fn fold_greek(c: char) -> Option<&'static str> {
    let ascii = match c {
        'α' | 'ά' => "a", 'β' => "b", 'γ' => "g", 'δ' => "d",
        'ε' | 'έ' => "e", 'ζ' => "z", 'η' | 'ή' => "e", 'θ' => "th",
        'ι' | 'ί' | 'ϊ' | 'ΐ' => "i", 'κ' => "k", 'λ' => "l", 'μ' => "m",
        'ν' => "n", 'ξ' => "x", 'ο' | 'ό' => "o", 'π' => "p", 'ρ' => "r",
        'σ' | 'ς' => "s", 'τ' => "t", 'υ' | 'ύ' | 'ϋ' | 'ΰ' => "u",
        'φ' => "ph", 'χ' => "kh", 'ψ' => "ps", 'ω' | 'ώ' => "o",
        _ => return None,
    };
    Some(ascii)
}
