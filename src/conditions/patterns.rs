//! fixed character-class classifiers and input filters
//!
//! classifiers test a whole value (`english`, `email`, ...);
//! filters strip every character outside an allowed class

use lazy_static::lazy_static;
use regex::Regex;

/// special characters accepted (and required) by the password shapes
pub const PASSWORD_SPECIALS: &str = "!@#$%^&*()-_=+[]{}|;:',.<>?/";

lazy_static! {
    static ref ENGLISH: Regex = Regex::new(r"^[a-zA-Z]+$").unwrap();
    static ref LOWERCASE: Regex = Regex::new(r"^[a-z]+$").unwrap();
    static ref UPPERCASE: Regex = Regex::new(r"^[A-Z]+$").unwrap();
    static ref KOREAN: Regex = Regex::new(r"^[ㄱ-ㅎㅏ-ㅣ가-힣]+$").unwrap();
    static ref JAPANESE: Regex = Regex::new(
        r"^[\x{3000}-\x{303F}\x{3040}-\x{309F}\x{30A0}-\x{30FF}\x{31F0}-\x{31FF}\x{4E00}-\x{9FAF}\x{3400}-\x{4DBF}]+$"
    )
    .unwrap();
    static ref HIRAGANA: Regex = Regex::new(r"^[\x{3040}-\x{309F}]+$").unwrap();
    static ref KATAKANA: Regex = Regex::new(r"^[\x{30A0}-\x{30FF}]+$").unwrap();
    static ref KANJI: Regex = Regex::new(r"^[\x{4E00}-\x{9FAF}]+$").unwrap();
    static ref CHINESE: Regex = Regex::new(r"^[\x{4E00}-\x{9FFF}]+$").unwrap();
    static ref SPACE: Regex = Regex::new(r"\s").unwrap();
    static ref SPECIAL_CHAR: Regex =
        Regex::new(r"[!@#$%^&*()_+\-=\[\]{};':\\|,.<>/?\s]").unwrap();
    static ref ID: Regex = Regex::new(r"^[a-zA-Z0-9_.\-]+$").unwrap();
    static ref EMAIL: Regex = Regex::new(
        r"^[a-zA-Z0-9]+[a-zA-Z0-9.+]*[a-zA-Z0-9]+@[a-zA-Z0-9]+\.[a-zA-Z0-9]+[a-zA-Z0-9.]*[a-zA-Z0-9]+$"
    )
    .unwrap();
    static ref URL: Regex = Regex::new(
        r"^([a-z][a-z0-9+\-.]*)://([0-9a-z.\-]+)\.([a-z.]{2,6})([/0-9A-Za-z_ .\-]*)*/?$"
    )
    .unwrap();
    static ref PHONE_NUMBER: Regex = Regex::new(
        r"^(?:\+?[0-9]{1,3}-?)?(?:0[0-9]{1,2}|[0-9]{1,3})(?:-[0-9]{1,4}){0,2}$"
    )
    .unwrap();
    static ref POSTAL_CODE: Regex = Regex::new(r"^[a-zA-Z0-9\s\-]+$").unwrap();
}

lazy_static! {
    static ref STRIP_NUMBER: Regex = Regex::new(r"[^0-9]").unwrap();
    static ref STRIP_ENGLISH: Regex = Regex::new(r"[^a-zA-Z]").unwrap();
    static ref STRIP_LOWERCASE: Regex = Regex::new(r"[^a-z]").unwrap();
    static ref STRIP_UPPERCASE: Regex = Regex::new(r"[^A-Z]").unwrap();
    static ref STRIP_KOREAN: Regex = Regex::new(r"[^ㄱ-ㅎㅏ-ㅣ가-힣]").unwrap();
    static ref STRIP_JAPANESE: Regex = Regex::new(
        r"[^\x{FF21}-\x{FF3A}\x{FF41}-\x{FF5A}\x{3000}-\x{303F}\x{3040}-\x{309F}\x{30A0}-\x{30FF}\x{31F0}-\x{31FF}\x{4E00}-\x{9FAF}\x{3400}-\x{4DBF}]"
    )
    .unwrap();
    static ref STRIP_HIRAGANA: Regex =
        Regex::new(r"[^\x{FF21}-\x{FF3A}\x{FF41}-\x{FF5A}\x{3040}-\x{309F}]").unwrap();
    static ref STRIP_KATAKANA: Regex = Regex::new(
        r"[^\x{FF21}-\x{FF3A}\x{FF41}-\x{FF5A}\x{30A0}-\x{30FF}\x{31F0}-\x{31FF}]"
    )
    .unwrap();
    static ref STRIP_KANJI: Regex = Regex::new(
        r"[^\x{FF21}-\x{FF3A}\x{FF41}-\x{FF5A}\x{4E00}-\x{9FAF}\x{3400}-\x{4DBF}]"
    )
    .unwrap();
    static ref STRIP_CHINESE: Regex =
        Regex::new(r"[^\x{FF21}-\x{FF3A}\x{FF41}-\x{FF5A}\x{4E00}-\x{9FFF}]").unwrap();
    static ref STRIP_SPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref STRIP_SPECIAL_CHAR: Regex =
        Regex::new(r"[!@#$%^&*()_+\-=\[\]{};':\\|,.<>/?]+").unwrap();
    static ref STRIP_ID: Regex = Regex::new(r"[^a-zA-Z0-9_.\-]").unwrap();
    static ref STRIP_EMAIL: Regex = Regex::new(r"[^a-zA-Z0-9.@+\-]").unwrap();
    static ref STRIP_URL: Regex = Regex::new(r"[^a-zA-Z0-9._~\-]").unwrap();
    static ref STRIP_PHONE_NUMBER: Regex = Regex::new(r"[^0-9+\-]").unwrap();
    static ref STRIP_POSTAL_CODE: Regex = Regex::new(r"[^a-zA-Z0-9\s\-]").unwrap();
}

/// named whole-value classifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    English,
    Lowercase,
    Uppercase,
    Korean,
    Japanese,
    Hiragana,
    Katakana,
    Kanji,
    Chinese,
    /// contains at least one whitespace character
    Space,
    /// contains at least one special character (whitespace included)
    SpecialChar,
    Id,
    Password,
    StrongPassword,
    Email,
    Url,
    PhoneNumber,
    PostalCode,
}

impl Pattern {
    pub const ALL: [Pattern; 18] = [
        Pattern::English,
        Pattern::Lowercase,
        Pattern::Uppercase,
        Pattern::Korean,
        Pattern::Japanese,
        Pattern::Hiragana,
        Pattern::Katakana,
        Pattern::Kanji,
        Pattern::Chinese,
        Pattern::Space,
        Pattern::SpecialChar,
        Pattern::Id,
        Pattern::Password,
        Pattern::StrongPassword,
        Pattern::Email,
        Pattern::Url,
        Pattern::PhoneNumber,
        Pattern::PostalCode,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Pattern::English => "english",
            Pattern::Lowercase => "lowercase",
            Pattern::Uppercase => "uppercase",
            Pattern::Korean => "korean",
            Pattern::Japanese => "japanese",
            Pattern::Hiragana => "hiragana",
            Pattern::Katakana => "katakana",
            Pattern::Kanji => "kanji",
            Pattern::Chinese => "chinese",
            Pattern::Space => "space",
            Pattern::SpecialChar => "special_char",
            Pattern::Id => "id",
            Pattern::Password => "password",
            Pattern::StrongPassword => "strong_password",
            Pattern::Email => "email",
            Pattern::Url => "url",
            Pattern::PhoneNumber => "phone_number",
            Pattern::PostalCode => "postal_code",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.name() == s)
    }

    /// test a value against this classifier
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Pattern::English => ENGLISH.is_match(value),
            Pattern::Lowercase => LOWERCASE.is_match(value),
            Pattern::Uppercase => UPPERCASE.is_match(value),
            Pattern::Korean => KOREAN.is_match(value),
            Pattern::Japanese => JAPANESE.is_match(value),
            Pattern::Hiragana => HIRAGANA.is_match(value),
            Pattern::Katakana => KATAKANA.is_match(value),
            Pattern::Kanji => KANJI.is_match(value),
            Pattern::Chinese => CHINESE.is_match(value),
            Pattern::Space => SPACE.is_match(value),
            Pattern::SpecialChar => SPECIAL_CHAR.is_match(value),
            Pattern::Id => ID.is_match(value),
            Pattern::Password => is_password_shape(value, 8, 1),
            Pattern::StrongPassword => is_password_shape(value, 12, 2),
            Pattern::Email => EMAIL.is_match(value),
            Pattern::Url => URL.is_match(value),
            Pattern::PhoneNumber => PHONE_NUMBER.is_match(value),
            Pattern::PostalCode => POSTAL_CODE.is_match(value),
        }
    }
}

fn is_password_special(c: char) -> bool {
    PASSWORD_SPECIALS.contains(c)
}

/// letters, digits and specials only; at least one of each class and
/// `min_specials` specials overall
fn is_password_shape(value: &str, min_len: usize, min_specials: usize) -> bool {
    let mut len = 0;
    let (mut lower, mut upper, mut digit, mut specials) = (false, false, false, 0);

    for c in value.chars() {
        len += 1;
        if c.is_ascii_lowercase() {
            lower = true;
        } else if c.is_ascii_uppercase() {
            upper = true;
        } else if c.is_ascii_digit() {
            digit = true;
        } else if is_password_special(c) {
            specials += 1;
        } else {
            return false;
        }
    }

    len >= min_len && lower && upper && digit && specials >= min_specials
}

/// input sanitizers: remove characters outside an allowed class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    Number,
    English,
    Lowercase,
    Uppercase,
    Korean,
    Japanese,
    Hiragana,
    Katakana,
    Kanji,
    Chinese,
    NoSpace,
    NoSpecialChar,
    Id,
    Email,
    Url,
    PhoneNumber,
    PostalCode,
}

impl Filter {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "number" => Some(Filter::Number),
            "english" => Some(Filter::English),
            "lowercase" => Some(Filter::Lowercase),
            "uppercase" => Some(Filter::Uppercase),
            "korean" => Some(Filter::Korean),
            "japanese" => Some(Filter::Japanese),
            "hiragana" => Some(Filter::Hiragana),
            "katakana" => Some(Filter::Katakana),
            "kanji" => Some(Filter::Kanji),
            "chinese" => Some(Filter::Chinese),
            "no_space" => Some(Filter::NoSpace),
            "no_special_char" => Some(Filter::NoSpecialChar),
            "id" => Some(Filter::Id),
            "email" => Some(Filter::Email),
            "url" => Some(Filter::Url),
            "phone_number" => Some(Filter::PhoneNumber),
            "postal_code" => Some(Filter::PostalCode),
            _ => None,
        }
    }

    fn regex(&self) -> &'static Regex {
        match self {
            Filter::Number => &STRIP_NUMBER,
            Filter::English => &STRIP_ENGLISH,
            Filter::Lowercase => &STRIP_LOWERCASE,
            Filter::Uppercase => &STRIP_UPPERCASE,
            Filter::Korean => &STRIP_KOREAN,
            Filter::Japanese => &STRIP_JAPANESE,
            Filter::Hiragana => &STRIP_HIRAGANA,
            Filter::Katakana => &STRIP_KATAKANA,
            Filter::Kanji => &STRIP_KANJI,
            Filter::Chinese => &STRIP_CHINESE,
            Filter::NoSpace => &STRIP_SPACE,
            Filter::NoSpecialChar => &STRIP_SPECIAL_CHAR,
            Filter::Id => &STRIP_ID,
            Filter::Email => &STRIP_EMAIL,
            Filter::Url => &STRIP_URL,
            Filter::PhoneNumber => &STRIP_PHONE_NUMBER,
            Filter::PostalCode => &STRIP_POSTAL_CODE,
        }
    }

    /// return `value` with every disallowed character removed
    pub fn apply(&self, value: &str) -> String {
        self.regex().replace_all(value, "").into_owned()
    }
}
