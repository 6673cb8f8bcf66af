use heck::{ToSnakeCase, ToUpperCamelCase};

pub fn snake_case(s: &str) -> String {
    s.to_snake_case()
}

pub fn upper_camel_case(s: &str) -> String {
    s.to_upper_camel_case()
}

/// Singularizes a single lower-case word.
pub fn singularize(word: &str) -> String {
    pluralizer::pluralize(word, 1, false)
}

/// Pluralizes a single lower-case word.
pub fn pluralize(word: &str) -> String {
    pluralizer::pluralize(word, 2, false)
}
