use std_util::str;

/// A display name broken into lower-case words.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Name {
    pub parts: Vec<String>,
}

impl Name {
    pub fn new(src: &str) -> Self {
        let snake = str::snake_case(src);
        let parts = snake
            .split('_')
            .filter(|part| !part.is_empty())
            .map(String::from)
            .collect();
        Self { parts }
    }

    pub fn snake_case(&self) -> String {
        self.parts.join("_")
    }

    pub fn upper_camel_case(&self) -> String {
        str::upper_camel_case(&self.snake_case())
    }

    /// The same name with its last word singularized.
    pub fn singular(&self) -> Name {
        self.map_last(str::singularize)
    }

    /// The same name with its last word pluralized.
    pub fn plural(&self) -> Name {
        self.map_last(str::pluralize)
    }

    fn map_last(&self, f: impl FnOnce(&str) -> String) -> Name {
        let mut parts = self.parts.clone();
        if let Some(last) = parts.last_mut() {
            *last = f(last);
        }
        Name { parts }
    }
}

/// Normalizes a table or column display name into a snake case identifier:
/// `"Foo Bar"` becomes `foo_bar`.
pub fn to_identifier(name: &str) -> String {
    Name::new(name).snake_case()
}

/// Normalizes a table display name into a singular type name: `"Foo Bars"`
/// becomes `FooBar`.
pub fn to_type_name(name: &str) -> String {
    Name::new(name).singular().upper_camel_case()
}

/// Identifier with its last word pluralized: `"Season"` becomes `seasons`.
pub fn to_plural_identifier(name: &str) -> String {
    Name::new(name).plural().snake_case()
}
