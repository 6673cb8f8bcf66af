use std::fmt;

/// A filter in the remote service's formula language.
///
/// Formulas are opaque to Airstorm: caller-supplied formulas are passed
/// through unmodified. The only formula Airstorm builds itself is the
/// record-id membership test used for batched fetches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Formula(String);

impl Formula {
    pub fn new(src: impl Into<String>) -> Formula {
        Formula(src.into())
    }

    /// Matches every record whose id is one of `ids`:
    /// `OR(RECORD_ID()='recA',RECORD_ID()='recB')`.
    pub fn record_id_in<I>(ids: I) -> Formula
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let terms = ids
            .into_iter()
            .map(|id| format!("RECORD_ID()='{}'", escape(id.as_ref())))
            .collect::<Vec<_>>();

        Formula(format!("OR({})", terms.join(",")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

fn escape(src: &str) -> String {
    src.replace('\\', "\\\\").replace('\'', "\\'")
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Formula {
    fn from(src: &str) -> Formula {
        Formula::new(src)
    }
}

impl From<String> for Formula {
    fn from(src: String) -> Formula {
        Formula::new(src)
    }
}
