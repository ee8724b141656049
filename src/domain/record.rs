/// One repository entry from the trending listing, in the page's display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendingRecord {
    /// `owner/repo`
    pub name: String,
    /// Absolute repository address
    pub url: String,
    pub stars: u64,
    /// Free text, empty when the entry has none
    pub description: String,
}

impl TrendingRecord {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            stars: 0,
            description: String::new(),
        }
    }

    pub fn with_stars(mut self, stars: u64) -> Self {
        self.stars = stars;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Star count with comma thousands separators, e.g. `12,345`
    pub fn display_stars(&self) -> String {
        let digits = self.stars.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        out
    }
}
