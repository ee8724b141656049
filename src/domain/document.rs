/// Rendered email: subject line plus HTML body fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub subject: String,
    pub body_html: String,
}
