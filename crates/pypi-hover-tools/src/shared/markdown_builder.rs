/**
    Small incremental builder for markdown popup contents.

    Keeps rendering call sites readable - build up sections with
    headers, paragraphs and links, then finish with [`Self::build`].
*/
#[derive(Debug, Clone, Default)]
pub struct MarkdownBuilder {
    lines: Vec<String>,
}

impl MarkdownBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn h1(&mut self, text: &str) -> &mut Self {
        self.lines.push(format!("# {text}"));
        self
    }

    pub fn h2(&mut self, text: &str) -> &mut Self {
        self.lines.push(format!("## {text}"));
        self
    }

    pub fn p(&mut self, text: &str) -> &mut Self {
        self.lines.push(text.to_string());
        self
    }

    pub fn br(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    pub fn a(&mut self, text: &str, url: &str) -> &mut Self {
        self.lines.push(format!("[{text}]({url})"));
        self
    }

    pub fn list_item(&mut self, text: &str) -> &mut Self {
        self.lines.push(format!("- {text}"));
        self
    }

    #[must_use]
    pub fn build(&self) -> String {
        self.lines.join("\n")
    }
}
