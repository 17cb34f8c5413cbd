use serde::Serialize;

/// Prints command results as text or JSON on stdout.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Print `value` as pretty JSON, or the lines produced by `text`.
    pub fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce() -> Vec<String>) -> anyhow::Result<()> {
        for line in self.render(value, text)? {
            println!("{line}");
        }
        Ok(())
    }

    fn render<T: Serialize>(
        &self,
        value: &T,
        text: impl FnOnce() -> Vec<String>,
    ) -> anyhow::Result<Vec<String>> {
        if self.json {
            Ok(vec![serde_json::to_string_pretty(value)?])
        } else {
            Ok(text())
        }
    }
}
