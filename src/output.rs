use owo_colors::OwoColorize;

pub struct CommandSummary {
    pub prefix: String,
    pub message: String,
}

impl CommandSummary {
    pub fn format(applied: usize, invalid: usize) -> Self {
        match (applied, invalid) {
            (_, i) if i > 0 => Self {
                prefix: "✗".red().to_string(),
                message: format!("{} pane(s) failed validation, nothing saved", i.red()),
            },
            (a, _) if a > 0 => Self {
                prefix: "✓".green().to_string(),
                message: format!("{} rule(s) applied", a.green()),
            },
            _ => Self {
                prefix: "•".yellow().to_string(),
                message: "No rule changes".to_string(),
            },
        }
    }
}
