// Thu Aug 20 2026 - Alex

use colored::*;

pub struct Banner {
    title: String,
    subtitle: Option<String>,
    version: Option<String>,
    style: BannerStyle,
    use_color: bool,
    width: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerStyle {
    Fancy,
    Box,
    Minimal,
}

impl Banner {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            subtitle: None,
            version: None,
            style: BannerStyle::Fancy,
            use_color: true,
            width: 60,
        }
    }

    pub fn with_subtitle(mut self, subtitle: &str) -> Self {
        self.subtitle = Some(subtitle.to_string());
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    pub fn with_style(mut self, style: BannerStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn render(&self) -> String {
        match self.style {
            BannerStyle::Fancy => self.render_fancy(),
            BannerStyle::Box => self.render_box(),
            BannerStyle::Minimal => self.render_minimal(),
        }
    }

    pub fn print(&self) {
        println!("{}", self.render());
    }

    fn render_fancy(&self) -> String {
        let ascii_art = r#"
  _   _                 _ _        _____
 | | | | __ _ _ __   __| | | ___  |_   _| __ __ _  ___ ___ _ __
 | |_| |/ _` | '_ \ / _` | |/ _ \   | || '__/ _` |/ __/ _ \ '__|
 |  _  | (_| | | | | (_| | |  __/   | || | | (_| | (_|  __/ |
 |_| |_|\__,_|_| |_|\__,_|_|\___|   |_||_|  \__,_|\___\___|_|
        "#;

        let mut lines = Vec::new();

        if self.use_color {
            for line in ascii_art.lines() {
                lines.push(line.cyan().bold().to_string());
            }
        } else {
            lines.push(ascii_art.to_string());
        }

        lines.push(String::new());

        if let Some(subtitle) = &self.subtitle {
            let centered = format!("{:^64}", subtitle);
            if self.use_color {
                lines.push(centered.yellow().to_string());
            } else {
                lines.push(centered);
            }
        }

        if let Some(version) = &self.version {
            let centered = format!("{:^64}", format!("v{}", version));
            if self.use_color {
                lines.push(centered.green().to_string());
            } else {
                lines.push(centered);
            }
        }

        lines.push(String::new());

        lines.join("\n")
    }

    fn render_box(&self) -> String {
        let width = self.effective_width();
        let inner_width = width.saturating_sub(4);
        let mut lines = Vec::new();

        let h_line = "─".repeat(inner_width + 2);
        lines.push(format!("┌{}┐", h_line));

        let title_line = format!("{:^width$}", self.title, width = inner_width);
        if self.use_color {
            lines.push(format!("│ {} │", title_line.cyan().bold()));
        } else {
            lines.push(format!("│ {} │", title_line));
        }

        if let Some(subtitle) = &self.subtitle {
            let sub_line = format!("{:^width$}", subtitle, width = inner_width);
            lines.push(format!("│ {} │", sub_line));
        }

        if let Some(version) = &self.version {
            lines.push(format!("├{}┤", h_line));
            let ver_line = format!("{:^width$}", format!("v{}", version), width = inner_width);
            if self.use_color {
                lines.push(format!("│ {} │", ver_line.green()));
            } else {
                lines.push(format!("│ {} │", ver_line));
            }
        }

        lines.push(format!("└{}┘", h_line));

        lines.join("\n")
    }

    fn render_minimal(&self) -> String {
        let mut lines = Vec::new();

        if self.use_color {
            lines.push(self.title.cyan().bold().to_string());
        } else {
            lines.push(self.title.clone());
        }

        if let Some(subtitle) = &self.subtitle {
            if self.use_color {
                lines.push(subtitle.dimmed().to_string());
            } else {
                lines.push(subtitle.clone());
            }
        }

        lines.join("\n")
    }

    /// Box banners never draw wider than the terminal.
    fn effective_width(&self) -> usize {
        match terminal_size::terminal_size() {
            Some((terminal_size::Width(w), _)) => self.width.min(w as usize),
            None => self.width,
        }
    }

    pub fn print_default() {
        Banner::new("Handle Leak Tracer")
            .with_subtitle("Managed Heap Root Path Analysis")
            .with_version("1.0.0")
            .print();
    }
}

impl Default for Banner {
    fn default() -> Self {
        Self::new("Handle Leak Tracer")
            .with_subtitle("Managed Heap Root Path Analysis")
            .with_version("1.0.0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_banner_plain() {
        let banner = Banner::new("Handle Leak Tracer")
            .with_subtitle("scan")
            .with_style(BannerStyle::Minimal)
            .with_color(false);

        let rendered = banner.render();
        assert_eq!(rendered, "Handle Leak Tracer\nscan");
    }

    #[test]
    fn test_box_banner_frame() {
        let banner = Banner::new("Tracer")
            .with_version("1.0.0")
            .with_style(BannerStyle::Box)
            .with_color(false)
            .with_width(30);

        let rendered = banner.render();
        assert!(rendered.starts_with('┌'));
        assert!(rendered.ends_with('┘'));
        assert!(rendered.contains("Tracer"));
        assert!(rendered.contains("v1.0.0"));
    }

    #[test]
    fn test_fancy_banner_carries_version() {
        let banner = Banner::default().with_color(false);
        let rendered = banner.render();
        assert!(rendered.contains("v1.0.0"));
        assert!(rendered.contains("Managed Heap Root Path Analysis"));
    }
}
