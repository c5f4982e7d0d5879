//! Static per-theme class tables and CSS custom properties.

use crate::domain::recipe::Theme;

/// Utility class strings for every role the renderer styles.
#[derive(Debug)]
pub struct ThemeClasses {
    pub wrapper: &'static str,
    pub heading: &'static str,
    pub heading2: &'static str,
    pub heading3: &'static str,
    pub paragraph: &'static str,
    pub lead: &'static str,
    pub list: &'static str,
    pub quote: &'static str,
    pub code: &'static str,
    pub hr: &'static str,
    pub toc_container: &'static str,
    pub image: &'static str,
    pub figcaption: &'static str,
    pub table: &'static str,
    pub callout_info: &'static str,
    pub callout_warning: &'static str,
    pub callout_tip: &'static str,
    pub takeaways: &'static str,
}

static EDITORIAL_BOLD: ThemeClasses = ThemeClasses {
    wrapper: "theme-editorial-bold",
    heading: "text-3xl font-bold mb-4",
    heading2: "text-2xl md:text-3xl font-semibold text-gray-900 mt-12 mb-4",
    heading3: "text-xl md:text-2xl font-medium text-gray-800 mt-8 mb-3",
    paragraph: "text-base md:text-lg text-gray-700 leading-relaxed mb-4",
    lead: "text-xl text-gray-600 leading-relaxed mb-8",
    list: "list-disc list-inside space-y-2 text-gray-700 mb-6",
    quote: "border-l-4 border-blue-500 pl-4 italic text-gray-600 my-6",
    code: "bg-gray-100 p-4 rounded-lg font-mono text-sm overflow-x-auto my-6",
    hr: "border-t-2 border-gray-300 my-8",
    toc_container: "bg-gray-50 rounded-lg p-6 mb-8",
    image: "w-full rounded-lg shadow-md",
    figcaption: "text-sm text-gray-500 mt-2 text-center",
    table: "w-full text-left border-collapse text-gray-700 my-6",
    callout_info: "bg-blue-50 border-l-4 border-blue-500 p-4 my-6",
    callout_warning: "bg-yellow-50 border-l-4 border-yellow-500 p-4 my-6",
    callout_tip: "bg-green-50 border-l-4 border-green-500 p-4 my-6",
    takeaways: "bg-gray-50 border-t-4 border-blue-500 rounded-lg p-6 my-8",
};

static MINIMAL_CLEAN: ThemeClasses = ThemeClasses {
    wrapper: "theme-minimal-clean",
    heading: "text-2xl font-semibold mb-3",
    heading2: "text-xl font-medium text-gray-800 mt-10 mb-3",
    heading3: "text-lg font-medium text-gray-700 mt-6 mb-2",
    paragraph: "text-base leading-relaxed mb-3 text-gray-600",
    lead: "text-lg text-gray-500 leading-relaxed mb-6",
    list: "list-disc pl-5 space-y-1 mb-3",
    quote: "border-l-2 border-gray-400 pl-3 italic my-3 text-gray-500",
    code: "bg-gray-50 p-3 rounded font-mono text-sm",
    hr: "border-t border-gray-200 my-6",
    toc_container: "border border-gray-200 p-4 rounded mb-6",
    image: "w-full rounded shadow-sm",
    figcaption: "text-xs text-gray-400 mt-1 text-center",
    table: "w-full text-left border-collapse text-gray-600 my-4",
    callout_info: "bg-gray-50 border-l-2 border-gray-400 p-3 my-4",
    callout_warning: "bg-yellow-50 border-l-2 border-yellow-400 p-3 my-4",
    callout_tip: "bg-green-50 border-l-2 border-green-400 p-3 my-4",
    takeaways: "border border-gray-200 rounded p-4 my-6",
};

static TECH_NEON: ThemeClasses = ThemeClasses {
    wrapper: "theme-tech-neon bg-gray-900 text-white",
    heading: "text-3xl font-bold mb-4 text-cyan-400",
    heading2: "text-2xl font-bold text-cyan-300 mt-12 mb-4",
    heading3: "text-xl font-semibold text-cyan-200 mt-8 mb-3",
    paragraph: "text-lg leading-relaxed mb-4 text-gray-300",
    lead: "text-xl text-gray-400 leading-relaxed mb-8",
    list: "list-disc pl-6 mb-4 space-y-2 text-gray-300",
    quote: "border-l-4 border-cyan-500 pl-4 italic my-4 text-gray-400",
    code: "bg-gray-800 p-4 rounded-lg font-mono text-sm text-green-400 overflow-x-auto",
    hr: "border-t-2 border-cyan-800 my-8",
    toc_container: "bg-gray-800 p-6 rounded-lg mb-8 border border-cyan-800",
    image: "w-full rounded-lg",
    figcaption: "text-sm text-gray-500 mt-2 text-center",
    table: "w-full text-left border-collapse text-gray-300 my-6",
    callout_info: "bg-gray-800 border-l-4 border-cyan-500 p-4 my-6",
    callout_warning: "bg-gray-800 border-l-4 border-yellow-500 p-4 my-6",
    callout_tip: "bg-gray-800 border-l-4 border-green-500 p-4 my-6",
    takeaways: "bg-gray-800 border border-cyan-800 rounded-lg p-6 my-8",
};

pub fn theme_classes(theme: Theme) -> &'static ThemeClasses {
    match theme {
        Theme::EditorialBold => &EDITORIAL_BOLD,
        Theme::MinimalClean => &MINIMAL_CLEAN,
        Theme::TechNeon => &TECH_NEON,
    }
}

/// Custom property values emitted into the document `:root`.
#[derive(Debug)]
pub struct ThemeStyle {
    pub font_heading: &'static str,
    pub font_body: &'static str,
    pub color_primary: &'static str,
    pub color_secondary: &'static str,
    pub color_accent: &'static str,
    pub color_bg: &'static str,
    pub color_bg_alt: &'static str,
    pub color_text: &'static str,
    pub color_text_muted: &'static str,
    pub color_border: &'static str,
    pub spacing_base: &'static str,
    pub border_radius: &'static str,
    pub shadow: &'static str,
}

static EDITORIAL_BOLD_STYLE: ThemeStyle = ThemeStyle {
    font_heading: "Georgia, 'Times New Roman', serif",
    font_body: "'Helvetica Neue', Arial, sans-serif",
    color_primary: "#1a1a2e",
    color_secondary: "#e94560",
    color_accent: "#0f3460",
    color_bg: "#ffffff",
    color_bg_alt: "#f8f9fa",
    color_text: "#2d3436",
    color_text_muted: "#636e72",
    color_border: "#dfe6e9",
    spacing_base: "1.5rem",
    border_radius: "8px",
    shadow: "0 4px 6px rgba(0,0,0,0.07)",
};

static MINIMAL_CLEAN_STYLE: ThemeStyle = ThemeStyle {
    font_heading: "'Inter', 'Segoe UI', sans-serif",
    font_body: "'Inter', 'Segoe UI', sans-serif",
    color_primary: "#2c3e50",
    color_secondary: "#3498db",
    color_accent: "#27ae60",
    color_bg: "#ffffff",
    color_bg_alt: "#fafafa",
    color_text: "#333333",
    color_text_muted: "#7f8c8d",
    color_border: "#ecf0f1",
    spacing_base: "1.25rem",
    border_radius: "4px",
    shadow: "0 2px 4px rgba(0,0,0,0.05)",
};

static TECH_NEON_STYLE: ThemeStyle = ThemeStyle {
    font_heading: "'Roboto', 'Arial', sans-serif",
    font_body: "'Roboto', 'Arial', sans-serif",
    color_primary: "#0a192f",
    color_secondary: "#64ffda",
    color_accent: "#f06449",
    color_bg: "#ffffff",
    color_bg_alt: "#f0f4f8",
    color_text: "#1a202c",
    color_text_muted: "#4a5568",
    color_border: "#e2e8f0",
    spacing_base: "1.5rem",
    border_radius: "6px",
    shadow: "0 4px 12px rgba(0,0,0,0.08)",
};

pub fn theme_style(theme: Theme) -> &'static ThemeStyle {
    match theme {
        Theme::EditorialBold => &EDITORIAL_BOLD_STYLE,
        Theme::MinimalClean => &MINIMAL_CLEAN_STYLE,
        Theme::TechNeon => &TECH_NEON_STYLE,
    }
}

impl ThemeStyle {
    /// `:root { ... }` block declaring every custom property.
    pub fn root_block(&self) -> String {
        let properties = [
            ("--font-heading", self.font_heading),
            ("--font-body", self.font_body),
            ("--color-primary", self.color_primary),
            ("--color-secondary", self.color_secondary),
            ("--color-accent", self.color_accent),
            ("--color-bg", self.color_bg),
            ("--color-bg-alt", self.color_bg_alt),
            ("--color-text", self.color_text),
            ("--color-text-muted", self.color_text_muted),
            ("--color-border", self.color_border),
            ("--spacing-base", self.spacing_base),
            ("--border-radius", self.border_radius),
            ("--shadow", self.shadow),
        ];

        let mut block = String::from(":root {\n");
        for (name, value) in properties {
            block.push_str("  ");
            block.push_str(name);
            block.push_str(": ");
            block.push_str(value);
            block.push_str(";\n");
        }
        block.push('}');
        block
    }
}
