//! Terminal display utilities for the catalex CLI.
//!
//! OneDark colors for dark terminals, One Light for light ones. Detection tries
//! `CATALEX_THEME` first ("dark" or "light"), then `COLORFGBG`, then falls back
//! to dark. Respects `NO_COLOR` and prints plain text when stdout is not a TTY,
//! so piping results into other tools stays clean.
//!
//! Renderers return lines instead of printing them; `print_lines` writes
//! them to stdout.

use catalex::{BenchmarkTable, CatalogStats, RecordRef, Strategy};
use std::sync::OnceLock;
use std::time::Duration;

// Box drawing constants - width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 72;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("CATALEX_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg" where a bright background means a light terminal
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(bg) = colorfgbg.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                if bg_num >= 7 && bg_num != 8 {
                    return Theme::Light;
                }
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// PALETTES
// ═══════════════════════════════════════════════════════════════════════════

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117); // #e06c75
    pub const GREEN: (u8, u8, u8) = (152, 195, 121); // #98c379
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123); // #e5c07b
    pub const BLUE: (u8, u8, u8) = (97, 175, 239); // #61afef
    pub const MAGENTA: (u8, u8, u8) = (198, 120, 221); // #c678dd
    pub const CYAN: (u8, u8, u8) = (86, 182, 194); // #56b6c2
    pub const GRAY: (u8, u8, u8) = (92, 99, 112); // #5c6370
}

mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73); // #e45649
    pub const GREEN: (u8, u8, u8) = (80, 161, 79); // #50a14f
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1); // #c18401
    pub const BLUE: (u8, u8, u8) = (64, 120, 242); // #4078f2
    pub const MAGENTA: (u8, u8, u8) = (166, 38, 164); // #a626a4
    pub const CYAN: (u8, u8, u8) = (1, 132, 188); // #0184bc
    pub const GRAY: (u8, u8, u8) = (160, 161, 167); // #a0a1a7
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            let (r, g, b) = match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            };
            rgb(r, g, b)
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(MAGENTA);
theme_color!(CYAN);
theme_color!(GRAY);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Check if colors should be used (TTY detection)
pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply theme color with optional modifiers, or nothing without a TTY
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Calculate visible length (excluding ANSI codes)
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

pub fn pad_left(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", " ".repeat(width - visible), s)
    }
}

pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

/// Shorten plain text to `max` characters, marking the cut with "..."
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

fn border(text: &str) -> String {
    themed(GRAY, &[], text)
}

/// Content line: │ content          │
pub fn row(content: &str) -> String {
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    format!("{}{}{}{}", border("│"), content, " ".repeat(pad), border("│"))
}

/// Section header: ┌─ LABEL ──────────┐
pub fn section_top(label: &str) -> String {
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    format!(
        "{}{}{}",
        border("┌"),
        label_part,
        border(&format!("{}┐", "─".repeat(remaining)))
    )
}

/// Section footer: └──────────────────┘
pub fn section_bot() -> String {
    border(&format!("└{}┘", "─".repeat(BOX_WIDTH)))
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Color-coded strategy badge
pub fn strategy_badge(strategy: Strategy) -> String {
    let label = format!("[{}]", strategy);
    let color: fn() -> String = match strategy {
        Strategy::Prefix => GREEN,
        Strategy::Token => BLUE,
        Strategy::Sorted => MAGENTA,
        Strategy::Hybrid => CYAN,
    };
    themed(color, &[], &label)
}

pub fn availability_label(available: bool) -> String {
    if available {
        themed(GREEN, &[], "available")
    } else {
        themed(RED, &[], "on loan")
    }
}

/// Color-coded microseconds (green=fast, yellow=medium, red=slow)
pub fn timing_us(elapsed: Duration) -> String {
    let value = elapsed.as_secs_f64() * 1_000_000.0;
    let text = format!("{:>12.1}", value);
    let color: fn() -> String = if value < 100.0 {
        GREEN
    } else if value < 10_000.0 {
        YELLOW
    } else {
        RED
    };
    themed(color, &[], &text)
}

// ═══════════════════════════════════════════════════════════════════════════
// RENDERERS
// ═══════════════════════════════════════════════════════════════════════════

/// One boxed block listing up to `limit` hits.
pub fn search_lines(
    query: &str,
    strategy: Strategy,
    hits: &[RecordRef],
    limit: usize,
    elapsed: Duration,
) -> Vec<String> {
    let mut lines = vec![section_top(&format!("SEARCH \"{}\"", truncate(query, 40)))];
    lines.push(row(&format!(
        " {} {} hit(s) in {:.1} µs",
        strategy_badge(strategy),
        hits.len(),
        elapsed.as_secs_f64() * 1_000_000.0
    )));

    if hits.is_empty() {
        lines.push(row(&format!(" {}", themed(GRAY, &[DIM], "no matches"))));
    }
    for record in hits.iter().take(limit) {
        let isbn = themed(YELLOW, &[], &pad_right(&record.isbn, 16));
        let text = truncate(&record.to_string(), BOX_WIDTH - 30);
        lines.push(row(&format!(
            " {} {} {}",
            isbn,
            pad_right(&text, BOX_WIDTH - 30),
            availability_label(record.available)
        )));
    }
    if hits.len() > limit {
        let more = format!("... {} more", hits.len() - limit);
        lines.push(row(&format!(" {}", themed(GRAY, &[DIM], &more))));
    }

    lines.push(section_bot());
    lines
}

pub fn stats_lines(source: &str, stats: &CatalogStats) -> Vec<String> {
    let field = |name: &str, value: usize| {
        row(&format!(" {} {}", pad_right(name, 12), pad_left(&value.to_string(), 10)))
    };
    vec![
        section_top(&format!("CATALOG {}", truncate(source, 50))),
        field("records", stats.total),
        field("available", stats.available),
        field("on loan", stats.borrowed),
        field("users", stats.users),
        section_bot(),
    ]
}

/// Per-size tables: build time, query sweep time and speedup over the
/// linear scan.
pub fn benchmark_lines(table: &BenchmarkTable) -> Vec<String> {
    let mut lines = Vec::new();
    for group in &table.groups {
        lines.push(section_top(&format!("{} RECORDS", group.data_size)));
        lines.push(row(&themed(
            GRAY,
            &[],
            &format!(
                " {} {} {} {}",
                pad_right("strategy", 12),
                pad_left("build µs", 12),
                pad_left("search µs", 12),
                pad_left("speedup", 10)
            ),
        )));
        for entry in &group.entries {
            let build = entry
                .build
                .map(timing_us)
                .unwrap_or_else(|| pad_left("-", 12));
            let search = entry
                .search
                .map(timing_us)
                .unwrap_or_else(|| pad_left("-", 12));
            let speedup = entry
                .speedup
                .map(|x| format!("{:.1}x", x))
                .unwrap_or_else(|| "-".to_string());
            lines.push(row(&format!(
                " {} {} {} {}",
                pad_right(&entry.algorithm_name, 12),
                build,
                search,
                pad_left(&speedup, 10)
            )));
        }
        lines.push(section_bot());
    }
    lines
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════
