//! Lantern CLI
//!
//! Runs the rendering pipeline on a document and prints any of its
//! generations: markup tree, styled tree, box tree, laid-out tree and
//! display list.

use std::fmt::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use lantern_browser::css::cascade::dump_styled_tree;
use lantern_browser::css::layout::dump_layout_tree;
use lantern_browser::css::{DisplayList, parse_stylesheet};
use lantern_browser::dom::dump_tree;
use lantern_browser::html::parse_html;
use lantern_browser::{
    DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH, RenderConfig, build_box_tree, layout_tree,
    paint, read_source, style,
};
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::Map;

/// Lantern: inspect each stage of a minimal rendering pipeline
#[derive(Parser, Debug)]
#[command(name = "lantern")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Display list for a file and its stylesheet
    lantern index.html --css style.css

    # Every generation of the pipeline
    lantern index.html --css style.css --dom --styles --boxes --layout --display-list

    # Inline sources
    lantern --html '<div><p>hi</p></div>' --style 'div, p { display: block }' --layout

    # Laid-out tree as JSON
    lantern index.html --css style.css --layout --json
"#)]
struct Cli {
    /// Path to the markup file
    #[arg(value_name = "HTML_FILE")]
    path: Option<PathBuf>,

    /// Markup string to render instead of a file
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// Path to the stylesheet file
    #[arg(long, value_name = "FILE")]
    css: Option<PathBuf>,

    /// Stylesheet string to use instead of a file
    #[arg(long, value_name = "CSS", conflicts_with = "css")]
    style: Option<String>,

    /// Viewport width in pixels
    #[arg(long, default_value_t = DEFAULT_VIEWPORT_WIDTH)]
    width: f32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = DEFAULT_VIEWPORT_HEIGHT)]
    height: f32,

    /// Print the markup tree
    #[arg(long)]
    dom: bool,

    /// Print the styled tree with specified values
    #[arg(long)]
    styles: bool,

    /// Print the box tree before layout
    #[arg(long)]
    boxes: bool,

    /// Print the laid-out box tree
    #[arg(long)]
    layout: bool,

    /// Print the display list (the default when nothing else is selected)
    #[arg(long)]
    display_list: bool,

    /// Print the selected generations as one JSON object keyed by generation
    #[arg(long)]
    json: bool,

    /// Log pipeline stages (debug level)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let markup = load_markup(&cli)?;
    let stylesheet_text = load_stylesheet(&cli)?;
    let config = RenderConfig::new(cli.width, cli.height);
    log::debug!("viewport {}x{}", config.viewport_width, config.viewport_height);

    let show_display_list =
        cli.display_list || !(cli.dom || cli.styles || cli.boxes || cli.layout);

    let dom = parse_html(&markup).context("failed to parse markup")?;
    let stylesheet = parse_stylesheet(&stylesheet_text).context("failed to parse stylesheet")?;
    let mut report = Report::new(cli.json);

    if cli.dom {
        report.add("dom", "Markup Tree", &dom, || dump_tree(&dom))?;
    }

    let styled = style(dom, &stylesheet);
    if cli.styles {
        report.add("styles", "Styled Tree", &styled, || dump_styled_tree(&styled))?;
    }

    let boxes = build_box_tree(styled).context("failed to build the box tree")?;
    if cli.boxes {
        report.add("boxes", "Box Tree", &boxes, || dump_layout_tree(&boxes))?;
    }

    let laid_out = layout_tree(boxes, &config);
    if cli.layout {
        report.add("layout", "Layout Tree", &laid_out, || dump_layout_tree(&laid_out))?;
    }

    let display_list = paint(&laid_out);
    if show_display_list {
        report.add("display_list", "Display List", &display_list, || {
            format_display_list(&display_list)
        })?;
    }

    print!("{}", report.finish()?);
    Ok(())
}

/// Markup from `--html` or the positional file.
fn load_markup(cli: &Cli) -> Result<String> {
    if let Some(ref html) = cli.html {
        Ok(html.clone())
    } else if let Some(ref path) = cli.path {
        Ok(read_source(path)?)
    } else {
        bail!("no input: pass an HTML file or --html")
    }
}

/// Stylesheet from `--style`, `--css`, or empty.
fn load_stylesheet(cli: &Cli) -> Result<String> {
    if let Some(ref css) = cli.style {
        Ok(css.clone())
    } else if let Some(ref path) = cli.css {
        Ok(read_source(path)?)
    } else {
        Ok(String::new())
    }
}

/// The selected generations, either as text dumps under colored headers or
/// as one JSON object keyed by generation.
enum Report {
    Text(String),
    Json(Map<String, serde_json::Value>),
}

impl Report {
    fn new(json: bool) -> Self {
        if json {
            Self::Json(Map::new())
        } else {
            Self::Text(String::new())
        }
    }

    /// Record one generation. `dump` is only called for text output.
    fn add<T: Serialize>(
        &mut self,
        key: &str,
        title: &str,
        generation: &T,
        dump: impl FnOnce() -> String,
    ) -> Result<()> {
        match self {
            Self::Text(out) => {
                let _ = writeln!(out, "{}", format!("=== {title} ===").bold().cyan());
                out.push_str(&dump());
            }
            Self::Json(map) => {
                let value = serde_json::to_value(generation)
                    .with_context(|| format!("failed to serialize {title}"))?;
                let _ = map.insert(key.to_string(), value);
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<String> {
        match self {
            Self::Text(out) => Ok(out),
            Self::Json(map) => {
                let json = serde_json::to_string_pretty(&map).context("failed to serialize")?;
                Ok(format!("{json}\n"))
            }
        }
    }
}

fn format_display_list(list: &DisplayList) -> String {
    let mut out = String::new();
    for (index, command) in list.commands().iter().enumerate() {
        let _ = writeln!(out, "{:>4} {command}", index.dimmed());
    }
    let _ = writeln!(out, "{}", format!("{} commands", list.len()).dimmed());
    out
}
