use crate::types::Theme;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "recipebox")]
#[command(about = "Browse, search, favorite and submit recipes from a RecipeBox backend")]
pub struct Args {
    /// Backend API base URL (e.g. <https://recipes.example.com/api>)
    #[arg(long, env = "RECIPEBOX_BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Initial color theme
    #[arg(long, value_enum, default_value_t = Theme::Light)]
    pub theme: Theme,

    /// Log filter, e.g. "debug" or "recipebox=trace" (`RUST_LOG` wins when set)
    #[arg(long, env = "RECIPEBOX_LOG", default_value = "info")]
    pub log_level: String,

    /// Log file (default: <data dir>/recipebox/recipebox.log)
    #[arg(long, env = "RECIPEBOX_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}
