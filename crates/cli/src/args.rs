use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Args;
use linescale_core::model::{Session, WorkingArea};

/// A `WIDTHxHEIGHT` working-area size given on the command line, e.g. `650x550`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaSize(pub WorkingArea);

impl FromStr for AreaSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
        let width: f64 = w
            .trim()
            .parse()
            .map_err(|_| format!("invalid width '{}'", w.trim()))?;
        let height: f64 = h
            .trim()
            .parse()
            .map_err(|_| format!("invalid height '{}'", h.trim()))?;
        let area = WorkingArea::new(width, height);
        if !area.is_valid() {
            return Err(format!(
                "width and height must be positive, got {width}x{height}"
            ));
        }
        Ok(Self(area))
    }
}

/// Where the session comes from, plus area overrides.
#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Session JSON file (defaults to the built-in lab lines)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub session: Option<PathBuf>,

    /// Original working area, e.g. 1300x1100
    #[arg(long, value_name = "WxH")]
    pub old: Option<AreaSize>,

    /// New working area, e.g. 650x550
    #[arg(long, value_name = "WxH")]
    pub new: Option<AreaSize>,
}

impl SessionArgs {
    pub fn load(&self) -> Result<Session> {
        let mut session = match &self.session {
            Some(path) => load_file(path)?,
            None => Session::default(),
        };
        if let Some(AreaSize(area)) = self.old {
            session.old_area = area;
        }
        if let Some(AreaSize(area)) = self.new {
            session.new_area = area;
        }
        Ok(session)
    }
}

fn load_file(path: &Path) -> Result<Session> {
    Session::load(path).with_context(|| format!("loading session {}", path.display()))
}
