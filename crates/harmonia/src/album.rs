//! Albums: named collections of charts and multi-charts stored as `.daw` text.
//!
//! ```text
//! // comment
//! #Alice
//! sun 15 30 0
//! moon 5 12 10 0
//! #Bob
//! sun 200
//! <Alice and Bob # Alice # Bob>
//! ```
//!
//! A `#name` line opens a chart, the lines after it are its points (see
//! [`Point::parse`]) and a `<name # chart # chart...>` line declares a
//! multi-chart over charts of the same album.

use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::chart::{Chart, ChartError, ChartObject, MultiChart, Point};
use crate::western::degrees_to_coords;

pub const ALBUM_EXTENSION: &str = "daw";

#[derive(Error, Debug)]
pub enum AlbumError {
    #[error("line {line}: {source}")]
    InvalidPoint {
        line: usize,
        #[source]
        source: ChartError,
    },
    #[error("line {line}: multi-chart '{name}' lists no charts")]
    EmptyMultiChart { line: usize, name: String },
    #[error("line {line}: multi-chart '{name}' refers to unknown chart '{chart}'")]
    UnknownChart {
        line: usize,
        name: String,
        chart: String,
    },
    #[error("cannot access album '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

struct MultiDeclaration {
    line: usize,
    slot: usize,
    name: String,
    components: Vec<String>,
}

/// Ordered list of charts and multi-charts under one name.
#[derive(Debug, Clone, Default)]
pub struct Album {
    name: String,
    entries: Vec<ChartObject>,
}

impl Album {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self, AlbumError> {
        let mut album = Album::new(name);
        let mut current: Option<Chart> = None;
        let mut declarations: Vec<MultiDeclaration> = Vec::new();
        // multi-charts keep their position; their slots are filled once every chart is known
        let mut slots: Vec<Option<ChartObject>> = Vec::new();

        for (number, raw) in text.lines().enumerate() {
            let line_no = number + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with("//") {
                continue;
            }

            if let Some(rest) = line.strip_prefix('<') {
                if let Some(chart) = current.take() {
                    slots.push(Some(chart.into()));
                }
                let body = rest.rfind('>').map_or(rest, |end| &rest[..end]);
                let mut parts = body.split('#').map(str::trim);
                let name = parts.next().unwrap_or_default().to_string();
                let components: Vec<String> = parts
                    .filter(|part| !part.is_empty())
                    .map(str::to_string)
                    .collect();
                if components.is_empty() {
                    return Err(AlbumError::EmptyMultiChart { line: line_no, name });
                }
                declarations.push(MultiDeclaration {
                    line: line_no,
                    slot: slots.len(),
                    name,
                    components,
                });
                slots.push(None);
                continue;
            }

            if let Some(name) = line.strip_prefix('#') {
                if let Some(chart) = current.take() {
                    slots.push(Some(chart.into()));
                }
                current = Some(Chart::new(name.trim()));
                continue;
            }

            match current.as_mut() {
                Some(chart) => {
                    let point = Point::parse(line)
                        .map_err(|source| AlbumError::InvalidPoint { line: line_no, source })?;
                    chart.add_point(point);
                }
                None => warn!("line {}: point outside of any chart skipped: '{}'", line_no, line),
            }
        }
        if let Some(chart) = current.take() {
            slots.push(Some(chart.into()));
        }

        for declaration in declarations {
            let mut moments = Vec::with_capacity(declaration.components.len());
            for component in &declaration.components {
                let chart = slots
                    .iter()
                    .flatten()
                    .rev()
                    .find_map(|entry| match entry {
                        ChartObject::Single(chart) if chart.name() == component => Some(chart.clone()),
                        _ => None,
                    })
                    .ok_or_else(|| AlbumError::UnknownChart {
                        line: declaration.line,
                        name: declaration.name.clone(),
                        chart: component.clone(),
                    })?;
                moments.push(chart);
            }
            let multi = if declaration.name.is_empty() {
                MultiChart::synastry(moments)
            } else {
                MultiChart::new(declaration.name, moments)
            };
            slots[declaration.slot] = Some(multi.into());
        }

        for entry in slots.into_iter().flatten() {
            album.add(entry);
        }
        Ok(album)
    }

    /// Read an album file; the album is named after the file stem.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, AlbumError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| AlbumError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let album = Self::parse(name, &text)?;
        info!(
            "read album '{}' from {}: {} entries",
            album.name,
            path.display(),
            album.len()
        );
        Ok(album)
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), AlbumError> {
        let path = path.as_ref();
        fs::write(path, self.to_text()).map_err(|source| AlbumError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("wrote album '{}' to {}", self.name, path.display());
        Ok(())
    }

    /// Text form readable by [`Album::parse`]. Components of multi-charts
    /// missing from the album are written as charts after everything else.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        let mut extra: Vec<&Chart> = Vec::new();

        for entry in &self.entries {
            match entry {
                ChartObject::Single(chart) => write_chart(&mut text, chart),
                ChartObject::Multi(multi) => {
                    let names: Vec<&str> = multi.charts().iter().map(|c| c.name()).collect();
                    text.push_str(&format!("<{} # {}>\n", multi.name(), names.join(" # ")));
                    for chart in multi.charts() {
                        let listed = self.single(chart.name()).is_some()
                            || extra.iter().any(|c| c.name() == chart.name());
                        if !listed {
                            extra.push(chart);
                        }
                    }
                }
            }
        }
        for chart in extra {
            write_chart(&mut text, chart);
        }
        text
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add an entry; an entry with the same name is replaced in place.
    pub fn add(&mut self, entry: impl Into<ChartObject>) {
        let entry = entry.into();
        match self.entries.iter_mut().find(|e| e.name() == entry.name()) {
            Some(existing) => {
                warn!("album '{}': '{}' defined again, replacing it", self.name, entry.name());
                *existing = entry;
            }
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ChartObject> {
        self.entries.iter().find(|e| e.name() == name)
    }

    /// Plain chart by name.
    pub fn single(&self, name: &str) -> Option<&Chart> {
        match self.get(name)? {
            ChartObject::Single(chart) => Some(chart),
            ChartObject::Multi(_) => None,
        }
    }

    pub fn entries(&self) -> &[ChartObject] {
        &self.entries
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Album file name for `name`, with the `.daw` extension added if missing.
pub fn with_extension(name: &str) -> String {
    let suffix = format!(".{}", ALBUM_EXTENSION);
    if name.ends_with(&suffix) {
        name.to_string()
    } else {
        format!("{}{}", name, suffix)
    }
}

fn write_chart(text: &mut String, chart: &Chart) {
    text.push_str(&format!("#{}\n", chart.name()));
    for point in chart.points() {
        let (degrees, minutes, seconds) = degrees_to_coords(point.position());
        text.push_str(&format!("{} {} {} {}\n", point.name(), degrees, minutes, seconds));
    }
    text.push('\n');
}
