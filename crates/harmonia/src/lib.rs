
pub mod album;
pub mod aspects;
pub mod chart;
pub mod geometry;
pub mod harmonics;
pub mod matrix;
pub mod patterns;
pub mod service;
pub mod settings;
pub mod western;

pub use album::{Album, AlbumError};
pub use aspects::{Aspect, AspectTable, PrecisionClass, ResonanceBatch, ResonanceError};
pub use chart::{Chart, ChartError, ChartId, ChartObject, MultiChart, Point};
pub use matrix::{ResonanceMatrix, SubsetMode};
pub use patterns::{Cluster, Pattern, PatternAnalysis, PatternTable};
pub use service::HarmonicService;
pub use settings::{ResonanceSettings, SettingsError};
