//! Board layout and drawing settings.

use serde::Deserialize;
use thiserror::Error;

use crate::layout::SpaceFinder;

/// Errors raised while loading a [`BoardConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The input was not valid config JSON.
	#[error("invalid board config JSON: {0}")]
	Json(#[from] serde_json::Error),
	/// A size that must be positive and finite was not.
	#[error("`{field}` must be a positive number, got {value}")]
	NotPositive {
		/// JSON name of the offending field.
		field: &'static str,
		/// The rejected value.
		value: f64,
	},
}

/// Layout constants plus the colors and sizes used to draw the board.
///
/// Every field is optional in JSON; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardConfig {
	/// Grid increment of the ring search.
	pub step_size: f64,
	/// Minimum distance between cell centers.
	pub spacing: f64,
	/// Side length of a cell square.
	pub cell_size: f64,
	/// Perpendicular shift applied per earlier line sharing a direction.
	pub edge_offset_step: f64,
	/// Stroke color of edges leaving the hovered node.
	pub outgoing_color: String,
	/// Stroke color of edges entering the hovered node.
	pub incoming_color: String,
	/// Fill of an ordinary cell.
	pub cell_color: String,
	/// Fill of the hovered cell.
	pub hovered_color: String,
	/// Label text and hover outline color.
	pub label_color: String,
	/// Board background fill.
	pub background: String,
	/// Opacity of cells unrelated to the hovered node.
	pub dim_alpha: f64,
	/// Edge and outline stroke width.
	pub line_width: f64,
	/// Length of an edge arrowhead.
	pub arrow_size: f64,
}

impl Default for BoardConfig {
	fn default() -> Self {
		Self {
			step_size: 120.0,
			spacing: 100.0,
			cell_size: 80.0,
			edge_offset_step: 10.0,
			outgoing_color: "cyan".to_string(),
			incoming_color: "magenta".to_string(),
			cell_color: "#2a2a4a".to_string(),
			hovered_color: "#4a4a7a".to_string(),
			label_color: "#e0e0f0".to_string(),
			background: "#1a1a2e".to_string(),
			dim_alpha: 0.25,
			line_width: 2.0,
			arrow_size: 8.0,
		}
	}
}

impl BoardConfig {
	/// Parses and validates a JSON config.
	pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
		let config: Self = serde_json::from_str(raw)?;
		config.validate()?;
		Ok(config)
	}

	/// Checks that every size is finite and positive.
	pub fn validate(&self) -> Result<(), ConfigError> {
		for (field, value) in [
			("stepSize", self.step_size),
			("spacing", self.spacing),
			("cellSize", self.cell_size),
		] {
			if !value.is_finite() || value <= 0.0 {
				return Err(ConfigError::NotPositive { field, value });
			}
		}
		Ok(())
	}

	/// Ring search configured from `step_size` and `spacing`.
	pub fn space_finder(&self) -> SpaceFinder {
		SpaceFinder::new(self.step_size, self.spacing)
	}
}
