use crate::constants::{DEFAULT_GROUP_SIZE, DEFAULT_MAX_CONCURRENT_DECODES, mm_to_pt};
use crate::layout::effective_group_size;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Imposition and composition configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ImpositionOptions {
    // Sheet layout
    pub layout: OutputLayout,
    pub paper_size: PaperSize,

    // Signatures (0 or a non-multiple of 4 falls back to 4)
    pub group_size: usize,

    // Bleed around the content, in millimeters
    pub bleed_mm: f32,

    // Scaling per layout
    pub single_up_scaling: ScalingMode,
    pub two_up_scaling: ScalingMode,

    // Decode workers
    pub max_concurrent_decodes: usize,
}

impl Default for ImpositionOptions {
    fn default() -> Self {
        Self {
            layout: OutputLayout::TwoUp,
            paper_size: PaperSize::A4,
            group_size: DEFAULT_GROUP_SIZE,
            bleed_mm: 0.0,
            single_up_scaling: ScalingMode::Fit,
            two_up_scaling: ScalingMode::Fill,
            max_concurrent_decodes: DEFAULT_MAX_CONCURRENT_DECODES,
        }
    }
}

impl ImpositionOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| ImposeError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ImposeError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options.
    ///
    /// The group size is never rejected; see [`effective_group_size`].
    pub fn validate(&self) -> Result<()> {
        if !self.bleed_mm.is_finite() || self.bleed_mm < 0.0 {
            return Err(ImposeError::Config(format!(
                "Bleed must be a non-negative number of millimeters, got {}",
                self.bleed_mm
            )));
        }

        let (width_mm, height_mm) = self.paper_size.dimensions_mm();
        if !(width_mm > 0.0 && height_mm > 0.0) || !width_mm.is_finite() || !height_mm.is_finite()
        {
            return Err(ImposeError::Config(format!(
                "Paper size must be positive, got {}x{} mm",
                width_mm, height_mm
            )));
        }

        if self.max_concurrent_decodes == 0 {
            return Err(ImposeError::Config(
                "At least one concurrent decode is required".to_string(),
            ));
        }

        Ok(())
    }

    /// Group size actually used by the planner
    pub fn effective_group_size(&self) -> usize {
        effective_group_size(self.group_size)
    }

    /// Bleed converted to output units (points)
    pub fn bleed_pt(&self) -> f32 {
        mm_to_pt(self.bleed_mm)
    }

    /// Output sheet (width, height) in points, oriented for the layout
    pub fn sheet_dimensions_pt(&self) -> (f32, f32) {
        let (w, h) = self
            .paper_size
            .dimensions_with_orientation(self.layout.orientation());
        (mm_to_pt(w), mm_to_pt(h))
    }

    /// Scaling mode used for the current layout
    pub fn scaling_mode(&self) -> ScalingMode {
        match self.layout {
            OutputLayout::SingleUp => self.single_up_scaling,
            OutputLayout::TwoUp => self.two_up_scaling,
        }
    }
}
