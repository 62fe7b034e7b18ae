//! User input for a crop run.
//!
//! [`InputForm`] holds the three raw values a front end collects: a
//! comma-separated list of image paths and the crop width and height as typed.
//! [`InputForm::parse`] turns them into a [`CropRequest`], the explicit value
//! the pipeline consumes. Nothing else couples a front end to the pipeline.

use std::path::PathBuf;

use crate::core::{CropError, CropResult, PATH_DELIMITER};
use crate::processors::CropSize;

/// What to crop: the source images and the crop size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropRequest {
    /// Source images, in the order their crops are written.
    pub paths: Vec<PathBuf>,
    /// Width of every crop in pixels.
    pub crop_width: u32,
    /// Height of every crop in pixels.
    pub crop_height: u32,
}

impl CropRequest {
    pub fn new(paths: Vec<PathBuf>, crop_width: u32, crop_height: u32) -> Self {
        Self {
            paths,
            crop_width,
            crop_height,
        }
    }

    pub fn crop_size(&self) -> CropSize {
        CropSize::new(self.crop_width, self.crop_height)
    }

    /// Checks the request before any image is touched.
    ///
    /// # Errors
    ///
    /// Returns `CropError::InvalidInput` if there are no paths or either crop
    /// dimension is zero.
    pub fn validate(&self) -> CropResult<()> {
        if self.paths.is_empty() {
            return Err(CropError::invalid_input("no image paths given"));
        }
        if self.crop_width == 0 || self.crop_height == 0 {
            return Err(CropError::invalid_input(format!(
                "crop dimensions must be positive, got {}",
                self.crop_size()
            )));
        }
        Ok(())
    }
}

/// Raw values captured by a front end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputForm {
    /// Image paths separated by commas.
    pub paths: String,
    /// Crop width as typed.
    pub crop_width: String,
    /// Crop height as typed.
    pub crop_height: String,
}

impl InputForm {
    pub fn new(
        paths: impl Into<String>,
        crop_width: impl Into<String>,
        crop_height: impl Into<String>,
    ) -> Self {
        Self {
            paths: paths.into(),
            crop_width: crop_width.into(),
            crop_height: crop_height.into(),
        }
    }

    /// Parses the form into a validated [`CropRequest`].
    ///
    /// # Errors
    ///
    /// Returns `CropError::InvalidInput` if a dimension is missing, not an
    /// integer, or zero, or if no path is given.
    ///
    /// # Example
    ///
    /// ```rust
    /// use crop_sampler::pipeline::InputForm;
    ///
    /// let request = InputForm::new("a.jpg, b.png", "64", "48").parse()?;
    /// assert_eq!(request.paths.len(), 2);
    /// assert_eq!(request.crop_width, 64);
    ///
    /// assert!(InputForm::new("a.jpg", "wide", "48").parse().is_err());
    /// # Ok::<(), crop_sampler::core::CropError>(())
    /// ```
    pub fn parse(&self) -> CropResult<CropRequest> {
        let crop_width = parse_dimension("crop width", &self.crop_width)?;
        let crop_height = parse_dimension("crop height", &self.crop_height)?;
        let request = CropRequest::new(split_paths(&self.paths), crop_width, crop_height);
        request.validate()?;
        Ok(request)
    }
}

/// Splits a delimited path list, trimming whitespace and dropping empty entries.
pub fn split_paths(raw: &str) -> Vec<PathBuf> {
    raw.split(PATH_DELIMITER)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(PathBuf::from)
        .collect()
}

fn parse_dimension(name: &str, raw: &str) -> CropResult<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CropError::invalid_input(format!("{name} is required")));
    }

    let value: u32 = trimmed.parse().map_err(|_| {
        CropError::invalid_input(format!(
            "{name} must be a positive integer, got '{trimmed}'"
        ))
    })?;

    if value == 0 {
        return Err(CropError::invalid_input(format!(
            "{name} must be greater than 0"
        )));
    }
    Ok(value)
}
