//! Persisting finished crops.

use std::fs;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use tracing::debug;

use crate::core::{CropResult, OUTPUT_FILE_EXTENSION, OUTPUT_FILE_PREFIX};
use crate::utils::save_jpeg;

/// Writes crops as `cropped_image_<n>.jpg` with a run-wide counter.
///
/// The counter advances once per crop handed to [`CropWriter::write`], whether
/// or not the write succeeds, so a file's number always equals the crop's
/// position in the flattened output.
#[derive(Debug)]
pub struct CropWriter {
    output_dir: PathBuf,
    next_index: usize,
}

impl CropWriter {
    /// Creates a writer for `output_dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `CropError::Io` if the directory cannot be created.
    pub fn create(output_dir: impl Into<PathBuf>) -> CropResult<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        debug!("Writing crops to {}", output_dir.display());
        Ok(Self {
            output_dir,
            next_index: 0,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Number of crops handed to the writer so far.
    pub fn count(&self) -> usize {
        self.next_index
    }

    /// Path of the `index`-th crop of the run.
    pub fn path_for(&self, index: usize) -> PathBuf {
        self.output_dir
            .join(format!("{OUTPUT_FILE_PREFIX}{index}.{OUTPUT_FILE_EXTENSION}"))
    }

    /// Writes the next crop and returns where it went.
    ///
    /// # Errors
    ///
    /// Returns `CropError::Write` if the crop cannot be encoded or saved.
    pub fn write(&mut self, crop: &DynamicImage) -> CropResult<PathBuf> {
        let path = self.path_for(self.next_index);
        self.next_index += 1;
        save_jpeg(crop, &path)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma};

    #[test]
    fn test_create_makes_directory_and_numbers_files() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested").join("data");
        let mut writer = CropWriter::create(&output).unwrap();
        assert!(output.is_dir());

        let crop = DynamicImage::ImageLuma8(ImageBuffer::from_pixel(3, 3, Luma([50])));
        let first = writer.write(&crop).unwrap();
        let second = writer.write(&crop).unwrap();

        assert_eq!(first, output.join("cropped_image_0.jpg"));
        assert_eq!(second, output.join("cropped_image_1.jpg"));
        assert!(first.is_file() && second.is_file());
        assert_eq!(writer.count(), 2);
    }

    #[test]
    fn test_failed_write_still_advances_counter() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = CropWriter::create(dir.path()).unwrap();

        // A directory squatting on the target name makes the write fail.
        fs::create_dir(writer.path_for(0)).unwrap();
        let crop = DynamicImage::ImageLuma8(ImageBuffer::from_pixel(2, 2, Luma([0])));

        assert!(writer.write(&crop).is_err());
        let next = writer.write(&crop).unwrap();
        assert_eq!(next, dir.path().join("cropped_image_1.jpg"));
    }
}
