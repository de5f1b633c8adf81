//! Target image loading and result saving. These are the collaborators the
//! engine itself stays ignorant of: the engine only ever sees a flat RGBA
//! buffer already resampled to the working resolution.

use std::path::Path;

use image::imageops::FilterType;

use crate::dna::Genome;
use crate::error::EngineError;
use crate::render::CpuRenderer;

/// An image decoded and resampled to the square working resolution.
#[derive(Debug)]
pub struct TargetImage {
    pub size: u32,
    pub rgba: Vec<u8>,
}

/// Decode `path` and resample it to `work_size`×`work_size` RGBA.
pub fn load_target(path: &Path, work_size: u32) -> Result<TargetImage, EngineError> {
    profiling::scope!("load_target_file");
    let img = image::open(path)?;
    let resized = image::imageops::resize(
        &img.to_rgba8(),
        work_size,
        work_size,
        FilterType::CatmullRom,
    );
    tracing::info!(path = %path.display(), work_size, "target image loaded");
    Ok(TargetImage {
        size: work_size,
        rgba: resized.into_raw(),
    })
}

/// Render `genome` at `out_size` and write it as a PNG.
pub fn save_png(
    path: &Path,
    genome: &Genome,
    work_size: u32,
    out_size: u32,
) -> Result<(), EngineError> {
    profiling::scope!("save_png");
    let rgba = CpuRenderer::render_scaled(genome, work_size, out_size);
    image::save_buffer(
        path,
        &rgba,
        out_size,
        out_size,
        image::ExtendedColorType::Rgba8,
    )?;
    tracing::info!(path = %path.display(), out_size, "render saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn load_resamples_to_working_resolution() {
        let dir = std::env::temp_dir();
        let path = dir.join("trivolve_loader_test.png");
        let img = image::RgbaImage::from_pixel(200, 120, image::Rgba([9, 8, 7, 255]));
        img.save(&path).unwrap();

        let target = load_target(&path, 75).unwrap();
        assert_eq!(target.size, 75);
        assert_eq!(target.rgba.len(), 75 * 75 * 4);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_surfaces_an_image_error() {
        let err = load_target(Path::new("/nonexistent/trivolve.png"), 75).unwrap_err();
        assert!(matches!(err, EngineError::Image(_)));
    }

    #[test]
    fn save_writes_a_readable_png() {
        let dir = std::env::temp_dir();
        let path = dir.join("trivolve_save_test.png");
        let mut rng = Pcg32::seed_from_u64(5);
        let genome = Genome::random(&mut rng, 20, 75);

        save_png(&path, &genome, 75, 150).unwrap();
        let back = image::open(&path).unwrap();
        assert_eq!((back.width(), back.height()), (150, 150));

        let _ = std::fs::remove_file(&path);
    }
}
