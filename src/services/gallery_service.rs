use icu_collator::{Collator, CollatorOptions};
use once_cell::sync::Lazy;
use regex::Regex;
use std::{
    io,
    path::{Path, PathBuf},
};

static IMAGE_EXTENSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\.(jpe?g|png|gif|webp)$").expect("image extension pattern is valid")
});

/// Lists the images available under the gallery directory.
pub struct GalleryService {
    images_dir: PathBuf,
}

impl GalleryService {
    pub fn new(images_dir: impl Into<PathBuf>) -> Self {
        Self {
            images_dir: images_dir.into(),
        }
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    /// Regular files with an image extension, in collation order.
    /// Subdirectories are skipped even when their name looks like an image.
    pub async fn list_images(&self) -> io::Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.images_dir).await?;
        let mut images = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if is_image_name(&name) {
                images.push(name);
            }
        }

        sort_names(&mut images)?;
        Ok(images)
    }
}

pub fn is_image_name(name: &str) -> bool {
    IMAGE_EXTENSION.is_match(name)
}

/// Sorts with the root-locale collator at default strength: accents and case
/// are secondary and tertiary differences, lowercase first.
pub fn sort_names<S: AsRef<str>>(names: &mut [S]) -> io::Result<()> {
    let collator = Collator::try_new(&Default::default(), CollatorOptions::new())
        .map_err(|err| io::Error::other(format!("collator unavailable: {err}")))?;
    names.sort_by(|a, b| collator.compare(a.as_ref(), b.as_ref()));
    Ok(())
}
