use crate::error::GuideError;
use crate::model::PlantRecord;
use log::debug;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Image extensions recognised on disk, in lookup order
pub const IMAGE_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".gif"];

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]").expect("unsafe pattern is valid"));
static UNDERSCORE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_+").expect("underscore pattern is valid"));

/// Read a plants JSON file
pub fn load_plants(path: &Path) -> Result<Vec<PlantRecord>, GuideError> {
    let content = fs::read_to_string(path)?;
    let plants: Vec<PlantRecord> = serde_json::from_str(&content)?;
    debug!("Loaded {} plants from {}", plants.len(), path.display());
    Ok(plants)
}

/// Plants as pretty-printed JSON with a trailing newline
pub fn to_json(plants: &[PlantRecord]) -> Result<String, GuideError> {
    let mut json = serde_json::to_string_pretty(plants)?;
    json.push('\n');
    Ok(json)
}

/// Write plants as pretty-printed JSON, replacing the file
pub fn save_plants(path: &Path, plants: &[PlantRecord]) -> Result<(), GuideError> {
    fs::write(path, to_json(plants)?)?;
    debug!("Saved {} plants to {}", plants.len(), path.display());
    Ok(())
}

/// File stem for a plant name: lowercase ASCII alphanumerics joined by single underscores
pub fn sanitize_filename(name: &str) -> String {
    let lowered = name.to_lowercase();
    let replaced = UNSAFE_CHARS.replace_all(&lowered, "_");
    let collapsed = UNDERSCORE_RUNS.replace_all(&replaced, "_");
    collapsed.trim_matches('_').to_string()
}

/// Extension to save a downloaded image under, taken from the URL path
pub fn image_extension(url: &str) -> &'static str {
    let path = url.split(&['?', '#'][..]).next().unwrap_or("");
    let file = path.rsplit('/').next().unwrap_or("");

    let extension = match file.rfind('.') {
        Some(dot) if dot > 0 => file[dot..].to_lowercase(),
        _ => return ".jpg",
    };

    IMAGE_EXTENSIONS
        .iter()
        .find(|known| **known == extension)
        .copied()
        .unwrap_or(".jpg")
}

/// First existing image file for a stem, trying each known extension
pub fn find_existing_image(images_dir: &Path, stem: &str) -> Option<PathBuf> {
    IMAGE_EXTENSIONS
        .iter()
        .map(|ext| images_dir.join(format!("{stem}{ext}")))
        .find(|path| path.is_file())
}
