use crate::model::PlantRecord;
use crate::store::{find_existing_image, sanitize_filename};
use log::debug;
use std::path::Path;

pub const IMAGE_LICENSE: &str = "Wikimedia Commons";
pub const IMAGE_AUTHOR: &str = "Wikipedia contributors";

/// Attach image files already on disk to their plants
///
/// A plant with a matching `<sanitized name>.<ext>` file gets its image,
/// license and author set. A plant without one that was never enriched is
/// marked with `image_file: null`. Returns the number of plants matched.
pub fn process(plants: &mut [PlantRecord], images_dir: &Path) -> usize {
    process_marking(plants, images_dir, |_| true)
}

/// Like [`process`], but only plants accepted by `mark_missing` are marked
/// `null` when no file matches. The rest keep an absent `image_file`.
pub fn process_marking<F>(plants: &mut [PlantRecord], images_dir: &Path, mark_missing: F) -> usize
where
    F: Fn(&PlantRecord) -> bool,
{
    let mut matched = 0;

    for plant in plants.iter_mut() {
        let stem = sanitize_filename(&plant.scientific_name);
        let file_name = find_existing_image(images_dir, &stem)
            .and_then(|path| path.file_name().map(|name| name.to_string_lossy().into_owned()));

        match file_name {
            Some(file_name) => {
                debug!("Linked {} to {}", plant.scientific_name, file_name);
                plant.image_file = Some(Some(file_name));
                plant.image_license = Some(Some(IMAGE_LICENSE.to_string()));
                plant.image_author = Some(Some(IMAGE_AUTHOR.to_string()));
                matched += 1;
            }
            None if plant.image_file.is_none() && mark_missing(&*plant) => {
                plant.image_file = Some(None);
            }
            None => {}
        }
    }

    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_link_existing_images() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("acer_rubrum.jpeg"), b"jpeg").unwrap();

        let mut plants = vec![
            PlantRecord::new("Acer rubrum", "Red maple"),
            PlantRecord::new("Quercus alba", "White oak"),
            PlantRecord {
                image_file: Some(Some("old.jpg".to_string())),
                ..PlantRecord::new("Carex radiata", "Eastern star sedge")
            },
        ];

        let matched = process(&mut plants, dir.path());

        assert_eq!(matched, 1);
        assert_eq!(plants[0].image(), Some("acer_rubrum.jpeg"));
        assert_eq!(plants[0].image_license, Some(Some(IMAGE_LICENSE.to_string())));
        assert_eq!(plants[0].image_author, Some(Some(IMAGE_AUTHOR.to_string())));
        assert!(plants[1].marked_without_image());
        assert_eq!(plants[1].image_license, None);
        // Existing values are left alone when no file matches
        assert_eq!(plants[2].image(), Some("old.jpg"));
    }

    #[test]
    fn test_unaccepted_plants_stay_unmarked() {
        let dir = tempfile::tempdir().unwrap();
        let mut plants = vec![
            PlantRecord::new("Quercus alba", "White oak"),
            PlantRecord::new("Carex radiata", "Eastern star sedge"),
        ];

        let matched = process_marking(&mut plants, dir.path(), |plant| {
            plant.scientific_name == "Quercus alba"
        });

        assert_eq!(matched, 0);
        assert!(plants[0].marked_without_image());
        assert_eq!(plants[1].image_file, None);
    }
}
