use plantguide_import::pipelines::parse::category_counts;
use plantguide_import::store::{load_plants, save_plants, to_json};
use plantguide_import::{
    parse_guide, parse_guide_file, Category, GuideError, ParserConfig, PlantGuideImporter,
};
use std::collections::HashSet;

const GUIDE: &str = "2024 Native Planting Guide
Definitions are collected in the Glossary at the back.
Page | 98
Ferns
Ferns add texture to shady gardens.
Adiantum pedatum Northern maidenhair fern
Habitat: Rich moist woods Coefficient of 8
Exposure: Shade Ecosystem Services: Cover for amphibians
Form/Color: Delicate fan-shaped fronds
on black stems
Other: Spreads slowly by rhizomes
Horticultural and Aesthetic Value: Elegant texture
Page | 99
Osmunda regalis Royal fern Regulated in some counties
Habitat: Swamps and bogs
Graminoids
Carex pensylvanica Pennsylvania sedge
Habitat: Dry woods
Exposure: Part shade
Shrubs
Cornus sericea Red osier dogwood
Habitat: Wet thickets
Trees
Acer rubrum Red maple
Habitat: Swamps
Quercus alba White oak
Habitat: Dry to mesic upland forests
Vines
Vitis riparia Riverbank grape
Habitat: Floodplains
Parthenocissus quinquefolia \u{2020} Virginia creeper Invasive elsewhere
Habitat: Woods edges
Forbs
Asclepias syriaca Common milkweed
Habitat: Fields and roadsides
Glossary
Acer saccharum Sugar maple
Habitat: Not a plant description
";

#[test]
fn test_full_guide() {
    let plants = parse_guide(GUIDE);

    let names: Vec<&str> = plants.iter().map(|p| p.scientific_name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Acer rubrum",
            "Adiantum pedatum",
            "Asclepias syriaca",
            "Carex pensylvanica",
            "Cornus sericea",
            "Osmunda regalis",
            "Parthenocissus quinquefolia",
            "Quercus alba",
            "Vitis riparia",
        ]
    );

    let fern = &plants[1];
    assert_eq!(fern.common_name, "Northern maidenhair fern");
    assert_eq!(fern.category, Category::Fern);
    assert_eq!(fern.habitat, "Rich moist woods");
    assert_eq!(fern.exposure, "Shade");
    assert_eq!(fern.form_color, "Delicate fan-shaped fronds on black stems");
    assert_eq!(fern.other_info, "Spreads slowly by rhizomes");
    assert_eq!(fern.horticultural_value, "Elegant texture");
    assert!(fern.image_file.is_none());
}

#[test]
fn test_regulatory_suffix_and_dagger_removed() {
    let plants = parse_guide(GUIDE);

    let royal = plants
        .iter()
        .find(|p| p.scientific_name == "Osmunda regalis")
        .unwrap();
    assert_eq!(royal.common_name, "Royal fern");

    let creeper = plants
        .iter()
        .find(|p| p.scientific_name == "Parthenocissus quinquefolia")
        .unwrap();
    assert_eq!(creeper.common_name, "Virginia creeper");
    assert_eq!(creeper.habitat, "Woods edges");
}

#[test]
fn test_adjacent_entries_keep_their_own_fields() {
    let plants = parse_guide(GUIDE);
    let habitat = |name: &str| {
        plants
            .iter()
            .find(|p| p.scientific_name == name)
            .map(|p| p.habitat.clone())
            .unwrap()
    };

    assert_eq!(habitat("Acer rubrum"), "Swamps");
    assert_eq!(habitat("Quercus alba"), "Dry to mesic upland forests");
    assert_eq!(habitat("Vitis riparia"), "Floodplains");
    assert_eq!(habitat("Carex pensylvanica"), "Dry woods");
}

#[test]
fn test_nothing_after_glossary() {
    let plants = parse_guide(GUIDE);
    assert!(plants.iter().all(|p| p.scientific_name != "Acer saccharum"));
}

#[test]
fn test_output_invariants() {
    let plants = parse_guide(GUIDE);

    let mut seen = HashSet::new();
    for plant in &plants {
        assert!(seen.insert(plant.scientific_name.to_lowercase()));

        let mut words = plant.scientific_name.split(' ');
        let genus = words.next().unwrap();
        let species = words.next().unwrap();
        assert!(genus.chars().next().unwrap().is_uppercase());
        assert!(species.chars().next().unwrap().is_lowercase());
        assert!(plant.common_name.chars().count() >= 3);
    }

    let mut sorted = plants.clone();
    sorted.sort_by(|a, b| a.scientific_name.cmp(&b.scientific_name));
    assert_eq!(plants, sorted);
}

#[test]
fn test_category_counts() {
    let counts = category_counts(&parse_guide(GUIDE));

    assert_eq!(counts[&Category::Fern], 2);
    assert_eq!(counts[&Category::Graminoid], 1);
    assert_eq!(counts[&Category::Shrub], 1);
    assert_eq!(counts[&Category::Tree], 2);
    assert_eq!(counts[&Category::Vine], 2);
    assert_eq!(counts[&Category::Forb], 1);
}

#[test]
fn test_parse_is_deterministic() {
    let first = to_json(&parse_guide(GUIDE)).unwrap();
    let second = to_json(&parse_guide(GUIDE)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_parse_file_and_store() {
    let dir = tempfile::tempdir().unwrap();
    let guide_path = dir.path().join("guide.txt");
    let plants_path = dir.path().join("plants.json");
    std::fs::write(&guide_path, GUIDE).unwrap();

    let plants = parse_guide_file(&guide_path, &ParserConfig::default()).unwrap();
    save_plants(&plants_path, &plants).unwrap();

    let json = std::fs::read_to_string(&plants_path).unwrap();
    assert!(json.ends_with('\n'));
    assert!(!json.contains("image_file"));
    assert_eq!(load_plants(&plants_path).unwrap(), plants);
}

#[test]
fn test_missing_guide_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = parse_guide_file(&dir.path().join("absent.txt"), &ParserConfig::default());
    assert!(matches!(result, Err(GuideError::Io(_))));
}

#[test]
fn test_empty_and_unrelated_input() {
    assert!(parse_guide("").is_empty());
    assert!(parse_guide("Page | 98\nNothing to see here.\nGlossary\n").is_empty());
}

#[test]
fn test_builder_with_text() {
    let plants = PlantGuideImporter::builder().text(GUIDE).build().unwrap();
    assert_eq!(plants, parse_guide(GUIDE));
}

#[test]
fn test_builder_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let guide_path = dir.path().join("guide.txt");
    std::fs::write(&guide_path, GUIDE).unwrap();

    let plants = PlantGuideImporter::builder()
        .path(&guide_path)
        .build()
        .unwrap();
    assert_eq!(plants.len(), 9);
}

#[test]
fn test_builder_short_lookahead() {
    let plants = PlantGuideImporter::builder()
        .text(GUIDE)
        .lookahead(2)
        .build()
        .unwrap();

    let fern = plants
        .iter()
        .find(|p| p.scientific_name == "Adiantum pedatum")
        .unwrap();
    assert_eq!(fern.habitat, "Rich moist woods");
    assert_eq!(fern.exposure, "");
}

#[test]
fn test_builder_without_source() {
    let result = PlantGuideImporter::builder().build();
    assert!(matches!(result, Err(GuideError::BuilderError(_))));
}
