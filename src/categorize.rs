use crate::model::Category;
use log::error;
use std::collections::HashMap;
use std::sync::LazyLock;

const FERN_GENERA: &[&str] = &[
    "Adiantum", "Asplenium", "Athyrium", "Dennstaedtia", "Deparia", "Dryopteris",
    "Matteuccia", "Onoclea", "Osmunda", "Osmundastrum", "Polypodium", "Polystichum",
    "Pteridium", "Thelypteris", "Woodwardia",
];

const GRAMINOID_GENERA: &[&str] = &[
    "Ammophila", "Andropogon", "Aristida", "Agrostis", "Avenella", "Bolboschoenus",
    "Calamagrostis", "Carex", "Cenchrus", "Chasmanthium", "Cinna", "Cyperus",
    "Danthonia", "Dichanthelium", "Distichlis", "Eleocharis", "Elymus", "Eragrostis",
    "Eriophorum", "Festuca", "Glyceria", "Juncus", "Koeleria", "Leersia",
    "Muhlenbergia", "Panicum", "Phalaris", "Piptochaetium", "Poa", "Rhynchospora",
    "Schizachyrium", "Schoenoplectus", "Scirpus", "Sorghastrum", "Spartina",
    "Sporobolus", "Tridens", "Tripsacum", "Typha", "Zizania",
];

const SHRUB_GENERA: &[&str] = &[
    "Aronia", "Arctostaphylos", "Baccharis", "Calycanthus", "Ceanothus", "Cephalanthus",
    "Clethra", "Comptonia", "Cornus", "Crataegus", "Diervilla", "Epigaea", "Eubotrys",
    "Euonymus", "Gaultheria", "Gaylussacia", "Hamamelis", "Hudsonia", "Hydrangea",
    "Ilex", "Itea", "Kalmia", "Leucothoe", "Lindera", "Lyonia", "Morella", "Myrica",
    "Photinia", "Physocarpus", "Prunus", "Rhododendron", "Rhus", "Ribes", "Rosa",
    "Rubus", "Sambucus", "Spiraea", "Staphylea", "Symphoricarpos", "Vaccinium",
    "Viburnum", "Xanthorhiza",
];

const TREE_GENERA: &[&str] = &[
    "Abies", "Acer", "Aesculus", "Amelanchier", "Asimina", "Betula", "Carpinus", "Carya",
    "Castanea", "Catalpa", "Celtis", "Cercis", "Chionanthus", "Cladrastis", "Diospyros",
    "Fagus", "Fraxinus", "Gleditsia", "Gymnocladus", "Halesia", "Juglans", "Juniperus",
    "Larix", "Liquidambar", "Liriodendron", "Magnolia", "Morus", "Nyssa", "Ostrya",
    "Oxydendrum", "Picea", "Pinus", "Platanus", "Populus", "Quercus", "Salix",
    "Sassafras", "Taxodium", "Thuja", "Tilia", "Tsuga", "Ulmus",
];

const VINE_GENERA: &[&str] = &[
    "Apios", "Bignonia", "Campsis", "Celastrus", "Clematis", "Lonicera", "Menispermum",
    "Parthenocissus", "Smilax", "Strophostyles", "Vitis", "Wisteria",
];

const GENUS_LISTS: [(Category, &[&str]); 5] = [
    (Category::Fern, FERN_GENERA),
    (Category::Graminoid, GRAMINOID_GENERA),
    (Category::Shrub, SHRUB_GENERA),
    (Category::Tree, TREE_GENERA),
    (Category::Vine, VINE_GENERA),
];

static GENUS_TABLE: LazyLock<HashMap<&'static str, Category>> =
    LazyLock::new(|| build_genus_table(&GENUS_LISTS).0);

/// Build the genus lookup. Returns the table and every genus that appeared
/// in more than one list; the first list keeps it.
fn build_genus_table(
    lists: &[(Category, &'static [&'static str])],
) -> (HashMap<&'static str, Category>, Vec<&'static str>) {
    let mut table = HashMap::new();
    let mut collisions = Vec::new();

    for (category, genera) in lists {
        for genus in genera.iter() {
            if let Some(existing) = table.get(genus) {
                error!(
                    "Genus '{}' listed as both {} and {}",
                    genus, existing, category
                );
                collisions.push(*genus);
                continue;
            }
            table.insert(*genus, *category);
        }
    }

    (table, collisions)
}

/// Category for a scientific name, looked up by its genus. Unknown genera are forbs.
pub fn categorize(scientific_name: &str) -> Category {
    let genus = scientific_name.split_whitespace().next().unwrap_or("");
    GENUS_TABLE.get(genus).copied().unwrap_or(Category::Forb)
}
